//! Document composition — the text typed into the editor and the file
//! name it is saved under.

use placeholder_client::Post;

const BYLINE: &str = "by JSONPlaceholder";
const POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Render a post as the document typed into the editor: header line,
/// byline, separator, body, then a source link.
pub fn compose(post: &Post) -> String {
    format!(
        "Post {id}: {title}\n{BYLINE}\n---\n{body}\n\nSource: {POSTS_URL}/{id}",
        id = post.id,
        title = post.title,
        body = post.body,
    )
}

/// Deterministic per-post file name. Ids repeat across runs, so a rerun
/// produces the same names and overwrites the previous files.
pub fn file_name(post: &Post) -> String {
    format!("post-{}.txt", post.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        Post {
            user_id: 9,
            id: 7,
            title: "magnam facilis autem".to_string(),
            body: "dolore placeat quibusdam ea quo vitae\nmagni quis enim".to_string(),
        }
    }

    #[test]
    fn compose_lays_out_header_byline_body_and_source() {
        let doc = compose(&post());

        let expected = "Post 7: magnam facilis autem\n\
                        by JSONPlaceholder\n\
                        ---\n\
                        dolore placeat quibusdam ea quo vitae\nmagni quis enim\n\
                        \n\
                        Source: https://jsonplaceholder.typicode.com/posts/7";
        assert_eq!(doc, expected);
    }

    #[test]
    fn file_name_is_derived_from_the_post_id() {
        assert_eq!(file_name(&post()), "post-7.txt");
    }
}
