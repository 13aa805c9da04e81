use serde::{Deserialize, Serialize};

/// A single blog-style post from the JSONPlaceholder collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_posts_collection_shape() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit\nsuscipit recusandae"},
            {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore vitae"}
        ]"#;

        let posts: Vec<Post> = serde_json::from_str(json).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].user_id, 1);
        assert_eq!(posts[0].id, 1);
        assert!(!posts[0].title.is_empty());
        assert!(!posts[0].body.is_empty());
        assert!(posts[0].body.contains('\n'));
    }
}
