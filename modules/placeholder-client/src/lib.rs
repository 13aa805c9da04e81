pub mod error;
pub mod types;

pub use error::{FetchError, Result};
pub use types::Post;

use std::time::Duration;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

pub struct PlaceholderClient {
    client: reqwest::Client,
    base_url: String,
}

impl PlaceholderClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Same client against another base URL (exercised by tests).
    pub fn with_base_url(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the posts collection and return the first `limit` records.
    pub async fn fetch_posts(&self, limit: usize) -> Result<Vec<Post>> {
        let url = format!("{}/posts", self.base_url);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut posts: Vec<Post> = resp.json().await?;
        posts.truncate(limit);
        tracing::info!(count = posts.len(), "Fetched posts");

        Ok(posts)
    }
}

impl Default for PlaceholderClient {
    fn default() -> Self {
        Self::new()
    }
}
