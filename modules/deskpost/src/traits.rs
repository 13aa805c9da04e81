// Trait abstraction for the fetch side of the run.
//
// PostSource puts the HTTP client behind one seam so the driver loop can
// be exercised with MockPostSource: no network in `cargo test`.

use anyhow::Result;
use async_trait::async_trait;

use placeholder_client::{PlaceholderClient, Post};

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the first `limit` posts from the collection endpoint.
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Post>>;
}

#[async_trait]
impl PostSource for PlaceholderClient {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Post>> {
        Ok(self.fetch_posts(limit).await?)
    }
}
