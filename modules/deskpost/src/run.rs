//! Sequential driver: fetch once, then type and save each post in turn.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::info;

use desktop_automation::Desktop;

use crate::config::Config;
use crate::traits::PostSource;
use crate::typist::Typist;

/// Stats from a deskpost run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub posts_fetched: u32,
    pub files_written: u32,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Deskpost Run Complete ===")?;
        writeln!(f, "Posts fetched: {}", self.posts_fetched)?;
        writeln!(f, "Files written: {}", self.files_written)?;
        Ok(())
    }
}

pub struct Runner {
    source: Arc<dyn PostSource>,
    desktop: Arc<dyn Desktop>,
    config: Config,
}

impl Runner {
    pub fn new(source: Arc<dyn PostSource>, desktop: Arc<dyn Desktop>, config: Config) -> Self {
        Self {
            source,
            desktop,
            config,
        }
    }

    /// Run the full fetch-and-type sequence. GUI automation drives the
    /// focused window, so posts are typed strictly one at a time; any
    /// failure aborts the remaining sequence.
    pub async fn run(&self) -> Result<RunStats> {
        let mut stats = RunStats::default();

        info!(count = self.config.post_count, "Fetching posts");
        let posts = self
            .source
            .fetch_posts(self.config.post_count)
            .await
            .context("Failed to fetch posts")?;
        stats.posts_fetched = posts.len() as u32;

        let typist = Typist::new(self.desktop.as_ref(), &self.config);
        for post in &posts {
            let path = typist
                .type_post(post)
                .await
                .with_context(|| format!("Failed to type post {}", post.id))?;
            stats.files_written += 1;
            info!(post_id = post.id, path = %path.display(), "Saved post");
            // Let the OS settle focus before the next window comes up.
            sleep(self.config.settle_delay()).await;
        }

        Ok(stats)
    }
}
