//! The per-post typing sequence: launch the editor, type the document,
//! drive the save dialog.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{info, warn};

use desktop_automation::{Desktop, Window};
use placeholder_client::Post;

use crate::config::Config;
use crate::document;

/// Attempts to get an editor window on screen before giving up.
const LAUNCH_ATTEMPTS: u32 = 3;
/// Pause between launch attempts.
const LAUNCH_RETRY_DELAY: Duration = Duration::from_millis(200);

pub struct Typist<'a> {
    desktop: &'a dyn Desktop,
    config: &'a Config,
}

impl<'a> Typist<'a> {
    pub fn new(desktop: &'a dyn Desktop, config: &'a Config) -> Self {
        Self { desktop, config }
    }

    /// Type one post into a fresh editor window and save it under the
    /// output directory. Returns the saved path. The editor window is
    /// intentionally left open.
    pub async fn type_post(&self, post: &Post) -> Result<PathBuf> {
        let text = document::compose(post);
        let path = self.config.output_dir.join(document::file_name(post));

        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.config.output_dir.display()
            )
        })?;
        // Ids repeat across runs; remove the old file so the editor's
        // overwrite prompt does not gate the save.
        if path.exists() {
            let _ = fs::remove_file(&path);
        }

        let window = self.launch_editor().await?;
        self.desktop.send_keys(&window, &text).await?;
        self.save(&window, &path).await?;

        Ok(path)
    }

    /// Launch-and-find with a fixed number of attempts; a fresh process is
    /// spawned on every attempt.
    async fn launch_editor(&self) -> Result<Window> {
        let mut last_err = None;
        for attempt in 1..=LAUNCH_ATTEMPTS {
            match self.try_launch().await {
                Ok(window) => {
                    info!(attempt, title = window.title(), "Editor ready");
                    return Ok(window);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Editor launch failed");
                    last_err = Some(e);
                    sleep(LAUNCH_RETRY_DELAY).await;
                }
            }
        }
        Err(last_err.expect("LAUNCH_ATTEMPTS is nonzero").into())
    }

    async fn try_launch(&self) -> desktop_automation::Result<Window> {
        self.desktop.launch(&self.config.editor_program).await?;
        self.desktop
            .find_window(&self.config.window_title, self.config.window_timeout())
            .await
    }

    /// Drive the save dialog, retrying once before giving up.
    async fn save(&self, window: &Window, path: &Path) -> Result<()> {
        match self
            .desktop
            .confirm_dialog(window, path, self.config.dialog_timeout())
            .await
        {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!(error = %first, "Save failed, retrying once");
                sleep(self.config.settle_delay()).await;
                Ok(self
                    .desktop
                    .confirm_dialog(window, path, self.config.dialog_timeout())
                    .await?)
            }
        }
    }
}
