// Test doubles for the driver loop.
//
// Two mocks matching the two trait boundaries:
// - MockPostSource (PostSource) — canned post list or injected failure
// - MockDesktop (Desktop) — records the automation script; confirm_dialog
//   writes the typed text to the target path, standing in for the
//   editor's own save.
//
// Plus helpers for constructing posts and a config pointed at a scratch
// directory.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use desktop_automation::{AutomationError, Desktop, Window};
use placeholder_client::{FetchError, Post};

use crate::config::Config;
use crate::traits::PostSource;

// ---------------------------------------------------------------------------
// MockPostSource
// ---------------------------------------------------------------------------

/// Canned post source. Returns the configured posts truncated to `limit`,
/// or a network error when built with [`MockPostSource::failing`].
pub struct MockPostSource {
    posts: Vec<Post>,
    fail_network: bool,
}

impl MockPostSource {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts,
            fail_network: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            posts: Vec::new(),
            fail_network: true,
        }
    }
}

#[async_trait]
impl PostSource for MockPostSource {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<Post>> {
        if self.fail_network {
            return Err(FetchError::Network("connection refused".to_string()).into());
        }
        let mut posts = self.posts.clone();
        posts.truncate(limit);
        Ok(posts)
    }
}

// ---------------------------------------------------------------------------
// MockDesktop
// ---------------------------------------------------------------------------

/// One recorded automation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Launch(String),
    FindWindow(String),
    SendKeys { window: isize, text: String },
    ConfirmDialog { window: isize, path: PathBuf },
}

/// Scriptable desktop. Records every call; builder methods inject
/// failures at a chosen step.
pub struct MockDesktop {
    actions: Mutex<Vec<Action>>,
    typed: Mutex<String>,
    launch_calls: Mutex<u32>,
    dialog_calls: Mutex<u32>,
    fail_first_launches: u32,
    fail_dialog_from: Option<u32>,
    fail_window: bool,
}

impl MockDesktop {
    pub fn new() -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
            typed: Mutex::new(String::new()),
            launch_calls: Mutex::new(0),
            dialog_calls: Mutex::new(0),
            fail_first_launches: 0,
            fail_dialog_from: None,
            fail_window: false,
        }
    }

    /// The first `n` launch calls fail as if the process never started.
    pub fn fail_first_launches(mut self, n: u32) -> Self {
        self.fail_first_launches = n;
        self
    }

    /// The `n`-th confirm_dialog call (1-based) and every later one time
    /// out, so the per-post save retry fails too.
    pub fn fail_dialog_from(mut self, n: u32) -> Self {
        self.fail_dialog_from = Some(n);
        self
    }

    /// Every find_window call times out.
    pub fn never_find_window(mut self) -> Self {
        self.fail_window = true;
        self
    }

    /// The recorded call script, in order.
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

impl Default for MockDesktop {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Desktop for MockDesktop {
    async fn launch(&self, program: &str) -> desktop_automation::Result<()> {
        self.record(Action::Launch(program.to_string()));
        let mut calls = self.launch_calls.lock().unwrap();
        *calls += 1;
        if *calls <= self.fail_first_launches {
            return Err(AutomationError::Launch {
                program: program.to_string(),
                reason: "mock launch failure".to_string(),
            });
        }
        Ok(())
    }

    async fn find_window(
        &self,
        title_fragment: &str,
        timeout: Duration,
    ) -> desktop_automation::Result<Window> {
        self.record(Action::FindWindow(title_fragment.to_string()));
        if self.fail_window {
            return Err(AutomationError::WindowTimeout {
                title: title_fragment.to_string(),
                timeout,
            });
        }
        let raw = *self.launch_calls.lock().unwrap() as isize;
        Ok(Window::new(raw, format!("Untitled - {title_fragment}")))
    }

    async fn send_keys(&self, window: &Window, text: &str) -> desktop_automation::Result<()> {
        self.record(Action::SendKeys {
            window: window.raw(),
            text: text.to_string(),
        });
        *self.typed.lock().unwrap() = text.to_string();
        Ok(())
    }

    async fn confirm_dialog(
        &self,
        window: &Window,
        path: &Path,
        timeout: Duration,
    ) -> desktop_automation::Result<()> {
        self.record(Action::ConfirmDialog {
            window: window.raw(),
            path: path.to_path_buf(),
        });
        let mut calls = self.dialog_calls.lock().unwrap();
        *calls += 1;
        if let Some(from) = self.fail_dialog_from {
            if *calls >= from {
                return Err(AutomationError::DialogTimeout { timeout });
            }
        }
        // Stand in for the editor: persist whatever was last typed.
        let text = self.typed.lock().unwrap().clone();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AutomationError::Input(e.to_string()))?;
        }
        std::fs::write(path, text).map_err(|e| AutomationError::Input(e.to_string()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Shorthand post with non-empty title and body derived from the id.
pub fn post(id: u32) -> Post {
    Post {
        user_id: 1,
        id,
        title: format!("title {id}"),
        body: format!("body {id}\nsecond line {id}"),
    }
}

/// Posts with ids `1..=n`.
pub fn posts(n: u32) -> Vec<Post> {
    (1..=n).map(post).collect()
}

/// Config pointed at a scratch directory, with settle delays zeroed so
/// tests run fast.
pub fn test_config(output_dir: &Path) -> Config {
    Config {
        output_dir: output_dir.to_path_buf(),
        post_count: 10,
        editor_program: "notepad.exe".to_string(),
        window_title: "Notepad".to_string(),
        window_timeout_secs: 1,
        dialog_timeout_secs: 1,
        settle_ms: 0,
    }
}
