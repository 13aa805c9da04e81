//! OS-level text editor automation.
//!
//! The driver loop only ever talks to the [`Desktop`] trait: launch an
//! editor, wait for its window, inject keystrokes, walk the save dialog.
//! The real Win32 backend lives in [`WinDesktop`]; tests substitute their
//! own implementation and never touch the OS.

pub mod error;
#[cfg(windows)]
mod win;

pub use error::{AutomationError, Result};
#[cfg(windows)]
pub use win::WinDesktop;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

/// Handle to a top-level window, captured at discovery time.
#[derive(Debug, Clone)]
pub struct Window {
    raw: isize,
    title: String,
}

impl Window {
    pub fn new(raw: isize, title: impl Into<String>) -> Self {
        Self {
            raw,
            title: title.into(),
        }
    }

    /// OS-native handle (an `HWND` on Windows).
    pub fn raw(&self) -> isize {
        self.raw
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// The OS capabilities the typing sequence needs, one method per step.
///
/// Every wait is bounded by an explicit timeout; a timeout is surfaced as
/// an error, never swallowed.
#[async_trait]
pub trait Desktop: Send + Sync {
    /// Spawn the editor process. Does not wait for a window.
    async fn launch(&self, program: &str) -> Result<()>;

    /// Poll until a visible top-level window whose title contains
    /// `title_fragment` exists.
    async fn find_window(&self, title_fragment: &str, timeout: Duration) -> Result<Window>;

    /// Focus the window and simulate typing `text` (newlines as Enter).
    async fn send_keys(&self, window: &Window, text: &str) -> Result<()>;

    /// Drive the native save sequence: save shortcut, wait for the dialog,
    /// type the full target path, confirm, answer a possible overwrite
    /// prompt.
    async fn confirm_dialog(&self, window: &Window, path: &Path, timeout: Duration) -> Result<()>;
}

/// Poll `probe` every `interval` until it returns `Some` or `timeout`
/// elapses.
pub async fn poll_until<T, F>(mut probe: F, timeout: Duration, interval: Duration) -> Option<T>
where
    F: FnMut() -> Option<T>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(value) = probe() {
            return Some(value);
        }
        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn poll_until_returns_the_first_hit() {
        let mut calls = 0;
        let result = poll_until(
            || {
                calls += 1;
                (calls == 3).then_some(calls)
            },
            Duration::from_secs(5),
            Duration::from_millis(100),
        )
        .await;

        assert_eq!(result, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_until_gives_up_at_the_deadline() {
        let result: Option<()> = poll_until(
            || None,
            Duration::from_millis(300),
            Duration::from_millis(100),
        )
        .await;

        assert!(result.is_none());
    }

    #[test]
    fn window_timeout_names_the_title_fragment() {
        let err = AutomationError::WindowTimeout {
            title: "Notepad".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("Notepad"));
    }
}
