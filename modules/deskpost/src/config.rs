use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
/// Every field has a default, so the binary runs with no setup at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the saved files land in.
    pub output_dir: PathBuf,
    /// How many posts to fetch and type.
    pub post_count: usize,
    /// Editor executable to spawn.
    pub editor_program: String,
    /// Title fragment that identifies the editor window.
    pub window_title: String,
    /// Seconds to wait for the editor window to appear.
    pub window_timeout_secs: u64,
    /// Seconds to wait for the save dialog to appear.
    pub dialog_timeout_secs: u64,
    /// Milliseconds to let the desktop settle between steps.
    pub settle_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            output_dir: env::var("DESKPOST_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),
            post_count: numeric_env("DESKPOST_POST_COUNT", 10),
            editor_program: env::var("DESKPOST_EDITOR")
                .unwrap_or_else(|_| "notepad.exe".to_string()),
            window_title: env::var("DESKPOST_WINDOW_TITLE")
                .unwrap_or_else(|_| "Notepad".to_string()),
            window_timeout_secs: numeric_env("DESKPOST_WINDOW_TIMEOUT_SECS", 10),
            dialog_timeout_secs: numeric_env("DESKPOST_DIALOG_TIMEOUT_SECS", 5),
            settle_ms: numeric_env("DESKPOST_SETTLE_MS", 500),
        }
    }

    pub fn window_timeout(&self) -> Duration {
        Duration::from_secs(self.window_timeout_secs)
    }

    pub fn dialog_timeout(&self) -> Duration {
        Duration::from_secs(self.dialog_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

fn numeric_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number")),
        Err(_) => default,
    }
}

fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deskpost")
}
