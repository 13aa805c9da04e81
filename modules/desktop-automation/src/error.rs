use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutomationError>;

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("Failed to launch editor `{program}`: {reason}")]
    Launch { program: String, reason: String },

    #[error("No window matching `{title}` appeared within {timeout:?}")]
    WindowTimeout { title: String, timeout: Duration },

    #[error("Save dialog did not appear within {timeout:?}")]
    DialogTimeout { timeout: Duration },

    #[error("Keystroke injection failed: {0}")]
    Input(String),

    #[error("Desktop automation backend is only available on Windows")]
    Unsupported,
}
