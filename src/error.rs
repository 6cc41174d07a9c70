//! Errors raised while attaching a selector or while checking a selection

use thiserror::Error;

/// Why a selection was refused. Each variant carries the message that was
/// written to the error target, so callers can log or re-display it.
///
/// These are returned after the input has already been reset; they never
/// need to be handled for the UI to be consistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{0}")]
    InvalidFileType(String),
    #[error("{0}")]
    InvalidFileSize(String),
}

impl SelectionError {
    /// The message shown to the user
    pub fn message(&self) -> &str {
        match self {
            SelectionError::InvalidFileType(message) | SelectionError::InvalidFileSize(message) => {
                message
            }
        }
    }
}

/// Errors in the selector configuration itself
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Maximum file size must be a positive number of megabytes, got {0}")]
    InvalidMaxSize(f64),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("Invalid selector options: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Could not read selector options: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_display_is_message() {
        let error = SelectionError::InvalidFileSize("Too big".to_string());
        assert_eq!(error.to_string(), "Too big");
        assert_eq!(error.message(), "Too big");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::InvalidMaxSize(-1.0);
        assert!(error.to_string().contains("-1"));
    }
}
