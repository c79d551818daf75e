//! Error handling for wordlist-forge

use thiserror::Error;

/// Main error type for wordlist-forge
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordlistError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Insufficient disk space: need {required} bytes, {free} bytes free")]
    InsufficientSpace { required: String, free: u64 },

    #[error("Free disk space could not be determined for '{path}'")]
    SpaceUnknown { path: String },

    #[error("IO error: {message} ({written} entries written)")]
    Io {
        message: String,
        path: Option<String>,
        written: u64,
    },

    #[error("Generation interrupted after {written} entries")]
    Interrupted { written: u64 },

    #[error("Aborted: {message}")]
    Aborted { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl WordlistError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an insufficient space warning that was not overridden
    pub fn insufficient_space(required: impl ToString, free: u64) -> Self {
        Self::InsufficientSpace {
            required: required.to_string(),
            free,
        }
    }

    /// Create an unknown free space error
    pub fn space_unknown(path: impl Into<String>) -> Self {
        Self::SpaceUnknown { path: path.into() }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>, written: u64) -> Self {
        Self::Io {
            message: message.into(),
            path,
            written,
        }
    }

    /// Create an interrupted error
    pub fn interrupted(written: u64) -> Self {
        Self::Interrupted { written }
    }

    /// Create an aborted error
    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Number of entries that made it to disk before the run stopped, if any
    pub fn entries_written(&self) -> Option<u64> {
        match self {
            Self::Io { written, .. } | Self::Interrupted { written } => Some(*written),
            _ => None,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::Config { .. } | Self::Cli { .. } => 2,
            Self::InsufficientSpace { .. } | Self::SpaceUnknown { .. } | Self::Aborted { .. } => 3,
            Self::Io { .. } => 74,
            Self::Interrupted { .. } => 130,
            Self::Internal { .. } => 1,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your alphabet and length bounds", message)
            }
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your flags or .env file", message)
            }
            Self::InsufficientSpace { required, free } => {
                format!(
                    "⚠️  Not enough free space: {} bytes needed, {} bytes available\n💡 Free some space, narrow the length range, or pass --force",
                    required, free
                )
            }
            Self::SpaceUnknown { path } => {
                format!(
                    "⚠️  Could not determine free disk space at '{}'\n💡 Pass --force to continue anyway",
                    path
                )
            }
            Self::Io { message, path, written } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!(
                    "❌ File error{}: {}\n📝 {} entries were written before the failure\n💡 Check file permissions and free space",
                    path_info, message, written
                )
            }
            Self::Interrupted { written } => {
                format!("🛑 Interrupted by user. Partial file kept with {} entries.", written)
            }
            Self::Aborted { message } => format!("🚫 Aborted: {}", message),
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }
}

/// Convert from common error types
impl From<std::io::Error> for WordlistError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None, 0)
    }
}

impl From<serde_json::Error> for WordlistError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("Failed to serialize report: {}", err))
    }
}

impl From<inquire::InquireError> for WordlistError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => Self::aborted("prompt cancelled"),
            other => Self::cli(other.to_string()),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordlistError>;

/// Helper macro for validation failures
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::WordlistError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::WordlistError::validation(format!($fmt, $($arg)*))
    };
}
