//! Error types for CLI commands

use hookstack_core::error::EXIT_FAILURE;
use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Error raised by the engine
    #[error(transparent)]
    Core(#[from] hookstack_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize output
    #[error("Failed to serialize output: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    /// Process exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(err) => err.exit_code(),
            Self::Other(err) => err
                .downcast_ref::<hookstack_core::Error>()
                .map_or(EXIT_FAILURE, hookstack_core::Error::exit_code),
            Self::IoError(_) | Self::JsonError(_) => EXIT_FAILURE,
        }
    }
}
