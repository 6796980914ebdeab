//! CLI-specific error types and mappings.
//!
//! Maps [`ResourceAccessError`] to exit codes and user-facing messages.

use rescope_core::ResourceAccessError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The transport could not reach the resource.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Any other resource access failure.
    #[error("{0}")]
    Resource(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Resource(_) => 1,
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::NotFound(_) => 66,  // EX_NOINPUT
            Self::Transport(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,        // EX_IOERR
        }
    }
}

impl From<ResourceAccessError> for CliError {
    fn from(err: ResourceAccessError) -> Self {
        match err {
            ResourceAccessError::NotFound { location } => Self::NotFound(location),
            ResourceAccessError::InvalidLocation { .. } => Self::Arguments(err.to_string()),
            ResourceAccessError::Io { .. } => Self::Io(err.to_string()),
            ResourceAccessError::Transport { .. } => Self::Transport(err.to_string()),
            ResourceAccessError::MalformedMetadata { .. } | ResourceAccessError::Other { .. } => {
                Self::Resource(err.to_string())
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
