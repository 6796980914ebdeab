//! Resource access error type.
//!
//! A single error kind covers every failure raised by a transport, a
//! metadata parser or a caller-supplied content action. The instrumentation
//! layers never introduce new variants of their own; they only propagate
//! what the delegate produced.
//!
//! I/O errors are captured as kind and message strings so the error stays
//! `Clone` and comparable, which lets stubs replay an identical failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for all resource access operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResourceAccessError {
    /// I/O error while reading or writing resource content.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "`NotFound`", "`UnexpectedEof`").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// The transport failed to reach or talk to the resource.
    #[error("Could not access {location}: {message}")]
    Transport {
        /// URI of the resource being accessed.
        location: String,
        /// Detailed error message.
        message: String,
    },

    /// The resource was required but does not exist.
    #[error("Resource not found: {location}")]
    NotFound {
        /// URI of the missing resource.
        location: String,
    },

    /// Metadata returned by the transport could not be interpreted.
    #[error("Malformed metadata for {location}: {message}")]
    MalformedMetadata {
        /// URI of the resource.
        location: String,
        /// What was wrong with the metadata.
        message: String,
    },

    /// The resource location is not a valid URI.
    #[error("Invalid resource location '{value}': {message}")]
    InvalidLocation {
        /// The rejected input.
        value: String,
        /// Parser message.
        message: String,
    },

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl ResourceAccessError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(location: impl Into<String>) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Create a malformed metadata error.
    pub fn malformed_metadata(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create an invalid location error.
    pub fn invalid_location(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a general error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error means the resource is missing.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for ResourceAccessError {
    fn from(err: std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }
}
