//! Traced operation types: kinds, descriptors, details and results.
//!
//! A descriptor is built before a traced unit of work runs and is never
//! modified afterwards. A result is attached only when the unit succeeds.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

// ============================================================================
// Operation Kind
// ============================================================================

/// The kind of resource operation being observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Reading resource content.
    Download,
    /// Fetching resource metadata only.
    ReadMetadata,
    /// Writing resource content.
    Upload,
    /// Listing the children of a resource.
    List,
}

impl OperationKind {
    /// Prefix used in operation display names and progress headers.
    pub const fn capitalized(self) -> &'static str {
        match self {
            Self::Download => "Download",
            Self::ReadMetadata => "Metadata of",
            Self::Upload => "Upload",
            Self::List => "List",
        }
    }

    /// Verb appended to progress messages.
    pub const fn progress_suffix(self) -> &'static str {
        match self {
            Self::Download => "downloaded",
            Self::ReadMetadata => "read",
            Self::Upload => "uploaded",
            Self::List => "listed",
        }
    }

    /// Whether operations of this kind carry a byte stream worth reporting.
    pub const fn tracks_progress(self) -> bool {
        matches!(self, Self::Download | Self::Upload)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.capitalized())
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// Kind-specific details attached to an operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationDetails {
    /// Content read of a resource.
    Read {
        /// Resource URI.
        location: Url,
    },
    /// Metadata read of a resource.
    ReadMetadata {
        /// Resource URI.
        location: Url,
    },
    /// Content write of a resource.
    Write {
        /// Resource URI.
        location: Url,
    },
    /// Listing of a resource's children.
    List {
        /// Resource URI.
        location: Url,
    },
}

impl OperationDetails {
    /// The resource URI the operation targets.
    pub const fn location(&self) -> &Url {
        match self {
            Self::Read { location }
            | Self::ReadMetadata { location }
            | Self::Write { location }
            | Self::List { location } => location,
        }
    }
}

/// Describes a traced unit of work before it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress_display_name: Option<String>,
    details: OperationDetails,
}

impl OperationDescriptor {
    /// Create a descriptor with a display name and details.
    pub fn new(display_name: impl Into<String>, details: OperationDetails) -> Self {
        Self {
            display_name: display_name.into(),
            progress_display_name: None,
            details,
        }
    }

    /// Set the name shown by progress displays while the operation runs.
    #[must_use]
    pub fn with_progress_display_name(mut self, name: impl Into<String>) -> Self {
        self.progress_display_name = Some(name.into());
        self
    }

    /// Full display name, e.g. `Download a.jar`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Progress display name, if any.
    pub fn progress_display_name(&self) -> Option<&str> {
        self.progress_display_name.as_deref()
    }

    /// Kind-specific details.
    pub const fn details(&self) -> &OperationDetails {
        &self.details
    }
}

// ============================================================================
// Result
// ============================================================================

/// Kind-specific payload recorded when a traced unit succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationResult {
    /// Bytes the caller actually consumed from the content stream.
    Read {
        /// Number of bytes read.
        bytes_read: u64,
    },
    /// Empty marker for a completed metadata read.
    ReadMetadata,
    /// Bytes the transport consumed from the uploaded content.
    Write {
        /// Number of bytes written.
        bytes_written: u64,
    },
    /// Number of children returned by a listing.
    List {
        /// Number of entries.
        entries: usize,
    },
}

impl OperationResult {
    /// Result of a content read.
    pub const fn read(bytes_read: u64) -> Self {
        Self::Read { bytes_read }
    }

    /// Result of a content write.
    pub const fn write(bytes_written: u64) -> Self {
        Self::Write { bytes_written }
    }

    /// Result of a listing.
    pub const fn list(entries: usize) -> Self {
        Self::List { entries }
    }
}

// ============================================================================
// Operation ID
// ============================================================================

/// Identifier of a single traced unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
