//! Resource metadata as reported by a transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Metadata describing an external resource.
///
/// Produced by the transport, consumed read-only by the instrumentation.
/// Every field other than the location may be unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetaData {
    /// Where the resource lives.
    pub location: Url,
    /// Last modification time, if the transport reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Content length in bytes; `None` when unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    /// MIME type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Entity tag used for revalidation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// SHA-1 checksum published alongside the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    /// File name suggested by the transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl ResourceMetaData {
    /// Create metadata for `location` with every optional field unknown.
    pub const fn new(location: Url) -> Self {
        Self {
            location,
            last_modified: None,
            content_length: None,
            content_type: None,
            etag: None,
            sha1: None,
            filename: None,
        }
    }

    /// Set the content length.
    #[must_use]
    pub const fn with_content_length(mut self, content_length: u64) -> Self {
        self.content_length = Some(content_length);
        self
    }

    /// Set the last modification time.
    #[must_use]
    pub const fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Set the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the entity tag.
    #[must_use]
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Set the SHA-1 checksum.
    #[must_use]
    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }

    /// Set the suggested file name.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}
