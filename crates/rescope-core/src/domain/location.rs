//! Resource locations.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResourceAccessError;

/// Longest short display name shown in progress UIs.
const MAX_SHORT_DISPLAY_NAME: usize = 40;

/// Identifies an external resource: a URI plus the names used to show it.
///
/// This describes *what* is being accessed, never *how*. The value is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLocation {
    uri: Url,
    display_name: String,
    short_display_name: String,
}

impl ResourceLocation {
    /// Create a location for `uri`.
    ///
    /// The display name is the last non-empty path segment, or the full URI
    /// when the path has none (e.g. `http://example/`).
    pub fn new(uri: Url) -> Self {
        let display_name = uri
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .map_or_else(|| uri.to_string(), str::to_string);
        let short_display_name = shorten(&display_name);
        Self {
            uri,
            display_name,
            short_display_name,
        }
    }

    /// Parse a URI string into a location.
    pub fn parse(value: &str) -> Result<Self, ResourceAccessError> {
        let uri = Url::parse(value)
            .map_err(|e| ResourceAccessError::invalid_location(value, e.to_string()))?;
        Ok(Self::new(uri))
    }

    /// Replace the display name (the short name is derived from it).
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self.short_display_name = shorten(&self.display_name);
        self
    }

    /// The resource URI.
    pub const fn uri(&self) -> &Url {
        &self.uri
    }

    /// Human readable name, used in operation display names.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Compact name for progress displays.
    pub fn short_display_name(&self) -> &str {
        &self.short_display_name
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

fn shorten(raw: &str) -> String {
    if raw.chars().count() <= MAX_SHORT_DISPLAY_NAME {
        return raw.to_string();
    }
    let mut buf: String = raw.chars().take(MAX_SHORT_DISPLAY_NAME - 1).collect();
    buf.push('…');
    buf
}
