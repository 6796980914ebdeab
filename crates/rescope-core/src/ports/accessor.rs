//! Resource transport ports.
//!
//! These traits are implemented by transports (HTTP, S3, local files) and
//! by the instrumentation wrappers that decorate them, so a wrapper can sit
//! in front of a raw transport or in front of another wrapper.

use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::domain::{ResourceLocation, ResourceMetaData};
use crate::error::ResourceAccessError;

/// Reads content and metadata of external resources.
pub trait ResourceAccessor: Send + Sync {
    /// Open the resource and hand its content stream to `action`.
    ///
    /// Returns `Ok(None)` without calling `action` when the resource does not
    /// exist. `revalidate` asks the transport to bypass any cached state.
    /// Failures raised by `action` are returned unchanged.
    fn with_content<T, F>(
        &self,
        location: &ResourceLocation,
        revalidate: bool,
        action: F,
    ) -> Result<Option<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>;

    /// Fetch metadata for the resource, or `Ok(None)` when it does not exist.
    fn meta_data(
        &self,
        location: &ResourceLocation,
        revalidate: bool,
    ) -> Result<Option<ResourceMetaData>, ResourceAccessError>;
}

impl<A: ResourceAccessor> ResourceAccessor for Arc<A> {
    fn with_content<T, F>(
        &self,
        location: &ResourceLocation,
        revalidate: bool,
        action: F,
    ) -> Result<Option<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        (**self).with_content(location, revalidate, action)
    }

    fn meta_data(
        &self,
        location: &ResourceLocation,
        revalidate: bool,
    ) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        (**self).meta_data(location, revalidate)
    }
}

/// Writes content to external resources.
pub trait ResourceUploader: Send + Sync {
    /// Write `content` to `destination`, replacing what is there.
    fn upload(
        &self,
        content: &dyn ReadableContent,
        destination: &ResourceLocation,
    ) -> Result<(), ResourceAccessError>;
}

impl<U: ResourceUploader + ?Sized> ResourceUploader for Arc<U> {
    fn upload(
        &self,
        content: &dyn ReadableContent,
        destination: &ResourceLocation,
    ) -> Result<(), ResourceAccessError> {
        (**self).upload(content, destination)
    }
}

/// Lists the children of external resources.
pub trait ResourceLister: Send + Sync {
    /// Names of the direct children of `parent`, or `Ok(None)` when the
    /// parent does not exist.
    fn list(&self, parent: &ResourceLocation) -> Result<Option<Vec<String>>, ResourceAccessError>;
}

impl<L: ResourceLister + ?Sized> ResourceLister for Arc<L> {
    fn list(&self, parent: &ResourceLocation) -> Result<Option<Vec<String>>, ResourceAccessError> {
        (**self).list(parent)
    }
}

/// Content that can be opened for reading, possibly more than once.
pub trait ReadableContent {
    /// Open a fresh stream over the content.
    fn open(&self) -> Result<Box<dyn Read + '_>, ResourceAccessError>;

    /// Size of the content in bytes, if known up front.
    fn content_length(&self) -> Option<u64>;
}

/// In-memory content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesContent {
    bytes: Vec<u8>,
}

impl BytesContent {
    /// Wrap a byte buffer.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The wrapped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ReadableContent for BytesContent {
    fn open(&self) -> Result<Box<dyn Read + '_>, ResourceAccessError> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.bytes.len() as u64)
    }
}
