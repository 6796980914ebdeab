//! External resource handle port.

use std::io::{Read, Write};
use std::path::Path;

use url::Url;

use crate::domain::{ReadResult, ResourceMetaData, WriteResult};
use crate::error::ResourceAccessError;

use super::ReadableContent;

/// A handle to one external resource.
///
/// The plain read operations fail with [`ResourceAccessError::NotFound`]
/// when the resource does not exist; the `_if_present` variants return
/// `Ok(None)` instead.
pub trait ExternalResource {
    /// URI of the resource.
    fn uri(&self) -> &Url;

    /// Human readable name of the resource.
    fn display_name(&self) -> &str;

    /// Metadata of the resource, or `None` when it does not exist.
    fn meta_data(&self) -> Result<Option<ResourceMetaData>, ResourceAccessError>;

    /// Names of the resource's children, or `None` when it does not exist.
    fn list(&self) -> Result<Option<Vec<String>>, ResourceAccessError>;

    /// Replace the resource content with `source`.
    fn put(&self, source: &dyn ReadableContent) -> Result<WriteResult, ResourceAccessError>;

    /// Copy the content into a file, if the resource exists.
    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceAccessError>;

    /// Copy the content into a file.
    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceAccessError>;

    /// Copy the content into a writer.
    fn write_to_stream(
        &self,
        destination: &mut dyn Write,
    ) -> Result<ReadResult<()>, ResourceAccessError>;

    /// Run `action` over the content stream.
    fn with_content<T, F>(&self, action: F) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>;

    /// Run `action` over the content stream and the resource metadata.
    fn with_content_and_metadata<T, F>(
        &self,
        action: F,
    ) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>;

    /// Run `action` over the content stream, if the resource exists.
    fn with_content_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>;

    /// Run `action` over the content stream and metadata, if the resource exists.
    fn with_content_and_metadata_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>;
}
