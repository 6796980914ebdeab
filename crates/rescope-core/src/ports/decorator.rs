//! Transparent decoration of resource handles.
//!
//! [`ResourceDecorator`] is an insertion point: an implementor names its
//! delegate and overrides only the operations it wants to instrument. Every
//! other operation forwards to the delegate's operation of the same name with
//! the same arguments, and the blanket [`ExternalResource`] impl routes all
//! calls through the decorator.
//!
//! Both traits share method names. Inside this module calls are written in
//! fully qualified form so a delegate that is itself a decorator never
//! resolves to the wrong trait.

use std::io::{Read, Write};
use std::path::Path;

use url::Url;

use crate::domain::{ReadResult, ResourceMetaData, WriteResult};
use crate::error::ResourceAccessError;

use super::{ExternalResource, ReadableContent};

/// A resource handle that wraps another handle.
///
/// # Example
///
/// ```ignore
/// struct CountingReads<R> {
///     inner: R,
///     reads: AtomicUsize,
/// }
///
/// impl<R: ExternalResource> ResourceDecorator for CountingReads<R> {
///     type Delegate = R;
///
///     fn delegate(&self) -> &R {
///         &self.inner
///     }
///
///     fn with_content_if_present<T, F>(&self, action: F) -> Result<Option<ReadResult<T>>, ResourceAccessError>
///     where
///         F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
///     {
///         self.reads.fetch_add(1, Ordering::Relaxed);
///         ExternalResource::with_content_if_present(&self.inner, action)
///     }
/// }
/// ```
pub trait ResourceDecorator {
    /// The wrapped handle.
    type Delegate: ExternalResource;

    /// Access the wrapped handle.
    fn delegate(&self) -> &Self::Delegate;

    fn uri(&self) -> &Url {
        ExternalResource::uri(self.delegate())
    }

    fn display_name(&self) -> &str {
        ExternalResource::display_name(self.delegate())
    }

    fn meta_data(&self) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        ExternalResource::meta_data(self.delegate())
    }

    fn list(&self) -> Result<Option<Vec<String>>, ResourceAccessError> {
        ExternalResource::list(self.delegate())
    }

    fn put(&self, source: &dyn ReadableContent) -> Result<WriteResult, ResourceAccessError> {
        ExternalResource::put(self.delegate(), source)
    }

    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceAccessError> {
        ExternalResource::write_to_if_present(self.delegate(), destination)
    }

    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceAccessError> {
        ExternalResource::write_to(self.delegate(), destination)
    }

    fn write_to_stream(
        &self,
        destination: &mut dyn Write,
    ) -> Result<ReadResult<()>, ResourceAccessError> {
        ExternalResource::write_to_stream(self.delegate(), destination)
    }

    fn with_content<T, F>(&self, action: F) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        ExternalResource::with_content(self.delegate(), action)
    }

    fn with_content_and_metadata<T, F>(
        &self,
        action: F,
    ) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        ExternalResource::with_content_and_metadata(self.delegate(), action)
    }

    fn with_content_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        ExternalResource::with_content_if_present(self.delegate(), action)
    }

    fn with_content_and_metadata_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        ExternalResource::with_content_and_metadata_if_present(self.delegate(), action)
    }
}

impl<D: ResourceDecorator> ExternalResource for D {
    fn uri(&self) -> &Url {
        ResourceDecorator::uri(self)
    }

    fn display_name(&self) -> &str {
        ResourceDecorator::display_name(self)
    }

    fn meta_data(&self) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        ResourceDecorator::meta_data(self)
    }

    fn list(&self) -> Result<Option<Vec<String>>, ResourceAccessError> {
        ResourceDecorator::list(self)
    }

    fn put(&self, source: &dyn ReadableContent) -> Result<WriteResult, ResourceAccessError> {
        ResourceDecorator::put(self, source)
    }

    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceAccessError> {
        ResourceDecorator::write_to_if_present(self, destination)
    }

    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceAccessError> {
        ResourceDecorator::write_to(self, destination)
    }

    fn write_to_stream(
        &self,
        destination: &mut dyn Write,
    ) -> Result<ReadResult<()>, ResourceAccessError> {
        ResourceDecorator::write_to_stream(self, destination)
    }

    fn with_content<T, F>(&self, action: F) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        ResourceDecorator::with_content(self, action)
    }

    fn with_content_and_metadata<T, F>(
        &self,
        action: F,
    ) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        ResourceDecorator::with_content_and_metadata(self, action)
    }

    fn with_content_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        ResourceDecorator::with_content_if_present(self, action)
    }

    fn with_content_and_metadata_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        ResourceDecorator::with_content_and_metadata_if_present(self, action)
    }
}

/// A decorator that overrides nothing.
///
/// Useful as a placeholder layer and as the reference for the pass-through
/// behaviour every decorator inherits.
#[derive(Debug, Clone)]
pub struct ForwardingResource<R> {
    inner: R,
}

impl<R: ExternalResource> ForwardingResource<R> {
    /// Wrap `inner`.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the delegate.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ExternalResource> ResourceDecorator for ForwardingResource<R> {
    type Delegate = R;

    fn delegate(&self) -> &R {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::ResourceLocation;
    use crate::ports::BytesContent;
    use crate::testing::InMemoryResource;

    fn location() -> ResourceLocation {
        ResourceLocation::parse("http://example/repo/a.jar").unwrap()
    }

    fn read_all(stream: &mut dyn Read) -> Result<Vec<u8>, ResourceAccessError> {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Overrides a single operation; everything else must still reach the
    /// delegate's operation of the same name.
    struct CountingIfPresent<R> {
        inner: R,
        intercepted: AtomicUsize,
    }

    impl<R: ExternalResource> ResourceDecorator for CountingIfPresent<R> {
        type Delegate = R;

        fn delegate(&self) -> &R {
            &self.inner
        }

        fn with_content_if_present<T, F>(
            &self,
            action: F,
        ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
        where
            F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
        {
            self.intercepted.fetch_add(1, Ordering::SeqCst);
            ExternalResource::with_content_if_present(&self.inner, action)
        }
    }

    #[test]
    fn test_identity_comes_from_delegate() {
        let decorator = ForwardingResource::new(InMemoryResource::new(&location(), b"abc".to_vec()));
        assert_eq!(ExternalResource::uri(&decorator).as_str(), "http://example/repo/a.jar");
        assert_eq!(ExternalResource::display_name(&decorator), "a.jar");
    }

    #[test]
    fn test_pass_through_returns_delegate_values() {
        let delegate = InMemoryResource::new(&location(), b"hello".to_vec())
            .with_children(vec!["x".to_string()]);
        let decorator = ForwardingResource::new(delegate.clone());

        assert_eq!(
            ExternalResource::list(&decorator).unwrap(),
            ExternalResource::list(&delegate).unwrap()
        );
        assert_eq!(
            ExternalResource::meta_data(&decorator).unwrap(),
            ExternalResource::meta_data(&delegate).unwrap()
        );
        assert_eq!(
            ExternalResource::put(&decorator, &BytesContent::new(b"xyz".to_vec())).unwrap(),
            WriteResult::new(3)
        );

        let mut sink = Vec::new();
        let written = ExternalResource::write_to_stream(&decorator, &mut sink).unwrap();
        assert_eq!(written.bytes_read, 5);
        assert_eq!(sink, b"hello");

        let read = ExternalResource::with_content(&decorator, read_all).unwrap();
        assert_eq!(read, ReadResult::new(5, b"hello".to_vec()));
    }

    #[test]
    fn test_every_operation_reaches_matching_delegate_operation() {
        let delegate = InMemoryResource::new(&location(), b"hello".to_vec());
        let decorator = ForwardingResource::new(delegate.clone());
        let dir = tempfile::tempdir().unwrap();

        ExternalResource::meta_data(&decorator).unwrap();
        ExternalResource::list(&decorator).unwrap();
        ExternalResource::put(&decorator, &BytesContent::new(Vec::new())).unwrap();
        ExternalResource::write_to_if_present(&decorator, &dir.path().join("a")).unwrap();
        ExternalResource::write_to(&decorator, &dir.path().join("b")).unwrap();
        ExternalResource::write_to_stream(&decorator, &mut Vec::new()).unwrap();
        ExternalResource::with_content(&decorator, read_all).unwrap();
        ExternalResource::with_content_and_metadata(&decorator, |s, _| read_all(s)).unwrap();
        ExternalResource::with_content_if_present(&decorator, read_all).unwrap();
        ExternalResource::with_content_and_metadata_if_present(&decorator, |s, _| read_all(s))
            .unwrap();

        assert_eq!(
            delegate.calls(),
            vec![
                "meta_data",
                "list",
                "put",
                "write_to_if_present",
                "write_to",
                "write_to_stream",
                "with_content",
                "with_content_and_metadata",
                "with_content_if_present",
                "with_content_and_metadata_if_present",
            ]
        );
    }

    #[test]
    fn test_pass_through_propagates_delegate_failure() {
        let error = ResourceAccessError::transport("http://example/repo/a.jar", "reset");
        let decorator = ForwardingResource::new(
            InMemoryResource::new(&location(), b"hello".to_vec()).failing_with(error.clone()),
        );

        assert_eq!(ExternalResource::list(&decorator).unwrap_err(), error);
        assert_eq!(
            ExternalResource::with_content_if_present(&decorator, read_all).unwrap_err(),
            error
        );
    }

    #[test]
    fn test_missing_resource_semantics_are_preserved() {
        let decorator = ForwardingResource::new(InMemoryResource::missing(&location()));

        assert!(
            ExternalResource::with_content_if_present(&decorator, read_all)
                .unwrap()
                .is_none()
        );
        assert!(
            ExternalResource::with_content(&decorator, read_all)
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_override_applies_to_single_operation() {
        let delegate = InMemoryResource::new(&location(), b"hello".to_vec());
        let decorator = CountingIfPresent {
            inner: delegate.clone(),
            intercepted: AtomicUsize::new(0),
        };

        let read = ExternalResource::with_content_if_present(&decorator, read_all).unwrap();
        ExternalResource::with_content(&decorator, read_all).unwrap();

        assert_eq!(read.map(|r| r.value), Some(b"hello".to_vec()));
        assert_eq!(decorator.intercepted.load(Ordering::SeqCst), 1);
        assert_eq!(delegate.calls(), vec!["with_content_if_present", "with_content"]);
    }

    #[test]
    fn test_decorators_stack() {
        let delegate = InMemoryResource::new(&location(), b"hello".to_vec());
        let stacked = ForwardingResource::new(ForwardingResource::new(delegate.clone()));

        let read = ExternalResource::with_content_and_metadata(&stacked, |s, meta| {
            assert_eq!(meta.content_length, Some(5));
            read_all(s)
        })
        .unwrap();

        assert_eq!(read.value, b"hello");
        assert_eq!(delegate.calls(), vec!["with_content_and_metadata"]);
    }
}
