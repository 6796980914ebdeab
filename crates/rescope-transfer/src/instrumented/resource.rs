//! Resource handle decorator that fires traced operations.

use std::io::Read;

use rescope_core::{
    ExternalResource, OperationExecutor, OperationKind, OperationResult, ReadResult,
    ResourceAccessError, ResourceLocation, ResourceMetaData,
};

use super::descriptors::describe;
use crate::progress::CountingProgressStream;

/// Runs the read operations of a resource handle as traced operations.
///
/// Metadata reads become `Metadata of {name}` operations and the four
/// content reads become `Download {name}` operations whose result counts the
/// bytes the action consumed. Listing, writing and copying to files or
/// streams pass straight through to the delegate.
pub struct OperationFiringResource<R, E> {
    delegate: R,
    location: ResourceLocation,
    executor: E,
}

impl<R: ExternalResource, E: OperationExecutor> OperationFiringResource<R, E> {
    /// Wrap `delegate`, naming operations after its display name.
    pub fn new(delegate: R, executor: E) -> Self {
        let location = ResourceLocation::new(ExternalResource::uri(&delegate).clone())
            .with_display_name(ExternalResource::display_name(&delegate));
        Self {
            delegate,
            location,
            executor,
        }
    }

    /// Location used in operation descriptors.
    pub const fn location(&self) -> &ResourceLocation {
        &self.location
    }

    /// Run a content read as a `Download` operation.
    ///
    /// `read` returns the delegate's outcome plus the bytes the action
    /// consumed, or `None` when the resource is absent.
    fn download<T>(
        &self,
        read: impl FnOnce() -> Result<Option<(ReadResult<T>, u64)>, ResourceAccessError>,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError> {
        let descriptor = describe(OperationKind::Download, &self.location);
        self.executor.call(descriptor, |context| {
            let Some((result, consumed)) = read()? else {
                return Ok(None);
            };
            context.set_result(OperationResult::read(consumed));
            Ok(Some(result))
        })
    }
}

/// Run `action` over a counted stream, returning its value and the count.
fn counted<T>(
    input: &mut dyn Read,
    action: impl FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
) -> Result<(T, u64), ResourceAccessError> {
    let mut stream = CountingProgressStream::counting(input);
    let value = action(&mut stream)?;
    Ok((value, stream.bytes_read()))
}

fn split<T>(result: ReadResult<(T, u64)>) -> (ReadResult<T>, u64) {
    let consumed = result.value.1;
    (result.map(|(value, _)| value), consumed)
}

impl<R: ExternalResource, E: OperationExecutor> rescope_core::ResourceDecorator
    for OperationFiringResource<R, E>
{
    type Delegate = R;

    fn delegate(&self) -> &R {
        &self.delegate
    }

    fn meta_data(&self) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        let descriptor = describe(OperationKind::ReadMetadata, &self.location);
        self.executor.call(descriptor, |context| {
            let meta = ExternalResource::meta_data(&self.delegate)?;
            context.set_result(OperationResult::ReadMetadata);
            Ok(meta)
        })
    }

    fn with_content<T, F>(&self, action: F) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        self.download(|| {
            ExternalResource::with_content(&self.delegate, |input| counted(input, action))
                .map(|result| Some(split(result)))
        })?
        .ok_or_else(|| ResourceAccessError::not_found(self.location.uri().as_str()))
    }

    fn with_content_and_metadata<T, F>(
        &self,
        action: F,
    ) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        self.download(|| {
            ExternalResource::with_content_and_metadata(&self.delegate, |input, meta| {
                counted(input, |stream| action(stream, meta))
            })
            .map(|result| Some(split(result)))
        })?
        .ok_or_else(|| ResourceAccessError::not_found(self.location.uri().as_str()))
    }

    fn with_content_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        self.download(|| {
            ExternalResource::with_content_if_present(&self.delegate, |input| {
                counted(input, action)
            })
            .map(|result| result.map(split))
        })
    }

    fn with_content_and_metadata_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        self.download(|| {
            ExternalResource::with_content_and_metadata_if_present(&self.delegate, |input, meta| {
                counted(input, |stream| action(stream, meta))
            })
            .map(|result| result.map(split))
        })
    }
}
