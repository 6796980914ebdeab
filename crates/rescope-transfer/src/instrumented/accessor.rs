//! Instrumented resource accessor.

use std::io::Read;

use rescope_core::{
    OperationExecutor, OperationKind, OperationResult, ResourceAccessError, ResourceAccessor,
    ResourceLocation, ResourceMetaData,
};

use super::descriptors::describe;
use crate::progress::ProgressLogging;

/// Adds traced operations and download progress to a [`ResourceAccessor`].
///
/// Every content fetch runs as one `Download {name}` operation whose result
/// is the number of bytes the caller's action actually read. Every metadata
/// fetch runs as one `Metadata of {name}` operation with no progress.
pub struct ProgressLoggingResourceAccessor<A, E> {
    delegate: A,
    progress: ProgressLogging,
    executor: E,
}

impl<A, E> ProgressLoggingResourceAccessor<A, E> {
    /// Wrap `delegate`.
    pub const fn new(delegate: A, progress: ProgressLogging, executor: E) -> Self {
        Self {
            delegate,
            progress,
            executor,
        }
    }

    /// The wrapped accessor.
    pub const fn delegate(&self) -> &A {
        &self.delegate
    }
}

impl<A: ResourceAccessor, E: OperationExecutor> ResourceAccessor
    for ProgressLoggingResourceAccessor<A, E>
{
    fn with_content<T, F>(
        &self,
        location: &ResourceLocation,
        revalidate: bool,
        action: F,
    ) -> Result<Option<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        let descriptor = describe(OperationKind::Download, location);
        self.executor.call(descriptor, |context| {
            self.delegate
                .with_content(location, revalidate, |input, meta| {
                    let session = self.progress.begin(
                        location,
                        OperationKind::Download,
                        module_path!(),
                        meta.content_length,
                    );
                    let mut stream = session.wrap(input);
                    let outcome = action(&mut stream, meta);
                    let bytes_read = stream.bytes_read();
                    drop(stream);
                    session.completed();

                    let value = outcome?;
                    context.set_result(OperationResult::read(bytes_read));
                    tracing::debug!(location = %location, bytes_read, "Content read");
                    Ok(value)
                })
        })
    }

    fn meta_data(
        &self,
        location: &ResourceLocation,
        revalidate: bool,
    ) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        let descriptor = describe(OperationKind::ReadMetadata, location);
        self.executor.call(descriptor, |context| {
            let meta = self.delegate.meta_data(location, revalidate)?;
            context.set_result(OperationResult::ReadMetadata);
            Ok(meta)
        })
    }
}
