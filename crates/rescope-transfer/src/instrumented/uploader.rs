//! Instrumented resource uploader.

use std::io::Read;

use rescope_core::{
    OperationExecutor, OperationKind, OperationResult, ReadableContent, ResourceAccessError,
    ResourceLocation, ResourceUploader,
};

use super::descriptors::describe;
use crate::progress::{ProgressLogging, ProgressSession};

/// Adds traced operations and upload progress to a [`ResourceUploader`].
///
/// The content handed to the delegate is wrapped so every byte the delegate
/// reads from it is counted in an upload progress session. The operation
/// result is the number of bytes the delegate consumed.
pub struct ProgressLoggingResourceUploader<U, E> {
    delegate: U,
    progress: ProgressLogging,
    executor: E,
}

impl<U, E> ProgressLoggingResourceUploader<U, E> {
    /// Wrap `delegate`.
    pub const fn new(delegate: U, progress: ProgressLogging, executor: E) -> Self {
        Self {
            delegate,
            progress,
            executor,
        }
    }
}

impl<U: ResourceUploader, E: OperationExecutor> ResourceUploader
    for ProgressLoggingResourceUploader<U, E>
{
    fn upload(
        &self,
        content: &dyn ReadableContent,
        destination: &ResourceLocation,
    ) -> Result<(), ResourceAccessError> {
        let descriptor = describe(OperationKind::Upload, destination);
        self.executor.call(descriptor, |context| {
            let session = self.progress.begin(
                destination,
                OperationKind::Upload,
                module_path!(),
                content.content_length(),
            );
            self.delegate.upload(
                &ProgressLoggingContent {
                    inner: content,
                    session: &session,
                },
                destination,
            )?;
            let bytes_written = session.processed_bytes();
            session.completed();

            context.set_result(OperationResult::write(bytes_written));
            tracing::debug!(location = %destination, bytes_written, "Content written");
            Ok(())
        })
    }
}

/// Content whose streams report to an upload session.
///
/// A delegate that opens the content more than once is counted once per read
/// byte, so retried uploads report the bytes actually sent.
struct ProgressLoggingContent<'a> {
    inner: &'a dyn ReadableContent,
    session: &'a ProgressSession,
}

impl ReadableContent for ProgressLoggingContent<'_> {
    fn open(&self) -> Result<Box<dyn Read + '_>, ResourceAccessError> {
        let stream = self.inner.open()?;
        Ok(Box::new(self.session.wrap(stream)))
    }

    fn content_length(&self) -> Option<u64> {
        self.inner.content_length()
    }
}
