//! Core domain types and ports for instrumented external resource access.
//!
//! - `domain` - locations, metadata, operation descriptors and results
//! - `ports` - transport, executor, progress and resource handle traits
//! - `error` - the single [`ResourceAccessError`] type
//! - `testing` - recording stubs (behind the `test-utils` feature)

pub mod domain;
pub mod error;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    OperationDescriptor, OperationDetails, OperationId, OperationKind, OperationResult,
    ReadResult, ResourceLocation, ResourceMetaData, WriteResult,
};
pub use error::ResourceAccessError;
pub use ports::{
    BytesContent, ExternalResource, ForwardingResource, InlineOperationExecutor,
    NoopProgressReporterFactory, OperationContext, OperationExecutor, ProgressReporter,
    ProgressReporterFactory, ReadableContent, ResourceAccessor, ResourceDecorator,
    ResourceLister, ResourceUploader,
};
