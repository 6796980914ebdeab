//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the capabilities the instrumentation layer consumes and
//! exposes. They contain no implementation details and use only domain
//! types.
//!
//! # Design Rules
//!
//! - No transport types (HTTP clients, file handles) in any signature
//! - Content is always handed to a caller-supplied action, never returned
//! - Wrappers implement the same ports they consume, so layers stack

pub mod accessor;
pub mod decorator;
pub mod operations;
pub mod progress;
pub mod resource;

pub use accessor::{BytesContent, ReadableContent, ResourceAccessor, ResourceLister, ResourceUploader};
pub use decorator::{ForwardingResource, ResourceDecorator};
pub use operations::{InlineOperationExecutor, OperationContext, OperationExecutor};
pub use progress::{NoopProgressReporterFactory, ProgressReporter, ProgressReporterFactory};
pub use resource::ExternalResource;
