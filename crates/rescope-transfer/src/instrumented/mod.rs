//! Instrumented wrappers around the resource ports.
//!
//! Each wrapper submits one traced operation per call to an
//! [`OperationExecutor`](rescope_core::OperationExecutor) and, for streamed
//! payloads, counts the bytes through a progress session. Wrappers expose the
//! same port they consume, so they stack in front of a raw transport or in
//! front of each other.

mod accessor;
mod descriptors;
mod lister;
mod resource;
mod uploader;

pub use accessor::ProgressLoggingResourceAccessor;
pub use lister::ProgressLoggingResourceLister;
pub use resource::OperationFiringResource;
pub use uploader::ProgressLoggingResourceUploader;
