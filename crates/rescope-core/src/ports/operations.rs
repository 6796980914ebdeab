//! Operation executor port.
//!
//! The executor owns the tracing backend: nesting, thread attribution and
//! export of recorded operations. Callers only build descriptors and, on
//! success, attach a result through the [`OperationContext`].

use std::sync::Arc;

use crate::domain::{OperationDescriptor, OperationId, OperationResult};
use crate::error::ResourceAccessError;

/// Context handed to a traced unit of work while it runs.
#[derive(Debug, Default)]
pub struct OperationContext {
    id: OperationId,
    result: Option<OperationResult>,
}

impl OperationContext {
    /// Create a context with a fresh operation id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the running operation.
    pub const fn id(&self) -> OperationId {
        self.id
    }

    /// Attach the operation's result. A later call replaces an earlier one.
    pub fn set_result(&mut self, result: OperationResult) {
        self.result = Some(result);
    }

    /// The result attached so far.
    pub const fn result(&self) -> Option<&OperationResult> {
        self.result.as_ref()
    }

    /// Consume the context, yielding the attached result.
    pub fn into_result(self) -> Option<OperationResult> {
        self.result
    }
}

/// Runs units of work as named, traced operations.
///
/// `call` returns only when `work` has finished. Implementations may run the
/// work on the calling thread; they must return the work's outcome unchanged
/// and must finish reporting the operation only after `work` returned, so a
/// consumer that observes a finished operation sees the result `work`
/// attached.
pub trait OperationExecutor: Send + Sync {
    /// Run `work` as the operation described by `descriptor`.
    fn call<T, F>(&self, descriptor: OperationDescriptor, work: F) -> Result<T, ResourceAccessError>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, ResourceAccessError>;
}

impl<E: OperationExecutor> OperationExecutor for Arc<E> {
    fn call<T, F>(&self, descriptor: OperationDescriptor, work: F) -> Result<T, ResourceAccessError>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, ResourceAccessError>,
    {
        (**self).call(descriptor, work)
    }
}

/// An executor that runs work inline and records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineOperationExecutor;

impl InlineOperationExecutor {
    /// Create a new inline executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OperationExecutor for InlineOperationExecutor {
    fn call<T, F>(&self, _descriptor: OperationDescriptor, work: F) -> Result<T, ResourceAccessError>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, ResourceAccessError>,
    {
        work(&mut OperationContext::new())
    }
}
