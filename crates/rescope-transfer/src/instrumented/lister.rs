//! Instrumented resource lister.

use rescope_core::{
    OperationExecutor, OperationKind, OperationResult, ResourceAccessError, ResourceLister,
    ResourceLocation,
};

use super::descriptors::describe;

/// Runs every listing of a [`ResourceLister`] as a traced `List` operation.
pub struct ProgressLoggingResourceLister<L, E> {
    delegate: L,
    executor: E,
}

impl<L, E> ProgressLoggingResourceLister<L, E> {
    /// Wrap `delegate`.
    pub const fn new(delegate: L, executor: E) -> Self {
        Self { delegate, executor }
    }
}

impl<L: ResourceLister, E: OperationExecutor> ResourceLister
    for ProgressLoggingResourceLister<L, E>
{
    fn list(&self, parent: &ResourceLocation) -> Result<Option<Vec<String>>, ResourceAccessError> {
        let descriptor = describe(OperationKind::List, parent);
        self.executor.call(descriptor, |context| {
            let children = self.delegate.list(parent)?;
            let entries = children.as_ref().map_or(0, Vec::len);
            context.set_result(OperationResult::list(entries));
            Ok(children)
        })
    }
}
