//! Operation executor backed by `tracing` spans.
//!
//! Every unit of work runs on the calling thread inside an `operation` span,
//! so nested calls nest spans and log consumers see the whole tree. The
//! descriptor details are logged as JSON when the work starts; the result
//! (or the failure) is logged when it finishes.

use std::time::Instant;

use rescope_core::{OperationContext, OperationDescriptor, OperationExecutor, ResourceAccessError};

/// Runs operations inline and records them through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOperationExecutor;

impl TracingOperationExecutor {
    /// Create a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl OperationExecutor for TracingOperationExecutor {
    fn call<T, F>(&self, descriptor: OperationDescriptor, work: F) -> Result<T, ResourceAccessError>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, ResourceAccessError>,
    {
        let mut context = OperationContext::new();
        let span = tracing::info_span!(
            "operation",
            id = %context.id(),
            name = descriptor.display_name(),
            progress = descriptor.progress_display_name(),
        );
        let _entered = span.enter();

        let details = serde_json::to_string(descriptor.details()).unwrap_or_default();
        tracing::debug!(details = %details, "Operation started");

        let started = Instant::now();
        let outcome = work(&mut context);
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &outcome {
            Ok(_) => {
                let result = context
                    .result()
                    .and_then(|r| serde_json::to_string(r).ok())
                    .unwrap_or_else(|| "none".to_string());
                tracing::info!(elapsed_ms, result = %result, "Operation finished");
            }
            Err(e) => tracing::warn!(elapsed_ms, error = %e, "Operation failed"),
        }
        outcome
    }
}
