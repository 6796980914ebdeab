//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the transport, the instrumentation
//! wrappers, the operation executor and the progress display are wired
//! together. Command handlers receive the composed [`CliContext`].

use std::sync::Arc;
use std::time::Duration;

use rescope_core::ProgressReporterFactory;
use rescope_transfer::{
    LoggingProgressReporterFactory, ProgressConfig, ProgressLogging,
    ProgressLoggingResourceAccessor, ProgressLoggingResourceLister,
    ProgressLoggingResourceUploader, TracingOperationExecutor,
};

use crate::parser::Cli;
use crate::presentation::TerminalProgressReporterFactory;
use crate::transport::FileResourceAccessor;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CliConfig {
    /// Minimum time between two progress updates.
    pub progress_interval: Duration,
    /// Log progress through tracing instead of drawing spinners.
    pub plain_progress: bool,
}

impl CliConfig {
    /// Build the configuration from parsed arguments.
    pub const fn from_cli(cli: &Cli) -> Self {
        Self {
            progress_interval: Duration::from_millis(cli.progress_interval_ms),
            plain_progress: cli.plain_progress,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            progress_interval: rescope_transfer::DEFAULT_PROGRESS_INTERVAL,
            plain_progress: false,
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
///
/// Plain progress is logged at `info` by the transfer crate, so its target
/// stays enabled whenever progress goes through the log.
pub fn log_directives(verbose: bool, plain_progress: bool) -> String {
    match (verbose, plain_progress) {
        (true, _) => "debug".to_string(),
        (false, true) => "warn,rescope_transfer::progress=info".to_string(),
        (false, false) => "warn".to_string(),
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    accessor: ProgressLoggingResourceAccessor<FileResourceAccessor, TracingOperationExecutor>,
    uploader: ProgressLoggingResourceUploader<FileResourceAccessor, TracingOperationExecutor>,
    lister: ProgressLoggingResourceLister<FileResourceAccessor, TracingOperationExecutor>,
}

impl CliContext {
    /// Instrumented content and metadata access.
    pub const fn accessor(
        &self,
    ) -> &ProgressLoggingResourceAccessor<FileResourceAccessor, TracingOperationExecutor> {
        &self.accessor
    }

    /// Instrumented uploads.
    pub const fn uploader(
        &self,
    ) -> &ProgressLoggingResourceUploader<FileResourceAccessor, TracingOperationExecutor> {
        &self.uploader
    }

    /// Instrumented listings.
    pub const fn lister(
        &self,
    ) -> &ProgressLoggingResourceLister<FileResourceAccessor, TracingOperationExecutor> {
        &self.lister
    }
}

/// Compose the CLI context.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let factory: Arc<dyn ProgressReporterFactory> = if config.plain_progress {
        Arc::new(LoggingProgressReporterFactory::new())
    } else {
        Arc::new(TerminalProgressReporterFactory::new())
    };
    let progress = ProgressLogging::with_config(
        factory,
        ProgressConfig::default().with_min_interval(config.progress_interval),
    );
    let transport = FileResourceAccessor::new();
    let executor = TracingOperationExecutor::new();
    tracing::debug!(?config, "CLI context composed");

    CliContext {
        accessor: ProgressLoggingResourceAccessor::new(transport, progress.clone(), executor),
        uploader: ProgressLoggingResourceUploader::new(transport, progress, executor),
        lister: ProgressLoggingResourceLister::new(transport, executor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directives() {
        assert_eq!(log_directives(false, false), "warn");
        assert_eq!(log_directives(false, true), "warn,rescope_transfer::progress=info");
        assert_eq!(log_directives(true, true), "debug");
    }
}
