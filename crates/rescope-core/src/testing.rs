//! Recording stubs for the resource ports.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests of downstream crates. Every stub writes to a shared
//! [`EventLog`], so a test can assert the relative order of operation,
//! progress and transport events.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use url::Url;

use crate::domain::{
    OperationDescriptor, OperationResult, ReadResult, ResourceLocation, ResourceMetaData,
    WriteResult,
};
use crate::error::ResourceAccessError;
use crate::ports::{
    ExternalResource, OperationContext, OperationExecutor, ProgressReporter,
    ProgressReporterFactory, ReadableContent, ResourceAccessor, ResourceLister, ResourceUploader,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Event Log
// ============================================================================

/// Something a stub observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An operation was submitted to the executor.
    OperationStarted {
        /// Descriptor display name.
        name: String,
    },
    /// An operation finished (successfully or not).
    OperationFinished {
        /// Descriptor display name.
        name: String,
        /// Result attached by the work, if any.
        result: Option<OperationResult>,
        /// Whether the work returned an error.
        failed: bool,
    },
    /// A progress reporter was started.
    ProgressStarted {
        /// Originating component.
        category: String,
        /// Progress header.
        header: String,
    },
    /// A progress message was reported.
    Progress {
        /// Progress header.
        header: String,
        /// Message text.
        message: String,
    },
    /// A progress reporter was completed.
    ProgressCompleted {
        /// Progress header.
        header: String,
    },
    /// A transport call reached the in-memory backend.
    Transport {
        /// Operation name (`with_content`, `meta_data`, `put`, ...).
        operation: &'static str,
    },
}

/// Shared, ordered record of events.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&self, event: Event) {
        lock(&self.events).push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<Event> {
        lock(&self.events).clone()
    }

    /// Number of events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        lock(&self.events).iter().filter(|e| predicate(e)).count()
    }

    /// Index of the first event matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&Event) -> bool) -> Option<usize> {
        lock(&self.events).iter().position(predicate)
    }

    /// Number of started progress reporters.
    pub fn progress_started(&self) -> usize {
        self.count(|e| matches!(e, Event::ProgressStarted { .. }))
    }

    /// Number of completed progress reporters.
    pub fn progress_completed(&self) -> usize {
        self.count(|e| matches!(e, Event::ProgressCompleted { .. }))
    }

    /// Every progress message, in order.
    pub fn progress_messages(&self) -> Vec<String> {
        lock(&self.events)
            .iter()
            .filter_map(|e| match e {
                Event::Progress { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Operation Executor
// ============================================================================

/// An operation observed by [`RecordingOperationExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedOperation {
    /// Descriptor the operation was submitted with.
    pub descriptor: OperationDescriptor,
    /// Result attached by the work.
    pub result: Option<OperationResult>,
    /// Error returned by the work.
    pub failure: Option<ResourceAccessError>,
}

/// Executor that runs work inline and records each operation.
#[derive(Debug, Clone, Default)]
pub struct RecordingOperationExecutor {
    log: EventLog,
    operations: Arc<Mutex<Vec<RecordedOperation>>>,
}

impl RecordingOperationExecutor {
    /// Create an executor writing to `log`.
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            operations: Arc::default(),
        }
    }

    /// Every finished operation, in completion order.
    pub fn operations(&self) -> Vec<RecordedOperation> {
        lock(&self.operations).clone()
    }

    /// The single finished operation; panics unless exactly one ran.
    pub fn single(&self) -> RecordedOperation {
        let operations = self.operations();
        assert_eq!(operations.len(), 1, "expected exactly one operation");
        operations.into_iter().next().unwrap_or_else(|| unreachable!())
    }
}

impl OperationExecutor for RecordingOperationExecutor {
    fn call<T, F>(&self, descriptor: OperationDescriptor, work: F) -> Result<T, ResourceAccessError>
    where
        F: FnOnce(&mut OperationContext) -> Result<T, ResourceAccessError>,
    {
        let name = descriptor.display_name().to_string();
        self.log.push(Event::OperationStarted { name: name.clone() });

        let mut context = OperationContext::new();
        let outcome = work(&mut context);
        let result = context.into_result();

        lock(&self.operations).push(RecordedOperation {
            descriptor,
            result: result.clone(),
            failure: outcome.as_ref().err().cloned(),
        });
        self.log.push(Event::OperationFinished {
            name,
            result,
            failed: outcome.is_err(),
        });
        outcome
    }
}

// ============================================================================
// Progress Reporter
// ============================================================================

/// Progress factory whose reporters write to an [`EventLog`].
#[derive(Debug, Clone, Default)]
pub struct RecordingProgressReporterFactory {
    log: EventLog,
}

impl RecordingProgressReporterFactory {
    /// Create a factory writing to `log`.
    pub const fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl ProgressReporterFactory for RecordingProgressReporterFactory {
    fn start(&self, category: &str, header: &str) -> Box<dyn ProgressReporter> {
        self.log.push(Event::ProgressStarted {
            category: category.to_string(),
            header: header.to_string(),
        });
        Box::new(RecordingProgressReporter {
            header: header.to_string(),
            log: self.log.clone(),
        })
    }
}

struct RecordingProgressReporter {
    header: String,
    log: EventLog,
}

impl ProgressReporter for RecordingProgressReporter {
    fn progress(&mut self, message: &str) {
        self.log.push(Event::Progress {
            header: self.header.clone(),
            message: message.to_string(),
        });
    }

    fn completed(&mut self) {
        self.log.push(Event::ProgressCompleted {
            header: self.header.clone(),
        });
    }
}

// ============================================================================
// In-memory Transport
// ============================================================================

#[derive(Debug, Clone)]
struct StoredResource {
    content: Vec<u8>,
    meta: ResourceMetaData,
}

/// Transport backed by a map of URI to bytes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceAccessor {
    log: EventLog,
    resources: Arc<Mutex<BTreeMap<Url, StoredResource>>>,
    failure: Option<ResourceAccessError>,
}

impl InMemoryResourceAccessor {
    /// Create an empty transport writing to `log`.
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Store `content`, advertising its exact length.
    #[must_use]
    pub fn with_resource(self, location: &ResourceLocation, content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();
        let meta = ResourceMetaData::new(location.uri().clone())
            .with_content_length(content.len() as u64);
        self.with_resource_meta(content, meta)
    }

    /// Store `content` with caller-chosen metadata.
    #[must_use]
    pub fn with_resource_meta(self, content: impl Into<Vec<u8>>, meta: ResourceMetaData) -> Self {
        lock(&self.resources).insert(
            meta.location.clone(),
            StoredResource {
                content: content.into(),
                meta,
            },
        );
        self
    }

    /// Make every call fail with `error`.
    #[must_use]
    pub fn failing_with(mut self, error: ResourceAccessError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Bytes currently stored for `location`.
    pub fn content(&self, location: &ResourceLocation) -> Option<Vec<u8>> {
        lock(&self.resources)
            .get(location.uri())
            .map(|r| r.content.clone())
    }

    fn enter(&self, operation: &'static str) -> Result<(), ResourceAccessError> {
        self.log.push(Event::Transport { operation });
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn lookup(&self, location: &ResourceLocation) -> Option<StoredResource> {
        lock(&self.resources).get(location.uri()).cloned()
    }
}

impl ResourceAccessor for InMemoryResourceAccessor {
    fn with_content<T, F>(
        &self,
        location: &ResourceLocation,
        _revalidate: bool,
        action: F,
    ) -> Result<Option<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        self.enter("with_content")?;
        let Some(resource) = self.lookup(location) else {
            return Ok(None);
        };
        let mut stream = Cursor::new(resource.content);
        action(&mut stream, &resource.meta).map(Some)
    }

    fn meta_data(
        &self,
        location: &ResourceLocation,
        _revalidate: bool,
    ) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        self.enter("meta_data")?;
        Ok(self.lookup(location).map(|r| r.meta))
    }
}

impl ResourceUploader for InMemoryResourceAccessor {
    fn upload(
        &self,
        content: &dyn ReadableContent,
        destination: &ResourceLocation,
    ) -> Result<(), ResourceAccessError> {
        self.enter("upload")?;
        let mut bytes = Vec::new();
        content.open()?.read_to_end(&mut bytes)?;
        let meta = ResourceMetaData::new(destination.uri().clone())
            .with_content_length(bytes.len() as u64);
        lock(&self.resources).insert(
            destination.uri().clone(),
            StoredResource {
                content: bytes,
                meta,
            },
        );
        Ok(())
    }
}

impl ResourceLister for InMemoryResourceAccessor {
    fn list(&self, parent: &ResourceLocation) -> Result<Option<Vec<String>>, ResourceAccessError> {
        self.enter("list")?;
        let prefix = parent.uri().as_str().trim_end_matches('/').to_string() + "/";
        let children: Vec<String> = lock(&self.resources)
            .keys()
            .filter_map(|uri| uri.as_str().strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
            .map(str::to_string)
            .collect();
        Ok((!children.is_empty()).then_some(children))
    }
}

// ============================================================================
// In-memory Resource Handle
// ============================================================================

/// A resource handle with canned content that records which operation ran.
#[derive(Debug, Clone)]
pub struct InMemoryResource {
    uri: Url,
    display_name: String,
    content: Option<Vec<u8>>,
    children: Option<Vec<String>>,
    failure: Option<ResourceAccessError>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    written: Arc<Mutex<Option<Vec<u8>>>>,
}

impl InMemoryResource {
    /// A handle for `location` with no content (the resource is absent).
    pub fn missing(location: &ResourceLocation) -> Self {
        Self {
            uri: location.uri().clone(),
            display_name: location.display_name().to_string(),
            content: None,
            children: None,
            failure: None,
            calls: Arc::default(),
            written: Arc::default(),
        }
    }

    /// A handle for `location` holding `content`.
    pub fn new(location: &ResourceLocation, content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::missing(location)
        }
    }

    /// Set the names returned by `list`.
    #[must_use]
    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = Some(children);
        self
    }

    /// Make every fallible call fail with `error`.
    #[must_use]
    pub fn failing_with(mut self, error: ResourceAccessError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Names of the operations invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }

    /// Bytes received by the last `put`.
    pub fn written(&self) -> Option<Vec<u8>> {
        lock(&self.written).clone()
    }

    fn enter(&self, operation: &'static str) -> Result<(), ResourceAccessError> {
        lock(&self.calls).push(operation);
        self.failure.clone().map_or(Ok(()), Err)
    }

    fn meta(&self) -> Option<ResourceMetaData> {
        self.content.as_ref().map(|c| {
            ResourceMetaData::new(self.uri.clone()).with_content_length(c.len() as u64)
        })
    }

    fn read<T>(
        &self,
        action: impl FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError> {
        let (Some(content), Some(meta)) = (self.content.as_ref(), self.meta()) else {
            return Ok(None);
        };
        let mut stream = Cursor::new(content.as_slice());
        let value = action(&mut stream, &meta)?;
        Ok(Some(ReadResult::new(stream.position(), value)))
    }

    fn not_found(&self) -> ResourceAccessError {
        ResourceAccessError::not_found(self.uri.as_str())
    }
}

impl ExternalResource for InMemoryResource {
    fn uri(&self) -> &Url {
        &self.uri
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn meta_data(&self) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        self.enter("meta_data")?;
        Ok(self.meta())
    }

    fn list(&self) -> Result<Option<Vec<String>>, ResourceAccessError> {
        self.enter("list")?;
        Ok(self.children.clone())
    }

    fn put(&self, source: &dyn ReadableContent) -> Result<WriteResult, ResourceAccessError> {
        self.enter("put")?;
        let mut bytes = Vec::new();
        source.open()?.read_to_end(&mut bytes)?;
        let written = bytes.len() as u64;
        *lock(&self.written) = Some(bytes);
        Ok(WriteResult::new(written))
    }

    fn write_to_if_present(
        &self,
        destination: &Path,
    ) -> Result<Option<ReadResult<()>>, ResourceAccessError> {
        self.enter("write_to_if_present")?;
        self.read(|stream, _| {
            let mut file = std::fs::File::create(destination)?;
            std::io::copy(stream, &mut file)?;
            Ok(())
        })
    }

    fn write_to(&self, destination: &Path) -> Result<ReadResult<()>, ResourceAccessError> {
        self.enter("write_to")?;
        self.read(|stream, _| {
            let mut file = std::fs::File::create(destination)?;
            std::io::copy(stream, &mut file)?;
            Ok(())
        })?
        .ok_or_else(|| self.not_found())
    }

    fn write_to_stream(
        &self,
        destination: &mut dyn Write,
    ) -> Result<ReadResult<()>, ResourceAccessError> {
        self.enter("write_to_stream")?;
        self.read(|stream, _| {
            std::io::copy(stream, destination)?;
            Ok(())
        })?
        .ok_or_else(|| self.not_found())
    }

    fn with_content<T, F>(&self, action: F) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        self.enter("with_content")?;
        self.read(|stream, _| action(stream))?
            .ok_or_else(|| self.not_found())
    }

    fn with_content_and_metadata<T, F>(
        &self,
        action: F,
    ) -> Result<ReadResult<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        self.enter("with_content_and_metadata")?;
        self.read(action)?.ok_or_else(|| self.not_found())
    }

    fn with_content_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read) -> Result<T, ResourceAccessError>,
    {
        self.enter("with_content_if_present")?;
        self.read(|stream, _| action(stream))
    }

    fn with_content_and_metadata_if_present<T, F>(
        &self,
        action: F,
    ) -> Result<Option<ReadResult<T>>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        self.enter("with_content_and_metadata_if_present")?;
        self.read(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperationDetails;

    fn location(uri: &str) -> ResourceLocation {
        ResourceLocation::parse(uri).unwrap()
    }

    #[test]
    fn test_accessor_returns_none_for_missing_resource() {
        let accessor = InMemoryResourceAccessor::new(EventLog::new());
        let result = accessor
            .with_content(&location("http://example/a.jar"), false, |_, _| Ok(()))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_accessor_lists_direct_children_only() {
        let accessor = InMemoryResourceAccessor::new(EventLog::new())
            .with_resource(&location("http://example/repo/a.jar"), b"a".to_vec())
            .with_resource(&location("http://example/repo/b.jar"), b"b".to_vec())
            .with_resource(&location("http://example/repo/sub/c.jar"), b"c".to_vec());

        let children = accessor.list(&location("http://example/repo")).unwrap();
        assert_eq!(children, Some(vec!["a.jar".to_string(), "b.jar".to_string()]));
        assert_eq!(accessor.list(&location("http://example/none")).unwrap(), None);
    }

    #[test]
    fn test_recording_executor_records_result_and_failure() {
        let log = EventLog::new();
        let executor = RecordingOperationExecutor::new(log.clone());
        let descriptor = OperationDescriptor::new(
            "Download a.jar",
            OperationDetails::Read {
                location: Url::parse("http://example/a.jar").unwrap(),
            },
        );

        executor
            .call(descriptor.clone(), |ctx| {
                ctx.set_result(OperationResult::read(3));
                Ok(())
            })
            .unwrap();
        let _ = executor.call::<(), _>(descriptor, |_| Err(ResourceAccessError::other("boom")));

        let operations = executor.operations();
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].result, Some(OperationResult::read(3)));
        assert_eq!(operations[1].result, None);
        assert_eq!(operations[1].failure, Some(ResourceAccessError::other("boom")));
        assert_eq!(
            log.count(|e| matches!(e, Event::OperationFinished { failed: true, .. })),
            1
        );
    }

    #[test]
    fn test_resource_reports_bytes_consumed() {
        let resource = InMemoryResource::new(&location("http://example/a.jar"), vec![0u8; 10]);
        let result = resource
            .with_content(|stream| {
                let mut buf = [0u8; 4];
                stream.read_exact(&mut buf)?;
                Ok(buf.len())
            })
            .unwrap();

        assert_eq!(result, ReadResult::new(4, 4));
        assert_eq!(resource.calls(), vec!["with_content"]);
    }
}
