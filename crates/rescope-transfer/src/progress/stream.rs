//! Byte-counting stream bound to a progress session.

use std::io::{self, Read};

use super::session::ProgressSession;

/// Counts the bytes a caller reads and reports them to a [`ProgressSession`].
///
/// Only successful, non-empty reads are counted. End of stream and errors
/// pass through untouched. Dropping the stream drops the wrapped source but
/// leaves the session open; completing it is the owning scope's job.
pub struct CountingProgressStream<'s, R> {
    inner: R,
    session: Option<&'s ProgressSession>,
    bytes_read: u64,
}

impl<'s, R: Read> CountingProgressStream<'s, R> {
    /// Wrap `inner`, reporting to `session`.
    pub const fn new(inner: R, session: &'s ProgressSession) -> Self {
        Self {
            inner,
            session: Some(session),
            bytes_read: 0,
        }
    }

    /// Wrap `inner`, counting bytes without reporting them anywhere.
    pub const fn counting(inner: R) -> Self {
        Self {
            inner,
            session: None,
            bytes_read: 0,
        }
    }

    /// Bytes read through this stream so far.
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Unwrap the source stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for CountingProgressStream<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            let n = n as u64;
            self.bytes_read += n;
            if let Some(session) = self.session {
                session.log_processed_bytes(n);
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use rescope_core::testing::{EventLog, RecordingProgressReporterFactory};
    use rescope_core::{OperationKind, ResourceLocation};

    use crate::progress::{ProgressConfig, ProgressLogging};

    fn session(log: &EventLog, total: Option<u64>) -> ProgressSession {
        ProgressLogging::with_config(
            Arc::new(RecordingProgressReporterFactory::new(log.clone())),
            ProgressConfig::unthrottled(),
        )
        .begin(
            &ResourceLocation::parse("http://example/a.jar").unwrap(),
            OperationKind::Download,
            "tests",
            total,
        )
    }

    /// Fails after handing out `ok_bytes`.
    struct Flaky {
        ok_bytes: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.ok_bytes == 0 {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            let n = self.ok_bytes.min(buf.len());
            self.ok_bytes -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_counts_partial_reads() {
        let log = EventLog::new();
        let session = session(&log, Some(1000));
        let mut stream = session.wrap(Cursor::new(vec![7u8; 1000]));

        let mut buf = [0u8; 200];
        stream.read_exact(&mut buf).unwrap();

        assert_eq!(stream.bytes_read(), 200);
        assert_eq!(session.processed_bytes(), 200);
    }

    #[test]
    fn test_end_of_stream_is_not_counted() {
        let log = EventLog::new();
        let session = session(&log, Some(3));
        let mut stream = session.wrap(Cursor::new(b"abc".to_vec()));

        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(stream.read(&mut [0u8; 8]).unwrap(), 0);

        assert_eq!(stream.bytes_read(), 3);
        // One message per non-empty read only.
        assert_eq!(log.progress_messages(), vec!["3 B/3 B downloaded (100%)".to_string()]);
    }

    #[test]
    fn test_read_failure_propagates_unchanged() {
        let log = EventLog::new();
        let session = session(&log, None);
        let mut stream = session.wrap(Flaky { ok_bytes: 5 });

        let mut buf = [0u8; 16];
        assert_eq!(stream.read(&mut buf).unwrap(), 5);
        let err = stream.read(&mut buf).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(stream.bytes_read(), 5);
    }

    #[test]
    fn test_dropping_stream_leaves_session_open() {
        let log = EventLog::new();
        let session = session(&log, None);
        drop(session.wrap(Cursor::new(Vec::new())));

        assert_eq!(log.progress_completed(), 0);
        session.completed();
        assert_eq!(log.progress_completed(), 1);
    }

    #[test]
    fn test_unbound_counter_reports_nothing() {
        let mut stream = CountingProgressStream::counting(Cursor::new(b"hello".to_vec()));
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();

        assert_eq!(out, b"hello");
        assert_eq!(stream.bytes_read(), 5);
    }

    #[test]
    fn test_bytes_read_available_before_close() {
        let log = EventLog::new();
        let session = session(&log, None);
        let mut stream = session.wrap(Cursor::new(b"hello".to_vec()));

        assert_eq!(stream.bytes_read(), 0);
        stream.read_exact(&mut [0u8; 2]).unwrap();
        assert_eq!(stream.bytes_read(), 2);
        assert_eq!(stream.into_inner().position(), 2);
    }
}
