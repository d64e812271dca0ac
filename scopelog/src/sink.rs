//! Log sink trait and built-in sinks.

use std::io::Write;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::context::Context;
use crate::errors::SinkError;
use crate::record::LogRecord;

/// Trait for sinks that consume structured log records.
///
/// Any component offering this capability can be wrapped by decorators such
/// as [`ContextAttrSink`](crate::ContextAttrSink), so sinks compose into
/// chains. Handling runs synchronously on the emitting thread.
pub trait LogSink: Send + Sync {
    /// Consumes one record, delivered with the context it was emitted under.
    ///
    /// # Errors
    ///
    /// Returns whatever failure the sink hits while encoding or writing the
    /// record; callers see it unchanged.
    fn handle(&self, cx: &Context, record: LogRecord) -> Result<(), SinkError>;
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn handle(&self, cx: &Context, record: LogRecord) -> Result<(), SinkError> {
        (**self).handle(cx, record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn handle(&self, cx: &Context, record: LogRecord) -> Result<(), SinkError> {
        (**self).handle(cx, record)
    }
}

/// A no-op sink that discards all records.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl LogSink for NoOpSink {
    fn handle(&self, _cx: &Context, _record: LogRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// A sink that writes each record as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Creates a sink writing to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesSink<std::io::Stderr> {
    /// Creates a sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl JsonLinesSink<std::io::Stdout> {
    /// Creates a sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> LogSink for JsonLinesSink<W> {
    fn handle(&self, _cx: &Context, record: LogRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(&record.to_json())?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")?;
        Ok(())
    }
}

/// A collecting sink for testing purposes.
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: RwLock<Vec<LogRecord>>,
}

impl CollectingSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected records.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.read().clone()
    }

    /// Returns the number of collected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns true if no records have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Clears all collected records.
    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl LogSink for CollectingSink {
    fn handle(&self, _cx: &Context, record: LogRecord) -> Result<(), SinkError> {
        self.records.write().push(record);
        Ok(())
    }
}
