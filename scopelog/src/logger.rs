//! Front-end logger facade.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::errors::SinkError;
use crate::record::{Level, LogRecord};
use crate::sink::LogSink;

/// A thin front end that stamps records and hands them to a sink chain.
///
/// The logger applies no filtering or formatting of its own; everything past
/// record construction belongs to the sink chain. Cloning shares the chain.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Creates a logger emitting into `sink`.
    pub fn new(sink: impl LogSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Emits one record at `level` under `cx`.
    ///
    /// # Errors
    ///
    /// Returns the sink chain's failure, if any, unchanged.
    pub fn log(
        &self,
        cx: &Context,
        level: Level,
        message: impl Into<String>,
    ) -> Result<(), SinkError> {
        self.sink.handle(cx, LogRecord::new(level, message))
    }

    /// Emits a debug record under `cx`.
    pub fn debug(&self, cx: &Context, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(cx, Level::Debug, message)
    }

    /// Emits an info record under `cx`.
    pub fn info(&self, cx: &Context, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(cx, Level::Info, message)
    }

    /// Emits a warn record under `cx`.
    pub fn warn(&self, cx: &Context, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(cx, Level::Warn, message)
    }

    /// Emits an error record under `cx`.
    pub fn error(&self, cx: &Context, message: impl Into<String>) -> Result<(), SinkError> {
        self.log(cx, Level::Error, message)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}
