//! # Scopelog
//!
//! Context-scoped attribute propagation for structured logging.
//!
//! Scopelog lets a caller attach key/value attributes to a request-scoped
//! context and have every log record emitted under that context (or any
//! context derived from it) carry those attributes automatically, without
//! threading the values through every function signature:
//!
//! - **Derivation, never mutation**: attaching an attribute produces a new
//!   child context; the parent and every sibling keep their own view
//! - **Copy-on-write stores**: each derivation copies the accumulated map
//!   once, then freezes it, so concurrent reads and further derivations
//!   need no locking
//! - **Sink decoration**: the injecting sink wraps any other sink and
//!   composes into chains
//!
//! ## Quick Start
//!
//! ```rust
//! use scopelog::{Context, ContextAttrSink, JsonLinesSink, LogAttrs, Logger};
//!
//! let attrs = LogAttrs::new();
//! let logger = Logger::new(ContextAttrSink::new(attrs, JsonLinesSink::stderr()));
//!
//! let cx = Context::background();
//! let cx = attrs.with_value(&cx, "request_id", "000");
//! let cx = attrs.with_value(&cx, "user_id", 1);
//!
//! // The emitted line carries request_id and user_id even though neither
//! // was passed to the call site.
//! logger.info(&cx, "Hello, world!")?;
//! # Ok::<(), scopelog::SinkError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod context;
pub mod enrich;
pub mod errors;
pub mod logger;
pub mod record;
pub mod sink;

pub use context::{AttrMap, Context, LogAttrs, Slot};
pub use enrich::ContextAttrSink;
pub use errors::SinkError;
pub use logger::Logger;
pub use record::{Level, LogRecord};
pub use sink::{CollectingSink, JsonLinesSink, LogSink, NoOpSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{AttrMap, Context, LogAttrs, Slot};
    pub use crate::enrich::ContextAttrSink;
    pub use crate::errors::SinkError;
    pub use crate::logger::Logger;
    pub use crate::record::{Level, LogRecord};
    pub use crate::sink::{CollectingSink, JsonLinesSink, LogSink, NoOpSink};
}
