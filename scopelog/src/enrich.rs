//! Attribute-injecting sink decorator.

use crate::context::{Context, LogAttrs};
use crate::errors::SinkError;
use crate::record::LogRecord;
use crate::sink::LogSink;

/// Decorates a sink so that every record picks up the attributes reachable
/// from the context it is emitted under.
///
/// The decorator holds the [`LogAttrs`] token it was constructed with and
/// exactly one wrapped sink, fixed for its lifetime. It implements
/// [`LogSink`] itself, so further decorators can wrap it in turn. It carries
/// no per-call state and performs no I/O of its own; the only failure it can
/// return is the wrapped sink's.
#[derive(Debug)]
pub struct ContextAttrSink<S> {
    attrs: LogAttrs,
    inner: S,
}

impl<S: LogSink> ContextAttrSink<S> {
    /// Wraps `inner`, reading attribute maps bound under `attrs`.
    #[must_use]
    pub fn new(attrs: LogAttrs, inner: S) -> Self {
        Self { attrs, inner }
    }

    /// Returns a reference to the wrapped sink.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: LogSink> LogSink for ContextAttrSink<S> {
    /// Appends every attribute reachable from `cx` to `record`, in key
    /// order, then delegates to the wrapped sink.
    ///
    /// A context with no attribute map attached passes the record through
    /// untouched. The context and its store are only read, never modified.
    fn handle(&self, cx: &Context, mut record: LogRecord) -> Result<(), SinkError> {
        if let Some(map) = self.attrs.attached(cx) {
            for (key, value) in map.iter() {
                record.add_attr(key, value.clone());
            }
        }
        self.inner.handle(cx, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use crate::sink::{CollectingSink, JsonLinesSink};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;
    use std::sync::Arc;

    /// A sink that always fails, for error-propagation tests.
    struct FailingSink;

    impl LogSink for FailingSink {
        fn handle(&self, _cx: &Context, _record: LogRecord) -> Result<(), SinkError> {
            Err(SinkError::Sink("boom".to_string()))
        }
    }

    /// An in-memory writer that can be read back after the sink consumed it.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_pass_through_without_store() {
        let attrs = LogAttrs::new();
        let inner = Arc::new(CollectingSink::new());
        let sink = ContextAttrSink::new(attrs, Arc::clone(&inner));

        let record = LogRecord::new(Level::Info, "plain");
        let expected = record.clone();
        sink.handle(&Context::background(), record).unwrap();

        assert_eq!(inner.records(), vec![expected]);
    }

    #[test]
    fn test_injects_all_reachable_attrs() {
        let attrs = LogAttrs::new();
        let inner = Arc::new(CollectingSink::new());
        let sink = ContextAttrSink::new(attrs, Arc::clone(&inner));

        let cx = Context::background();
        let cx = attrs.with_value(&cx, "request_id", "000");
        let cx = attrs.with_value(&cx, "user_id", 1);

        sink.handle(&cx, LogRecord::new(Level::Info, "deep call"))
            .unwrap();

        let records = inner.records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].attrs(),
            &[
                ("request_id".to_string(), json!("000")),
                ("user_id".to_string(), json!(1)),
            ]
        );
    }

    #[test]
    fn test_injection_order_is_sorted_by_key() {
        let attrs = LogAttrs::new();
        let inner = Arc::new(CollectingSink::new());
        let sink = ContextAttrSink::new(attrs, Arc::clone(&inner));

        let cx = Context::background();
        let cx = attrs.with_value(&cx, "zeta", 1);
        let cx = attrs.with_value(&cx, "alpha", 2);
        let cx = attrs.with_value(&cx, "mid", 3);

        sink.handle(&cx, LogRecord::new(Level::Info, "ordered"))
            .unwrap();

        let records = inner.records();
        let keys: Vec<&str> = records[0].attrs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_injected_attrs_follow_existing_ones() {
        let attrs = LogAttrs::new();
        let inner = Arc::new(CollectingSink::new());
        let sink = ContextAttrSink::new(attrs, Arc::clone(&inner));

        let cx = attrs.with_value(&Context::background(), "request_id", "000");
        let mut record = LogRecord::new(Level::Info, "mixed");
        record.add_attr("site", json!("call"));

        sink.handle(&cx, record).unwrap();

        let records = inner.records();
        assert_eq!(
            records[0].attrs(),
            &[
                ("site".to_string(), json!("call")),
                ("request_id".to_string(), json!("000")),
            ]
        );
    }

    #[test]
    fn test_inner_error_returned_verbatim() {
        let attrs = LogAttrs::new();
        let sink = ContextAttrSink::new(attrs, FailingSink);

        let cx = attrs.with_value(&Context::background(), "request_id", "000");
        let result = sink.handle(&cx, LogRecord::new(Level::Error, "doomed"));

        match result {
            Err(SinkError::Sink(message)) => assert_eq!(message, "boom"),
            other => panic!("expected sink error, got {other:?}"),
        }
    }

    #[test]
    fn test_decorators_compose() {
        let request_attrs = LogAttrs::new();
        let trace_attrs = LogAttrs::new();
        let inner = Arc::new(CollectingSink::new());
        let sink = ContextAttrSink::new(
            trace_attrs,
            ContextAttrSink::new(request_attrs, Arc::clone(&inner)),
        );

        let cx = Context::background();
        let cx = request_attrs.with_value(&cx, "request_id", "000");
        let cx = trace_attrs.with_value(&cx, "trace_id", "fff");

        sink.handle(&cx, LogRecord::new(Level::Info, "both layers"))
            .unwrap();

        let records = inner.records();
        assert_eq!(
            records[0].attrs(),
            &[
                ("trace_id".to_string(), json!("fff")),
                ("request_id".to_string(), json!("000")),
            ]
        );
    }

    #[test]
    fn test_end_to_end_json_output() {
        #[derive(Serialize)]
        struct Payload {
            #[serde(rename = "Number")]
            number: i32,
            #[serde(rename = "String")]
            string: String,
        }

        let attrs = LogAttrs::new();
        let buf = SharedBuf::default();
        let sink = ContextAttrSink::new(attrs, JsonLinesSink::new(buf.clone()));

        let cx = Context::background();
        let cx = attrs.with_value(&cx, "number", 12);
        let cx = attrs.with_value(&cx, "string", "data");
        let payload = serde_json::to_value(Payload {
            number: 42,
            string: "struct_data".to_string(),
        })
        .unwrap();
        let cx = attrs.with_value(&cx, "struct", payload);

        sink.handle(&cx, LogRecord::new(Level::Info, "Hello, world!"))
            .unwrap();

        let output = String::from_utf8(buf.0.lock().clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();

        assert_eq!(parsed["msg"], json!("Hello, world!"));
        assert_eq!(parsed["level"], json!("info"));
        assert_eq!(parsed["number"], json!(12));
        assert_eq!(parsed["string"], json!("data"));
        assert_eq!(
            parsed["struct"],
            json!({"Number": 42, "String": "struct_data"})
        );
        assert!(parsed["time"].is_string());

        // time, level, msg plus exactly the three injected attributes.
        assert_eq!(parsed.as_object().unwrap().len(), 6);
    }
}
