//! Diagnostic reporting for non-fatal anomalies
//!
//! Extraction never aborts on bad input. Missing archive entries, malformed
//! XML, unparsable numbers and broken thumbnails are reported to a
//! [`DiagnosticSink`] carried by the [`ParserConfig`](crate::ParserConfig),
//! and the affected field keeps its previous value.
//!
//! # Example
//!
//! ```
//! use slicemeta::diagnostics::CollectingSink;
//! use slicemeta::{ParserConfig, parse_gcode_lines};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(CollectingSink::new());
//! let config = ParserConfig::new().with_sink(sink.clone());
//!
//! let lines = ["; THUMBNAIL_BLOCK_START", "; thumbnail begin 2x2 8", "; @@@@", "; thumbnail end"];
//! let (_, meta) = parse_gcode_lines(lines, &config);
//!
//! assert!(meta.thumbnail.is_none());
//! assert_eq!(sink.messages().len(), 1);
//! ```

use std::sync::Mutex;

/// Log target used by [`LogSink`]
pub const LOG_TARGET: &str = "slicemeta";

/// Receiver for human-readable diagnostics
///
/// Implementations must be shareable between threads so a single
/// configuration can drive several parses at once.
pub trait DiagnosticSink: Send + Sync {
    /// Report a single diagnostic message
    fn report(&self, message: &str);
}

/// Default sink forwarding diagnostics to the `log` facade at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{}", message);
    }
}

/// Sink that keeps every message in memory, in report order
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Create an empty collecting sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages reported so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any reported message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, message: &str) {
        let mut messages = match self.messages.lock() {
            Ok(messages) => messages,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push(message.to_string());
    }
}

/// Sink that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _message: &str) {}
}
