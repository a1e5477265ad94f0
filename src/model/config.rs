//! Parser configuration

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::thumbnail::{ImageDecoder, RasterDecoder};
use crate::time::{ClockTimeFormatter, TimeFormatter};

/// Plate read from a 3MF package when none is configured
pub const DEFAULT_PLATE: u32 = 1;

/// Configuration for metadata extraction
///
/// Carries the collaborators the parsers call out to: where diagnostics go,
/// how print times are rendered, and how embedded images are checked. The
/// collaborators are shared behind `Arc`, so a configuration is cheap to
/// clone and can drive several parses on different threads.
///
/// # Example
///
/// ```
/// use slicemeta::ParserConfig;
/// use slicemeta::diagnostics::CollectingSink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(CollectingSink::new());
/// let config = ParserConfig::new()
///     .with_sink(sink.clone())
///     .with_plate(2);
///
/// assert_eq!(config.plate(), 2);
/// ```
#[derive(Clone)]
pub struct ParserConfig {
    sink: Arc<dyn DiagnosticSink>,
    time_formatter: Arc<dyn TimeFormatter>,
    image_decoder: Arc<dyn ImageDecoder>,
    plate: u32,
}

impl ParserConfig {
    /// Create a configuration using the default collaborators
    pub fn new() -> Self {
        Self {
            sink: Arc::new(LogSink),
            time_formatter: Arc::new(ClockTimeFormatter),
            image_decoder: Arc::new(RasterDecoder),
            plate: DEFAULT_PLATE,
        }
    }

    /// Send diagnostics to `sink` instead of the `log` facade
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Render print times with `formatter`
    pub fn with_time_formatter(mut self, formatter: Arc<dyn TimeFormatter>) -> Self {
        self.time_formatter = formatter;
        self
    }

    /// Check embedded images with `decoder`
    pub fn with_image_decoder(mut self, decoder: Arc<dyn ImageDecoder>) -> Self {
        self.image_decoder = decoder;
        self
    }

    /// Read plate `plate` of a 3MF package (1-based)
    pub fn with_plate(mut self, plate: u32) -> Self {
        self.plate = plate;
        self
    }

    /// Diagnostic sink
    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Time formatter
    pub fn time_formatter(&self) -> &dyn TimeFormatter {
        self.time_formatter.as_ref()
    }

    /// Image decoder
    pub fn image_decoder(&self) -> &dyn ImageDecoder {
        self.image_decoder.as_ref()
    }

    /// Selected plate number
    pub fn plate(&self) -> u32 {
        self.plate
    }

    pub(crate) fn report(&self, message: impl AsRef<str>) {
        self.sink.report(message.as_ref());
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("plate", &self.plate)
            .finish_non_exhaustive()
    }
}
