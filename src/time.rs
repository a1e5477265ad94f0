//! Print time formatting

use crate::error::{Error, Result};
use chrono::NaiveTime;

/// Renders a `HH:MM:SS` time string for display
pub trait TimeFormatter: Send + Sync {
    /// Format `raw`, failing with [`Error::InvalidTime`] if it is not `HH:MM:SS`
    fn format(&self, raw: &str) -> Result<String>;
}

/// Default formatter: reads a 24-hour `HH:MM:SS` value and renders it as a
/// 12-hour clock time such as `1:05 PM`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTimeFormatter;

impl TimeFormatter for ClockTimeFormatter {
    fn format(&self, raw: &str) -> Result<String> {
        let time = NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S")
            .map_err(|e| Error::InvalidTime(format!("'{}': {}", raw, e)))?;
        Ok(time.format("%-I:%M %p").to_string())
    }
}
