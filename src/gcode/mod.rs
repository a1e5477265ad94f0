//! Metadata extraction from sliced G-code
//!
//! The entry points never fail on file content: malformed values are
//! reported to the configured sink and the affected fields keep their
//! defaults.

mod fields;
mod scanner;

pub use fields::{parse_additional_line, parse_config_line, parse_header_line};
pub use scanner::{BlockState, LineScanner};

use crate::error::Result;
use crate::model::{FileMetadata, ParserConfig, SlicerIdentity};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::ControlFlow;
use std::path::Path;

/// Extract metadata from G-code read from `reader`
///
/// Lines are decoded lossily, so stray non UTF-8 bytes never stop the scan.
/// Reading ends at the executable block; an I/O error mid-stream is
/// reported and the metadata gathered so far is returned.
///
/// # Example
///
/// ```
/// use slicemeta::{ParserConfig, parse_gcode};
///
/// let gcode = "; HEADER_BLOCK_START\n\
///              ; generated by OrcaFlashForge 1.2.3\n\
///              ; HEADER_BLOCK_END\n\
///              ; filament used [g] = 12.5\n";
///
/// let (slicer, meta) = parse_gcode(gcode.as_bytes(), &ParserConfig::default());
/// assert_eq!(slicer.version, "1.2.3");
/// assert_eq!(meta.filament_used_g, 12.5);
/// ```
pub fn parse_gcode<R: Read>(reader: R, config: &ParserConfig) -> (SlicerIdentity, FileMetadata) {
    let mut reader = BufReader::new(reader);
    let mut scanner = LineScanner::new(config);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if scanner.feed(&line).is_break() {
                    break;
                }
            }
            Err(e) => {
                config.report(format!("Error reading G-code: {}", e));
                break;
            }
        }
    }

    scanner.finish()
}

/// Extract metadata from G-code that is already split into lines
pub fn parse_gcode_lines<I, S>(lines: I, config: &ParserConfig) -> (SlicerIdentity, FileMetadata)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = LineScanner::new(config);
    for line in lines {
        if let ControlFlow::Break(()) = scanner.feed(line.as_ref()) {
            break;
        }
    }
    scanner.finish()
}

/// Extract metadata from the G-code file at `path`
///
/// Fails only if the file cannot be opened.
pub fn parse_gcode_file<P: AsRef<Path>>(
    path: P,
    config: &ParserConfig,
) -> Result<(SlicerIdentity, FileMetadata)> {
    let file = File::open(path)?;
    Ok(parse_gcode(file, config))
}
