//! Per-block field parsers
//!
//! Each parser takes one trimmed line and the record it may update. The same
//! key text means different things inside and outside the named blocks, so
//! the scanner picks the parser from its current block. A value that fails
//! to convert leaves the field untouched and is reported as a diagnostic.

use crate::error::{Error, Result};
use crate::model::{ETA_ERROR, FileMetadata, ParserConfig, SlicerIdentity};

/// Header key introducing the slicer identity
const GENERATED_BY: &str = "generated by";

/// Header key used for the ETA before the estimate moved out of the header
const MODEL_PRINTING_TIME: &str = "model printing time";

/// Phrase marking the ETA line that follows the header block
const ESTIMATED_PRINTING_TIME: &str = "estimated printing time";

const FILAMENT_TYPE: &str = "filament_type";
const PRINTER_MODEL: &str = "printer_model";
const FILAMENT_USED_MM: &str = "filament used [mm]";
const FILAMENT_USED_G: &str = "filament used [g]";

/// Remove the comment marker and the spaces around it
pub(crate) fn strip_comment(line: &str) -> &str {
    line.trim_start_matches([';', ' '])
}

/// Split `key = value` on the first `=`, trimming both sides
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    line.split_once('=').map(|(k, v)| (k.trim(), v.trim()))
}

/// Parse a line inside `HEADER_BLOCK_START` / `HEADER_BLOCK_END`
pub fn parse_header_line(line: &str, identity: &mut SlicerIdentity, config: &ParserConfig) {
    let line = strip_comment(line);

    if line.starts_with(GENERATED_BY) {
        set_generated_by(line, identity, config);
        return;
    }

    if line.starts_with(MODEL_PRINTING_TIME) {
        set_eta(line, identity, config);
    }
}

/// Parse a line inside `CONFIG_BLOCK_START` / `CONFIG_BLOCK_END`
///
/// A line without `=` resets filament type and printer model together.
pub fn parse_config_line(line: &str, metadata: &mut FileMetadata) {
    let line = strip_comment(line);

    let Some((key, value)) = split_key_value(line) else {
        metadata.reset_material_and_printer();
        return;
    };

    match key {
        FILAMENT_TYPE => metadata.filament_type = value.to_string(),
        PRINTER_MODEL => metadata.printer_model = value.to_string(),
        _ => {}
    }
}

/// Parse a comment line outside every named block
///
/// Lines that are not comments are ignored.
pub fn parse_additional_line(
    line: &str,
    identity: &mut SlicerIdentity,
    metadata: &mut FileMetadata,
    config: &ParserConfig,
) {
    if !line.starts_with(';') {
        return;
    }
    let line = strip_comment(line);

    if line.contains(ESTIMATED_PRINTING_TIME) {
        set_eta(line, identity, config);
        return;
    }

    // Files without a header block carry the identity as a plain comment
    if line.starts_with(GENERATED_BY) {
        set_generated_by(line, identity, config);
        return;
    }

    let Some((key, value)) = split_key_value(line) else {
        return;
    };

    let target = match key {
        FILAMENT_USED_MM => &mut metadata.filament_used_mm,
        FILAMENT_USED_G => &mut metadata.filament_used_g,
        _ => return,
    };

    match parse_number(key, value) {
        Ok(parsed) => *target = parsed,
        Err(e) => config.report(e.to_string()),
    }
}

/// Parse a finite floating-point value
pub(crate) fn parse_number(field: &str, value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::parse_error_with_context(field, value, "floating-point number"))?;
    if !parsed.is_finite() {
        return Err(Error::parse_error_with_context(
            field,
            value,
            "finite floating-point number",
        ));
    }
    Ok(parsed)
}

/// Duration text of an ETA line: the part after the first `=` (or `:` when
/// there is none), up to the next `;`
pub(crate) fn extract_duration(line: &str) -> &str {
    let value = match line.split_once('=') {
        Some((_, value)) => value,
        None => line.split_once(':').map_or("", |(_, value)| value),
    };
    value.split(';').next().unwrap_or_default().trim()
}

/// Replace the identity from a `generated by` line, keeping any ETA already read
fn set_generated_by(line: &str, identity: &mut SlicerIdentity, config: &ParserConfig) {
    let parsed = SlicerIdentity::from_generated_by(line);
    if !parsed.is_recognized() {
        config.report(format!("Unrecognised slicer identity: '{}'", line));
    }
    *identity = SlicerIdentity {
        eta_raw: identity.eta_raw.take(),
        eta: identity.eta.take(),
        ..parsed
    };
}

/// Record the ETA found on `line`, storing `"Error"` if it cannot be formatted
fn set_eta(line: &str, identity: &mut SlicerIdentity, config: &ParserConfig) {
    let raw = extract_duration(line);
    let eta = match config.time_formatter().format(raw) {
        Ok(formatted) => formatted,
        Err(e) => {
            config.report(format!("Cannot parse print time '{}': {}", raw, e));
            ETA_ERROR.to_string()
        }
    };
    identity.eta_raw = Some(raw.to_string());
    identity.eta = Some(eta);
}
