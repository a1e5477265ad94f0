//! Error types for slicer metadata extraction
//!
//! The public entry points never fail on malformed content: every error
//! produced while reading a field, an archive entry or a thumbnail is
//! absorbed where it is detected and reported through the configured
//! [`DiagnosticSink`](crate::diagnostics::DiagnosticSink). These types carry
//! those failures between the internal helpers, and surface directly only
//! from the file-path convenience functions when a file cannot be opened.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and archive errors
//! - **E2xxx**: XML parsing and structure errors
//! - **E3xxx**: Field value errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading file
//! - `E1002`: ZIP archive format error
//! - `E1003`: Missing entry in archive
//! - `E2001`: XML parsing error
//! - `E2002`: XML attribute error
//! - `E2003`: Invalid XML structure
//! - `E2004`: Invalid package format
//! - `E3002`: Numeric or boolean parse error
//! - `E3003`: Invalid time string
//! - `E3004`: Invalid base64 payload
//! - `E3005`: Invalid image data

use std::io;
use thiserror::Error;

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting slicer metadata
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading the file
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    /// - Truncated stream
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - File is not a 3MF (ZIP) package
    /// - Unsupported compression method
    /// - Truncated archive
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Named entry is not present in the archive
    ///
    /// **Error Code**: E1003
    #[error("[E1003] Missing entry: {0}")]
    MissingFile(String),

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Malformed XML syntax
    /// - Invalid character encoding
    /// - Unclosed tags
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid XML structure
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Missing `<config>` root or `<plate>` element in the manifest
    /// - Non UTF-8 element or attribute names
    #[error("[E2003] Invalid XML structure: {0}")]
    InvalidXml(String),

    /// Invalid package format
    ///
    /// **Error Code**: E2004
    #[error("[E2004] Invalid format: {0}")]
    InvalidFormat(String),

    /// Parse error for numeric or boolean values
    ///
    /// **Error Code**: E3002
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    /// - Booleans must be `true` or `false`
    #[error("[E3002] Parse error: {0}")]
    ParseError(String),

    /// Time string did not match the expected `HH:MM:SS` form
    ///
    /// **Error Code**: E3003
    #[error("[E3003] Invalid time: {0}")]
    InvalidTime(String),

    /// Embedded thumbnail text is not valid base64
    ///
    /// **Error Code**: E3004
    #[error("[E3004] Invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not a readable image
    ///
    /// **Error Code**: E3005
    #[error("[E3005] Invalid image data: {0}")]
    Image(#[from] image::ImageError),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl Error {
    /// Create an InvalidXml error with element context
    ///
    /// # Arguments
    /// * `element` - The XML element name where the error occurred
    /// * `message` - Description of the error
    pub fn invalid_xml_element(element: &str, message: &str) -> Self {
        Error::InvalidXml(format!("Element '<{}>': {}", element, message))
    }

    /// Create a ParseError with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "filament used [g]")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "floating-point number")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::ParseError(format!(
            "Failed to parse '{}': expected {}, got '{}'",
            field_name, expected_type, value
        ))
    }
}
