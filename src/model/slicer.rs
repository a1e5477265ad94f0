//! Slicer identity and instruction-file metadata records

use std::fmt;

/// Default value for textual fields that were never found in the file
pub const UNKNOWN: &str = "Unknown";

/// Literal stored as the ETA when the time formatter rejects its input
pub const ETA_ERROR: &str = "Error";

/// Slicing software recognised from a `generated by` header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlicerType {
    /// Orca-Flashforge (FlashForge's OrcaSlicer fork)
    OrcaFlashForge,
    /// Upstream OrcaSlicer
    OrcaSlicer,
    /// Bambu Studio
    BambuStudio,
    /// PrusaSlicer
    PrusaSlicer,
    /// Not recognised
    #[default]
    Unknown,
}

impl SlicerType {
    /// Detect the slicer from the software name of a `generated by` line
    ///
    /// Matching ignores case and any non-alphanumeric characters, so
    /// `Orca-Flashforge` and `OrcaFlashForge` are the same slicer.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "orcaflashforge" => SlicerType::OrcaFlashForge,
            "orcaslicer" => SlicerType::OrcaSlicer,
            "bambustudio" => SlicerType::BambuStudio,
            "prusaslicer" => SlicerType::PrusaSlicer,
            _ => SlicerType::Unknown,
        }
    }

    /// Get a human-readable name for this slicer
    pub fn name(&self) -> &'static str {
        match self {
            SlicerType::OrcaFlashForge => "Orca-Flashforge",
            SlicerType::OrcaSlicer => "OrcaSlicer",
            SlicerType::BambuStudio => "BambuStudio",
            SlicerType::PrusaSlicer => "PrusaSlicer",
            SlicerType::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for SlicerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which software produced a file, and its estimated print duration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlicerIdentity {
    /// Detected slicer
    pub slicer_type: SlicerType,
    /// Software name as written in the file (empty when not recognised)
    pub software: String,
    /// Software version as written in the file (empty when not recognised)
    pub version: String,
    /// Generation timestamp text following ` on `, when present
    pub generated_at: Option<String>,
    /// Full `generated by ...` text, recorded even when not recognised
    pub generated_by: Option<String>,
    /// Duration text the ETA was derived from
    pub eta_raw: Option<String>,
    /// Formatted ETA, or `"Error"` when the duration could not be read
    pub eta: Option<String>,
}

impl SlicerIdentity {
    /// Create an identity with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an identity from the text of a `generated by` header line
    ///
    /// Accepts `generated by <name> <version>[ on <date> at <time>]`. When
    /// the name is not a known slicer, the software, version and timestamp
    /// stay at their defaults and only the raw text is kept.
    ///
    /// # Example
    ///
    /// ```
    /// use slicemeta::{SlicerIdentity, SlicerType};
    ///
    /// let id = SlicerIdentity::from_generated_by(
    ///     "generated by Orca-Flashforge 1.3.0 on 2024-03-01 at 10:12:13",
    /// );
    /// assert_eq!(id.slicer_type, SlicerType::OrcaFlashForge);
    /// assert_eq!(id.version, "1.3.0");
    /// assert_eq!(id.generated_at.as_deref(), Some("2024-03-01 at 10:12:13"));
    /// ```
    pub fn from_generated_by(text: &str) -> Self {
        let text = text.trim();
        let mut identity = SlicerIdentity {
            generated_by: Some(text.to_string()),
            ..Self::default()
        };

        let rest = text.strip_prefix("generated by").unwrap_or(text).trim();
        let (ident, generated_at) = match rest.split_once(" on ") {
            Some((ident, at)) => (ident.trim(), Some(at.trim())),
            None => (rest, None),
        };

        let mut tokens = ident.split_whitespace();
        let Some(name) = tokens.next() else {
            return identity;
        };

        let slicer_type = SlicerType::from_name(name);
        if slicer_type == SlicerType::Unknown {
            return identity;
        }

        identity.slicer_type = slicer_type;
        identity.software = name.to_string();
        identity.version = tokens.next().unwrap_or_default().to_string();
        identity.generated_at = generated_at
            .filter(|at| !at.is_empty())
            .map(str::to_string);
        identity
    }

    /// Whether the `generated by` line named a known slicer
    pub fn is_recognized(&self) -> bool {
        self.slicer_type != SlicerType::Unknown
    }
}

/// Decoded image embedded in (or shipped next to) a sliced file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Raw image bytes as decoded from base64
    pub data: Vec<u8>,
    /// Image container format reported by the image decoder (e.g. "png")
    pub format: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Physical output of a print job, as described by the instruction file
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    /// Embedded preview image, absent if missing or undecodable
    pub thumbnail: Option<Thumbnail>,
    /// Filament length consumed, in millimeters
    pub filament_used_mm: f64,
    /// Filament mass consumed, in grams
    pub filament_used_g: f64,
    /// Filament material name
    pub filament_type: String,
    /// Printer model name
    pub printer_model: String,
}

impl FileMetadata {
    /// Create metadata with every field at its default
    pub fn new() -> Self {
        Self {
            thumbnail: None,
            filament_used_mm: 0.0,
            filament_used_g: 0.0,
            filament_type: UNKNOWN.to_string(),
            printer_model: UNKNOWN.to_string(),
        }
    }

    /// Reset filament type and printer model together
    pub(crate) fn reset_material_and_printer(&mut self) {
        self.filament_type = UNKNOWN.to_string();
        self.printer_model = UNKNOWN.to_string();
    }
}

impl Default for FileMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slicer_type_detection() {
        assert_eq!(SlicerType::from_name("OrcaFlashForge"), SlicerType::OrcaFlashForge);
        assert_eq!(SlicerType::from_name("Orca-Flashforge"), SlicerType::OrcaFlashForge);
        assert_eq!(SlicerType::from_name("OrcaSlicer"), SlicerType::OrcaSlicer);
        assert_eq!(SlicerType::from_name("BambuStudio"), SlicerType::BambuStudio);
        assert_eq!(SlicerType::from_name("PrusaSlicer"), SlicerType::PrusaSlicer);
        assert_eq!(SlicerType::from_name("Cura_SteamEngine"), SlicerType::Unknown);
    }

    #[test]
    fn test_from_generated_by_without_timestamp() {
        let id = SlicerIdentity::from_generated_by("generated by OrcaFlashForge 1.2.3");
        assert!(id.is_recognized());
        assert_eq!(id.software, "OrcaFlashForge");
        assert_eq!(id.version, "1.2.3");
        assert_eq!(id.generated_at, None);
        assert_eq!(id.eta, None);
    }

    #[test]
    fn test_from_generated_by_unknown_keeps_defaults() {
        let id = SlicerIdentity::from_generated_by("generated by SomethingElse 9.9 on today");
        assert!(!id.is_recognized());
        assert_eq!(id.software, "");
        assert_eq!(id.version, "");
        assert_eq!(id.generated_at, None);
        assert_eq!(
            id.generated_by.as_deref(),
            Some("generated by SomethingElse 9.9 on today")
        );
    }

    #[test]
    fn test_from_generated_by_missing_version() {
        let id = SlicerIdentity::from_generated_by("generated by OrcaSlicer");
        assert_eq!(id.slicer_type, SlicerType::OrcaSlicer);
        assert_eq!(id.version, "");
    }

    #[test]
    fn test_from_generated_by_empty() {
        let id = SlicerIdentity::from_generated_by("generated by");
        assert_eq!(id.slicer_type, SlicerType::Unknown);
    }

    #[test]
    fn test_file_metadata_defaults() {
        let meta = FileMetadata::default();
        assert!(meta.thumbnail.is_none());
        assert_eq!(meta.filament_used_mm, 0.0);
        assert_eq!(meta.filament_used_g, 0.0);
        assert_eq!(meta.filament_type, "Unknown");
        assert_eq!(meta.printer_model, "Unknown");
    }
}
