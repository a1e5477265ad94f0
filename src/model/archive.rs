//! 3MF print package records

use super::slicer::{FileMetadata, SlicerIdentity, UNKNOWN};

/// One `<filament>` entry of the slice manifest
///
/// Values are kept exactly as written in the manifest. A missing attribute
/// is `None`; numeric interpretation is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilamentInfo {
    /// Filament slot identifier
    pub id: Option<String>,
    /// Material type (e.g. "PLA")
    pub material_type: Option<String>,
    /// Color, usually `#RRGGBB`
    pub color: Option<String>,
    /// Length used, in meters
    pub used_m: Option<String>,
    /// Mass used, in grams
    pub used_g: Option<String>,
}

/// Everything extracted from a sliced 3MF package
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveBundle {
    /// `printer_model_id` plate metadata
    pub printer_model_id: String,
    /// `support_used` plate metadata
    pub support_used: bool,
    /// Names of the objects placed on the plate, in manifest order
    pub file_names: Vec<String>,
    /// Filaments used by the plate, in manifest order
    pub filaments: Vec<FilamentInfo>,
    /// Raw bytes of the plate preview image
    pub plate_image: Option<Vec<u8>>,
    /// Identity read from the embedded G-code
    pub slicer_info: Option<SlicerIdentity>,
    /// File metadata read from the embedded G-code
    pub file_info: Option<FileMetadata>,
}

impl ArchiveBundle {
    /// Create a bundle with every field at its default
    pub fn new() -> Self {
        Self {
            printer_model_id: UNKNOWN.to_string(),
            support_used: false,
            file_names: Vec::new(),
            filaments: Vec::new(),
            plate_image: None,
            slicer_info: None,
            file_info: None,
        }
    }
}

impl Default for ArchiveBundle {
    fn default() -> Self {
        Self::new()
    }
}
