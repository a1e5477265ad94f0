//! Metadata extraction from sliced 3MF packages
//!
//! Slicer-produced 3MF files are ZIP archives that, next to the model data,
//! carry per-plate slicing results under `Metadata/`:
//!
//! - `slice_info.config`: XML manifest with printer, support and filament usage
//! - `plate_<n>.png`: preview render of the plate
//! - `plate_<n>.gcode`: the sliced instruction file itself
//!
//! Each entry is looked up on its own. A missing or broken entry is reported
//! to the configured sink and leaves its part of the [`ArchiveBundle`] at
//! the defaults; it never stops the other lookups.

mod reader;
mod slice_info;

pub use reader::Package;

use crate::error::Result;
use crate::gcode;
use crate::model::{ArchiveBundle, FileMetadata, ParserConfig, SlicerIdentity};
use slice_info::{PlateInfo, parse_bool, parse_slice_info};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Slice manifest path within the package
pub const SLICE_INFO_PATH: &str = "Metadata/slice_info.config";

/// Path of the preview image for plate `plate`
pub fn plate_image_path(plate: u32) -> String {
    format!("Metadata/plate_{}.png", plate)
}

/// Path of the embedded G-code for plate `plate`
pub fn plate_gcode_path(plate: u32) -> String {
    format!("Metadata/plate_{}.gcode", plate)
}

/// Extract metadata from a 3MF package read from `reader`
///
/// Never fails: a reader that is not a ZIP archive yields a default bundle
/// and a diagnostic.
///
/// # Example
///
/// ```no_run
/// use slicemeta::{ParserConfig, parse_3mf};
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("benchy.gcode.3mf")?;
/// let bundle = parse_3mf(file, &ParserConfig::default());
/// println!("printer {} with {} filaments", bundle.printer_model_id, bundle.filaments.len());
/// # Ok(())
/// # }
/// ```
pub fn parse_3mf<R: Read + Seek>(reader: R, config: &ParserConfig) -> ArchiveBundle {
    let mut package = match Package::open(reader) {
        Ok(package) => package,
        Err(e) => {
            config.report(format!("Unable to open 3MF package: {}", e));
            return ArchiveBundle::default();
        }
    };
    log::debug!("opened 3MF package with {} entries", package.len());

    let plate = read_plate_info(&mut package, config);
    let plate_image = read_plate_image(&mut package, config);
    let gcode = read_plate_gcode(&mut package, config);

    let mut bundle = ArchiveBundle::default();
    if let Some(plate) = plate {
        apply_plate_info(&mut bundle, plate, config);
    }
    bundle.plate_image = plate_image;
    if let Some((slicer_info, file_info)) = gcode {
        bundle.slicer_info = Some(slicer_info);
        bundle.file_info = Some(file_info);
    }
    bundle
}

/// Extract metadata from the 3MF file at `path`
///
/// Fails only if the file cannot be opened.
pub fn parse_3mf_file<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<ArchiveBundle> {
    let file = File::open(path)?;
    Ok(parse_3mf(BufReader::new(file), config))
}

fn read_plate_info<R: Read + Seek>(
    package: &mut Package<R>,
    config: &ParserConfig,
) -> Option<PlateInfo> {
    let xml = match package.get_file(SLICE_INFO_PATH) {
        Ok(xml) => xml,
        Err(e) => {
            config.report(format!("slice_info.config not found in the 3MF package: {}", e));
            return None;
        }
    };

    let plates = match parse_slice_info(&xml) {
        Ok(plates) => plates,
        Err(e) => {
            config.report(format!("Invalid slice_info.config: {}", e));
            return None;
        }
    };

    select_plate(plates, config.plate())
}

/// Pick the plate whose `index` matches, falling back to the first one
fn select_plate(plates: Vec<PlateInfo>, plate: u32) -> Option<PlateInfo> {
    let position = plates.iter().position(|p| p.has_index(plate)).unwrap_or(0);
    plates.into_iter().nth(position)
}

fn apply_plate_info(bundle: &mut ArchiveBundle, plate: PlateInfo, config: &ParserConfig) {
    if let Some(model_id) = plate.printer_model_id {
        bundle.printer_model_id = model_id;
    }

    if let Some(raw) = plate.support_used {
        match parse_bool("support_used", &raw) {
            Ok(used) => bundle.support_used = used,
            Err(e) => config.report(format!("Invalid value for support_used: {}", e)),
        }
    }

    bundle.file_names = plate.file_names;
    bundle.filaments = plate.filaments;
}

fn read_plate_image<R: Read + Seek>(
    package: &mut Package<R>,
    config: &ParserConfig,
) -> Option<Vec<u8>> {
    let path = plate_image_path(config.plate());
    match package.get_file_binary(&path) {
        Ok(data) => Some(data),
        Err(e) => {
            config.report(format!("Plate image not available: {}", e));
            None
        }
    }
}

fn read_plate_gcode<R: Read + Seek>(
    package: &mut Package<R>,
    config: &ParserConfig,
) -> Option<(SlicerIdentity, FileMetadata)> {
    let path = plate_gcode_path(config.plate());
    match package.open_file(&path) {
        Ok(entry) => Some(gcode::parse_gcode(entry, config)),
        Err(e) => {
            config.report(format!("Plate G-code not available: {}", e));
            None
        }
    }
}
