//! Shared fixtures for integration tests
//!
//! Builds sliced G-code text and 3MF packages in memory, so tests do not
//! depend on sample files from any particular slicer release.

#![allow(dead_code)]

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use image::{ImageFormat, Rgb, RgbImage};
use slicemeta::ParserConfig;
use slicemeta::diagnostics::CollectingSink;
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Width slicers wrap thumbnail base64 at
pub const THUMBNAIL_LINE_WIDTH: usize = 78;

/// Encode a solid-color PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 128, 0]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Render `image` as a thumbnail block the way slicers do
pub fn thumbnail_block(image: &[u8], width: u32, height: u32) -> String {
    let encoded = BASE64.encode(image);
    let mut block = String::from("; THUMBNAIL_BLOCK_START\n");
    block.push_str(&format!(
        "; thumbnail begin {}x{} {}\n",
        width,
        height,
        encoded.len()
    ));
    for chunk in encoded.as_bytes().chunks(THUMBNAIL_LINE_WIDTH) {
        block.push_str("; ");
        block.push_str(std::str::from_utf8(chunk).unwrap());
        block.push('\n');
    }
    block.push_str("; thumbnail end\n; THUMBNAIL_BLOCK_END\n");
    block
}

/// A complete Orca-Flashforge style instruction file
pub fn sample_gcode() -> String {
    let mut gcode = String::new();
    gcode.push_str(
        "; HEADER_BLOCK_START\n\
         ; generated by Orca-Flashforge 1.3.0 on 2024-03-01 at 10:12:13\n\
         ; total layer number: 120\n\
         ; HEADER_BLOCK_END\n\
         \n",
    );
    gcode.push_str(&thumbnail_block(&png_bytes(16, 12), 16, 12));
    gcode.push_str(
        "\n\
         ; filament used [mm] = 1520.35\n\
         ; filament used [g] = 4.53\n\
         ; estimated printing time = 01:02:03\n\
         \n\
         ; CONFIG_BLOCK_START\n\
         ; filament_type = PLA\n\
         ; printer_model = Flashforge Adventurer 5M\n\
         ; nozzle_diameter = 0.4\n\
         ; CONFIG_BLOCK_END\n\
         \n\
         ; EXECUTABLE_BLOCK_START\n\
         G28\n\
         ; filament used [g] = 999\n\
         ; CONFIG_BLOCK_START\n\
         ; printer_model = Not This One\n",
    );
    gcode
}

/// A slice manifest with one plate
pub fn sample_manifest() -> String {
    r##"<?xml version="1.0" encoding="UTF-8"?>
<config>
  <header>
    <header_item key="X-BBL-Client-Type" value="slicer"/>
    <header_item key="X-BBL-Client-Version" value="01.09.00.00"/>
  </header>
  <plate>
    <metadata key="index" value="1"/>
    <metadata key="printer_model_id" value="C12"/>
    <metadata key="nozzle_diameters" value="0.4"/>
    <metadata key="support_used" value="true"/>
    <object identify_id="96" name="Cube.stl" skipped="false"/>
    <object identify_id="120" name="Benchy.stl" skipped="false"/>
    <filament id="1" type="PLA" color="#FFFFFF" used_m="1.52" used_g="4.53"/>
    <filament id="3" type="PETG" color="#1A1A1A" used_m="0.20" used_g="0.61"/>
  </plate>
</config>"##
        .to_string()
}

/// Zip `entries` into an in-memory package
pub fn build_3mf(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let cursor = Cursor::new(&mut buffer);
    let mut zip = ZipWriter::new(cursor);
    let options = SimpleFileOptions::default();

    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// Configuration whose diagnostics can be inspected afterwards
pub fn collecting_config() -> (ParserConfig, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    (ParserConfig::new().with_sink(sink.clone()), sink)
}
