//! Property-based tests for slicemeta
//!
//! These tests use proptest to generate random G-code fragments and verify
//! the block parser's invariants hold across a wide range of inputs.

mod common;

use common::{collecting_config, thumbnail_block};
use proptest::prelude::*;
use slicemeta::gcode::{BlockState, LineScanner};
use slicemeta::{FileMetadata, SlicerIdentity, parse_gcode_lines};

// ============================================================================
// Generators
// ============================================================================

/// A line that is neither a comment nor a block sentinel
fn instruction_line_strategy() -> impl Strategy<Value = String> {
    "[A-Z][0-9]{1,3}( [A-Z]-?[0-9]{1,4}(\\.[0-9]{1,3})?){0,4}"
}

/// A config value without separators or sentinel text
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 _.-]{0,20}[A-Za-z0-9]"
}

/// A comment without `=` that cannot be mistaken for a sentinel
fn stray_comment_strategy() -> impl Strategy<Value = String> {
    "[a-z ]{0,30}".prop_map(|text| format!("; {}", text))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_instruction_lines_are_ignored(lines in prop::collection::vec(instruction_line_strategy(), 0..50)) {
        let (config, sink) = collecting_config();
        let (slicer, meta) = parse_gcode_lines(&lines, &config);
        prop_assert_eq!(slicer, SlicerIdentity::new());
        prop_assert_eq!(meta, FileMetadata::new());
        prop_assert!(sink.messages().is_empty());
    }

    #[test]
    fn prop_config_values_are_kept(filament in value_strategy(), printer in value_strategy()) {
        let (config, _) = collecting_config();
        let lines = [
            "; CONFIG_BLOCK_START".to_string(),
            format!("; filament_type = {}", filament),
            format!("; printer_model = {}", printer),
            "; CONFIG_BLOCK_END".to_string(),
        ];
        let (_, meta) = parse_gcode_lines(&lines, &config);
        prop_assert_eq!(meta.filament_type, filament);
        prop_assert_eq!(meta.printer_model, printer);
    }

    #[test]
    fn prop_config_line_without_separator_resets_jointly(
        filament in value_strategy(),
        printer in value_strategy(),
        stray in stray_comment_strategy(),
    ) {
        let (config, _) = collecting_config();
        let lines = [
            "; CONFIG_BLOCK_START".to_string(),
            format!("; filament_type = {}", filament),
            format!("; printer_model = {}", printer),
            stray,
            "; CONFIG_BLOCK_END".to_string(),
        ];
        let (_, meta) = parse_gcode_lines(&lines, &config);
        prop_assert_eq!(meta.filament_type.as_str(), "Unknown");
        prop_assert_eq!(meta.printer_model.as_str(), "Unknown");
    }

    #[test]
    fn prop_numeric_fields_parse(mm in 0.0f64..1.0e7, g in 0.0f64..1.0e5) {
        let (config, sink) = collecting_config();
        let lines = [
            format!("; filament used [mm] = {}", mm),
            format!("; filament used [g] = {}", g),
        ];
        let (_, meta) = parse_gcode_lines(&lines, &config);
        prop_assert_eq!(meta.filament_used_mm, mm);
        prop_assert_eq!(meta.filament_used_g, g);
        prop_assert!(sink.messages().is_empty());
    }

    #[test]
    fn prop_non_numeric_text_keeps_previous(previous in 0.0f64..1.0e4, junk in "[a-zA-Z,]{1,12}") {
        // Words like "inf" or "nan" parse as floats but are rejected as non-finite
        let (config, _) = collecting_config();
        let lines = [
            format!("; filament used [g] = {}", previous),
            format!("; filament used [g] = {}", junk),
        ];
        let (_, meta) = parse_gcode_lines(&lines, &config);
        prop_assert_eq!(meta.filament_used_g, previous);
    }

    #[test]
    fn prop_thumbnail_payload_is_concatenated(chunks in prop::collection::vec("[A-Za-z0-9+/]{1,78}", 1..20)) {
        let (config, _) = collecting_config();
        let mut scanner = LineScanner::new(&config);
        let _ = scanner.feed("; THUMBNAIL_BLOCK_START");
        let _ = scanner.feed("; thumbnail begin 10x10 100");
        for chunk in &chunks {
            let _ = scanner.feed(&format!("; {}", chunk));
        }
        prop_assert_eq!(
            scanner.state(),
            BlockState::Thumbnail { in_data: true }
        );
        prop_assert_eq!(scanner.thumbnail_data(), chunks.concat());
    }

    #[test]
    fn prop_nothing_after_executable_block(lines in prop::collection::vec(
        prop_oneof![
            instruction_line_strategy(),
            value_strategy().prop_map(|v| format!("; filament_type = {}", v)),
            Just("; CONFIG_BLOCK_START".to_string()),
            Just("; HEADER_BLOCK_START".to_string()),
            Just("; generated by OrcaSlicer 2.1.0".to_string()),
            Just("; filament used [g] = 42".to_string()),
            Just("; estimated printing time = 01:00:00".to_string()),
        ],
        0..40,
    )) {
        let (config, _) = collecting_config();
        let mut input = vec!["; EXECUTABLE_BLOCK_START".to_string()];
        input.extend(lines);
        let (slicer, meta) = parse_gcode_lines(&input, &config);
        prop_assert_eq!(slicer, SlicerIdentity::new());
        prop_assert_eq!(meta, FileMetadata::new());
    }

    #[test]
    fn prop_valid_thumbnail_survives_line_width(width in 8usize..120) {
        let png = common::png_bytes(6, 4);
        let block = thumbnail_block(&png, 6, 4);
        // Re-wrap the payload at a different width
        let payload: String = block
            .lines()
            .filter(|l| !l.contains("THUMBNAIL_BLOCK") && !l.contains("thumbnail "))
            .map(|l| l.trim_start_matches("; "))
            .collect();
        let mut lines = vec![
            "; THUMBNAIL_BLOCK_START".to_string(),
            "; thumbnail begin 6x4".to_string(),
        ];
        for chunk in payload.as_bytes().chunks(width) {
            lines.push(format!("; {}", std::str::from_utf8(chunk).unwrap()));
        }
        lines.push("; thumbnail end".to_string());
        lines.push("; THUMBNAIL_BLOCK_END".to_string());

        let (config, _) = collecting_config();
        let (_, meta) = parse_gcode_lines(&lines, &config);
        let thumb = meta.thumbnail.unwrap();
        prop_assert_eq!(thumb.data, png);
        prop_assert_eq!((thumb.width, thumb.height), (6, 4));
    }
}
