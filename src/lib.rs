//! # slicemeta
//!
//! A pure Rust library for reading print metadata out of files produced by
//! 3D-printer slicers.
//!
//! Two containers are supported:
//!
//! - **Sliced G-code**, where the slicer writes its metadata as comment
//!   blocks (`HEADER_BLOCK`, `THUMBNAIL_BLOCK`, `CONFIG_BLOCK`) ahead of the
//!   motion commands, plus a few `key = value` comments between them.
//! - **Sliced 3MF packages**, ZIP archives carrying an XML slice manifest, a
//!   plate preview image, and the sliced G-code for the plate.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Best-effort parsing: malformed values are reported, never fatal
//! - Embedded base64 thumbnails reassembled and checked with the `image` crate
//! - Pluggable diagnostics, time formatting and image decoding via [`ParserConfig`]
//!
//! ## Example
//!
//! ```no_run
//! use slicemeta::{ArchiveBundle, FileMetadata};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (slicer, meta) = FileMetadata::from_reader(File::open("benchy.gcode")?);
//! println!("{} {} - {:.1} g of {}", slicer.software, slicer.version,
//!     meta.filament_used_g, meta.filament_type);
//!
//! let bundle = ArchiveBundle::from_reader(File::open("benchy.gcode.3mf")?);
//! println!("{} filament(s), supports: {}", bundle.filaments.len(), bundle.support_used);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod diagnostics;
pub mod error;
pub mod gcode;
pub mod model;
pub mod thumbnail;
pub mod time;

pub use archive::{parse_3mf, parse_3mf_file};
pub use error::{Error, Result};
pub use gcode::{parse_gcode, parse_gcode_file, parse_gcode_lines};
pub use model::{
    ArchiveBundle, FilamentInfo, FileMetadata, ParserConfig, SlicerIdentity, SlicerType,
    Thumbnail,
};

use std::io::{Read, Seek};

impl FileMetadata {
    /// Parse sliced G-code from a reader with the default configuration
    ///
    /// Returns the slicer identity alongside the file metadata. Diagnostics
    /// go to the `log` facade.
    ///
    /// # Example
    ///
    /// ```
    /// use slicemeta::FileMetadata;
    ///
    /// let gcode = "; CONFIG_BLOCK_START\n; filament_type = PLA\n; CONFIG_BLOCK_END\n";
    /// let (_, meta) = FileMetadata::from_reader(gcode.as_bytes());
    /// assert_eq!(meta.filament_type, "PLA");
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> (SlicerIdentity, FileMetadata) {
        Self::from_reader_with_config(reader, &ParserConfig::default())
    }

    /// Parse sliced G-code from a reader with custom configuration
    pub fn from_reader_with_config<R: Read>(
        reader: R,
        config: &ParserConfig,
    ) -> (SlicerIdentity, FileMetadata) {
        gcode::parse_gcode(reader, config)
    }
}

impl ArchiveBundle {
    /// Parse a sliced 3MF package from a reader with the default configuration
    pub fn from_reader<R: Read + Seek>(reader: R) -> Self {
        Self::from_reader_with_config(reader, &ParserConfig::default())
    }

    /// Parse a sliced 3MF package from a reader with custom configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use slicemeta::{ArchiveBundle, ParserConfig};
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ParserConfig::new().with_plate(2);
    /// let bundle = ArchiveBundle::from_reader_with_config(File::open("plates.3mf")?, &config);
    /// if let Some(image) = &bundle.plate_image {
    ///     std::fs::write("plate_2.png", image)?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader_with_config<R: Read + Seek>(reader: R, config: &ParserConfig) -> Self {
        archive::parse_3mf(reader, config)
    }
}
