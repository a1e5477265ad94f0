//! Data structures produced by metadata extraction

mod archive;
mod config;
mod slicer;

pub use archive::{ArchiveBundle, FilamentInfo};
pub use config::{DEFAULT_PLATE, ParserConfig};
pub use slicer::{ETA_ERROR, FileMetadata, SlicerIdentity, SlicerType, Thumbnail, UNKNOWN};
