//! Package entry access

use crate::error::{Error, Result};
use std::io::{Read, Seek};
use zip::ZipArchive;
use zip::result::ZipError;

/// A sliced 3MF package opened for reading
pub struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from a reader
    ///
    /// Only the ZIP container is checked; slicer packages are not required
    /// to carry the full OPC relationship structure.
    pub fn open(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        if archive.is_empty() {
            return Err(Error::InvalidFormat("package contains no entries".to_string()));
        }
        Ok(Self { archive })
    }

    /// Check if an entry exists in the package
    pub fn has_file(&mut self, name: &str) -> bool {
        self.archive.by_name(name).is_ok()
    }

    /// Get the number of entries in the package
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the package is empty
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Get a list of all entry names in the package
    pub fn file_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Get an entry as text
    pub fn get_file(&mut self, name: &str) -> Result<String> {
        let mut content = String::new();
        self.open_file(name)?.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Get an entry as binary data
    pub fn get_file_binary(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        self.open_file(name)?.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Open an entry for streaming reads
    pub fn open_file(&mut self, name: &str) -> Result<impl Read + '_> {
        self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => Error::MissingFile(name.to_string()),
            other => Error::Zip(other),
        })
    }
}
