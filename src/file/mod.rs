//! Access to BAML bytes on disk or in memory.
//!
//! A compiled page usually lives inside a resource stream or as a loose `.baml` file. [`File`]
//! hides where the bytes come from behind the [`Backend`] trait, so a reader always works on one
//! contiguous slice:
//!
//! - [`crate::file::physical::Physical`] memory-maps a file
//! - [`crate::file::memory::Memory`] owns a buffer
//!
//! The low-level decoding helpers live in [`crate::file::parser`] (bounds-checked cursor) and
//! [`crate::file::io`] (little-endian primitives for both directions).
//!
//! # Examples
//!
//! ```rust,no_run
//! use bamlscope::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("obj/Debug/MainWindow.baml"))?;
//! let mut reader = file.reader()?;
//! println!("BAML {}", reader.header().reader);
//! while let Some(record) = reader.next_record()? {
//!     println!("{}", record.record_type());
//! }
//! # Ok::<(), bamlscope::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    baml::{
        reader::{BamlReader, ReaderOptions},
        version::FEATURE_ID,
    },
    Error::Empty,
    Result,
};
use memory::Memory;
use physical::Physical;

/// Source of the raw bytes behind a [`File`].
///
/// Implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// A bounds-checked slice of the data.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// All of the data.
    fn data(&self) -> &[u8];

    /// Length of the data in bytes.
    fn len(&self) -> usize;
}

pub(crate) fn bounded_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= data.len() => Ok(&data[offset..end]),
        _ => Err(out_of_bounds_error!()),
    }
}

/// A BAML stream loaded from disk or memory.
pub struct File {
    backend: Box<dyn Backend>,
}

impl File {
    /// Memory-map a file.
    ///
    /// # Errors
    /// - [`crate::Error::FileError`] if the file cannot be opened
    /// - [`crate::Error::Empty`] for an empty file
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;
        Self::load(input)
    }

    /// Take ownership of an in-memory buffer.
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for an empty buffer.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);
        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            backend: Box::new(data),
        })
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// `true` if the file holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.len() == 0
    }

    /// All of the data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.backend.data()
    }

    /// A bounds-checked slice of the data.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.backend.data_slice(offset, len)
    }

    /// Cheap check for the `MSBAML` feature id, without verifying the version.
    #[must_use]
    pub fn has_baml_signature(&self) -> bool {
        let expected: Vec<u8> = FEATURE_ID
            .encode_utf16()
            .flat_map(u16::to_le_bytes)
            .collect();

        self.data_slice(4, expected.len())
            .is_ok_and(|feature_id| feature_id == expected.as_slice())
    }

    /// A reader over the whole file.
    ///
    /// # Errors
    /// See [`BamlReader::new`].
    pub fn reader(&self) -> Result<BamlReader<'_>> {
        BamlReader::new(self.data())
    }

    /// A reader over the whole file with explicit options.
    ///
    /// # Errors
    /// See [`BamlReader::new`].
    pub fn reader_with_options(&self, options: ReaderOptions) -> Result<BamlReader<'_>> {
        BamlReader::with_options(self.data(), options)
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{baml::records::RecordType, test::stream, Error};

    #[test]
    fn load_buffer() {
        let file = File::from_mem(stream(&[])).unwrap();
        assert!(file.has_baml_signature());
        assert!(!file.is_empty());

        let kinds: Vec<RecordType> = file
            .reader()
            .unwrap()
            .map(|record| record.unwrap().record_type())
            .collect();
        assert_eq!(kinds, [RecordType::DocumentStart, RecordType::DocumentEnd]);
    }

    #[test]
    fn load_file() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(&stream(&[])).unwrap();
        temp.flush().unwrap();

        let file = File::from_file(temp.path()).unwrap();
        assert_eq!(file.len(), 36);
        assert!(file.reader().unwrap().read_all().is_ok());
    }

    #[test]
    fn load_invalid() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Error::Empty)));

        let file = File::from_mem(vec![0x0C, 0, 0, 0, b'X', 0]).unwrap();
        assert!(!file.has_baml_signature());
        assert!(file.reader().is_err());
    }
}
