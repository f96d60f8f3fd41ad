//! Memory-mapped file backend.
//!
//! [`crate::file::physical::Physical`] maps a compiled `.baml` file into the address space of
//! the process, so the reader can walk records and seek into deferred blocks without copying
//! the stream into a buffer first.

use super::{bounded_slice, Backend};
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A backend that accesses a BAML file on disk through a read-only memory mapping.
///
/// The mapping stays valid for the lifetime of the backend; the file must not be truncated by
/// another process while it is mapped.
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new backend by memory-mapping the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;
        let data = unsafe { Mmap::map(&file) }
            .map_err(|error| Error(format!("Failed to map file - {error}")))?;

        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        bounded_slice(&self.data, offset, len)
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn physical() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(&[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]).unwrap();
        temp.flush().unwrap();

        let physical = Physical::new(temp.path()).unwrap();

        assert_eq!(physical.len(), 6);
        assert_eq!(physical.data()[0], 0xAA);
        assert_eq!(physical.data_slice(2, 3).unwrap(), &[0xCC, 0xDD, 0xEE]);
        assert!(physical.data_slice(5, 2).is_err());
        assert!(physical.data_slice(usize::MAX, 1).is_err());
        assert!(physical.data_slice(6, 0).unwrap().is_empty());
    }

    #[test]
    fn physical_invalid_file_path() {
        let result = Physical::new("/nonexistent/path/to/Page1.baml");
        match result {
            Err(FileError(io_error)) => {
                assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected FileError"),
        }
    }
}
