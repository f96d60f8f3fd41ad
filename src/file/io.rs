//! Low-level byte order and safe reading/writing utilities for BAML record payloads.
//!
//! This module provides endian-aware reading from byte slices and writing into any
//! [`std::io::Write`] sink. BAML inherits the conventions of the .NET `BinaryReader` and
//! `BinaryWriter` classes: every integer is little-endian, booleans occupy one byte, and
//! strings are prefixed with their UTF-8 byte length as a 7-bit encoded integer.
//!
//! # Key Components
//!
//! ## Core Trait
//! - [`crate::file::io::BinaryIO`] - Conversion between primitive types and their byte arrays
//!
//! ## Reading Functions
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//!
//! ## Writing
//! - [`crate::file::io::BinaryWrite`] - Extension trait for [`std::io::Write`] with the
//!   `BinaryWriter` primitives used by every record kind
//!
//! # Error Handling
//!
//! Reading functions return [`crate::Error::OutOfBounds`] if the buffer is too short.
//! Writing functions surface the I/O error of the underlying sink as
//! [`crate::Error::FileError`].

use std::io::Write;

use crate::{baml::varint::write_7bit_encoded_int, Result};

/// Trait for primitive types that can be converted to and from little-endian byte arrays.
pub trait BinaryIO: Sized {
    /// Byte array representation of the type
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Build a value from its little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Convert a value into its little-endian bytes
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_binary_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BinaryIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_binary_io!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Read a `T` from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is shorter than `T`.
pub fn read_le<T: BinaryIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Read a `T` at `offset` and advance `offset` past it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_le_at<T: BinaryIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!());
    };
    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Extension trait providing the `BinaryWriter` primitives on any [`std::io::Write`].
pub trait BinaryWrite: Write {
    /// Write a primitive in little-endian byte order.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the sink fails.
    fn write_le<T: BinaryIO>(&mut self, value: T) -> Result<()> {
        self.write_all(value.to_le_bytes().as_ref())?;
        Ok(())
    }

    /// Write a boolean as a single `0` / `1` byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the sink fails.
    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_le(u8::from(value))
    }

    /// Write an unsigned value as a 7-bit encoded integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the sink fails.
    fn write_7bit_encoded_int(&mut self, value: u32) -> Result<()> {
        let mut buffer = Vec::with_capacity(5);
        write_7bit_encoded_int(value, &mut buffer);
        self.write_all(&buffer)?;
        Ok(())
    }

    /// Write a string the way `BinaryWriter.Write(string)` does: 7-bit encoded UTF-8 length,
    /// followed by the UTF-8 bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the string is longer than `u32::MAX` bytes, or
    /// [`crate::Error::FileError`] if the sink fails.
    fn write_prefixed_string(&mut self, value: &str) -> Result<()> {
        let Ok(length) = u32::try_from(value.len()) else {
            return Err(malformed_error!("String too long - {} bytes", value.len()));
        };
        self.write_7bit_encoded_int(length)?;
        self.write_all(value.as_bytes())?;
        Ok(())
    }
}

impl<W: Write + ?Sized> BinaryWrite for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn read_sequential() {
        let data = [0x01, 0x00, 0xFE, 0xFF, 0x03, 0x00, 0x00, 0x00];
        let mut offset = 0;

        assert_eq!(read_le_at::<u16>(&data, &mut offset).unwrap(), 1);
        assert_eq!(read_le_at::<i16>(&data, &mut offset).unwrap(), -2);
        assert_eq!(read_le_at::<u32>(&data, &mut offset).unwrap(), 3);
        assert_eq!(offset, 8);

        assert!(matches!(
            read_le_at::<u8>(&data, &mut offset),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn read_from_start() {
        assert_eq!(read_le::<i32>(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap(), -1);
        assert!(read_le::<u64>(&[0x00; 7]).is_err());
    }

    #[test]
    fn write_primitives() {
        let mut out = Vec::new();
        out.write_le(0x1234_u16).unwrap();
        out.write_le(-1_i32).unwrap();
        out.write_bool(true).unwrap();
        out.write_bool(false).unwrap();

        assert_eq!(out, [0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00]);
    }

    #[test]
    fn write_strings() {
        let mut out = Vec::new();
        out.write_prefixed_string("Name").unwrap();
        out.write_prefixed_string("").unwrap();

        assert_eq!(out, [4, b'N', b'a', b'm', b'e', 0]);

        let long = "x".repeat(200);
        let mut out = Vec::new();
        out.write_prefixed_string(&long).unwrap();
        assert_eq!(&out[..2], &[0xC8, 0x01]);
        assert_eq!(out.len(), 202);
    }
}
