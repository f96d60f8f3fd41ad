//! Bounds-checked byte cursor for BAML record decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor over a byte slice
//! with the `BinaryReader` primitives BAML is built on: little-endian integers, one-byte
//! booleans, 7-bit encoded integers and 7-bit length-prefixed UTF-8 strings.
//!
//! # Key Components
//!
//! ## Navigation Methods
//! - [`crate::file::parser::Parser::seek`] - Move to a specific position
//! - [`crate::file::parser::Parser::advance_by`] - Move forward by a number of bytes
//! - [`crate::file::parser::Parser::pos`] - Get the current position
//! - [`crate::file::parser::Parser::transactional`] - Run a closure, rolling the position back on failure
//!
//! ## Data Access Methods
//! - [`crate::file::parser::Parser::read_le`] - Read primitive types (little-endian)
//! - [`crate::file::parser::Parser::read_bool`] - Read a one-byte boolean
//! - [`crate::file::parser::Parser::read_7bit_encoded_int`] - Read 7-bit encoded integers
//! - [`crate::file::parser::Parser::read_prefixed_string_utf8`] - Read length-prefixed UTF-8 strings
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow a run of raw bytes
//! - [`crate::file::parser::Parser::sub_parser`] - Split off a parser bounded to the next bytes
//!
//! # Usage Examples
//!
//! ```rust
//! use bamlscope::Parser;
//!
//! // Length 4, followed by "Name", then an i16
//! let data = [4, b'N', b'a', b'm', b'e', 0xFF, 0xFF];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_prefixed_string_utf8()?, "Name");
//! assert_eq!(parser.read_le::<i16>()?, -1);
//! assert!(!parser.has_more_data());
//! # Ok::<(), bamlscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, BinaryIO},
    Result,
};

/// A cursor over a byte slice used to decode BAML records.
///
/// The parser maintains a position within the data and validates every access, so truncated or
/// malformed streams surface as [`crate::Error::OutOfBounds`] or [`crate::Error::Malformed`]
/// instead of panics.
///
/// # Examples
///
/// ```rust
/// use bamlscope::Parser;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut parser = Parser::new(&data);
///
/// let first = parser.read_le::<u32>()?;
/// assert_eq!(first, 0x04030201);
///
/// parser.seek(6)?;
/// let last = parser.read_le::<u16>()?;
/// assert_eq!(last, 0x0807);
/// # Ok::<(), bamlscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if the current position is before the end of the data.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to `pos`.
    ///
    /// Seeking to exactly the end of the data is allowed; it is where a reader lands after
    /// skipping the last record of a block.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `pos` is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by `step` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        let end = self.calc_end_position(step)?;
        self.position = end;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the whole underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the position is at the end of the data.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }
        Ok(self.data[self.position])
    }

    /// Peek at a little-endian `T` without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `T` would exceed the data length.
    pub fn peek_le<T: BinaryIO>(&self) -> Result<T> {
        let mut temp_position = self.position;
        read_le_at::<T>(self.data, &mut temp_position)
    }

    /// Execute a closure transactionally, rolling the position back if it fails.
    ///
    /// # Errors
    /// Returns any error produced by `f`; the position is restored before returning it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bamlscope::Parser;
    ///
    /// let mut parser = Parser::new(&[0x01]);
    /// let result: bamlscope::Result<u32> = parser.transactional(|p| p.read_le());
    /// assert!(result.is_err());
    /// assert_eq!(parser.pos(), 0);
    /// ```
    pub fn transactional<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved_position = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = saved_position;
        }
        result
    }

    /// Read a little-endian `T` and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_le<T: BinaryIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a `BinaryReader.ReadBoolean` value: one byte, any non-zero value is `true`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data is exhausted.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_le::<u8>()? != 0)
    }

    /// Read a 7-bit encoded integer.
    ///
    /// Each byte contributes its low 7 bits, least significant group first; a set high bit
    /// means another byte follows. At most five bytes are accepted.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the data ends inside the integer, or
    /// [`crate::Error::Malformed`] if the encoding continues past 32 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bamlscope::Parser;
    ///
    /// let mut parser = Parser::new(&[0x80, 0x01]);
    /// assert_eq!(parser.read_7bit_encoded_int()?, 128);
    /// # Ok::<(), bamlscope::Error>(())
    /// ```
    pub fn read_7bit_encoded_int(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0;

        loop {
            if self.position >= self.data.len() {
                return Err(out_of_bounds_error!());
            }

            let byte = self.data[self.position];
            self.position += 1;

            value |= u32::from(byte & 0x7F) << shift;
            shift += 7;

            if (byte & 0x80) == 0 {
                break;
            }

            if shift >= 32 {
                return Err(malformed_error!(
                    "7-bit encoded integer does not fit in 32 bits - {} bytes read",
                    shift / 7
                ));
            }
        }

        Ok(value)
    }

    /// Read a `BinaryReader.ReadString` value: a 7-bit encoded byte length followed by that
    /// many UTF-8 bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the string runs past the data, or
    /// [`crate::Error::Malformed`] for invalid UTF-8.
    pub fn read_prefixed_string_utf8(&mut self) -> Result<String> {
        Ok(self.read_prefixed_string_utf8_ref()?.to_string())
    }

    /// [`Parser::read_prefixed_string_utf8`] into an existing buffer, keeping its capacity.
    ///
    /// # Errors
    /// See [`Parser::read_prefixed_string_utf8`]. `out` is left untouched on error.
    pub fn read_prefixed_string_utf8_into(&mut self, out: &mut String) -> Result<()> {
        let value = self.read_prefixed_string_utf8_ref()?;
        out.clear();
        out.push_str(value);
        Ok(())
    }

    /// Zero-copy variant of [`Parser::read_prefixed_string_utf8`].
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the string runs past the data, or
    /// [`crate::Error::Malformed`] for invalid UTF-8.
    pub fn read_prefixed_string_utf8_ref(&mut self) -> Result<&'a str> {
        let length = self.read_7bit_encoded_int()? as usize;
        let start = self.position;
        let string_data = self.read_bytes(length)?;

        std::str::from_utf8(string_data).map_err(|e| {
            malformed_error!(
                "Invalid UTF-8 string at offset {}-{}: {}",
                start,
                start + length,
                e
            )
        })
    }

    /// Returns the number of bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Ensures that at least `needed` bytes are available from the current position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `needed` bytes remain.
    pub fn ensure_remaining(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(out_of_bounds_error!());
        }
        Ok(())
    }

    /// Computes `position + length`, checking for overflow and the data bounds.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the end lies past the data.
    pub fn calc_end_position(&self, length: usize) -> Result<usize> {
        let end = self
            .position
            .checked_add(length)
            .ok_or(out_of_bounds_error!())?;

        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        Ok(end)
    }

    /// Borrow the next `length` bytes and advance past them.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = self.calc_end_position(length)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Split off a parser over the next `length` bytes and advance past them.
    ///
    /// Record payloads are decoded through such a bounded parser, so a record can never read
    /// into the bytes of the record that follows it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than `length` bytes remain.
    pub fn sub_parser(&mut self, length: usize) -> Result<Parser<'a>> {
        Ok(Parser::new(self.read_bytes(length)?))
    }
}
