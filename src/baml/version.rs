//! The BAML version header.
//!
//! Every BAML stream opens with a fixed 28-byte header:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 4 | byte length of the feature id (`i32`, always 12) |
//! | 4 | 12 | feature id `MSBAML` in UTF-16LE |
//! | 16 | 4 | reader version (`u16` major, `u16` minor) |
//! | 20 | 4 | updater version |
//! | 24 | 4 | writer version |
//!
//! A reader accepts a stream only if the declared reader version matches its own major *and*
//! minor version exactly.

use std::{fmt, io::Write};

use widestring::{U16Str, U16String};

use crate::{
    file::{io::BinaryWrite, parser::Parser},
    Error, Result,
};

/// Feature id at the start of every BAML stream.
pub const FEATURE_ID: &str = "MSBAML";

/// Size of the version header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Upper bound on the feature id length accepted while reading; anything larger is not BAML.
const MAX_FEATURE_ID_BYTES: usize = 256;

/// A `major.minor` version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BamlVersion {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
}

impl BamlVersion {
    /// The version this crate reads and writes.
    pub const CURRENT: BamlVersion = BamlVersion::new(0, 96);

    /// Create a version pair.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        BamlVersion { major, minor }
    }

    fn read(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(BamlVersion {
            major: parser.read_le::<u16>()?,
            minor: parser.read_le::<u16>()?,
        })
    }

    fn write<W: Write + ?Sized>(self, out: &mut W) -> Result<()> {
        out.write_le(self.major)?;
        out.write_le(self.minor)
    }
}

impl Default for BamlVersion {
    fn default() -> Self {
        BamlVersion::CURRENT
    }
}

impl fmt::Display for BamlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The decoded version header of a BAML stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionHeader {
    /// Oldest reader able to load the stream
    pub reader: BamlVersion,
    /// Oldest updater able to modify the stream
    pub updater: BamlVersion,
    /// Version of the writer that produced the stream
    pub writer: BamlVersion,
}

impl VersionHeader {
    /// A header declaring `version` for all three roles.
    #[must_use]
    pub const fn new(version: BamlVersion) -> Self {
        VersionHeader {
            reader: version,
            updater: version,
            writer: version,
        }
    }

    /// Read the header and verify signature and reader version.
    ///
    /// # Errors
    /// - [`crate::Error::Empty`] if there is no data at all
    /// - [`crate::Error::InvalidSignature`] if the feature id is not `MSBAML`
    /// - [`crate::Error::VersionMismatch`] if the reader version differs from [`BamlVersion::CURRENT`]
    /// - [`crate::Error::OutOfBounds`] if the header is truncated
    pub fn read(parser: &mut Parser<'_>) -> Result<Self> {
        if !parser.has_more_data() {
            return Err(Error::Empty);
        }

        let id_length = parser.read_le::<i32>()?;
        let id_length = match usize::try_from(id_length) {
            Ok(length) if length % 2 == 0 && length <= MAX_FEATURE_ID_BYTES => length,
            _ => {
                return Err(Error::InvalidSignature(format!(
                    "feature id length {id_length}"
                )))
            }
        };

        let raw = parser.read_bytes(id_length)?;
        let units: Vec<u16> = raw
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let feature_id = U16Str::from_slice(&units).to_string_lossy();
        if feature_id != FEATURE_ID {
            return Err(Error::InvalidSignature(feature_id));
        }

        let header = VersionHeader {
            reader: BamlVersion::read(parser)?,
            updater: BamlVersion::read(parser)?,
            writer: BamlVersion::read(parser)?,
        };

        if header.reader != BamlVersion::CURRENT {
            return Err(Error::VersionMismatch {
                found: header.reader,
                expected: BamlVersion::CURRENT,
            });
        }

        log::debug!(
            "BAML header - reader {}, updater {}, writer {}",
            header.reader,
            header.updater,
            header.writer
        );

        Ok(header)
    }

    /// Write the 28-byte header.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the sink fails.
    pub fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let feature_id = U16String::from_str(FEATURE_ID);
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let id_length = (feature_id.len() * 2) as i32;
        out.write_le(id_length)?;
        for unit in feature_id.as_slice() {
            out.write_le(*unit)?;
        }

        self.reader.write(out)?;
        self.updater.write(out)?;
        self.writer.write(out)
    }
}

impl Default for VersionHeader {
    fn default() -> Self {
        VersionHeader::new(BamlVersion::CURRENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const HEADER: [u8; HEADER_SIZE] = [
        0x0C, 0x00, 0x00, 0x00,
        b'M', 0x00, b'S', 0x00, b'B', 0x00, b'A', 0x00, b'M', 0x00, b'L', 0x00,
        0x00, 0x00, 0x60, 0x00,
        0x00, 0x00, 0x60, 0x00,
        0x00, 0x00, 0x60, 0x00,
    ];

    #[test]
    fn write_crafted() {
        let mut out = Vec::new();
        VersionHeader::default().write(&mut out).unwrap();
        assert_eq!(out, HEADER);
    }

    #[test]
    fn read_crafted() {
        let mut parser = Parser::new(&HEADER);
        let header = VersionHeader::read(&mut parser).unwrap();

        assert_eq!(header.reader, BamlVersion::CURRENT);
        assert_eq!(header.writer.to_string(), "0.96");
        assert_eq!(parser.pos(), HEADER_SIZE);
    }

    #[test]
    fn minor_mismatch() {
        let mut data = HEADER;
        data[18] = 0x5F;

        let mut parser = Parser::new(&data);
        match VersionHeader::read(&mut parser) {
            Err(Error::VersionMismatch { found, expected }) => {
                assert_eq!(found, BamlVersion::new(0, 95));
                assert_eq!(expected, BamlVersion::CURRENT);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn major_mismatch() {
        let mut data = HEADER;
        data[16] = 0x01;

        let mut parser = Parser::new(&data);
        let error = VersionHeader::read(&mut parser).unwrap_err();
        assert!(error.to_string().contains("1.96"));
        assert!(error.to_string().contains("0.96"));
    }

    #[test]
    fn invalid_signature() {
        let mut data = HEADER;
        data[4] = b'X';
        let mut parser = Parser::new(&data);
        assert!(matches!(
            VersionHeader::read(&mut parser),
            Err(Error::InvalidSignature(ref id)) if id == "XSBAML"
        ));

        let mut data = HEADER;
        data[0] = 0xFF;
        data[3] = 0xFF;
        let mut parser = Parser::new(&data);
        assert!(matches!(
            VersionHeader::read(&mut parser),
            Err(Error::InvalidSignature(_))
        ));

        let mut parser = Parser::new(&[]);
        assert!(matches!(VersionHeader::read(&mut parser), Err(Error::Empty)));

        let mut parser = Parser::new(&HEADER[..20]);
        assert!(matches!(
            VersionHeader::read(&mut parser),
            Err(Error::OutOfBounds { .. })
        ));
    }
}
