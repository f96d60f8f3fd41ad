use std::io::Write;

use crate::{
    baml::records::RecordCodec,
    file::{io::BinaryWrite, parser::Parser},
    Result,
};

/// First record after the version header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentStartRecord {
    /// The document may be loaded asynchronously
    pub load_async: bool,
    /// Number of records processed per asynchronous batch
    pub max_async_records: i32,
    /// Line information records are present
    pub debug_baml: bool,
}

impl RecordCodec for DocumentStartRecord {
    const FIXED_SIZE: Option<usize> = Some(6);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(DocumentStartRecord {
            load_async: parser.read_bool()?,
            max_async_records: parser.read_le::<i32>()?,
            debug_baml: parser.read_bool()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_bool(self.load_async)?;
        out.write_le(self.max_async_records)?;
        out.write_bool(self.debug_baml)
    }
}

/// Header of a deferred block; `content_size` is back-patched once the block is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeferableContentStartRecord {
    /// Number of bytes between the end of this record and the end of the block
    pub content_size: i32,
}

impl RecordCodec for DeferableContentStartRecord {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(DeferableContentStartRecord {
            content_size: parser.read_le::<i32>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.content_size)
    }
}

/// Debug record carrying the source line and column of the following record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineNumberAndPositionRecord {
    /// Line number in the markup source
    pub line_number: u32,
    /// Column in the markup source
    pub line_position: u32,
}

impl RecordCodec for LineNumberAndPositionRecord {
    const FIXED_SIZE: Option<usize> = Some(8);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(LineNumberAndPositionRecord {
            line_number: parser.read_le::<u32>()?,
            line_position: parser.read_le::<u32>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.line_number)?;
        out.write_le(self.line_position)
    }
}

/// Debug record carrying only a column; the line is unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePositionRecord {
    /// Column in the markup source
    pub line_position: u32,
}

impl RecordCodec for LinePositionRecord {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(LinePositionRecord {
            line_position: parser.read_le::<u32>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.line_position)
    }
}

/// Code-behind hookup id of the enclosing element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionIdRecord {
    /// Id passed to the generated `Connect` method
    pub connection_id: i32,
}

impl RecordCodec for ConnectionIdRecord {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(ConnectionIdRecord {
            connection_id: parser.read_le::<i32>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.connection_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted_document_start() {
        let data = [
            0x01, // load_async
            0xC8, 0x00, 0x00, 0x00, // max_async_records
            0x00, // debug_baml
        ];

        let mut parser = Parser::new(&data);
        let record = DocumentStartRecord::read_data(&mut parser).unwrap();
        assert!(record.load_async);
        assert_eq!(record.max_async_records, 200);
        assert!(!record.debug_baml);

        let mut out = Vec::new();
        record.write_data(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn crafted_line_info() {
        let data = [
            0x2A, 0x00, 0x00, 0x00, // line_number
            0x07, 0x00, 0x00, 0x00, // line_position
        ];

        let mut parser = Parser::new(&data);
        let record = LineNumberAndPositionRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.line_number, 42);
        assert_eq!(record.line_position, 7);

        let mut parser = Parser::new(&data[4..]);
        let record = LinePositionRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.line_position, 7);
    }

    #[test]
    fn crafted_negative_values() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF];

        let mut parser = Parser::new(&data);
        let record = DeferableContentStartRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.content_size, -1);

        let mut parser = Parser::new(&data);
        let record = ConnectionIdRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.connection_id, -1);

        assert!(DocumentStartRecord::read_data(&mut Parser::new(&data)).is_err());
    }
}
