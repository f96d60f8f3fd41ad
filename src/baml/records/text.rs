use std::io::Write;

use crate::{
    baml::records::RecordCodec,
    file::{io::BinaryWrite, parser::Parser},
    Result,
};

/// Literal XML content (`x:XData`), copied through verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralContentRecord {
    /// The literal content
    pub value: String,
    /// Reserved, written as zero
    pub reserved0: i32,
    /// Reserved, written as zero
    pub reserved1: i32,
}

impl RecordCodec for LiteralContentRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let mut record = LiteralContentRecord::default();
        record.read_into(parser)?;
        Ok(record)
    }

    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        parser.read_prefixed_string_utf8_into(&mut self.value)?;
        self.reserved0 = parser.read_le::<i32>()?;
        self.reserved1 = parser.read_le::<i32>()?;
        Ok(())
    }

    fn copy_into(&self, target: &mut Self) {
        target.value.clone_from(&self.value);
        target.reserved0 = self.reserved0;
        target.reserved1 = self.reserved1;
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_prefixed_string(&self.value)?;
        out.write_le(self.reserved0)?;
        out.write_le(self.reserved1)
    }
}

/// Text content of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRecord {
    /// The text
    pub value: String,
}

impl RecordCodec for TextRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(TextRecord {
            value: parser.read_prefixed_string_utf8()?,
        })
    }

    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        parser.read_prefixed_string_utf8_into(&mut self.value)
    }

    fn copy_into(&self, target: &mut Self) {
        target.value.clone_from(&self.value);
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_prefixed_string(&self.value)
    }
}

/// Text content converted by a known type converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextWithConverterRecord {
    /// The text
    pub value: String,
    /// Type id of the converter
    pub converter_type_id: i16,
}

impl RecordCodec for TextWithConverterRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let mut record = TextWithConverterRecord::default();
        record.read_into(parser)?;
        Ok(record)
    }

    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        parser.read_prefixed_string_utf8_into(&mut self.value)?;
        self.converter_type_id = parser.read_le::<i16>()?;
        Ok(())
    }

    fn copy_into(&self, target: &mut Self) {
        target.value.clone_from(&self.value);
        target.converter_type_id = self.converter_type_id;
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_prefixed_string(&self.value)?;
        out.write_le(self.converter_type_id)
    }
}

/// Text content given by an interned string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextWithIdRecord {
    /// String id of the text
    pub value_id: i16,
}

impl RecordCodec for TextWithIdRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(TextWithIdRecord {
            value_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.value_id)
    }
}

/// A directive attribute such as `x:Uid` or `x:Class`, or a presentation options attribute
/// (`PresentationOptions:Freeze`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefAttributeRecord {
    /// Attribute value
    pub value: String,
    /// String id of the attribute name
    pub name_id: i16,
}

impl RecordCodec for DefAttributeRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let mut record = DefAttributeRecord::default();
        record.read_into(parser)?;
        Ok(record)
    }

    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        parser.read_prefixed_string_utf8_into(&mut self.value)?;
        self.name_id = parser.read_le::<i16>()?;
        Ok(())
    }

    fn copy_into(&self, target: &mut Self) {
        target.value.clone_from(&self.value);
        target.name_id = self.name_id;
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_prefixed_string(&self.value)?;
        out.write_le(self.name_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted_literal_content() {
        let data = [
            0x03, b'<', b'a', b'>', // value
            0x00, 0x00, 0x00, 0x00, // reserved0
            0x00, 0x00, 0x00, 0x00, // reserved1
        ];

        let record = LiteralContentRecord::read_data(&mut Parser::new(&data)).unwrap();
        assert_eq!(record.value, "<a>");

        let mut out = Vec::new();
        record.write_data(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn crafted_def_attribute() {
        let data = [
            0x02, b'u', b'1', // value
            0xFE, 0xFF, // name_id
        ];

        let record = DefAttributeRecord::read_data(&mut Parser::new(&data)).unwrap();
        assert_eq!(record.value, "u1");
        assert_eq!(record.name_id, -2);

        assert!(DefAttributeRecord::read_data(&mut Parser::new(&data[..4])).is_err());
    }
}
