use std::io::Write;

use crate::{
    baml::records::RecordCodec,
    file::{io::BinaryWrite, parser::Parser},
    Result,
};

/// Marks a `PropertyCustom` serializer id whose value is itself a type id.
pub const SERIALIZER_VALUE_TYPE_ID_MASK: u16 = 0x4000;
/// Bits of the extension field of `PropertyWithExtension` that hold the extension type id.
pub const EXTENSION_TYPE_ID_MASK: u16 = 0x0FFF;
/// The extension value is a type id (`{x:Type}` argument).
pub const EXTENSION_VALUE_TYPE_MASK: u16 = 0x4000;
/// The extension value is a member id (`{x:Static}` argument).
pub const EXTENSION_VALUE_STATIC_MASK: u16 = 0x2000;

/// Simple property assignment with a string value. Also the payload of `RoutedEvent`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRecord {
    /// Attribute id of the property or event
    pub attribute_id: i16,
    /// Value text
    pub value: String,
}

impl RecordCodec for PropertyRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let mut record = PropertyRecord::default();
        record.read_into(parser)?;
        Ok(record)
    }

    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        self.attribute_id = parser.read_le::<i16>()?;
        parser.read_prefixed_string_utf8_into(&mut self.value)
    }

    fn copy_into(&self, target: &mut Self) {
        target.attribute_id = self.attribute_id;
        target.value.clone_from(&self.value);
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)?;
        out.write_prefixed_string(&self.value)
    }
}

/// Property whose value was serialized by a custom binary serializer.
///
/// The value stays opaque. Serializer ids are known-type ids below `0x4000`; the bit above
/// them flags values that are type ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyCustomRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
    /// Type id of the serializer, without the value-type flag
    pub serializer_type_id: i16,
    /// The serialized value is a type id
    pub is_value_type_id: bool,
    /// Serialized value bytes
    pub value: Vec<u8>,
}

impl RecordCodec for PropertyCustomRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let mut record = PropertyCustomRecord::default();
        record.read_into(parser)?;
        Ok(record)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        self.attribute_id = parser.read_le::<i16>()?;
        let raw = parser.read_le::<u16>()?;
        self.is_value_type_id = raw & SERIALIZER_VALUE_TYPE_ID_MASK != 0;
        self.serializer_type_id = (raw & !SERIALIZER_VALUE_TYPE_ID_MASK) as i16;

        let value = parser.read_bytes(parser.remaining())?;
        self.value.clear();
        self.value.extend_from_slice(value);
        Ok(())
    }

    fn copy_into(&self, target: &mut Self) {
        target.attribute_id = self.attribute_id;
        target.serializer_type_id = self.serializer_type_id;
        target.is_value_type_id = self.is_value_type_id;
        target.value.clone_from(&self.value);
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let mut raw = self.serializer_type_id as u16;
        if self.is_value_type_id {
            raw |= SERIALIZER_VALUE_TYPE_ID_MASK;
        }

        out.write_le(self.attribute_id)?;
        out.write_le(raw)?;
        out.write_all(&self.value)?;
        Ok(())
    }
}

/// Start of a complex property, array, IList or IDictionary property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyComplexStartRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
}

impl RecordCodec for PropertyComplexStartRecord {
    const FIXED_SIZE: Option<usize> = Some(2);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(PropertyComplexStartRecord {
            attribute_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)
    }
}

/// Declares the content property of the enclosing element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPropertyRecord {
    /// Attribute id of the content property
    pub attribute_id: i16,
}

impl RecordCodec for ContentPropertyRecord {
    const FIXED_SIZE: Option<usize> = Some(2);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(ContentPropertyRecord {
            attribute_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)
    }
}

/// Property whose value is an interned string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStringReferenceRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
    /// String id of the value
    pub string_id: i16,
}

impl RecordCodec for PropertyStringReferenceRecord {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(PropertyStringReferenceRecord {
            attribute_id: parser.read_le::<i16>()?,
            string_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)?;
        out.write_le(self.string_id)
    }
}

/// Property whose value is a type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTypeReferenceRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
    /// Type id of the value
    pub type_id: i16,
}

impl RecordCodec for PropertyTypeReferenceRecord {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(PropertyTypeReferenceRecord {
            attribute_id: parser.read_le::<i16>()?,
            type_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)?;
        out.write_le(self.type_id)
    }
}

/// Property set through a markup extension with a single simple argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyWithExtensionRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
    /// Known type id of the extension, 12 bits
    pub extension_type_id: i16,
    /// `value_id` is a type id
    pub is_value_type_extension: bool,
    /// `value_id` is a member id
    pub is_value_static_extension: bool,
    /// String, type or attribute id of the argument
    pub value_id: i16,
}

impl RecordCodec for PropertyWithExtensionRecord {
    const FIXED_SIZE: Option<usize> = Some(6);

    #[allow(clippy::cast_possible_wrap)]
    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let attribute_id = parser.read_le::<i16>()?;
        let extension = parser.read_le::<u16>()?;

        Ok(PropertyWithExtensionRecord {
            attribute_id,
            extension_type_id: (extension & EXTENSION_TYPE_ID_MASK) as i16,
            is_value_type_extension: extension & EXTENSION_VALUE_TYPE_MASK != 0,
            is_value_static_extension: extension & EXTENSION_VALUE_STATIC_MASK != 0,
            value_id: parser.read_le::<i16>()?,
        })
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let mut extension = self.extension_type_id as u16 & EXTENSION_TYPE_ID_MASK;
        if self.is_value_type_extension {
            extension |= EXTENSION_VALUE_TYPE_MASK;
        }
        if self.is_value_static_extension {
            extension |= EXTENSION_VALUE_STATIC_MASK;
        }

        out.write_le(self.attribute_id)?;
        out.write_le(extension)?;
        out.write_le(self.value_id)
    }
}

/// Property with a string value that is converted by a known type converter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyWithConverterRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
    /// Value text
    pub value: String,
    /// Type id of the converter
    pub converter_type_id: i16,
}

impl RecordCodec for PropertyWithConverterRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let mut record = PropertyWithConverterRecord::default();
        record.read_into(parser)?;
        Ok(record)
    }

    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        self.attribute_id = parser.read_le::<i16>()?;
        parser.read_prefixed_string_utf8_into(&mut self.value)?;
        self.converter_type_id = parser.read_le::<i16>()?;
        Ok(())
    }

    fn copy_into(&self, target: &mut Self) {
        target.attribute_id = self.attribute_id;
        target.value.clone_from(&self.value);
        target.converter_type_id = self.converter_type_id;
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)?;
        out.write_prefixed_string(&self.value)?;
        out.write_le(self.converter_type_id)
    }
}

/// Property set from a static resource collected earlier in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyWithStaticResourceIdRecord {
    /// Attribute id of the property
    pub attribute_id: i16,
    /// Index of the static resource
    pub static_resource_id: i16,
}

impl RecordCodec for PropertyWithStaticResourceIdRecord {
    const FIXED_SIZE: Option<usize> = Some(4);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(PropertyWithStaticResourceIdRecord {
            attribute_id: parser.read_le::<i16>()?,
            static_resource_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)?;
        out.write_le(self.static_resource_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted_property() {
        let data = [
            0xFF, 0xFF, // attribute_id
            0x04, b'A', b'u', b't', b'o', // value
        ];

        let mut parser = Parser::new(&data);
        let record = PropertyRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.attribute_id, -1);
        assert_eq!(record.value, "Auto");

        let mut out = Vec::new();
        record.write_data(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn crafted_property_custom() {
        let data = [
            0x05, 0x00, // attribute_id
            0x89, 0x40, // serializer_type_id | 0x4000
            0xDE, 0xAD, 0xBE, 0xEF, // value
        ];

        let mut parser = Parser::new(&data);
        let record = PropertyCustomRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.attribute_id, 5);
        assert_eq!(record.serializer_type_id, 0x89);
        assert!(record.is_value_type_id);
        assert_eq!(record.value, [0xDE, 0xAD, 0xBE, 0xEF]);

        let mut out = Vec::new();
        record.write_data(&mut out).unwrap();
        assert_eq!(out, data);

        let plain = PropertyCustomRecord::read_data(&mut Parser::new(&[0x05, 0x00, 0x89, 0x00]))
            .unwrap();
        assert!(!plain.is_value_type_id);
        assert!(plain.value.is_empty());
    }

    #[test]
    fn crafted_property_with_extension() {
        let data = [
            0x10, 0x00, // attribute_id
            0xBD, 0x62, // 0x02BD | type | static
            0xFD, 0xFF, // value_id
        ];

        let mut parser = Parser::new(&data);
        let record = PropertyWithExtensionRecord::read_data(&mut parser).unwrap();
        assert_eq!(record.attribute_id, 16);
        assert_eq!(record.extension_type_id, 0x02BD);
        assert!(record.is_value_type_extension);
        assert!(record.is_value_static_extension);
        assert_eq!(record.value_id, -3);

        let mut out = Vec::new();
        record.write_data(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn crafted_property_with_converter() {
        let data = [
            0x02, 0x00, // attribute_id
            0x03, b'1', b',', b'2', // value
            0x9C, 0xFF, // converter_type_id
        ];

        let record = PropertyWithConverterRecord::read_data(&mut Parser::new(&data)).unwrap();
        assert_eq!(record.value, "1,2");
        assert_eq!(record.converter_type_id, -100);

        assert!(PropertyWithConverterRecord::read_data(&mut Parser::new(&data[..6])).is_err());
    }
}
