//! Records that define map-table entries and namespace mappings.
//!
//! `AssemblyInfo`, `TypeInfo`, `TypeSerializerInfo`, `AttributeInfo` and `StringInfo` each
//! define one entry of the identifier tables, and must appear before the first record that
//! references their id. `PIMapping` and `XmlnsProperty` carry the XML namespace declarations of
//! the markup.

use std::io::Write;

use bitflags::bitflags;
use strum::{EnumIter, FromRepr, IntoStaticStr};

use crate::{
    baml::{
        flags::{BitFlagsWord, PIN_SECTION},
        records::RecordCodec,
    },
    file::{io::BinaryWrite, parser::Parser},
    Result,
};

flag_sections! {
    after PIN_SECTION;
    ASSEMBLY_ID_LOW = 0xFF;
    ASSEMBLY_ID_HIGH = 0xFF;
}

/// Bits of the `TypeInfo` assembly field that hold the assembly id.
const ASSEMBLY_ID_MASK: u16 = 0x0FFF;
/// Shift of the type flags within the `TypeInfo` assembly field.
const TYPE_FLAGS_SHIFT: u16 = 12;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Flags stored in the top nibble of the `TypeInfo` assembly field
    pub struct TypeInfoFlags: u8 {
        /// The type is not public
        const INTERNAL = 0x1;
        /// Reserved by the format
        const UNUSED_TWO = 0x2;
        /// Reserved by the format
        const UNUSED_THREE = 0x4;
    }
}

/// How an attribute is used by the object builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromRepr, EnumIter, IntoStaticStr)]
#[repr(u8)]
pub enum AttributeUsage {
    /// Regular property or event
    #[default]
    Default = 0,
    /// `xml:lang`
    XmlLang = 1,
    /// `xml:space`
    XmlSpace = 2,
    /// The property that holds the runtime name of an element (`x:Name`)
    RuntimeName = 3,
}

/// Defines an assembly id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyInfoRecord {
    /// Id of the new entry
    pub assembly_id: i16,
    /// Full display name of the assembly
    pub assembly_full_name: String,
}

impl RecordCodec for AssemblyInfoRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(AssemblyInfoRecord {
            assembly_id: parser.read_le::<i16>()?,
            assembly_full_name: parser.read_prefixed_string_utf8()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.assembly_id)?;
        out.write_prefixed_string(&self.assembly_full_name)
    }
}

/// Defines a type id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeInfoRecord {
    /// Id of the new entry
    pub type_id: i16,
    /// Assembly id of the defining assembly, 12 bits
    pub assembly_id: i16,
    /// Namespace-qualified type name
    pub type_full_name: String,
    /// Type flags
    pub flags: TypeInfoFlags,
}

impl TypeInfoRecord {
    /// `true` if the type is not public.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.flags.contains(TypeInfoFlags::INTERNAL)
    }
}

impl RecordCodec for TypeInfoRecord {
    const FIXED_SIZE: Option<usize> = None;

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let type_id = parser.read_le::<i16>()?;
        let assembly = parser.read_le::<u16>()?;

        Ok(TypeInfoRecord {
            type_id,
            assembly_id: (assembly & ASSEMBLY_ID_MASK) as i16,
            flags: TypeInfoFlags::from_bits_retain((assembly >> TYPE_FLAGS_SHIFT) as u8),
            type_full_name: parser.read_prefixed_string_utf8()?,
        })
    }

    #[allow(clippy::cast_sign_loss)]
    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        if self.assembly_id < 0 || self.assembly_id as u16 > ASSEMBLY_ID_MASK {
            return Err(malformed_error!(
                "Assembly id {} of type '{}' does not fit in 12 bits",
                self.assembly_id,
                self.type_full_name
            ));
        }

        let assembly =
            self.assembly_id as u16 | (u16::from(self.flags.bits() & 0x0F) << TYPE_FLAGS_SHIFT);
        out.write_le(self.type_id)?;
        out.write_le(assembly)?;
        out.write_prefixed_string(&self.type_full_name)
    }
}

/// Defines a type id whose values are written by a custom serializer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSerializerInfoRecord {
    /// The type definition
    pub type_info: TypeInfoRecord,
    /// Type id of the serializer
    pub serializer_type_id: i16,
}

impl RecordCodec for TypeSerializerInfoRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(TypeSerializerInfoRecord {
            type_info: TypeInfoRecord::read_data(parser)?,
            serializer_type_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.type_info.write_data(out)?;
        out.write_le(self.serializer_type_id)
    }
}

/// Defines an attribute (property or event) id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeInfoRecord {
    /// Id of the new entry
    pub attribute_id: i16,
    /// Type id of the declaring type
    pub owner_type_id: i16,
    /// How the attribute is used
    pub usage: AttributeUsage,
    /// Member name
    pub name: String,
}

impl RecordCodec for AttributeInfoRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let attribute_id = parser.read_le::<i16>()?;
        let owner_type_id = parser.read_le::<i16>()?;
        let usage = parser.read_le::<u8>()?;
        let Some(usage) = AttributeUsage::from_repr(usage) else {
            return Err(malformed_error!(
                "Invalid usage {} for attribute {}",
                usage,
                attribute_id
            ));
        };

        Ok(AttributeInfoRecord {
            attribute_id,
            owner_type_id,
            usage,
            name: parser.read_prefixed_string_utf8()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.attribute_id)?;
        out.write_le(self.owner_type_id)?;
        out.write_le(self.usage as u8)?;
        out.write_prefixed_string(&self.name)
    }
}

/// Defines a string id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringInfoRecord {
    /// Id of the new entry
    pub string_id: i16,
    /// The string
    pub value: String,
}

impl RecordCodec for StringInfoRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(StringInfoRecord {
            string_id: parser.read_le::<i16>()?,
            value: parser.read_prefixed_string_utf8()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.string_id)?;
        out.write_prefixed_string(&self.value)
    }
}

/// Maps an XML namespace onto a CLR namespace of an assembly (`<?Mapping?>` / `clr-namespace:`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PIMappingRecord {
    /// XML namespace URI
    pub xml_namespace: String,
    /// CLR namespace
    pub clr_namespace: String,
    /// Assembly id holding the namespace
    pub assembly_id: i16,
}

impl RecordCodec for PIMappingRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(PIMappingRecord {
            xml_namespace: parser.read_prefixed_string_utf8()?,
            clr_namespace: parser.read_prefixed_string_utf8()?,
            assembly_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_prefixed_string(&self.xml_namespace)?;
        out.write_prefixed_string(&self.clr_namespace)?;
        out.write_le(self.assembly_id)
    }

    fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
        let mut word = base;
        word.set_split_id(ASSEMBLY_ID_LOW, ASSEMBLY_ID_HIGH, self.assembly_id);
        word
    }

    fn unpack_flags(&mut self, word: BitFlagsWord) {
        self.assembly_id = word.get_split_id(ASSEMBLY_ID_LOW, ASSEMBLY_ID_HIGH);
    }
}

/// An `xmlns` declaration and the assemblies its namespace maps to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlnsPropertyRecord {
    /// Namespace prefix, empty for the default namespace
    pub prefix: String,
    /// XML namespace URI
    pub xml_namespace: String,
    /// Assembly ids that define types in the namespace
    pub assembly_ids: Vec<i16>,
}

impl RecordCodec for XmlnsPropertyRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let prefix = parser.read_prefixed_string_utf8()?;
        let xml_namespace = parser.read_prefixed_string_utf8()?;
        let count = parser.read_le::<u16>()?;
        parser.ensure_remaining(usize::from(count) * 2)?;

        let mut assembly_ids = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            assembly_ids.push(parser.read_le::<i16>()?);
        }

        Ok(XmlnsPropertyRecord {
            prefix,
            xml_namespace,
            assembly_ids,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let Ok(count) = u16::try_from(self.assembly_ids.len()) else {
            return Err(malformed_error!(
                "Too many assemblies for xmlns '{}' - {}",
                self.prefix,
                self.assembly_ids.len()
            ));
        };

        out.write_prefixed_string(&self.prefix)?;
        out.write_prefixed_string(&self.xml_namespace)?;
        out.write_le(count)?;
        for id in &self.assembly_ids {
            out.write_le(*id)?;
        }
        Ok(())
    }
}
