//! Element records and the dictionary key records derived from them.
//!
//! The element-start payload (`type_id`, flag byte) is shared by `ElementStart`,
//! `StaticResourceStart`, `NamedElementStart` and, extended with a [`DictionaryKey`], by
//! `KeyElementStart` and `DefAttributeKeyType`. The same chain fixes the flag-word layout:
//!
//! | Section | Bits |
//! |---|---|
//! | pin count | 0-1 |
//! | type id, low byte | 2-9 |
//! | type id, high byte | 10-17 |
//! | create using type converter | 18 |
//! | injected | 19 |
//! | shared (key records) | 20 |
//! | shared set (key records) | 21 |

use std::io::Write;

use bitflags::bitflags;

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
    TYPE_ID_LOW = 0xFF;
    TYPE_ID_HIGH = 0xFF;
    USE_TYPE_CONVERTER = 1;
    IS_INJECTED = 1;
}

flag_sections! {
    after IS_INJECTED;
    KEY_SHARED = 1;
    KEY_SHARED_SET = 1;
}

flag_sections! {
    after PIN_SECTION;
    STRING_KEY_SHARED = 1;
    STRING_KEY_SHARED_SET = 1;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Flag byte of the element-start payload
    pub struct ElementFlags: u8 {
        /// The element is created from text through its type converter
        const CREATE_USING_TYPE_CONVERTER = 0x01;
        /// The element was injected by the compiler, not written in markup
        const INJECTED = 0x02;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Flag byte of `OptimizedStaticResource`
    pub struct OptimizedStaticResourceFlags: u8 {
        /// `value_id` is a type id (`{x:Type}`)
        const TYPE_EXTENSION = 0x01;
        /// `value_id` is a member id (`{x:Static}`)
        const STATIC_EXTENSION = 0x02;
    }
}

/// Start of an object element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStartRecord {
    /// Type of the element, negative for known types
    pub type_id: i16,
    /// The element is created from text through its type converter
    pub create_using_type_converter: bool,
    /// The element was injected by the compiler
    pub is_injected: bool,
}

impl ElementStartRecord {
    fn flags(&self) -> ElementFlags {
        let mut flags = ElementFlags::empty();
        flags.set(
            ElementFlags::CREATE_USING_TYPE_CONVERTER,
            self.create_using_type_converter,
        );
        flags.set(ElementFlags::INJECTED, self.is_injected);
        flags
    }
}

impl RecordCodec for ElementStartRecord {
    const FIXED_SIZE: Option<usize> = Some(3);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let type_id = parser.read_le::<i16>()?;
        let flags = ElementFlags::from_bits_truncate(parser.read_le::<u8>()?);

        Ok(ElementStartRecord {
            type_id,
            create_using_type_converter: flags.contains(ElementFlags::CREATE_USING_TYPE_CONVERTER),
            is_injected: flags.contains(ElementFlags::INJECTED),
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.type_id)?;
        out.write_le(self.flags().bits())
    }

    fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
        let mut word = base;
        word.set_split_id(TYPE_ID_LOW, TYPE_ID_HIGH, self.type_id);
        word.set_bool(USE_TYPE_CONVERTER, self.create_using_type_converter);
        word.set_bool(IS_INJECTED, self.is_injected);
        word
    }

    fn unpack_flags(&mut self, word: BitFlagsWord) {
        self.type_id = word.get_split_id(TYPE_ID_LOW, TYPE_ID_HIGH);
        self.create_using_type_converter = word.get_bool(USE_TYPE_CONVERTER);
        self.is_injected = word.get_bool(IS_INJECTED);
    }
}

/// Element start that also names the element.
///
/// The runtime name is only carried in memory between the writer front-end and the object
/// builder; on the wire the record is a plain element start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedElementStartRecord {
    /// The element-start payload
    pub element: ElementStartRecord,
    /// `x:Name` of the element, never serialized
    pub runtime_name: Option<String>,
}

impl RecordCodec for NamedElementStartRecord {
    const FIXED_SIZE: Option<usize> = Some(3);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(NamedElementStartRecord {
            element: ElementStartRecord::read_data(parser)?,
            runtime_name: None,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.element.write_data(out)
    }

    fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
        self.element.pack_flags(base)
    }

    fn unpack_flags(&mut self, word: BitFlagsWord) {
        self.element.unpack_flags(word);
    }
}

/// Key part of a deferred dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryKey {
    /// Offset of the value relative to the start of the deferred content, `-1` until patched
    pub value_position: i32,
    /// The value is shared between lookups
    pub shared: bool,
    /// `shared` was set explicitly in markup
    pub shared_set: bool,
}

impl Default for DictionaryKey {
    fn default() -> Self {
        DictionaryKey {
            value_position: -1,
            shared: false,
            shared_set: false,
        }
    }
}

impl DictionaryKey {
    fn read(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(DictionaryKey {
            value_position: parser.read_le::<i32>()?,
            shared: parser.read_bool()?,
            shared_set: parser.read_bool()?,
        })
    }

    fn write<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.value_position)?;
        out.write_bool(self.shared)?;
        out.write_bool(self.shared_set)
    }
}

/// Key of a deferred dictionary entry given by a type (`DefAttributeKeyType`) or an element
/// (`KeyElementStart`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyElementStartRecord {
    /// The element-start payload of the key
    pub element: ElementStartRecord,
    /// Value position and sharing flags
    pub key: DictionaryKey,
}

impl KeyElementStartRecord {
    /// Offset of the value position field within the payload.
    pub const VALUE_POSITION_OFFSET: u64 = 3;
}

impl RecordCodec for KeyElementStartRecord {
    const FIXED_SIZE: Option<usize> = Some(9);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(KeyElementStartRecord {
            element: ElementStartRecord::read_data(parser)?,
            key: DictionaryKey::read(parser)?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.element.write_data(out)?;
        self.key.write(out)
    }

    fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
        let mut word = self.element.pack_flags(base);
        word.set_bool(KEY_SHARED, self.key.shared);
        word.set_bool(KEY_SHARED_SET, self.key.shared_set);
        word
    }

    fn unpack_flags(&mut self, word: BitFlagsWord) {
        self.element.unpack_flags(word);
        self.key.shared = word.get_bool(KEY_SHARED);
        self.key.shared_set = word.get_bool(KEY_SHARED_SET);
    }
}

/// Key of a deferred dictionary entry given by a string id (`x:Key="..."`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefAttributeKeyStringRecord {
    /// String id of the key
    pub value_id: i16,
    /// Value position and sharing flags
    pub key: DictionaryKey,
}

impl DefAttributeKeyStringRecord {
    /// Offset of the value position field within the payload.
    pub const VALUE_POSITION_OFFSET: u64 = 2;
}

impl RecordCodec for DefAttributeKeyStringRecord {
    const FIXED_SIZE: Option<usize> = None;

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(DefAttributeKeyStringRecord {
            value_id: parser.read_le::<i16>()?,
            key: DictionaryKey::read(parser)?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.value_id)?;
        self.key.write(out)
    }

    fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
        let mut word = base;
        word.set_bool(STRING_KEY_SHARED, self.key.shared);
        word.set_bool(STRING_KEY_SHARED_SET, self.key.shared_set);
        word
    }

    fn unpack_flags(&mut self, word: BitFlagsWord) {
        self.key.shared = word.get_bool(STRING_KEY_SHARED);
        self.key.shared_set = word.get_bool(STRING_KEY_SHARED_SET);
    }
}

/// Type of a constructor argument given as `{x:Type}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorParameterTypeRecord {
    /// Type id of the argument
    pub type_id: i16,
}

impl RecordCodec for ConstructorParameterTypeRecord {
    const FIXED_SIZE: Option<usize> = Some(2);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(ConstructorParameterTypeRecord {
            type_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.type_id)
    }
}

/// Reference to a static resource collected earlier in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticResourceIdRecord {
    /// Index of the static resource
    pub static_resource_id: i16,
}

impl RecordCodec for StaticResourceIdRecord {
    const FIXED_SIZE: Option<usize> = Some(2);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        Ok(StaticResourceIdRecord {
            static_resource_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        out.write_le(self.static_resource_id)
    }
}

/// `{StaticResource}` whose key is a string, a `{x:Type}` or a `{x:Static}` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizedStaticResourceRecord {
    /// `value_id` is a type id
    pub is_type_extension: bool,
    /// `value_id` is a member id
    pub is_static_extension: bool,
    /// String, type or attribute id of the key
    pub value_id: i16,
}

impl RecordCodec for OptimizedStaticResourceRecord {
    const FIXED_SIZE: Option<usize> = Some(3);

    fn read_data(parser: &mut Parser<'_>) -> Result<Self> {
        let flags = OptimizedStaticResourceFlags::from_bits_truncate(parser.read_le::<u8>()?);
        Ok(OptimizedStaticResourceRecord {
            is_type_extension: flags.contains(OptimizedStaticResourceFlags::TYPE_EXTENSION),
            is_static_extension: flags.contains(OptimizedStaticResourceFlags::STATIC_EXTENSION),
            value_id: parser.read_le::<i16>()?,
        })
    }

    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let mut flags = OptimizedStaticResourceFlags::empty();
        flags.set(
            OptimizedStaticResourceFlags::TYPE_EXTENSION,
            self.is_type_extension,
        );
        flags.set(
            OptimizedStaticResourceFlags::STATIC_EXTENSION,
            self.is_static_extension,
        );
        out.write_le(flags.bits())?;
        out.write_le(self.value_id)
    }
}
