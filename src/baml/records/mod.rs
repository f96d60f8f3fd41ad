//! BAML records and their binary codec.
//!
//! A BAML stream is a sequence of records, each encoded as a one-byte [`RecordType`] tag followed
//! by the record payload. Two size families exist:
//!
//! - **Fixed-size** kinds carry a payload of a constant size and no length prefix:
//!   `[tag][payload]`.
//! - **Variable-size** kinds carry a 7-bit encoded size before the payload:
//!   `[tag][size][payload]`. The size counts the bytes of the size field itself plus the payload
//!   (see [`crate::baml::varint::variable_record_size`]).
//!
//! Every payload type implements [`RecordCodec`]; [`RecordData`] is the closed set of decoded
//! payloads, and [`Record`] pairs a payload with its [`BitFlagsWord`] header (pin count plus the
//! packed flag sections of the kind).
//!
//! # Key Components
//!
//! - [`RecordType`] - On-wire tags, including the legacy tags that are rejected while reading
//! - [`RecordCodec`] - Per-kind payload decoding and encoding
//! - [`RecordData`] / [`Record`] - Decoded records
//! - [`read_record_of`] - Decode the record that follows an already consumed tag
//!
//! # Examples
//!
//! ```rust
//! use bamlscope::baml::records::{Record, RecordData, PropertyRecord, RecordType};
//!
//! let record = Record::new(RecordData::Property(PropertyRecord {
//!     attribute_id: 3,
//!     value: "Hello".to_string(),
//! }));
//! assert_eq!(record.record_type(), RecordType::Property);
//! // tag, size, attribute id, string length, string bytes
//! assert_eq!(record.encoded_len()?, 1 + 1 + 2 + 1 + 5);
//! # Ok::<(), bamlscope::Error>(())
//! ```

mod document;
mod element;
mod info;
mod property;
mod text;

pub use document::{
    ConnectionIdRecord, DeferableContentStartRecord, DocumentStartRecord,
    LineNumberAndPositionRecord, LinePositionRecord,
};
pub use element::{
    ConstructorParameterTypeRecord, DefAttributeKeyStringRecord, DictionaryKey, ElementFlags,
    ElementStartRecord, KeyElementStartRecord, NamedElementStartRecord,
    OptimizedStaticResourceFlags, OptimizedStaticResourceRecord, StaticResourceIdRecord,
};
pub use info::{
    AssemblyInfoRecord, AttributeInfoRecord, AttributeUsage, PIMappingRecord, StringInfoRecord,
    TypeInfoFlags, TypeInfoRecord, TypeSerializerInfoRecord, XmlnsPropertyRecord,
};
pub use property::{
    ContentPropertyRecord, PropertyComplexStartRecord, PropertyCustomRecord, PropertyRecord,
    PropertyStringReferenceRecord, PropertyTypeReferenceRecord, PropertyWithConverterRecord,
    PropertyWithExtensionRecord, PropertyWithStaticResourceIdRecord,
};
pub use text::{
    DefAttributeRecord, LiteralContentRecord, TextRecord, TextWithConverterRecord,
    TextWithIdRecord,
};

use std::{fmt, io::Write};

use strum::{EnumCount, EnumIter, FromRepr, IntoStaticStr};

use crate::{
    baml::{
        cache::RecordCache,
        flags::{BitFlagsWord, PIN_SECTION},
        varint::variable_record_size,
    },
    file::parser::Parser,
    Error, Result,
};

/// On-wire record tags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    FromRepr,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum RecordType {
    Unknown = 0,
    DocumentStart = 1,
    DocumentEnd = 2,
    ElementStart = 3,
    ElementEnd = 4,
    Property = 5,
    PropertyCustom = 6,
    PropertyComplexStart = 7,
    PropertyComplexEnd = 8,
    PropertyArrayStart = 9,
    PropertyArrayEnd = 10,
    PropertyIListStart = 11,
    PropertyIListEnd = 12,
    PropertyIDictionaryStart = 13,
    PropertyIDictionaryEnd = 14,
    LiteralContent = 15,
    Text = 16,
    TextWithConverter = 17,
    RoutedEvent = 18,
    ClrEvent = 19,
    XmlnsProperty = 20,
    XmlAttribute = 21,
    ProcessingInstruction = 22,
    Comment = 23,
    DefTag = 24,
    DefAttribute = 25,
    EndAttributes = 26,
    PIMapping = 27,
    AssemblyInfo = 28,
    TypeInfo = 29,
    TypeSerializerInfo = 30,
    AttributeInfo = 31,
    StringInfo = 32,
    PropertyStringReference = 33,
    PropertyTypeReference = 34,
    PropertyWithExtension = 35,
    PropertyWithConverter = 36,
    DeferableContentStart = 37,
    DefAttributeKeyString = 38,
    DefAttributeKeyType = 39,
    KeyElementStart = 40,
    KeyElementEnd = 41,
    ConstructorParametersStart = 42,
    ConstructorParametersEnd = 43,
    ConstructorParameterType = 44,
    ConnectionId = 45,
    ContentProperty = 46,
    NamedElementStart = 47,
    StaticResourceStart = 48,
    StaticResourceEnd = 49,
    StaticResourceId = 50,
    TextWithId = 51,
    PresentationOptionsAttribute = 52,
    LineNumberAndPosition = 53,
    LinePosition = 54,
    OptimizedStaticResource = 55,
    PropertyWithStaticResourceId = 56,
}

impl RecordType {
    /// Decode a tag byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for tags past the last known kind.
    pub fn from_tag(tag: u8) -> Result<Self> {
        RecordType::from_repr(tag).ok_or_else(|| malformed_error!("Unknown record tag - {}", tag))
    }

    /// The tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Kinds that older formats produced and this codec rejects.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(
            self,
            RecordType::Unknown
                | RecordType::ClrEvent
                | RecordType::XmlAttribute
                | RecordType::ProcessingInstruction
                | RecordType::Comment
                | RecordType::DefTag
                | RecordType::EndAttributes
        )
    }

    /// `true` for kinds encoded with a size prefix.
    #[must_use]
    pub const fn is_variable_size(self) -> bool {
        !self.is_legacy() && self.fixed_size().is_none()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &'static str = (*self).into();
        f.write_str(name)
    }
}

/// Binary contract of a record payload.
///
/// `read_data` receives a parser bounded to exactly the payload bytes of one record, so kinds
/// with a trailing blob (such as [`PropertyCustomRecord`]) consume whatever remains.
pub trait RecordCodec: Sized + Clone {
    /// Payload size of fixed-size kinds, `None` for variable-size kinds.
    const FIXED_SIZE: Option<usize>;

    /// Decode the payload.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] or [`crate::Error::Malformed`] for damaged payloads.
    fn read_data(parser: &mut Parser<'_>) -> Result<Self>;

    /// Decode the payload into `self`, reusing its allocations where the kind has any.
    ///
    /// On error `self` holds a partially decoded payload.
    ///
    /// # Errors
    /// See [`RecordCodec::read_data`].
    fn read_into(&mut self, parser: &mut Parser<'_>) -> Result<()> {
        *self = Self::read_data(parser)?;
        Ok(())
    }

    /// Encode the payload, without tag or size prefix.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the sink fails.
    fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()>;

    /// Copy every field of `self` into `target`, reusing its allocations.
    fn copy_into(&self, target: &mut Self) {
        target.clone_from(self);
    }

    /// Packs the flag sections of the kind into `base`. Kinds without sections return `base`.
    fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
        base
    }

    /// Restores the fields held in flag sections from `word`.
    fn unpack_flags(&mut self, _word: BitFlagsWord) {}
}

macro_rules! record_data {
    (
        payload { $($kind:ident($record:ty),)* }
        marker { $($marker:ident,)* }
    ) => {
        /// Decoded payload of a record, one variant per supported [`RecordType`].
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum RecordData {
            $(
                #[doc = concat!("Payload of a `", stringify!($kind), "` record")]
                $kind($record),
            )*
            $(
                #[doc = concat!("`", stringify!($marker), "` marker, no payload")]
                $marker,
            )*
        }

        impl RecordData {
            /// The tag this payload is written with.
            #[must_use]
            pub fn record_type(&self) -> RecordType {
                match self {
                    $(RecordData::$kind(_) => RecordType::$kind,)*
                    $(RecordData::$marker => RecordType::$marker,)*
                }
            }

            /// A default-initialised payload of the given kind.
            ///
            /// # Errors
            /// Returns [`crate::Error::NotSupported`] for legacy kinds.
            pub fn empty(record_type: RecordType) -> Result<Self> {
                match record_type {
                    $(RecordType::$kind => Ok(RecordData::$kind(<$record>::default())),)*
                    $(RecordType::$marker => Ok(RecordData::$marker),)*
                    legacy => Err(Error::NotSupported(legacy.tag())),
                }
            }

            /// Decode a payload of `record_type` into `self`. Buffers of `self` are reused when
            /// it already holds a payload of that kind.
            pub(crate) fn read_into(
                &mut self,
                record_type: RecordType,
                parser: &mut Parser<'_>,
            ) -> Result<()> {
                if self.record_type() != record_type {
                    *self = RecordData::empty(record_type)?;
                }
                match self {
                    $(RecordData::$kind(record) => record.read_into(parser),)*
                    $(RecordData::$marker => Ok(()),)*
                }
            }

            /// Encode the payload, without tag or size prefix.
            ///
            /// # Errors
            /// Returns [`crate::Error::FileError`] if the sink fails.
            pub fn write_data<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
                match self {
                    $(RecordData::$kind(record) => record.write_data(out),)*
                    $(RecordData::$marker => Ok(()),)*
                }
            }

            /// Copy the payload into `target`, which must be of the same kind.
            ///
            /// # Errors
            /// Returns [`crate::Error::InvalidOperation`] if the kinds differ.
            pub fn copy_into(&self, target: &mut RecordData) -> Result<()> {
                match (self, target) {
                    $((RecordData::$kind(source), RecordData::$kind(target)) => {
                        source.copy_into(target);
                        Ok(())
                    })*
                    (source, target) if source.record_type() == target.record_type() => Ok(()),
                    (source, target) => Err(invalid_operation!(
                        "Cannot copy a {} record into a {} record",
                        source.record_type(),
                        target.record_type()
                    )),
                }
            }

            /// Packs the flag sections of the payload into `base`.
            #[must_use]
            pub fn pack_flags(&self, base: BitFlagsWord) -> BitFlagsWord {
                match self {
                    $(RecordData::$kind(record) => record.pack_flags(base),)*
                    $(RecordData::$marker => base,)*
                }
            }

            /// Restores the payload fields held in flag sections from `word`.
            pub fn unpack_flags(&mut self, word: BitFlagsWord) {
                match self {
                    $(RecordData::$kind(record) => record.unpack_flags(word),)*
                    $(RecordData::$marker => {})*
                }
            }
        }

        impl RecordType {
            /// Payload size of fixed-size kinds, `None` for variable-size and legacy kinds.
            #[must_use]
            pub const fn fixed_size(self) -> Option<usize> {
                match self {
                    $(RecordType::$kind => <$record as RecordCodec>::FIXED_SIZE,)*
                    $(RecordType::$marker => Some(0),)*
                    _ => None,
                }
            }
        }
    };
}

record_data! {
    payload {
        DocumentStart(DocumentStartRecord),
        ElementStart(ElementStartRecord),
        Property(PropertyRecord),
        PropertyCustom(PropertyCustomRecord),
        PropertyComplexStart(PropertyComplexStartRecord),
        PropertyArrayStart(PropertyComplexStartRecord),
        PropertyIListStart(PropertyComplexStartRecord),
        PropertyIDictionaryStart(PropertyComplexStartRecord),
        LiteralContent(LiteralContentRecord),
        Text(TextRecord),
        TextWithConverter(TextWithConverterRecord),
        RoutedEvent(PropertyRecord),
        XmlnsProperty(XmlnsPropertyRecord),
        DefAttribute(DefAttributeRecord),
        PIMapping(PIMappingRecord),
        AssemblyInfo(AssemblyInfoRecord),
        TypeInfo(TypeInfoRecord),
        TypeSerializerInfo(TypeSerializerInfoRecord),
        AttributeInfo(AttributeInfoRecord),
        StringInfo(StringInfoRecord),
        PropertyStringReference(PropertyStringReferenceRecord),
        PropertyTypeReference(PropertyTypeReferenceRecord),
        PropertyWithExtension(PropertyWithExtensionRecord),
        PropertyWithConverter(PropertyWithConverterRecord),
        DeferableContentStart(DeferableContentStartRecord),
        DefAttributeKeyString(DefAttributeKeyStringRecord),
        DefAttributeKeyType(KeyElementStartRecord),
        KeyElementStart(KeyElementStartRecord),
        ConstructorParameterType(ConstructorParameterTypeRecord),
        ConnectionId(ConnectionIdRecord),
        ContentProperty(ContentPropertyRecord),
        NamedElementStart(NamedElementStartRecord),
        StaticResourceStart(ElementStartRecord),
        StaticResourceId(StaticResourceIdRecord),
        TextWithId(TextWithIdRecord),
        PresentationOptionsAttribute(DefAttributeRecord),
        LineNumberAndPosition(LineNumberAndPositionRecord),
        LinePosition(LinePositionRecord),
        OptimizedStaticResource(OptimizedStaticResourceRecord),
        PropertyWithStaticResourceId(PropertyWithStaticResourceIdRecord),
    }
    marker {
        DocumentEnd,
        ElementEnd,
        PropertyComplexEnd,
        PropertyArrayEnd,
        PropertyIListEnd,
        PropertyIDictionaryEnd,
        KeyElementEnd,
        ConstructorParametersStart,
        ConstructorParametersEnd,
        StaticResourceEnd,
    }
}

/// A decoded record: payload plus the flags word that carries the pin count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    flags: BitFlagsWord,
    /// The decoded payload
    pub data: RecordData,
}

impl Record {
    /// Wrap a payload in a record with a clear header.
    #[must_use]
    pub fn new(data: RecordData) -> Self {
        Record {
            flags: BitFlagsWord::default(),
            data,
        }
    }

    /// A record of the given kind with a default payload.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for legacy kinds.
    pub fn empty(record_type: RecordType) -> Result<Self> {
        Ok(Record::new(RecordData::empty(record_type)?))
    }

    /// The kind of the record.
    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Number of outstanding pins, 0 to 3.
    #[must_use]
    pub fn pin_count(&self) -> u32 {
        self.flags.pin_count()
    }

    pub(crate) fn set_pin_count(&mut self, count: u32) {
        self.flags.set(PIN_SECTION, count);
    }

    /// The header word with the flag sections of the payload packed in.
    #[must_use]
    pub fn flags(&self) -> BitFlagsWord {
        self.data.pack_flags(self.flags)
    }

    /// Payload size of fixed kinds.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        self.record_type().fixed_size()
    }

    /// Length of the encoded payload, measured by encoding it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the payload does not fit in a 32-bit size.
    pub fn payload_len(&self) -> Result<usize> {
        if let Some(size) = self.fixed_size() {
            return Ok(size);
        }

        let mut buffer = Vec::new();
        self.data.write_data(&mut buffer)?;
        Ok(buffer.len())
    }

    /// Size as declared on the wire: the payload size of fixed kinds, the size prefix value
    /// (prefix width plus payload) of variable kinds.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the payload does not fit in a 32-bit size.
    pub fn record_size(&self) -> Result<usize> {
        Ok(self.encoded_len()? - 1)
    }

    /// Total number of bytes the record occupies on the wire, tag included.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the payload does not fit in a 32-bit size.
    pub fn encoded_len(&self) -> Result<usize> {
        let payload = self.payload_len()?;
        if self.fixed_size().is_some() {
            return Ok(1 + payload);
        }

        let Ok(payload) = u32::try_from(payload) else {
            return Err(malformed_error!("Record payload too large - {} bytes", payload));
        };
        Ok(1 + variable_record_size(payload) as usize)
    }

    /// Encode tag, size prefix and payload into a buffer.
    ///
    /// The stream writer measures variable payloads with two passes over a seekable sink; this
    /// variant measures in memory and is used where no seekable sink is involved.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the payload does not fit in a 32-bit size.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut payload = Vec::new();
        self.data.write_data(&mut payload)?;

        let mut out = Vec::with_capacity(payload.len() + 6);
        out.push(self.record_type().tag());
        if self.fixed_size().is_none() {
            let Ok(length) = u32::try_from(payload.len()) else {
                return Err(malformed_error!(
                    "Record payload too large - {} bytes",
                    payload.len()
                ));
            };
            crate::baml::varint::write_7bit_encoded_int(variable_record_size(length), &mut out);
        }
        out.extend_from_slice(&payload);
        Ok(out)
    }

    /// Copy the payload into `target`, leaving its header (and pin count) untouched.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidOperation`] if the kinds differ.
    pub fn copy_into(&self, target: &mut Record) -> Result<()> {
        self.data.copy_into(&mut target.data)
    }
}

/// Copy of `record` with a fresh header: same payload, not pinned.
#[must_use]
pub fn clone_record(record: &Record) -> Record {
    Record::new(record.data.clone())
}

/// Decode the record whose tag has already been consumed.
///
/// `bytes_available` is the number of bytes after the tag that may be consumed. If the record is
/// not complete within that budget, `Ok(None)` is returned and the parser position is unchanged,
/// so the caller can retry once more bytes have arrived.
///
/// # Errors
/// - [`crate::Error::NotSupported`] for legacy kinds
/// - [`crate::Error::Malformed`] / [`crate::Error::OutOfBounds`] for damaged payloads
pub fn read_record_of(
    parser: &mut Parser<'_>,
    bytes_available: usize,
    record_type: RecordType,
    cache: &mut RecordCache,
) -> Result<Option<Record>> {
    read_record_checked(parser, bytes_available, record_type, cache, false)
}

/// [`read_record_of`], optionally rejecting variable payloads with unread trailing bytes.
pub(crate) fn read_record_checked(
    parser: &mut Parser<'_>,
    bytes_available: usize,
    record_type: RecordType,
    cache: &mut RecordCache,
    verify_trailing: bool,
) -> Result<Option<Record>> {
    if record_type.is_legacy() {
        return Err(Error::NotSupported(record_type.tag()));
    }

    let start = parser.pos();
    let available = bytes_available.min(parser.remaining());

    let mut payload = match record_type.fixed_size() {
        Some(size) => {
            if available < size {
                return Ok(None);
            }
            parser.sub_parser(size)?
        }
        None => {
            let mut prefix = Parser::new(&parser.data()[start..start + available]);
            let size = match prefix.read_7bit_encoded_int() {
                Ok(size) => size as usize,
                Err(Error::OutOfBounds { .. }) => return Ok(None),
                Err(error) => return Err(error),
            };
            let width = prefix.pos();

            let Some(payload_len) = size.checked_sub(width) else {
                return Err(malformed_error!(
                    "{} record size {} is smaller than its own size field",
                    record_type,
                    size
                ));
            };
            if available < size {
                return Ok(None);
            }

            parser.advance_by(width)?;
            parser.sub_parser(payload_len)?
        }
    };

    let mut record = cache.acquire(record_type)?;
    if let Err(error) = record.data.read_into(record_type, &mut payload) {
        cache.release(record);
        return Err(error);
    }
    if payload.has_more_data() {
        if verify_trailing {
            let unread = payload.remaining();
            cache.release(record);
            return Err(malformed_error!(
                "{} record has {} unread payload bytes",
                record_type,
                unread
            ));
        }
        log::warn!(
            "Skipping {} trailing bytes of {} record at offset {}",
            payload.remaining(),
            record_type,
            start
        );
    }
    log::trace!("Read {} record at offset {}", record_type, start);

    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn legacy_tags() {
        let legacy: Vec<u8> = RecordType::iter()
            .filter(|kind| kind.is_legacy())
            .map(RecordType::tag)
            .collect();
        assert_eq!(legacy, [0, 19, 21, 22, 23, 24, 26]);

        let mut cache = RecordCache::new();
        let mut parser = Parser::new(&[0x00, 0x00]);
        assert!(matches!(
            read_record_of(&mut parser, 2, RecordType::Comment, &mut cache),
            Err(Error::NotSupported(23))
        ));
    }

    #[test]
    fn tags_round_trip() {
        assert_eq!(RecordType::COUNT, 57);
        for kind in RecordType::iter() {
            assert_eq!(RecordType::from_tag(kind.tag()).unwrap(), kind);
            if !kind.is_legacy() {
                assert_eq!(RecordData::empty(kind).unwrap().record_type(), kind);
            }
        }
        assert!(matches!(
            RecordType::from_tag(57),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn fixed_sizes() {
        let expected = [
            (RecordType::DocumentStart, 6),
            (RecordType::ElementStart, 3),
            (RecordType::PropertyComplexStart, 2),
            (RecordType::PropertyStringReference, 4),
            (RecordType::PropertyWithExtension, 6),
            (RecordType::DeferableContentStart, 4),
            (RecordType::DefAttributeKeyType, 9),
            (RecordType::KeyElementStart, 9),
            (RecordType::ConnectionId, 4),
            (RecordType::NamedElementStart, 3),
            (RecordType::LineNumberAndPosition, 8),
            (RecordType::LinePosition, 4),
            (RecordType::OptimizedStaticResource, 3),
            (RecordType::DocumentEnd, 0),
            (RecordType::KeyElementEnd, 0),
        ];
        for (kind, size) in expected {
            assert_eq!(kind.fixed_size(), Some(size), "{kind}");
        }

        for kind in [
            RecordType::Property,
            RecordType::PropertyCustom,
            RecordType::AssemblyInfo,
            RecordType::TypeInfo,
            RecordType::DefAttributeKeyString,
            RecordType::TextWithId,
            RecordType::XmlnsProperty,
        ] {
            assert!(kind.is_variable_size(), "{kind}");
        }
        assert!(!RecordType::ClrEvent.is_variable_size());
    }

    #[test]
    fn truncated_returns_none() {
        let record = Record::new(RecordData::Text(TextRecord {
            value: "x".repeat(200),
        }));
        let bytes = record.to_bytes().unwrap();
        let mut cache = RecordCache::new();

        for cut in [1, 2, 3, 100, bytes.len() - 1] {
            let mut parser = Parser::new(&bytes[1..cut]);
            let result = read_record_of(&mut parser, cut - 1, RecordType::Text, &mut cache).unwrap();
            assert!(result.is_none(), "cut {cut}");
            assert_eq!(parser.pos(), 0);
        }

        // budget smaller than the data also counts as truncated
        let mut parser = Parser::new(&bytes[1..]);
        assert!(read_record_of(&mut parser, 10, RecordType::Text, &mut cache)
            .unwrap()
            .is_none());

        let read = read_record_of(&mut parser, bytes.len() - 1, RecordType::Text, &mut cache)
            .unwrap()
            .unwrap();
        assert_eq!(read, record);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn size_smaller_than_field() {
        let mut cache = RecordCache::new();
        let mut parser = Parser::new(&[0x80, 0x00, 0x00]);
        assert!(matches!(
            read_record_of(&mut parser, 3, RecordType::Text, &mut cache),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn over_long_size_prefix() {
        let mut cache = RecordCache::new();

        // size 4 spelled in two bytes: prefix, string length, "a"
        let mut parser = Parser::new(&[0x84, 0x00, 0x01, b'a']);
        let record = read_record_of(&mut parser, 4, RecordType::Text, &mut cache)
            .unwrap()
            .unwrap();
        assert_eq!(
            record.data,
            RecordData::Text(TextRecord {
                value: "a".to_string()
            })
        );
        assert_eq!(parser.pos(), 4);

        let mut parser = Parser::new(&[0x83, 0x00, 0x00]);
        let record = read_record_of(&mut parser, 3, RecordType::Text, &mut cache)
            .unwrap()
            .unwrap();
        assert_eq!(record.data, RecordData::Text(TextRecord::default()));

        // five continuation bytes overflow 32 bits
        let mut parser = Parser::new(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x00]);
        assert!(matches!(
            read_record_of(&mut parser, 6, RecordType::Text, &mut cache),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn read_reuses_released_buffers() {
        let mut cache = RecordCache::new();
        let long = Record::new(RecordData::Property(PropertyRecord {
            attribute_id: 1,
            value: "x".repeat(300),
        }))
        .to_bytes()
        .unwrap();
        let short = Record::new(RecordData::Property(PropertyRecord {
            attribute_id: 2,
            value: "short".to_string(),
        }))
        .to_bytes()
        .unwrap();

        let mut parser = Parser::new(&long[1..]);
        let first = read_record_of(&mut parser, long.len() - 1, RecordType::Property, &mut cache)
            .unwrap()
            .unwrap();
        let RecordData::Property(property) = &first.data else {
            panic!("expected a property, got {:?}", first.data);
        };
        let (buffer, capacity) = (property.value.as_ptr(), property.value.capacity());
        assert!(cache.release(first));

        let mut parser = Parser::new(&short[1..]);
        let second = read_record_of(&mut parser, short.len() - 1, RecordType::Property, &mut cache)
            .unwrap()
            .unwrap();
        let RecordData::Property(property) = &second.data else {
            panic!("expected a property, got {:?}", second.data);
        };
        assert_eq!(property.attribute_id, 2);
        assert_eq!(property.value, "short");
        assert_eq!(property.value.as_ptr(), buffer);
        assert_eq!(property.value.capacity(), capacity);
    }

    #[test]
    fn failed_read_keeps_the_slot() {
        let mut cache = RecordCache::new();
        // string length runs past the payload
        let mut parser = Parser::new(&[0x04, 0x00, 0x00, 0x09]);
        assert!(read_record_of(&mut parser, 4, RecordType::Property, &mut cache).is_err());
        assert_eq!(cache.cached(), 1);
    }

    #[test]
    fn trailing_bytes() {
        // StringInfo: size 6, id 1, "ab", one extra byte
        let data = [0x06, 0x01, 0x00, 0x02, b'a', b'b', 0xEE];
        let mut cache = RecordCache::new();

        let mut parser = Parser::new(&data[..6]);
        let mut padded = data.to_vec();
        padded[0] = 0x07;
        let mut parser_padded = Parser::new(&padded);

        let plain = read_record_of(&mut parser, 6, RecordType::StringInfo, &mut cache)
            .unwrap()
            .unwrap();
        let lenient = read_record_of(&mut parser_padded, 7, RecordType::StringInfo, &mut cache)
            .unwrap()
            .unwrap();
        assert_eq!(plain.data, lenient.data);
        assert_eq!(parser_padded.pos(), 7);

        let mut parser_strict = Parser::new(&padded);
        assert!(matches!(
            read_record_checked(&mut parser_strict, 7, RecordType::StringInfo, &mut cache, true),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn copy_into_requires_same_kind() {
        let source = Record::new(RecordData::Text(TextRecord {
            value: "abc".to_string(),
        }));
        let mut target = Record::empty(RecordType::Text).unwrap();
        target.set_pin_count(2);
        source.copy_into(&mut target).unwrap();
        assert_eq!(target.data, source.data);
        assert_eq!(target.pin_count(), 2);

        let mut other = Record::empty(RecordType::ElementEnd).unwrap();
        assert!(matches!(
            source.copy_into(&mut other),
            Err(Error::InvalidOperation(_))
        ));

        let marker = Record::empty(RecordType::ElementEnd).unwrap();
        marker.copy_into(&mut other).unwrap();

        let cloned = clone_record(&target);
        assert_eq!(cloned.pin_count(), 0);
        assert_eq!(cloned.data, target.data);
    }
}
