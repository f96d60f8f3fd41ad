//! Deferred content blocks and their dictionary key index.
//!
//! A resource dictionary is written as a deferred block so that a loader can look values up by
//! key without decoding the ones it does not need:
//!
//! ```text
//! DeferableContentStart(content_size)     <- size of everything below, back-patched
//! key 1 (value_position)                  <- offsets relative to the first byte after the header,
//! key 2 (value_position)                     back-patched when the value is started
//! ...
//! value 1 records
//! value 2 records
//! ...
//! ```
//!
//! Keys are `DefAttributeKeyString` (string id), `DefAttributeKeyType` (type id) or a
//! `KeyElementStart` ... `KeyElementEnd` run (the key is itself an element).
//!
//! # Writing
//!
//! [`BamlWriter::begin_deferred_content`] writes the header, every `write_key_*` call hands back
//! a [`KeyTicket`], and [`BamlWriter::begin_deferred_value`] redeems the ticket by patching the
//! key's value position with the current offset. [`BamlWriter::end_deferred_content`] patches
//! the block size and refuses to close a block that still has unpatched keys.
//!
//! # Reading
//!
//! [`DeferredSection`] walks `Unopened -> HeaderRead -> ScanningKeys`, then serves values on
//! demand ([`DeferredState::ValueMaterialized`]) until it is closed. A value's extent runs from
//! its position to the next higher value position of any key, or to the end of the block.

use std::{
    collections::{hash_map::Entry, HashMap},
    io::{Seek, Write},
    ops::Range,
};

use crate::{
    baml::{
        reader::BamlReader,
        records::{
            DefAttributeKeyStringRecord, DeferableContentStartRecord, DictionaryKey,
            ElementStartRecord, KeyElementStartRecord, Record, RecordData, RecordType,
        },
        writer::{BamlWriter, RecordPosition, Scope},
    },
    Result,
};

/// A key whose value position has not been written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the key's value position is patched by redeeming its ticket"]
pub struct KeyTicket {
    index: usize,
}

impl KeyTicket {
    /// Position of the key within its block.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug)]
struct PendingKey {
    value_position_at: u64,
    patched: bool,
}

/// Writer-side state of the open deferred block.
#[derive(Debug)]
pub(crate) struct DeferredBlock {
    header: RecordPosition,
    pub(crate) scope_depth: usize,
    keys: Vec<PendingKey>,
    values_started: bool,
}

impl DeferredBlock {
    fn content_start(&self) -> u64 {
        self.header.end
    }
}

impl<W: Write + Seek> BamlWriter<W> {
    /// Write a `DeferableContentStart` record with a size placeholder and open the block.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] outside the document or inside another block
    /// - [`crate::Error::FileError`] if the stream fails
    pub fn begin_deferred_content(&mut self) -> Result<()> {
        self.require_started("start deferred content")?;
        if self.deferred.is_some() {
            return Err(invalid_operation!("Deferred blocks cannot be nested"));
        }

        let header = self.write_checked_out(RecordData::DeferableContentStart(
            DeferableContentStartRecord { content_size: 0 },
        ))?;
        self.deferred = Some(DeferredBlock {
            header,
            scope_depth: self.scopes.len(),
            keys: Vec::new(),
            values_started: false,
        });
        Ok(())
    }

    fn check_key_allowed(&self) -> Result<()> {
        let Some(block) = &self.deferred else {
            return Err(invalid_operation!(
                "Dictionary keys can only be written inside a deferred block"
            ));
        };
        if block.values_started {
            return Err(invalid_operation!(
                "Dictionary keys cannot follow the first value of a deferred block"
            ));
        }
        if self.scopes.len() != block.scope_depth {
            return Err(invalid_operation!(
                "Dictionary keys cannot be written inside a {:?} scope",
                self.scopes.last()
            ));
        }
        Ok(())
    }

    fn push_key(&mut self, value_position_at: u64) -> Result<KeyTicket> {
        let Some(block) = self.deferred.as_mut() else {
            return Err(invalid_operation!("No deferred block is open"));
        };

        block.keys.push(PendingKey {
            value_position_at,
            patched: false,
        });
        Ok(KeyTicket {
            index: block.keys.len() - 1,
        })
    }

    /// Write a key given by a string id.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] outside a block, inside a scope, or after the first
    ///   value
    /// - [`crate::Error::FileError`] if the stream fails
    pub fn write_key_string(
        &mut self,
        string_id: i16,
        shared: bool,
        shared_set: bool,
    ) -> Result<KeyTicket> {
        self.check_key_allowed()?;
        let position = self.write_checked_out(RecordData::DefAttributeKeyString(
            DefAttributeKeyStringRecord {
                value_id: string_id,
                key: DictionaryKey {
                    shared,
                    shared_set,
                    ..DictionaryKey::default()
                },
            },
        ))?;
        self.push_key(position.payload_start + DefAttributeKeyStringRecord::VALUE_POSITION_OFFSET)
    }

    /// Write a key given by a type id (`x:Key="{x:Type ...}"`).
    ///
    /// # Errors
    /// See [`BamlWriter::write_key_string`].
    pub fn write_key_type(
        &mut self,
        type_id: i16,
        shared: bool,
        shared_set: bool,
    ) -> Result<KeyTicket> {
        self.check_key_allowed()?;
        let position = self.write_checked_out(RecordData::DefAttributeKeyType(
            key_element(type_id, shared, shared_set),
        ))?;
        self.push_key(position.payload_start + KeyElementStartRecord::VALUE_POSITION_OFFSET)
    }

    /// Open a key that is itself an element. Close it with [`BamlWriter::write_key_element_end`].
    ///
    /// # Errors
    /// See [`BamlWriter::write_key_string`].
    pub fn write_key_element_start(
        &mut self,
        type_id: i16,
        shared: bool,
        shared_set: bool,
    ) -> Result<KeyTicket> {
        self.check_key_allowed()?;
        let position = self.write_scoped(RecordData::KeyElementStart(key_element(
            type_id, shared, shared_set,
        )))?;
        self.push_key(position.payload_start + KeyElementStartRecord::VALUE_POSITION_OFFSET)
    }

    /// Close the innermost key element.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] if the innermost scope is not a key element
    /// - [`crate::Error::FileError`] if the stream fails
    pub fn write_key_element_end(&mut self) -> Result<()> {
        if self.scopes.last() != Some(&Scope::KeyElement) {
            return Err(invalid_operation!(
                "Cannot close a KeyElement scope while {:?} is innermost",
                self.scopes.last()
            ));
        }
        self.write_scoped(RecordData::KeyElementEnd).map(|_| ())
    }

    /// Start the value of a key: its value position is patched with the current offset.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] outside a block, with an open scope, for a ticket of
    ///   another block or a key whose value was already started
    /// - [`crate::Error::FileError`] if the stream fails
    pub fn begin_deferred_value(&mut self, ticket: KeyTicket) -> Result<()> {
        let position = self.sink.position()?;
        let depth = self.scopes.len();

        let Some(block) = self.deferred.as_mut() else {
            return Err(invalid_operation!("No deferred block is open"));
        };
        if depth != block.scope_depth {
            return Err(invalid_operation!(
                "A deferred value cannot start while {} scopes are open",
                depth - block.scope_depth
            ));
        }

        let content_start = block.content_start();
        let Some(key) = block.keys.get_mut(ticket.index) else {
            return Err(invalid_operation!(
                "Key ticket {} does not belong to the open deferred block",
                ticket.index
            ));
        };
        if key.patched {
            return Err(invalid_operation!(
                "The value of key {} was already started",
                ticket.index
            ));
        }

        let Ok(relative) = i32::try_from(position - content_start) else {
            return Err(malformed_error!(
                "Deferred value offset {} does not fit the value position field",
                position - content_start
            ));
        };

        let at = key.value_position_at;
        key.patched = true;
        block.values_started = true;
        self.sink.patch_i32(at, relative)?;

        log::trace!("Deferred value {} at block offset {}", ticket.index, relative);
        Ok(())
    }

    /// Close the block and patch its size.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] without an open block, with open scopes, or with keys
    ///   whose value was never started
    /// - [`crate::Error::FileError`] if the stream fails
    pub fn end_deferred_content(&mut self) -> Result<()> {
        let position = self.sink.position()?;

        let Some(block) = self.deferred.as_ref() else {
            return Err(invalid_operation!("No deferred block is open"));
        };
        if self.scopes.len() != block.scope_depth {
            return Err(invalid_operation!(
                "Cannot end a deferred block while a {:?} scope is open",
                self.scopes.last()
            ));
        }

        let unpatched = block.keys.iter().filter(|key| !key.patched).count();
        if unpatched > 0 {
            return Err(invalid_operation!(
                "{} of {} keys in the deferred block have no value",
                unpatched,
                block.keys.len()
            ));
        }

        let Ok(size) = i32::try_from(position - block.content_start()) else {
            return Err(malformed_error!(
                "Deferred block of {} bytes does not fit the size field",
                position - block.content_start()
            ));
        };

        self.sink.patch_i32(block.header.payload_start, size)?;
        log::debug!(
            "Closed deferred block with {} keys, {} bytes",
            block.keys.len(),
            size
        );
        self.deferred = None;
        Ok(())
    }

    /// `true` while a deferred block is open.
    #[must_use]
    pub fn in_deferred_content(&self) -> bool {
        self.deferred.is_some()
    }
}

fn key_element(type_id: i16, shared: bool, shared_set: bool) -> KeyElementStartRecord {
    KeyElementStartRecord {
        element: ElementStartRecord {
            type_id,
            ..ElementStartRecord::default()
        },
        key: DictionaryKey {
            shared,
            shared_set,
            ..DictionaryKey::default()
        },
    }
}

/// The key of a deferred dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKey {
    /// A string key (`x:Key="Accent"`)
    String(String),
    /// A type key, by the type's full name
    Type(String),
    /// An element key, the records from `KeyElementStart` to `KeyElementEnd` inclusive
    Element(Vec<Record>),
}

/// An indexed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredKey {
    /// The key
    pub key: ResourceKey,
    /// Offset of the value relative to the start of the block content
    pub value_position: i32,
    /// The value is shared between lookups
    pub shared: bool,
    /// `shared` was set explicitly
    pub shared_set: bool,
}

impl DeferredKey {
    fn new(key: ResourceKey, dictionary_key: DictionaryKey) -> Self {
        DeferredKey {
            key,
            value_position: dictionary_key.value_position,
            shared: dictionary_key.shared,
            shared_set: dictionary_key.shared_set,
        }
    }

    /// `true` if this is a string or type key equal to `name`.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match &self.key {
            ResourceKey::String(value) | ResourceKey::Type(value) => value == name,
            ResourceKey::Element(_) => false,
        }
    }
}

/// Reading progress of a [`DeferredSection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredState {
    /// The header has not been read
    Unopened,
    /// The block size is known
    HeaderRead,
    /// The keys are indexed, no value was decoded yet
    ScanningKeys,
    /// At least one value was decoded
    ValueMaterialized,
    /// The reader was moved past the block
    Closed,
}

/// Random access to the values of one deferred block.
///
/// ```rust,no_run
/// use bamlscope::{BamlReader, baml::deferred::DeferredSection};
///
/// # let data = Vec::new();
/// let mut reader = BamlReader::new(&data)?;
/// // ... read up to the DeferableContentStart record ...
/// let mut section = DeferredSection::new();
/// section.open(&mut reader)?;
/// section.scan_keys(&mut reader)?;
/// if let Some(index) = section.find("Accent") {
///     let records = section.value(&mut reader, index)?;
///     println!("{} records", records.len());
/// }
/// section.close(&mut reader)?;
/// # Ok::<(), bamlscope::Error>(())
/// ```
#[derive(Debug)]
pub struct DeferredSection {
    state: DeferredState,
    content_start: usize,
    content_end: usize,
    values_start: usize,
    keys: Vec<DeferredKey>,
    values: HashMap<usize, Vec<Record>>,
}

impl DeferredSection {
    /// A section that has not read its header yet.
    #[must_use]
    pub fn new() -> Self {
        DeferredSection {
            state: DeferredState::Unopened,
            content_start: 0,
            content_end: 0,
            values_start: 0,
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DeferredState {
        self.state
    }

    /// Absolute offsets of the block content, valid once the header was read.
    #[must_use]
    pub fn content_range(&self) -> Range<usize> {
        self.content_start..self.content_end
    }

    /// Absolute offset of the first value record, valid once the keys were scanned.
    #[must_use]
    pub fn values_start(&self) -> usize {
        self.values_start
    }

    /// Read the `DeferableContentStart` record that must come next.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] if the section was already opened or the next record
    ///   is something else
    /// - [`crate::Error::Malformed`] if the block size is negative or exceeds the stream
    pub fn open(&mut self, reader: &mut BamlReader<'_>) -> Result<()> {
        if self.state != DeferredState::Unopened {
            return Err(invalid_operation!(
                "Deferred section is already {:?}",
                self.state
            ));
        }

        let offset = reader.offset();
        let Some(record) = reader.next_record()? else {
            return Err(malformed_error!(
                "Expected a deferred block at offset {}, found the end of the stream",
                offset
            ));
        };
        let RecordData::DeferableContentStart(header) = &record.data else {
            return Err(invalid_operation!(
                "Expected a DeferableContentStart record at offset {}, found {}",
                offset,
                record.record_type()
            ));
        };

        let Ok(size) = usize::try_from(header.content_size) else {
            return Err(malformed_error!(
                "Deferred block at offset {} has negative size {}",
                offset,
                header.content_size
            ));
        };
        reader.release(record);

        let start = reader.offset();
        let end = start + size;
        if end > reader.data().len() {
            return Err(malformed_error!(
                "Deferred block at offset {} ends at {}, past the end of the stream",
                offset,
                end
            ));
        }

        self.content_start = start;
        self.content_end = end;
        self.state = DeferredState::HeaderRead;
        Ok(())
    }

    /// Index the keys at the start of the block. Values are not decoded.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] unless the header was just read
    /// - [`crate::Error::Malformed`] for value positions outside the block
    /// - [`crate::Error::UnknownId`] for string or type keys with undefined ids
    pub fn scan_keys(&mut self, reader: &mut BamlReader<'_>) -> Result<&[DeferredKey]> {
        if self.state != DeferredState::HeaderRead {
            return Err(invalid_operation!(
                "Keys can only be scanned right after the header, section is {:?}",
                self.state
            ));
        }

        while reader.offset() < self.content_end {
            let key = match reader.peek_record_type()? {
                Some(
                    RecordType::DefAttributeKeyString
                    | RecordType::DefAttributeKeyType
                    | RecordType::KeyElementStart,
                ) => self.read_key(reader)?,
                Some(RecordType::LineNumberAndPosition | RecordType::LinePosition) => {
                    if let Some(record) = reader.next_record()? {
                        reader.release(record);
                    }
                    continue;
                }
                _ => break,
            };
            self.keys.push(key);
        }

        self.values_start = reader.offset();
        let first_value = self.values_start - self.content_start;
        let block_size = self.content_end - self.content_start;
        for (index, key) in self.keys.iter().enumerate() {
            let valid = usize::try_from(key.value_position)
                .is_ok_and(|position| position >= first_value && position <= block_size);
            if !valid {
                return Err(malformed_error!(
                    "Key {} has value position {} outside the deferred values {}..{}",
                    index,
                    key.value_position,
                    first_value,
                    block_size
                ));
            }
        }

        log::debug!(
            "Indexed {} deferred keys, values at offset {}",
            self.keys.len(),
            self.values_start
        );
        self.state = DeferredState::ScanningKeys;
        Ok(&self.keys)
    }

    fn read_key(&self, reader: &mut BamlReader<'_>) -> Result<DeferredKey> {
        let Some(record) = reader.next_record()? else {
            return Err(malformed_error!("Deferred block ends inside its keys"));
        };

        let key = match &record.data {
            RecordData::DefAttributeKeyString(key) => DeferredKey::new(
                ResourceKey::String(reader.resolve_string(key.value_id)?),
                key.key,
            ),
            RecordData::DefAttributeKeyType(key) => {
                let name = reader
                    .map_table()
                    .type_full_name(key.element.type_id)
                    .map_err(|error| reader.session().locate(error))?;
                DeferredKey::new(ResourceKey::Type(name), key.key)
            }
            RecordData::KeyElementStart(key) => {
                let dictionary_key = key.key;
                let mut records = vec![record];
                loop {
                    if reader.offset() >= self.content_end {
                        return Err(malformed_error!(
                            "Key element is not closed inside the deferred block"
                        ));
                    }
                    let Some(next) = reader.next_record()? else {
                        return Err(malformed_error!("Deferred block ends inside a key element"));
                    };
                    let done = next.record_type() == RecordType::KeyElementEnd;
                    records.push(next);
                    if done {
                        break;
                    }
                }
                return Ok(DeferredKey::new(ResourceKey::Element(records), dictionary_key));
            }
            _ => {
                return Err(invalid_operation!(
                    "{} is not a dictionary key",
                    record.record_type()
                ))
            }
        };

        reader.release(record);
        Ok(key)
    }

    /// The indexed keys.
    #[must_use]
    pub fn keys(&self) -> &[DeferredKey] {
        &self.keys
    }

    /// Index of the first string or type key equal to `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.keys.iter().position(|key| key.matches(name))
    }

    fn check_values_available(&self) -> Result<()> {
        match self.state {
            DeferredState::ScanningKeys | DeferredState::ValueMaterialized => Ok(()),
            state => Err(invalid_operation!(
                "Deferred values are not available, section is {:?}",
                state
            )),
        }
    }

    /// Absolute byte range of a value: from its position up to the next higher value position,
    /// or the end of the block.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] before the keys are scanned or after closing
    /// - [`crate::Error::OutOfBounds`] for an index past the keys
    pub fn value_range(&self, index: usize) -> Result<Range<usize>> {
        self.check_values_available()?;
        let Some(key) = self.keys.get(index) else {
            return Err(out_of_bounds_error!());
        };

        let position = key.value_position;
        let end = self
            .keys
            .iter()
            .map(|other| other.value_position)
            .filter(|other| *other > position)
            .min()
            .map_or(self.content_end, |next| {
                self.content_start + next.unsigned_abs() as usize
            });

        Ok(self.content_start + position.unsigned_abs() as usize..end)
    }

    /// Raw bytes of a value.
    ///
    /// # Errors
    /// See [`DeferredSection::value_range`].
    pub fn value_bytes<'a>(&self, reader: &BamlReader<'a>, index: usize) -> Result<&'a [u8]> {
        let range = self.value_range(index)?;
        Ok(&reader.data()[range])
    }

    /// Decode a value, seeking straight to its bytes. Later calls for the same key are served
    /// from the cache.
    ///
    /// # Errors
    /// - the errors of [`DeferredSection::value_range`]
    /// - decoding errors of the value records
    pub fn value(&mut self, reader: &mut BamlReader<'_>, index: usize) -> Result<&[Record]> {
        let range = self.value_range(index)?;
        let records = match self.values.entry(index) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => slot.insert(reader.read_range(range.start, range.end)?),
        };

        self.state = DeferredState::ValueMaterialized;
        Ok(records)
    }

    /// [`DeferredSection::value`] by string or type key.
    ///
    /// # Errors
    /// See [`DeferredSection::value`].
    pub fn value_by_key(
        &mut self,
        reader: &mut BamlReader<'_>,
        name: &str,
    ) -> Result<Option<&[Record]>> {
        match self.find(name) {
            Some(index) => self.value(reader, index).map(Some),
            None => Ok(None),
        }
    }

    /// Number of decoded values held in the cache.
    #[must_use]
    pub fn materialized(&self) -> usize {
        self.values.len()
    }

    /// Move the reader to the first record after the block and drop the value cache.
    ///
    /// # Errors
    /// - [`crate::Error::InvalidOperation`] if the section was never opened or is closed
    pub fn close(&mut self, reader: &mut BamlReader<'_>) -> Result<()> {
        if matches!(self.state, DeferredState::Unopened | DeferredState::Closed) {
            return Err(invalid_operation!(
                "Cannot close a deferred section that is {:?}",
                self.state
            ));
        }

        reader.seek(self.content_end)?;
        self.values.clear();
        self.state = DeferredState::Closed;
        Ok(())
    }
}

impl Default for DeferredSection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::Error;

    fn writer() -> BamlWriter<Cursor<Vec<u8>>> {
        let mut writer = BamlWriter::new(Cursor::new(Vec::new())).unwrap();
        writer.write_document_start().unwrap();
        writer
    }

    #[test]
    fn unpatched_keys_block_the_end() {
        let mut writer = writer();
        let accent = writer.add_string("Accent").unwrap();
        writer.begin_deferred_content().unwrap();
        let first = writer.write_key_string(accent, true, false).unwrap();
        let second = writer.write_key_type(-1, false, false).unwrap();

        writer.begin_deferred_value(first).unwrap();
        writer.write_text("value").unwrap();
        assert!(matches!(
            writer.end_deferred_content(),
            Err(Error::InvalidOperation(_))
        ));

        writer.begin_deferred_value(second).unwrap();
        writer.end_deferred_content().unwrap();
        assert!(!writer.in_deferred_content());
    }

    #[test]
    fn keys_after_values_are_rejected() {
        let mut writer = writer();
        writer.begin_deferred_content().unwrap();
        let key = writer.write_key_string(-1, false, false).unwrap();
        writer.begin_deferred_value(key).unwrap();

        assert!(matches!(
            writer.write_key_string(-2, false, false),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            writer.begin_deferred_value(key),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn key_element_scope() {
        let mut writer = writer();
        writer.begin_deferred_content().unwrap();
        let key = writer.write_key_element_start(-1, false, false).unwrap();

        // nothing else may start while the key element is open
        assert!(matches!(
            writer.write_key_string(-1, false, false),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            writer.begin_deferred_value(key),
            Err(Error::InvalidOperation(_))
        ));

        writer.write_key_element_end().unwrap();
        assert!(matches!(
            writer.write_key_element_end(),
            Err(Error::InvalidOperation(_))
        ));
        writer.begin_deferred_value(key).unwrap();
        writer.end_deferred_content().unwrap();
    }

    #[test]
    fn open_scopes_block_the_end() {
        let mut writer = writer();
        writer.write_element_start(-1).unwrap();
        writer.begin_deferred_content().unwrap();
        let key = writer.write_key_string(-1, false, false).unwrap();
        writer.begin_deferred_value(key).unwrap();
        writer.write_element_start(-2).unwrap();

        assert!(matches!(
            writer.end_deferred_content(),
            Err(Error::InvalidOperation(_))
        ));

        writer.write_element_end().unwrap();
        // the outer element was opened before the block
        writer.end_deferred_content().unwrap();
        writer.write_element_end().unwrap();
        writer.write_document_end().unwrap();
    }

    #[test]
    fn no_interning_inside_blocks() {
        let mut writer = writer();
        writer.begin_deferred_content().unwrap();
        assert!(matches!(
            writer.add_string("late"),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            writer.begin_deferred_content(),
            Err(Error::InvalidOperation(_))
        ));
        assert!(matches!(
            writer.write_document_end(),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn patched_layout() {
        let mut writer = writer();
        writer.begin_deferred_content().unwrap();
        let header_end = writer.position().unwrap();
        let key = writer.write_key_string(-1, false, false).unwrap();
        writer.begin_deferred_value(key).unwrap();
        let value_at = writer.position().unwrap();
        writer.write_text("v").unwrap();
        let block_end = writer.position().unwrap();
        writer.end_deferred_content().unwrap();

        let bytes = writer.sink.into_inner().into_inner();
        let header_end = usize::try_from(header_end).unwrap();
        let size = i32::from_le_bytes(bytes[header_end - 4..header_end].try_into().unwrap());
        assert_eq!(i64::from(size), i64::try_from(block_end).unwrap() - header_end as i64);

        // tag, size prefix, string id, then the value position
        let at = header_end + 1 + 1 + 2;
        let position = i32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());
        assert_eq!(i64::from(position), i64::try_from(value_at).unwrap() - header_end as i64);
    }

    #[test]
    fn section_states() {
        let mut section = DeferredSection::new();
        assert_eq!(section.state(), DeferredState::Unopened);
        assert!(matches!(
            section.value_range(0),
            Err(Error::InvalidOperation(_))
        ));
        assert!(section.find("anything").is_none());
    }
}
