//! BAML stream writer.
//!
//! [`BamlWriter`] produces a complete stream: version header, document boundaries, the records
//! of the document, and the defining records of every name it interns. Back-patching (variable
//! record sizes, the document-start record, deferred block sizes and dictionary value positions)
//! is done by seeking, so the output has to implement [`Seek`]; this is checked once, when the
//! writer is created.
//!
//! Variable-size records are written in two passes: the payload is written once to measure it,
//! then the writer seeks back to just after the tag, writes the size and writes the payload
//! again. The size field therefore never needs to be guessed.
//!
//! # Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use bamlscope::{BamlReader, BamlWriter};
//!
//! let mut writer = BamlWriter::new(Cursor::new(Vec::new()))?;
//! writer.write_document_start()?;
//! let gauge = writer.add_type("MyApp", "MyApp.Gauge")?;
//! writer.write_element_start(gauge)?;
//! writer.write_element_end()?;
//! writer.write_document_end()?;
//!
//! let bytes = writer.finish()?.into_inner();
//! let reader = BamlReader::new(&bytes)?;
//! assert_eq!(reader.read_all()?.len(), 6);
//! # Ok::<(), bamlscope::Error>(())
//! ```

use std::io::{Seek, SeekFrom, Write};

use crate::{
    baml::{
        cache::WriteCache,
        maptable::{MapTable, RecordEmitter},
        records::{
            AttributeUsage, DocumentStartRecord, ElementStartRecord, LineNumberAndPositionRecord,
            LinePositionRecord, PropertyRecord, Record, RecordData, RecordType, TextRecord,
        },
        varint::variable_record_size,
        version::{BamlVersion, VersionHeader},
    },
    file::io::BinaryWrite,
    Error, Result,
};

/// Writer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Emit line information records and flag the document as debug BAML
    pub debug_line_info: bool,
    /// Value of the document-start `load_async` flag
    pub load_async: bool,
    /// Value of the document-start `max_async_records` field
    pub max_async_records: i32,
    /// Version written to the header
    pub version: BamlVersion,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            debug_line_info: false,
            load_async: false,
            max_async_records: -1,
            version: BamlVersion::CURRENT,
        }
    }
}

/// Where a record landed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordPosition {
    /// Offset of the tag byte
    pub start: u64,
    /// Offset of the first payload byte
    pub payload_start: u64,
    /// Offset just past the record
    pub end: u64,
}

/// Record-level output over a seekable stream.
#[derive(Debug)]
pub struct RecordSink<W: Write + Seek> {
    out: W,
}

impl<W: Write + Seek> RecordSink<W> {
    /// Wrap a stream.
    ///
    /// # Errors
    /// Returns [`Error::NotSeekable`] if the stream cannot report its position.
    pub fn new(mut out: W) -> Result<Self> {
        if out.stream_position().is_err() {
            return Err(Error::NotSeekable);
        }
        Ok(RecordSink { out })
    }

    /// Current output offset.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the stream fails.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.out.stream_position()?)
    }

    /// Write raw bytes.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the stream fails.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.out.write_all(bytes)?)
    }

    /// Write tag, size prefix (variable kinds only) and payload.
    ///
    /// # Errors
    /// - [`Error::NotSupported`] for legacy kinds
    /// - [`Error::Malformed`] if a payload does not fit in a 32-bit size
    /// - [`Error::FileError`] if the stream fails
    pub fn write_record(&mut self, record: &Record) -> Result<RecordPosition> {
        let record_type = record.record_type();
        if record_type.is_legacy() {
            return Err(Error::NotSupported(record_type.tag()));
        }

        let start = self.position()?;
        self.out.write_le(record_type.tag())?;
        let after_tag = start + 1;

        let payload_start = if record_type.is_variable_size() {
            record.data.write_data(&mut self.out)?;
            let measured = self.position()? - after_tag;
            let Ok(measured) = u32::try_from(measured) else {
                return Err(malformed_error!(
                    "{} record payload too large - {} bytes",
                    record_type,
                    measured
                ));
            };

            self.out.seek(SeekFrom::Start(after_tag))?;
            self.out
                .write_7bit_encoded_int(variable_record_size(measured))?;
            let payload_start = self.position()?;
            record.data.write_data(&mut self.out)?;
            payload_start
        } else {
            record.data.write_data(&mut self.out)?;
            after_tag
        };

        let end = self.position()?;
        log::trace!("Wrote {} record at offset {}", record_type, start);

        Ok(RecordPosition {
            start,
            payload_start,
            end,
        })
    }

    /// Overwrite four bytes at `at` and return to the current offset.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the stream fails.
    pub fn patch_i32(&mut self, at: u64, value: i32) -> Result<()> {
        let resume = self.position()?;
        self.out.seek(SeekFrom::Start(at))?;
        self.out.write_le(value)?;
        self.out.seek(SeekFrom::Start(resume))?;
        Ok(())
    }

    /// Re-encode a fixed-size record in place.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] for variable-size kinds
    /// - [`Error::FileError`] if the stream fails
    pub fn rewrite_fixed(&mut self, position: RecordPosition, data: &RecordData) -> Result<()> {
        if data.record_type().fixed_size().is_none() {
            return Err(invalid_operation!(
                "Cannot rewrite variable-size {} record in place",
                data.record_type()
            ));
        }

        let resume = self.position()?;
        self.out.seek(SeekFrom::Start(position.payload_start))?;
        data.write_data(&mut self.out)?;
        self.out.seek(SeekFrom::Start(resume))?;
        Ok(())
    }

    /// Flush the stream.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the stream fails.
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.out.flush()?)
    }

    /// Give back the stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Seek> RecordEmitter for RecordSink<W> {
    fn emit(&mut self, record: RecordData) -> Result<()> {
        self.write_record(&Record::new(record)).map(|_| ())
    }
}

impl Record {
    /// Write the record through a sink, see [`RecordSink::write_record`].
    ///
    /// # Errors
    /// Returns the errors of [`RecordSink::write_record`].
    pub fn write_to<W: Write + Seek>(&self, sink: &mut RecordSink<W>) -> Result<RecordPosition> {
        sink.write_record(self)
    }
}

/// Nesting constructs that have a start and an end record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `ElementStart` / `NamedElementStart` to `ElementEnd`
    Element,
    /// `KeyElementStart` to `KeyElementEnd`
    KeyElement,
    /// `PropertyComplexStart` to `PropertyComplexEnd`
    PropertyComplex,
    /// `PropertyArrayStart` to `PropertyArrayEnd`
    PropertyArray,
    /// `PropertyIListStart` to `PropertyIListEnd`
    PropertyIList,
    /// `PropertyIDictionaryStart` to `PropertyIDictionaryEnd`
    PropertyIDictionary,
    /// `ConstructorParametersStart` to `ConstructorParametersEnd`
    ConstructorParameters,
    /// `StaticResourceStart` to `StaticResourceEnd`
    StaticResource,
}

impl Scope {
    /// The scope a record opens, if any.
    #[must_use]
    pub fn opened_by(record_type: RecordType) -> Option<Scope> {
        match record_type {
            RecordType::ElementStart | RecordType::NamedElementStart => Some(Scope::Element),
            RecordType::KeyElementStart => Some(Scope::KeyElement),
            RecordType::PropertyComplexStart => Some(Scope::PropertyComplex),
            RecordType::PropertyArrayStart => Some(Scope::PropertyArray),
            RecordType::PropertyIListStart => Some(Scope::PropertyIList),
            RecordType::PropertyIDictionaryStart => Some(Scope::PropertyIDictionary),
            RecordType::ConstructorParametersStart => Some(Scope::ConstructorParameters),
            RecordType::StaticResourceStart => Some(Scope::StaticResource),
            _ => None,
        }
    }

    /// The scope a record closes, if any.
    #[must_use]
    pub fn closed_by(record_type: RecordType) -> Option<Scope> {
        match record_type {
            RecordType::ElementEnd => Some(Scope::Element),
            RecordType::KeyElementEnd => Some(Scope::KeyElement),
            RecordType::PropertyComplexEnd => Some(Scope::PropertyComplex),
            RecordType::PropertyArrayEnd => Some(Scope::PropertyArray),
            RecordType::PropertyIListEnd => Some(Scope::PropertyIList),
            RecordType::PropertyIDictionaryEnd => Some(Scope::PropertyIDictionary),
            RecordType::ConstructorParametersEnd => Some(Scope::ConstructorParameters),
            RecordType::StaticResourceEnd => Some(Scope::StaticResource),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentState {
    NotStarted,
    Started,
    Ended,
}

/// Writes a BAML stream into a seekable output.
#[derive(Debug)]
pub struct BamlWriter<W: Write + Seek> {
    pub(crate) sink: RecordSink<W>,
    pub(crate) map_table: MapTable,
    cache: WriteCache,
    options: WriterOptions,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) state: DocumentState,
    document_start: Option<RecordPosition>,
    last_line: Option<u32>,
    pub(crate) deferred: Option<crate::baml::deferred::DeferredBlock>,
}

impl<W: Write + Seek> BamlWriter<W> {
    /// A writer with default options and a fresh map table.
    ///
    /// # Errors
    /// Returns [`Error::NotSeekable`] if the output cannot seek.
    pub fn new(out: W) -> Result<Self> {
        Self::with_options(out, WriterOptions::default())
    }

    /// A writer with the given options and a fresh map table.
    ///
    /// # Errors
    /// Returns [`Error::NotSeekable`] if the output cannot seek.
    pub fn with_options(out: W, options: WriterOptions) -> Result<Self> {
        Self::with_map_table(out, options, MapTable::new())
    }

    /// A writer that interns into an existing map table.
    ///
    /// # Errors
    /// Returns [`Error::NotSeekable`] if the output cannot seek.
    pub fn with_map_table(out: W, options: WriterOptions, map_table: MapTable) -> Result<Self> {
        Ok(BamlWriter {
            sink: RecordSink::new(out)?,
            map_table,
            cache: WriteCache::new(),
            options,
            scopes: Vec::new(),
            state: DocumentState::NotStarted,
            document_start: None,
            last_line: None,
            deferred: None,
        })
    }

    /// The writer options.
    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// The map table names are interned into.
    #[must_use]
    pub fn map_table(&self) -> &MapTable {
        &self.map_table
    }

    /// The currently open scopes, outermost first.
    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Current output offset.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the stream fails.
    pub fn position(&mut self) -> Result<u64> {
        self.sink.position()
    }

    pub(crate) fn require_started(&self, what: &str) -> Result<()> {
        match self.state {
            DocumentState::Started => Ok(()),
            DocumentState::NotStarted => Err(invalid_operation!(
                "Cannot {} before the document start",
                what
            )),
            DocumentState::Ended => Err(invalid_operation!(
                "Cannot {} after the document end",
                what
            )),
        }
    }

    pub(crate) fn write_checked_out(&mut self, data: RecordData) -> Result<RecordPosition> {
        let mut record = self.cache.checkout(data.record_type())?;
        let written = data
            .copy_into(&mut record.data)
            .and_then(|()| self.sink.write_record(&record));
        self.cache.release(record)?;
        written
    }

    /// Write the version header followed by the document-start record.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if the document was already started
    /// - [`Error::FileError`] if the stream fails
    pub fn write_document_start(&mut self) -> Result<RecordPosition> {
        if self.state != DocumentState::NotStarted {
            return Err(invalid_operation!("The document was already started"));
        }

        let mut header = Vec::new();
        VersionHeader::new(self.options.version).write(&mut header)?;
        self.sink.write_raw(&header)?;

        let position = self.write_checked_out(RecordData::DocumentStart(DocumentStartRecord {
            load_async: self.options.load_async,
            max_async_records: self.options.max_async_records,
            debug_baml: self.options.debug_line_info,
        }))?;

        self.document_start = Some(position);
        self.state = DocumentState::Started;
        Ok(position)
    }

    /// Patch the asynchronous loading fields of the already written document-start record.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if the document has not been started
    /// - [`Error::FileError`] if the stream fails
    pub fn update_document_start(&mut self, load_async: bool, max_async_records: i32) -> Result<()> {
        let Some(position) = self.document_start else {
            return Err(invalid_operation!("The document has not been started"));
        };

        self.options.load_async = load_async;
        self.options.max_async_records = max_async_records;
        self.sink.rewrite_fixed(
            position,
            &RecordData::DocumentStart(DocumentStartRecord {
                load_async,
                max_async_records,
                debug_baml: self.options.debug_line_info,
            }),
        )
    }

    /// Write the document-end record and flush.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if scopes or a deferred block are still open
    /// - [`Error::FileError`] if the stream fails
    pub fn write_document_end(&mut self) -> Result<RecordPosition> {
        self.require_started("end the document")?;
        if let Some(open) = self.scopes.last() {
            return Err(invalid_operation!(
                "Cannot end the document while a {:?} scope is open",
                open
            ));
        }
        if self.deferred.is_some() {
            return Err(invalid_operation!(
                "Cannot end the document inside a deferred block"
            ));
        }

        let position = self.write_checked_out(RecordData::DocumentEnd)?;
        self.state = DocumentState::Ended;
        self.sink.flush()?;
        Ok(position)
    }

    /// Write a record, tracking the scopes it opens or closes.
    ///
    /// Document boundaries, deferred block headers and dictionary keys have their own methods and
    /// are rejected here.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] for mismatched end records or kinds with a dedicated method
    /// - [`Error::FileError`] if the stream fails
    pub fn write_record(&mut self, data: RecordData) -> Result<RecordPosition> {
        self.require_started("write records")?;

        let record_type = data.record_type();
        let dedicated = match record_type {
            RecordType::DocumentStart => Some("write_document_start"),
            RecordType::DocumentEnd => Some("write_document_end"),
            RecordType::DeferableContentStart => Some("begin_deferred_content"),
            RecordType::DefAttributeKeyString => Some("write_key_string"),
            RecordType::DefAttributeKeyType => Some("write_key_type"),
            RecordType::KeyElementStart => Some("write_key_element_start"),
            RecordType::KeyElementEnd => Some("write_key_element_end"),
            _ => None,
        };
        if let Some(method) = dedicated {
            return Err(invalid_operation!(
                "{} records are written with {}",
                record_type,
                method
            ));
        }

        self.write_scoped(data)
    }

    pub(crate) fn write_scoped(&mut self, data: RecordData) -> Result<RecordPosition> {
        let record_type = data.record_type();

        if let Some(closing) = Scope::closed_by(record_type) {
            match self.scopes.last() {
                Some(open) if *open == closing => {}
                Some(open) => {
                    return Err(invalid_operation!(
                        "Cannot close a {:?} scope while a {:?} scope is open",
                        closing,
                        open
                    ))
                }
                None => {
                    return Err(invalid_operation!(
                        "Cannot close a {:?} scope, no scope is open",
                        closing
                    ))
                }
            }
            if let Some(block) = &self.deferred {
                if self.scopes.len() <= block.scope_depth {
                    return Err(invalid_operation!(
                        "Cannot close a {:?} scope opened outside the deferred block",
                        closing
                    ));
                }
            }
        }

        let position = self.write_checked_out(data)?;

        if let Some(opening) = Scope::opened_by(record_type) {
            self.scopes.push(opening);
        } else if Scope::closed_by(record_type).is_some() {
            self.scopes.pop();
        }

        Ok(position)
    }

    /// Write line information for the next record. Does nothing unless debug line info is on.
    ///
    /// A `LinePosition` record is used when the line did not change.
    ///
    /// # Errors
    /// Returns [`Error::FileError`] if the stream fails.
    pub fn write_line_info(&mut self, line_number: u32, line_position: u32) -> Result<()> {
        if !self.options.debug_line_info {
            return Ok(());
        }
        self.require_started("write line information")?;

        let data = if self.last_line == Some(line_number) {
            RecordData::LinePosition(LinePositionRecord { line_position })
        } else {
            RecordData::LineNumberAndPosition(LineNumberAndPositionRecord {
                line_number,
                line_position,
            })
        };
        self.last_line = Some(line_number);
        self.write_checked_out(data).map(|_| ())
    }

    /// Start an element.
    ///
    /// # Errors
    /// See [`BamlWriter::write_record`].
    pub fn write_element_start(&mut self, type_id: i16) -> Result<RecordPosition> {
        self.write_record(RecordData::ElementStart(ElementStartRecord {
            type_id,
            ..ElementStartRecord::default()
        }))
    }

    /// End the innermost element.
    ///
    /// # Errors
    /// See [`BamlWriter::write_record`].
    pub fn write_element_end(&mut self) -> Result<RecordPosition> {
        self.write_record(RecordData::ElementEnd)
    }

    /// Write a simple property.
    ///
    /// # Errors
    /// See [`BamlWriter::write_record`].
    pub fn write_property(&mut self, attribute_id: i16, value: &str) -> Result<RecordPosition> {
        self.write_record(RecordData::Property(PropertyRecord {
            attribute_id,
            value: value.to_string(),
        }))
    }

    /// Write text content.
    ///
    /// # Errors
    /// See [`BamlWriter::write_record`].
    pub fn write_text(&mut self, value: &str) -> Result<RecordPosition> {
        self.write_record(RecordData::Text(TextRecord {
            value: value.to_string(),
        }))
    }

    fn require_interning(&self) -> Result<()> {
        self.require_started("intern names")?;
        if self.deferred.is_some() {
            return Err(invalid_operation!(
                "Names must be interned before the deferred block starts"
            ));
        }
        Ok(())
    }

    /// Intern an assembly, writing its `AssemblyInfo` record if it is new.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] outside the document or inside a deferred block
    /// - [`Error::FileError`] if the stream fails
    pub fn add_assembly(&mut self, full_name: &str) -> Result<i16> {
        self.require_interning()?;
        self.map_table.add_assembly(&mut self.sink, full_name)
    }

    /// Intern a type, writing its assembly and `TypeInfo` records if they are new.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] outside the document or inside a deferred block
    /// - [`Error::FileError`] if the stream fails
    pub fn add_type(&mut self, assembly: &str, full_name: &str) -> Result<i16> {
        self.require_interning()?;
        self.map_table.add_type(&mut self.sink, assembly, full_name)
    }

    /// Intern a property or event, writing the records of its owner and itself if they are new.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] outside the document or inside a deferred block
    /// - [`Error::FileError`] if the stream fails
    pub fn add_attribute(
        &mut self,
        owner_assembly: &str,
        owner_type: &str,
        name: &str,
        usage: AttributeUsage,
    ) -> Result<i16> {
        self.require_interning()?;
        self.map_table
            .add_attribute(&mut self.sink, owner_assembly, owner_type, name, usage)
    }

    /// Intern a string, writing its `StringInfo` record if it is new.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] outside the document or inside a deferred block
    /// - [`Error::FileError`] if the stream fails
    pub fn add_string(&mut self, value: &str) -> Result<i16> {
        self.require_interning()?;
        self.map_table.add_string(&mut self.sink, value)
    }

    /// Finish writing and return the output stream and the map table.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the document was started but not ended.
    pub fn finish_with_table(mut self) -> Result<(W, MapTable)> {
        if self.state == DocumentState::Started {
            return Err(invalid_operation!("The document was not ended"));
        }
        self.sink.flush()?;
        Ok((self.sink.into_inner(), self.map_table))
    }

    /// Finish writing and return the output stream.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the document was started but not ended.
    pub fn finish(self) -> Result<W> {
        self.finish_with_table().map(|(out, _)| out)
    }
}
