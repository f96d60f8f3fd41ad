//! BAML stream reading.
//!
//! [`RecordReader`] is the per-stream session: it verifies the header, decodes records in order,
//! feeds the defining records of assemblies, types, attributes and strings into its
//! [`MapTable`], and remembers the most recent line information so resolution errors can point
//! at the markup they came from. It does not own any bytes; every call is handed a parser and the
//! number of bytes that may be consumed, which is what lets [`crate::baml::staging`] drive it
//! while a stream is still arriving.
//!
//! [`BamlReader`] wraps a session around a complete byte slice (a `Vec`, a memory-mapped file, a
//! section of a resource stream).
//!
//! # Examples
//!
//! ```rust,no_run
//! use bamlscope::{BamlReader, baml::resolver::MemoryResolver};
//!
//! let data = std::fs::read("Window1.baml")?;
//! let resolver = MemoryResolver::permissive();
//!
//! let mut reader = BamlReader::new(&data)?;
//! while let Some(record) = reader.next_record()? {
//!     if let bamlscope::baml::records::RecordData::ElementStart(element) = &record.data {
//!         let handle = reader.resolve_type(element.type_id, &resolver)?;
//!         println!("<{}>", handle.full_name);
//!     }
//!     reader.release(record);
//! }
//! # Ok::<(), bamlscope::Error>(())
//! ```

use crate::{
    baml::{
        cache::RecordCache,
        maptable::MapTable,
        records::{read_record_checked, DocumentStartRecord, Record, RecordData, RecordType},
        resolver::{ConverterHandle, MemberHandle, TypeHandle, TypeResolver},
        version::{VersionHeader, HEADER_SIZE},
    },
    file::parser::Parser,
    Error, Result,
};

/// Reader configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Reject variable-size records whose payload is not consumed completely, instead of
    /// skipping the remainder with a warning
    pub verify_trailing_bytes: bool,
}

/// Decoding session for one BAML stream.
#[derive(Debug)]
pub struct RecordReader {
    map_table: MapTable,
    cache: RecordCache,
    options: ReaderOptions,
    header: Option<VersionHeader>,
    document: Option<DocumentStartRecord>,
    location: Option<(u32, u32)>,
    ended: bool,
}

impl RecordReader {
    /// A session with a fresh map table.
    #[must_use]
    pub fn new(options: ReaderOptions) -> Self {
        Self::with_map_table(MapTable::new(), options)
    }

    /// A session that starts from an existing map table.
    #[must_use]
    pub fn with_map_table(map_table: MapTable, options: ReaderOptions) -> Self {
        RecordReader {
            map_table,
            cache: RecordCache::new(),
            options,
            header: None,
            document: None,
            location: None,
            ended: false,
        }
    }

    /// The verified header, once read.
    #[must_use]
    pub fn header(&self) -> Option<&VersionHeader> {
        self.header.as_ref()
    }

    /// The document-start record, once read.
    #[must_use]
    pub fn document(&self) -> Option<&DocumentStartRecord> {
        self.document.as_ref()
    }

    /// `true` once the document-end record was read.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Line and position of the most recent line information record.
    #[must_use]
    pub fn location(&self) -> Option<(u32, u32)> {
        self.location
    }

    /// The tables loaded so far.
    #[must_use]
    pub fn map_table(&self) -> &MapTable {
        &self.map_table
    }

    /// Mutable access to the tables, for lookups that synthesise known entries.
    pub fn map_table_mut(&mut self) -> &mut MapTable {
        &mut self.map_table
    }

    /// End the session and keep its tables.
    #[must_use]
    pub fn into_map_table(self) -> MapTable {
        self.map_table
    }

    /// Read and verify the version header.
    ///
    /// Returns `Ok(None)` if fewer than [`HEADER_SIZE`] bytes are available yet.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if the header was already read
    /// - [`Error::InvalidSignature`] / [`Error::VersionMismatch`] for foreign or unsupported
    ///   streams
    pub fn read_header(
        &mut self,
        parser: &mut Parser<'_>,
        bytes_available: usize,
    ) -> Result<Option<VersionHeader>> {
        if self.header.is_some() {
            return Err(invalid_operation!("The version header was already read"));
        }
        if bytes_available.min(parser.remaining()) < HEADER_SIZE {
            return Ok(None);
        }

        let header = VersionHeader::read(parser)?;
        self.header = Some(header);
        Ok(Some(header))
    }

    /// Read the next record, including its tag.
    ///
    /// Returns `Ok(None)` without consuming anything if the record is not complete within
    /// `bytes_available` bytes.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if the header has not been read
    /// - [`Error::Malformed`] for unknown tags and damaged payloads
    /// - [`Error::NotSupported`] for legacy kinds
    pub fn read_record(
        &mut self,
        parser: &mut Parser<'_>,
        bytes_available: usize,
    ) -> Result<Option<Record>> {
        if self.header.is_none() {
            return Err(invalid_operation!(
                "Records cannot be read before the version header"
            ));
        }
        if bytes_available == 0 || !parser.has_more_data() {
            return Ok(None);
        }

        let start = parser.pos();
        let record_type = RecordType::from_tag(parser.peek_byte()?)?;
        parser.advance_by(1)?;

        match read_record_checked(
            parser,
            bytes_available - 1,
            record_type,
            &mut self.cache,
            self.options.verify_trailing_bytes,
        )? {
            Some(record) => {
                self.observe(&record)?;
                Ok(Some(record))
            }
            None => {
                parser.seek(start)?;
                Ok(None)
            }
        }
    }

    fn observe(&mut self, record: &Record) -> Result<()> {
        match &record.data {
            RecordData::DocumentStart(document) => self.document = Some(document.clone()),
            RecordData::DocumentEnd => self.ended = true,
            RecordData::LineNumberAndPosition(line) => {
                self.location = Some((line.line_number, line.line_position));
            }
            RecordData::LinePosition(position) => {
                let line = self.location.map_or(0, |(line, _)| line);
                self.location = Some((line, position.line_position));
            }
            data => {
                self.map_table.load_record(data)?;
            }
        }
        Ok(())
    }

    /// Give a record back for reuse. Returns `false` for pinned records.
    pub fn release(&mut self, record: Record) -> bool {
        self.cache.release(record)
    }

    /// Attach the current location to an error, if line information was seen.
    #[must_use]
    pub fn locate(&self, error: Error) -> Error {
        match self.location {
            Some((line, position)) => Error::AtLocation {
                line,
                position,
                source: Box::new(error),
            },
            None => error,
        }
    }

    /// Resolve a type id, see [`MapTable::resolve_type`]. Errors carry the current location.
    ///
    /// # Errors
    /// Returns the map table's error, wrapped in [`Error::AtLocation`] when possible.
    pub fn resolve_type(&mut self, id: i16, resolver: &dyn TypeResolver) -> Result<TypeHandle> {
        self.map_table
            .resolve_type(id, resolver)
            .map_err(|error| self.locate(error))
    }

    /// Resolve an attribute id, see [`MapTable::resolve_attribute`]. Errors carry the current
    /// location.
    ///
    /// # Errors
    /// Returns the map table's error, wrapped in [`Error::AtLocation`] when possible.
    pub fn resolve_attribute(
        &mut self,
        id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<MemberHandle> {
        self.map_table
            .resolve_attribute(id, resolver)
            .map_err(|error| self.locate(error))
    }

    /// Create the converter for a type id, see [`MapTable::resolve_converter`]. Errors carry the
    /// current location.
    ///
    /// # Errors
    /// Returns the map table's error, wrapped in [`Error::AtLocation`] when possible.
    pub fn resolve_converter(
        &mut self,
        type_id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<ConverterHandle> {
        self.map_table
            .resolve_converter(type_id, resolver)
            .map_err(|error| self.locate(error))
    }

    /// Look up a string id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownId`] for undefined ids, wrapped in [`Error::AtLocation`] when
    /// possible.
    pub fn resolve_string(&self, id: i16) -> Result<String> {
        self.map_table
            .string(id)
            .map(str::to_string)
            .map_err(|error| self.locate(error))
    }
}

/// Reads records from a complete BAML stream held in memory.
#[derive(Debug)]
pub struct BamlReader<'a> {
    parser: Parser<'a>,
    session: RecordReader,
    header: VersionHeader,
    failed: bool,
}

impl<'a> BamlReader<'a> {
    /// Verify the header of `data` and position the reader on the first record.
    ///
    /// # Errors
    /// - [`Error::Empty`] for empty input
    /// - [`Error::OutOfBounds`] if the header is truncated
    /// - [`Error::InvalidSignature`] / [`Error::VersionMismatch`] for foreign or unsupported
    ///   streams
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Self::with_options(data, ReaderOptions::default())
    }

    /// [`BamlReader::new`] with explicit options.
    ///
    /// # Errors
    /// See [`BamlReader::new`].
    pub fn with_options(data: &'a [u8], options: ReaderOptions) -> Result<Self> {
        Self::with_session(data, RecordReader::new(options))
    }

    /// [`BamlReader::new`] continuing an existing session, for example one whose map table was
    /// cloned from an earlier stream.
    ///
    /// # Errors
    /// See [`BamlReader::new`].
    pub fn with_session(data: &'a [u8], mut session: RecordReader) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::Empty);
        }

        let mut parser = Parser::new(data);
        let Some(header) = session.read_header(&mut parser, data.len())? else {
            return Err(out_of_bounds_error!());
        };

        Ok(BamlReader {
            parser,
            session,
            header,
            failed: false,
        })
    }

    /// The verified version header.
    #[must_use]
    pub fn header(&self) -> &VersionHeader {
        &self.header
    }

    /// Offset of the next record.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.parser.pos()
    }

    /// The whole stream.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.parser.data()
    }

    /// Move to an absolute offset. The offset must be a record boundary.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] past the end of the stream.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        self.parser.seek(position)
    }

    /// The decoding session.
    #[must_use]
    pub fn session(&self) -> &RecordReader {
        &self.session
    }

    /// Mutable access to the decoding session.
    pub fn session_mut(&mut self) -> &mut RecordReader {
        &mut self.session
    }

    /// End reading and keep the session.
    #[must_use]
    pub fn into_session(self) -> RecordReader {
        self.session
    }

    /// The tables loaded so far.
    #[must_use]
    pub fn map_table(&self) -> &MapTable {
        self.session.map_table()
    }

    /// Kind of the next record without consuming it.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for an unknown tag.
    pub fn peek_record_type(&self) -> Result<Option<RecordType>> {
        if self.session.is_ended() || !self.parser.has_more_data() {
            return Ok(None);
        }
        RecordType::from_tag(self.parser.peek_byte()?).map(Some)
    }

    /// Read the next record. Returns `Ok(None)` after the document-end record, or at the end of
    /// a stream that has none.
    ///
    /// # Errors
    /// - [`Error::Malformed`] for truncated or damaged records
    /// - [`Error::NotSupported`] for legacy kinds
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.session.is_ended() {
            return Ok(None);
        }
        if !self.parser.has_more_data() {
            log::debug!(
                "BAML stream ended at offset {} without a document end",
                self.parser.pos()
            );
            return Ok(None);
        }

        let start = self.parser.pos();
        let available = self.parser.remaining();
        match self.session.read_record(&mut self.parser, available)? {
            Some(record) => Ok(Some(record)),
            None => Err(malformed_error!(
                "Truncated record at offset {} - {} bytes left",
                start,
                available
            )),
        }
    }

    /// Decode the records between two absolute offsets without moving the reader.
    ///
    /// # Errors
    /// - [`Error::OutOfBounds`] if the range is outside the stream
    /// - [`Error::Malformed`] if a record crosses `end`
    pub fn read_range(&mut self, start: usize, end: usize) -> Result<Vec<Record>> {
        let data = self.parser.data();
        if start > end || end > data.len() {
            return Err(out_of_bounds_error!());
        }

        let mut parser = Parser::new(&data[..end]);
        parser.seek(start)?;

        let mut records = Vec::new();
        while parser.pos() < end {
            let offset = parser.pos();
            match self.session.read_record(&mut parser, end - offset)? {
                Some(record) => records.push(record),
                None => {
                    return Err(malformed_error!(
                        "Record at offset {} crosses the range end {}",
                        offset,
                        end
                    ))
                }
            }
        }
        Ok(records)
    }

    /// Read every remaining record.
    ///
    /// # Errors
    /// Returns the first error of [`BamlReader::next_record`].
    pub fn read_all(mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Give a record back for reuse. Returns `false` for pinned records.
    pub fn release(&mut self, record: Record) -> bool {
        self.session.release(record)
    }

    /// See [`RecordReader::resolve_type`].
    ///
    /// # Errors
    /// See [`RecordReader::resolve_type`].
    pub fn resolve_type(&mut self, id: i16, resolver: &dyn TypeResolver) -> Result<TypeHandle> {
        self.session.resolve_type(id, resolver)
    }

    /// See [`RecordReader::resolve_attribute`].
    ///
    /// # Errors
    /// See [`RecordReader::resolve_attribute`].
    pub fn resolve_attribute(
        &mut self,
        id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<MemberHandle> {
        self.session.resolve_attribute(id, resolver)
    }

    /// See [`RecordReader::resolve_converter`].
    ///
    /// # Errors
    /// See [`RecordReader::resolve_converter`].
    pub fn resolve_converter(
        &mut self,
        type_id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<ConverterHandle> {
        self.session.resolve_converter(type_id, resolver)
    }

    /// See [`RecordReader::resolve_string`].
    ///
    /// # Errors
    /// See [`RecordReader::resolve_string`].
    pub fn resolve_string(&self, id: i16) -> Result<String> {
        self.session.resolve_string(id)
    }
}

impl Iterator for BamlReader<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let next = self.next_record().transpose();
        if matches!(next, Some(Err(_))) {
            self.failed = true;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        baml::{
            records::{PropertyRecord, StringInfoRecord, TextRecord},
            resolver::MemoryResolver,
            version::BamlVersion,
        },
        test::{framed, stream},
    };

    #[test]
    fn empty_and_truncated_headers() {
        assert!(matches!(BamlReader::new(&[]), Err(Error::Empty)));

        let bytes = stream(&[]);
        assert!(matches!(
            BamlReader::new(&bytes[..HEADER_SIZE - 1]),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn version_mismatch_reads_nothing() {
        let mut bytes = Vec::new();
        VersionHeader::new(BamlVersion::new(0, 95))
            .write(&mut bytes)
            .unwrap();
        bytes.extend(framed(&[RecordData::DocumentEnd]));

        match BamlReader::new(&bytes) {
            Err(Error::VersionMismatch { found, expected }) => {
                assert_eq!(found, BamlVersion::new(0, 95));
                assert_eq!(expected, BamlVersion::CURRENT);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn tables_are_fed_while_reading() {
        let bytes = stream(&[
            RecordData::StringInfo(StringInfoRecord {
                string_id: 0,
                value: "Accent".to_string(),
            }),
            RecordData::Text(TextRecord {
                value: "body".to_string(),
            }),
        ]);

        let reader = BamlReader::new(&bytes).unwrap();
        let mut session_reader = reader;
        while session_reader.next_record().unwrap().is_some() {}
        assert_eq!(session_reader.resolve_string(0).unwrap(), "Accent");
        assert_eq!(session_reader.resolve_string(-1).unwrap(), "Name");
        assert!(session_reader.session().is_ended());
        assert!(session_reader.next_record().unwrap().is_none());
    }

    #[test]
    fn truncated_record_is_malformed() {
        let mut bytes = stream(&[RecordData::Text(TextRecord {
            value: "cut short".to_string(),
        })]);
        // drop document end and the last payload byte
        bytes.truncate(bytes.len() - 2);

        let mut reader = BamlReader::new(&bytes).unwrap();
        assert!(reader.next_record().unwrap().is_some());
        let position = reader.offset();
        assert!(matches!(
            reader.next_record(),
            Err(Error::Malformed { .. })
        ));
        assert_eq!(reader.offset(), position);
    }

    /// Walks to the end through a mutable borrow, the way deferred sections hold the reader.
    fn skip_all(reader: &mut BamlReader<'_>) -> Vec<usize> {
        let mut offsets = vec![reader.offset()];
        while reader.next_record().unwrap().is_some() {
            offsets.push(reader.offset());
        }
        offsets
    }

    #[test]
    fn offsets_through_a_borrow() {
        let bytes = stream(&[RecordData::Text(TextRecord {
            value: "abc".to_string(),
        })]);
        let mut reader = BamlReader::new(&bytes).unwrap();
        let offsets = skip_all(&mut reader);

        // document start, text, document end
        assert_eq!(offsets, [HEADER_SIZE, HEADER_SIZE + 7, HEADER_SIZE + 7 + 6, bytes.len()]);
        assert_eq!(reader.offset(), bytes.len());
    }

    #[test]
    fn iterator_stops_after_an_error() {
        let mut bytes = stream(&[]);
        let end = bytes.len() - 1;
        bytes[end] = 57;

        let results: Vec<_> = BamlReader::new(&bytes).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn incomplete_record_is_not_consumed() {
        let bytes = stream(&[RecordData::Property(PropertyRecord {
            attribute_id: 1,
            value: "x".repeat(300),
        })]);
        let mut session = RecordReader::new(ReaderOptions::default());
        let mut parser = Parser::new(&bytes);
        session.read_header(&mut parser, bytes.len()).unwrap();

        // document start
        assert!(session.read_record(&mut parser, 7).unwrap().is_some());
        let before = parser.pos();
        for available in [0, 1, 2, 100] {
            assert!(session.read_record(&mut parser, available).unwrap().is_none());
            assert_eq!(parser.pos(), before);
        }
        assert!(session
            .read_record(&mut parser, bytes.len() - before)
            .unwrap()
            .is_some());
    }

    #[test]
    fn records_before_header_are_rejected() {
        let mut session = RecordReader::new(ReaderOptions::default());
        let mut parser = Parser::new(&[2]);
        assert!(matches!(
            session.read_record(&mut parser, 1),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn resolution_errors_carry_location() {
        let bytes = stream(&[
            RecordData::LineNumberAndPosition(crate::baml::records::LineNumberAndPositionRecord {
                line_number: 12,
                line_position: 4,
            }),
            RecordData::LinePosition(crate::baml::records::LinePositionRecord {
                line_position: 9,
            }),
        ]);
        let mut reader = BamlReader::new(&bytes).unwrap();
        while reader.next_record().unwrap().is_some() {}
        assert_eq!(reader.session().location(), Some((12, 9)));

        let resolver = MemoryResolver::new();
        match reader.resolve_type(7, &resolver) {
            Err(Error::AtLocation {
                line,
                position,
                source,
            }) => {
                assert_eq!((line, position), (12, 9));
                assert!(matches!(*source, Error::UnknownId { id: 7, .. }));
            }
            other => panic!("unexpected {other:?}"),
        }

        // without line information the error is passed through unchanged
        let bytes = stream(&[]);
        let mut reader = BamlReader::new(&bytes).unwrap();
        assert!(matches!(
            reader.resolve_type(7, &resolver),
            Err(Error::UnknownId { .. })
        ));
    }

    #[test]
    fn strict_trailing_bytes() {
        let mut bytes = stream(&[]);
        let end = bytes.len() - 1;
        // StringInfo with one byte of padding after the string: size 1 + id 2 + len 1 + "a" + pad
        bytes.splice(end..end, [32, 6, 0, 0, 1, b'a', 0]);

        let mut lenient = BamlReader::new(&bytes).unwrap();
        assert_eq!(lenient.by_ref().count(), 3);
        assert_eq!(lenient.resolve_string(0).unwrap(), "a");

        let options = ReaderOptions {
            verify_trailing_bytes: true,
        };
        let mut strict = BamlReader::with_options(&bytes, options).unwrap();
        strict.next_record().unwrap();
        assert!(matches!(
            strict.next_record(),
            Err(Error::Malformed { .. })
        ));
    }
}
