//! Bounded staging channel between a producer of BAML bytes and an incremental reader.
//!
//! A stream often arrives piecemeal (a background thread reading a package part, a network
//! response) while the consumer wants to decode whatever is already there. [`channel`] returns
//! the two ends of an in-memory byte channel:
//!
//! - [`StagingWriter`] implements [`std::io::Write`]. It fills a private chunk without taking any
//!   lock and publishes it once it is full, or when flushed.
//! - [`StagingReader`] copies published bytes by absolute stream offset and tells the channel
//!   which prefix it no longer needs.
//!
//! The channel keeps two watermarks: everything below the *discard* watermark is gone, nothing at
//! or past the *write* watermark exists yet. The mutex only guards the chunk list and the
//! watermarks; byte copies happen outside it. Accesses outside the window fail with
//! [`Error::StagingError`] instead of blocking, and so does publishing more than `max_chunks`
//! unreleased chunks.
//!
//! [`IncrementalReader`] drives a [`RecordReader`] from the reading end.
//!
//! # Examples
//!
//! ```rust
//! use std::io::Write;
//! use bamlscope::baml::staging::channel;
//!
//! let (mut writer, reader) = channel(4, 8)?;
//! writer.write_all(b"BAML bytes")?;
//! writer.flush()?;
//!
//! let mut buffer = [0; 4];
//! assert_eq!(reader.read_at(5, &mut buffer)?, 4);
//! assert_eq!(&buffer, b"byte");
//!
//! reader.release_up_to(8)?;
//! assert!(reader.read_at(2, &mut buffer).is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex},
};

use crate::{
    baml::{
        reader::{ReaderOptions, RecordReader},
        records::Record,
        version::VersionHeader,
    },
    file::parser::Parser,
    Error, Result,
};

#[derive(Debug, Clone)]
struct Chunk {
    start: u64,
    bytes: Arc<[u8]>,
}

impl Chunk {
    fn end(&self) -> u64 {
        self.start + self.bytes.len() as u64
    }
}

#[derive(Debug, Default)]
struct ChannelState {
    chunks: VecDeque<Chunk>,
    write_watermark: u64,
    discard_watermark: u64,
    closed: bool,
}

#[derive(Debug)]
struct Shared {
    state: Mutex<ChannelState>,
    max_chunks: usize,
}

/// Create a channel publishing chunks of up to `chunk_size` bytes and retaining at most
/// `max_chunks` of them until the reader releases them.
///
/// # Errors
/// Returns [`Error::StagingError`] if either bound is zero.
pub fn channel(chunk_size: usize, max_chunks: usize) -> Result<(StagingWriter, StagingReader)> {
    if chunk_size == 0 || max_chunks == 0 {
        return Err(Error::StagingError(format!(
            "chunk size {chunk_size} and chunk bound {max_chunks} must be positive"
        )));
    }

    let shared = Arc::new(Shared {
        state: Mutex::new(ChannelState::default()),
        max_chunks,
    });

    Ok((
        StagingWriter {
            shared: shared.clone(),
            pending: Vec::with_capacity(chunk_size),
            chunk_size,
            closed: false,
        },
        StagingReader { shared },
    ))
}

/// Producing end of a staging channel.
#[derive(Debug)]
pub struct StagingWriter {
    shared: Arc<Shared>,
    pending: Vec<u8>,
    chunk_size: usize,
    closed: bool,
}

impl StagingWriter {
    fn publish(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut state = lock!(self.shared.state)?;
        if state.closed {
            return Err(Error::StagingError("the channel is closed".to_string()));
        }
        if state.chunks.len() >= self.shared.max_chunks {
            return Err(Error::StagingError(format!(
                "{} chunks are retained, the reader released only up to offset {}",
                state.chunks.len(),
                state.discard_watermark
            )));
        }

        let pending = std::mem::replace(&mut self.pending, Vec::with_capacity(self.chunk_size));
        let chunk = Chunk {
            start: state.write_watermark,
            bytes: Arc::from(pending),
        };
        state.write_watermark = chunk.end();
        state.chunks.push_back(chunk);
        Ok(())
    }

    /// Offset up to which bytes are published.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the channel lock is poisoned.
    pub fn published(&self) -> Result<u64> {
        with_lock!(self.shared.state, |state: &ChannelState| state.write_watermark)
    }

    /// Publish the pending bytes and mark the end of the stream.
    ///
    /// # Errors
    /// Returns [`Error::StagingError`] if the pending chunk cannot be published.
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    fn finish(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.publish()?;
        lock!(self.shared.state)?.closed = true;
        self.closed = true;
        Ok(())
    }
}

impl io::Write for StagingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pending.len() >= self.chunk_size {
            self.publish().map_err(io::Error::other)?;
        }

        let count = buf.len().min(self.chunk_size - self.pending.len());
        self.pending.extend_from_slice(&buf[..count]);
        Ok(count)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.publish().map_err(io::Error::other)
    }
}

impl Drop for StagingWriter {
    fn drop(&mut self) {
        if let Err(error) = self.finish() {
            log::warn!("Staging writer dropped with unpublished bytes - {error}");
        }
    }
}

/// Consuming end of a staging channel.
#[derive(Debug, Clone)]
pub struct StagingReader {
    shared: Arc<Shared>,
}

impl StagingReader {
    /// Offset up to which bytes can be read.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the channel lock is poisoned.
    pub fn available(&self) -> Result<u64> {
        with_lock!(self.shared.state, |state: &ChannelState| state.write_watermark)
    }

    /// Offset below which bytes were released.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the channel lock is poisoned.
    pub fn discarded(&self) -> Result<u64> {
        with_lock!(self.shared.state, |state: &ChannelState| state
            .discard_watermark)
    }

    /// `true` once the writer closed the channel; [`StagingReader::available`] is then final.
    ///
    /// # Errors
    /// Returns [`Error::LockError`] if the channel lock is poisoned.
    pub fn is_closed(&self) -> Result<bool> {
        with_lock!(self.shared.state, |state: &ChannelState| state.closed)
    }

    /// Copy bytes starting at `position` into `buffer`, returning how many were available.
    ///
    /// # Errors
    /// Returns [`Error::StagingError`] if `position` is below the discard watermark or past the
    /// write watermark.
    pub fn read_at(&self, position: u64, buffer: &mut [u8]) -> Result<usize> {
        let (end, chunks) = {
            let state = lock!(self.shared.state)?;
            if position < state.discard_watermark {
                return Err(Error::StagingError(format!(
                    "offset {position} was already released (discard watermark {})",
                    state.discard_watermark
                )));
            }
            if position > state.write_watermark {
                return Err(Error::StagingError(format!(
                    "offset {position} was not written yet (write watermark {})",
                    state.write_watermark
                )));
            }

            let end = state
                .write_watermark
                .min(position + buffer.len() as u64);
            let chunks: Vec<Chunk> = state
                .chunks
                .iter()
                .filter(|chunk| chunk.end() > position && chunk.start < end)
                .cloned()
                .collect();
            (end, chunks)
        };

        for chunk in &chunks {
            let from = position.max(chunk.start);
            let to = end.min(chunk.end());
            let source = &chunk.bytes[(from - chunk.start) as usize..(to - chunk.start) as usize];
            let target = (from - position) as usize;
            buffer[target..target + source.len()].copy_from_slice(source);
        }

        Ok((end - position) as usize)
    }

    /// Declare every byte below `position` consumed. Chunks that lie entirely below it are freed.
    ///
    /// # Errors
    /// Returns [`Error::StagingError`] if `position` is past the write watermark or below the
    /// current discard watermark.
    pub fn release_up_to(&self, position: u64) -> Result<()> {
        let mut state = lock!(self.shared.state)?;
        if position > state.write_watermark {
            return Err(Error::StagingError(format!(
                "cannot release up to {position}, only {} bytes were written",
                state.write_watermark
            )));
        }
        if position < state.discard_watermark {
            return Err(Error::StagingError(format!(
                "cannot move the discard watermark back from {} to {position}",
                state.discard_watermark
            )));
        }

        state.discard_watermark = position;
        while state
            .chunks
            .front()
            .is_some_and(|chunk| chunk.end() <= position)
        {
            state.chunks.pop_front();
        }
        Ok(())
    }
}

/// Decodes records from a [`StagingReader`] as they become available.
#[derive(Debug)]
pub struct IncrementalReader {
    source: StagingReader,
    session: RecordReader,
    buffer: Vec<u8>,
    base: u64,
    header: Option<VersionHeader>,
}

impl IncrementalReader {
    /// A reader with a fresh session.
    #[must_use]
    pub fn new(source: StagingReader, options: ReaderOptions) -> Self {
        Self::with_session(source, RecordReader::new(options))
    }

    /// A reader continuing an existing session.
    #[must_use]
    pub fn with_session(source: StagingReader, session: RecordReader) -> Self {
        IncrementalReader {
            source,
            session,
            buffer: Vec::new(),
            base: 0,
            header: None,
        }
    }

    /// The header, once it arrived.
    #[must_use]
    pub fn header(&self) -> Option<&VersionHeader> {
        self.header.as_ref()
    }

    /// Stream offset of the next undecoded byte.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.base
    }

    /// `true` once the document-end record was decoded.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_ended()
    }

    /// The decoding session.
    pub fn session_mut(&mut self) -> &mut RecordReader {
        &mut self.session
    }

    /// End reading and keep the session.
    #[must_use]
    pub fn into_session(self) -> RecordReader {
        self.session
    }

    fn fill(&mut self) -> Result<()> {
        let fetched = self.base + self.buffer.len() as u64;
        let available = self.source.available()?;
        if available <= fetched {
            return Ok(());
        }

        let start = self.buffer.len();
        self.buffer.resize(start + (available - fetched) as usize, 0);
        let read = self.source.read_at(fetched, &mut self.buffer[start..])?;
        self.buffer.truncate(start + read);
        Ok(())
    }

    fn consume(&mut self, count: usize) -> Result<()> {
        self.buffer.drain(..count);
        self.base += count as u64;
        self.source.release_up_to(self.base)
    }

    fn starved(&self) -> Result<bool> {
        let fetched = self.base + self.buffer.len() as u64;
        Ok(self.source.is_closed()? && fetched >= self.source.available()?)
    }

    /// Decode the next record if it has fully arrived.
    ///
    /// Returns `Ok(None)` while more bytes are needed, and after the document end.
    ///
    /// # Errors
    /// - header and decoding errors of [`RecordReader`]
    /// - [`Error::Malformed`] if the channel was closed in the middle of a record
    /// - [`Error::StagingError`] if the channel window was violated
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if self.session.is_ended() {
            return Ok(None);
        }
        self.fill()?;

        if self.header.is_none() {
            let mut parser = Parser::new(&self.buffer);
            let header = self.session.read_header(&mut parser, self.buffer.len())?;
            let consumed = parser.pos();
            match header {
                Some(header) => {
                    self.header = Some(header);
                    self.consume(consumed)?;
                }
                None if self.starved()? => {
                    return Err(if self.buffer.is_empty() {
                        Error::Empty
                    } else {
                        out_of_bounds_error!()
                    })
                }
                None => return Ok(None),
            }
        }

        let mut parser = Parser::new(&self.buffer);
        let record = self.session.read_record(&mut parser, self.buffer.len())?;
        let consumed = parser.pos();

        match record {
            Some(record) => {
                self.consume(consumed)?;
                Ok(Some(record))
            }
            None if !self.buffer.is_empty() && self.starved()? => Err(malformed_error!(
                "Stream closed inside a record at offset {}",
                self.base
            )),
            None => Ok(None),
        }
    }

    /// Give a record back for reuse. Returns `false` for pinned records.
    pub fn release(&mut self, record: Record) -> bool {
        self.session.release(record)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{
        baml::records::{RecordData, RecordType, TextRecord},
        test::stream,
    };

    #[test]
    fn zero_bounds_are_rejected() {
        assert!(matches!(channel(0, 1), Err(Error::StagingError(_))));
        assert!(matches!(channel(1, 0), Err(Error::StagingError(_))));
    }

    #[test]
    fn reads_span_chunks() {
        let (mut writer, reader) = channel(3, 16).unwrap();
        writer.write_all(b"abcdefgh").unwrap();
        // two full chunks published, "gh" pending until flush
        assert_eq!(reader.available().unwrap(), 6);
        writer.flush().unwrap();
        assert_eq!(reader.available().unwrap(), 8);

        let mut buffer = [0; 6];
        assert_eq!(reader.read_at(1, &mut buffer).unwrap(), 6);
        assert_eq!(&buffer, b"bcdefg");

        let mut buffer = [0; 16];
        assert_eq!(reader.read_at(6, &mut buffer).unwrap(), 2);
        assert_eq!(&buffer[..2], b"gh");
        assert_eq!(reader.read_at(8, &mut buffer).unwrap(), 0);
    }

    #[test]
    fn watermarks() {
        let (mut writer, reader) = channel(2, 16).unwrap();
        writer.write_all(b"0123456789").unwrap();
        writer.flush().unwrap();

        let mut buffer = [0; 2];
        assert!(matches!(
            reader.read_at(11, &mut buffer),
            Err(Error::StagingError(_))
        ));

        reader.release_up_to(5).unwrap();
        assert_eq!(reader.discarded().unwrap(), 5);
        assert!(matches!(
            reader.read_at(4, &mut buffer),
            Err(Error::StagingError(_))
        ));
        assert_eq!(reader.read_at(5, &mut buffer).unwrap(), 2);
        assert_eq!(&buffer, b"56");

        assert!(matches!(
            reader.release_up_to(3),
            Err(Error::StagingError(_))
        ));
        assert!(matches!(
            reader.release_up_to(11),
            Err(Error::StagingError(_))
        ));
    }

    #[test]
    fn retained_bound() {
        let (mut writer, reader) = channel(2, 2).unwrap();
        writer.write_all(b"abcd").unwrap();
        writer.flush().unwrap();

        writer.write_all(b"ef").unwrap();
        let error = writer.flush().unwrap_err();
        assert!(error.to_string().contains("chunks are retained"));

        reader.release_up_to(2).unwrap();
        writer.flush().unwrap();
        assert_eq!(reader.available().unwrap(), 6);
    }

    #[test]
    fn close_is_final() {
        let (mut writer, reader) = channel(8, 4).unwrap();
        writer.write_all(b"tail").unwrap();
        assert!(!reader.is_closed().unwrap());
        writer.close().unwrap();
        assert!(reader.is_closed().unwrap());
        assert_eq!(reader.available().unwrap(), 4);
    }

    #[test]
    fn incremental_reader_waits_for_bytes() {
        let bytes = stream(&[RecordData::Text(TextRecord {
            value: "incremental".to_string(),
        })]);
        let (mut writer, reader) = channel(5, 64).unwrap();
        let mut incremental = IncrementalReader::new(reader, ReaderOptions::default());

        let mut kinds = Vec::new();
        for piece in bytes.chunks(3) {
            writer.write_all(piece).unwrap();
            writer.flush().unwrap();
            while let Some(record) = incremental.next_record().unwrap() {
                kinds.push(record.record_type());
                incremental.release(record);
            }
        }

        assert_eq!(
            kinds,
            [
                RecordType::DocumentStart,
                RecordType::Text,
                RecordType::DocumentEnd
            ]
        );
        assert!(incremental.is_finished());
        assert_eq!(incremental.position(), bytes.len() as u64);
    }

    #[test]
    fn closed_mid_record() {
        let bytes = stream(&[]);
        let (mut writer, reader) = channel(64, 4).unwrap();
        writer.write_all(&bytes[..bytes.len() - 4]).unwrap();
        writer.close().unwrap();

        let mut incremental = IncrementalReader::new(reader, ReaderOptions::default());
        assert!(matches!(
            incremental.next_record(),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn closed_before_header() {
        let (writer, reader) = channel(64, 4).unwrap();
        writer.close().unwrap();
        let mut incremental = IncrementalReader::new(reader, ReaderOptions::default());
        assert!(matches!(incremental.next_record(), Err(Error::Empty)));
    }
}
