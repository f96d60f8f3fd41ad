//! Incremental reading integration tests.
//!
//! A producer thread feeds a BAML stream through a bounded staging channel in small writes while
//! the consumer decodes records as soon as they are complete. The decoded records must equal a
//! one-shot read of the same bytes.

use std::{
    io::{Cursor, ErrorKind, Write},
    thread,
};

use bamlscope::prelude::*;

fn document(texts: usize) -> Result<Vec<u8>> {
    let mut writer = BamlWriter::new(Cursor::new(Vec::new()))?;
    writer.write_document_start()?;
    let panel = writer.add_type("MyApp", "MyApp.LogPanel")?;
    let level = writer.add_attribute("MyApp", "MyApp.LogPanel", "Level", AttributeUsage::Default)?;

    writer.write_element_start(panel)?;
    writer.write_property(level, "Verbose")?;
    for index in 0..texts {
        writer.write_text(&format!("line {index}: {}", "x".repeat(index % 40)))?;
    }
    writer.write_element_end()?;
    writer.write_document_end()?;
    Ok(writer.finish()?.into_inner())
}

/// Push `bytes` through `writer` in slices of `step`, retrying while the channel is full.
fn produce(mut writer: StagingWriter, bytes: &[u8], step: usize) {
    for slice in bytes.chunks(step) {
        let mut rest = slice;
        while !rest.is_empty() {
            match writer.write(rest) {
                Ok(count) => rest = &rest[count..],
                Err(error) if error.kind() == ErrorKind::Other => thread::yield_now(),
                Err(error) => panic!("staging write failed: {error}"),
            }
        }
    }
    while writer.flush().is_err() {
        thread::yield_now();
    }
    writer.close().expect("close after a successful flush");
}

/// Decode until the document ends, yielding whenever the next record has not arrived.
fn consume(reader: &mut IncrementalReader) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    while !reader.is_finished() {
        match reader.next_record()? {
            Some(record) => records.push(record),
            None => thread::yield_now(),
        }
    }
    Ok(records)
}

#[test]
fn threaded_producer() -> Result<()> {
    let bytes = document(300)?;
    let expected = BamlReader::new(&bytes)?.read_all()?;

    let (writer, source) = channel(32, 16)?;
    let producer = {
        let bytes = bytes.clone();
        thread::spawn(move || produce(writer, &bytes, 7))
    };

    let mut reader = IncrementalReader::new(source.clone(), ReaderOptions::default());
    let records = consume(&mut reader)?;
    producer.join().expect("producer thread panicked");

    assert_eq!(records, expected);
    assert_eq!(reader.header().map(|header| header.reader), Some(BamlVersion::CURRENT));
    assert_eq!(reader.position(), bytes.len() as u64);
    assert_eq!(source.discarded()?, bytes.len() as u64);
    assert!(source.is_closed()?);
    assert!(reader.next_record()?.is_none());

    let session = reader.into_session();
    assert_eq!(session.map_table().type_count(), 1);
    assert_eq!(session.map_table().attribute_count(), 1);
    Ok(())
}

#[test]
fn partial_records_wait() -> Result<()> {
    let bytes = document(1)?;
    let (mut writer, source) = channel(4, 64)?;
    let mut reader = IncrementalReader::new(source, ReaderOptions::default());

    // half a header
    writer.write_all(&bytes[..14])?;
    writer.flush()?;
    assert!(reader.next_record()?.is_none());
    assert!(reader.header().is_none());

    // the header and one byte of the document start record
    writer.write_all(&bytes[14..29])?;
    writer.flush()?;
    assert!(reader.next_record()?.is_none());
    assert!(reader.header().is_some());
    assert_eq!(reader.position(), 28);

    writer.write_all(&bytes[29..])?;
    writer.close()?;
    let first = reader.next_record()?.map(|record| record.record_type());
    assert_eq!(first, Some(RecordType::DocumentStart));
    assert_eq!(consume(&mut reader)?.len(), BamlReader::new(&bytes)?.read_all()?.len() - 1);
    Ok(())
}

#[test]
fn closed_inside_a_record() -> Result<()> {
    let bytes = document(1)?;
    let (mut writer, source) = channel(64, 64)?;
    writer.write_all(&bytes[..bytes.len() - 4])?;
    writer.close()?;

    let mut reader = IncrementalReader::new(source, ReaderOptions::default());
    let error = loop {
        match reader.next_record() {
            Ok(Some(_)) => {}
            Ok(None) => panic!("a truncated stream must not end quietly"),
            Err(error) => break error,
        }
    };
    assert!(matches!(error, Error::Malformed { .. }));
    Ok(())
}

#[test]
fn closed_before_the_header() -> Result<()> {
    let (writer, source) = channel(8, 8)?;
    drop(writer);
    let mut reader = IncrementalReader::new(source, ReaderOptions::default());
    assert!(matches!(reader.next_record(), Err(Error::Empty)));

    let (mut writer, source) = channel(8, 8)?;
    writer.write_all(b"\x0C\0\0\0M\0S\0")?;
    writer.close()?;
    let mut reader = IncrementalReader::new(source, ReaderOptions::default());
    assert!(matches!(reader.next_record(), Err(Error::OutOfBounds { .. })));
    Ok(())
}
