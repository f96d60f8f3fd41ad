//! Deferred resource dictionary integration tests.
//!
//! A dictionary is written with back-patched keys and read back both sequentially and through a
//! [`DeferredSection`]; values fetched by key must decode to exactly the records a sequential
//! pass sees at the same offsets.

use std::{io::Cursor, ops::Range};

use bamlscope::{baml::deferred::DeferredState, prelude::*};

const SWATCHES: [(&str, &str); 3] = [
    ("Accent", "#FF0078D7"),
    ("Muted", "#FF767676"),
    ("Warning", "#FFFFB900"),
];

/// A `Palette` element holding a deferred block with one string key per swatch. Values are
/// written in `order`, which need not be the key order.
fn palette(order: &[usize]) -> Result<Vec<u8>> {
    let mut writer = BamlWriter::new(Cursor::new(Vec::new()))?;
    writer.write_document_start()?;

    let palette = writer.add_type("MyApp", "MyApp.Palette")?;
    let swatch = writer.add_type("MyApp", "MyApp.Swatch")?;
    let color = writer.add_attribute("MyApp", "MyApp.Swatch", "Color", AttributeUsage::Default)?;
    let mut names = Vec::new();
    for (name, _) in SWATCHES {
        names.push(writer.add_string(name)?);
    }

    writer.write_element_start(palette)?;
    writer.begin_deferred_content()?;
    let mut tickets = Vec::new();
    for name in &names {
        tickets.push(Some(writer.write_key_string(*name, true, false)?));
    }
    for &index in order {
        let Some(ticket) = tickets[index].take() else {
            panic!("value {index} written twice");
        };
        writer.begin_deferred_value(ticket)?;
        writer.write_element_start(swatch)?;
        writer.write_property(color, SWATCHES[index].1)?;
        writer.write_element_end()?;
    }
    writer.end_deferred_content()?;
    writer.write_element_end()?;
    writer.write_document_end()?;

    Ok(writer.finish()?.into_inner())
}

/// Read up to and excluding the `DeferableContentStart` record.
fn seek_to_block(reader: &mut BamlReader<'_>) -> Result<()> {
    while reader.peek_record_type()? != Some(RecordType::DeferableContentStart) {
        if reader.next_record()?.is_none() {
            panic!("stream has no deferred block");
        }
    }
    Ok(())
}

/// Payloads of the records a sequential pass decodes inside `range`.
fn sequential(bytes: &[u8], range: Range<usize>) -> Result<Vec<RecordData>> {
    let mut reader = BamlReader::new(bytes)?;
    let mut records = Vec::new();
    loop {
        let offset = reader.offset();
        let Some(record) = reader.next_record()? else {
            break;
        };
        if range.contains(&offset) {
            records.push(record.data);
        }
    }
    Ok(records)
}

fn color_of(records: &[Record]) -> Option<&str> {
    records.iter().find_map(|record| match &record.data {
        RecordData::Property(property) => Some(property.value.as_str()),
        _ => None,
    })
}

#[test]
fn random_access_matches_sequential() -> Result<()> {
    let bytes = palette(&[0, 1, 2])?;
    let mut reader = BamlReader::new(&bytes)?;
    seek_to_block(&mut reader)?;

    let mut section = DeferredSection::new();
    section.open(&mut reader)?;
    let keys = section.scan_keys(&mut reader)?;
    assert_eq!(keys.len(), 3);
    for (key, (name, _)) in keys.iter().zip(SWATCHES) {
        assert_eq!(key.key, ResourceKey::String(name.to_string()));
        assert!(key.shared);
        assert!(!key.shared_set);
    }

    // last value first, so nothing before it was decoded
    for index in [2, 0, 1] {
        let range = section.value_range(index)?;
        let expected = sequential(&bytes, range.clone())?;
        let raw = section.value_bytes(&reader, index)?;
        let records = section.value(&mut reader, index)?;

        let decoded: Vec<RecordData> = records.iter().map(|record| record.data.clone()).collect();
        assert_eq!(decoded, expected);
        assert_eq!(color_of(records), Some(SWATCHES[index].1));

        let mut encoded = Vec::new();
        for record in records {
            encoded.extend(record.to_bytes()?);
        }
        assert_eq!(encoded.as_slice(), raw);
        assert_eq!(raw.len(), range.len());
    }
    assert_eq!(section.materialized(), 3);
    Ok(())
}

#[test]
fn values_out_of_key_order() -> Result<()> {
    let bytes = palette(&[2, 0, 1])?;
    let mut reader = BamlReader::new(&bytes)?;
    seek_to_block(&mut reader)?;

    let mut section = DeferredSection::new();
    section.open(&mut reader)?;
    section.scan_keys(&mut reader)?;

    let positions: Vec<i32> = section.keys().iter().map(|key| key.value_position).collect();
    assert!(positions[2] < positions[0]);
    assert!(positions[0] < positions[1]);

    for (name, color) in SWATCHES {
        let Some(records) = section.value_by_key(&mut reader, name)? else {
            panic!("key {name} not found");
        };
        assert_eq!(records.len(), 3);
        assert_eq!(color_of(records), Some(color));
    }

    assert_eq!(section.value_range(1)?.end, section.content_range().end);
    Ok(())
}

#[test]
fn section_lifecycle() -> Result<()> {
    let bytes = palette(&[0, 1, 2])?;
    let mut reader = BamlReader::new(&bytes)?;
    seek_to_block(&mut reader)?;

    let mut section = DeferredSection::new();
    assert_eq!(section.state(), DeferredState::Unopened);
    assert!(section.value_range(0).is_err());

    section.open(&mut reader)?;
    assert_eq!(section.state(), DeferredState::HeaderRead);
    assert!(section.open(&mut reader).is_err());

    section.scan_keys(&mut reader)?;
    assert_eq!(section.state(), DeferredState::ScanningKeys);
    assert_eq!(reader.offset(), section.values_start());
    assert!(section.scan_keys(&mut reader).is_err());
    assert!(section.value_by_key(&mut reader, "Missing")?.is_none());
    assert!(section.value_range(3).is_err());

    section.value(&mut reader, 1)?;
    assert_eq!(section.state(), DeferredState::ValueMaterialized);

    section.close(&mut reader)?;
    assert_eq!(section.state(), DeferredState::Closed);
    assert_eq!(section.materialized(), 0);
    assert_eq!(reader.offset(), section.content_range().end);

    // the palette element ends right after the block
    let next = reader.next_record()?.map(|record| record.record_type());
    assert_eq!(next, Some(RecordType::ElementEnd));
    assert!(section.value(&mut reader, 0).is_err());
    Ok(())
}

#[test]
fn type_and_element_keys() -> Result<()> {
    let mut writer = BamlWriter::new(Cursor::new(Vec::new()))?;
    writer.write_document_start()?;
    let swatch = writer.add_type("MyApp", "MyApp.Swatch")?;
    let name = writer.add_attribute("MyApp", "MyApp.Swatch", "Name", AttributeUsage::Default)?;

    writer.write_element_start(swatch)?;
    writer.begin_deferred_content()?;
    let by_type = writer.write_key_type(swatch, false, true)?;
    let by_element = writer.write_key_element_start(swatch, true, true)?;
    writer.write_property(name, "Composite")?;
    writer.write_key_element_end()?;

    writer.begin_deferred_value(by_element)?;
    writer.write_text("element keyed")?;
    writer.begin_deferred_value(by_type)?;
    writer.write_text("type keyed")?;
    writer.end_deferred_content()?;
    writer.write_element_end()?;
    writer.write_document_end()?;
    let bytes = writer.finish()?.into_inner();

    let mut reader = BamlReader::new(&bytes)?;
    seek_to_block(&mut reader)?;
    let mut section = DeferredSection::new();
    section.open(&mut reader)?;
    let keys = section.scan_keys(&mut reader)?.to_vec();

    assert_eq!(keys[0].key, ResourceKey::Type("MyApp.Swatch".to_string()));
    assert!(!keys[0].shared && keys[0].shared_set);
    let ResourceKey::Element(records) = &keys[1].key else {
        panic!("expected an element key, got {:?}", keys[1].key);
    };
    let kinds: Vec<RecordType> = records.iter().map(Record::record_type).collect();
    assert_eq!(
        kinds,
        [
            RecordType::KeyElementStart,
            RecordType::Property,
            RecordType::KeyElementEnd
        ]
    );
    assert!(!keys[1].matches("MyApp.Swatch"));

    let text = |records: &[Record]| match &records[0].data {
        RecordData::Text(text) => text.value.clone(),
        other => panic!("expected text, got {other:?}"),
    };
    assert_eq!(text(section.value(&mut reader, 1)?), "element keyed");
    let Some(records) = section.value_by_key(&mut reader, "MyApp.Swatch")? else {
        panic!("type key not found");
    };
    assert_eq!(text(records), "type keyed");
    Ok(())
}

#[test]
fn corrupt_value_position() -> Result<()> {
    let mut bytes = palette(&[0, 1, 2])?;
    let start = {
        let mut reader = BamlReader::new(&bytes)?;
        seek_to_block(&mut reader)?;
        let mut section = DeferredSection::new();
        section.open(&mut reader)?;
        section.content_range().start
    };

    // first key: tag, size, string id, then the value position
    let at = start + 1 + 1 + 2;
    bytes[at..at + 4].copy_from_slice(&i32::MAX.to_le_bytes());

    let mut reader = BamlReader::new(&bytes)?;
    seek_to_block(&mut reader)?;
    let mut section = DeferredSection::new();
    section.open(&mut reader)?;
    assert!(matches!(
        section.scan_keys(&mut reader),
        Err(Error::Malformed { .. })
    ));
    Ok(())
}
