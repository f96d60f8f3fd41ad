//! Benchmarks for the BAML record codec.
//!
//! Measures:
//! - Writing a page through the stream writer (two-pass variable records, interning)
//! - Sequential decoding of the same page
//! - Random access to a deferred dictionary value by key
//! - Size prefix computation for variable records

extern crate bamlscope;

use bamlscope::{
    baml::{deferred::DeferredSection, records::AttributeUsage, varint::variable_record_size},
    BamlReader, BamlWriter,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::{hint::black_box, io::Cursor};

/// A page with `elements` buttons and a dictionary of `resources` deferred brushes.
fn page(elements: usize, resources: usize) -> Vec<u8> {
    let mut writer = BamlWriter::new(Cursor::new(Vec::new())).unwrap();
    writer.write_document_start().unwrap();

    let window = writer
        .add_type("PresentationFramework", "System.Windows.Window")
        .unwrap();
    let button = writer
        .add_type("PresentationFramework", "System.Windows.Controls.Button")
        .unwrap();
    let brush = writer.add_type("MyApp", "MyApp.Brush").unwrap();
    let color = writer
        .add_attribute("MyApp", "MyApp.Brush", "Color", AttributeUsage::Default)
        .unwrap();
    let keys: Vec<i16> = (0..resources)
        .map(|index| writer.add_string(&format!("Brush{index}")).unwrap())
        .collect();

    writer.write_element_start(window).unwrap();
    writer.begin_deferred_content().unwrap();
    let tickets: Vec<_> = keys
        .iter()
        .map(|key| writer.write_key_string(*key, true, false).unwrap())
        .collect();
    for (index, ticket) in tickets.into_iter().enumerate() {
        writer.begin_deferred_value(ticket).unwrap();
        writer.write_element_start(brush).unwrap();
        writer
            .write_property(color, &format!("#FF{index:06X}"))
            .unwrap();
        writer.write_element_end().unwrap();
    }
    writer.end_deferred_content().unwrap();

    for index in 0..elements {
        writer.write_element_start(button).unwrap();
        writer.write_text(&format!("Button {index}")).unwrap();
        writer.write_element_end().unwrap();
    }
    writer.write_element_end().unwrap();
    writer.write_document_end().unwrap();
    writer.finish().unwrap().into_inner()
}

/// Benchmark writing a page of 1000 elements and 100 resources.
fn bench_write_page(c: &mut Criterion) {
    c.bench_function("baml_write_page", |b| {
        b.iter(|| black_box(page(black_box(1000), black_box(100))));
    });
}

/// Benchmark decoding every record of the same page.
fn bench_read_page(c: &mut Criterion) {
    let bytes = page(1000, 100);

    c.bench_function("baml_read_page", |b| {
        b.iter(|| {
            let mut reader = BamlReader::new(black_box(&bytes)).unwrap();
            let mut count = 0;
            while let Some(record) = reader.next_record().unwrap() {
                reader.release(record);
                count += 1;
            }
            black_box(count)
        });
    });
}

/// Benchmark indexing the dictionary and decoding the last value.
fn bench_deferred_lookup(c: &mut Criterion) {
    let bytes = page(0, 1000);

    c.bench_function("baml_deferred_lookup", |b| {
        b.iter(|| {
            let mut reader = BamlReader::new(black_box(&bytes)).unwrap();
            while reader.peek_record_type().unwrap()
                != Some(bamlscope::baml::records::RecordType::DeferableContentStart)
            {
                reader.next_record().unwrap();
            }

            let mut section = DeferredSection::new();
            section.open(&mut reader).unwrap();
            section.scan_keys(&mut reader).unwrap();
            let records = section
                .value_by_key(&mut reader, "Brush999")
                .unwrap()
                .map(<[_]>::len);
            black_box(records)
        });
    });
}

/// Benchmark the size prefix rule across payload sizes.
fn bench_variable_record_size(c: &mut Criterion) {
    c.bench_function("baml_variable_record_size", |b| {
        b.iter(|| {
            let mut total = 0u64;
            for payload in (0..100_000u32).step_by(7) {
                total += u64::from(variable_record_size(black_box(payload)));
            }
            black_box(total)
        });
    });
}

criterion_group!(
    benches,
    bench_write_page,
    bench_read_page,
    bench_deferred_lookup,
    bench_variable_record_size,
);
criterion_main!(benches);
