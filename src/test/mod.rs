//! Shared helpers for unit tests.

use crate::baml::{
    records::{DocumentStartRecord, Record, RecordData},
    version::VersionHeader,
};

// Helper function to encode records back to back, without header or document boundaries
pub fn framed(records: &[RecordData]) -> Vec<u8> {
    let mut out = Vec::new();
    for data in records {
        out.extend(Record::new(data.clone()).to_bytes().unwrap());
    }
    out
}

// Helper function to build a complete stream: header, DocumentStart, `records`, DocumentEnd
pub fn stream(records: &[RecordData]) -> Vec<u8> {
    let mut out = Vec::new();
    VersionHeader::default().write(&mut out).unwrap();
    out.extend(framed(&[RecordData::DocumentStart(
        DocumentStartRecord::default(),
    )]));
    out.extend(framed(records));
    out.extend(framed(&[RecordData::DocumentEnd]));
    out
}
