//! The BAML format: records, identifier tables and stream I/O.
//!
//! BAML is the binary form WPF compiles XAML pages into. A stream is a 28-byte version header
//! followed by a flat sequence of records. Names (assemblies, types, properties, strings) are
//! never repeated inline: the first use writes a defining *info* record that assigns a 16-bit id,
//! and every later record refers to the id. Framework types and properties have fixed negative
//! ids and are never defined in the stream at all.
//!
//! # Key Components
//!
//! - [`records`] - Record kinds and their binary codec
//! - [`flags`] - Bit-section packed flag words
//! - [`varint`] - 7-bit encoded integers and the variable record size rule
//! - [`version`] - The version header
//! - [`maptable`] - Identifier tables and the built-in known tables
//! - [`resolver`] - The reflection collaborator interface
//! - [`cache`] - Record instance reuse for the read and write paths
//! - [`reader`] / [`writer`] - Stream sessions
//! - [`deferred`] - Deferred resource blocks and their key index
//! - [`staging`] - Bounded producer/consumer byte channel for incremental reading
//!
//! # Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use bamlscope::{
//!     baml::{records::{AttributeUsage, RecordData}, resolver::MemoryResolver},
//!     BamlReader, BamlWriter,
//! };
//!
//! let mut writer = BamlWriter::new(Cursor::new(Vec::new()))?;
//! writer.write_document_start()?;
//! let gauge = writer.add_type("MyApp", "MyApp.Gauge")?;
//! let value = writer.add_attribute("MyApp", "MyApp.Gauge", "Value", AttributeUsage::Default)?;
//! writer.write_element_start(gauge)?;
//! writer.write_property(value, "42")?;
//! writer.write_element_end()?;
//! writer.write_document_end()?;
//! let bytes = writer.finish()?.into_inner();
//!
//! let resolver = MemoryResolver::new().with_type("MyApp", "MyApp.Gauge", &["Value"]);
//! let mut reader = BamlReader::new(&bytes)?;
//! while let Some(record) = reader.next_record()? {
//!     if let RecordData::Property(property) = &record.data {
//!         let member = reader.resolve_attribute(property.attribute_id, &resolver)?;
//!         assert_eq!((member.name.as_str(), property.value.as_str()), ("Value", "42"));
//!     }
//! }
//! # Ok::<(), bamlscope::Error>(())
//! ```

pub mod cache;
pub mod deferred;
pub mod flags;
pub mod maptable;
pub mod reader;
pub mod records;
pub mod resolver;
pub mod staging;
pub mod varint;
pub mod version;
pub mod writer;
