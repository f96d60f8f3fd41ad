// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # bamlscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/bamlscope.svg)](https://crates.io/crates/bamlscope)
//! [![Documentation](https://docs.rs/bamlscope/badge.svg)](https://docs.rs/bamlscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/bamlscope/blob/main/LICENSE-APACHE)
//!
//! A cross-platform reader and writer for BAML, the binary markup format WPF compiles XAML
//! pages into. Built in pure Rust, `bamlscope` decodes and encodes BAML records, maintains the
//! identifier tables that map assembly, type, property and string names to compact ids, and
//! indexes deferred resource dictionaries for random access, all without Windows or the .NET
//! runtime.
//!
//! ## Features
//!
//! - **Complete record codec** - Every record kind of BAML 0.96, fixed and variable size
//! - **Identifier tables** - Interning on write, lazy resolution on read, built-in known tables
//! - **Deferred content** - Back-patched resource dictionaries with by-key random access
//! - **Incremental loading** - Decode records while the stream is still arriving
//! - **Efficient memory access** - Memory-mapped files and a reuse cache for record instances
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//! use bamlscope::prelude::*;
//!
//! let mut writer = BamlWriter::new(Cursor::new(Vec::new()))?;
//! writer.write_document_start()?;
//! let button = writer.add_type("PresentationFramework", "System.Windows.Controls.Button")?;
//! assert!(button < 0); // built-in types have negative ids
//! writer.write_element_start(button)?;
//! writer.write_text("Click")?;
//! writer.write_element_end()?;
//! writer.write_document_end()?;
//! let bytes = writer.finish()?.into_inner();
//!
//! for record in BamlReader::new(&bytes)? {
//!     println!("{}", record?.record_type());
//! }
//! # Ok::<(), bamlscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`baml`] - Records, identifier tables, stream reader and writer, deferred content
//! - [`file`] - Memory-mapped or in-memory access to BAML bytes
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result):
//!
//! ```rust,no_run
//! use bamlscope::{BamlReader, Error};
//!
//! let data = std::fs::read("Page1.baml")?;
//! match BamlReader::new(&data) {
//!     Ok(_) => println!("BAML {}", bamlscope::baml::version::BamlVersion::CURRENT),
//!     Err(Error::VersionMismatch { found, expected }) => {
//!         println!("Stream is BAML {found}, expected {expected}")
//!     }
//!     Err(Error::InvalidSignature(id)) => println!("Not BAML: {id}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run records --release
//! ```
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use bamlscope::prelude::*;
///
/// let file = File::from_file("Page1.baml".as_ref())?;
/// let records = file.reader()?.read_all()?;
/// println!("{} records", records.len());
/// # Ok::<(), bamlscope::Error>(())
/// ```
pub mod prelude;

/// The BAML format: records, identifier tables and stream I/O.
pub mod baml;

/// Access to BAML bytes on disk or in memory, and the binary reading primitives.
pub mod file;

/// `bamlscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bamlscope` Error type
///
/// # Examples
///
/// ```rust
/// use bamlscope::{BamlReader, Error};
///
/// assert!(matches!(BamlReader::new(&[]), Err(Error::Empty)));
/// ```
pub use error::{Error, IdKind};

/// Bounds-checked cursor over a byte slice.
pub use file::{parser::Parser, File};

/// Stream reader over a complete BAML byte slice, see [`baml::reader`].
pub use baml::reader::BamlReader;

/// Stream writer over a seekable output, see [`baml::writer`].
pub use baml::writer::BamlWriter;
