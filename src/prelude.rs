//! # bamlscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bamlscope library. Import this module to get quick access to the essential
//! types for reading and writing BAML streams.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bamlscope operations
pub use crate::Error;

/// The result type used throughout bamlscope
pub use crate::Result;

/// The identifier space an unknown id belongs to
pub use crate::IdKind;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Stream reader and writer
pub use crate::{BamlReader, BamlWriter};

/// Low-level file access and parsing utilities
pub use crate::{File, Parser};

/// Reader and writer configuration
pub use crate::baml::{
    reader::{ReaderOptions, RecordReader},
    writer::{RecordPosition, RecordSink, Scope, WriterOptions},
};

/// Version header
pub use crate::baml::version::{BamlVersion, VersionHeader};

// ================================================================================================
// Records
// ================================================================================================

/// Record kinds and decoded payloads
pub use crate::baml::records::{
    AttributeUsage, DictionaryKey, ElementStartRecord, PropertyRecord, Record, RecordData,
    RecordType, TextRecord,
};

// ================================================================================================
// Identifier Tables
// ================================================================================================

/// Map table and the built-in known tables
pub use crate::baml::maptable::{known::KnownTables, MapTable, RecordEmitter};

/// Reflection collaborator interface
pub use crate::baml::resolver::{
    ConverterHandle, MemberHandle, MemoryResolver, TypeHandle, TypeResolver,
};

// ================================================================================================
// Deferred Content and Incremental Reading
// ================================================================================================

/// Deferred resource blocks
pub use crate::baml::deferred::{DeferredKey, DeferredSection, KeyTicket, ResourceKey};

/// Staging channel for incremental reading
pub use crate::baml::staging::{channel, IncrementalReader, StagingReader, StagingWriter};
