//! Identifier tables that intern assemblies, types, attributes and strings into 16-bit ids.
//!
//! A BAML stream never spells out a type or property name twice. The first time a name is
//! needed the writer appends an entry to one of four tables and emits the record that defines
//! it (`AssemblyInfo`, `TypeInfo`, `AttributeInfo`, `StringInfo`); every later reference uses
//! the entry's id. The reader rebuilds the same tables from those records.
//!
//! # Id spaces
//!
//! - Non-negative ids index the per-session tables in allocation order, so an entry's id always
//!   equals the table length at the time it was added.
//! - Negative ids address the [`known`] tables of built-in types, properties and strings and
//!   never occupy a table slot.
//! - Assembly id `-1` is the framework assembly. It is implicitly present; if a non-known type
//!   from it has to be written, the assembly is promoted to a real id first.
//!
//! # Resolution
//!
//! Entries keep the wire data apart from resolution results. `resolve_*` calls go through a
//! [`TypeResolver`] once and cache the handle on the entry; converters are cached in a
//! concurrent map keyed by type id.
//!
//! # Table reuse
//!
//! [`MapTable::initialize`] seeds the reverse index from the current tables and then clears all
//! four tables. A name seen in an earlier pass is recognised, but re-interned under a fresh id of
//! the new numbering, and its defining record is written again.
//!
//! # Examples
//!
//! ```rust
//! use bamlscope::baml::maptable::MapTable;
//! use bamlscope::baml::records::RecordData;
//!
//! let mut table = MapTable::new();
//! let mut emitted: Vec<RecordData> = Vec::new();
//!
//! let gauge = table.add_type(&mut emitted, "MyApp", "MyApp.Gauge")?;
//! let button = table.add_type(
//!     &mut emitted,
//!     "PresentationFramework",
//!     "System.Windows.Controls.Button",
//! )?;
//!
//! assert_eq!(gauge, 0);
//! assert!(button < 0);
//! // AssemblyInfo and TypeInfo for the custom type, nothing for the known one
//! assert_eq!(emitted.len(), 2);
//! # Ok::<(), bamlscope::Error>(())
//! ```

mod entries;
pub mod known;

pub use entries::{AssemblyEntry, AttributeEntry, StringEntry, TypeEntry};

use std::collections::HashMap;

use dashmap::DashMap;

use crate::{
    baml::{
        maptable::known::{KnownAssembly, KnownTables},
        records::{
            AssemblyInfoRecord, AttributeInfoRecord, AttributeUsage, RecordData,
            StringInfoRecord, TypeInfoRecord, TypeSerializerInfoRecord,
        },
        resolver::{
            simple_assembly_name, AssemblyHandle, ConverterHandle, MemberHandle, TypeHandle,
            TypeResolver,
        },
    },
    error::IdKind,
    Error, Result,
};

/// Receives the defining records the map table produces while interning.
pub trait RecordEmitter {
    /// Write one record.
    ///
    /// # Errors
    /// Returns the sink's error.
    fn emit(&mut self, record: RecordData) -> Result<()>;
}

impl RecordEmitter for Vec<RecordData> {
    fn emit(&mut self, record: RecordData) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MapKey {
    Assembly(String),
    Type { assembly: String, full_name: String },
    Attribute {
        owner_assembly: String,
        owner: String,
        name: String,
    },
    String(String),
}

#[derive(Debug, Clone, Copy)]
struct Interned {
    id: i16,
    generation: u32,
}

enum Lookup {
    Current(i16),
    Stale(i16),
    Missing,
}

fn next_id(len: usize, kind: IdKind) -> Result<i16> {
    i16::try_from(len).map_err(|_| invalid_operation!("The {} table is full", kind))
}

fn table_index(id: i16) -> Option<usize> {
    usize::try_from(id).ok()
}

fn load_sequential<T>(
    table: &mut Vec<T>,
    kind: IdKind,
    id: i16,
    entry: T,
    same: impl Fn(&T) -> bool,
) -> Result<()> {
    let Some(index) = table_index(id) else {
        return Err(malformed_error!("Cannot define {} id {}", kind, id));
    };

    if index == table.len() {
        table.push(entry);
        return Ok(());
    }

    if table.get(index).is_some_and(same) {
        log::debug!("Ignoring repeated definition of {} id {}", kind, id);
        return Ok(());
    }

    Err(malformed_error!(
        "{} id {} is out of sequence, expected {}",
        kind,
        id,
        table.len()
    ))
}

/// The four identifier tables of one read or write session.
#[derive(Debug)]
pub struct MapTable {
    known: KnownTables,
    framework: AssemblyEntry,
    assemblies: Vec<AssemblyEntry>,
    types: Vec<TypeEntry>,
    attributes: Vec<AttributeEntry>,
    strings: Vec<StringEntry>,
    known_types: HashMap<i16, TypeEntry>,
    known_attributes: HashMap<i16, AttributeEntry>,
    known_assemblies: HashMap<KnownAssembly, AssemblyHandle>,
    reverse: HashMap<MapKey, Interned>,
    generation: u32,
    converters: DashMap<i16, ConverterHandle>,
}

impl MapTable {
    /// Empty tables backed by the built-in known tables.
    #[must_use]
    pub fn new() -> Self {
        Self::with_known(KnownTables::framework())
    }

    /// Empty tables backed by the given known tables.
    #[must_use]
    pub fn with_known(known: KnownTables) -> Self {
        let mut table = MapTable {
            known,
            framework: AssemblyEntry::new(-1, known.framework.full_name()),
            assemblies: Vec::new(),
            types: Vec::new(),
            attributes: Vec::new(),
            strings: Vec::new(),
            known_types: HashMap::new(),
            known_attributes: HashMap::new(),
            known_assemblies: HashMap::new(),
            reverse: HashMap::new(),
            generation: 0,
            converters: DashMap::new(),
        };
        table.index_framework();
        table
    }

    /// The known tables in use.
    #[must_use]
    pub fn known(&self) -> &KnownTables {
        &self.known
    }

    /// Number of passes started with [`MapTable::initialize`].
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of entries in the assembly table.
    #[must_use]
    pub fn assembly_count(&self) -> usize {
        self.assemblies.len()
    }

    /// Number of entries in the type table.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of entries in the attribute table.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of entries in the string table.
    #[must_use]
    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Number of names held by the reverse index, from this and earlier passes.
    #[must_use]
    pub fn indexed_names(&self) -> usize {
        self.reverse.len()
    }

    fn framework_key(&self) -> MapKey {
        MapKey::Assembly(self.known.framework.full_name().to_string())
    }

    fn index_framework(&mut self) {
        let key = self.framework_key();
        self.reverse.insert(
            key,
            Interned {
                id: -1,
                generation: self.generation,
            },
        );
    }

    fn lookup(&self, key: &MapKey) -> Lookup {
        match self.reverse.get(key) {
            Some(interned) if interned.generation == self.generation => {
                Lookup::Current(interned.id)
            }
            Some(interned) => Lookup::Stale(interned.id),
            None => Lookup::Missing,
        }
    }

    fn index(&mut self, key: MapKey, id: i16) {
        self.reverse.insert(
            key,
            Interned {
                id,
                generation: self.generation,
            },
        );
    }

    /// Start a new pass.
    ///
    /// Every name in the current tables is recorded in the reverse index, then all four tables
    /// are cleared. Ids restart at 0 while the reverse index keeps growing.
    pub fn initialize(&mut self) {
        let generation = self.generation;
        let mut seeded = Vec::new();

        for entry in &self.assemblies {
            seeded.push((MapKey::Assembly(entry.full_name.clone()), entry.id));
        }
        for entry in &self.types {
            if let Ok(assembly) = self.assembly_name(entry.assembly_id) {
                seeded.push((
                    MapKey::Type {
                        assembly: simple_assembly_name(assembly).to_string(),
                        full_name: entry.full_name.clone(),
                    },
                    entry.id,
                ));
            }
        }
        for entry in &self.attributes {
            if let Some((owner_assembly, owner)) = self.type_identity(entry.owner_type_id) {
                seeded.push((
                    MapKey::Attribute {
                        owner_assembly,
                        owner,
                        name: entry.name.clone(),
                    },
                    entry.id,
                ));
            }
        }
        for entry in &self.strings {
            seeded.push((MapKey::String(entry.value.clone()), entry.id));
        }

        for (key, id) in seeded {
            self.reverse.insert(key, Interned { id, generation });
        }

        self.assemblies.clear();
        self.types.clear();
        self.attributes.clear();
        self.strings.clear();
        self.generation = self.generation.wrapping_add(1);
        self.index_framework();

        log::debug!(
            "Map table reset to pass {}, {} names in the reverse index",
            self.generation,
            self.reverse.len()
        );
    }

    /// Copy of the tables for an independent session, with an empty converter cache.
    #[must_use]
    pub fn clone_for_session(&self) -> MapTable {
        MapTable {
            known: self.known,
            framework: self.framework.clone(),
            assemblies: self.assemblies.clone(),
            types: self.types.clone(),
            attributes: self.attributes.clone(),
            strings: self.strings.clone(),
            known_types: self.known_types.clone(),
            known_attributes: self.known_attributes.clone(),
            known_assemblies: self.known_assemblies.clone(),
            reverse: self.reverse.clone(),
            generation: self.generation,
            converters: DashMap::new(),
        }
    }

    // Write path

    /// Intern an assembly and return its id, emitting an `AssemblyInfo` record for new entries.
    ///
    /// Interning the framework assembly promotes it from -1 to a real id.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if the assembly table is full
    /// - the emitter's error
    pub fn add_assembly(
        &mut self,
        emitter: &mut dyn RecordEmitter,
        full_name: &str,
    ) -> Result<i16> {
        let key = if simple_assembly_name(full_name) == self.known.framework.name() {
            self.framework_key()
        } else {
            MapKey::Assembly(full_name.to_string())
        };

        match self.lookup(&key) {
            Lookup::Current(id) if id >= 0 => return Ok(id),
            Lookup::Current(_) => {
                log::debug!("Promoting framework assembly {} to a real id", full_name);
            }
            Lookup::Stale(previous) => {
                log::debug!(
                    "Re-interning assembly {} from an earlier pass (was {})",
                    full_name,
                    previous
                );
            }
            Lookup::Missing => {}
        }

        let id = next_id(self.assemblies.len(), IdKind::Assembly)?;
        let entry = AssemblyEntry::new(id, full_name);
        emitter.emit(entry.to_record())?;
        self.assemblies.push(entry);
        self.index(key, id);

        log::debug!("Interned assembly {} as {}", full_name, id);
        Ok(id)
    }

    /// Intern a public type without a custom serializer, see [`MapTable::add_type_with`].
    ///
    /// # Errors
    /// See [`MapTable::add_type_with`].
    pub fn add_type(
        &mut self,
        emitter: &mut dyn RecordEmitter,
        assembly: &str,
        full_name: &str,
    ) -> Result<i16> {
        self.add_type_with(emitter, assembly, full_name, false, None)
    }

    /// Intern a type and return its id.
    ///
    /// Known types return their negative id without touching the tables. Other types intern
    /// their assembly first and then emit a `TypeInfo` (or `TypeSerializerInfo`) record.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if a table is full
    /// - the emitter's error
    pub fn add_type_with(
        &mut self,
        emitter: &mut dyn RecordEmitter,
        assembly: &str,
        full_name: &str,
        is_internal: bool,
        serializer_type_id: Option<i16>,
    ) -> Result<i16> {
        if let Some(known) = self.known.find_type(assembly, full_name) {
            return Ok(known.id());
        }

        let key = MapKey::Type {
            assembly: simple_assembly_name(assembly).to_string(),
            full_name: full_name.to_string(),
        };
        match self.lookup(&key) {
            Lookup::Current(id) => return Ok(id),
            Lookup::Stale(previous) => {
                log::debug!(
                    "Re-interning type {} from an earlier pass (was {})",
                    full_name,
                    previous
                );
            }
            Lookup::Missing => {}
        }

        let assembly_id = self.add_assembly(emitter, assembly)?;
        let id = next_id(self.types.len(), IdKind::Type)?;
        let mut entry = TypeEntry::new(id, assembly_id, full_name);
        entry.is_internal = is_internal;
        entry.serializer_type_id = serializer_type_id;

        emitter.emit(entry.to_record())?;
        self.types.push(entry);
        self.index(key, id);

        log::debug!("Interned type {} as {}", full_name, id);
        Ok(id)
    }

    /// Intern a property or event of a type and return its id.
    ///
    /// The owner is interned first. Members of known types that appear in the known property
    /// table return their negative id.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if a table is full
    /// - the emitter's error
    pub fn add_attribute(
        &mut self,
        emitter: &mut dyn RecordEmitter,
        owner_assembly: &str,
        owner_type: &str,
        name: &str,
        usage: AttributeUsage,
    ) -> Result<i16> {
        let owner_type_id = self.add_type(emitter, owner_assembly, owner_type)?;
        if owner_type_id < 0 {
            if let Some(known) = self.known.find_property(owner_type_id, name) {
                return Ok(known.id());
            }
        }

        let key = MapKey::Attribute {
            owner_assembly: simple_assembly_name(owner_assembly).to_string(),
            owner: owner_type.to_string(),
            name: name.to_string(),
        };
        match self.lookup(&key) {
            Lookup::Current(id) => return Ok(id),
            Lookup::Stale(previous) => {
                log::debug!(
                    "Re-interning attribute {}.{} from an earlier pass (was {})",
                    owner_type,
                    name,
                    previous
                );
            }
            Lookup::Missing => {}
        }

        let id = next_id(self.attributes.len(), IdKind::Attribute)?;
        let entry = AttributeEntry::new(id, owner_type_id, name, usage);
        emitter.emit(entry.to_record())?;
        self.attributes.push(entry);
        self.index(key, id);

        log::debug!("Interned attribute {}.{} as {}", owner_type, name, id);
        Ok(id)
    }

    /// Intern a string and return its id. Known strings return their negative id.
    ///
    /// # Errors
    /// - [`Error::InvalidOperation`] if the string table is full
    /// - the emitter's error
    pub fn add_string(&mut self, emitter: &mut dyn RecordEmitter, value: &str) -> Result<i16> {
        if let Some(id) = self.known.find_string(value) {
            return Ok(id);
        }

        let key = MapKey::String(value.to_string());
        match self.lookup(&key) {
            Lookup::Current(id) => return Ok(id),
            Lookup::Stale(previous) => {
                log::debug!(
                    "Re-interning string '{}' from an earlier pass (was {})",
                    value,
                    previous
                );
            }
            Lookup::Missing => {}
        }

        let id = next_id(self.strings.len(), IdKind::String)?;
        let entry = StringEntry {
            id,
            value: value.to_string(),
        };
        emitter.emit(entry.to_record())?;
        self.strings.push(entry);
        self.index(key, id);

        log::debug!("Interned string '{}' as {}", value, id);
        Ok(id)
    }

    // Read path

    /// Define an assembly from its record.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the id is out of sequence.
    pub fn load_assembly_info(&mut self, record: &AssemblyInfoRecord) -> Result<()> {
        load_sequential(
            &mut self.assemblies,
            IdKind::Assembly,
            record.assembly_id,
            AssemblyEntry::from(record),
            |existing| existing.same_definition(record),
        )
    }

    /// Define a type from its record.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the id is out of sequence.
    pub fn load_type_info(&mut self, record: &TypeInfoRecord) -> Result<()> {
        self.load_type_entry(TypeEntry::from(record))
    }

    /// Define a type with a custom serializer from its record.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the id is out of sequence.
    pub fn load_type_serializer_info(&mut self, record: &TypeSerializerInfoRecord) -> Result<()> {
        self.load_type_entry(TypeEntry::from(record))
    }

    fn load_type_entry(&mut self, entry: TypeEntry) -> Result<()> {
        let id = entry.id;
        let candidate = entry.clone();
        load_sequential(&mut self.types, IdKind::Type, id, entry, |existing| {
            existing.same_definition(&candidate)
        })
    }

    /// Define an attribute from its record.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the id is out of sequence.
    pub fn load_attribute_info(&mut self, record: &AttributeInfoRecord) -> Result<()> {
        load_sequential(
            &mut self.attributes,
            IdKind::Attribute,
            record.attribute_id,
            AttributeEntry::from(record),
            |existing| existing.same_definition(record),
        )
    }

    /// Define a string from its record.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the id is out of sequence.
    pub fn load_string_info(&mut self, record: &StringInfoRecord) -> Result<()> {
        load_sequential(
            &mut self.strings,
            IdKind::String,
            record.string_id,
            StringEntry::from(record),
            |existing| existing.value == record.value,
        )
    }

    /// Feed a record into the tables if it defines an entry.
    ///
    /// Returns `true` if the record was a table definition.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the id is out of sequence.
    pub fn load_record(&mut self, record: &RecordData) -> Result<bool> {
        match record {
            RecordData::AssemblyInfo(info) => self.load_assembly_info(info)?,
            RecordData::TypeInfo(info) => self.load_type_info(info)?,
            RecordData::TypeSerializerInfo(info) => self.load_type_serializer_info(info)?,
            RecordData::AttributeInfo(info) => self.load_attribute_info(info)?,
            RecordData::StringInfo(info) => self.load_string_info(info)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// The assembly entry for an id; -1 is the framework assembly.
    ///
    /// # Errors
    /// Returns [`Error::UnknownId`] for undefined ids.
    pub fn assembly_info(&self, id: i16) -> Result<&AssemblyEntry> {
        if id == -1 {
            return Ok(&self.framework);
        }

        table_index(id)
            .and_then(|index| self.assemblies.get(index))
            .ok_or(Error::UnknownId {
                kind: IdKind::Assembly,
                id,
            })
    }

    fn assembly_name(&self, id: i16) -> Result<&str> {
        Ok(self.assembly_info(id)?.full_name.as_str())
    }

    // Simple assembly name and full name of a type.
    fn type_identity(&self, id: i16) -> Option<(String, String)> {
        if id < 0 {
            let known = self.known.type_by_id(id)?;
            return Some((known.assembly.name().to_string(), known.full_name()));
        }

        let entry = table_index(id).and_then(|index| self.types.get(index))?;
        let assembly = self.assembly_name(entry.assembly_id).ok()?;
        Some((
            simple_assembly_name(assembly).to_string(),
            entry.full_name.clone(),
        ))
    }

    /// The type entry for an id. Entries for known types are synthesised on first access and
    /// report assembly id -1.
    ///
    /// # Errors
    /// Returns [`Error::UnknownId`] for undefined ids.
    pub fn type_info(&mut self, id: i16) -> Result<&TypeEntry> {
        Ok(self.type_entry_mut(id)?)
    }

    fn type_entry_mut(&mut self, id: i16) -> Result<&mut TypeEntry> {
        let unknown = Error::UnknownId {
            kind: IdKind::Type,
            id,
        };

        if id < 0 {
            let known = self.known.type_by_id(id).ok_or(unknown)?;
            return Ok(self
                .known_types
                .entry(id)
                .or_insert_with(|| TypeEntry::new(id, -1, &known.full_name())));
        }

        table_index(id)
            .and_then(|index| self.types.get_mut(index))
            .ok_or(unknown)
    }

    /// Namespace-qualified name of a type, without synthesising anything.
    ///
    /// # Errors
    /// Returns [`Error::UnknownId`] for undefined ids.
    pub fn type_full_name(&self, id: i16) -> Result<String> {
        if id < 0 {
            return self
                .known
                .type_by_id(id)
                .map(known::KnownType::full_name)
                .ok_or(Error::UnknownId {
                    kind: IdKind::Type,
                    id,
                });
        }

        table_index(id)
            .and_then(|index| self.types.get(index))
            .map(|entry| entry.full_name.clone())
            .ok_or(Error::UnknownId {
                kind: IdKind::Type,
                id,
            })
    }

    /// The attribute entry for an id. Known properties get a synthesised entry on first access.
    ///
    /// # Errors
    /// Returns [`Error::UnknownId`] for undefined ids.
    pub fn attribute_info(&mut self, id: i16) -> Result<&AttributeEntry> {
        Ok(self.attribute_entry_mut(id)?)
    }

    fn attribute_entry_mut(&mut self, id: i16) -> Result<&mut AttributeEntry> {
        let unknown = Error::UnknownId {
            kind: IdKind::Attribute,
            id,
        };

        if id < 0 {
            let known = self.known.property_by_id(id).ok_or(unknown)?;
            return Ok(self.known_attributes.entry(id).or_insert_with(|| {
                AttributeEntry::new(id, known.owner_id(), known.name, AttributeUsage::Default)
            }));
        }

        table_index(id)
            .and_then(|index| self.attributes.get_mut(index))
            .ok_or(unknown)
    }

    /// The string for an id.
    ///
    /// # Errors
    /// Returns [`Error::UnknownId`] for undefined ids.
    pub fn string(&self, id: i16) -> Result<&str> {
        let value = if id < 0 {
            self.known.string_by_id(id)
        } else {
            table_index(id)
                .and_then(|index| self.strings.get(index))
                .map(|entry| entry.value.as_str())
        };

        value.ok_or(Error::UnknownId {
            kind: IdKind::String,
            id,
        })
    }

    // Resolution

    /// Load the assembly behind an id, caching the handle.
    ///
    /// # Errors
    /// - [`Error::UnknownId`] for undefined ids
    /// - the resolver's error
    pub fn resolve_assembly(
        &mut self,
        id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<AssemblyHandle> {
        if id == -1 {
            return self.framework.resolve(resolver).cloned();
        }

        let entry = table_index(id)
            .and_then(|index| self.assemblies.get_mut(index))
            .ok_or(Error::UnknownId {
                kind: IdKind::Assembly,
                id,
            })?;
        entry.resolve(resolver).cloned()
    }

    fn resolve_known_assembly(
        &mut self,
        assembly: KnownAssembly,
        resolver: &dyn TypeResolver,
    ) -> Result<AssemblyHandle> {
        if assembly == self.known.framework {
            return self.framework.resolve(resolver).cloned();
        }
        if let Some(handle) = self.known_assemblies.get(&assembly) {
            return Ok(handle.clone());
        }

        let handle = resolver.load_assembly(assembly.full_name())?;
        self.known_assemblies.insert(assembly, handle.clone());
        Ok(handle)
    }

    /// Resolve the type behind an id, caching the handle.
    ///
    /// # Errors
    /// - [`Error::UnknownId`] for undefined ids
    /// - [`Error::TypeNotFound`] if the resolver has no such type
    pub fn resolve_type(&mut self, id: i16, resolver: &dyn TypeResolver) -> Result<TypeHandle> {
        if let Some(handle) = self.type_entry_mut(id)?.handle() {
            return Ok(handle.clone());
        }

        let assembly = if id < 0 {
            let known = self.known.type_by_id(id).ok_or(Error::UnknownId {
                kind: IdKind::Type,
                id,
            })?;
            self.resolve_known_assembly(known.assembly, resolver)?
        } else {
            let assembly_id = self.type_entry_mut(id)?.assembly_id;
            self.resolve_assembly(assembly_id, resolver)?
        };

        self.type_entry_mut(id)?
            .resolve(&assembly, resolver)
            .cloned()
    }

    /// Resolve the member behind an attribute id, resolving its owner type first.
    ///
    /// # Errors
    /// - [`Error::UnknownId`] for undefined ids
    /// - [`Error::TypeNotFound`] if the owner type cannot be resolved
    /// - [`Error::PropertyNotFound`] naming owner and member if the owner has no such member
    pub fn resolve_attribute(
        &mut self,
        id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<MemberHandle> {
        let entry = self.attribute_entry_mut(id)?;
        if let Some(handle) = entry.handle() {
            return Ok(handle.clone());
        }

        let owner_type_id = entry.owner_type_id;
        let owner = self.resolve_type(owner_type_id, resolver)?;
        self.attribute_entry_mut(id)?
            .resolve(&owner, resolver)
            .cloned()
    }

    /// Create (once) and return the converter for a type.
    ///
    /// Known types with an entry in the known converter table get that converter without asking
    /// the resolver for one.
    ///
    /// # Errors
    /// - [`Error::UnknownId`] for undefined ids
    /// - [`Error::ConverterNotFound`] if the type has no converter
    pub fn resolve_converter(
        &mut self,
        type_id: i16,
        resolver: &dyn TypeResolver,
    ) -> Result<ConverterHandle> {
        if let Some(converter) = self.cached_converter(type_id) {
            return Ok(converter);
        }

        let target = self.resolve_type(type_id, resolver)?;
        let converter = match self.known.converter_for(type_id) {
            Some(known) => ConverterHandle {
                converter: known.full_name(),
                target: target.full_name,
            },
            None => resolver.create_converter(&target)?,
        };
        self.converters.insert(type_id, converter.clone());
        Ok(converter)
    }

    /// A converter created earlier in this session.
    #[must_use]
    pub fn cached_converter(&self, type_id: i16) -> Option<ConverterHandle> {
        self.converters
            .get(&type_id)
            .map(|converter| converter.value().clone())
    }
}

impl Default for MapTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baml::{records::RecordType, resolver::MemoryResolver};

    const FRAMEWORK: &str = "PresentationFramework";

    fn kinds(records: &[RecordData]) -> Vec<RecordType> {
        records.iter().map(RecordData::record_type).collect()
    }

    #[test]
    fn interning_is_stable() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        let first = table.add_type(&mut out, "MyApp", "MyApp.Gauge").unwrap();
        let again = table.add_type(&mut out, "MyApp", "MyApp.Gauge").unwrap();
        assert_eq!(first, again);

        let value = table
            .add_attribute(&mut out, "MyApp", "MyApp.Gauge", "Value", AttributeUsage::Default)
            .unwrap();
        let value_again = table
            .add_attribute(&mut out, "MyApp", "MyApp.Gauge", "Value", AttributeUsage::Default)
            .unwrap();
        assert_eq!(value, value_again);

        let text = table.add_string(&mut out, "hello").unwrap();
        assert_eq!(table.add_string(&mut out, "hello").unwrap(), text);

        assert_eq!(
            kinds(&out),
            [
                RecordType::AssemblyInfo,
                RecordType::TypeInfo,
                RecordType::AttributeInfo,
                RecordType::StringInfo
            ]
        );
    }

    #[test]
    fn distinct_names_are_sequential() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        let ids: Vec<i16> = (0..5)
            .map(|n| {
                table
                    .add_type(&mut out, "MyApp", &format!("MyApp.Type{n}"))
                    .unwrap()
            })
            .collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);

        let strings: Vec<i16> = ["a", "b", "c"]
            .iter()
            .map(|value| table.add_string(&mut out, value).unwrap())
            .collect();
        assert_eq!(strings, [0, 1, 2]);
        assert_eq!(table.assembly_count(), 1);
        assert_eq!(table.type_count(), 5);
    }

    #[test]
    fn attributes_are_keyed_by_owner_assembly() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        let first = table
            .add_attribute(&mut out, "Alpha", "Shared.Gauge", "Value", AttributeUsage::Default)
            .unwrap();
        let second = table
            .add_attribute(&mut out, "Beta", "Shared.Gauge", "Value", AttributeUsage::Default)
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(table.attribute_count(), 2);

        let alpha = table.attribute_info(first).unwrap().owner_type_id;
        let beta = table.attribute_info(second).unwrap().owner_type_id;
        assert_ne!(alpha, beta);

        let again = table
            .add_attribute(
                &mut out,
                "Beta, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null",
                "Shared.Gauge",
                "Value",
                AttributeUsage::Default,
            )
            .unwrap();
        assert_eq!(again, second);
        assert_eq!(table.attribute_count(), 2);
    }

    #[test]
    fn known_names_do_not_allocate() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        let button = table
            .add_type(&mut out, FRAMEWORK, "System.Windows.Controls.Button")
            .unwrap();
        assert!(button < 0);

        let width = table
            .add_attribute(
                &mut out,
                FRAMEWORK,
                "System.Windows.FrameworkElement",
                "Width",
                AttributeUsage::Default,
            )
            .unwrap();
        assert!(width < 0);

        assert_eq!(table.add_string(&mut out, "Name").unwrap(), -1);
        assert_eq!(table.add_string(&mut out, "Uid").unwrap(), -2);

        assert!(out.is_empty());
        assert_eq!(table.type_count(), 0);
        assert_eq!(table.attribute_count(), 0);
        assert_eq!(table.string_count(), 0);
    }

    #[test]
    fn unknown_member_of_known_type() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        let id = table
            .add_attribute(
                &mut out,
                FRAMEWORK,
                "System.Windows.Controls.Button",
                "Sparkle",
                AttributeUsage::Default,
            )
            .unwrap();
        assert_eq!(id, 0);

        let RecordData::AttributeInfo(record) = &out[0] else {
            panic!("expected AttributeInfo, got {:?}", out[0]);
        };
        assert!(record.owner_type_id < 0);
    }

    #[test]
    fn colliding_short_name_is_not_known() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        let other_namespace = table
            .add_type(&mut out, FRAMEWORK, "MyApp.Controls.Button")
            .unwrap();
        let other_assembly = table
            .add_type(&mut out, "MyApp", "System.Windows.Controls.Button")
            .unwrap();

        assert_eq!(other_namespace, 0);
        assert_eq!(other_assembly, 1);
    }

    #[test]
    fn framework_assembly_is_promoted() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        assert_eq!(table.assembly_info(-1).unwrap().id, -1);

        let custom = table
            .add_type(&mut out, FRAMEWORK, "System.Windows.Controls.Sparkline")
            .unwrap();
        assert_eq!(custom, 0);
        assert_eq!(
            kinds(&out),
            [RecordType::AssemblyInfo, RecordType::TypeInfo]
        );

        let RecordData::TypeInfo(record) = &out[1] else {
            panic!("expected TypeInfo");
        };
        assert_eq!(record.assembly_id, 0);

        // promoted once only
        let promoted = table.add_assembly(&mut out, FRAMEWORK).unwrap();
        assert_eq!(promoted, 0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn initialize_seeds_then_clears() {
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();

        table.add_string(&mut out, "zero").unwrap();
        table.add_string(&mut out, "one").unwrap();
        table.add_type(&mut out, "MyApp", "MyApp.Gauge").unwrap();
        let indexed = table.indexed_names();

        table.initialize();
        assert_eq!(table.generation(), 1);
        assert_eq!(table.string_count(), 0);
        assert_eq!(table.type_count(), 0);
        assert_eq!(table.indexed_names(), indexed);

        // the second pass renumbers from zero and writes the definition again
        out.clear();
        assert_eq!(table.add_string(&mut out, "one").unwrap(), 0);
        assert_eq!(table.add_type(&mut out, "MyApp", "MyApp.Gauge").unwrap(), 0);
        assert_eq!(
            kinds(&out),
            [
                RecordType::StringInfo,
                RecordType::AssemblyInfo,
                RecordType::TypeInfo
            ]
        );
    }

    #[test]
    fn initialize_indexes_loaded_entries() {
        let mut table = MapTable::new();
        table
            .load_string_info(&StringInfoRecord {
                string_id: 0,
                value: "loaded".to_string(),
            })
            .unwrap();
        assert_eq!(table.indexed_names(), 1);

        table.initialize();
        assert_eq!(table.indexed_names(), 2);
    }

    #[test]
    fn load_is_sequential_and_idempotent() {
        let mut table = MapTable::new();
        let record = AssemblyInfoRecord {
            assembly_id: 0,
            assembly_full_name: "MyApp".to_string(),
        };
        table.load_assembly_info(&record).unwrap();
        table.load_assembly_info(&record).unwrap();
        assert_eq!(table.assembly_count(), 1);

        let conflicting = AssemblyInfoRecord {
            assembly_id: 0,
            assembly_full_name: "Other".to_string(),
        };
        assert!(matches!(
            table.load_assembly_info(&conflicting),
            Err(Error::Malformed { .. })
        ));

        let gap = AssemblyInfoRecord {
            assembly_id: 5,
            assembly_full_name: "Gap".to_string(),
        };
        assert!(matches!(
            table.load_assembly_info(&gap),
            Err(Error::Malformed { .. })
        ));

        assert!(table
            .load_record(&RecordData::StringInfo(StringInfoRecord {
                string_id: 0,
                value: "s".to_string(),
            }))
            .unwrap());
        assert!(!table.load_record(&RecordData::ElementEnd).unwrap());
        assert_eq!(table.string(0).unwrap(), "s");
    }

    #[test]
    fn unknown_ids() {
        let mut table = MapTable::new();
        assert!(matches!(
            table.assembly_info(3),
            Err(Error::UnknownId {
                kind: IdKind::Assembly,
                id: 3
            })
        ));
        assert!(matches!(
            table.type_info(0),
            Err(Error::UnknownId {
                kind: IdKind::Type,
                ..
            })
        ));
        assert!(matches!(
            table.type_info(i16::MIN),
            Err(Error::UnknownId { .. })
        ));
        assert!(matches!(
            table.attribute_info(7),
            Err(Error::UnknownId { .. })
        ));
        assert!(matches!(table.string(-9), Err(Error::UnknownId { .. })));
    }

    #[test]
    fn synthesised_known_attribute() {
        let mut table = MapTable::new();
        let owner = table
            .known()
            .find_type(FRAMEWORK, "System.Windows.Controls.TextBlock")
            .unwrap()
            .id();
        let text = table.known().find_property(owner, "Text").unwrap().id();

        let entry = table.attribute_info(text).unwrap();
        assert_eq!(entry.name, "Text");
        assert_eq!(entry.owner_type_id, owner);
        assert_eq!(
            table.type_info(owner).unwrap().full_name,
            "System.Windows.Controls.TextBlock"
        );
    }

    #[test]
    fn resolution_goes_through_resolver_once() {
        let resolver = MemoryResolver::new()
            .with_type("MyApp", "MyApp.Gauge", &["Value"])
            .with_converter("MyApp.Gauge", "MyApp.GaugeConverter");

        let mut writer_table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();
        writer_table
            .add_attribute(&mut out, "MyApp", "MyApp.Gauge", "Value", AttributeUsage::Default)
            .unwrap();

        let mut table = MapTable::new();
        for record in &out {
            table.load_record(record).unwrap();
        }

        let member = table.resolve_attribute(0, &resolver).unwrap();
        assert_eq!(member.owner, "MyApp.Gauge");
        assert_eq!(member.name, "Value");
        let lookups = resolver.lookups();

        table.resolve_attribute(0, &resolver).unwrap();
        table.resolve_type(0, &resolver).unwrap();
        assert_eq!(resolver.lookups(), lookups);

        let converter = table.resolve_converter(0, &resolver).unwrap();
        assert_eq!(converter.converter, "MyApp.GaugeConverter");
        assert_eq!(table.cached_converter(0), Some(converter));

        let session = table.clone_for_session();
        assert!(session.cached_converter(0).is_none());
        assert_eq!(session.type_count(), 1);
    }

    #[test]
    fn resolution_errors_name_the_offender() {
        let resolver = MemoryResolver::new().with_type("MyApp", "MyApp.Gauge", &[]);
        let mut table = MapTable::new();
        let mut out: Vec<RecordData> = Vec::new();
        table
            .add_attribute(&mut out, "MyApp", "MyApp.Gauge", "Missing", AttributeUsage::Default)
            .unwrap();
        table.add_type(&mut out, "MyApp", "MyApp.Ghost").unwrap();

        match table.resolve_attribute(0, &resolver) {
            Err(Error::PropertyNotFound { owner, name }) => {
                assert_eq!(owner, "MyApp.Gauge");
                assert_eq!(name, "Missing");
            }
            other => panic!("unexpected {other:?}"),
        }

        match table.resolve_type(1, &resolver) {
            Err(Error::TypeNotFound(name)) => assert!(name.contains("MyApp.Ghost")),
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            table.resolve_converter(0, &resolver),
            Err(Error::ConverterNotFound(_))
        ));
    }

    #[test]
    fn known_types_resolve_through_their_assembly() {
        let resolver = MemoryResolver::new().with_type(
            "PresentationCore",
            "System.Windows.Media.SolidColorBrush",
            &[],
        );
        let mut table = MapTable::new();
        let brush = table
            .known()
            .find_type("PresentationCore", "System.Windows.Media.SolidColorBrush")
            .unwrap()
            .id();

        let handle = table.resolve_type(brush, &resolver).unwrap();
        assert_eq!(handle.assembly, "PresentationCore");
        assert_eq!(handle.full_name, "System.Windows.Media.SolidColorBrush");
    }

    #[test]
    fn known_types_use_known_converters() {
        let resolver = MemoryResolver::new()
            .with_type("PresentationFramework", "System.Windows.Thickness", &[])
            .with_type("PresentationFramework", "System.Windows.Controls.Button", &[]);
        let mut table = MapTable::new();
        let thickness = table
            .known()
            .find_type(FRAMEWORK, "System.Windows.Thickness")
            .unwrap()
            .id();

        let converter = table.resolve_converter(thickness, &resolver).unwrap();
        assert_eq!(converter.converter, "System.Windows.ThicknessConverter");
        assert_eq!(converter.target, "System.Windows.Thickness");
        assert_eq!(table.cached_converter(thickness), Some(converter));

        let button = table
            .known()
            .find_type(FRAMEWORK, "System.Windows.Controls.Button")
            .unwrap()
            .id();
        assert!(matches!(
            table.resolve_converter(button, &resolver),
            Err(Error::ConverterNotFound(_))
        ));
    }
}
