use crate::{
    baml::{
        records::{
            AssemblyInfoRecord, AttributeInfoRecord, AttributeUsage, RecordData,
            StringInfoRecord, TypeInfoFlags, TypeInfoRecord, TypeSerializerInfoRecord,
        },
        resolver::{AssemblyHandle, MemberHandle, TypeHandle, TypeResolver},
    },
    Result,
};

/// An interned assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyEntry {
    /// Table id; -1 for the framework assembly
    pub id: i16,
    /// Fully qualified assembly name
    pub full_name: String,
    handle: Option<AssemblyHandle>,
}

impl AssemblyEntry {
    /// A new, unresolved entry.
    #[must_use]
    pub fn new(id: i16, full_name: &str) -> Self {
        AssemblyEntry {
            id,
            full_name: full_name.to_string(),
            handle: None,
        }
    }

    /// The cached handle, if the entry was resolved.
    #[must_use]
    pub fn handle(&self) -> Option<&AssemblyHandle> {
        self.handle.as_ref()
    }

    /// Load the assembly on first use and cache the handle.
    ///
    /// # Errors
    /// Returns the resolver's error if the assembly cannot be loaded.
    pub fn resolve(&mut self, resolver: &dyn TypeResolver) -> Result<&AssemblyHandle> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => resolver.load_assembly(&self.full_name)?,
        };
        Ok(self.handle.insert(handle))
    }

    /// The record that defines this entry.
    #[must_use]
    pub fn to_record(&self) -> RecordData {
        RecordData::AssemblyInfo(AssemblyInfoRecord {
            assembly_id: self.id,
            assembly_full_name: self.full_name.clone(),
        })
    }

    pub(crate) fn same_definition(&self, record: &AssemblyInfoRecord) -> bool {
        self.id == record.assembly_id && self.full_name == record.assembly_full_name
    }
}

impl From<&AssemblyInfoRecord> for AssemblyEntry {
    fn from(record: &AssemblyInfoRecord) -> Self {
        AssemblyEntry::new(record.assembly_id, &record.assembly_full_name)
    }
}

/// An interned type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Table id, negative for known types
    pub id: i16,
    /// Id of the defining assembly
    pub assembly_id: i16,
    /// Namespace-qualified type name
    pub full_name: String,
    /// The type is not visible outside its assembly
    pub is_internal: bool,
    /// Custom serializer, set for entries defined by a `TypeSerializerInfo` record
    pub serializer_type_id: Option<i16>,
    handle: Option<TypeHandle>,
}

impl TypeEntry {
    /// A new, unresolved entry.
    #[must_use]
    pub fn new(id: i16, assembly_id: i16, full_name: &str) -> Self {
        TypeEntry {
            id,
            assembly_id,
            full_name: full_name.to_string(),
            is_internal: false,
            serializer_type_id: None,
            handle: None,
        }
    }

    /// Short type name, without namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('.')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    /// The cached handle, if the entry was resolved.
    #[must_use]
    pub fn handle(&self) -> Option<&TypeHandle> {
        self.handle.as_ref()
    }

    /// Look the type up in its (already loaded) assembly on first use and cache the handle.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the assembly has no such type.
    pub fn resolve(
        &mut self,
        assembly: &AssemblyHandle,
        resolver: &dyn TypeResolver,
    ) -> Result<&TypeHandle> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => resolver.resolve_type(assembly, &self.full_name)?,
        };
        Ok(self.handle.insert(handle))
    }

    /// The record that defines this entry.
    #[must_use]
    pub fn to_record(&self) -> RecordData {
        let mut type_info = TypeInfoRecord {
            type_id: self.id,
            assembly_id: self.assembly_id,
            type_full_name: self.full_name.clone(),
            flags: TypeInfoFlags::empty(),
        };
        type_info.flags.set(TypeInfoFlags::INTERNAL, self.is_internal);

        match self.serializer_type_id {
            Some(serializer_type_id) => RecordData::TypeSerializerInfo(TypeSerializerInfoRecord {
                type_info,
                serializer_type_id,
            }),
            None => RecordData::TypeInfo(type_info),
        }
    }

    pub(crate) fn same_definition(&self, other: &TypeEntry) -> bool {
        self.id == other.id
            && self.assembly_id == other.assembly_id
            && self.full_name == other.full_name
            && self.is_internal == other.is_internal
            && self.serializer_type_id == other.serializer_type_id
    }
}

impl From<&TypeInfoRecord> for TypeEntry {
    fn from(record: &TypeInfoRecord) -> Self {
        TypeEntry {
            is_internal: record.is_internal(),
            ..TypeEntry::new(record.type_id, record.assembly_id, &record.type_full_name)
        }
    }
}

impl From<&TypeSerializerInfoRecord> for TypeEntry {
    fn from(record: &TypeSerializerInfoRecord) -> Self {
        TypeEntry {
            serializer_type_id: Some(record.serializer_type_id),
            ..TypeEntry::from(&record.type_info)
        }
    }
}

/// An interned property or event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    /// Table id, negative for known properties
    pub id: i16,
    /// Id of the declaring type
    pub owner_type_id: i16,
    /// Member name
    pub name: String,
    /// How the attribute is used
    pub usage: AttributeUsage,
    handle: Option<MemberHandle>,
}

impl AttributeEntry {
    /// A new, unresolved entry.
    #[must_use]
    pub fn new(id: i16, owner_type_id: i16, name: &str, usage: AttributeUsage) -> Self {
        AttributeEntry {
            id,
            owner_type_id,
            name: name.to_string(),
            usage,
            handle: None,
        }
    }

    /// `true` if this attribute names the element (`x:Name` style identity property).
    #[must_use]
    pub fn is_runtime_name(&self) -> bool {
        self.usage == AttributeUsage::RuntimeName
    }

    /// The cached handle, if the entry was resolved.
    #[must_use]
    pub fn handle(&self) -> Option<&MemberHandle> {
        self.handle.as_ref()
    }

    /// Look the member up on its (already resolved) owner on first use and cache the handle.
    ///
    /// # Errors
    /// Returns [`crate::Error::PropertyNotFound`] if the owner has no such member.
    pub fn resolve(
        &mut self,
        owner: &TypeHandle,
        resolver: &dyn TypeResolver,
    ) -> Result<&MemberHandle> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => resolver.resolve_member(owner, &self.name)?,
        };
        Ok(self.handle.insert(handle))
    }

    /// The record that defines this entry.
    #[must_use]
    pub fn to_record(&self) -> RecordData {
        RecordData::AttributeInfo(AttributeInfoRecord {
            attribute_id: self.id,
            owner_type_id: self.owner_type_id,
            usage: self.usage,
            name: self.name.clone(),
        })
    }

    pub(crate) fn same_definition(&self, record: &AttributeInfoRecord) -> bool {
        self.id == record.attribute_id
            && self.owner_type_id == record.owner_type_id
            && self.usage == record.usage
            && self.name == record.name
    }
}

impl From<&AttributeInfoRecord> for AttributeEntry {
    fn from(record: &AttributeInfoRecord) -> Self {
        AttributeEntry::new(
            record.attribute_id,
            record.owner_type_id,
            &record.name,
            record.usage,
        )
    }
}

/// An interned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEntry {
    /// Table id, negative for known strings
    pub id: i16,
    /// The string
    pub value: String,
}

impl StringEntry {
    /// The record that defines this entry.
    #[must_use]
    pub fn to_record(&self) -> RecordData {
        RecordData::StringInfo(StringInfoRecord {
            string_id: self.id,
            value: self.value.clone(),
        })
    }
}

impl From<&StringInfoRecord> for StringEntry {
    fn from(record: &StringInfoRecord) -> Self {
        StringEntry {
            id: record.string_id,
            value: record.value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{baml::resolver::MemoryResolver, Error};

    #[test]
    fn resolution_is_cached() {
        let resolver = MemoryResolver::new().with_type("MyApp", "MyApp.Gauge", &["Value"]);

        let mut assembly = AssemblyEntry::new(0, "MyApp, Version=1.0.0.0");
        let mut gauge = TypeEntry::new(0, 0, "MyApp.Gauge");
        let mut value = AttributeEntry::new(0, 0, "Value", AttributeUsage::Default);
        assert!(gauge.handle().is_none());

        let assembly_handle = assembly.resolve(&resolver).unwrap().clone();
        let type_handle = gauge.resolve(&assembly_handle, &resolver).unwrap().clone();
        value.resolve(&type_handle, &resolver).unwrap();
        assert_eq!(resolver.lookups(), 3);

        assembly.resolve(&resolver).unwrap();
        gauge.resolve(&assembly_handle, &resolver).unwrap();
        value.resolve(&type_handle, &resolver).unwrap();
        assert_eq!(resolver.lookups(), 3);

        assert_eq!(gauge.name(), "Gauge");
        assert_eq!(value.handle().unwrap().owner, "MyApp.Gauge");
    }

    #[test]
    fn failed_resolution_is_not_cached() {
        let resolver = MemoryResolver::new().with_assembly("MyApp");
        let assembly = AssemblyHandle {
            name: "MyApp".to_string(),
        };

        let mut missing = TypeEntry::new(0, 0, "MyApp.Missing");
        assert!(matches!(
            missing.resolve(&assembly, &resolver),
            Err(Error::TypeNotFound(_))
        ));
        assert!(missing.handle().is_none());
    }

    #[test]
    fn records_from_entries() {
        let mut entry = TypeEntry::new(4, 1, "MyApp.Gauge");
        entry.is_internal = true;
        let RecordData::TypeInfo(record) = entry.to_record() else {
            panic!("expected TypeInfo");
        };
        assert!(record.is_internal());
        assert!(TypeEntry::from(&record).same_definition(&entry));

        entry.serializer_type_id = Some(-3);
        let RecordData::TypeSerializerInfo(record) = entry.to_record() else {
            panic!("expected TypeSerializerInfo");
        };
        assert_eq!(record.serializer_type_id, -3);
        assert!(TypeEntry::from(&record).same_definition(&entry));

        let attribute = AttributeEntry::new(2, -5, "Width", AttributeUsage::Default);
        let RecordData::AttributeInfo(record) = attribute.to_record() else {
            panic!("expected AttributeInfo");
        };
        assert!(attribute.same_definition(&record));
        assert!(!attribute.is_runtime_name());
    }
}
