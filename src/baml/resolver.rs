//! Collaborator interface for turning names into runtime handles.
//!
//! The codec never reflects over assemblies itself. Whenever a map-table entry is resolved, the
//! work is delegated to a [`TypeResolver`], which hands back opaque handles. The map table caches
//! the handles on its entries, so each name is resolved at most once per session.
//!
//! [`MemoryResolver`] is a table-driven resolver suitable for tools and tests: assemblies, types,
//! members and converters are registered up front.
//!
//! # Examples
//!
//! ```rust
//! use bamlscope::baml::resolver::{MemoryResolver, TypeResolver};
//!
//! let resolver = MemoryResolver::new()
//!     .with_type("MyApp", "MyApp.Gauge", &["Value", "Maximum"]);
//!
//! let assembly = resolver.load_assembly("MyApp, Version=1.0.0.0")?;
//! let gauge = resolver.resolve_type(&assembly, "MyApp.Gauge")?;
//! let member = resolver.resolve_member(&gauge, "Maximum")?;
//! assert_eq!(member.name, "Maximum");
//! # Ok::<(), bamlscope::Error>(())
//! ```

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use crate::{Error, Result};

/// A loaded assembly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyHandle {
    /// Simple name of the assembly, without version or key token
    pub name: String,
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    /// Simple name of the defining assembly
    pub assembly: String,
    /// Namespace-qualified type name
    pub full_name: String,
}

/// A resolved property or event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberHandle {
    /// Full name of the declaring type
    pub owner: String,
    /// Member name
    pub name: String,
}

/// A type converter instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConverterHandle {
    /// Full name of the converter type
    pub converter: String,
    /// Full name of the type it converts to
    pub target: String,
}

/// Reflection services the map table calls into.
///
/// Implementations report failures with [`Error::TypeNotFound`], [`Error::PropertyNotFound`]
/// and [`Error::ConverterNotFound`], naming the offending type or member.
pub trait TypeResolver {
    /// Load an assembly by its (possibly fully qualified) name.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the assembly is not available.
    fn load_assembly(&self, full_name: &str) -> Result<AssemblyHandle>;

    /// Look up a type in an assembly.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if the assembly has no such type.
    fn resolve_type(&self, assembly: &AssemblyHandle, full_name: &str) -> Result<TypeHandle>;

    /// Look up a property or event on a type.
    ///
    /// # Errors
    /// Returns [`Error::PropertyNotFound`] if the type has no member with that name.
    fn resolve_member(&self, owner: &TypeHandle, name: &str) -> Result<MemberHandle>;

    /// Create the type converter registered for a type.
    ///
    /// # Errors
    /// Returns [`Error::ConverterNotFound`] if the type has no converter.
    fn create_converter(&self, target: &TypeHandle) -> Result<ConverterHandle>;
}

/// Strip version, culture and key token from an assembly name.
#[must_use]
pub fn simple_assembly_name(full_name: &str) -> &str {
    full_name.split(',').next().unwrap_or(full_name).trim()
}

#[derive(Debug, Default, Clone)]
struct MemoryType {
    assembly: String,
    members: Vec<String>,
    converter: Option<String>,
}

/// A [`TypeResolver`] backed by registered names.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    assemblies: Vec<String>,
    types: HashMap<String, MemoryType>,
    permissive: bool,
    lookups: AtomicUsize,
}

impl MemoryResolver {
    /// An empty resolver that knows nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver that accepts every assembly, type and member, and has no converters.
    #[must_use]
    pub fn permissive() -> Self {
        MemoryResolver {
            permissive: true,
            ..Self::default()
        }
    }

    /// Register an assembly by simple name.
    #[must_use]
    pub fn with_assembly(mut self, name: &str) -> Self {
        let name = simple_assembly_name(name).to_string();
        if !self.assemblies.contains(&name) {
            self.assemblies.push(name);
        }
        self
    }

    /// Register a type together with its members. The assembly is registered as well.
    #[must_use]
    pub fn with_type(mut self, assembly: &str, full_name: &str, members: &[&str]) -> Self {
        self = self.with_assembly(assembly);
        let entry = self.types.entry(full_name.to_string()).or_default();
        entry.assembly = simple_assembly_name(assembly).to_string();
        entry
            .members
            .extend(members.iter().map(|member| (*member).to_string()));
        self
    }

    /// Register a converter for a previously registered type.
    #[must_use]
    pub fn with_converter(mut self, target: &str, converter: &str) -> Self {
        if let Some(entry) = self.types.get_mut(target) {
            entry.converter = Some(converter.to_string());
        }
        self
    }

    /// Number of calls made into this resolver.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn count(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }
}

impl TypeResolver for MemoryResolver {
    fn load_assembly(&self, full_name: &str) -> Result<AssemblyHandle> {
        self.count();
        let name = simple_assembly_name(full_name);
        if self.permissive || self.assemblies.iter().any(|known| known == name) {
            return Ok(AssemblyHandle {
                name: name.to_string(),
            });
        }

        Err(Error::TypeNotFound(format!("assembly '{full_name}'")))
    }

    fn resolve_type(&self, assembly: &AssemblyHandle, full_name: &str) -> Result<TypeHandle> {
        self.count();
        let registered = self
            .types
            .get(full_name)
            .is_some_and(|entry| entry.assembly == assembly.name);

        if registered || self.permissive {
            return Ok(TypeHandle {
                assembly: assembly.name.clone(),
                full_name: full_name.to_string(),
            });
        }

        Err(Error::TypeNotFound(format!(
            "{full_name} in assembly {}",
            assembly.name
        )))
    }

    fn resolve_member(&self, owner: &TypeHandle, name: &str) -> Result<MemberHandle> {
        self.count();
        let registered = self
            .types
            .get(&owner.full_name)
            .is_some_and(|entry| entry.members.iter().any(|member| member == name));

        if registered || self.permissive {
            return Ok(MemberHandle {
                owner: owner.full_name.clone(),
                name: name.to_string(),
            });
        }

        Err(Error::PropertyNotFound {
            owner: owner.full_name.clone(),
            name: name.to_string(),
        })
    }

    fn create_converter(&self, target: &TypeHandle) -> Result<ConverterHandle> {
        self.count();
        match self
            .types
            .get(&target.full_name)
            .and_then(|entry| entry.converter.as_ref())
        {
            Some(converter) => Ok(ConverterHandle {
                converter: converter.clone(),
                target: target.full_name.clone(),
            }),
            None => Err(Error::ConverterNotFound(target.full_name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_names() {
        assert_eq!(
            simple_assembly_name(
                "WindowsBase, Version=4.0.0.0, Culture=neutral, PublicKeyToken=31bf3856ad364e35"
            ),
            "WindowsBase"
        );
        assert_eq!(simple_assembly_name("MyApp"), "MyApp");
        assert_eq!(simple_assembly_name(""), "");
    }

    #[test]
    fn registered_names() {
        let resolver = MemoryResolver::new()
            .with_type("MyApp", "MyApp.Gauge", &["Value"])
            .with_converter("MyApp.Gauge", "MyApp.GaugeConverter");

        let assembly = resolver.load_assembly("MyApp").unwrap();
        let gauge = resolver.resolve_type(&assembly, "MyApp.Gauge").unwrap();
        assert_eq!(gauge.full_name, "MyApp.Gauge");

        let converter = resolver.create_converter(&gauge).unwrap();
        assert_eq!(converter.converter, "MyApp.GaugeConverter");

        match resolver.resolve_member(&gauge, "Missing") {
            Err(Error::PropertyNotFound { owner, name }) => {
                assert_eq!(owner, "MyApp.Gauge");
                assert_eq!(name, "Missing");
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            resolver.load_assembly("Other"),
            Err(Error::TypeNotFound(_))
        ));
        assert!(matches!(
            resolver.resolve_type(&assembly, "MyApp.Missing"),
            Err(Error::TypeNotFound(_))
        ));
        assert_eq!(resolver.lookups(), 6);
    }

    #[test]
    fn permissive_has_no_converters() {
        let resolver = MemoryResolver::permissive();
        let assembly = resolver.load_assembly("Anything").unwrap();
        let handle = resolver.resolve_type(&assembly, "Any.Type").unwrap();
        assert!(resolver.resolve_member(&handle, "Whatever").is_ok());
        assert!(matches!(
            resolver.create_converter(&handle),
            Err(Error::ConverterNotFound(_))
        ));
    }
}
