//! Definition - a named set of typed attribute declarations.
//!
//! A [`Definition`] plays the role of a class: it owns the attribute registry,
//! the flattened `attribute_types` index and the accessor table. Instances
//! share a definition through `Arc<Definition>`.
//!
//! # Lifecycle
//!
//! Definitions are built mutably during setup (declarations, subclassing,
//! overrides) and frozen by wrapping them in an `Arc` before instances are
//! created. Nothing mutates a definition after that, so shared use needs no
//! synchronization.
//!
//! # Inheritance
//!
//! [`Definition::subclass`] takes a structural copy of the parent's registry,
//! type index and accessors at that moment. Later declarations on either side
//! stay local to it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use typed_attrs_core::{TypeRegistry, Value};
//! use typed_attrs_registry::{AttributeOptions, Definition, Instance};
//!
//! let mut person = Definition::with_types("Person", Arc::new(TypeRegistry::with_defaults()));
//! person
//!     .attribute("age", "integer")?
//!     .attribute_with("nickname", "string", AttributeOptions::new().default("none"))?;
//! let person = Arc::new(person);
//!
//! let mut bob = Instance::build(&person, [("age", "42")])?;
//! assert_eq!(bob.read("age"), Value::Int(42));
//! assert_eq!(bob.read("nickname"), Value::from("none"));
//! # Ok::<(), typed_attrs_registry::AttributeError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use typed_attrs_core::types::ValueType;
use typed_attrs_core::{CastType, TypeError, TypeRegistry, Value};

use crate::accessors::{AccessorTable, GeneratedAccessors, GeneratedReader, GeneratedWriter};
use crate::{
    AttributeDescriptor, AttributeError, AttributeOptions, AttributeRegistry, CastTypeRef, Instance,
};

/// A named set of typed attribute declarations.
#[derive(Clone)]
pub struct Definition {
    name: String,
    parent: Option<String>,
    types: Arc<TypeRegistry>,
    registry: AttributeRegistry,
    /// Flattened `name -> resolved type`, rebuilt on every declaration.
    attribute_types: IndexMap<String, Arc<dyn CastType>>,
    accessors: AccessorTable,
}

impl Definition {
    /// Create a definition resolving symbolic types through the global registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_types(name, Arc::clone(TypeRegistry::global()))
    }

    /// Create a definition resolving symbolic types through `types`.
    pub fn with_types(name: impl Into<String>, types: Arc<TypeRegistry>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            types,
            registry: AttributeRegistry::new(),
            attribute_types: IndexMap::new(),
            accessors: AccessorTable::default(),
        }
    }

    /// Derive a subclass from the current state of this definition.
    pub fn subclass(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!(
            definition = %name,
            parent = %self.name,
            attributes = self.registry.len(),
            "created subclass"
        );
        Self {
            name,
            parent: Some(self.name.clone()),
            types: Arc::clone(&self.types),
            registry: self.registry.clone(),
            attribute_types: self.attribute_types.clone(),
            accessors: self.accessors.inherit(),
        }
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    /// Declare an attribute without options.
    pub fn attribute(
        &mut self,
        name: impl Into<String>,
        cast_type: impl Into<CastTypeRef>,
    ) -> Result<&mut Self, AttributeError> {
        self.attribute_with(name, cast_type, AttributeOptions::new())
    }

    /// Declare (or redeclare) an attribute.
    ///
    /// The cast type is resolved once for the `attribute_types` index, so an
    /// unregistered symbolic name fails here and leaves the definition unchanged.
    pub fn attribute_with(
        &mut self,
        name: impl Into<String>,
        cast_type: impl Into<CastTypeRef>,
        options: AttributeOptions,
    ) -> Result<&mut Self, AttributeError> {
        let name = name.into();
        let descriptor = AttributeDescriptor::new(cast_type, options);
        let resolved = descriptor.resolve(&self.types)?;

        let accessors = GeneratedAccessors::new(&name, &descriptor, &self.types);
        tracing::debug!(
            definition = %self.name,
            attribute = %name,
            cast_type = ?descriptor.cast_type,
            replaced = self.registry.contains(&name),
            "declared attribute"
        );

        self.registry.insert(name.clone(), descriptor);
        self.accessors.install(&name, accessors);
        self.attribute_types.insert(name, resolved);
        Ok(self)
    }

    /// Layer a custom getter over the generated one.
    pub fn override_reader<F>(&mut self, name: &str, hook: F) -> Result<&mut Self, AttributeError>
    where
        F: Fn(&mut Instance, &GeneratedReader) -> Value + Send + Sync + 'static,
    {
        self.ensure_declared(name)?;
        self.accessors.set_reader_override(name, Arc::new(hook));
        tracing::debug!(definition = %self.name, attribute = name, "attached reader override");
        Ok(self)
    }

    /// Layer a custom setter over the generated one.
    pub fn override_writer<F>(&mut self, name: &str, hook: F) -> Result<&mut Self, AttributeError>
    where
        F: Fn(&mut Instance, Value, &GeneratedWriter) -> Result<(), AttributeError>
            + Send
            + Sync
            + 'static,
    {
        self.ensure_declared(name)?;
        self.accessors.set_writer_override(name, Arc::new(hook));
        tracing::debug!(definition = %self.name, attribute = name, "attached writer override");
        Ok(self)
    }

    fn ensure_declared(&self, name: &str) -> Result<(), AttributeError> {
        if self.accessors.generated(name).is_some() {
            Ok(())
        } else {
            Err(AttributeError::NotDeclared {
                definition: self.name.clone(),
                attribute: name.to_owned(),
            })
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the definition this one was derived from.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn types(&self) -> &Arc<TypeRegistry> {
        &self.types
    }

    /// Declared attributes in declaration order.
    pub fn attributes_registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Resolved cast type per declared attribute, as of its declaration.
    pub fn attribute_types(&self) -> &IndexMap<String, Arc<dyn CastType>> {
        &self.attribute_types
    }

    pub fn accessors(&self) -> &AccessorTable {
        &self.accessors
    }

    /// Cast type currently in effect for `name`.
    ///
    /// Undeclared names get the pass-through `value` type. Symbolic types are
    /// looked up again, so the only possible error is a lookup failure.
    pub fn type_for_attribute(&self, name: impl AsRef<str>) -> Result<Arc<dyn CastType>, TypeError> {
        match self.registry.get(name) {
            Some(descriptor) => descriptor.resolve(&self.types),
            None => Ok(Arc::new(ValueType::new())),
        }
    }

    pub fn has_attribute(&self, name: impl AsRef<str>) -> bool {
        self.registry.contains(name)
    }

    /// Whether assigning `name` has a writer to go through.
    pub fn has_writer(&self, name: impl AsRef<str>) -> bool {
        self.accessors.generated(name.as_ref()).is_some()
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("attributes", &self.registry)
            .field("accessors", &self.accessors)
            .finish()
    }
}
