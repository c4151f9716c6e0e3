//! Generated accessors and the override tier.
//!
//! Every declared attribute gets a generated reader/writer pair. A definition
//! may layer an override on either one; the override is handed the generated
//! accessor as its base implementation and decides when to call it.
//!
//! ```text
//! Instance::read(name)
//! ├── reader override  -> hook(instance, &generated.reader)
//! └── generated reader -> cached value | materialized default | Nil
//!
//! Instance::write(name, raw)
//! ├── writer override  -> hook(instance, raw, &generated.writer)
//! └── generated writer -> resolve cast type, cast, store
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use typed_attrs_core::{CastType, TypeError, TypeRegistry, Value};

use crate::{AttributeDescriptor, AttributeError, AttributeOptions, DefaultValue, Instance};

/// Reader override: receives the generated reader as its base.
pub type ReaderOverride = Arc<dyn Fn(&mut Instance, &GeneratedReader) -> Value + Send + Sync>;

/// Writer override: receives the raw value and the generated writer as its base.
pub type WriterOverride =
    Arc<dyn Fn(&mut Instance, Value, &GeneratedWriter) -> Result<(), AttributeError> + Send + Sync>;

// ============================================================================
// Generated tier
// ============================================================================

/// Generated getter for one attribute.
#[derive(Debug, Clone)]
pub struct GeneratedReader {
    name: String,
    default: Option<DefaultValue>,
}

impl GeneratedReader {
    fn new(name: &str, options: &AttributeOptions) -> Self {
        Self {
            name: name.to_owned(),
            default: options.default_value().cloned(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the attribute: the cached value if set, else the default
    /// (materialized and cached on first read), else `Nil` with nothing cached.
    pub fn call(&self, instance: &mut Instance) -> Value {
        self.slot(instance).cloned().unwrap_or_default()
    }

    /// The instance's slot for this attribute, materializing the default if needed.
    pub(crate) fn slot<'i>(&self, instance: &'i mut Instance) -> Option<&'i mut Value> {
        if instance.is_set(&self.name) {
            return instance.slot_mut(&self.name);
        }
        let default = self.default.as_ref()?;
        tracing::trace!(
            attribute = %self.name,
            producer = default.is_producer(),
            "materializing default"
        );
        Some(instance.store(&self.name, default.materialize()))
    }
}

/// Generated setter for one attribute.
#[derive(Clone)]
pub struct GeneratedWriter {
    name: String,
    descriptor: AttributeDescriptor,
    types: Arc<TypeRegistry>,
}

impl GeneratedWriter {
    fn new(name: &str, descriptor: &AttributeDescriptor, types: &Arc<TypeRegistry>) -> Self {
        Self {
            name: name.to_owned(),
            descriptor: descriptor.clone(),
            types: Arc::clone(types),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &AttributeDescriptor {
        &self.descriptor
    }

    /// Cast type in effect right now. Symbolic types are looked up again on
    /// every call so registry replacements take effect immediately.
    pub fn cast_type(&self) -> Result<Arc<dyn CastType>, TypeError> {
        self.descriptor.resolve(&self.types)
    }

    /// Cast `raw` and store the result, marking the attribute as set.
    pub fn call(&self, instance: &mut Instance, raw: Value) -> Result<(), AttributeError> {
        let cast_type = self.cast_type()?;
        let value = cast_type.cast(raw)?;
        instance.store(&self.name, value);
        Ok(())
    }
}

impl fmt::Debug for GeneratedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedWriter")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// The generated pair installed for a declaration.
#[derive(Debug, Clone)]
pub struct GeneratedAccessors {
    pub reader: GeneratedReader,
    pub writer: GeneratedWriter,
}

impl GeneratedAccessors {
    pub(crate) fn new(
        name: &str,
        descriptor: &AttributeDescriptor,
        types: &Arc<TypeRegistry>,
    ) -> Self {
        Self {
            reader: GeneratedReader::new(name, &descriptor.options),
            writer: GeneratedWriter::new(name, descriptor, types),
        }
    }
}

// ============================================================================
// Dispatch table
// ============================================================================

/// An override plus whether it came from an ancestor definition.
#[derive(Clone)]
struct Layer<F> {
    hook: F,
    inherited: bool,
}

/// Two-tier dispatch table: generated accessors below, overrides on top.
#[derive(Clone, Default)]
pub struct AccessorTable {
    generated: FxHashMap<String, GeneratedAccessors>,
    readers: FxHashMap<String, Layer<ReaderOverride>>,
    writers: FxHashMap<String, Layer<WriterOverride>>,
}

impl AccessorTable {
    /// Install a freshly generated pair.
    ///
    /// Overrides inherited for `name` are dropped: the new generated pair is
    /// more specific than an ancestor's override. Overrides attached on this
    /// definition stay on top.
    pub(crate) fn install(&mut self, name: &str, accessors: GeneratedAccessors) {
        self.generated.insert(name.to_owned(), accessors);
        if self.readers.get(name).is_some_and(|layer| layer.inherited) {
            self.readers.remove(name);
        }
        if self.writers.get(name).is_some_and(|layer| layer.inherited) {
            self.writers.remove(name);
        }
    }

    /// Copy for a subclass, with every override marked as inherited.
    pub(crate) fn inherit(&self) -> Self {
        let mut table = self.clone();
        for layer in table.readers.values_mut() {
            layer.inherited = true;
        }
        for layer in table.writers.values_mut() {
            layer.inherited = true;
        }
        table
    }

    pub(crate) fn set_reader_override(&mut self, name: &str, hook: ReaderOverride) {
        self.readers.insert(
            name.to_owned(),
            Layer {
                hook,
                inherited: false,
            },
        );
    }

    pub(crate) fn set_writer_override(&mut self, name: &str, hook: WriterOverride) {
        self.writers.insert(
            name.to_owned(),
            Layer {
                hook,
                inherited: false,
            },
        );
    }

    pub fn generated(&self, name: &str) -> Option<&GeneratedAccessors> {
        self.generated.get(name)
    }

    pub fn reader_override(&self, name: &str) -> Option<&ReaderOverride> {
        self.readers.get(name).map(|layer| &layer.hook)
    }

    pub fn writer_override(&self, name: &str) -> Option<&WriterOverride> {
        self.writers.get(name).map(|layer| &layer.hook)
    }

    pub fn len(&self) -> usize {
        self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }
}

impl fmt::Debug for AccessorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut generated: Vec<_> = self.generated.keys().collect();
        let mut readers: Vec<_> = self.readers.keys().collect();
        let mut writers: Vec<_> = self.writers.keys().collect();
        generated.sort();
        readers.sort();
        writers.sort();
        f.debug_struct("AccessorTable")
            .field("generated", &generated)
            .field("reader_overrides", &readers)
            .field("writer_overrides", &writers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Definition;

    fn noop_reader() -> ReaderOverride {
        Arc::new(|instance: &mut Instance, base: &GeneratedReader| base.call(instance))
    }

    fn accessors(name: &str) -> GeneratedAccessors {
        let types = Arc::new(TypeRegistry::with_defaults());
        let descriptor = AttributeDescriptor::new("string", AttributeOptions::new());
        GeneratedAccessors::new(name, &descriptor, &types)
    }

    #[test]
    fn install_keeps_own_overrides() {
        let mut table = AccessorTable::default();
        table.install("value", accessors("value"));
        table.set_reader_override("value", noop_reader());

        table.install("value", accessors("value"));
        assert!(table.reader_override("value").is_some());
    }

    #[test]
    fn install_drops_inherited_overrides() {
        let mut parent = AccessorTable::default();
        parent.install("value", accessors("value"));
        parent.set_reader_override("value", noop_reader());

        let mut child = parent.inherit();
        assert!(child.reader_override("value").is_some());

        child.install("value", accessors("value"));
        assert!(child.reader_override("value").is_none());
        assert!(parent.reader_override("value").is_some());
    }

    #[test]
    fn generated_reader_without_default_caches_nothing() {
        let mut definition = Definition::with_types("Plain", Arc::new(TypeRegistry::with_defaults()));
        definition.attribute("name", "string").unwrap();
        let definition = Arc::new(definition);
        let mut instance = Instance::new(&definition);

        let reader = &definition.accessors().generated("name").unwrap().reader;
        assert_eq!(reader.call(&mut instance), Value::Nil);
        assert!(!instance.is_set("name"));
    }

    #[test]
    fn generated_writer_stores_cast_value() {
        let mut definition = Definition::with_types("Plain", Arc::new(TypeRegistry::with_defaults()));
        definition.attribute("count", "integer").unwrap();
        let definition = Arc::new(definition);
        let mut instance = Instance::new(&definition);

        let writer = &definition.accessors().generated("count").unwrap().writer;
        writer.call(&mut instance, Value::from("2.3")).unwrap();

        assert!(instance.is_set("count"));
        assert_eq!(instance.read("count"), Value::Int(2));
    }

    #[test]
    fn debug_lists_names() {
        let mut table = AccessorTable::default();
        table.install("b", accessors("b"));
        table.install("a", accessors("a"));
        let debug = format!("{:?}", table);
        assert!(debug.contains("[\"a\", \"b\"]"));
    }
}
