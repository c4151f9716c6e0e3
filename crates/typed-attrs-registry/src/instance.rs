//! Attribute values for one object of a definition.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use typed_attrs_core::{CastType, TypeError, Value};

use crate::{AttributeError, Definition};

/// An object holding per-attribute values for a shared [`Definition`].
///
/// A slot is "set" once it was written or its default was materialized.
/// Unset attributes without a default read as `Nil` and stay unset.
///
/// [`Instance::read`] goes through reader overrides and returns a clone.
/// [`Instance::read_ref`] and [`Instance::read_mut`] borrow the stored slot
/// itself and only use the generated reader, so they never see overrides.
#[derive(Clone)]
pub struct Instance {
    definition: Arc<Definition>,
    values: FxHashMap<String, Value>,
}

impl Instance {
    pub fn new(definition: &Arc<Definition>) -> Self {
        Self {
            definition: Arc::clone(definition),
            values: FxHashMap::default(),
        }
    }

    /// Create an instance and assign each pair through the attribute writers.
    pub fn build<I, K, V>(definition: &Arc<Definition>, attributes: I) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut instance = Self::new(definition);
        instance.assign_attributes(attributes)?;
        Ok(instance)
    }

    /// Assign pairs in order, stopping at the first failure.
    pub fn assign_attributes<I, K, V>(&mut self, attributes: I) -> Result<(), AttributeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in attributes {
            self.write(name, value)?;
        }
        Ok(())
    }

    pub fn definition(&self) -> &Arc<Definition> {
        &self.definition
    }

    /// Read an attribute through its reader override, if any, else the
    /// generated reader. Undeclared names read as `Nil`.
    pub fn read(&mut self, name: impl AsRef<str>) -> Value {
        let name = name.as_ref();
        let definition = Arc::clone(&self.definition);
        let accessors = definition.accessors();
        let Some(generated) = accessors.generated(name) else {
            return Value::Nil;
        };
        match accessors.reader_override(name) {
            Some(hook) => hook(self, &generated.reader),
            None => generated.reader.call(self),
        }
    }

    /// Assign an attribute through its writer override, if any, else the
    /// generated writer.
    pub fn write(&mut self, name: impl AsRef<str>, raw: impl Into<Value>) -> Result<(), AttributeError> {
        let name = name.as_ref();
        let definition = Arc::clone(&self.definition);
        let accessors = definition.accessors();
        let Some(generated) = accessors.generated(name) else {
            return Err(AttributeError::UnknownAttribute {
                definition: definition.name().to_owned(),
                attribute: name.to_owned(),
            });
        };
        let raw = raw.into();
        match accessors.writer_override(name) {
            Some(hook) => hook(self, raw, &generated.writer),
            None => generated.writer.call(self, raw),
        }
    }

    /// Borrow the cached value, materializing the default on first access.
    ///
    /// Bypasses reader overrides. Repeated calls return the same slot, so a
    /// materialized default keeps its identity until the attribute is written.
    pub fn read_ref(&mut self, name: impl AsRef<str>) -> Option<&Value> {
        self.read_mut(name).map(|value| &*value)
    }

    /// Mutable variant of [`Instance::read_ref`]; changes are visible to later reads.
    pub fn read_mut(&mut self, name: impl AsRef<str>) -> Option<&mut Value> {
        let definition = Arc::clone(&self.definition);
        let generated = definition.accessors().generated(name.as_ref())?;
        generated.reader.slot(self)
    }

    /// Whether `name` holds a written or materialized value.
    pub fn is_set(&self, name: impl AsRef<str>) -> bool {
        self.values.contains_key(name.as_ref())
    }

    pub fn type_for_attribute(&self, name: impl AsRef<str>) -> Result<Arc<dyn CastType>, TypeError> {
        self.definition.type_for_attribute(name)
    }

    pub fn has_attribute(&self, name: impl AsRef<str>) -> bool {
        self.definition.has_attribute(name)
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    pub(crate) fn store(&mut self, name: &str, value: Value) -> &mut Value {
        let slot = self.values.entry(name.to_owned()).or_default();
        *slot = value;
        slot
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values: Vec<_> = self.values.iter().collect();
        values.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_struct("Instance")
            .field("definition", &self.definition.name())
            .field("values", &values)
            .finish()
    }
}
