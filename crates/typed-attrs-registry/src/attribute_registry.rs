//! Per-definition attribute registry.

use std::ops::Index;

use indexmap::IndexMap;
use indexmap::map::Iter;

use crate::AttributeDescriptor;

/// Ordered `name -> descriptor` map owned by one definition.
///
/// Iteration follows declaration order. Redeclaring a name replaces its
/// descriptor wholesale and keeps the original position.
///
/// Cloning is the copy-on-inherit step: a subclass gets its own map and later
/// changes on either side stay local.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRegistry {
    entries: IndexMap<String, AttributeDescriptor>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, returning the replaced descriptor.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: AttributeDescriptor,
    ) -> Option<AttributeDescriptor> {
        self.entries.insert(name.into(), descriptor)
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&AttributeDescriptor> {
        self.entries.get(name.as_ref())
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.entries.contains_key(name.as_ref())
    }

    /// Declaration position of `name`.
    pub fn position(&self, name: impl AsRef<str>) -> Option<usize> {
        self.entries.get_index_of(name.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_, String, AttributeDescriptor> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for AttributeRegistry {
    type Output = AttributeDescriptor;

    /// # Panics
    ///
    /// Panics if `name` is not declared.
    fn index(&self, name: &str) -> &AttributeDescriptor {
        &self.entries[name]
    }
}

impl<'a> IntoIterator for &'a AttributeRegistry {
    type Item = (&'a String, &'a AttributeDescriptor);
    type IntoIter = Iter<'a, String, AttributeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeOptions, CastTypeRef};

    fn descriptor(cast_type: &str) -> AttributeDescriptor {
        AttributeDescriptor::new(cast_type, AttributeOptions::new())
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = AttributeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn keys_follow_declaration_order() {
        let mut registry = AttributeRegistry::new();
        registry.insert("b", descriptor("string"));
        registry.insert("a", descriptor("integer"));
        registry.insert("c", descriptor("date"));

        assert_eq!(registry.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn redeclaration_replaces_in_place() {
        let mut registry = AttributeRegistry::new();
        registry.insert("a", descriptor("integer"));
        registry.insert("b", AttributeDescriptor::new("string", AttributeOptions::new().default("x")));

        let replaced = registry.insert("b", descriptor("integer"));

        assert_eq!(replaced.map(|d| d.cast_type), Some(CastTypeRef::from("string")));
        assert_eq!(registry.position("b"), Some(1));
        assert_eq!(registry["b"], descriptor("integer"));
        assert!(!registry["b"].options.has_default());
    }

    #[test]
    fn lookup_accepts_str_and_string() {
        let mut registry = AttributeRegistry::new();
        registry.insert("integer_field", descriptor("integer"));

        let owned = String::from("integer_field");
        assert_eq!(registry.get("integer_field"), registry.get(&owned));
        assert!(registry.contains(owned));
        assert!(!registry.contains("missing"));
    }

    #[test]
    fn clones_are_independent() {
        let mut parent = AttributeRegistry::new();
        parent.insert("a", descriptor("integer"));

        let mut child = parent.clone();
        child.insert("a", descriptor("string"));
        child.insert("b", descriptor("date"));
        parent.insert("c", descriptor("float"));

        assert_eq!(parent["a"], descriptor("integer"));
        assert!(!parent.contains("b"));
        assert!(!child.contains("c"));
    }
}
