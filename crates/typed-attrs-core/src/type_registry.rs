//! TypeRegistry - symbolic cast type lookup.
//!
//! Attributes may name their cast type symbolically (`"integer"`, `"money"`).
//! The registry maps such a name to a factory that builds a configured
//! [`CastType`] from the attribute's type options.
//!
//! # Late Binding
//!
//! Lookups build a fresh instance every time, and registrations may replace an
//! existing name at any point. A symbolically typed attribute therefore picks
//! up a replacement on its next cast. Registration goes through `&self` so a
//! shared `Arc<TypeRegistry>` can be updated after definitions were declared.
//!
//! # Example
//!
//! ```
//! use typed_attrs_core::{Options, TypeRegistry, Value};
//! use typed_attrs_core::types::IntegerType;
//!
//! let registry = TypeRegistry::with_defaults();
//! let integer = registry.lookup("integer", &Options::new()).unwrap();
//!
//! assert!(integer.is::<IntegerType>());
//! assert_eq!(integer.cast(Value::from("2.3")).unwrap(), Value::Int(2));
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::types::{
    BooleanType, DateTimeType, DateType, DecimalType, FloatType, IntegerType, StringType,
    ValueType,
};
use crate::{CastType, FromOptions, Options, TypeError};

/// Builds a configured cast type from type options.
pub type TypeFactory =
    Arc<dyn Fn(&Options) -> Result<Arc<dyn CastType>, TypeError> + Send + Sync>;

lazy_static! {
    static ref GLOBAL: Arc<TypeRegistry> = Arc::new(TypeRegistry::with_defaults());
}

/// Name -> factory map for cast types.
#[derive(Default)]
pub struct TypeRegistry {
    factories: RwLock<FxHashMap<String, TypeFactory>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in types registered.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Process-wide registry, created with the built-in types on first use.
    pub fn global() -> &'static Arc<TypeRegistry> {
        &GLOBAL
    }

    /// Register the built-in types under their canonical names.
    pub fn register_defaults(&self) {
        self.register::<ValueType>(ValueType::NAME);
        self.register::<BooleanType>(BooleanType::NAME);
        self.register::<IntegerType>(IntegerType::NAME);
        self.register::<FloatType>(FloatType::NAME);
        self.register::<DecimalType>(DecimalType::NAME);
        self.register::<StringType>(StringType::NAME);
        self.register::<DateType>(DateType::NAME);
        self.register::<DateTimeType>(DateTimeType::NAME);
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register `T` under `name`, replacing any previous registration.
    pub fn register<T>(&self, name: impl Into<String>)
    where
        T: CastType + FromOptions,
    {
        self.register_with(name, |options: &Options| {
            T::from_options(options).map(|ty| Arc::new(ty) as Arc<dyn CastType>)
        });
    }

    /// Register an arbitrary factory under `name`, replacing any previous registration.
    pub fn register_with<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(&Options) -> Result<Arc<dyn CastType>, TypeError> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        let replaced = factories.insert(name.clone(), Arc::new(factory)).is_some();
        tracing::debug!(name = %name, replaced, "registered cast type");
    }

    /// Remove a registration. Returns whether `name` was registered.
    pub fn unregister(&self, name: &str) -> bool {
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        factories.remove(name).is_some()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Build the cast type registered under `name`, configured with `options`.
    pub fn lookup(&self, name: &str, options: &Options) -> Result<Arc<dyn CastType>, TypeError> {
        let factory = {
            let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
            factories.get(name).cloned()
        };
        let Some(factory) = factory else {
            return Err(TypeError::UnknownType(name.to_owned()));
        };

        tracing::trace!(name, options = options.len(), "cast type lookup");
        factory(options)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastError, Value};
    use pretty_assertions::assert_eq;
    use std::any::Any;

    #[derive(Debug)]
    struct Upcase;

    impl CastType for Upcase {
        fn type_name(&self) -> &str {
            "upcase"
        }

        fn cast(&self, value: Value) -> Result<Value, CastError> {
            match value {
                Value::String(s) => Ok(Value::String(s.to_uppercase())),
                other => Ok(other),
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn new_registry_is_empty() {
        let registry = TypeRegistry::new();
        assert!(registry.names().is_empty());
        assert!(!registry.is_registered("integer"));
    }

    #[test]
    fn defaults_are_registered() {
        let registry = TypeRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            ["boolean", "date", "datetime", "decimal", "float", "integer", "string", "value"]
        );
    }

    #[test]
    fn lookup_builds_configured_instances() {
        let registry = TypeRegistry::with_defaults();
        let ty = registry
            .lookup("decimal", &Options::new().with("scale", 2))
            .unwrap();

        let decimal = ty.downcast_ref::<DecimalType>().unwrap();
        assert_eq!(decimal.options().scale, Some(2));
    }

    #[test]
    fn lookup_of_unknown_name_fails() {
        let registry = TypeRegistry::with_defaults();
        let err = registry.lookup("money", &Options::new()).unwrap_err();
        assert_eq!(err, TypeError::UnknownType("money".into()));
    }

    #[test]
    fn lookup_forwards_option_errors() {
        let registry = TypeRegistry::with_defaults();
        let err = registry
            .lookup("string", &Options::new().with("default", "x"))
            .unwrap_err();
        assert!(matches!(err, TypeError::UnknownOption { .. }));
    }

    #[test]
    fn registration_can_be_replaced() {
        let registry = TypeRegistry::with_defaults();
        registry.register_with("string", |_: &Options| Ok(Arc::new(Upcase) as Arc<dyn CastType>));

        let ty = registry.lookup("string", &Options::new()).unwrap();
        assert!(ty.is::<Upcase>());
        assert_eq!(ty.cast(Value::from("abc")).unwrap(), Value::from("ABC"));
    }

    #[test]
    fn unregister_removes_name() {
        let registry = TypeRegistry::with_defaults();
        assert!(registry.unregister("date"));
        assert!(!registry.unregister("date"));
        assert!(registry.lookup("date", &Options::new()).is_err());
    }

    #[test]
    fn global_registry_has_defaults() {
        assert!(TypeRegistry::global().is_registered("integer"));
    }
}
