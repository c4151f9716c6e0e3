//! Attribute descriptors.
//!
//! A descriptor is the `(cast type, options)` pair stored per attribute name.
//! The cast type is either a concrete instance, used as is, or a symbolic name
//! resolved through a [`TypeRegistry`] each time it is needed.

use std::fmt;
use std::sync::Arc;

use typed_attrs_core::types::ValueType;
use typed_attrs_core::{CastType, Options, TypeError, TypeRegistry, Value};

/// Option keys that describe the attribute itself and are never passed to
/// type construction.
pub const RESERVED_OPTIONS: [&str; 2] = ["default", "user_provided_default"];

// ============================================================================
// Cast type reference
// ============================================================================

/// How an attribute names its cast type.
#[derive(Clone)]
pub enum CastTypeRef {
    /// Concrete instance, resolved once at declaration.
    Instance(Arc<dyn CastType>),
    /// Name looked up in the type registry on every resolution.
    Symbol(String),
}

impl CastTypeRef {
    /// The pass-through `value` type used when no cast type is given.
    pub fn identity() -> Self {
        CastTypeRef::Instance(Arc::new(ValueType::new()))
    }

    pub fn instance<T: CastType>(cast_type: T) -> Self {
        CastTypeRef::Instance(Arc::new(cast_type))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        CastTypeRef::Symbol(name.into())
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, CastTypeRef::Symbol(_))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            CastTypeRef::Symbol(name) => Some(name.as_str()),
            CastTypeRef::Instance(_) => None,
        }
    }

    /// Resolve to a concrete cast type.
    ///
    /// `type_options` must already be stripped of [`RESERVED_OPTIONS`].
    pub fn resolve(
        &self,
        types: &TypeRegistry,
        type_options: &Options,
    ) -> Result<Arc<dyn CastType>, TypeError> {
        match self {
            CastTypeRef::Instance(cast_type) => Ok(Arc::clone(cast_type)),
            CastTypeRef::Symbol(name) => types.lookup(name, type_options),
        }
    }
}

impl Default for CastTypeRef {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&str> for CastTypeRef {
    fn from(name: &str) -> Self {
        CastTypeRef::Symbol(name.to_owned())
    }
}

impl From<String> for CastTypeRef {
    fn from(name: String) -> Self {
        CastTypeRef::Symbol(name)
    }
}

impl From<Arc<dyn CastType>> for CastTypeRef {
    fn from(cast_type: Arc<dyn CastType>) -> Self {
        CastTypeRef::Instance(cast_type)
    }
}

impl fmt::Debug for CastTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastTypeRef::Instance(cast_type) => write!(f, "Instance({:?})", cast_type),
            CastTypeRef::Symbol(name) => write!(f, "Symbol({:?})", name),
        }
    }
}

impl PartialEq for CastTypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CastTypeRef::Symbol(a), CastTypeRef::Symbol(b)) => a == b,
            (CastTypeRef::Instance(a), CastTypeRef::Instance(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

/// Zero-argument default producer.
pub type Producer = Arc<dyn Fn() -> Value + Send + Sync>;

/// A declared default: a literal or a producer invoked on materialization.
#[derive(Clone)]
pub enum DefaultValue {
    Literal(Value),
    Producer(Producer),
}

impl DefaultValue {
    /// Produce the value to cache on an instance.
    pub fn materialize(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Producer(producer) => producer(),
        }
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, DefaultValue::Producer(_))
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => write!(f, "Literal({:?})", value),
            DefaultValue::Producer(_) => write!(f, "Producer(...)"),
        }
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DefaultValue::Literal(a), DefaultValue::Literal(b)) => a == b,
            (DefaultValue::Producer(a), DefaultValue::Producer(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Per-attribute options: an optional default plus a free-form bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeOptions {
    default: Option<DefaultValue>,
    extra: Options,
}

impl AttributeOptions {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Literal default, cloned into each instance on first read.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Producer default, invoked once per instance on first read.
    pub fn default_with<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Producer(Arc::new(producer)));
        self
    }

    /// Set a free-form option. `"default"` sets a literal default.
    pub fn option(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key == "default" {
            return self.default(value);
        }
        let mut this = self;
        this.extra.insert(key, value);
        this
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// The free-form bag, reserved keys included.
    pub fn extra(&self) -> &Options {
        &self.extra
    }

    /// Options forwarded to type construction.
    pub fn type_options(&self) -> Options {
        self.extra.without(&RESERVED_OPTIONS)
    }

    /// True when no default and no options were given.
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.extra.is_empty()
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// The stored `(cast type, options)` pair for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    pub cast_type: CastTypeRef,
    pub options: AttributeOptions,
}

impl AttributeDescriptor {
    pub fn new(cast_type: impl Into<CastTypeRef>, options: AttributeOptions) -> Self {
        Self {
            cast_type: cast_type.into(),
            options,
        }
    }

    /// Resolve the cast type with reserved options stripped.
    pub fn resolve(&self, types: &TypeRegistry) -> Result<Arc<dyn CastType>, TypeError> {
        self.cast_type.resolve(types, &self.options.type_options())
    }
}
