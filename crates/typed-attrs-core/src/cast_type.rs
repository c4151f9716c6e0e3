//! The casting capability.

use std::any::Any;
use std::fmt;

use crate::{CastError, Options, TypeError, Value};

/// A type that turns raw input into an attribute's canonical value.
///
/// Implementations are shared behind `Arc<dyn CastType>` and must not keep
/// per-call state. `as_any` exists for introspection: callers check which
/// concrete type an attribute resolved to, or read its configured settings.
pub trait CastType: fmt::Debug + Send + Sync + 'static {
    /// Symbolic name this type is usually registered under.
    fn type_name(&self) -> &str;

    /// Convert `value` into this type's canonical value.
    fn cast(&self, value: Value) -> Result<Value, CastError>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn CastType {
    /// Check whether this is an instance of `T`.
    pub fn is<T: CastType>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Try to downcast to a concrete cast type.
    pub fn downcast_ref<T: CastType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Construction of a cast type from an option bag.
///
/// This is what a [`TypeRegistry`](crate::TypeRegistry) entry calls on every
/// lookup.
pub trait FromOptions: Sized {
    fn from_options(options: &Options) -> Result<Self, TypeError>;
}
