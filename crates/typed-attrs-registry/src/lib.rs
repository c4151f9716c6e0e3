//! Typed attribute declarations for definitions and their instances.
//!
//! A [`Definition`] declares named attributes, each bound to a cast type and
//! optional default. Declaring generates a reader/writer pair; writers cast
//! incoming values, readers materialize defaults lazily. Definitions can be
//! subclassed (copy-on-inherit) and can layer overrides on top of the
//! generated accessors.

mod accessors;
mod attribute_registry;
mod definition;
mod descriptor;
mod error;
mod instance;

pub use accessors::{
    AccessorTable, GeneratedAccessors, GeneratedReader, GeneratedWriter, ReaderOverride,
    WriterOverride,
};
pub use attribute_registry::AttributeRegistry;
pub use definition::Definition;
pub use descriptor::{
    AttributeDescriptor, AttributeOptions, CastTypeRef, DefaultValue, Producer, RESERVED_OPTIONS,
};
pub use error::AttributeError;
pub use instance::Instance;
