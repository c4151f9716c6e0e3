//! Typed attributes: declare named, cast-typed attributes with defaults,
//! inheritance and overridable accessors.
//!
//! ```
//! use std::sync::Arc;
//! use typed_attrs::prelude::*;
//!
//! let mut order = Definition::new("Order");
//! order
//!     .attribute("quantity", "integer")?
//!     .attribute_with("paid", "boolean", AttributeOptions::new().default(false))?;
//! let order = Arc::new(order);
//!
//! let mut instance = Instance::build(&order, [("quantity", "3")])?;
//! assert_eq!(instance.read("quantity"), Value::Int(3));
//! assert_eq!(instance.read("paid"), Value::Bool(false));
//! # Ok::<(), AttributeError>(())
//! ```
//!
//! The crate is split in two:
//!
//! - `typed-attrs-core`: values, cast types and the type registry
//! - `typed-attrs-registry`: definitions, instances and generated accessors

pub use typed_attrs_core::types;
pub use typed_attrs_core::{
    CastError, CastType, Decimal, FromOptions, Options, ParseDecimalError, TypeError, TypeFactory,
    TypeRegistry, Value,
};
pub use typed_attrs_registry::{
    AccessorTable, AttributeDescriptor, AttributeError, AttributeOptions, AttributeRegistry,
    CastTypeRef, DefaultValue, Definition, GeneratedAccessors, GeneratedReader, GeneratedWriter,
    Instance, Producer, RESERVED_OPTIONS, ReaderOverride, WriterOverride,
};

// Re-export main types
pub mod prelude {
    pub use typed_attrs_core::{
        CastError, CastType, Decimal, FromOptions, Options, ParseDecimalError, TypeError,
        TypeRegistry, Value,
    };
    pub use typed_attrs_registry::{
        AttributeDescriptor, AttributeError, AttributeOptions, CastTypeRef, Definition,
        GeneratedReader, GeneratedWriter, Instance,
    };
}
