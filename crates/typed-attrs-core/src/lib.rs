//! Typed attributes core crate.
//!
//! This crate holds everything the attribute layer consumes but does not own:
//!
//! - [`Value`]: the dynamic value stored in attribute slots
//! - [`Decimal`]: exact base-10 numbers for the `decimal` cast type
//! - [`Options`]: the ordered option bag passed to type construction
//! - [`CastType`] / [`FromOptions`]: the casting capability and its constructor
//! - [`types`]: the built-in cast types (`value`, `boolean`, `integer`, ...)
//! - [`TypeRegistry`]: symbolic type name lookup
//!
//! The attribute declarations themselves live in `typed-attrs-registry`.

mod cast_type;
mod decimal;
mod error;
mod options;
mod type_registry;
pub mod types;
mod value;

pub use cast_type::{CastType, FromOptions};
pub use decimal::{Decimal, ParseDecimalError};
pub use error::{CastError, TypeError};
pub use options::Options;
pub use type_registry::{TypeFactory, TypeRegistry};
pub use value::Value;
