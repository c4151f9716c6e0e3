//! Error types for casting and type lookup.
//!
//! ```text
//! TypeError  - symbolic type lookup / type construction
//! CastError  - a cast type refused its input
//! ```
//!
//! The attribute layer forwards both unchanged.

use thiserror::Error;

/// Errors raised by a cast type while converting a raw value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    /// The input has the right kind but malformed content.
    #[error("cannot cast {input:?} to {type_name}: {reason}")]
    Invalid {
        type_name: String,
        input: String,
        reason: String,
    },

    /// The cast type does not accept values of this kind.
    #[error("{type_name} cannot cast a {kind} value")]
    Unsupported {
        type_name: String,
        kind: &'static str,
    },

    /// Free-form failure from a custom cast type.
    #[error("{0}")]
    Custom(String),
}

impl CastError {
    pub fn invalid(
        type_name: impl Into<String>,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CastError::Invalid {
            type_name: type_name.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(type_name: impl Into<String>, kind: &'static str) -> Self {
        CastError::Unsupported {
            type_name: type_name.into(),
            kind,
        }
    }
}

/// Errors raised while looking up or constructing a cast type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    /// No type is registered under this symbolic name.
    #[error("type not registered: {0}")]
    UnknownType(String),

    /// The type does not take this construction option.
    #[error("unknown option '{option}' for type {type_name}")]
    UnknownOption { type_name: String, option: String },

    /// The option is known but its value is unusable.
    #[error("invalid option '{option}' for type {type_name}: {reason}")]
    InvalidOption {
        type_name: String,
        option: String,
        reason: String,
    },
}
