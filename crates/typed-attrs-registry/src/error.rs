use thiserror::Error;
use typed_attrs_core::{CastError, TypeError};

/// Errors surfaced by attribute declaration and assignment.
///
/// Type lookup and cast failures are forwarded unchanged from the type
/// registry and the cast types. Reads never produce an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// Symbolic type lookup or type construction failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The cast type rejected the assigned value.
    #[error(transparent)]
    Cast(#[from] CastError),

    /// Assignment to a name with no writer.
    #[error("unknown attribute '{attribute}' for {definition}")]
    UnknownAttribute {
        definition: String,
        attribute: String,
    },

    /// An accessor override was attached to a name that was never declared.
    #[error("cannot override '{attribute}' on {definition}: attribute is not declared")]
    NotDeclared {
        definition: String,
        attribute: String,
    },
}
