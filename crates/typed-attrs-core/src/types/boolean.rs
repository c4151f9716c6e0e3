use crate::{CastError, Value};

use super::TypeOptions;

/// Strings that cast to `false`.
const FALSE_VALUES: [&str; 7] = ["0", "f", "F", "false", "FALSE", "off", "OFF"];

builtin_type!(
    /// Boolean type.
    ///
    /// Blank strings cast to nil; `0`, `"0"`, `"f"`, `"false"`, `"off"` (and
    /// upper-case variants) cast to `false`; any other value is `true`.
    BooleanType,
    "boolean",
    cast_boolean
);

fn cast_boolean(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    if value.is_blank() {
        return Ok(Value::Nil);
    }
    let result = match value {
        Value::Bool(v) => v,
        Value::String(s) => !FALSE_VALUES.contains(&s.as_str()),
        Value::Int(n) => n != 0,
        Value::Float(f) => f != 0.0,
        _ => true,
    };
    Ok(Value::Bool(result))
}
