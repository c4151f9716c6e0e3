use crate::{CastError, Value};

use super::TypeOptions;

builtin_type!(
    /// String type.
    ///
    /// Scalars are rendered in their canonical text form (`true` -> `"t"`,
    /// `false` -> `"f"`). Lists, maps and native values are rejected.
    StringType,
    "string",
    cast_string
);

fn cast_string(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    let text = match value {
        Value::Nil => return Ok(Value::Nil),
        Value::String(s) => s,
        Value::Bool(true) => "t".to_owned(),
        Value::Bool(false) => "f".to_owned(),
        Value::Int(n) => n.to_string(),
        // Debug keeps the fraction on whole floats ("1.0")
        Value::Float(f) => format!("{f:?}"),
        Value::Decimal(d) => d.to_string(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        other @ (Value::List(_) | Value::Map(_) | Value::Native(_)) => {
            return Err(CastError::unsupported(StringType::NAME, other.kind()));
        }
    };
    Ok(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CastType;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from("Rails FTW"), "Rails FTW")]
    #[case(Value::Int(42), "42")]
    #[case(Value::Float(1.0), "1.0")]
    #[case(Value::Float(2.25), "2.25")]
    #[case(Value::Bool(true), "t")]
    #[case(Value::Date(NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()), "2016-01-01")]
    fn casts_scalars(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(StringType::new().cast(input).unwrap(), Value::from(expected));
    }

    #[test]
    fn nil_stays_nil() {
        assert_eq!(StringType::new().cast(Value::Nil).unwrap(), Value::Nil);
    }

    #[test]
    fn containers_are_rejected() {
        let err = StringType::new().cast(Value::List(vec![])).unwrap_err();
        assert_eq!(err, CastError::unsupported("string", "list"));
    }
}
