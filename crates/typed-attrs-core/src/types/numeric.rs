//! Integer, float and decimal types.
//!
//! Strings are read leniently: the leading numeric prefix is used and text
//! without one casts to zero. Blank strings cast to nil. Kinds with no numeric
//! reading (dates, lists, maps, native values) cast to nil.

use crate::{CastError, Decimal, Value};

use super::{TypeOptions, numeric_prefix};

builtin_type!(
    /// Integer type. Fractions are truncated toward zero.
    IntegerType,
    "integer",
    cast_integer
);

builtin_type!(
    /// Double precision float type.
    FloatType,
    "float",
    cast_float
);

builtin_type!(
    /// Exact decimal type.
    ///
    /// `precision` rounds to significant digits, then `scale` rounds to
    /// fractional digits, both half away from zero.
    DecimalType,
    "decimal",
    cast_decimal
);

/// `i64::MIN as f64 ..= i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
const I64_FLOAT_RANGE: std::ops::Range<f64> = -9.223372036854775808e18..9.223372036854775808e18;

fn cast_integer(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    if value.is_blank() {
        return Ok(Value::Nil);
    }
    let result = match value {
        Value::Int(n) => n,
        Value::Bool(v) => i64::from(v),
        Value::Float(f) if !f.is_finite() => {
            return Err(CastError::invalid(IntegerType::NAME, f.to_string(), "not a finite number"));
        }
        Value::Float(f) if I64_FLOAT_RANGE.contains(&f.trunc()) => f.trunc() as i64,
        Value::Float(f) => {
            return Err(CastError::invalid(
                IntegerType::NAME,
                f.to_string(),
                "out of range for a 64-bit integer",
            ));
        }
        Value::Decimal(d) => d.trunc_to_i64().ok_or_else(|| {
            CastError::invalid(IntegerType::NAME, d.to_string(), "out of range for a 64-bit integer")
        })?,
        Value::String(s) => {
            let prefix = numeric_prefix(&s, false);
            if prefix.is_empty() {
                0
            } else {
                prefix.parse().map_err(|_| {
                    CastError::invalid(IntegerType::NAME, s.as_str(), "out of range for a 64-bit integer")
                })?
            }
        }
        _ => return Ok(Value::Nil),
    };
    Ok(Value::Int(result))
}

fn cast_float(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    if value.is_blank() {
        return Ok(Value::Nil);
    }
    let result = match value {
        Value::Float(f) => f,
        Value::Int(n) => n as f64,
        Value::Bool(v) => f64::from(u8::from(v)),
        Value::Decimal(d) => d.to_f64(),
        Value::String(s) => match s.trim() {
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            "NaN" => f64::NAN,
            text => numeric_prefix(text, true).parse().unwrap_or(0.0),
        },
        _ => return Ok(Value::Nil),
    };
    Ok(Value::Float(result))
}

fn cast_decimal(options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    if value.is_blank() {
        return Ok(Value::Nil);
    }
    let decimal = match value {
        Value::Decimal(d) => d,
        Value::Int(n) => Decimal::from(n),
        Value::Bool(v) => Decimal::from(i64::from(v)),
        Value::Float(f) => Decimal::from_f64(f).ok_or_else(|| {
            CastError::invalid(DecimalType::NAME, f.to_string(), "not representable as a decimal")
        })?,
        Value::String(s) => match numeric_prefix(&s, true) {
            "" => Decimal::ZERO,
            prefix => prefix.parse().map_err(|_| {
                CastError::invalid(DecimalType::NAME, s.as_str(), "out of range for a decimal")
            })?,
        },
        _ => return Ok(Value::Nil),
    };

    let decimal = match options.precision {
        Some(precision) => decimal.round_to_precision(precision),
        None => decimal,
    };
    let decimal = match options.scale {
        Some(scale) => decimal.round_to_scale(scale),
        None => decimal,
    };
    Ok(Value::Decimal(decimal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastType, FromOptions, Options};
    use chrono::NaiveDate;
    use rstest::rstest;

    fn dec(s: &str) -> Value {
        Value::Decimal(s.parse().unwrap())
    }

    #[rstest]
    #[case(Value::from("2.3"), Value::Int(2))]
    #[case(Value::from("4.4"), Value::Int(4))]
    #[case(Value::from("-7 apples"), Value::Int(-7))]
    #[case(Value::from("abc"), Value::Int(0))]
    #[case(Value::from(""), Value::Nil)]
    #[case(Value::Float(9.99), Value::Int(9))]
    #[case(Value::Bool(true), Value::Int(1))]
    #[case(dec("10012.00"), Value::Int(10012))]
    #[case(Value::Date(NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()), Value::Nil)]
    fn integer_casts(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(IntegerType::new().cast(input).unwrap(), expected);
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let err = IntegerType::new()
            .cast(Value::from("99999999999999999999"))
            .unwrap_err();
        assert!(matches!(err, CastError::Invalid { .. }));

        let err = IntegerType::new().cast(Value::Float(1e30)).unwrap_err();
        assert_eq!(
            err,
            CastError::invalid("integer", 1e30_f64.to_string(), "out of range for a 64-bit integer")
        );
        assert!(IntegerType::new().cast(Value::Float(-9.3e18)).is_err());
    }

    #[test]
    fn integer_accepts_floats_at_the_range_edge() {
        assert_eq!(
            IntegerType::new().cast(Value::Float(-9.223372036854775808e18)).unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(IntegerType::new().cast(Value::Float(-0.5)).unwrap(), Value::Int(0));
    }

    #[rstest]
    #[case(Value::from("2.5kg"), Value::Float(2.5))]
    #[case(Value::from("1e3"), Value::Float(1000.0))]
    #[case(Value::from("nope"), Value::Float(0.0))]
    #[case(Value::Int(3), Value::Float(3.0))]
    #[case(Value::from(" "), Value::Nil)]
    fn float_casts(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(FloatType::new().cast(input).unwrap(), expected);
    }

    #[test]
    fn float_special_strings() {
        let ty = FloatType::new();
        assert_eq!(ty.cast(Value::from("Infinity")).unwrap(), Value::Float(f64::INFINITY));
        assert!(ty.cast(Value::from("NaN")).unwrap().as_float().unwrap().is_nan());
    }

    #[rstest]
    #[case(Value::from("12.3"), dec("12.3"))]
    #[case(Value::from("12.3abc"), dec("12.3"))]
    #[case(Value::from("abc"), dec("0"))]
    #[case(Value::Float(0.1), dec("0.1"))]
    #[case(Value::Int(5), dec("5"))]
    #[case(Value::Nil, Value::Nil)]
    fn decimal_casts(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(DecimalType::new().cast(input).unwrap(), expected);
    }

    #[rstest]
    #[case("123456789012345678901234567890123456789012345")]
    #[case("1e400")]
    #[case("1e400 units")]
    fn decimal_overflowing_text_is_an_error(#[case] input: &str) {
        let err = DecimalType::new().cast(Value::from(input)).unwrap_err();
        assert_eq!(err, CastError::invalid("decimal", input, "out of range for a decimal"));
    }

    #[test]
    fn decimal_applies_precision_then_scale() {
        let options = Options::new().with("precision", 5).with("scale", 1);
        let ty = DecimalType::from_options(&options).unwrap();

        assert_eq!(ty.cast(Value::from("123.456")).unwrap(), dec("123.5"));
        assert_eq!(ty.cast(Value::from("1.26")).unwrap(), dec("1.3"));
    }
}
