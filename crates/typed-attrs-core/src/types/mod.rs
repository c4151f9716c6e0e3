//! Built-in cast types.
//!
//! | name       | type             | canonical value          |
//! |------------|------------------|--------------------------|
//! | `value`    | [`ValueType`]    | input, unchanged         |
//! | `boolean`  | [`BooleanType`]  | `Bool`                   |
//! | `integer`  | [`IntegerType`]  | `Int`                    |
//! | `float`    | [`FloatType`]    | `Float`                  |
//! | `decimal`  | [`DecimalType`]  | `Decimal`                |
//! | `string`   | [`StringType`]   | `String`                 |
//! | `date`     | [`DateType`]     | `Date`                   |
//! | `datetime` | [`DateTimeType`] | `DateTime`               |
//!
//! Every type casts `Nil` to `Nil`. All of them accept the construction options
//! `precision`, `limit` and `scale`; any other option is rejected.

/// Declares a built-in cast type: the struct, its constructors and the
/// `CastType` impl delegating to a cast function.
macro_rules! builtin_type {
    ($(#[$meta:meta])* $ty:ident, $name:literal, $cast:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $ty {
            options: $crate::types::TypeOptions,
        }

        impl $ty {
            pub const NAME: &'static str = $name;

            pub fn new() -> Self {
                Self::default()
            }

            pub fn with_options(options: $crate::types::TypeOptions) -> Self {
                Self { options }
            }

            pub fn options(&self) -> &$crate::types::TypeOptions {
                &self.options
            }
        }

        impl $crate::FromOptions for $ty {
            fn from_options(options: &$crate::Options) -> Result<Self, $crate::TypeError> {
                $crate::types::TypeOptions::parse($name, options).map(Self::with_options)
            }
        }

        impl $crate::CastType for $ty {
            fn type_name(&self) -> &str {
                $name
            }

            fn cast(&self, value: $crate::Value) -> Result<$crate::Value, $crate::CastError> {
                $cast(&self.options, value)
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };
}

mod boolean;
mod numeric;
mod string;
mod temporal;

use crate::{CastError, Options, TypeError, Value};

pub use boolean::BooleanType;
pub use numeric::{DecimalType, FloatType, IntegerType};
pub use string::StringType;
pub use temporal::{DateTimeType, DateType};

/// Construction options shared by the built-in types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeOptions {
    /// Significant digits (used by `decimal`).
    pub precision: Option<u32>,
    /// Storage limit, kept for introspection.
    pub limit: Option<u32>,
    /// Fractional digits (used by `decimal`).
    pub scale: Option<u32>,
}

impl TypeOptions {
    /// Parse the shared options, rejecting anything else.
    pub fn parse(type_name: &str, options: &Options) -> Result<Self, TypeError> {
        let mut parsed = Self::default();
        for (key, value) in options {
            let slot = match key.as_str() {
                "precision" => &mut parsed.precision,
                "limit" => &mut parsed.limit,
                "scale" => &mut parsed.scale,
                _ => {
                    return Err(TypeError::UnknownOption {
                        type_name: type_name.to_owned(),
                        option: key.clone(),
                    });
                }
            };
            *slot = match value {
                Value::Nil => None,
                Value::Int(n) => Some(u32::try_from(*n).map_err(|_| TypeError::InvalidOption {
                    type_name: type_name.to_owned(),
                    option: key.clone(),
                    reason: format!("{n} is out of range"),
                })?),
                other => {
                    return Err(TypeError::InvalidOption {
                        type_name: type_name.to_owned(),
                        option: key.clone(),
                        reason: format!("expected an integer, got {}", other.kind()),
                    });
                }
            };
        }
        Ok(parsed)
    }
}

builtin_type!(
    /// Pass-through type: accepts anything and returns it unchanged.
    ValueType,
    "value",
    cast_value
);

fn cast_value(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    Ok(value)
}

/// Leading numeric prefix of `s`, after whitespace.
///
/// With `fractional` the prefix may carry a fraction and an exponent
/// (`"2.5e3kg"` -> `"2.5e3"`), otherwise only sign and digits (`"2.3"` -> `"2"`).
/// Empty when no digit is found.
pub(crate) fn numeric_prefix(s: &str, fractional: bool) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let mut has_digits = end > int_start;

    if fractional {
        if bytes.get(end) == Some(&b'.') {
            let frac_end = digits_from(end + 1);
            if frac_end > end + 1 {
                end = frac_end;
                has_digits = true;
            }
        }
        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            let exp_end = digits_from(exp);
            if exp_end > exp {
                end = exp_end;
            }
        }
    }

    if has_digits { &s[..end] } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastType, FromOptions};
    use rstest::rstest;

    #[rstest]
    #[case("2.3", false, "2")]
    #[case("  -42abc", false, "-42")]
    #[case("abc", false, "")]
    #[case("2.5e3kg", true, "2.5e3")]
    #[case("12.", true, "12")]
    #[case(".5", true, ".5")]
    #[case("1e", true, "1")]
    #[case("-", true, "")]
    fn numeric_prefixes(#[case] input: &str, #[case] fractional: bool, #[case] expected: &str) {
        assert_eq!(numeric_prefix(input, fractional), expected);
    }

    #[test]
    fn value_type_passes_through() {
        let ty = ValueType::new();
        let map = Value::map([("foo", "bar")]);
        assert_eq!(ty.cast(map.clone()).unwrap(), map);
        assert_eq!(ty.type_name(), "value");
    }

    #[test]
    fn shared_options_are_parsed() {
        let options = Options::new().with("precision", 10).with("scale", 2);
        let parsed = TypeOptions::parse("decimal", &options).unwrap();
        assert_eq!(parsed.precision, Some(10));
        assert_eq!(parsed.scale, Some(2));
        assert_eq!(parsed.limit, None);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let options = Options::new().with("default", "x");
        let err = ValueType::from_options(&options).unwrap_err();
        assert_eq!(
            err,
            TypeError::UnknownOption {
                type_name: "value".into(),
                option: "default".into(),
            }
        );
    }

    #[test]
    fn invalid_option_value_is_rejected() {
        let options = Options::new().with("limit", "big");
        assert!(matches!(
            IntegerType::from_options(&options),
            Err(TypeError::InvalidOption { .. })
        ));

        let options = Options::new().with("limit", -1);
        assert!(matches!(
            IntegerType::from_options(&options),
            Err(TypeError::InvalidOption { .. })
        ));
    }
}
