//! Exact base-10 numbers.
//!
//! A [`Decimal`] is an `i128` mantissa scaled by a power of ten. It covers what
//! the `decimal` cast type needs: parsing, conversion from floats through their
//! shortest textual form, truncation, and rounding by scale or by significant
//! digits.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

/// Largest supported number of fractional digits.
pub const MAX_SCALE: u32 = 38;

/// Error returned when a string is not a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal: {0:?}")]
pub struct ParseDecimalError(pub String);

/// Exact decimal number: `mantissa * 10^-scale`.
#[derive(Clone, Copy)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    /// Create a decimal from its raw parts.
    ///
    /// Scales above [`MAX_SCALE`] are rounded down to it.
    pub fn new(mantissa: i128, scale: u32) -> Self {
        let value = Self { mantissa, scale };
        if scale > MAX_SCALE {
            value.round_to_scale(MAX_SCALE)
        } else {
            value
        }
    }

    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Convert a float through its shortest round-tripping text form.
    ///
    /// Returns `None` for NaN, infinities and magnitudes that overflow the mantissa.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{value}").parse().ok()
    }

    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Drop the fractional part. `None` if the integer part overflows `i64`.
    pub fn trunc_to_i64(&self) -> Option<i64> {
        let whole = match pow10(self.scale) {
            Some(divisor) => self.mantissa / divisor,
            None => 0,
        };
        i64::try_from(whole).ok()
    }

    /// Strip trailing fractional zeros.
    pub fn normalize(self) -> Self {
        let mut value = self;
        while value.scale > 0 && value.mantissa % 10 == 0 {
            value.mantissa /= 10;
            value.scale -= 1;
        }
        value
    }

    /// Round half away from zero to at most `scale` fractional digits.
    pub fn round_to_scale(self, scale: u32) -> Self {
        if self.scale <= scale {
            return self;
        }
        Self {
            mantissa: round_div_pow10(self.mantissa, self.scale - scale),
            scale,
        }
    }

    /// Round half away from zero to at most `precision` significant digits.
    pub fn round_to_precision(self, precision: u32) -> Self {
        let precision = precision.max(1);
        let digits = digit_count(self.mantissa);
        if digits <= precision {
            return self;
        }

        let drop = digits - precision;
        let rounded = round_div_pow10(self.mantissa, drop);
        if drop <= self.scale {
            return Self {
                mantissa: rounded,
                scale: self.scale - drop,
            };
        }

        // Rounding reached into the integer digits
        match pow10(drop - self.scale).and_then(|p| rounded.checked_mul(p)) {
            Some(mantissa) => Self { mantissa, scale: 0 },
            None => self,
        }
    }

    pub fn checked_mul(self, other: Self) -> Option<Self> {
        let mantissa = self.mantissa.checked_mul(other.mantissa)?;
        let product = Self {
            mantissa,
            scale: self.scale + other.scale,
        }
        .normalize();
        Some(product.round_to_scale(MAX_SCALE))
    }
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

fn digit_count(mantissa: i128) -> u32 {
    mantissa.unsigned_abs().checked_ilog10().map_or(1, |d| d + 1)
}

fn round_div_pow10(mantissa: i128, exp: u32) -> i128 {
    let Some(divisor) = pow10(exp) else {
        return 0;
    };
    let quotient = mantissa / divisor;
    let remainder = mantissa % divisor;
    if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
        quotient + mantissa.signum()
    } else {
        quotient
    }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Self {
        Self {
            mantissa: v.into(),
            scale: 0,
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError(s.to_owned());
        let text = s.trim();

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => {
                let exp: i32 = unsigned[pos + 1..].parse().map_err(|_| err())?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }

        let mut mantissa: i128 = 0;
        for ch in int_part.chars().chain(frac_part.chars()) {
            let digit = ch.to_digit(10).ok_or_else(err)?;
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(digit.into()))
                .ok_or_else(err)?;
        }
        if negative {
            mantissa = -mantissa;
        }

        let scale = i64::try_from(frac_part.len()).map_err(|_| err())? - i64::from(exponent);
        if scale >= 0 {
            let scale = u32::try_from(scale).map_err(|_| err())?;
            return Ok(Self::new(mantissa, scale));
        }

        let shift = u32::try_from(-scale).map_err(|_| err())?;
        let mantissa = pow10(shift)
            .and_then(|p| mantissa.checked_mul(p))
            .ok_or_else(err)?;
        Ok(Self { mantissa, scale: 0 })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        if self.scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let scale = self.scale as usize;
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalize(), other.normalize());
        a.mantissa == b.mantissa && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalize();
        n.mantissa.hash(state);
        n.scale.hash(state);
    }
}
