//! # Input Validation
//!
//! Guards shared by every solver: parsing raw form strings into numbers and
//! rejecting values outside a solver's domain. Each guard returns a
//! [`CalcError`] naming the offending field so the caller can show it as-is.
//!
//! ```rust
//! use solver_core::validate::{parse_number, require_positive};
//!
//! let side = parse_number("side", " 4.5 ").unwrap();
//! assert_eq!(side, 4.5);
//! assert!(require_positive("side", -1.0).is_err());
//! assert!(parse_number("side", "four").is_err());
//! ```

use crate::errors::{CalcError, CalcResult};

/// Parse a raw string into a finite f64.
pub fn parse_number(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::parse_error(field, raw, "a number"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::parse_error(field, raw, "a number"))?;
    require_finite(field, value)
}

/// Parse a raw string into a non-negative integer count.
pub fn parse_count(field: &str, raw: &str) -> CalcResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CalcError::parse_error(field, raw, "a non-negative integer"))
}

/// Reject NaN and infinities.
pub fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    Ok(value)
}

/// Require a finite value strictly greater than zero.
pub fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            format_number(value),
            "Value must be greater than zero",
        ));
    }
    Ok(value)
}

/// Require a finite value that is zero or greater.
pub fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            format_number(value),
            "Value cannot be negative",
        ));
    }
    Ok(value)
}

/// Require a finite, non-zero value (leading coefficients, divisors).
pub fn require_non_zero(field: &str, value: f64) -> CalcResult<f64> {
    require_finite(field, value)?;
    if value == 0.0 {
        return Err(CalcError::invalid_input(
            field,
            "0",
            "Value cannot be zero",
        ));
    }
    Ok(value)
}

/// Reject a computed value that overflowed to an infinity or NaN.
pub fn require_representable(operation: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::overflow(operation, "results representable in double precision"));
    }
    Ok(value)
}

/// Round half away from zero to `places` decimals.
///
/// Values too large to scale are returned unchanged; `-0.0` becomes `0.0`.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest readable form of a number for step narration.
///
/// Noise below 1e-6 is rounded away and very large magnitudes switch to
/// scientific notation.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.abs() >= 1e15 {
        return format!("{:e}", value);
    }
    format!("{}", round_to(value, 6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("a", "3").unwrap(), 3.0);
        assert_eq!(parse_number("a", "-2.5").unwrap(), -2.5);
        assert_eq!(parse_number("a", "  1e3 ").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        let err = parse_number("a", "12abc").unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert!(parse_number("a", "").is_err());
        assert!(parse_number("a", "NaN").is_err());
        assert!(parse_number("a", "inf").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("n", "7").unwrap(), 7);
        assert!(parse_count("n", "-1").is_err());
        assert!(parse_count("n", "2.5").is_err());
    }

    #[test]
    fn test_guards() {
        assert!(require_positive("r", 0.0).is_err());
        assert!(require_positive("r", 0.1).is_ok());
        assert!(require_non_negative("r", 0.0).is_ok());
        assert!(require_non_negative("r", -0.1).is_err());
        assert!(require_non_zero("a", 0.0).is_err());
        assert!(require_finite("a", f64::NAN).is_err());
        assert_eq!(require_representable("area", 1e300).unwrap(), 1e300);
        assert_eq!(require_representable("area", 1e300 * 1e300).unwrap_err().error_code(), "OVERFLOW");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(78.539816, 2), 78.54);
        assert_eq!(round_to(31.415926, 2), 31.42);
        assert_eq!(round_to(-0.0001, 2), 0.0);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(1e306, 10), 1e306);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(1e20), "1e20");
    }
}
