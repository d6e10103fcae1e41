//! # Unit Types and Conversions
//!
//! Newtype wrappers for the lengths, masses and temperatures the converter
//! pages deal with, plus step-narrated conversion functions.
//!
//! The wrappers keep call sites honest about which unit a bare f64 is in
//! (the health formulas take `Kilograms` and `Centimeters`, and imperial
//! inputs reach them through `From`). JSON serialization stays a plain number.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::units::{convert_length, Feet, LengthUnit, Meters};
//!
//! let m: Meters = Feet(10.0).into();
//! assert!((m.0 - 3.048).abs() < 1e-12);
//!
//! let result = convert_length(1.0, LengthUnit::Miles, LengthUnit::Kilometers).unwrap();
//! assert_eq!(result.result, 1.609344);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::steps::StepTrace;
use crate::validate::{format_number as num, require_finite, round_to};

/// Decimal places kept in conversion results.
pub const CONVERSION_DECIMALS: u32 = 6;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * 0.3048)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * 2.54)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds (avoirdupois)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * 0.453_592_37)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Absolute temperature in kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Self {
        Fahrenheit(c.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Self {
        Kelvin(c.0 + 273.15)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - 273.15)
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Meters, Centimeters, Feet, Inches, Kilograms, Pounds);

// ============================================================================
// Conversions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Inches,
    Feet,
    Yards,
    Miles,
}

impl LengthUnit {
    /// Meters per one of this unit
    fn meters(self) -> f64 {
        match self {
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
            LengthUnit::Inches => 0.0254,
            LengthUnit::Feet => 0.3048,
            LengthUnit::Yards => 0.9144,
            LengthUnit::Miles => 1609.344,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Centimeters => "cm",
            LengthUnit::Meters => "m",
            LengthUnit::Kilometers => "km",
            LengthUnit::Inches => "in",
            LengthUnit::Feet => "ft",
            LengthUnit::Yards => "yd",
            LengthUnit::Miles => "mi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    Grams,
    Kilograms,
    Ounces,
    Pounds,
}

impl MassUnit {
    /// Kilograms per one of this unit
    fn kilograms(self) -> f64 {
        match self {
            MassUnit::Grams => 0.001,
            MassUnit::Kilograms => 1.0,
            MassUnit::Ounces => 0.028_349_523_125,
            MassUnit::Pounds => 0.453_592_37,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Grams => "g",
            MassUnit::Kilograms => "kg",
            MassUnit::Ounces => "oz",
            MassUnit::Pounds => "lb",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

fn linear_conversion(
    value: f64,
    from_factor: f64,
    to_factor: f64,
    from_symbol: &str,
    to_symbol: &str,
    base_symbol: &str,
) -> ConversionResult {
    let base = value * from_factor;
    let result = round_to(base / to_factor, CONVERSION_DECIMALS);
    let steps = StepTrace::new()
        .step(format!(
            "{} {} × {} = {} {}",
            num(value),
            from_symbol,
            num(from_factor),
            num(base),
            base_symbol
        ))
        .step(format!(
            "{} {} ÷ {} = {} {}",
            num(base),
            base_symbol,
            num(to_factor),
            num(result),
            to_symbol
        ));

    ConversionResult {
        value,
        from: from_symbol.to_string(),
        to: to_symbol.to_string(),
        result,
        formula: format!("{} = {} × {} ÷ {}", to_symbol, from_symbol, num(from_factor), num(to_factor)),
        steps: steps.into_steps(),
    }
}

/// Convert a length through meters.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> CalcResult<ConversionResult> {
    require_finite("value", value)?;
    Ok(linear_conversion(value, from.meters(), to.meters(), from.symbol(), to.symbol(), "m"))
}

/// Convert a mass through kilograms.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> CalcResult<ConversionResult> {
    require_finite("value", value)?;
    Ok(linear_conversion(value, from.kilograms(), to.kilograms(), from.symbol(), to.symbol(), "kg"))
}

/// Convert a temperature through Celsius; rejects values below absolute zero.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> CalcResult<ConversionResult> {
    require_finite("value", value)?;

    let celsius = match from {
        TemperatureUnit::Celsius => Celsius(value),
        TemperatureUnit::Fahrenheit => Fahrenheit(value).into(),
        TemperatureUnit::Kelvin => Kelvin(value).into(),
    };
    if celsius.0 < -273.15 {
        return Err(CalcError::invalid_input(
            "value",
            format!("{}{}", num(value), from.symbol()),
            "Temperature is below absolute zero",
        ));
    }

    let converted = match to {
        TemperatureUnit::Celsius => celsius.0,
        TemperatureUnit::Fahrenheit => Fahrenheit::from(celsius).0,
        TemperatureUnit::Kelvin => Kelvin::from(celsius).0,
    };
    let result = round_to(converted, CONVERSION_DECIMALS);

    let to_celsius = match from {
        TemperatureUnit::Celsius => "°C = °C",
        TemperatureUnit::Fahrenheit => "°C = (°F - 32) × 5/9",
        TemperatureUnit::Kelvin => "°C = K - 273.15",
    };
    let from_celsius = match to {
        TemperatureUnit::Celsius => "°C = °C",
        TemperatureUnit::Fahrenheit => "°F = °C × 9/5 + 32",
        TemperatureUnit::Kelvin => "K = °C + 273.15",
    };
    let steps = StepTrace::new()
        .step(format!("{}: {}{} = {}°C", to_celsius, num(value), from.symbol(), num(celsius.0)))
        .step(format!("{}: {}{}", from_celsius, num(result), to.symbol()));

    Ok(ConversionResult {
        value,
        from: from.symbol().to_string(),
        to: to.symbol().to_string(),
        result,
        formula: format!("{}; {}", to_celsius, from_celsius),
        steps: steps.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_feet_to_meters() {
        let m: Meters = Feet(10.0).into();
        assert_relative_eq!(m.value(), 3.048, epsilon = 1e-12);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        let kg: Kilograms = Pounds(100.0).into();
        assert_relative_eq!(kg.0, 45.359237, epsilon = 1e-12);
    }

    #[test]
    fn test_imperial_inputs_reach_metric() {
        let cm: Centimeters = Inches(70.0).into();
        assert_relative_eq!(cm.value(), 177.8, epsilon = 1e-9);
        let m: Meters = cm.into();
        assert_relative_eq!(m.value(), 1.778, epsilon = 1e-12);
    }

    #[test]
    fn test_serialization() {
        let kg = Kilograms(72.5);
        let json = serde_json::to_string(&kg).unwrap();
        assert_eq!(json, "72.5");
        let roundtrip: Kilograms = serde_json::from_str(&json).unwrap();
        assert_eq!(kg, roundtrip);
    }

    #[test]
    fn test_convert_length() {
        let result = convert_length(12.0, LengthUnit::Inches, LengthUnit::Feet).unwrap();
        assert_eq!(result.result, 1.0);
        assert_eq!(result.steps.len(), 2);
        assert!(convert_length(f64::INFINITY, LengthUnit::Meters, LengthUnit::Feet).is_err());
    }

    #[test]
    fn test_convert_mass() {
        let result = convert_mass(16.0, MassUnit::Ounces, MassUnit::Pounds).unwrap();
        assert_eq!(result.result, 1.0);
    }

    #[test]
    fn test_convert_temperature() {
        assert_eq!(
            convert_temperature(100.0, TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit)
                .unwrap()
                .result,
            212.0
        );
        assert_eq!(
            convert_temperature(32.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin)
                .unwrap()
                .result,
            273.15
        );
        let err = convert_temperature(-1.0, TemperatureUnit::Kelvin, TemperatureUnit::Celsius).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
