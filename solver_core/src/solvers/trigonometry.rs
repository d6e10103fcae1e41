//! # Trigonometry Solver
//!
//! The six direct functions, the three principal inverses, degree/radian
//! conversion, right-triangle (Pythagorean) helpers and a table of special
//! angles.
//!
//! The angle unit is a per-call parameter: an input angle is converted to
//! radians once on entry, and an inverse function's output is converted back
//! once on exit. Direct results are rounded to [`RESULT_DECIMALS`] so that
//! exact angles read exactly (`sin 180° = 0`, not `1.2e-16`).
//!
//! ```rust
//! use solver_core::solvers::trigonometry::{calculate, AngleUnit, TrigFunction};
//!
//! let result = calculate(TrigFunction::Sin, 30.0, AngleUnit::Degrees).unwrap();
//! assert_eq!(result.result, 0.5);
//!
//! // cot(0) is undefined
//! assert!(calculate(TrigFunction::Cot, 0.0, AngleUnit::Degrees).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::steps::StepTrace;
use crate::validate::{format_number as num, require_finite, require_positive, round_to};

/// |sin|, |cos| or |tan| below this is treated as zero (singular point).
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Decimal places kept in trig results.
pub const RESULT_DECIMALS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }

    pub fn convert_from_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => radians.to_degrees(),
            AngleUnit::Radians => radians,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "°",
            AngleUnit::Radians => " rad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
}

impl TrigFunction {
    pub fn name(self) -> &'static str {
        match self {
            TrigFunction::Sin => "sin",
            TrigFunction::Cos => "cos",
            TrigFunction::Tan => "tan",
            TrigFunction::Cot => "cot",
            TrigFunction::Sec => "sec",
            TrigFunction::Csc => "csc",
        }
    }

    fn formula(self) -> &'static str {
        match self {
            TrigFunction::Sin => "sin(θ)",
            TrigFunction::Cos => "cos(θ)",
            TrigFunction::Tan => "tan(θ) = sin(θ) / cos(θ)",
            TrigFunction::Cot => "cot(θ) = 1 / tan(θ)",
            TrigFunction::Sec => "sec(θ) = 1 / cos(θ)",
            TrigFunction::Csc => "csc(θ) = 1 / sin(θ)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InverseTrigFunction {
    Asin,
    Acos,
    Atan,
}

impl InverseTrigFunction {
    pub fn name(self) -> &'static str {
        match self {
            InverseTrigFunction::Asin => "arcsin",
            InverseTrigFunction::Acos => "arccos",
            InverseTrigFunction::Atan => "arctan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrigResult {
    pub result: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Which side of a right triangle was solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RightTriangleSide {
    Hypotenuse,
    Cathetus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PythagoreanResult {
    pub leg_a: f64,
    pub leg_b: f64,
    pub hypotenuse: f64,
    pub solved_for: RightTriangleSide,
    pub formula: String,
    pub steps: Vec<String>,
}

/// One row of the special-angle table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAngle {
    pub degrees: f64,
    pub radians: f64,
    pub radians_exact: &'static str,
    pub sin_exact: &'static str,
    pub cos_exact: &'static str,
    pub tan_exact: &'static str,
    pub sin: f64,
    pub cos: f64,
    /// `None` where tan is undefined (90°, 270°)
    pub tan: Option<f64>,
}

fn is_zero(value: f64) -> bool {
    value.abs() < ZERO_TOLERANCE
}

fn clean(value: f64) -> f64 {
    round_to(value, RESULT_DECIMALS)
}

fn undefined_at(func: TrigFunction, angle: f64, unit: AngleUnit, zero_of: &str) -> CalcError {
    CalcError::undefined(
        format!("{}({}{})", func.name(), num(angle), unit.symbol()),
        format!("{} is zero at this angle", zero_of),
    )
}

// =============================================================================
// DIRECT FUNCTIONS
// =============================================================================

/// Evaluate a direct trig function at `angle` given in `unit`.
///
/// `tan`, `cot`, `sec` and `csc` fail with [`CalcError::Undefined`] where
/// their denominator is within [`ZERO_TOLERANCE`] of zero.
pub fn calculate(func: TrigFunction, angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    require_finite("angle", angle)?;
    log::debug!("trig {}({}{})", func.name(), angle, unit.symbol());

    let radians = unit.to_radians(angle);
    let (sin, cos) = radians.sin_cos();

    let value = match func {
        TrigFunction::Sin => sin,
        TrigFunction::Cos => cos,
        TrigFunction::Tan => {
            if is_zero(cos) {
                return Err(undefined_at(func, angle, unit, "cos"));
            }
            sin / cos
        }
        TrigFunction::Cot => {
            if is_zero(sin) {
                return Err(undefined_at(func, angle, unit, "tan"));
            }
            cos / sin
        }
        TrigFunction::Sec => {
            if is_zero(cos) {
                return Err(undefined_at(func, angle, unit, "cos"));
            }
            1.0 / cos
        }
        TrigFunction::Csc => {
            if is_zero(sin) {
                return Err(undefined_at(func, angle, unit, "sin"));
            }
            1.0 / sin
        }
    };

    let result = clean(value);
    Ok(TrigResult {
        result,
        formula: func.formula().to_string(),
        steps: direct_steps(func, angle, unit, radians, result).into_steps(),
    })
}

fn direct_steps(func: TrigFunction, angle: f64, unit: AngleUnit, radians: f64, result: f64) -> StepTrace {
    let mut trace = StepTrace::new().step(format!("Formula: {}", func.formula()));
    if unit == AngleUnit::Degrees {
        trace.push(format!(
            "Convert to radians: θ = {}° × π / 180 = {} rad",
            num(angle),
            num(radians)
        ));
    } else {
        trace.push(format!("θ = {} rad", num(angle)));
    }
    trace.push(format!("{}({}{}) = {}", func.name(), num(angle), unit.symbol(), num(result)));
    trace
}

pub fn sin(angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate(TrigFunction::Sin, angle, unit)
}

pub fn cos(angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate(TrigFunction::Cos, angle, unit)
}

pub fn tan(angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate(TrigFunction::Tan, angle, unit)
}

pub fn cot(angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate(TrigFunction::Cot, angle, unit)
}

pub fn sec(angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate(TrigFunction::Sec, angle, unit)
}

pub fn csc(angle: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate(TrigFunction::Csc, angle, unit)
}

// =============================================================================
// INVERSE FUNCTIONS
// =============================================================================

/// Principal value of an inverse trig function, returned in `unit`.
///
/// `asin` and `acos` require `value` in [-1, 1].
pub fn calculate_inverse(func: InverseTrigFunction, value: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    require_finite("value", value)?;
    log::debug!("trig {}({}) -> {:?}", func.name(), value, unit);

    let radians = match func {
        InverseTrigFunction::Asin | InverseTrigFunction::Acos => {
            if !(-1.0..=1.0).contains(&value) {
                return Err(CalcError::invalid_input(
                    "value",
                    num(value),
                    format!("{} is only defined for values between -1 and 1", func.name()),
                ));
            }
            if func == InverseTrigFunction::Asin {
                value.asin()
            } else {
                value.acos()
            }
        }
        InverseTrigFunction::Atan => value.atan(),
    };

    let result = clean(unit.convert_from_radians(radians));
    let mut trace = StepTrace::new()
        .step(format!("Formula: θ = {}(x)", func.name()))
        .step(format!("θ = {}({}) = {} rad", func.name(), num(value), num(radians)));
    if unit == AngleUnit::Degrees {
        trace.push(format!(
            "Convert to degrees: θ = {} × 180 / π = {}°",
            num(radians),
            num(result)
        ));
    }

    Ok(TrigResult {
        result,
        formula: format!("θ = {}(x)", func.name()),
        steps: trace.into_steps(),
    })
}

pub fn asin(value: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate_inverse(InverseTrigFunction::Asin, value, unit)
}

pub fn acos(value: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate_inverse(InverseTrigFunction::Acos, value, unit)
}

pub fn atan(value: f64, unit: AngleUnit) -> CalcResult<TrigResult> {
    calculate_inverse(InverseTrigFunction::Atan, value, unit)
}

/// Convert an angle given in `from` to the other unit.
pub fn convert_angle(value: f64, from: AngleUnit) -> CalcResult<TrigResult> {
    require_finite("angle", value)?;
    let (result, step) = match from {
        AngleUnit::Degrees => {
            let r = value.to_radians();
            (r, format!("{}° × π / 180 = {} rad", num(value), num(r)))
        }
        AngleUnit::Radians => {
            let d = value.to_degrees();
            (d, format!("{} rad × 180 / π = {}°", num(value), num(d)))
        }
    };
    let formula = match from {
        AngleUnit::Degrees => "rad = deg × π / 180",
        AngleUnit::Radians => "deg = rad × 180 / π",
    };
    Ok(TrigResult {
        result: clean(result),
        formula: formula.to_string(),
        steps: StepTrace::new().step(format!("Formula: {}", formula)).step(step).into_steps(),
    })
}

// =============================================================================
// PYTHAGOREAN HELPERS
// =============================================================================

/// Hypotenuse from both legs: `c = √(a² + b²)`.
pub fn hypotenuse(leg_a: f64, leg_b: f64) -> CalcResult<PythagoreanResult> {
    require_positive("leg_a", leg_a)?;
    require_positive("leg_b", leg_b)?;

    let c = leg_a.hypot(leg_b);
    let steps = StepTrace::new()
        .step("Formula: c² = a² + b²")
        .step(format!(
            "c = √({}² + {}²) = √{}",
            num(leg_a),
            num(leg_b),
            num(leg_a * leg_a + leg_b * leg_b)
        ))
        .step(format!("c = {}", num(c)));

    Ok(PythagoreanResult {
        leg_a,
        leg_b,
        hypotenuse: c,
        solved_for: RightTriangleSide::Hypotenuse,
        formula: "c = √(a² + b²)".to_string(),
        steps: steps.into_steps(),
    })
}

/// Missing leg from one leg and the hypotenuse: `b = √(c² - a²)`.
///
/// The known leg must be strictly shorter than the hypotenuse.
pub fn cathetus(leg: f64, hypotenuse: f64) -> CalcResult<PythagoreanResult> {
    require_positive("leg", leg)?;
    require_positive("hypotenuse", hypotenuse)?;
    if leg >= hypotenuse {
        return Err(CalcError::invalid_input(
            "leg",
            num(leg),
            format!("A leg must be shorter than the hypotenuse ({})", num(hypotenuse)),
        ));
    }

    let b = (hypotenuse * hypotenuse - leg * leg).sqrt();
    let steps = StepTrace::new()
        .step("Formula: b² = c² - a²")
        .step(format!(
            "b = √({}² - {}²) = √{}",
            num(hypotenuse),
            num(leg),
            num(hypotenuse * hypotenuse - leg * leg)
        ))
        .step(format!("b = {}", num(b)));

    Ok(PythagoreanResult {
        leg_a: leg,
        leg_b: b,
        hypotenuse,
        solved_for: RightTriangleSide::Cathetus,
        formula: "b = √(c² - a²)".to_string(),
        steps: steps.into_steps(),
    })
}

// =============================================================================
// SPECIAL ANGLES
// =============================================================================

/// (degrees, radians, sin, cos, tan) in exact form.
static SPECIAL_ANGLES: &[(f64, &str, &str, &str, &str)] = &[
    (0.0, "0", "0", "1", "0"),
    (30.0, "π/6", "1/2", "√3/2", "√3/3"),
    (45.0, "π/4", "√2/2", "√2/2", "1"),
    (60.0, "π/3", "√3/2", "1/2", "√3"),
    (90.0, "π/2", "1", "0", "undefined"),
    (120.0, "2π/3", "√3/2", "-1/2", "-√3"),
    (135.0, "3π/4", "√2/2", "-√2/2", "-1"),
    (150.0, "5π/6", "1/2", "-√3/2", "-√3/3"),
    (180.0, "π", "0", "-1", "0"),
    (270.0, "3π/2", "-1", "0", "undefined"),
    (360.0, "2π", "0", "1", "0"),
];

/// Table of sin/cos/tan at the named special angles.
pub fn special_angles_table() -> Vec<SpecialAngle> {
    SPECIAL_ANGLES
        .iter()
        .map(|&(degrees, radians_exact, sin_exact, cos_exact, tan_exact)| {
            let radians = degrees.to_radians();
            let (s, c) = radians.sin_cos();
            SpecialAngle {
                degrees,
                radians: clean(radians),
                radians_exact,
                sin_exact,
                cos_exact,
                tan_exact,
                sin: clean(s),
                cos: clean(c),
                tan: if is_zero(c) { None } else { Some(clean(s / c)) },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_direct_functions_degrees() {
        assert_eq!(sin(30.0, AngleUnit::Degrees).unwrap().result, 0.5);
        assert_eq!(cos(60.0, AngleUnit::Degrees).unwrap().result, 0.5);
        assert_eq!(tan(45.0, AngleUnit::Degrees).unwrap().result, 1.0);
        assert_eq!(cot(45.0, AngleUnit::Degrees).unwrap().result, 1.0);
        assert_eq!(sec(60.0, AngleUnit::Degrees).unwrap().result, 2.0);
        assert_eq!(csc(30.0, AngleUnit::Degrees).unwrap().result, 2.0);
        assert_eq!(sin(180.0, AngleUnit::Degrees).unwrap().result, 0.0);
    }

    #[test]
    fn test_direct_functions_radians() {
        let result = sin(PI / 2.0, AngleUnit::Radians).unwrap();
        assert_eq!(result.result, 1.0);
        assert_eq!(cos(PI, AngleUnit::Radians).unwrap().result, -1.0);
    }

    #[test]
    fn test_reciprocal_singularities() {
        assert_eq!(cot(0.0, AngleUnit::Degrees).unwrap_err().error_code(), "UNDEFINED");
        assert!(csc(180.0, AngleUnit::Degrees).is_err());
        assert!(sec(90.0, AngleUnit::Degrees).is_err());
        assert!(tan(270.0, AngleUnit::Degrees).is_err());
        assert_eq!(cot(90.0, AngleUnit::Degrees).unwrap().result, 0.0);
    }

    #[test]
    fn test_inverse_functions() {
        assert_eq!(asin(0.5, AngleUnit::Degrees).unwrap().result, 30.0);
        assert_eq!(acos(0.5, AngleUnit::Degrees).unwrap().result, 60.0);
        assert_eq!(atan(1.0, AngleUnit::Degrees).unwrap().result, 45.0);
        assert_abs_diff_eq!(atan(1.0, AngleUnit::Radians).unwrap().result, PI / 4.0, epsilon = 1e-9);
        assert!(asin(1.5, AngleUnit::Degrees).is_err());
        assert!(acos(-1.01, AngleUnit::Radians).is_err());
    }

    #[test]
    fn test_steps_convert_units_once() {
        let result = sin(30.0, AngleUnit::Degrees).unwrap();
        assert_eq!(result.steps.len(), 3);
        assert!(result.steps[1].starts_with("Convert to radians"));
        assert_eq!(result.steps[2], "sin(30°) = 0.5");

        let inverse = asin(1.0, AngleUnit::Radians).unwrap();
        assert_eq!(inverse.steps.len(), 2);
    }

    #[test]
    fn test_convert_angle() {
        assert_abs_diff_eq!(convert_angle(180.0, AngleUnit::Degrees).unwrap().result, PI, epsilon = 1e-9);
        assert_eq!(convert_angle(PI, AngleUnit::Radians).unwrap().result, 180.0);
    }

    #[test]
    fn test_pythagorean() {
        let result = hypotenuse(3.0, 4.0).unwrap();
        assert_eq!(result.hypotenuse, 5.0);
        let result = cathetus(3.0, 5.0).unwrap();
        assert_eq!(result.leg_b, 4.0);
        assert_eq!(result.solved_for, RightTriangleSide::Cathetus);
        assert!(cathetus(5.0, 5.0).is_err());
        assert!(cathetus(6.0, 5.0).is_err());
    }

    #[test]
    fn test_special_angles() {
        let table = special_angles_table();
        assert_eq!(table.len(), 11);
        let right = table.iter().find(|row| row.degrees == 90.0).unwrap();
        assert_eq!(right.tan, None);
        assert_eq!(right.sin, 1.0);
        assert_eq!(right.cos, 0.0);
        let sixty = table.iter().find(|row| row.degrees == 60.0).unwrap();
        assert_eq!(sixty.cos, 0.5);
        assert_eq!(sixty.sin_exact, "√3/2");
    }
}
