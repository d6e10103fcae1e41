//! # Geometry Solver
//!
//! Area and perimeter of plane figures, plus inverse functions that recover a
//! missing dimension from a known area or perimeter.
//!
//! ## Rounding
//!
//! All derivations run at full precision; every numeric field of a result is
//! rounded to [`DECIMAL_PLACES`] only when the record is built. Inverse
//! functions therefore reproduce the original dimension to within that
//! rounding. A derived value too large for an f64 is reported as
//! `CalcError::Overflow` rather than returned as infinity.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::solvers::geometry::calculate_circle;
//!
//! let circle = calculate_circle(5.0).unwrap();
//! assert_eq!(circle.area, 78.54);
//! assert_eq!(circle.circumference, 31.42);
//! assert_eq!(circle.diameter, 10.0);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::steps::StepTrace;
use crate::validate::{format_number as num, require_positive, require_representable, round_to};

/// Decimal places kept in every geometry result.
pub const DECIMAL_PLACES: u32 = 2;

fn r2(value: f64) -> f64 {
    round_to(value, DECIMAL_PLACES)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleResult {
    pub radius: f64,
    pub diameter: f64,
    pub area: f64,
    pub circumference: f64,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleResult {
    pub length: f64,
    pub width: f64,
    pub area: f64,
    pub perimeter: f64,
    pub diagonal: f64,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareResult {
    pub side: f64,
    pub area: f64,
    pub perimeter: f64,
    pub diagonal: f64,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhombusResult {
    pub diagonal1: f64,
    pub diagonal2: f64,
    pub side: f64,
    pub area: f64,
    pub perimeter: f64,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrapezoidResult {
    pub base1: f64,
    pub base2: f64,
    pub height: f64,
    pub area: f64,
    /// Only known when both legs are given
    pub perimeter: Option<f64>,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideClass {
    Equilateral,
    Isosceles,
    Scalene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleClass {
    Acute,
    Right,
    Obtuse,
}

/// Triangle from base and height, or from three sides (Heron's formula).
///
/// Fields that the chosen inputs do not determine are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleResult {
    pub sides: Option<[f64; 3]>,
    pub base: Option<f64>,
    pub height: Option<f64>,
    pub area: f64,
    pub perimeter: Option<f64>,
    pub semiperimeter: Option<f64>,
    pub side_class: Option<SideClass>,
    pub angle_class: Option<AngleClass>,
    pub steps: Vec<String>,
}

// =============================================================================
// CIRCLE
// =============================================================================

/// Circle from its radius.
pub fn calculate_circle(radius: f64) -> CalcResult<CircleResult> {
    require_positive("radius", radius)?;
    log::debug!("calculate_circle r={}", radius);
    build_circle(radius, StepTrace::new())
}

/// Circle from its area: `r = √(A / π)`.
pub fn calculate_circle_from_area(area: f64) -> CalcResult<CircleResult> {
    require_positive("area", area)?;
    let radius = (area / PI).sqrt();
    let trace = StepTrace::new().step(format!(
        "r = √(A / π) = √({} / π) = {}",
        num(area),
        num(radius)
    ));
    build_circle(radius, trace)
}

/// Circle from its circumference: `r = C / 2π`.
pub fn calculate_circle_from_circumference(circumference: f64) -> CalcResult<CircleResult> {
    require_positive("circumference", circumference)?;
    let radius = circumference / (2.0 * PI);
    let trace = StepTrace::new().step(format!(
        "r = C / 2π = {} / 2π = {}",
        num(circumference),
        num(radius)
    ));
    build_circle(radius, trace)
}

fn build_circle(radius: f64, mut trace: StepTrace) -> CalcResult<CircleResult> {
    let diameter = require_representable("circle diameter", 2.0 * radius)?;
    let area = require_representable("circle area", PI * radius * radius)?;
    let circumference = require_representable("circle circumference", 2.0 * PI * radius)?;

    trace
        .push(format!("Diameter: d = 2r = 2 × {} = {}", num(radius), num(r2(diameter))))
        .push(format!("Area: A = πr² = π × {}² = {}", num(radius), num(r2(area))))
        .push(format!(
            "Circumference: C = 2πr = 2 × π × {} = {}",
            num(radius),
            num(r2(circumference))
        ));

    Ok(CircleResult {
        radius: r2(radius),
        diameter: r2(diameter),
        area: r2(area),
        circumference: r2(circumference),
        steps: trace.into_steps(),
    })
}

// =============================================================================
// RECTANGLE
// =============================================================================

/// Rectangle from length and width.
pub fn calculate_rectangle(length: f64, width: f64) -> CalcResult<RectangleResult> {
    require_positive("length", length)?;
    require_positive("width", width)?;
    log::debug!("calculate_rectangle l={} w={}", length, width);
    build_rectangle(length, width, StepTrace::new())
}

/// Rectangle width from its area and length: `w = A / l`.
pub fn calculate_rectangle_from_area(area: f64, length: f64) -> CalcResult<RectangleResult> {
    require_positive("area", area)?;
    require_positive("length", length)?;
    let width = require_representable("rectangle width", area / length)?;
    let trace = StepTrace::new().step(format!(
        "w = A / l = {} / {} = {}",
        num(area),
        num(length),
        num(width)
    ));
    build_rectangle(length, width, trace)
}

/// Rectangle width from its perimeter and length: `w = P/2 - l`.
pub fn calculate_rectangle_from_perimeter(perimeter: f64, length: f64) -> CalcResult<RectangleResult> {
    require_positive("perimeter", perimeter)?;
    require_positive("length", length)?;
    if perimeter <= 2.0 * length {
        return Err(CalcError::invalid_input(
            "perimeter",
            num(perimeter),
            format!("Perimeter must exceed twice the length ({})", num(2.0 * length)),
        ));
    }
    let width = perimeter / 2.0 - length;
    let trace = StepTrace::new().step(format!(
        "w = P / 2 - l = {} / 2 - {} = {}",
        num(perimeter),
        num(length),
        num(width)
    ));
    build_rectangle(length, width, trace)
}

fn build_rectangle(length: f64, width: f64, mut trace: StepTrace) -> CalcResult<RectangleResult> {
    let area = require_representable("rectangle area", length * width)?;
    let perimeter = require_representable("rectangle perimeter", 2.0 * (length + width))?;
    let diagonal = require_representable("rectangle diagonal", length.hypot(width))?;

    trace
        .push(format!("Area: A = l × w = {} × {} = {}", num(length), num(width), num(r2(area))))
        .push(format!(
            "Perimeter: P = 2(l + w) = 2({} + {}) = {}",
            num(length),
            num(width),
            num(r2(perimeter))
        ))
        .push(format!(
            "Diagonal: d = √(l² + w²) = √({}² + {}²) = {}",
            num(length),
            num(width),
            num(r2(diagonal))
        ));

    Ok(RectangleResult {
        length: r2(length),
        width: r2(width),
        area: r2(area),
        perimeter: r2(perimeter),
        diagonal: r2(diagonal),
        steps: trace.into_steps(),
    })
}

// =============================================================================
// SQUARE
// =============================================================================

pub fn calculate_square(side: f64) -> CalcResult<SquareResult> {
    require_positive("side", side)?;
    log::debug!("calculate_square s={}", side);
    build_square(side, StepTrace::new())
}

/// Square side from its area: `s = √A`.
pub fn calculate_square_from_area(area: f64) -> CalcResult<SquareResult> {
    require_positive("area", area)?;
    let side = area.sqrt();
    let trace = StepTrace::new().step(format!("s = √A = √{} = {}", num(area), num(side)));
    build_square(side, trace)
}

/// Square side from its perimeter: `s = P / 4`.
pub fn calculate_square_from_perimeter(perimeter: f64) -> CalcResult<SquareResult> {
    require_positive("perimeter", perimeter)?;
    let side = perimeter / 4.0;
    let trace = StepTrace::new().step(format!("s = P / 4 = {} / 4 = {}", num(perimeter), num(side)));
    build_square(side, trace)
}

fn build_square(side: f64, mut trace: StepTrace) -> CalcResult<SquareResult> {
    let area = require_representable("square area", side * side)?;
    let perimeter = require_representable("square perimeter", 4.0 * side)?;
    let diagonal = require_representable("square diagonal", side * 2f64.sqrt())?;

    trace
        .push(format!("Area: A = s² = {}² = {}", num(side), num(r2(area))))
        .push(format!("Perimeter: P = 4s = 4 × {} = {}", num(side), num(r2(perimeter))))
        .push(format!("Diagonal: d = s√2 = {} × √2 = {}", num(side), num(r2(diagonal))));

    Ok(SquareResult {
        side: r2(side),
        area: r2(area),
        perimeter: r2(perimeter),
        diagonal: r2(diagonal),
        steps: trace.into_steps(),
    })
}

// =============================================================================
// RHOMBUS AND TRAPEZOID
// =============================================================================

/// Rhombus from its two diagonals.
pub fn calculate_rhombus(diagonal1: f64, diagonal2: f64) -> CalcResult<RhombusResult> {
    require_positive("diagonal1", diagonal1)?;
    require_positive("diagonal2", diagonal2)?;
    log::debug!("calculate_rhombus d1={} d2={}", diagonal1, diagonal2);

    let area = require_representable("rhombus area", diagonal1 * diagonal2 / 2.0)?;
    let side = (diagonal1 / 2.0).hypot(diagonal2 / 2.0);
    let perimeter = require_representable("rhombus perimeter", 4.0 * side)?;

    let steps = StepTrace::new()
        .step(format!(
            "Area: A = (d₁ × d₂) / 2 = ({} × {}) / 2 = {}",
            num(diagonal1),
            num(diagonal2),
            num(r2(area))
        ))
        .step(format!(
            "Side: s = √((d₁/2)² + (d₂/2)²) = √({}² + {}²) = {}",
            num(diagonal1 / 2.0),
            num(diagonal2 / 2.0),
            num(r2(side))
        ))
        .step(format!("Perimeter: P = 4s = {}", num(r2(perimeter))));

    Ok(RhombusResult {
        diagonal1: r2(diagonal1),
        diagonal2: r2(diagonal2),
        side: r2(side),
        area: r2(area),
        perimeter: r2(perimeter),
        steps: steps.into_steps(),
    })
}

/// Trapezoid from its parallel bases and height; `legs` adds the perimeter.
pub fn calculate_trapezoid(
    base1: f64,
    base2: f64,
    height: f64,
    legs: Option<(f64, f64)>,
) -> CalcResult<TrapezoidResult> {
    require_positive("base1", base1)?;
    require_positive("base2", base2)?;
    require_positive("height", height)?;
    if let Some((leg1, leg2)) = legs {
        require_positive("leg1", leg1)?;
        require_positive("leg2", leg2)?;
        if leg1 < height || leg2 < height {
            return Err(CalcError::invalid_input(
                "legs",
                format!("{}, {}", num(leg1), num(leg2)),
                "A leg cannot be shorter than the height",
            ));
        }
    }
    log::debug!("calculate_trapezoid b1={} b2={} h={}", base1, base2, height);

    let area = require_representable("trapezoid area", (base1 + base2) / 2.0 * height)?;
    let mut trace = StepTrace::new().step(format!(
        "Area: A = ((b₁ + b₂) / 2) × h = (({} + {}) / 2) × {} = {}",
        num(base1),
        num(base2),
        num(height),
        num(r2(area))
    ));

    let perimeter = match legs {
        Some((leg1, leg2)) => {
            let p = require_representable("trapezoid perimeter", base1 + base2 + leg1 + leg2)?;
            trace.push(format!(
                "Perimeter: P = b₁ + b₂ + c + d = {} + {} + {} + {} = {}",
                num(base1),
                num(base2),
                num(leg1),
                num(leg2),
                num(r2(p))
            ));
            Some(r2(p))
        }
        None => None,
    };

    Ok(TrapezoidResult {
        base1: r2(base1),
        base2: r2(base2),
        height: r2(height),
        area: r2(area),
        perimeter,
        steps: trace.into_steps(),
    })
}

// =============================================================================
// TRIANGLE
// =============================================================================

/// Triangle area from base and height: `A = b × h / 2`.
pub fn calculate_triangle(base: f64, height: f64) -> CalcResult<TriangleResult> {
    require_positive("base", base)?;
    require_positive("height", height)?;
    log::debug!("calculate_triangle b={} h={}", base, height);

    let area = require_representable("triangle area", base * height / 2.0)?;
    let steps = StepTrace::new().step(format!(
        "Area: A = (b × h) / 2 = ({} × {}) / 2 = {}",
        num(base),
        num(height),
        num(r2(area))
    ));

    Ok(TriangleResult {
        sides: None,
        base: Some(r2(base)),
        height: Some(r2(height)),
        area: r2(area),
        perimeter: None,
        semiperimeter: None,
        side_class: None,
        angle_class: None,
        steps: steps.into_steps(),
    })
}

/// Triangle from three sides using Heron's formula.
///
/// The triangle inequality must hold strictly for every pair of sides;
/// degenerate (flat) triangles are rejected.
pub fn calculate_triangle_from_sides(a: f64, b: f64, c: f64) -> CalcResult<TriangleResult> {
    require_positive("a", a)?;
    require_positive("b", b)?;
    require_positive("c", c)?;
    if a + b <= c || a + c <= b || b + c <= a {
        return Err(CalcError::invalid_input(
            "sides",
            format!("{}, {}, {}", num(a), num(b), num(c)),
            "Triangle inequality violated: the sum of any two sides must exceed the third",
        ));
    }
    log::debug!("calculate_triangle_from_sides a={} b={} c={}", a, b, c);

    let perimeter = require_representable("triangle perimeter", a + b + c)?;
    let s = perimeter / 2.0;
    // Root of each factor first so the product cannot overflow before the area does
    let area = require_representable(
        "triangle area",
        s.sqrt() * (s - a).sqrt() * (s - b).sqrt() * (s - c).sqrt(),
    )?;
    let side_class = classify_sides(a, b, c);
    let angle_class = classify_angles(a, b, c);

    let steps = heron_steps(a, b, c, s, area);

    Ok(TriangleResult {
        sides: Some([r2(a), r2(b), r2(c)]),
        base: None,
        height: None,
        area: r2(area),
        perimeter: Some(r2(perimeter)),
        semiperimeter: Some(r2(s)),
        side_class: Some(side_class),
        angle_class: Some(angle_class),
        steps: steps.into_steps(),
    })
}

fn heron_steps(a: f64, b: f64, c: f64, s: f64, area: f64) -> StepTrace {
    StepTrace::new()
        .step(format!(
            "Check triangle inequality: {} + {} > {}, {} + {} > {}, {} + {} > {}",
            num(a),
            num(b),
            num(c),
            num(a),
            num(c),
            num(b),
            num(b),
            num(c),
            num(a)
        ))
        .step(format!(
            "Semiperimeter: s = (a + b + c) / 2 = ({} + {} + {}) / 2 = {}",
            num(a),
            num(b),
            num(c),
            num(s)
        ))
        .step(format!(
            "Heron's formula: A = √(s(s - a)(s - b)(s - c)) = √({} × {} × {} × {})",
            num(s),
            num(s - a),
            num(s - b),
            num(s - c)
        ))
        .step(format!("A = {}", num(r2(area))))
}

fn classify_sides(a: f64, b: f64, c: f64) -> SideClass {
    if a == b && b == c {
        SideClass::Equilateral
    } else if a == b || b == c || a == c {
        SideClass::Isosceles
    } else {
        SideClass::Scalene
    }
}

/// Compare the square of the longest side against the sum of the others',
/// with every side scaled by the longest.
fn classify_angles(a: f64, b: f64, c: f64) -> AngleClass {
    let mut sides = [a, b, c];
    sides.sort_by(|x, y| x.total_cmp(y));
    let [p, q, longest] = sides;
    let (p, q) = (p / longest, q / longest);
    let rhs = p * p + q * q;
    // Tolerance so 3-4-5 style inputs given as decimals still count as right
    if (1.0 - rhs).abs() <= 1e-9 {
        AngleClass::Right
    } else if rhs > 1.0 {
        AngleClass::Acute
    } else {
        AngleClass::Obtuse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circle() {
        let circle = calculate_circle(5.0).unwrap();
        assert_eq!(circle.area, 78.54);
        assert_eq!(circle.circumference, 31.42);
        assert_eq!(circle.diameter, 10.0);
        assert_eq!(circle.steps.len(), 3);
    }

    #[test]
    fn test_circle_inverse() {
        let circle = calculate_circle_from_area(78.54).unwrap();
        assert_abs_diff_eq!(circle.radius, 5.0, epsilon = 0.01);
        let circle = calculate_circle_from_circumference(2.0 * PI).unwrap();
        assert_eq!(circle.radius, 1.0);
    }

    #[test]
    fn test_non_positive_dimensions() {
        assert!(calculate_circle(0.0).is_err());
        assert!(calculate_rectangle(-1.0, 2.0).is_err());
        assert!(calculate_square(0.0).is_err());
        assert!(calculate_rhombus(1.0, 0.0).is_err());
        assert!(calculate_trapezoid(1.0, 2.0, -3.0, None).is_err());
        assert!(calculate_triangle(f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_derived_values_too_large_overflow() {
        assert_eq!(calculate_circle(1e200).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_circle(1e307).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_rectangle(1e200, 1e200).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_rectangle_from_area(1e300, 1e-10).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_square(1e160).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_rhombus(1e200, 1e200).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_trapezoid(1e200, 1e200, 1e200, None).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(calculate_triangle(1e200, 1e200).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(
            calculate_triangle_from_sides(1e200, 1e200, 1e200).unwrap_err().error_code(),
            "OVERFLOW"
        );

        // Large but representable
        let tri = calculate_triangle_from_sides(1e150, 1e150, 1e150).unwrap();
        assert!(tri.area.is_finite());
        assert_eq!(tri.angle_class, Some(AngleClass::Acute));
    }

    #[test]
    fn test_rectangle() {
        let rect = calculate_rectangle(3.0, 4.0).unwrap();
        assert_eq!(rect.area, 12.0);
        assert_eq!(rect.perimeter, 14.0);
        assert_eq!(rect.diagonal, 5.0);
    }

    #[test]
    fn test_rectangle_area_round_trip() {
        for (l, w) in [(3.0, 4.0), (7.25, 1.5), (12.3, 0.7), (0.9, 0.33)] {
            let area = calculate_rectangle(l, w).unwrap().area;
            let recovered = calculate_rectangle_from_area(area, l).unwrap();
            assert_abs_diff_eq!(recovered.width, w, epsilon = 0.01);
        }
    }

    #[test]
    fn test_rectangle_from_perimeter() {
        let rect = calculate_rectangle_from_perimeter(20.0, 6.0).unwrap();
        assert_eq!(rect.width, 4.0);
        assert!(calculate_rectangle_from_perimeter(12.0, 6.0).is_err());
    }

    #[test]
    fn test_square() {
        let sq = calculate_square(4.0).unwrap();
        assert_eq!(sq.area, 16.0);
        assert_eq!(sq.perimeter, 16.0);
        assert_eq!(sq.diagonal, 5.66);
        assert_eq!(calculate_square_from_perimeter(20.0).unwrap().side, 5.0);
        assert_eq!(calculate_square_from_area(49.0).unwrap().side, 7.0);
    }

    #[test]
    fn test_rhombus() {
        let rh = calculate_rhombus(6.0, 8.0).unwrap();
        assert_eq!(rh.area, 24.0);
        assert_eq!(rh.side, 5.0);
        assert_eq!(rh.perimeter, 20.0);
    }

    #[test]
    fn test_trapezoid() {
        let tz = calculate_trapezoid(4.0, 6.0, 3.0, None).unwrap();
        assert_eq!(tz.area, 15.0);
        assert_eq!(tz.perimeter, None);

        let tz = calculate_trapezoid(4.0, 10.0, 4.0, Some((5.0, 5.0))).unwrap();
        assert_eq!(tz.perimeter, Some(24.0));
        assert_eq!(tz.steps.len(), 2);

        assert!(calculate_trapezoid(4.0, 10.0, 4.0, Some((3.0, 5.0))).is_err());
    }

    #[test]
    fn test_triangle_base_height() {
        let tri = calculate_triangle(10.0, 5.0).unwrap();
        assert_eq!(tri.area, 25.0);
        assert!(tri.sides.is_none());
    }

    #[test]
    fn test_heron() {
        let tri = calculate_triangle_from_sides(3.0, 4.0, 5.0).unwrap();
        assert_eq!(tri.area, 6.0);
        assert_eq!(tri.perimeter, Some(12.0));
        assert_eq!(tri.semiperimeter, Some(6.0));
        assert_eq!(tri.side_class, Some(SideClass::Scalene));
        assert_eq!(tri.angle_class, Some(AngleClass::Right));
    }

    #[test]
    fn test_triangle_classification() {
        let eq = calculate_triangle_from_sides(2.0, 2.0, 2.0).unwrap();
        assert_eq!(eq.side_class, Some(SideClass::Equilateral));
        assert_eq!(eq.angle_class, Some(AngleClass::Acute));
        assert_eq!(eq.area, 1.73);

        let obtuse = calculate_triangle_from_sides(2.0, 2.0, 3.5).unwrap();
        assert_eq!(obtuse.side_class, Some(SideClass::Isosceles));
        assert_eq!(obtuse.angle_class, Some(AngleClass::Obtuse));
    }

    #[test]
    fn test_triangle_inequality() {
        let err = calculate_triangle_from_sides(1.0, 1.0, 3.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        // Degenerate (flat) triangles fail too
        assert!(calculate_triangle_from_sides(1.0, 2.0, 3.0).is_err());
    }

    #[test]
    fn test_heron_steps() {
        let steps = heron_steps(3.0, 4.0, 5.0, 6.0, 6.0).into_steps();
        assert_eq!(steps[1], "Semiperimeter: s = (a + b + c) / 2 = (3 + 4 + 5) / 2 = 6");
        assert_eq!(steps[2], "Heron's formula: A = √(s(s - a)(s - b)(s - c)) = √(6 × 3 × 2 × 1)");
        assert_eq!(steps[3], "A = 6");
    }
}
