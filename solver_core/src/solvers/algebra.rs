//! # Algebra Solver
//!
//! Closed-form solutions for linear and quadratic equations, 2×2 linear
//! systems (Cramer's rule), quadratic factoring, parabola vertices, and
//! evaluation of one-variable arithmetic expressions.
//!
//! Roots are returned unrounded so they can be substituted back into the
//! equation; the step trace shows them rounded for display.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::solvers::algebra::{solve_quadratic, RootNature};
//!
//! let result = solve_quadratic(1.0, -3.0, 2.0).unwrap();
//! assert_eq!(result.x1, Some(2.0));
//! assert_eq!(result.x2, Some(1.0));
//! assert_eq!(result.discriminant, 1.0);
//! assert_eq!(result.nature, RootNature::RealDistinct);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::solvers::expression;
use crate::steps::StepTrace;
use crate::validate::{format_number as num, require_finite, require_non_zero, require_representable};

/// Solution of `a·x + b = 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearResult {
    pub x: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Nature of the roots, decided by the sign of the discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootNature {
    /// Δ > 0
    RealDistinct,
    /// Δ = 0
    RealEqual,
    /// Δ < 0
    Complex,
}

impl RootNature {
    pub fn from_discriminant(discriminant: f64) -> Self {
        if discriminant > 0.0 {
            RootNature::RealDistinct
        } else if discriminant == 0.0 {
            RootNature::RealEqual
        } else {
            RootNature::Complex
        }
    }
}

/// Conjugate pair `real ± imaginary·i`, with `imaginary > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexRoots {
    pub real: f64,
    pub imaginary: f64,
}

/// Solution of `a·x² + b·x + c = 0`.
///
/// `x1`/`x2` are `None` only when `nature` is [`RootNature::Complex`]; the
/// conjugate pair is then in `complex_roots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticResult {
    pub x1: Option<f64>,
    pub x2: Option<f64>,
    pub discriminant: f64,
    pub nature: RootNature,
    pub complex_roots: Option<ComplexRoots>,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Solution of the system `a·x + b·y = e`, `c·x + d·y = f`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System2x2Result {
    pub x: f64,
    pub y: f64,
    pub determinant: f64,
    pub method: String,
    pub steps: Vec<String>,
}

/// Factored form of a quadratic over the reals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorResult {
    pub factored: String,
    pub factorable: bool,
    pub roots: Option<(f64, f64)>,
    pub discriminant: f64,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opening {
    Upward,
    Downward,
}

/// Vertex `(h, k)` of the parabola `y = a·x² + b·x + c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexResult {
    pub h: f64,
    pub k: f64,
    pub axis_of_symmetry: String,
    pub opens: Opening,
    pub formula: String,
    pub steps: Vec<String>,
}

/// Value of an expression in `x` at a given point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionResult {
    pub expression: String,
    pub x: f64,
    pub substituted: String,
    pub result: f64,
    pub steps: Vec<String>,
}

/// `" + 3"` / `" - 3"` for writing terms after the leading one.
fn signed(value: f64) -> String {
    if value < 0.0 {
        format!(" - {}", num(-value))
    } else {
        format!(" + {}", num(value))
    }
}

fn quadratic_text(a: f64, b: f64, c: f64) -> String {
    format!("{}x²{}x{} = 0", num(a), signed(b), signed(c))
}

/// Normalize `-0.0` so results never print as "-0".
fn clean(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

// =============================================================================
// LINEAR
// =============================================================================

/// Solve `a·x + b = 0`.
///
/// Fails with [`CalcError::InfiniteSolutions`] when `a = b = 0` and with
/// [`CalcError::NoSolution`] when only `a = 0`.
pub fn solve_linear(a: f64, b: f64) -> CalcResult<LinearResult> {
    require_finite("a", a)?;
    require_finite("b", b)?;
    log::debug!("solve_linear a={} b={}", a, b);

    let equation = format!("{}x{} = 0", num(a), signed(b));
    if a == 0.0 {
        if b == 0.0 {
            return Err(CalcError::infinite_solutions(equation));
        }
        return Err(CalcError::no_solution(
            equation,
            format!("{} can never equal 0", num(b)),
        ));
    }

    let x = clean(require_representable("linear root", -b / a)?);
    Ok(LinearResult {
        x,
        formula: "x = -b / a".to_string(),
        steps: linear_steps(a, b, x).into_steps(),
    })
}

fn linear_steps(a: f64, b: f64, x: f64) -> StepTrace {
    StepTrace::new()
        .step(format!("Equation: {}x{} = 0", num(a), signed(b)))
        .step(format!("Move the constant to the right side: {}x = {}", num(a), num(-b)))
        .step(format!("Divide both sides by {}: x = {} / {}", num(a), num(-b), num(a)))
        .step(format!("x = {}", num(x)))
}

// =============================================================================
// QUADRATIC
// =============================================================================

/// Solve `a·x² + b·x + c = 0` with the quadratic formula.
///
/// `x1` is the `+√Δ` root and `x2` the `-√Δ` root. Distinct real roots are
/// computed in the cancellation-free form `q = -(b + sign(b)·√Δ) / 2`,
/// `{q / a, c / q}`, so a root much smaller than the other keeps its
/// precision. Fails with [`CalcError::Overflow`] when `b² - 4ac` or a root
/// does not fit in an f64.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> CalcResult<QuadraticResult> {
    require_non_zero("a", a)?;
    require_finite("b", b)?;
    require_finite("c", c)?;
    log::debug!("solve_quadratic a={} b={} c={}", a, b, c);

    let discriminant = require_representable("quadratic discriminant", b * b - 4.0 * a * c)?;
    let nature = RootNature::from_discriminant(discriminant);

    let (x1, x2, complex_roots) = match nature {
        RootNature::RealDistinct => {
            let sqrt_d = discriminant.sqrt();
            // Δ > 0 keeps q away from zero
            let q = -(b + b.signum() * sqrt_d) / 2.0;
            let (plus, minus) = if b.is_sign_negative() { (q / a, c / q) } else { (c / q, q / a) };
            (
                Some(clean(require_representable("quadratic root", plus)?)),
                Some(clean(require_representable("quadratic root", minus)?)),
                None,
            )
        }
        RootNature::RealEqual => {
            let root = clean(require_representable("quadratic root", -b / (2.0 * a))?);
            (Some(root), Some(root), None)
        }
        RootNature::Complex => {
            let roots = ComplexRoots {
                real: clean(require_representable("quadratic root", -b / (2.0 * a))?),
                imaginary: require_representable("quadratic root", ((-discriminant).sqrt() / (2.0 * a)).abs())?,
            };
            (None, None, Some(roots))
        }
    };

    let steps = quadratic_steps(a, b, c, discriminant, x1, x2, complex_roots);
    Ok(QuadraticResult {
        x1,
        x2,
        discriminant,
        nature,
        complex_roots,
        formula: "x = (-b ± √(b² - 4ac)) / 2a".to_string(),
        steps: steps.into_steps(),
    })
}

fn quadratic_steps(
    a: f64,
    b: f64,
    c: f64,
    discriminant: f64,
    x1: Option<f64>,
    x2: Option<f64>,
    complex_roots: Option<ComplexRoots>,
) -> StepTrace {
    let mut trace = StepTrace::new()
        .step(format!("Equation: {}", quadratic_text(a, b, c)))
        .step(format!(
            "Discriminant: Δ = b² - 4ac = ({})² - 4·({})·({}) = {}",
            num(b),
            num(a),
            num(c),
            num(discriminant)
        ));

    match (x1, x2, complex_roots) {
        (_, _, Some(roots)) => {
            trace
                .push("Δ < 0: two complex conjugate roots")
                .push(format!("Real part: -b / 2a = {} / {} = {}", num(-b), num(2.0 * a), num(roots.real)))
                .push(format!(
                    "Imaginary part: √(-Δ) / 2a = √{} / {} = {}",
                    num(-discriminant),
                    num((2.0 * a).abs()),
                    num(roots.imaginary)
                ))
                .push(format!("x₁ = {} + {}i", num(roots.real), num(roots.imaginary)))
                .push(format!("x₂ = {} - {}i", num(roots.real), num(roots.imaginary)));
        }
        (Some(root), _, None) if discriminant == 0.0 => {
            trace
                .push("Δ = 0: one repeated real root")
                .push(format!("x = -b / 2a = {} / {} = {}", num(-b), num(2.0 * a), num(root)));
        }
        (Some(r1), Some(r2), None) => {
            let sqrt_d = discriminant.sqrt();
            trace
                .push("Δ > 0: two distinct real roots")
                .push(format!("√Δ = {}", num(sqrt_d)))
                .push(format!("x₁ = ({} + {}) / {} = {}", num(-b), num(sqrt_d), num(2.0 * a), num(r1)))
                .push(format!("x₂ = ({} - {}) / {} = {}", num(-b), num(sqrt_d), num(2.0 * a), num(r2)));
        }
        _ => {}
    }
    trace
}

// =============================================================================
// 2×2 SYSTEM
// =============================================================================

/// Solve `a·x + b·y = e`, `c·x + d·y = f` by Cramer's rule.
///
/// A zero determinant means there is no unique solution: the system is
/// reported as [`CalcError::InfiniteSolutions`] when both Cramer numerators
/// also vanish (dependent equations) and [`CalcError::NoSolution`] otherwise.
pub fn solve_system_2x2(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> CalcResult<System2x2Result> {
    for (field, value) in [("a", a), ("b", b), ("c", c), ("d", d), ("e", e), ("f", f)] {
        require_finite(field, value)?;
    }
    log::debug!("solve_system_2x2 [{} {} | {}] [{} {} | {}]", a, b, e, c, d, f);

    let determinant = a * d - b * c;
    let det_x = e * d - b * f;
    let det_y = a * f - e * c;
    let problem = format!(
        "{}x{}y = {}, {}x{}y = {}",
        num(a),
        signed(b),
        num(e),
        num(c),
        signed(d),
        num(f)
    );

    if determinant == 0.0 {
        if det_x == 0.0 && det_y == 0.0 {
            return Err(CalcError::infinite_solutions(problem));
        }
        return Err(CalcError::no_solution(
            problem,
            "determinant ad - bc is zero (parallel lines)",
        ));
    }

    let x = clean(det_x / determinant);
    let y = clean(det_y / determinant);
    Ok(System2x2Result {
        x,
        y,
        determinant,
        method: "Cramer's rule".to_string(),
        steps: system_steps(&problem, determinant, det_x, det_y, x, y).into_steps(),
    })
}

fn system_steps(problem: &str, det: f64, det_x: f64, det_y: f64, x: f64, y: f64) -> StepTrace {
    StepTrace::new()
        .step(format!("System: {}", problem))
        .step(format!("D = ad - bc = {}", num(det)))
        .step(format!("Dx = ed - bf = {}", num(det_x)))
        .step(format!("Dy = af - ec = {}", num(det_y)))
        .step(format!("x = Dx / D = {} / {} = {}", num(det_x), num(det), num(x)))
        .step(format!("y = Dy / D = {} / {} = {}", num(det_y), num(det), num(y)))
}

// =============================================================================
// FACTORING AND VERTEX
// =============================================================================

/// `(x - r)` written with the sign folded in.
fn factor_term(root: f64) -> String {
    if root < 0.0 {
        format!("(x + {})", num(-root))
    } else if root == 0.0 {
        "x".to_string()
    } else {
        format!("(x - {})", num(root))
    }
}

fn leading(a: f64) -> String {
    if a == 1.0 {
        String::new()
    } else if a == -1.0 {
        "-".to_string()
    } else {
        num(a)
    }
}

/// Factor `a·x² + b·x + c` as `a(x - x₁)(x - x₂)`.
///
/// A negative discriminant is not an error: the result reports
/// `factorable = false` with an explanatory message.
pub fn factor_quadratic(a: f64, b: f64, c: f64) -> CalcResult<FactorResult> {
    let solved = solve_quadratic(a, b, c)?;
    let mut trace = StepTrace::new()
        .step(format!("Expression: {}x²{}x{}", num(a), signed(b), signed(c)))
        .step(format!("Discriminant: Δ = {}", num(solved.discriminant)));

    let (factored, roots) = match (solved.x1, solved.x2) {
        (Some(r1), Some(r2)) if solved.nature == RootNature::RealEqual => {
            trace.push(format!("Repeated root x = {}", num(r1)));
            let term = factor_term(r1);
            let squared = if term == "x" { "x²".to_string() } else { format!("{}²", term) };
            (format!("{}{}", leading(a), squared), Some((r1, r2)))
        }
        (Some(r1), Some(r2)) => {
            trace.push(format!("Roots x₁ = {}, x₂ = {}", num(r1), num(r2)));
            (
                format!("{}{}{}", leading(a), factor_term(r1), factor_term(r2)),
                Some((r1, r2)),
            )
        }
        _ => {
            trace.push("Δ < 0: no real roots");
            ("Cannot be factored over the real numbers".to_string(), None)
        }
    };

    let factorable = roots.is_some();
    if factorable {
        trace.push(format!("Factored form: {}", factored));
    }

    Ok(FactorResult {
        factored,
        factorable,
        roots,
        discriminant: solved.discriminant,
        steps: trace.into_steps(),
    })
}

/// Vertex of `y = a·x² + b·x + c`: `h = -b / 2a`, `k = c - b² / 4a`.
pub fn vertex_of_parabola(a: f64, b: f64, c: f64) -> CalcResult<VertexResult> {
    require_non_zero("a", a)?;
    require_finite("b", b)?;
    require_finite("c", c)?;
    log::debug!("vertex_of_parabola a={} b={} c={}", a, b, c);

    let h = clean(require_representable("vertex h", -b / (2.0 * a))?);
    let k = clean(require_representable("vertex k", c - b * b / (4.0 * a))?);
    let opens = if a > 0.0 { Opening::Upward } else { Opening::Downward };

    let steps = StepTrace::new()
        .step(format!("Parabola: y = {}x²{}x{}", num(a), signed(b), signed(c)))
        .step(format!("h = -b / 2a = {} / {} = {}", num(-b), num(2.0 * a), num(h)))
        .step(format!("k = c - b² / 4a = {} - {} / {} = {}", num(c), num(b * b), num(4.0 * a), num(k)))
        .step(format!(
            "Vertex: ({}, {}), opens {}",
            num(h),
            num(k),
            if opens == Opening::Upward { "upward (minimum)" } else { "downward (maximum)" }
        ));

    Ok(VertexResult {
        h,
        k,
        axis_of_symmetry: format!("x = {}", num(h)),
        opens,
        formula: "h = -b / 2a, k = c - b² / 4a".to_string(),
        steps: steps.into_steps(),
    })
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// Substitute `x` into a whitelisted arithmetic expression and evaluate it.
///
/// See [`crate::solvers::expression`] for the accepted grammar.
pub fn evaluate_expression(expr: &str, x: f64) -> CalcResult<ExpressionResult> {
    require_finite("x", x)?;
    log::debug!("evaluate_expression {:?} at x={}", expr, x);

    let result = clean(expression::evaluate(expr, x)?);
    let substituted = expr
        .chars()
        .map(|ch| match ch {
            'x' | 'X' => format!("({})", num(x)),
            other => other.to_string(),
        })
        .collect::<String>();

    let steps = StepTrace::new()
        .step(format!("Expression: {}", expr.trim()))
        .step(format!("Substitute x = {}: {}", num(x), substituted.trim()))
        .step(format!("Result = {}", num(result)));

    Ok(ExpressionResult {
        expression: expr.trim().to_string(),
        x,
        substituted: substituted.trim().to_string(),
        result,
        steps: steps.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plug(a: f64, b: f64, c: f64, x: f64) -> f64 {
        a * x * x + b * x + c
    }

    #[test]
    fn test_linear() {
        let result = solve_linear(2.0, -8.0).unwrap();
        assert_eq!(result.x, 4.0);
        assert_eq!(result.steps.last().map(String::as_str), Some("x = 4"));
    }

    #[test]
    fn test_linear_zero_coefficient() {
        assert_eq!(solve_linear(0.0, 0.0).unwrap_err().error_code(), "INFINITE_SOLUTIONS");
        assert_eq!(solve_linear(0.0, 3.0).unwrap_err().error_code(), "NO_SOLUTION");
    }

    #[test]
    fn test_linear_never_negative_zero() {
        let result = solve_linear(3.0, 0.0).unwrap();
        assert!(result.x.is_sign_positive());
    }

    #[test]
    fn test_linear_steps() {
        let steps = linear_steps(2.0, -8.0, 4.0).into_steps();
        assert_eq!(steps[0], "Equation: 2x - 8 = 0");
        assert_eq!(steps[1], "Move the constant to the right side: 2x = 8");
    }

    #[test]
    fn test_quadratic_distinct() {
        let result = solve_quadratic(1.0, -3.0, 2.0).unwrap();
        assert_eq!(result.x1, Some(2.0));
        assert_eq!(result.x2, Some(1.0));
        assert_eq!(result.discriminant, 1.0);
        assert_eq!(result.nature, RootNature::RealDistinct);
        assert!(result.complex_roots.is_none());
    }

    #[test]
    fn test_quadratic_repeated() {
        let result = solve_quadratic(1.0, 2.0, 1.0).unwrap();
        assert_eq!(result.nature, RootNature::RealEqual);
        assert_eq!(result.x1, Some(-1.0));
        assert_eq!(result.x2, Some(-1.0));
    }

    #[test]
    fn test_quadratic_complex() {
        let result = solve_quadratic(1.0, 2.0, 5.0).unwrap();
        assert_eq!(result.nature, RootNature::Complex);
        assert_eq!(result.x1, None);
        assert_eq!(result.x2, None);
        let roots = result.complex_roots.unwrap();
        assert_eq!(roots.real, -1.0);
        assert_eq!(roots.imaginary, 2.0);
        assert!(result.steps.iter().any(|s| s == "x₁ = -1 + 2i"));
        assert!(result.steps.iter().any(|s| s == "x₂ = -1 - 2i"));
    }

    #[test]
    fn test_quadratic_roots_satisfy_equation() {
        let cases = [
            (1.0, -3.0, 2.0),
            (2.0, 5.0, -3.0),
            (-4.0, 1.5, 7.25),
            (0.5, -0.1, -12.0),
            (3.0, 6.0, 3.0),
            (1e-3, 10.0, 1.0),
            (1.0, 1e8, 1.0),
            (1.0, -1e8, 1.0),
        ];
        for (a, b, c) in cases {
            let result = solve_quadratic(a, b, c).unwrap();
            for root in [result.x1, result.x2].into_iter().flatten() {
                // Residual relative to the size of the terms being summed
                let scale = (a * root * root).abs() + (b * root).abs() + c.abs();
                assert!(
                    plug(a, b, c, root).abs() <= 1e-12 * scale,
                    "root {} of ({}, {}, {})",
                    root,
                    a,
                    b,
                    c
                );
            }
        }
    }

    #[test]
    fn test_quadratic_small_root_keeps_precision() {
        // -b + √Δ cancels almost completely here
        let result = solve_quadratic(1.0, 1e8, 1.0).unwrap();
        assert_relative_eq!(result.x1.unwrap(), -1e-8, max_relative = 1e-12);
        assert_relative_eq!(result.x2.unwrap(), -1e8, max_relative = 1e-12);

        let result = solve_quadratic(1.0, -1e8, 1.0).unwrap();
        assert_relative_eq!(result.x1.unwrap(), 1e8, max_relative = 1e-12);
        assert_relative_eq!(result.x2.unwrap(), 1e-8, max_relative = 1e-12);
    }

    #[test]
    fn test_quadratic_root_order_follows_sign_of_root() {
        // x1 takes +√Δ, so it is the larger root when a > 0
        let result = solve_quadratic(2.0, 5.0, -3.0).unwrap();
        assert_eq!(result.x1, Some(0.5));
        assert_eq!(result.x2, Some(-3.0));
        let result = solve_quadratic(-1.0, 0.0, 4.0).unwrap();
        assert_eq!(result.x1, Some(-2.0));
        assert_eq!(result.x2, Some(2.0));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(solve_quadratic(1.0, 1e200, 1.0).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(solve_quadratic(1e300, 0.0, -1e300).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(solve_linear(1e-300, 1e10).unwrap_err().error_code(), "OVERFLOW");
        assert_eq!(vertex_of_parabola(1e-300, 1e10, 0.0).unwrap_err().error_code(), "OVERFLOW");
    }

    #[test]
    fn test_quadratic_nature_follows_discriminant() {
        for (a, b, c) in [(1.0, 0.0, -1.0), (1.0, 0.0, 0.0), (1.0, 0.0, 1.0)] {
            let result = solve_quadratic(a, b, c).unwrap();
            assert_eq!(result.nature, RootNature::from_discriminant(result.discriminant));
        }
    }

    #[test]
    fn test_quadratic_zero_leading() {
        let err = solve_quadratic(0.0, 2.0, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_nature_serialization() {
        let json = serde_json::to_string(&RootNature::RealDistinct).unwrap();
        assert_eq!(json, "\"real-distinct\"");
    }

    #[test]
    fn test_system() {
        // x + y = 3, x - y = 1 -> x = 2, y = 1
        let result = solve_system_2x2(1.0, 1.0, 1.0, -1.0, 3.0, 1.0).unwrap();
        assert_eq!(result.x, 2.0);
        assert_eq!(result.y, 1.0);
        assert_eq!(result.determinant, -2.0);
        assert_eq!(result.method, "Cramer's rule");
    }

    #[test]
    fn test_system_singular() {
        assert_eq!(
            solve_system_2x2(1.0, 2.0, 2.0, 4.0, 3.0, 7.0).unwrap_err().error_code(),
            "NO_SOLUTION"
        );
        assert_eq!(
            solve_system_2x2(1.0, 2.0, 2.0, 4.0, 3.0, 6.0).unwrap_err().error_code(),
            "INFINITE_SOLUTIONS"
        );
    }

    #[test]
    fn test_factor() {
        let result = factor_quadratic(1.0, -3.0, 2.0).unwrap();
        assert!(result.factorable);
        assert_eq!(result.factored, "(x - 2)(x - 1)");

        let result = factor_quadratic(2.0, 0.0, -8.0).unwrap();
        assert_eq!(result.factored, "2(x - 2)(x + 2)");

        let result = factor_quadratic(1.0, -4.0, 4.0).unwrap();
        assert_eq!(result.factored, "(x - 2)²");
    }

    #[test]
    fn test_factor_negative_discriminant_is_not_an_error() {
        let result = factor_quadratic(1.0, 0.0, 1.0).unwrap();
        assert!(!result.factorable);
        assert!(result.roots.is_none());
        assert_eq!(result.factored, "Cannot be factored over the real numbers");
    }

    #[test]
    fn test_vertex() {
        let result = vertex_of_parabola(1.0, -4.0, 3.0).unwrap();
        assert_eq!(result.h, 2.0);
        assert_eq!(result.k, -1.0);
        assert_eq!(result.opens, Opening::Upward);
        assert_eq!(result.axis_of_symmetry, "x = 2");

        let result = vertex_of_parabola(-2.0, 0.0, 5.0).unwrap();
        assert_eq!(result.opens, Opening::Downward);
        assert_eq!(result.k, 5.0);
    }

    #[test]
    fn test_evaluate_expression() {
        let result = evaluate_expression("2x + 1", 3.0).unwrap();
        assert_eq!(result.result, 7.0);
        assert_eq!(result.substituted, "2(3) + 1");
        assert_eq!(result.steps.len(), 3);
        assert!(evaluate_expression("x + y", 1.0).is_err());
    }
}
