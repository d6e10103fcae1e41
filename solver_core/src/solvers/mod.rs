//! # Solvers
//!
//! One module per calculator family. Each solver follows the pattern:
//!
//! - validated numeric or string inputs as plain arguments
//! - a `*Result` record (JSON-serializable) carrying the values and `steps`
//! - `fn(..) -> CalcResult<*Result>`, pure, with no shared state
//!
//! ## Available Solvers
//!
//! - [`algebra`] - Linear, quadratic, 2x2 systems, factoring, vertex, expressions
//! - [`expression`] - Whitelisted evaluator behind `algebra::evaluate_expression`
//! - [`geometry`] - Circle, rectangle, square, rhombus, trapezoid, triangle
//! - [`trigonometry`] - Direct and inverse functions, Pythagoras, special angles
//! - [`combinatorics`] - Factorials, permutations, combinations, Pascal's triangle
//! - [`calendar`] - Day spans, age, date offsets, clock arithmetic, vacation days
//! - [`finance`] - Interest, loan payments, percentages
//! - [`health`] - BMI and BMR

pub mod algebra;
pub mod calendar;
pub mod combinatorics;
pub mod expression;
pub mod finance;
pub mod geometry;
pub mod health;
pub mod trigonometry;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use algebra::{LinearResult, QuadraticResult, System2x2Result};
pub use calendar::{AgeResult, DaysBetweenResult, Operation};
pub use combinatorics::{CombinatoricsResult, PascalTriangleResult};
pub use trigonometry::{AngleUnit, TrigFunction, TrigResult};

/// Record for single-number formulas that need no extra fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    pub result: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

