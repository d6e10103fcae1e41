//! # Combinatorics Solver
//!
//! Factorials and the counting formulas built on them: permutations and
//! combinations with and without repetition, subsets, circular permutations,
//! multinomial arrangements, and Pascal's triangle.
//!
//! Every formula is expressed through [`factorial_value`], so the overflow
//! bound [`MAX_FACTORIAL`] applies uniformly. Counts are carried as f64 (the
//! largest representable factorial is 170!) and rounded to the nearest
//! integer, since every count is integral by construction.
//!
//! ```rust
//! use solver_core::solvers::combinatorics::{combinations, factorial};
//!
//! assert_eq!(factorial(5).unwrap().result, 120.0);
//! assert_eq!(combinations(5, 2).unwrap().result, 10.0);
//! assert!(factorial(171).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::steps::StepTrace;
use crate::validate::format_number as num;

/// Largest n with n! finite in f64.
pub const MAX_FACTORIAL: u32 = 170;

/// Largest Pascal row index whose entries fit in a u64.
pub const MAX_PASCAL_ROW: u32 = 67;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinatoricsResult {
    pub result: f64,
    pub formula: String,
    pub steps: Vec<String>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PascalTriangleResult {
    pub rows: Vec<Vec<u64>>,
    pub steps: Vec<String>,
}

/// n! as a bare number; the shared helper behind every formula here.
pub fn factorial_value(n: u32) -> CalcResult<f64> {
    if n > MAX_FACTORIAL {
        return Err(CalcError::overflow(
            format!("{}!", n),
            format!("n <= {} in double precision", MAX_FACTORIAL),
        ));
    }
    Ok((2..=n).fold(1.0, |acc, k| acc * k as f64))
}

fn require_r_le_n(n: u32, r: u32) -> CalcResult<()> {
    if r > n {
        return Err(CalcError::invalid_input(
            "r",
            r.to_string(),
            format!("r cannot exceed n ({})", n),
        ));
    }
    Ok(())
}

fn require_at_least_one(field: &str, n: u32) -> CalcResult<()> {
    if n == 0 {
        return Err(CalcError::invalid_input(field, "0", "Value must be at least 1"));
    }
    Ok(())
}

/// `n! = 1 × 2 × … × n`, with `0! = 1`.
pub fn factorial(n: u32) -> CalcResult<CombinatoricsResult> {
    log::debug!("factorial n={}", n);
    let result = factorial_value(n)?;
    Ok(CombinatoricsResult {
        result,
        formula: "n! = n × (n - 1) × … × 1".to_string(),
        steps: factorial_steps(n, result).into_steps(),
        explanation: format!("Number of ways to order {} distinct items", n),
    })
}

fn factorial_steps(n: u32, result: f64) -> StepTrace {
    let mut trace = StepTrace::new();
    match n {
        0 | 1 => {
            trace.push(format!("{}! = 1 by definition", n));
        }
        2..=10 => {
            let product = (1..=n).rev().map(|k| k.to_string()).collect::<Vec<_>>().join(" × ");
            trace.push(format!("{}! = {}", n, product));
        }
        _ => {
            trace.push(format!("{}! = {} × {} × … × 2 × 1", n, n, n - 1));
        }
    }
    trace.push(format!("{}! = {}", n, num(result)));
    trace
}

/// Ordered selections without repetition: `P(n, r) = n! / (n - r)!`.
pub fn permutations(n: u32, r: u32) -> CalcResult<CombinatoricsResult> {
    require_r_le_n(n, r)?;
    log::debug!("permutations n={} r={}", n, r);
    let n_fact = factorial_value(n)?;
    let diff_fact = factorial_value(n - r)?;
    let result = (n_fact / diff_fact).round();

    let steps = StepTrace::new()
        .step("P(n, r) = n! / (n - r)!")
        .step(format!("P({}, {}) = {}! / {}!", n, r, n, n - r))
        .step(format!("= {} / {}", num(n_fact), num(diff_fact)))
        .step(format!("= {}", num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "P(n, r) = n! / (n - r)!".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Ways to arrange {} of {} distinct items where order matters", r, n),
    })
}

/// Unordered selections without repetition: `C(n, r) = n! / (r! (n - r)!)`.
pub fn combinations(n: u32, r: u32) -> CalcResult<CombinatoricsResult> {
    require_r_le_n(n, r)?;
    log::debug!("combinations n={} r={}", n, r);
    let n_fact = factorial_value(n)?;
    let r_fact = factorial_value(r)?;
    let diff_fact = factorial_value(n - r)?;
    let result = (n_fact / (r_fact * diff_fact)).round();

    let steps = StepTrace::new()
        .step("C(n, r) = n! / (r! × (n - r)!)")
        .step(format!("C({}, {}) = {}! / ({}! × {}!)", n, r, n, r, n - r))
        .step(format!("= {} / ({} × {})", num(n_fact), num(r_fact), num(diff_fact)))
        .step(format!("= {}", num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "C(n, r) = n! / (r! × (n - r)!)".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Ways to choose {} of {} distinct items where order does not matter", r, n),
    })
}

/// Ordered selections with repetition: `n^r`.
pub fn permutations_with_repetition(n: u32, r: u32) -> CalcResult<CombinatoricsResult> {
    log::debug!("permutations_with_repetition n={} r={}", n, r);
    let result = (n as f64).powf(r as f64);
    if !result.is_finite() {
        return Err(CalcError::overflow(
            format!("{}^{}", n, r),
            "results representable in double precision",
        ));
    }

    let steps = StepTrace::new()
        .step("Each of the r positions can take any of the n items: n^r")
        .step(format!("{}^{} = {}", n, r, num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "n^r".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Sequences of length {} drawn from {} items, repeats allowed", r, n),
    })
}

/// Unordered selections with repetition: `(n + r - 1)! / (r! (n - 1)!)`.
pub fn combinations_with_repetition(n: u32, r: u32) -> CalcResult<CombinatoricsResult> {
    require_at_least_one("n", n)?;
    log::debug!("combinations_with_repetition n={} r={}", n, r);
    let top = (n - 1).checked_add(r).ok_or_else(|| {
        CalcError::overflow(
            format!("({} + {} - 1)!", n, r),
            format!("n + r - 1 <= {}", MAX_FACTORIAL),
        )
    })?;
    let top_fact = factorial_value(top)?;
    let r_fact = factorial_value(r)?;
    let n1_fact = factorial_value(n - 1)?;
    let result = (top_fact / (r_fact * n1_fact)).round();

    let steps = StepTrace::new()
        .step("CR(n, r) = (n + r - 1)! / (r! × (n - 1)!)")
        .step(format!("CR({}, {}) = {}! / ({}! × {}!)", n, r, top, r, n - 1))
        .step(format!("= {} / ({} × {})", num(top_fact), num(r_fact), num(n1_fact)))
        .step(format!("= {}", num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "(n + r - 1)! / (r! × (n - 1)!)".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Multisets of size {} drawn from {} kinds of item", r, n),
    })
}

/// Number of subsets of an n-element set: `2^n`.
pub fn number_of_subsets(n: u32) -> CalcResult<CombinatoricsResult> {
    if n > 1023 {
        return Err(CalcError::overflow(format!("2^{}", n), "n <= 1023 in double precision"));
    }
    let result = 2f64.powi(n as i32);
    let steps = StepTrace::new()
        .step("Each element is either in or out of a subset: 2^n")
        .step(format!("2^{} = {}", n, num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "2^n".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Subsets of a set with {} elements, including the empty set", n),
    })
}

/// Arrangements around a circle: `(n - 1)!`.
pub fn circular_permutations(n: u32) -> CalcResult<CombinatoricsResult> {
    require_at_least_one("n", n)?;
    let result = factorial_value(n - 1)?;
    let steps = StepTrace::new()
        .step("Fix one item and arrange the rest: (n - 1)!")
        .step(format!("({} - 1)! = {}! = {}", n, n - 1, num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "(n - 1)!".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Ways to seat {} items around a circle, rotations counted once", n),
    })
}

/// Multinomial coefficient `n! / (n₁! n₂! … n_k!)` for groups of identical
/// items. The group sizes must sum to `n`.
pub fn arrangements_with_indistinguishable(n: u32, groups: &[u32]) -> CalcResult<CombinatoricsResult> {
    let total: u64 = groups.iter().map(|&g| g as u64).sum();
    if total != n as u64 {
        return Err(CalcError::invalid_input(
            "groups",
            format!("{:?}", groups),
            format!("Group sizes sum to {} but n is {}", total, n),
        ));
    }
    log::debug!("arrangements_with_indistinguishable n={} groups={:?}", n, groups);

    let n_fact = factorial_value(n)?;
    let mut denominator = 1.0;
    for &g in groups {
        denominator *= factorial_value(g)?;
    }
    let result = (n_fact / denominator).round();

    let group_text = groups.iter().map(|g| format!("{}!", g)).collect::<Vec<_>>().join(" × ");
    let steps = StepTrace::new()
        .step("n! / (n₁! × n₂! × … × n_k!)")
        .step(format!("{}! / ({})", n, group_text))
        .step(format!("= {} / {}", num(n_fact), num(denominator)))
        .step(format!("= {}", num(result)));

    Ok(CombinatoricsResult {
        result,
        formula: "n! / (n₁! × n₂! × … × n_k!)".to_string(),
        steps: steps.into_steps(),
        explanation: format!("Distinct orderings of {} items in {} groups of identical items", n, groups.len()),
    })
}

/// First `rows` rows of Pascal's triangle; each row is built by adding
/// adjacent entries of the row above.
pub fn pascal_triangle(rows: u32) -> CalcResult<PascalTriangleResult> {
    if rows > MAX_PASCAL_ROW + 1 {
        return Err(CalcError::overflow(
            format!("Pascal's triangle with {} rows", rows),
            format!("{} rows (64-bit entries)", MAX_PASCAL_ROW + 1),
        ));
    }
    log::debug!("pascal_triangle rows={}", rows);

    let mut triangle: Vec<Vec<u64>> = Vec::with_capacity(rows as usize);
    for i in 0..rows as usize {
        let mut row = vec![1u64; i + 1];
        if let Some(prev) = triangle.last() {
            for j in 1..i {
                row[j] = prev[j - 1] + prev[j];
            }
        }
        log::trace!("pascal row {}: {:?}", i, row);
        triangle.push(row);
    }

    let mut trace = StepTrace::new().step("Each entry is the sum of the two entries above it");
    if rows > 0 {
        trace.push(format!(
            "Row {} sums to 2^{} = {}",
            rows - 1,
            rows - 1,
            triangle.last().map(|r| r.iter().map(|&v| v as u128).sum::<u128>()).unwrap_or(1)
        ));
    }

    Ok(PascalTriangleResult {
        rows: triangle,
        steps: trace.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0).unwrap().result, 1.0);
        assert_eq!(factorial(1).unwrap().result, 1.0);
        assert_eq!(factorial(5).unwrap().result, 120.0);
        assert!(factorial(170).unwrap().result.is_finite());
        assert_eq!(factorial(171).unwrap_err().error_code(), "OVERFLOW");
    }

    #[test]
    fn test_factorial_steps() {
        let steps = factorial_steps(4, 24.0).into_steps();
        assert_eq!(steps, vec!["4! = 4 × 3 × 2 × 1", "4! = 24"]);
        let steps = factorial_steps(0, 1.0).into_steps();
        assert_eq!(steps[0], "0! = 1 by definition");
    }

    #[test]
    fn test_permutations() {
        assert_eq!(permutations(5, 2).unwrap().result, 20.0);
        assert_eq!(permutations(5, 0).unwrap().result, 1.0);
        assert!(permutations(2, 5).is_err());
    }

    #[test]
    fn test_combinations() {
        assert_eq!(combinations(5, 2).unwrap().result, 10.0);
        assert_eq!(combinations(52, 5).unwrap().result, 2_598_960.0);
        assert!(combinations(3, 4).is_err());
    }

    #[test]
    fn test_combinations_symmetry() {
        for n in [0u32, 1, 5, 10, 20, 50, 100, 170] {
            for r in 0..=n {
                assert_eq!(
                    combinations(n, r).unwrap().result,
                    combinations(n, n - r).unwrap().result,
                    "C({n}, {r})"
                );
            }
        }
    }

    #[test]
    fn test_with_repetition() {
        assert_eq!(permutations_with_repetition(3, 2).unwrap().result, 9.0);
        assert_eq!(combinations_with_repetition(3, 2).unwrap().result, 6.0);
        assert!(combinations_with_repetition(0, 2).is_err());
        assert!(permutations_with_repetition(1000, 200).is_err());
    }

    #[test]
    fn test_subsets_and_circular() {
        assert_eq!(number_of_subsets(3).unwrap().result, 8.0);
        assert_eq!(number_of_subsets(0).unwrap().result, 1.0);
        assert!(number_of_subsets(1024).is_err());
        assert_eq!(circular_permutations(4).unwrap().result, 6.0);
        assert!(circular_permutations(0).is_err());
    }

    #[test]
    fn test_indistinguishable() {
        // MISSISSIPPI: 11! / (1! 4! 4! 2!)
        let result = arrangements_with_indistinguishable(11, &[1, 4, 4, 2]).unwrap();
        assert_eq!(result.result, 34_650.0);
        let err = arrangements_with_indistinguishable(10, &[1, 4, 4, 2]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_pascal() {
        let result = pascal_triangle(5).unwrap();
        assert_eq!(result.rows.len(), 5);
        assert_eq!(result.rows[4], vec![1, 4, 6, 4, 1]);
        assert_eq!(result.steps[1], "Row 4 sums to 2^4 = 16");
        assert!(pascal_triangle(0).unwrap().rows.is_empty());
    }

    #[test]
    fn test_pascal_bounds() {
        let result = pascal_triangle(MAX_PASCAL_ROW + 1).unwrap();
        let last = result.rows.last().unwrap();
        assert_eq!(last[1], MAX_PASCAL_ROW as u64);
        assert!(pascal_triangle(MAX_PASCAL_ROW + 2).is_err());
    }
}
