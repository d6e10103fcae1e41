//! # Error Types
//!
//! Structured error types for solver_core. Every solver returns a
//! [`CalcResult`]; a failed call produces no result record, only one of these
//! errors. The `Display` text is written to be shown to the end user verbatim,
//! and the serialized form carries a stable reason code for programmatic use.
//!
//! ## Example
//!
//! ```rust
//! use solver_core::errors::{CalcError, CalcResult};
//!
//! fn validate_radius(radius: f64) -> CalcResult<()> {
//!     if radius <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "radius",
//!             radius.to_string(),
//!             "Radius must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_radius(-1.0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for solver_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for solver operations.
///
/// Variants fall into two families: domain-validation failures (bad or
/// out-of-range inputs) and undefined-operation failures (singular points,
/// overflow). See [`CalcError::is_domain_error`].
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside the solver's domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A raw string input could not be parsed
    #[error("Could not parse '{field}': \"{value}\" is not {expected}")]
    ParseError {
        field: String,
        value: String,
        expected: String,
    },

    /// The equation or system has no solution
    #[error("No solution: {problem} - {reason}")]
    NoSolution { problem: String, reason: String },

    /// Every value satisfies the equation
    #[error("Infinite solutions: {problem} holds for every value")]
    InfiniteSolutions { problem: String },

    /// The operation is mathematically undefined at the given input
    #[error("Undefined: {operation} - {reason}")]
    Undefined { operation: String, reason: String },

    /// The result would exceed what an f64 (or u64) can represent
    #[error("Overflow: {operation} is limited to {limit}")]
    Overflow { operation: String, limit: String },

    /// Settings file could not be read or parsed
    #[error("Settings error in '{path}': {reason}")]
    SettingsError { path: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        CalcError::ParseError {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a NoSolution error
    pub fn no_solution(problem: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::NoSolution {
            problem: problem.into(),
            reason: reason.into(),
        }
    }

    /// Create an InfiniteSolutions error
    pub fn infinite_solutions(problem: impl Into<String>) -> Self {
        CalcError::InfiniteSolutions {
            problem: problem.into(),
        }
    }

    /// Create an Undefined error
    pub fn undefined(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Undefined {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create an Overflow error
    pub fn overflow(operation: impl Into<String>, limit: impl Into<String>) -> Self {
        CalcError::Overflow {
            operation: operation.into(),
            limit: limit.into(),
        }
    }

    /// Create a SettingsError
    pub fn settings_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::SettingsError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for domain-validation failures (the caller supplied something
    /// outside the solver's domain), false for undefined-operation failures.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::ParseError { .. }
                | CalcError::NoSolution { .. }
                | CalcError::InfiniteSolutions { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ParseError { .. } => "PARSE_ERROR",
            CalcError::NoSolution { .. } => "NO_SOLUTION",
            CalcError::InfiniteSolutions { .. } => "INFINITE_SOLUTIONS",
            CalcError::Undefined { .. } => "UNDEFINED",
            CalcError::Overflow { .. } => "OVERFLOW",
            CalcError::SettingsError { .. } => "SETTINGS_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("radius", "-5", "Radius must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::parse_error("a", "abc", "a number").error_code(), "PARSE_ERROR");
        assert_eq!(CalcError::infinite_solutions("0x + 0 = 0").error_code(), "INFINITE_SOLUTIONS");
        assert_eq!(CalcError::overflow("factorial", "n <= 170").error_code(), "OVERFLOW");
    }

    #[test]
    fn test_error_taxonomy() {
        assert!(CalcError::no_solution("system", "determinant is zero").is_domain_error());
        assert!(!CalcError::undefined("cot(0°)", "sin is zero").is_domain_error());
        assert!(!CalcError::overflow("factorial", "n <= 170").is_domain_error());
    }

    #[test]
    fn test_display_message() {
        let err = CalcError::parse_error("a", "abc", "a number");
        assert_eq!(err.to_string(), "Could not parse 'a': \"abc\" is not a number");
    }
}
