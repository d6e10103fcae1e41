//! # solver_core - Calculator Computation Engine
//!
//! `solver_core` is the computational heart of the calculator site: closed-form
//! solvers for algebra, geometry, trigonometry, combinatorics, calendar
//! arithmetic, finance and health formulas. Every solver returns a result
//! record with a `steps` trace explaining the derivation, or a structured
//! [`CalcError`] saying why it could not.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All result records implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types with stable reason codes
//! - **Explained**: Every result carries its step-by-step derivation
//!
//! ## Quick Start
//!
//! ```rust
//! use solver_core::solvers::algebra::solve_quadratic;
//!
//! let result = solve_quadratic(1.0, -3.0, 2.0).unwrap();
//! assert_eq!(result.x1, Some(2.0));
//! assert_eq!(result.x2, Some(1.0));
//!
//! // Serialize to JSON for the presentation layer
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"steps\""));
//! ```
//!
//! ## Modules
//!
//! - [`solvers`] - All calculator solvers, grouped by family
//! - [`validate`] - Raw-input parsing, guards and number formatting
//! - [`steps`] - Step-trace builder shared by the solvers
//! - [`locale`] - Date formatting for the supported languages
//! - [`units`] - Type-safe unit wrappers and unit conversions
//! - [`settings`] - Caller preferences loaded from JSON
//! - [`catalog`] - Static list of calculators
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod errors;
pub mod locale;
pub mod settings;
pub mod solvers;
pub mod steps;
pub mod units;
pub mod validate;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use locale::{DateFormatter, Locale};
pub use settings::Settings;
pub use steps::StepTrace;
