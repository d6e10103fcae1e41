//! # Step Traces
//!
//! Every solver returns, next to its numbers, an ordered list of display
//! strings narrating the derivation: the formula, the substitution, the
//! intermediate values and the final value. Solvers build that list with a
//! [`StepTrace`], usually inside a dedicated narration function that keeps the prose
//! testable without re-running the numeric work.
//!
//! ```rust
//! use solver_core::steps::StepTrace;
//!
//! let steps = StepTrace::new()
//!     .step("Area = π × r²")
//!     .step("Area = π × 5² = 78.54")
//!     .into_steps();
//! assert_eq!(steps.len(), 2);
//! ```

/// Ordered builder for a derivation trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTrace {
    steps: Vec<String>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, builder style.
    pub fn step(mut self, text: impl Into<String>) -> Self {
        self.steps.push(text.into());
        self
    }

    /// Append a step in place (for loops and conditionals).
    pub fn push(&mut self, text: impl Into<String>) -> &mut Self {
        self.steps.push(text.into());
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last step pushed, usually the final value.
    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

impl From<StepTrace> for Vec<String> {
    fn from(trace: StepTrace) -> Self {
        trace.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let mut trace = StepTrace::new().step("first");
        trace.push("second").push("third");
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.last(), Some("third"));
        assert_eq!(trace.into_steps(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_trace() {
        let trace = StepTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.last(), None);
        let steps: Vec<String> = trace.into();
        assert!(steps.is_empty());
    }
}
