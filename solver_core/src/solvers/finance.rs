//! # Finance Formulas
//!
//! Simple and compound interest, amortized loan payments and percentages.
//! Money amounts are rounded to cents when the record is built.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::solvers::FormulaResult;
use crate::steps::StepTrace;
use crate::validate::{
    format_number as num, require_finite, require_non_negative, require_non_zero, require_positive, round_to,
};

fn cents(value: f64) -> f64 {
    round_to(value, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestResult {
    pub principal: f64,
    pub interest: f64,
    pub total_amount: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub formula: String,
    pub steps: Vec<String>,
}

/// `I = P × r × t` with `rate_percent` per year and `years`.
pub fn simple_interest(principal: f64, rate_percent: f64, years: f64) -> CalcResult<InterestResult> {
    require_positive("principal", principal)?;
    require_non_negative("rate_percent", rate_percent)?;
    require_non_negative("years", years)?;
    log::debug!("simple_interest P={} r={}% t={}", principal, rate_percent, years);

    let rate = rate_percent / 100.0;
    let interest = principal * rate * years;
    let steps = StepTrace::new()
        .step(format!("r = {}% = {}", num(rate_percent), num(rate)))
        .step(format!(
            "I = P × r × t = {} × {} × {} = {}",
            num(principal),
            num(rate),
            num(years),
            num(cents(interest))
        ))
        .step(format!("Total = P + I = {}", num(cents(principal + interest))));

    Ok(InterestResult {
        principal,
        interest: cents(interest),
        total_amount: cents(principal + interest),
        formula: "I = P × r × t".to_string(),
        steps: steps.into_steps(),
    })
}

/// `A = P (1 + r/n)^(n t)`.
pub fn compound_interest(
    principal: f64,
    rate_percent: f64,
    years: f64,
    periods_per_year: u32,
) -> CalcResult<InterestResult> {
    require_positive("principal", principal)?;
    require_non_negative("rate_percent", rate_percent)?;
    require_non_negative("years", years)?;
    if periods_per_year == 0 {
        return Err(CalcError::invalid_input(
            "periods_per_year",
            "0",
            "Interest must compound at least once per year",
        ));
    }
    log::debug!("compound_interest P={} r={}% t={} n={}", principal, rate_percent, years, periods_per_year);

    let rate = rate_percent / 100.0;
    let n = periods_per_year as f64;
    let growth = (1.0 + rate / n).powf(n * years);
    let total = principal * growth;
    if !total.is_finite() {
        return Err(CalcError::overflow("compound interest", "amounts representable in double precision"));
    }

    let steps = StepTrace::new()
        .step(format!("r = {}% = {}, n = {}, t = {}", num(rate_percent), num(rate), periods_per_year, num(years)))
        .step(format!(
            "A = P(1 + r/n)^(nt) = {} × (1 + {}/{})^({}) = {}",
            num(principal),
            num(rate),
            periods_per_year,
            num(n * years),
            num(cents(total))
        ))
        .step(format!("Interest = A - P = {}", num(cents(total - principal))));

    Ok(InterestResult {
        principal,
        interest: cents(total - principal),
        total_amount: cents(total),
        formula: "A = P(1 + r/n)^(nt)".to_string(),
        steps: steps.into_steps(),
    })
}

/// Fixed monthly payment of an amortized loan:
/// `M = P i / (1 - (1 + i)^-n)` with monthly rate `i`.
pub fn loan_payment(principal: f64, annual_rate_percent: f64, months: u32) -> CalcResult<LoanResult> {
    require_positive("principal", principal)?;
    require_non_negative("annual_rate_percent", annual_rate_percent)?;
    if months == 0 {
        return Err(CalcError::invalid_input("months", "0", "Loan term must be at least one month"));
    }
    log::debug!("loan_payment P={} r={}% n={}", principal, annual_rate_percent, months);

    let i = annual_rate_percent / 100.0 / 12.0;
    let n = months as f64;
    let mut trace = StepTrace::new().step(format!(
        "Monthly rate i = {}% / 12 = {}",
        num(annual_rate_percent),
        num(i)
    ));

    let payment = if i == 0.0 {
        trace.push(format!("Interest-free: M = P / n = {} / {}", num(principal), months));
        principal / n
    } else {
        let payment = principal * i / (1.0 - (1.0 + i).powf(-n));
        trace.push(format!(
            "M = P·i / (1 - (1 + i)^-n) = {} × {} / (1 - (1 + {})^-{})",
            num(principal),
            num(i),
            num(i),
            months
        ));
        payment
    };
    let total_paid = payment * n;
    trace
        .push(format!("M = {}", num(cents(payment))))
        .push(format!("Total paid = M × n = {}", num(cents(total_paid))))
        .push(format!("Total interest = {}", num(cents(total_paid - principal))));

    Ok(LoanResult {
        monthly_payment: cents(payment),
        total_paid: cents(total_paid),
        total_interest: cents(total_paid - principal),
        formula: "M = P·i / (1 - (1 + i)^-n)".to_string(),
        steps: trace.into_steps(),
    })
}

/// `percent`% of `value`.
pub fn percentage_of(percent: f64, value: f64) -> CalcResult<FormulaResult> {
    require_finite("percent", percent)?;
    require_finite("value", value)?;
    let result = percent * value / 100.0;
    Ok(FormulaResult {
        result,
        formula: "p% × V = p / 100 × V".to_string(),
        steps: StepTrace::new()
            .step(format!("{}% of {} = {} / 100 × {}", num(percent), num(value), num(percent), num(value)))
            .step(format!("= {}", num(result)))
            .into_steps(),
    })
}

/// Relative change from `old` to `new`, in percent.
pub fn percentage_change(old: f64, new: f64) -> CalcResult<FormulaResult> {
    require_non_zero("old", old)?;
    require_finite("new", new)?;
    let result = (new - old) / old.abs() * 100.0;
    Ok(FormulaResult {
        result,
        formula: "(new - old) / |old| × 100".to_string(),
        steps: StepTrace::new()
            .step(format!("({} - {}) / {} × 100", num(new), num(old), num(old.abs())))
            .step(format!("= {}%", num(result)))
            .into_steps(),
    })
}
