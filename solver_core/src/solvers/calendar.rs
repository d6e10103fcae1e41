//! # Calendar Arithmetic
//!
//! Date differences, age in years/months/days, shifting a date by a number
//! of days, clock-time arithmetic and counting weekdays in a date range.
//!
//! Dates are ISO `YYYY-MM-DD` strings and times are `HH:MM`, parsed here so
//! callers can pass raw form input. Each record carries a `breakdown` that
//! echoes the inputs through the caller's [`DateFormatter`] and reports
//! whether the relevant year is a leap year (reported, never enforced).
//!
//! ## Age algorithm
//!
//! Subtract field by field. A negative day difference borrows one month and
//! adds the length of the month before the reference month; a negative month
//! difference borrows one year. When the birth day does not exist in the
//! borrowed month (born on the 31st, borrowing February) the borrowed days
//! are clamped at zero, so the result is never negative:
//! Jan 31 → Mar 1 is 1 month and 1 day.
//!
//! ```rust
//! use solver_core::locale::Locale;
//! use solver_core::solvers::calendar::calculate_age;
//!
//! let age = calculate_age("1990-01-01", "2024-01-01", &Locale::En).unwrap();
//! assert_eq!((age.years, age.months, age.days), (34, 0, 0));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::locale::DateFormatter;
use crate::steps::StepTrace;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Add or subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => f.write_str("add"),
            Operation::Subtract => f.write_str("subtract"),
        }
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "+" | "plus" => Ok(Operation::Add),
            "subtract" | "sub" | "-" | "minus" => Ok(Operation::Subtract),
            _ => Err(CalcError::parse_error("operation", s, "\"add\" or \"subtract\"")),
        }
    }
}

/// Locale-formatted echo of the input dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBreakdown {
    pub start_formatted: String,
    pub end_formatted: String,
    /// Leap-year flag for the year of the end (or resulting) date
    pub is_leap_year: bool,
}

impl DateBreakdown {
    fn new(start: NaiveDate, end: NaiveDate, formatter: &dyn DateFormatter) -> Self {
        DateBreakdown {
            start_formatted: formatter.format_date(start),
            end_formatted: formatter.format_date(end),
            is_leap_year: is_leap_year(end.year()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaysBetweenResult {
    pub days: i64,
    pub weeks: i64,
    pub remaining_days: i64,
    pub breakdown: DateBreakdown,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeResult {
    pub years: i32,
    pub months: i32,
    pub days: i32,
    pub total_days: i64,
    pub total_weeks: i64,
    pub total_months: i32,
    pub days_until_next_birthday: i64,
    pub breakdown: DateBreakdown,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOperationResult {
    pub original_date: NaiveDate,
    pub result_date: NaiveDate,
    pub days: i64,
    pub operation: Operation,
    pub day_of_week: String,
    pub breakdown: DateBreakdown,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub start: String,
    pub offset: String,
    pub operation: Operation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCalculationResult {
    pub hours: u32,
    pub minutes: u32,
    pub total_minutes: u32,
    /// `HH:MM`
    pub formatted: String,
    /// Midnights crossed: 1 when an addition wraps, -1 when a subtraction does
    pub day_offset: i32,
    pub breakdown: TimeBreakdown,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationDaysResult {
    pub total_days: u32,
    pub weekdays: u32,
    pub weekend_days: u32,
    /// Holidays that fell on a weekday inside the range
    pub holidays_excluded: u32,
    pub working_days: u32,
    pub breakdown: DateBreakdown,
    pub steps: Vec<String>,
}

// =============================================================================
// HELPERS
// =============================================================================

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, raw: &str) -> CalcResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CalcError::parse_error(field, raw, "a valid date in YYYY-MM-DD format"))
}

/// Parse `HH:MM` into minutes after midnight.
pub fn parse_time(field: &str, raw: &str) -> CalcResult<u32> {
    let malformed = || CalcError::parse_error(field, raw, "a time in HH:MM format (00:00 to 23:59)");
    let (h, m) = raw.trim().split_once(':').ok_or_else(malformed)?;
    let digits = |part: &str, widths: std::ops::RangeInclusive<usize>| {
        widths.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !digits(h, 1..=2) || !digits(m, 2..=2) {
        return Err(malformed());
    }
    let hours: u32 = h.parse().map_err(|_| malformed())?;
    let minutes: u32 = m.parse().map_err(|_| malformed())?;
    if hours > 23 || minutes > 59 {
        return Err(malformed());
    }
    Ok(hours * 60 + minutes)
}

fn format_hhmm(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

fn require_ordered(start: NaiveDate, end: NaiveDate, end_field: &str, raw_end: &str) -> CalcResult<()> {
    if end < start {
        return Err(CalcError::invalid_input(
            end_field,
            raw_end,
            format!("Date must not be before {}", start),
        ));
    }
    Ok(())
}

// =============================================================================
// DAYS BETWEEN
// =============================================================================

/// Whole days from `start` to `end`; fails if `end` is before `start`.
pub fn calculate_days_between(start: &str, end: &str, formatter: &dyn DateFormatter) -> CalcResult<DaysBetweenResult> {
    let start_date = parse_date("start_date", start)?;
    let end_date = parse_date("end_date", end)?;
    require_ordered(start_date, end_date, "end_date", end)?;
    log::debug!("calculate_days_between {} -> {}", start_date, end_date);

    let days = (end_date - start_date).num_days();
    let (weeks, remaining_days) = (days / 7, days % 7);

    let steps = StepTrace::new()
        .step(format!("From {} to {}", formatter.format_date(start_date), formatter.format_date(end_date)))
        .step(format!("Difference: {} days", days))
        .step(format!("= {} weeks and {} days", weeks, remaining_days));

    Ok(DaysBetweenResult {
        days,
        weeks,
        remaining_days,
        breakdown: DateBreakdown::new(start_date, end_date, formatter),
        steps: steps.into_steps(),
    })
}

// =============================================================================
// AGE
// =============================================================================

/// Age at `reference` for someone born on `birth`.
pub fn calculate_age(birth: &str, reference: &str, formatter: &dyn DateFormatter) -> CalcResult<AgeResult> {
    let birth_date = parse_date("birth_date", birth)?;
    let ref_date = parse_date("reference_date", reference)?;
    if birth_date > ref_date {
        return Err(CalcError::invalid_input(
            "birth_date",
            birth,
            "Birth date cannot be after the reference date",
        ));
    }
    log::debug!("calculate_age {} at {}", birth_date, ref_date);

    let raw_years = ref_date.year() - birth_date.year();
    let raw_months = ref_date.month() as i32 - birth_date.month() as i32;
    let raw_days = ref_date.day() as i32 - birth_date.day() as i32;

    let (mut years, mut months, mut days) = (raw_years, raw_months, raw_days);
    let mut borrowed_month = None;
    if days < 0 {
        let (prev_year, prev_month) = if ref_date.month() == 1 {
            (ref_date.year() - 1, 12)
        } else {
            (ref_date.year(), ref_date.month() - 1)
        };
        let borrowed = days_in_month(prev_year, prev_month) as i32;
        months -= 1;
        days = (borrowed - birth_date.day() as i32).max(0) + ref_date.day() as i32;
        borrowed_month = Some(borrowed);
    }
    let borrowed_year = months < 0;
    if borrowed_year {
        years -= 1;
        months += 12;
    }

    let total_days = (ref_date - birth_date).num_days();
    let upcoming = next_birthday(birth_date, ref_date);
    let days_until_next_birthday = (upcoming - ref_date).num_days();

    let steps = age_steps(
        (raw_years, raw_months, raw_days),
        borrowed_month,
        borrowed_year,
        (years, months, days),
    );

    Ok(AgeResult {
        years,
        months,
        days,
        total_days,
        total_weeks: total_days / 7,
        total_months: years * 12 + months,
        days_until_next_birthday,
        breakdown: DateBreakdown::new(birth_date, ref_date, formatter),
        steps: steps.into_steps(),
    })
}

/// Next anniversary on or after `reference`; Feb 29 birthdays fall on Feb 28
/// in common years.
fn next_birthday(birth: NaiveDate, reference: NaiveDate) -> NaiveDate {
    let in_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
            .unwrap_or(reference)
    };
    let this_year = in_year(reference.year());
    if this_year >= reference {
        this_year
    } else {
        in_year(reference.year() + 1)
    }
}

fn age_steps(
    raw: (i32, i32, i32),
    borrowed_month: Option<i32>,
    borrowed_year: bool,
    result: (i32, i32, i32),
) -> StepTrace {
    let mut trace = StepTrace::new().step(format!(
        "Subtract field by field: {} years, {} months, {} days",
        raw.0, raw.1, raw.2
    ));
    if let Some(days) = borrowed_month {
        trace.push(format!(
            "Days are negative: borrow 1 month ({} days from the previous month)",
            days
        ));
    }
    if borrowed_year {
        trace.push("Months are negative: borrow 1 year (12 months)");
    }
    trace.push(format!(
        "Age: {} years, {} months, {} days",
        result.0, result.1, result.2
    ));
    trace
}

// =============================================================================
// DATE SHIFT
// =============================================================================

/// Shift `date` by `days` calendar days and report the resulting weekday.
pub fn add_subtract_days(
    date: &str,
    days: i64,
    operation: Operation,
    formatter: &dyn DateFormatter,
) -> CalcResult<DateOperationResult> {
    let original = parse_date("date", date)?;
    log::debug!("add_subtract_days {} {} {}", original, operation.symbol(), days);

    let out_of_range = || CalcError::invalid_input("days", days.to_string(), "Resulting date is out of range");
    let signed = match operation {
        Operation::Add => days,
        Operation::Subtract => days.checked_neg().ok_or_else(out_of_range)?,
    };
    let shifted = if signed >= 0 {
        original.checked_add_days(Days::new(signed as u64))
    } else {
        original.checked_sub_days(Days::new(signed.unsigned_abs()))
    };
    let result_date = shifted.ok_or_else(out_of_range)?;
    let day_of_week = formatter.weekday_name(result_date.weekday());

    let steps = StepTrace::new()
        .step(format!("Start: {}", formatter.format_date(original)))
        .step(format!("{} {} days", operation.symbol(), days))
        .step(format!("Result: {} ({})", formatter.format_date(result_date), day_of_week));

    Ok(DateOperationResult {
        original_date: original,
        result_date,
        days,
        operation,
        day_of_week,
        breakdown: DateBreakdown::new(original, result_date, formatter),
        steps: steps.into_steps(),
    })
}

// =============================================================================
// CLOCK TIME
// =============================================================================

/// Add or subtract two `HH:MM` values on a 24-hour clock, wrapping at
/// midnight in either direction.
pub fn calculate_time_operation(start: &str, offset: &str, operation: Operation) -> CalcResult<TimeCalculationResult> {
    let start_minutes = parse_time("start_time", start)? as i64;
    let offset_minutes = parse_time("offset_time", offset)? as i64;
    log::debug!("calculate_time_operation {} {} {}", start, operation.symbol(), offset);

    let raw = match operation {
        Operation::Add => start_minutes + offset_minutes,
        Operation::Subtract => start_minutes - offset_minutes,
    };
    let normalized = raw.rem_euclid(MINUTES_PER_DAY);
    let day_offset = raw.div_euclid(MINUTES_PER_DAY) as i32;
    let total_minutes = normalized as u32;

    let mut trace = StepTrace::new()
        .step(format!(
            "Convert to minutes: {} = {} min, {} = {} min",
            start.trim(),
            start_minutes,
            offset.trim(),
            offset_minutes
        ))
        .step(format!(
            "{} {} {} = {} min",
            start_minutes,
            operation.symbol(),
            offset_minutes,
            raw
        ));
    if day_offset > 0 {
        trace.push(format!("Past midnight: {} mod 1440 = {} min", raw, normalized));
    } else if day_offset < 0 {
        trace.push(format!("Before midnight: {} + 1440 = {} min", raw, normalized));
    }
    trace.push(format!("Result: {}", format_hhmm(total_minutes)));

    Ok(TimeCalculationResult {
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
        total_minutes,
        formatted: format_hhmm(total_minutes),
        day_offset,
        breakdown: TimeBreakdown {
            start: format_hhmm(start_minutes as u32),
            offset: format_hhmm(offset_minutes as u32),
            operation,
        },
        steps: trace.into_steps(),
    })
}

// =============================================================================
// VACATION DAYS
// =============================================================================

/// Count weekdays and weekend days from `start` to `end`, both inclusive.
pub fn calculate_vacation_days(start: &str, end: &str, formatter: &dyn DateFormatter) -> CalcResult<VacationDaysResult> {
    calculate_vacation_days_with_holidays(start, end, &[], formatter)
}

/// As [`calculate_vacation_days`], also excluding the given `YYYY-MM-DD`
/// holidays from the working-day count when they fall on a weekday.
pub fn calculate_vacation_days_with_holidays(
    start: &str,
    end: &str,
    holidays: &[&str],
    formatter: &dyn DateFormatter,
) -> CalcResult<VacationDaysResult> {
    let start_date = parse_date("start_date", start)?;
    let end_date = parse_date("end_date", end)?;
    require_ordered(start_date, end_date, "end_date", end)?;
    let holiday_dates = holidays
        .iter()
        .map(|raw| parse_date("holiday", raw))
        .collect::<CalcResult<Vec<_>>>()?;
    log::debug!(
        "calculate_vacation_days {} -> {} ({} holidays)",
        start_date,
        end_date,
        holiday_dates.len()
    );

    let (mut weekdays, mut weekend_days, mut holidays_excluded) = (0u32, 0u32, 0u32);
    for day in start_date.iter_days().take_while(|d| *d <= end_date) {
        if day.weekday().number_from_monday() >= 6 {
            weekend_days += 1;
        } else {
            weekdays += 1;
            if holiday_dates.contains(&day) {
                holidays_excluded += 1;
            }
        }
    }
    let total_days = weekdays + weekend_days;
    let working_days = weekdays - holidays_excluded;

    let mut trace = StepTrace::new()
        .step(format!(
            "From {} to {} inclusive: {} days",
            formatter.format_date(start_date),
            formatter.format_date(end_date),
            total_days
        ))
        .step(format!("Weekdays: {}, weekend days: {}", weekdays, weekend_days));
    if holidays_excluded > 0 {
        trace.push(format!("Holidays on weekdays: {}", holidays_excluded));
    }
    trace.push(format!("Working days: {}", working_days));

    Ok(VacationDaysResult {
        total_days,
        weekdays,
        weekend_days,
        holidays_excluded,
        working_days,
        breakdown: DateBreakdown::new(start_date, end_date, formatter),
        steps: trace.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    const EN: &Locale = &Locale::En;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("d", "2024-02-29").is_ok());
        assert_eq!(parse_date("d", "2023-02-29").unwrap_err().error_code(), "PARSE_ERROR");
        assert!(parse_date("d", "yesterday").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("t", "23:30").unwrap(), 1410);
        assert_eq!(parse_time("t", "0:05").unwrap(), 5);
        assert!(parse_time("t", "24:00").is_err());
        assert!(parse_time("t", "12:60").is_err());
        assert!(parse_time("t", "12-30").is_err());
        assert!(parse_time("t", "12:3").is_err());
        assert!(parse_time("t", "12:+5").is_err());
        assert!(parse_time("t", "+1:00").is_err());
        assert!(parse_time("t", "012:00").is_err());
    }

    #[test]
    fn test_days_between() {
        let result = calculate_days_between("2024-01-01", "2024-03-01", EN).unwrap();
        assert_eq!(result.days, 60);
        assert_eq!(result.weeks, 8);
        assert_eq!(result.remaining_days, 4);
        assert!(result.breakdown.is_leap_year);
        assert_eq!(result.breakdown.start_formatted, "January 1, 2024");
        assert!(calculate_days_between("2024-03-01", "2024-01-01", EN).is_err());
    }

    #[test]
    fn test_age() {
        let age = calculate_age("1990-01-01", "2024-01-01", EN).unwrap();
        assert_eq!((age.years, age.months, age.days), (34, 0, 0));
        assert_eq!(age.total_months, 408);
        assert_eq!(age.days_until_next_birthday, 0);
    }

    #[test]
    fn test_age_borrows() {
        let age = calculate_age("2000-05-20", "2024-03-10", EN).unwrap();
        // Borrow from February 2024 (29 days): 10 - 20 + 29 = 19
        assert_eq!((age.years, age.months, age.days), (23, 9, 19));
        assert!(age.steps.iter().any(|s| s.contains("borrow 1 month (29 days")));
        assert!(age.steps.iter().any(|s| s.contains("borrow 1 year")));
    }

    #[test]
    fn test_age_month_end_clamp() {
        let age = calculate_age("2023-01-31", "2023-03-01", EN).unwrap();
        assert_eq!((age.years, age.months, age.days), (0, 1, 1));
    }

    #[test]
    fn test_age_leap_day_birthday() {
        let age = calculate_age("2000-02-29", "2023-03-01", EN).unwrap();
        assert_eq!((age.years, age.months, age.days), (23, 0, 1));
        let age = calculate_age("2000-02-29", "2023-02-01", EN).unwrap();
        assert_eq!(age.days_until_next_birthday, 27);
    }

    #[test]
    fn test_age_never_negative() {
        let start = NaiveDate::from_ymd_opt(2019, 12, 1).unwrap();
        let births: Vec<NaiveDate> = start.iter_days().step_by(17).take(40).collect();
        let refs: Vec<NaiveDate> = start.iter_days().step_by(23).take(60).collect();
        for birth in &births {
            for reference in refs.iter().filter(|r| *r >= birth) {
                let age = calculate_age(&birth.to_string(), &reference.to_string(), EN).unwrap();
                assert!(age.years >= 0 && age.months >= 0 && age.days >= 0, "{birth} -> {reference}");
                assert!(age.months < 12 && age.days <= 31);
            }
        }
    }

    #[test]
    fn test_age_rejects_future_birth() {
        let err = calculate_age("2025-01-01", "2024-01-01", EN).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_add_subtract_days() {
        let result = add_subtract_days("2024-02-28", 2, Operation::Add, EN).unwrap();
        assert_eq!(result.result_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(result.day_of_week, "Friday");

        let result = add_subtract_days("2024-01-10", 15, Operation::Subtract, &Locale::Es).unwrap();
        assert_eq!(result.result_date, NaiveDate::from_ymd_opt(2023, 12, 26).unwrap());
        assert_eq!(result.day_of_week, "martes");
        assert!(!result.breakdown.is_leap_year);

        assert!(add_subtract_days("2024-01-01", i64::MAX, Operation::Add, EN).is_err());
    }

    #[test]
    fn test_time_wraps_past_midnight() {
        let result = calculate_time_operation("23:30", "01:00", Operation::Add).unwrap();
        assert_eq!((result.hours, result.minutes), (0, 30));
        assert_eq!(result.formatted, "00:30");
        assert_eq!(result.day_offset, 1);
    }

    #[test]
    fn test_time_subtract_wraps_back() {
        let result = calculate_time_operation("00:15", "00:30", Operation::Subtract).unwrap();
        assert_eq!((result.hours, result.minutes), (23, 45));
        assert_eq!(result.day_offset, -1);

        let result = calculate_time_operation("10:45", "02:50", Operation::Subtract).unwrap();
        assert_eq!(result.formatted, "07:55");
        assert_eq!(result.day_offset, 0);
    }

    #[test]
    fn test_vacation_days() {
        // Mon 2024-01-01 .. Sun 2024-01-14
        let result = calculate_vacation_days("2024-01-01", "2024-01-14", EN).unwrap();
        assert_eq!(result.total_days, 14);
        assert_eq!(result.weekdays, 10);
        assert_eq!(result.weekend_days, 4);
        assert_eq!(result.working_days, 10);
    }

    #[test]
    fn test_vacation_days_with_holidays() {
        let result = calculate_vacation_days_with_holidays(
            "2024-12-23",
            "2024-12-29",
            &["2024-12-25", "2024-12-28"],
            EN,
        )
        .unwrap();
        assert_eq!(result.weekdays, 5);
        // Dec 28 is a Saturday and does not count
        assert_eq!(result.holidays_excluded, 1);
        assert_eq!(result.working_days, 4);
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!("Add".parse::<Operation>().unwrap(), Operation::Add);
        assert_eq!("-".parse::<Operation>().unwrap(), Operation::Subtract);
        assert!("multiply".parse::<Operation>().is_err());
    }
}
