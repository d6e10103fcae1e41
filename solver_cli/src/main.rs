//! # Calculator CLI
//!
//! Thin command-line caller for `solver_core`. Takes a calculator slug from
//! the catalog and its raw inputs, runs the solver, and prints the step trace
//! and the result record. Missing inputs are prompted for.
//!
//! ```text
//! solver_cli [--settings FILE] [--verbose] [--json] [--no-steps]
//!            [--locale CODE] [--angle degrees|radians] <slug> [inputs...]
//! solver_cli list
//! ```
//!
//! Options go before the inputs; everything from the first input on is taken
//! as-is, so negative numbers need no escaping.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use solver_core::catalog::{self, CalculatorEntry, ALL_CATEGORIES};
use solver_core::solvers::{algebra, calendar, combinatorics, finance, geometry, health, trigonometry};
use solver_core::solvers::trigonometry::AngleUnit;
use solver_core::units::{self, Centimeters, Inches, Kilograms, Pounds};
use solver_core::validate::{parse_count, parse_number};
use solver_core::{CalcError, CalcResult, Locale, Settings};

// ============================================================================
// Command Line
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "solver_cli", version, about = "Run a calculator from the catalog")]
struct Cli {
    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Log at debug level regardless of settings
    #[arg(short, long)]
    verbose: bool,

    /// Print the result record as JSON
    #[arg(long)]
    json: bool,

    /// Hide the step trace
    #[arg(long)]
    no_steps: bool,

    /// Locale for formatted dates (en, es, pt, fr, de)
    #[arg(long, value_name = "CODE")]
    locale: Option<Locale>,

    /// Unit of angle inputs
    #[arg(long, value_enum)]
    angle: Option<AngleArg>,

    /// Calculator slug, or `list` to print the catalog
    slug: String,

    /// Raw inputs in the order the calculator asks for them; missing ones are prompted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    inputs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AngleArg {
    #[value(alias = "deg")]
    Degrees,
    #[value(alias = "rad")]
    Radians,
}

impl From<AngleArg> for AngleUnit {
    fn from(arg: AngleArg) -> Self {
        match arg {
            AngleArg::Degrees => AngleUnit::Degrees,
            AngleArg::Radians => AngleUnit::Radians,
        }
    }
}

fn load_settings(path: &Path) -> CalcResult<Settings> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| CalcError::settings_error(display.as_str(), e.to_string()))?;
    Settings::from_json(&contents).map_err(|e| match e {
        CalcError::SettingsError { reason, .. } => CalcError::settings_error(display, reason),
        other => other,
    })
}

fn resolve_settings(cli: &Cli) -> CalcResult<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }
    if let Some(angle) = cli.angle {
        settings.angle_unit = angle.into();
    }
    if cli.json {
        settings.json_output = true;
    }
    if cli.no_steps {
        settings.show_steps = false;
    }
    Ok(settings)
}

// ============================================================================
// Inputs
// ============================================================================

fn prompt_line(prompt: &str) -> String {
    print!("{}: ", prompt);
    if io::stdout().flush().is_err() {
        return String::new();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

/// Parse a lowercase enum name (`sin`, `feet`, `female`, ...) through its serde form.
fn choice<T: DeserializeOwned>(field: &str, raw: &str) -> CalcResult<T> {
    serde_json::from_value(Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| CalcError::parse_error(field, raw, "one of the listed options"))
}

/// Positional inputs, falling back to a prompt when the command line runs out.
struct Inputs {
    queue: VecDeque<String>,
}

impl Inputs {
    fn text(&mut self, name: &str) -> String {
        self.queue.pop_front().unwrap_or_else(|| prompt_line(name))
    }

    fn number(&mut self, name: &str) -> CalcResult<f64> {
        let raw = self.text(name);
        parse_number(name, &raw)
    }

    fn count(&mut self, name: &str) -> CalcResult<u32> {
        let raw = self.text(name);
        parse_count(name, &raw)
    }

    fn whole(&mut self, name: &str) -> CalcResult<i64> {
        let raw = self.text(name);
        raw.trim()
            .parse::<i64>()
            .map_err(|_| CalcError::parse_error(name, raw.as_str(), "a whole number"))
    }

    fn pick<T: DeserializeOwned>(&mut self, name: &str) -> CalcResult<T> {
        let raw = self.text(name);
        choice(name, &raw)
    }

    /// Only taken from the command line, never prompted.
    fn optional_number(&mut self, name: &str) -> CalcResult<Option<f64>> {
        match self.queue.pop_front() {
            Some(raw) => parse_number(name, &raw).map(Some),
            None => Ok(None),
        }
    }

    fn rest(&mut self) -> Vec<String> {
        self.queue.drain(..).collect()
    }
}

// ============================================================================
// Dispatch
// ============================================================================

fn record<T: Serialize>(result: T) -> CalcResult<Value> {
    serde_json::to_value(result).map_err(|e| CalcError::undefined("serialize result", e.to_string()))
}

fn run(entry: &CalculatorEntry, inputs: &mut Inputs, settings: &Settings) -> CalcResult<Value> {
    let locale = &settings.locale;
    match entry.slug {
        // Algebra
        "linear-equation" => record(algebra::solve_linear(inputs.number("a")?, inputs.number("b")?)?),
        "quadratic-equation" => record(algebra::solve_quadratic(
            inputs.number("a")?,
            inputs.number("b")?,
            inputs.number("c")?,
        )?),
        "system-of-equations" => record(algebra::solve_system_2x2(
            inputs.number("a")?,
            inputs.number("b")?,
            inputs.number("c")?,
            inputs.number("d")?,
            inputs.number("e")?,
            inputs.number("f")?,
        )?),
        "factor-quadratic" => record(algebra::factor_quadratic(
            inputs.number("a")?,
            inputs.number("b")?,
            inputs.number("c")?,
        )?),
        "parabola-vertex" => record(algebra::vertex_of_parabola(
            inputs.number("a")?,
            inputs.number("b")?,
            inputs.number("c")?,
        )?),
        "evaluate-expression" => {
            let expression = inputs.text("expression");
            record(algebra::evaluate_expression(&expression, inputs.number("x")?)?)
        }

        // Geometry
        "circle" => record(geometry::calculate_circle(inputs.number("radius")?)?),
        "circle-from-area" => record(geometry::calculate_circle_from_area(inputs.number("area")?)?),
        "circle-from-circumference" => record(geometry::calculate_circle_from_circumference(
            inputs.number("circumference")?,
        )?),
        "rectangle" => record(geometry::calculate_rectangle(inputs.number("length")?, inputs.number("width")?)?),
        "rectangle-from-area" => record(geometry::calculate_rectangle_from_area(
            inputs.number("area")?,
            inputs.number("length")?,
        )?),
        "rectangle-from-perimeter" => record(geometry::calculate_rectangle_from_perimeter(
            inputs.number("perimeter")?,
            inputs.number("length")?,
        )?),
        "square" => record(geometry::calculate_square(inputs.number("side")?)?),
        "square-from-area" => record(geometry::calculate_square_from_area(inputs.number("area")?)?),
        "square-from-perimeter" => record(geometry::calculate_square_from_perimeter(inputs.number("perimeter")?)?),
        "rhombus" => record(geometry::calculate_rhombus(inputs.number("diagonal1")?, inputs.number("diagonal2")?)?),
        "trapezoid" => {
            let (base1, base2, height) = (inputs.number("base1")?, inputs.number("base2")?, inputs.number("height")?);
            let legs = match (inputs.optional_number("leg1")?, inputs.optional_number("leg2")?) {
                (Some(l1), Some(l2)) => Some((l1, l2)),
                (None, None) => None,
                _ => return Err(CalcError::invalid_input("legs", "one value", "Give both legs or neither")),
            };
            record(geometry::calculate_trapezoid(base1, base2, height, legs)?)
        }
        "triangle" => record(geometry::calculate_triangle(inputs.number("base")?, inputs.number("height")?)?),
        "triangle-from-sides" => record(geometry::calculate_triangle_from_sides(
            inputs.number("a")?,
            inputs.number("b")?,
            inputs.number("c")?,
        )?),

        // Trigonometry
        "trig-functions" => {
            let func = inputs.pick("function (sin, cos, tan, cot, sec, csc)")?;
            record(trigonometry::calculate(func, inputs.number("angle")?, settings.angle_unit)?)
        }
        "inverse-trig" => {
            let func = inputs.pick("function (asin, acos, atan)")?;
            record(trigonometry::calculate_inverse(func, inputs.number("value")?, settings.angle_unit)?)
        }
        "angle-converter" => record(trigonometry::convert_angle(inputs.number("value")?, settings.angle_unit)?),
        "hypotenuse" => record(trigonometry::hypotenuse(inputs.number("leg_a")?, inputs.number("leg_b")?)?),
        "cathetus" => record(trigonometry::cathetus(inputs.number("leg")?, inputs.number("hypotenuse")?)?),
        "special-angles" => record(trigonometry::special_angles_table()),

        // Combinatorics
        "factorial" => record(combinatorics::factorial(inputs.count("n")?)?),
        "permutations" => record(combinatorics::permutations(inputs.count("n")?, inputs.count("r")?)?),
        "combinations" => record(combinatorics::combinations(inputs.count("n")?, inputs.count("r")?)?),
        "permutations-with-repetition" => record(combinatorics::permutations_with_repetition(
            inputs.count("n")?,
            inputs.count("r")?,
        )?),
        "combinations-with-repetition" => record(combinatorics::combinations_with_repetition(
            inputs.count("n")?,
            inputs.count("r")?,
        )?),
        "subsets" => record(combinatorics::number_of_subsets(inputs.count("n")?)?),
        "circular-permutations" => record(combinatorics::circular_permutations(inputs.count("n")?)?),
        "multiset-permutations" => {
            let n = inputs.count("n")?;
            let mut groups = inputs
                .rest()
                .iter()
                .map(|raw| parse_count("group", raw))
                .collect::<CalcResult<Vec<u32>>>()?;
            if groups.is_empty() {
                let raw = prompt_line("group sizes (space separated)");
                groups = raw
                    .split_whitespace()
                    .map(|g| parse_count("group", g))
                    .collect::<CalcResult<Vec<u32>>>()?;
            }
            record(combinatorics::arrangements_with_indistinguishable(n, &groups)?)
        }
        "pascal-triangle" => record(combinatorics::pascal_triangle(inputs.count("rows")?)?),

        // Calendar
        "days-between-dates" => {
            let (start, end) = (inputs.text("start (YYYY-MM-DD)"), inputs.text("end (YYYY-MM-DD)"));
            record(calendar::calculate_days_between(&start, &end, locale)?)
        }
        "age" => {
            let (birth, reference) = (inputs.text("birth date (YYYY-MM-DD)"), inputs.text("reference date (YYYY-MM-DD)"));
            record(calendar::calculate_age(&birth, &reference, locale)?)
        }
        "add-subtract-days" => {
            let date = inputs.text("date (YYYY-MM-DD)");
            let operation = inputs.text("operation (add/subtract)").parse::<calendar::Operation>()?;
            record(calendar::add_subtract_days(&date, inputs.whole("days")?, operation, locale)?)
        }
        "time-calculator" => {
            let start = inputs.text("start (HH:MM)");
            let operation = inputs.text("operation (add/subtract)").parse::<calendar::Operation>()?;
            let offset = inputs.text("offset (HH:MM)");
            record(calendar::calculate_time_operation(&start, &offset, operation)?)
        }
        "vacation-days" => {
            let (start, end) = (inputs.text("start (YYYY-MM-DD)"), inputs.text("end (YYYY-MM-DD)"));
            record(calendar::calculate_vacation_days(&start, &end, locale)?)
        }
        "vacation-days-with-holidays" => {
            let (start, end) = (inputs.text("start (YYYY-MM-DD)"), inputs.text("end (YYYY-MM-DD)"));
            let holidays = inputs.rest();
            let holidays: Vec<&str> = holidays.iter().map(String::as_str).collect();
            record(calendar::calculate_vacation_days_with_holidays(&start, &end, &holidays, locale)?)
        }

        // Finance
        "simple-interest" => record(finance::simple_interest(
            inputs.number("principal")?,
            inputs.number("rate (%)")?,
            inputs.number("years")?,
        )?),
        "compound-interest" => record(finance::compound_interest(
            inputs.number("principal")?,
            inputs.number("rate (%)")?,
            inputs.number("years")?,
            inputs.count("periods per year")?,
        )?),
        "loan-payment" => record(finance::loan_payment(
            inputs.number("principal")?,
            inputs.number("annual rate (%)")?,
            inputs.count("months")?,
        )?),
        "percentage" => record(finance::percentage_of(inputs.number("percent")?, inputs.number("value")?)?),
        "percentage-change" => record(finance::percentage_change(inputs.number("old")?, inputs.number("new")?)?),

        // Health
        "bmi" => record(health::bmi(
            Kilograms(inputs.number("weight (kg)")?),
            Centimeters(inputs.number("height (cm)")?),
        )?),
        "bmi-imperial" => record(health::bmi_imperial(
            Pounds(inputs.number("weight (lb)")?),
            Inches(inputs.number("height (in)")?),
        )?),
        "bmr" => record(health::bmr(
            Kilograms(inputs.number("weight (kg)")?),
            Centimeters(inputs.number("height (cm)")?),
            inputs.count("age")?,
            inputs.pick("sex (male/female)")?,
        )?),

        // Conversion
        "length-converter" => {
            let value = inputs.number("value")?;
            record(units::convert_length(value, inputs.pick("from unit")?, inputs.pick("to unit")?)?)
        }
        "weight-converter" => {
            let value = inputs.number("value")?;
            record(units::convert_mass(value, inputs.pick("from unit")?, inputs.pick("to unit")?)?)
        }
        "temperature-converter" => {
            let value = inputs.number("value")?;
            record(units::convert_temperature(value, inputs.pick("from unit")?, inputs.pick("to unit")?)?)
        }

        other => Err(CalcError::parse_error("calculator", other, "a catalog slug")),
    }
}

// ============================================================================
// Output
// ============================================================================

fn print_catalog() {
    for category in ALL_CATEGORIES {
        println!("{}", category.display_name());
        for entry in catalog::by_category(*category) {
            println!("  {:<32} {}", entry.slug, entry.title);
        }
        println!();
    }
}

fn print_result(entry: &CalculatorEntry, result: &Value, settings: &Settings) {
    println!("═══════════════════════════════════════");
    println!("  {}", entry.title.to_uppercase());
    println!("═══════════════════════════════════════");

    if settings.show_steps {
        if let Some(steps) = result.get("steps").and_then(Value::as_array) {
            println!();
            println!("Steps:");
            for (i, step) in steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step.as_str().unwrap_or_default());
            }
        }
    }

    println!();
    if settings.json_output {
        println!("JSON Output:");
        if let Ok(json) = serde_json::to_string_pretty(result) {
            println!("{}", json);
        }
    } else if let Some(fields) = result.as_object() {
        println!("Result:");
        for (key, value) in fields.iter().filter(|(k, _)| k.as_str() != "steps") {
            println!("  {}: {}", key, value);
        }
    } else if let Ok(json) = serde_json::to_string_pretty(result) {
        println!("{}", json);
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() {
    let cli = Cli::parse();

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            report_error(&e);
            std::process::exit(2);
        }
    };

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        settings.level_filter().unwrap_or(LevelFilter::Warn)
    };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if cli.slug == "list" {
        print_catalog();
        return;
    }

    let Some(entry) = catalog::find(&cli.slug) else {
        report_error(&CalcError::parse_error(
            "calculator",
            cli.slug.as_str(),
            "a catalog slug (see `solver_cli list`)",
        ));
        std::process::exit(2);
    };
    log::debug!("running {} via {}", entry.slug, entry.solver);

    let mut inputs = Inputs { queue: cli.inputs.into() };
    match run(entry, &mut inputs, &settings) {
        Ok(result) => print_result(entry, &result, &settings),
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_and_positionals() {
        let cli = Cli::try_parse_from(["solver_cli", "--json", "-v", "circle", "--locale", "es", "3"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.locale, Some(Locale::Es));
        assert_eq!(cli.slug, "circle");
        assert_eq!(cli.inputs, vec!["3".to_string()]);
    }

    #[test]
    fn test_cli_missing_flag_value() {
        assert!(Cli::try_parse_from(["solver_cli", "--settings"]).is_err());
        assert!(Cli::try_parse_from(["solver_cli", "--json"]).is_err());
    }

    #[test]
    fn test_cli_negative_inputs() {
        let cli = Cli::try_parse_from(["solver_cli", "linear-equation", "-2", "-8"]).unwrap();
        assert_eq!(cli.inputs, vec!["-2".to_string(), "-8".to_string()]);
    }

    #[test]
    fn test_cli_angle_and_locale_values() {
        let cli = Cli::try_parse_from(["solver_cli", "--angle", "rad", "trig-functions"]).unwrap();
        let settings = resolve_settings(&cli).unwrap();
        assert_eq!(settings.angle_unit, AngleUnit::Radians);
        assert!(settings.show_steps);

        assert!(Cli::try_parse_from(["solver_cli", "--angle", "gradians", "trig-functions"]).is_err());
        assert!(Cli::try_parse_from(["solver_cli", "--locale", "xx", "age"]).is_err());
    }

    #[test]
    fn test_missing_settings_file() {
        let cli = Cli::try_parse_from(["solver_cli", "--settings", "/nonexistent/solver-settings.json", "circle"])
            .unwrap();
        match resolve_settings(&cli).unwrap_err() {
            CalcError::SettingsError { path, .. } => assert!(path.contains("solver-settings.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_settings_file_errors_name_the_file() {
        let path = std::env::temp_dir().join(format!("solver-cli-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "locale": "de", "log_level": "loud" }"#).unwrap();
        let err = load_settings(&path).unwrap_err();
        fs::write(&path, r#"{ "locale": "de" }"#).unwrap();
        let settings = load_settings(&path).unwrap();
        fs::remove_file(&path).unwrap();

        match err {
            CalcError::SettingsError { path: shown, .. } => assert!(shown.contains("solver-cli-settings-")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(settings.locale, Locale::De);
    }

    #[test]
    fn test_choice_parses_enum_names() {
        let unit: units::LengthUnit = choice("from", "Feet").unwrap();
        assert_eq!(unit, units::LengthUnit::Feet);
        assert!(choice::<units::LengthUnit>("from", "furlongs").is_err());
    }

    #[test]
    fn test_every_catalog_entry_dispatches() {
        // Enough numeric inputs for any calculator; failures must be solver
        // errors, never the unknown-slug fallback.
        for entry in solver_core::catalog::ALL_CALCULATORS {
            let mut inputs = Inputs {
                queue: ["1", "1", "1", "1", "1", "1"].iter().map(|s| s.to_string()).collect(),
            };
            if let Err(CalcError::ParseError { field, .. }) = run(entry, &mut inputs, &Settings::default()) {
                assert_ne!(field, "calculator", "{} is not dispatched", entry.slug);
            }
        }
    }

    #[test]
    fn test_run_circle() {
        let entry = catalog::find("circle").unwrap();
        let mut inputs = Inputs { queue: VecDeque::from(vec!["2".to_string()]) };
        let result = run(entry, &mut inputs, &Settings::default()).unwrap();
        assert_eq!(result["area"], 12.57);
    }
}
