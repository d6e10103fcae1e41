//! # Calculator Catalog
//!
//! Static list of every calculator the library backs: its URL slug, the
//! family it belongs to, the solver function that computes it, its English
//! title and the locales it is translated into.
//!
//! The catalog is pure data. Presentation layers use it to build menus and
//! sitemaps; `gen-catalog` renders it to `CATALOG.md`.
//!
//! ```rust
//! use solver_core::catalog::{find, Category};
//!
//! let entry = find("quadratic-equation").unwrap();
//! assert_eq!(entry.category, Category::Algebra);
//! assert_eq!(entry.solver, "algebra::solve_quadratic");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::locale::{Locale, ALL_LOCALES};

// ============================================================================
// Categories
// ============================================================================

/// Calculator families, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Algebra,
    Geometry,
    Trigonometry,
    Combinatorics,
    Calendar,
    Finance,
    Health,
    Conversion,
}

pub const ALL_CATEGORIES: &[Category] = &[
    Category::Algebra,
    Category::Geometry,
    Category::Trigonometry,
    Category::Combinatorics,
    Category::Calendar,
    Category::Finance,
    Category::Health,
    Category::Conversion,
];

impl Category {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Algebra => "Algebra",
            Category::Geometry => "Geometry",
            Category::Trigonometry => "Trigonometry",
            Category::Combinatorics => "Combinatorics",
            Category::Calendar => "Calendar",
            Category::Finance => "Finance",
            Category::Health => "Health",
            Category::Conversion => "Unit Conversion",
        }
    }
}

// ============================================================================
// Entries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculatorEntry {
    pub slug: &'static str,
    pub category: Category,
    /// Module-qualified solver function, e.g. `geometry::calculate_circle`
    pub solver: &'static str,
    pub title: &'static str,
    pub locales: &'static [Locale],
}

const EN_ES: &[Locale] = &[Locale::En, Locale::Es];

macro_rules! entry {
    ($slug:literal, $cat:ident, $solver:literal, $title:literal) => {
        entry!($slug, $cat, $solver, $title, ALL_LOCALES)
    };
    ($slug:literal, $cat:ident, $solver:literal, $title:literal, $locales:expr) => {
        CalculatorEntry {
            slug: $slug,
            category: Category::$cat,
            solver: $solver,
            title: $title,
            locales: $locales,
        }
    };
}

pub static ALL_CALCULATORS: &[CalculatorEntry] = &[
    // Algebra
    entry!("linear-equation", Algebra, "algebra::solve_linear", "Linear Equation Solver"),
    entry!("quadratic-equation", Algebra, "algebra::solve_quadratic", "Quadratic Equation Solver"),
    entry!("system-of-equations", Algebra, "algebra::solve_system_2x2", "2x2 System of Equations"),
    entry!("factor-quadratic", Algebra, "algebra::factor_quadratic", "Quadratic Factoring", EN_ES),
    entry!("parabola-vertex", Algebra, "algebra::vertex_of_parabola", "Vertex of a Parabola", EN_ES),
    entry!("evaluate-expression", Algebra, "algebra::evaluate_expression", "Expression Evaluator", EN_ES),
    // Geometry
    entry!("circle", Geometry, "geometry::calculate_circle", "Circle Calculator"),
    entry!("circle-from-area", Geometry, "geometry::calculate_circle_from_area", "Circle from Area", EN_ES),
    entry!(
        "circle-from-circumference",
        Geometry,
        "geometry::calculate_circle_from_circumference",
        "Circle from Circumference",
        EN_ES
    ),
    entry!("rectangle", Geometry, "geometry::calculate_rectangle", "Rectangle Calculator"),
    entry!("rectangle-from-area", Geometry, "geometry::calculate_rectangle_from_area", "Rectangle from Area", EN_ES),
    entry!(
        "rectangle-from-perimeter",
        Geometry,
        "geometry::calculate_rectangle_from_perimeter",
        "Rectangle from Perimeter",
        EN_ES
    ),
    entry!("square", Geometry, "geometry::calculate_square", "Square Calculator"),
    entry!("square-from-area", Geometry, "geometry::calculate_square_from_area", "Square from Area", EN_ES),
    entry!("square-from-perimeter", Geometry, "geometry::calculate_square_from_perimeter", "Square from Perimeter", EN_ES),
    entry!("rhombus", Geometry, "geometry::calculate_rhombus", "Rhombus Calculator"),
    entry!("trapezoid", Geometry, "geometry::calculate_trapezoid", "Trapezoid Calculator"),
    entry!("triangle", Geometry, "geometry::calculate_triangle", "Triangle Area Calculator"),
    entry!("triangle-from-sides", Geometry, "geometry::calculate_triangle_from_sides", "Triangle from Three Sides"),
    // Trigonometry
    entry!("trig-functions", Trigonometry, "trigonometry::calculate", "Trigonometric Functions"),
    entry!("inverse-trig", Trigonometry, "trigonometry::calculate_inverse", "Inverse Trigonometric Functions"),
    entry!("angle-converter", Trigonometry, "trigonometry::convert_angle", "Degrees and Radians Converter"),
    entry!("hypotenuse", Trigonometry, "trigonometry::hypotenuse", "Pythagorean Theorem: Hypotenuse"),
    entry!("cathetus", Trigonometry, "trigonometry::cathetus", "Pythagorean Theorem: Leg", EN_ES),
    entry!("special-angles", Trigonometry, "trigonometry::special_angles_table", "Special Angles Table"),
    // Combinatorics
    entry!("factorial", Combinatorics, "combinatorics::factorial", "Factorial Calculator"),
    entry!("permutations", Combinatorics, "combinatorics::permutations", "Permutations nPr"),
    entry!("combinations", Combinatorics, "combinatorics::combinations", "Combinations nCr"),
    entry!(
        "permutations-with-repetition",
        Combinatorics,
        "combinatorics::permutations_with_repetition",
        "Permutations with Repetition"
    ),
    entry!(
        "combinations-with-repetition",
        Combinatorics,
        "combinatorics::combinations_with_repetition",
        "Combinations with Repetition"
    ),
    entry!("subsets", Combinatorics, "combinatorics::number_of_subsets", "Number of Subsets", EN_ES),
    entry!(
        "circular-permutations",
        Combinatorics,
        "combinatorics::circular_permutations",
        "Circular Permutations",
        EN_ES
    ),
    entry!(
        "multiset-permutations",
        Combinatorics,
        "combinatorics::arrangements_with_indistinguishable",
        "Arrangements with Identical Items",
        EN_ES
    ),
    entry!("pascal-triangle", Combinatorics, "combinatorics::pascal_triangle", "Pascal's Triangle"),
    // Calendar
    entry!("days-between-dates", Calendar, "calendar::calculate_days_between", "Days Between Dates"),
    entry!("age", Calendar, "calendar::calculate_age", "Age Calculator"),
    entry!("add-subtract-days", Calendar, "calendar::add_subtract_days", "Add or Subtract Days"),
    entry!("time-calculator", Calendar, "calendar::calculate_time_operation", "Time Calculator"),
    entry!("vacation-days", Calendar, "calendar::calculate_vacation_days", "Vacation Days Counter"),
    entry!(
        "vacation-days-with-holidays",
        Calendar,
        "calendar::calculate_vacation_days_with_holidays",
        "Working Days Excluding Holidays",
        EN_ES
    ),
    // Finance
    entry!("simple-interest", Finance, "finance::simple_interest", "Simple Interest"),
    entry!("compound-interest", Finance, "finance::compound_interest", "Compound Interest"),
    entry!("loan-payment", Finance, "finance::loan_payment", "Loan Payment Calculator"),
    entry!("percentage", Finance, "finance::percentage_of", "Percentage Calculator"),
    entry!("percentage-change", Finance, "finance::percentage_change", "Percentage Change"),
    // Health
    entry!("bmi", Health, "health::bmi", "BMI Calculator"),
    entry!("bmi-imperial", Health, "health::bmi_imperial", "BMI Calculator (lb/in)", EN_ES),
    entry!("bmr", Health, "health::bmr", "Basal Metabolic Rate"),
    // Conversion
    entry!("length-converter", Conversion, "units::convert_length", "Length Converter"),
    entry!("weight-converter", Conversion, "units::convert_mass", "Weight Converter"),
    entry!("temperature-converter", Conversion, "units::convert_temperature", "Temperature Converter"),
];

static BY_SLUG: Lazy<HashMap<&'static str, &'static CalculatorEntry>> =
    Lazy::new(|| ALL_CALCULATORS.iter().map(|e| (e.slug, e)).collect());

/// Look up a calculator by its slug.
pub fn find(slug: &str) -> Option<&'static CalculatorEntry> {
    BY_SLUG.get(slug).copied()
}

/// All calculators in a category, in catalog order.
pub fn by_category(category: Category) -> Vec<&'static CalculatorEntry> {
    ALL_CALCULATORS.iter().filter(|e| e.category == category).collect()
}

/// All calculators translated into `locale`.
pub fn for_locale(locale: Locale) -> Vec<&'static CalculatorEntry> {
    ALL_CALCULATORS.iter().filter(|e| e.locales.contains(&locale)).collect()
}

/// Render the catalog as a Markdown reference.
///
/// ```rust
/// use solver_core::catalog::generate_catalog_markdown;
///
/// let markdown = generate_catalog_markdown();
/// assert!(markdown.contains("# Calculator Catalog"));
/// assert!(markdown.contains("## Trigonometry"));
/// ```
pub fn generate_catalog_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Calculator Catalog

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

"#,
    );

    for category in ALL_CATEGORIES {
        let entries = by_category(*category);
        if entries.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));
        output.push_str("| Slug | Title | Solver | Locales |\n");
        output.push_str("|------|-------|--------|---------|\n");
        for entry in entries {
            let locales: Vec<&str> = entry.locales.iter().map(|l| l.code()).collect();
            output.push_str(&format!(
                "| `{}` | {} | `{}` | {} |\n",
                entry.slug,
                entry.title,
                entry.solver,
                locales.join(", ")
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("---\n\n*{} calculators total.*\n", ALL_CALCULATORS.len()));
    output
}
