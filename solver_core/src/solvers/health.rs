//! # Health Formulas
//!
//! Body mass index with the WHO adult categories, and basal metabolic rate
//! by the Mifflin-St Jeor equation. Inputs are typed metric quantities;
//! imperial measurements convert through `From` before the formula runs.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::solvers::FormulaResult;
use crate::steps::StepTrace;
use crate::units::{Centimeters, Inches, Kilograms, Meters, Pounds};
use crate::validate::{format_number as num, require_positive, round_to};

/// WHO adult BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn range(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "below 18.5",
            BmiCategory::Normal => "18.5 to 24.9",
            BmiCategory::Overweight => "25 to 29.9",
            BmiCategory::Obese => "30 or above",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub weight_kg: f64,
    pub height_m: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub formula: String,
    pub steps: Vec<String>,
}

/// BMI = kg / m².
pub fn bmi(weight: Kilograms, height: Centimeters) -> CalcResult<BmiResult> {
    require_positive("weight", weight.value())?;
    require_positive("height", height.value())?;
    log::debug!("bmi weight={}kg height={}cm", weight.value(), height.value());

    let meters: Meters = height.into();
    let value = round_to(weight.value() / (meters.0 * meters.0), 2);
    let category = BmiCategory::from_bmi(value);

    let steps = StepTrace::new()
        .step(format!("Height = {} cm = {} m", num(height.value()), num(meters.0)))
        .step(format!(
            "BMI = {} / {}² = {}",
            num(weight.value()),
            num(meters.0),
            num(value)
        ))
        .step(format!("{} falls in {} ({:?})", num(value), category.range(), category));

    Ok(BmiResult {
        weight_kg: weight.value(),
        height_m: meters.0,
        bmi: value,
        category,
        formula: "BMI = weight (kg) / height (m)²".to_string(),
        steps: steps.into_steps(),
    })
}

/// BMI from pounds and inches.
pub fn bmi_imperial(weight: Pounds, height: Inches) -> CalcResult<BmiResult> {
    require_positive("weight", weight.value())?;
    require_positive("height", height.value())?;

    let kg: Kilograms = weight.into();
    let cm: Centimeters = height.into();
    let mut result = bmi(kg, cm)?;
    result.steps.insert(
        0,
        format!(
            "Convert: {} lb = {} kg, {} in = {} cm",
            num(weight.value()),
            num(kg.value()),
            num(height.value()),
            num(cm.value())
        ),
    );
    Ok(result)
}

/// Mifflin-St Jeor: `10w + 6.25h - 5a + s` kcal/day with `s` = +5 for men
/// and -161 for women.
pub fn bmr(weight: Kilograms, height: Centimeters, age_years: u32, sex: Sex) -> CalcResult<FormulaResult> {
    require_positive("weight", weight.value())?;
    require_positive("height", height.value())?;
    if age_years == 0 {
        return Err(CalcError::invalid_input("age", "0", "Age must be at least one year"));
    }
    log::debug!("bmr weight={} height={} age={} sex={:?}", weight.value(), height.value(), age_years, sex);

    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let base = 10.0 * weight.value() + 6.25 * height.value() - 5.0 * age_years as f64;
    let result = round_to(base + offset, 2);

    let steps = StepTrace::new()
        .step(format!(
            "10 × {} + 6.25 × {} - 5 × {} = {}",
            num(weight.value()),
            num(height.value()),
            age_years,
            num(base)
        ))
        .step(format!("{} {} {} = {} kcal/day", num(base), if offset < 0.0 { "-" } else { "+" }, num(offset.abs()), num(result)));

    Ok(FormulaResult {
        result,
        formula: "BMR = 10w + 6.25h - 5a + s".to_string(),
        steps: steps.into_steps(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bmi_metric() {
        let result = bmi(Kilograms(70.0), Centimeters(175.0)).unwrap();
        assert_eq!(result.bmi, 22.86);
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(result.steps.len(), 3);
    }

    #[test]
    fn test_bmi_imperial_matches_metric() {
        let imperial = bmi_imperial(Pounds(154.0), Inches(69.0)).unwrap();
        assert_relative_eq!(imperial.bmi, 22.74, epsilon = 0.01);
        assert!(imperial.steps[0].starts_with("Convert"));
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_bmi_rejects_zero_height() {
        let err = bmi(Kilograms(70.0), Centimeters(0.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bmr() {
        let male = bmr(Kilograms(70.0), Centimeters(175.0), 30, Sex::Male).unwrap();
        assert_eq!(male.result, 1648.75);
        let female = bmr(Kilograms(70.0), Centimeters(175.0), 30, Sex::Female).unwrap();
        assert_eq!(female.result, 1482.75);
        assert!(bmr(Kilograms(70.0), Centimeters(175.0), 0, Sex::Male).is_err());
    }
}
