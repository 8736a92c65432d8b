use std::fmt;

use crate::error::CommandError;
use crate::meals::LoggedMeal;
use crate::session::UserProfile;
use crate::workouts::Workout;

/// Dashboard totals are recomputed from the current log on every call; there
/// is no cached aggregate that could go stale.
pub fn total_calories(meals: &[LoggedMeal]) -> i64 {
    meals.iter().map(|m| m.calories).sum()
}

pub fn total_workouts(workouts: &[Workout]) -> usize {
    workouts.len()
}

pub fn bmi_value(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// BMI as the dashboard renders it: one decimal place, `"0"` when the
/// session has no profile.
pub fn bmi_display(profile: Option<&UserProfile>) -> String {
    match profile {
        Some(p) => format!("{:.1}", bmi_value(p.height_cm, p.weight_kg)),
        None => "0".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Fit,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Half-open ladder with inclusive lower bounds: 18.5 is `Fit`, 25.0 is
    /// `Overweight`, 30.0 is `Obese`.
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Fit
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "Underweight",
            Self::Fit => "Fit",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        };
        f.write_str(label)
    }
}

/// Result of the standalone BMI calculator form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

/// Computes a reading from the calculator form. Inputs prefill from the
/// profile but are free-standing; non-positive measurements are rejected.
///
/// The category is taken from the BMI rounded to the one decimal the user
/// sees, so a displayed 18.5 is always `Fit` even when the raw value is a
/// hair below the threshold. `value` keeps the raw precision.
pub fn bmi_reading(height_cm: f64, weight_kg: f64) -> Result<BmiReading, CommandError> {
    if height_cm <= 0.0 {
        return Err(CommandError::InvalidMeasurement("height"));
    }
    if weight_kg <= 0.0 {
        return Err(CommandError::InvalidMeasurement("weight"));
    }
    let value = bmi_value(height_cm, weight_kg);
    let displayed = (value * 10.0).round() / 10.0;
    Ok(BmiReading {
        value,
        category: BmiCategory::classify(displayed),
    })
}
