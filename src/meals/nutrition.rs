use uuid::Uuid;

use super::templates::MealTemplate;
use super::LoggedMeal;

/// Scales a per-100 g rate to an absolute value for `amount_grams`.
///
/// Rounding is `f64::round`, i.e. half away from zero, so a template of
/// 3.6 g fat per 100 g logged at 150 g yields 5 g.
pub fn scale(rate_per_100g: f64, amount_grams: f64) -> i64 {
    (rate_per_100g * amount_grams / 100.0).round() as i64
}

/// Builds the logged-meal snapshot for `amount_grams` of a template.
///
/// Pure: same template and amount always produce the same macros. The caller
/// has already validated that the amount is positive.
pub fn derive_meal(template: &MealTemplate, amount_grams: f64, id: Uuid) -> LoggedMeal {
    LoggedMeal {
        id,
        template_id: template.id,
        name: template.name.clone(),
        calories: scale(template.calories_per_100g, amount_grams),
        protein: scale(template.protein_per_100g, amount_grams),
        carbs: scale(template.carbs_per_100g, amount_grams),
        fat: scale(template.fat_per_100g, amount_grams),
        amount_grams,
    }
}
