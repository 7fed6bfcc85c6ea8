// ABOUTME: Strict normalization of loosely typed model output into typed meal plans
// ABOUTME: Coerces numerics to non-negative integers and bounds ingredient lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Meal Plan Normalization
//!
//! The generation service returns loosely structured JSON. This module is
//! the only place that shape is allowed to exist: it runs the untyped
//! payload through a strict normalization into a fully typed [`MealPlan`],
//! and nothing downstream ever sees the untyped form.
//!
//! Normalizing an already-canonical plan is idempotent.

use crate::models::{Meal, MealPlan};
use serde_json::Value;

/// Maximum ingredient entries kept per meal
pub const MAX_MEAL_INGREDIENTS: usize = 40;

/// Fallback meal name when the model omits one
const DEFAULT_MEAL_NAME: &str = "Meal";

/// Coerce a JSON value to a non-negative integer; missing or invalid ⇒ 0
fn coerce_non_negative(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() && n > 0.0 => n.round() as u32,
        _ => 0,
    }
}

/// String field with a fallback for missing/non-string values
fn coerce_str(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
}

/// Ingredient list filtered to strings and capped at [`MAX_MEAL_INGREDIENTS`]
fn coerce_ingredients(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_str)
        .take(MAX_MEAL_INGREDIENTS)
        .map(ToOwned::to_owned)
        .collect()
}

/// Normalize a single meal object
#[must_use]
pub fn normalize_meal(value: &Value) -> Meal {
    Meal {
        name: coerce_str(value.get("name"), DEFAULT_MEAL_NAME),
        description: coerce_str(value.get("description"), ""),
        prep_time_minutes: coerce_non_negative(value.get("prep_time_minutes")),
        calories: coerce_non_negative(value.get("calories")),
        protein_g: coerce_non_negative(value.get("protein_g")),
        carbs_g: coerce_non_negative(value.get("carbs_g")),
        fats_g: coerce_non_negative(value.get("fats_g")),
        ingredients: coerce_ingredients(value.get("ingredients")),
        instructions: coerce_str(value.get("instructions"), ""),
    }
}

/// Normalize a full meal plan payload
#[must_use]
pub fn normalize_meal_plan(value: &Value) -> MealPlan {
    let meals = match value.get("meals") {
        Some(Value::Array(items)) => items.iter().map(normalize_meal).collect(),
        _ => Vec::new(),
    };
    MealPlan {
        summary: coerce_str(value.get("summary"), ""),
        estimated_total_calories: coerce_non_negative(value.get("estimated_total_calories")),
        meals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_invalid_numerics_default_to_zero() {
        let meal = normalize_meal(&json!({
            "name": "Lunch",
            "calories": "not a number",
            "protein_g": -12,
            "carbs_g": null
        }));
        assert_eq!(meal.calories, 0);
        assert_eq!(meal.protein_g, 0);
        assert_eq!(meal.carbs_g, 0);
        assert_eq!(meal.fats_g, 0);
    }

    #[test]
    fn test_numeric_strings_and_floats_are_rounded() {
        let meal = normalize_meal(&json!({
            "calories": "420",
            "protein_g": 31.6
        }));
        assert_eq!(meal.calories, 420);
        assert_eq!(meal.protein_g, 32);
    }

    #[test]
    fn test_missing_text_defaults_and_meal_name_fallback() {
        let meal = normalize_meal(&json!({}));
        assert_eq!(meal.name, "Meal");
        assert_eq!(meal.description, "");
        assert_eq!(meal.instructions, "");
        assert!(meal.ingredients.is_empty());
    }

    #[test]
    fn test_non_string_ingredients_filtered_and_capped() {
        let mut raw: Vec<Value> = (0..50).map(|i| json!(format!("item {i}"))).collect();
        raw.insert(0, json!(99));
        let meal = normalize_meal(&json!({ "ingredients": raw }));
        assert_eq!(meal.ingredients.len(), MAX_MEAL_INGREDIENTS);
        assert_eq!(meal.ingredients[0], "item 0");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let plan = normalize_meal_plan(&json!({
            "summary": "A balanced day",
            "estimated_total_calories": 2400,
            "meals": [{
                "name": "Breakfast",
                "description": "Oats with banana",
                "prep_time_minutes": 10,
                "calories": 450,
                "protein_g": 25,
                "carbs_g": 60,
                "fats_g": 12,
                "ingredients": ["oats", "banana", "milk"],
                "instructions": "Cook oats, slice banana."
            }]
        }));
        let reencoded = serde_json::to_value(&plan).unwrap();
        let renormalized = normalize_meal_plan(&reencoded);
        assert_eq!(plan, renormalized);
    }

    #[test]
    fn test_meals_missing_or_wrong_type_yield_empty_plan() {
        let plan = normalize_meal_plan(&json!({ "summary": "x", "meals": "oops" }));
        assert!(plan.meals.is_empty());
    }
}
