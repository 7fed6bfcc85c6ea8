// ABOUTME: Request validation for plan generation endpoints
// ABOUTME: Coerces loosely typed JSON and collects every field error before failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Request Validation
//!
//! The boundary between loosely typed JSON and the typed engine. Numeric
//! fields may arrive as numbers or numeric strings and are coerced; every
//! failing field is collected so the caller can render all problems at once.
//! Validation runs before any catalog or generation call, so a bad request
//! never costs an external round trip.

use crate::errors::{AppError, AppResult};
use crate::models::{BodyMetrics, Gender, Goal};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Maximum number of pantry ingredients accepted per request
pub const MAX_INGREDIENTS: usize = 25;

/// Maximum length of a single ingredient after normalization
pub const MAX_INGREDIENT_LEN: usize = 40;

/// Minimum length of a single ingredient after normalization
const MIN_INGREDIENT_LEN: usize = 2;

/// A fully validated meal plan request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanRequest {
    /// Validated body metrics
    pub metrics: BodyMetrics,
    /// Weight goal (unrecognized values fall back to maintain)
    pub goal: Goal,
    /// Per-meal preparation time ceiling in minutes
    pub prep_time_minutes: u32,
    /// Normalized pantry ingredients: lowercased, trimmed, de-duplicated
    pub ingredients: Vec<String>,
}

/// Coerce a JSON value (number or numeric string) to a rounded integer
/// within `[min, max]`; anything else is `None`
fn coerce_int(value: Option<&Value>, min: i64, max: i64) -> Option<i64> {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64()?,
        Some(Value::String(s)) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    let rounded = n.round() as i64;
    (min..=max).contains(&rounded).then_some(rounded)
}

/// Normalize a user-supplied ingredient list
///
/// Items are lowercased, trimmed, stripped of punctuation, whitespace
/// collapsed, bounded in length, de-duplicated, and capped at
/// [`MAX_INGREDIENTS`]. Non-string entries are dropped silently.
#[must_use]
pub fn clean_ingredients(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let Value::String(raw) = item else { continue };
        let lowered = raw.trim().to_lowercase();
        let stripped: String = lowered
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
            .collect();
        let normalized = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.len() < MIN_INGREDIENT_LEN || normalized.len() > MAX_INGREDIENT_LEN {
            continue;
        }
        if !seen.insert(normalized.clone()) {
            continue;
        }
        out.push(normalized);
        if out.len() >= MAX_INGREDIENTS {
            break;
        }
    }
    out
}

/// Pull a field by its primary name, falling back to an alias
fn field<'a>(body: &'a Value, name: &str, alias: &str) -> Option<&'a Value> {
    body.get(name).or_else(|| body.get(alias))
}

/// Validate a raw meal plan request body
///
/// # Errors
///
/// Returns a validation error listing **every** failing field; the caller
/// must not attempt any external call when this fails.
pub fn validate_meal_request(body: &Value) -> AppResult<MealPlanRequest> {
    let mut errors = Vec::new();

    let weight = coerce_int(field(body, "weightLbs", "weight"), 60, 450);
    if weight.is_none() {
        errors.push("Weight (lbs) must be a number between 60 and 450.".to_owned());
    }

    let age = coerce_int(body.get("age"), 13, 80);
    if age.is_none() {
        errors.push("Age must be a number between 13 and 80.".to_owned());
    }

    let height = coerce_int(field(body, "heightCm", "height"), 120, 225);
    if height.is_none() {
        errors.push("Height (cm) must be a number between 120 and 225.".to_owned());
    }

    let prep_time = coerce_int(body.get("prepTimeMinutes"), 5, 180);
    if prep_time.is_none() {
        errors.push("Prep time limit must be between 5 and 180 minutes.".to_owned());
    }

    let gender = field(body, "gender", "sex")
        .and_then(Value::as_str)
        .and_then(Gender::parse);
    if gender.is_none() {
        errors.push("Gender must be \"male\" or \"female\".".to_owned());
    }

    let goal = Goal::parse_or_default(body.get("goal").and_then(Value::as_str));

    let ingredients = clean_ingredients(body.get("ingredients"));
    if ingredients.is_empty() {
        errors.push("Ingredients must be a non-empty array of food-related strings.".to_owned());
    }

    if !errors.is_empty() {
        return Err(AppError::validation(errors));
    }

    // All unwrapped values are Some here; errors is empty only when every
    // field above validated.
    match (weight, age, height, prep_time, gender) {
        (Some(weight), Some(age), Some(height), Some(prep_time), Some(gender)) => {
            Ok(MealPlanRequest {
                metrics: BodyMetrics {
                    weight_lbs: weight as f64,
                    height_cm: height as f64,
                    age: age as u32,
                    gender,
                },
                goal,
                prep_time_minutes: prep_time as u32,
                ingredients,
            })
        }
        _ => Err(AppError::internal("Validation invariant violated")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "weightLbs": 154,
            "age": 30,
            "heightCm": 170,
            "gender": "male",
            "goal": "maintain",
            "prepTimeMinutes": 30,
            "ingredients": ["Chicken", "rice", "  Broccoli  "]
        })
    }

    #[test]
    fn test_valid_request_passes() {
        let request = validate_meal_request(&valid_body()).unwrap();
        assert!((request.metrics.weight_lbs - 154.0).abs() < f64::EPSILON);
        assert_eq!(request.goal, Goal::Maintain);
        assert_eq!(request.ingredients, vec!["chicken", "rice", "broccoli"]);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut body = valid_body();
        body["weightLbs"] = json!("154");
        body["age"] = json!("30.4");
        let request = validate_meal_request(&body).unwrap();
        assert_eq!(request.metrics.age, 30);
    }

    #[test]
    fn test_all_failing_fields_reported_together() {
        let body = json!({
            "weightLbs": "NaN",
            "age": 150,
            "heightCm": 500,
            "gender": "robot",
            "prepTimeMinutes": 0,
            "ingredients": []
        });
        let err = validate_meal_request(&body).unwrap_err();
        assert_eq!(err.context.field_errors.len(), 6);
    }

    #[test]
    fn test_out_of_range_weight_rejected_not_clamped() {
        let mut body = valid_body();
        body["weightLbs"] = json!(500);
        let err = validate_meal_request(&body).unwrap_err();
        assert!(err.context.field_errors[0].contains("Weight"));
    }

    #[test]
    fn test_unknown_goal_defaults_to_maintain() {
        let mut body = valid_body();
        body["goal"] = json!("shredded");
        let request = validate_meal_request(&body).unwrap();
        assert_eq!(request.goal, Goal::Maintain);
    }

    #[test]
    fn test_ingredient_cleaning_rules() {
        let value = json!([
            "  Chicken!!  ",
            "chicken",
            "a",
            42,
            "olive   oil",
            "x".repeat(60)
        ]);
        let cleaned = clean_ingredients(Some(&value));
        assert_eq!(cleaned, vec!["chicken", "olive oil"]);
    }

    #[test]
    fn test_ingredient_cap() {
        let many: Vec<Value> = (0..60).map(|i| json!(format!("ingredient {i}"))).collect();
        let cleaned = clean_ingredients(Some(&Value::Array(many)));
        assert_eq!(cleaned.len(), MAX_INGREDIENTS);
    }
}
