// ABOUTME: Core domain types shared across the plan engine modules
// ABOUTME: Body metrics, goals, macro targets, catalog records, and meal plan shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Common data structures for nutrition and plan computation.
//!
//! Everything here is constructed fresh per request and never mutated
//! afterward; persistence belongs to external collaborators.

use serde::{Deserialize, Serialize};

/// Biological gender for BMR calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (+5 Mifflin-St Jeor constant)
    Male,
    /// Female (-161 Mifflin-St Jeor constant)
    Female,
}

impl Gender {
    /// Parse from a request string, case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Weight goal driving calorie offsets and protein coefficients
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Caloric deficit
    Lose,
    /// Caloric balance
    #[default]
    Maintain,
    /// Caloric surplus
    Gain,
}

impl Goal {
    /// Parse from a request string; anything unrecognized falls back to
    /// `Maintain` (the historical behavior, deliberately not an error)
    #[must_use]
    pub fn parse_or_default(s: Option<&str>) -> Self {
        match s {
            Some("lose") => Self::Lose,
            Some("gain") => Self::Gain,
            _ => Self::Maintain,
        }
    }

    /// String form used in prompts and response payloads
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    /// Little/no exercise
    Sedentary,
    /// 1-3 days/week
    Light,
    /// 3-5 days/week
    #[default]
    Moderate,
    /// 6-7 days/week
    Active,
    /// Hard training 2x/day
    VeryActive,
}

/// Validated body metrics supplied per request; not persisted here
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Body weight in pounds
    pub weight_lbs: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// Biological gender
    pub gender: Gender,
}

/// Computed daily calorie and macro targets
///
/// Invariant: `protein_g * 4 + fats_g * 9 <= calories`; carbs absorb the
/// remainder, floored at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroTargets {
    /// Daily calorie target (kcal), clamped to the configured safe range
    pub calories: u32,
    /// Daily protein target (grams)
    pub protein_g: u32,
    /// Daily carbohydrate target (grams)
    pub carbs_g: u32,
    /// Daily fat target (grams)
    pub fats_g: u32,
    /// Basal Metabolic Rate (kcal/day), for diagnostics
    pub bmr: i32,
    /// Total Daily Energy Expenditure (kcal/day), for diagnostics
    pub tdee: u32,
}

/// A food/recipe record from the external catalog
///
/// Read-only to this crate; ownership lies with the catalog service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Recipe display name
    #[serde(default)]
    pub recipe_name: String,
    /// Raw ingredient text as stored in the catalog
    #[serde(default)]
    pub ingredients: String,
    /// Preparation instructions
    #[serde(default)]
    pub instructions: String,
    /// Source URL, when available
    #[serde(default)]
    pub url: String,
    /// Image URL, when available
    #[serde(default)]
    pub img_src: String,
}

/// One normalized meal inside a generated plan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    /// Meal name (e.g. "Breakfast"); defaults to "Meal" when absent
    pub name: String,
    /// Short description
    pub description: String,
    /// Preparation time in minutes, non-negative
    pub prep_time_minutes: u32,
    /// Calories (kcal), non-negative
    pub calories: u32,
    /// Protein in grams, non-negative
    pub protein_g: u32,
    /// Carbohydrates in grams, non-negative
    pub carbs_g: u32,
    /// Fats in grams, non-negative
    pub fats_g: u32,
    /// Ingredient list, strings only, capped in length
    pub ingredients: Vec<String>,
    /// Short preparation instructions
    pub instructions: String,
}

/// A normalized one-day meal plan, constructed fresh per request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPlan {
    /// 1-2 sentence overview of the day
    pub summary: String,
    /// Model-estimated total calories for the day
    pub estimated_total_calories: u32,
    /// The day's meals in order
    pub meals: Vec<Meal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse_is_case_insensitive() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::parse("other"), None);
    }

    #[test]
    fn test_unknown_goal_falls_back_to_maintain() {
        assert_eq!(Goal::parse_or_default(Some("lose")), Goal::Lose);
        assert_eq!(Goal::parse_or_default(Some("bulk")), Goal::Maintain);
        assert_eq!(Goal::parse_or_default(None), Goal::Maintain);
    }

    #[test]
    fn test_food_record_tolerates_missing_fields() {
        let record: FoodRecord = serde_json::from_str(r#"{"recipe_name":"Oats"}"#).unwrap();
        assert_eq!(record.recipe_name, "Oats");
        assert!(record.ingredients.is_empty());
        assert!(record.url.is_empty());
    }
}
