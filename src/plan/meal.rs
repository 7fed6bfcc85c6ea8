// ABOUTME: Meal plan assembly - local catalog variant and LLM-delegated variant
// ABOUTME: Validates, computes targets, then selects candidates or delegates to a generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Meal Plan Assembler
//!
//! Two variants share the same validation and target computation:
//!
//! - **Local**: filters the injected catalog by pantry overlap, picks one
//!   record per slot from an explicit random source, and merges the picks
//!   with computed targets into a fixed response shape.
//! - **Delegated**: embeds the computed targets into an instruction prompt,
//!   submits it to the injected [`TextGenerator`], parses the reply strictly
//!   as JSON, and normalizes it into a typed [`MealPlan`].
//!
//! Validation always runs first; no external call is attempted when any
//! required field fails.

use crate::catalog::{
    pick_meal_slots, select_candidates, CatalogQuery, MealSlotPicks, DEFAULT_CATALOG_LIMIT,
};
use crate::config::NutritionConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, TextGenerator};
use crate::models::{ActivityLevel, FoodRecord, MacroTargets, MealPlan};
use crate::plan::normalize::normalize_meal_plan;
use crate::targets::compute_targets;
use crate::validation::validate_meal_request;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Macro breakdown in the local response shape
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroSummary {
    /// Protein in grams
    pub protein: u32,
    /// Carbohydrates in grams
    pub carbs: u32,
    /// Fats in grams
    pub fats: u32,
}

/// One slot entry in the local response shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMeal {
    /// Recipe name; "Unknown Recipe" when the catalog row lacks one
    pub recipe_name: String,
    /// Raw ingredient text from the catalog
    pub ingredients: String,
    /// Preparation instructions
    pub instructions: String,
    /// Source URL
    pub url: String,
    /// Image URL
    pub img_src: String,
}

impl From<FoodRecord> for SlotMeal {
    fn from(record: FoodRecord) -> Self {
        let recipe_name = if record.recipe_name.is_empty() {
            "Unknown Recipe".to_owned()
        } else {
            record.recipe_name
        };
        Self {
            recipe_name,
            ingredients: record.ingredients,
            instructions: record.instructions,
            url: record.url,
            img_src: record.img_src,
        }
    }
}

/// The three meal slots of the local response shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotMeals {
    /// Breakfast entry
    pub breakfast: SlotMeal,
    /// Lunch entry
    pub lunch: SlotMeal,
    /// Dinner entry
    pub dinner: SlotMeal,
}

impl From<MealSlotPicks> for SlotMeals {
    fn from(picks: MealSlotPicks) -> Self {
        Self {
            breakfast: picks.breakfast.into(),
            lunch: picks.lunch.into(),
            dinner: picks.dinner.into(),
        }
    }
}

/// Local-catalog meal plan response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalMealPlan {
    /// Daily calorie target
    pub calories: u32,
    /// Macro targets
    pub macros: MacroSummary,
    /// The goal the targets were computed for
    pub goal: String,
    /// Selected dietary preference tags
    pub prefs: Vec<String>,
    /// Selected dietary restriction tags
    pub restrictions: Vec<String>,
    /// One catalog record per meal slot
    pub meals: SlotMeals,
}

/// Delegated meal plan response: the normalized plan plus the targets the
/// prompt was built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMealPlan {
    /// Normalized one-day plan
    pub plan: MealPlan,
    /// Targets embedded in the prompt
    pub targets: MacroTargets,
}

/// Extract the keys of an object whose values are `true`
///
/// Dietary preferences and restrictions arrive as `{"vegan": true, ...}`
/// checkbox maps; only the checked keys matter.
#[must_use]
pub fn truthy_keys(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Object(map)) = value else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, v)| v.as_bool() == Some(true))
        .map(|(k, _)| k.clone())
        .collect()
}

/// Local-catalog variant: validate, compute targets, select candidates, and
/// assemble the fixed response shape
///
/// # Errors
///
/// Returns a validation error (all failing fields), a resource-unavailable
/// error when the catalog is empty, or an upstream error from the catalog
/// query itself.
pub async fn plan_with_catalog<R: Rng + Send>(
    catalog: &dyn CatalogQuery,
    body: &Value,
    config: &NutritionConfig,
    rng: &mut R,
) -> AppResult<LocalMealPlan> {
    let request = validate_meal_request(body)?;
    let targets = compute_targets(
        &request.metrics,
        request.goal,
        ActivityLevel::default(),
        config,
    )?;

    let records = catalog.list_foods(DEFAULT_CATALOG_LIMIT).await?;
    if records.is_empty() {
        return Err(AppError::resource_unavailable("No recipes found"));
    }

    let candidates = select_candidates(&records, &request.ingredients);
    let picks = pick_meal_slots(&candidates, rng)?;

    info!(
        calories = targets.calories,
        goal = request.goal.as_str(),
        candidates = candidates.len(),
        "assembled local meal plan"
    );

    Ok(LocalMealPlan {
        calories: targets.calories,
        macros: MacroSummary {
            protein: targets.protein_g,
            carbs: targets.carbs_g,
            fats: targets.fats_g,
        },
        goal: request.goal.as_str().to_owned(),
        prefs: truthy_keys(body.get("dietPrefs")),
        restrictions: truthy_keys(body.get("restrictions")),
        meals: picks.into(),
    })
}

/// Delegated variant: validate, compute targets, prompt the generator, and
/// normalize its JSON reply
///
/// # Errors
///
/// Returns a validation error before any generation call; an
/// external-service error (with the underlying message) when the call fails
/// or times out; an invalid-model-output error (with the raw text) when the
/// reply is not valid JSON.
pub async fn generate(
    generator: &dyn TextGenerator,
    body: &Value,
    config: &NutritionConfig,
) -> AppResult<GeneratedMealPlan> {
    let request = validate_meal_request(body)?;
    let targets = compute_targets(
        &request.metrics,
        request.goal,
        ActivityLevel::default(),
        config,
    )?;

    let prompt = prompts::meal_plan_prompt(&request, &targets);
    let text = generator.generate_json(&prompt).await.map_err(|e| {
        warn!(provider = generator.name(), "meal plan generation failed: {e}");
        let detail = e.context.source_message.unwrap_or(e.message);
        AppError::external_service("Failed to generate meal plan", detail)
    })?;

    let raw: Value = serde_json::from_str(&text)
        .map_err(|_| AppError::invalid_model_output("Invalid JSON from model", text))?;
    let plan = normalize_meal_plan(&raw);

    info!(
        provider = generator.name(),
        meals = plan.meals.len(),
        estimated_total_calories = plan.estimated_total_calories,
        "generated meal plan"
    );

    Ok(GeneratedMealPlan { plan, targets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_keys_extracts_checked_entries() {
        let prefs = json!({ "vegan": true, "keto": false, "halal": true, "junk": "yes" });
        let mut keys = truthy_keys(Some(&prefs));
        keys.sort();
        assert_eq!(keys, vec!["halal", "vegan"]);
    }

    #[test]
    fn test_slot_meal_defaults_unknown_recipe_name() {
        let slot: SlotMeal = FoodRecord::default().into();
        assert_eq!(slot.recipe_name, "Unknown Recipe");
    }
}
