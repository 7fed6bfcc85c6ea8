// ABOUTME: Catalog query capability and meal candidate selection
// ABOUTME: Ingredient-overlap filtering with full-catalog fallback and seeded random slot picks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Candidate Selector
//!
//! Narrows the external food catalog by ingredient overlap and picks one
//! record per meal slot. The selection functions are pure and take an
//! explicit random source, so tests can seed them for determinism. The
//! catalog itself is reached through the [`CatalogQuery`] capability,
//! injected by the caller; this crate never owns catalog data.

use crate::errors::{AppError, AppResult};
use crate::models::FoodRecord;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default row limit when listing the catalog
pub const DEFAULT_CATALOG_LIMIT: usize = 300;

/// Read access to the external food/recipe catalog
///
/// Implementations wrap whatever backend holds the catalog (a managed
/// database, a fixture file in tests). The engine only reads.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// List up to `limit` catalog records
    ///
    /// # Errors
    ///
    /// Returns an error if the backend query fails.
    async fn list_foods(&self, limit: usize) -> AppResult<Vec<FoodRecord>>;
}

/// Records whose ingredient text contains at least one user ingredient as a
/// case-insensitive substring
#[must_use]
pub fn filter_by_ingredients<'a>(
    records: &'a [FoodRecord],
    ingredients: &[String],
) -> Vec<&'a FoodRecord> {
    records
        .iter()
        .filter(|record| {
            let text = record.ingredients.to_lowercase();
            ingredients.iter().any(|ing| text.contains(ing.as_str()))
        })
        .collect()
}

/// Select meal candidates: the ingredient-filtered subset, or the full
/// catalog when nothing matches
///
/// The fallback is documented behavior, not an error: a pantry disjoint from
/// the catalog still yields a plan, just not a tailored one.
#[must_use]
pub fn select_candidates<'a>(
    records: &'a [FoodRecord],
    ingredients: &[String],
) -> Vec<&'a FoodRecord> {
    let filtered = filter_by_ingredients(records, ingredients);
    debug!(
        catalog_len = records.len(),
        filtered_len = filtered.len(),
        "candidate selection"
    );
    if filtered.is_empty() {
        records.iter().collect()
    } else {
        filtered
    }
}

/// One catalog record per meal slot
///
/// Slots are drawn independently, so the same record may appear in more than
/// one slot; that duplication is accepted, not deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSlotPicks {
    /// Breakfast pick
    pub breakfast: FoodRecord,
    /// Lunch pick
    pub lunch: FoodRecord,
    /// Dinner pick
    pub dinner: FoodRecord,
}

/// Pick one candidate per meal slot, uniformly at random
///
/// # Errors
///
/// Returns a resource-unavailable error when there are no candidates, which
/// only happens when the catalog itself is empty (distinct from "no
/// ingredient match", which falls back to the full catalog upstream).
pub fn pick_meal_slots<R: Rng>(
    candidates: &[&FoodRecord],
    rng: &mut R,
) -> AppResult<MealSlotPicks> {
    if candidates.is_empty() {
        return Err(AppError::resource_unavailable("No recipes found"));
    }
    let pick = |rng: &mut R| candidates[rng.gen_range(0..candidates.len())].clone();
    let breakfast = pick(rng);
    let lunch = pick(rng);
    let dinner = pick(rng);
    debug!(
        breakfast = %breakfast.recipe_name,
        lunch = %lunch.recipe_name,
        dinner = %dinner.recipe_name,
        "meal slot picks"
    );
    Ok(MealSlotPicks {
        breakfast,
        lunch,
        dinner,
    })
}
