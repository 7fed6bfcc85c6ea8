// ABOUTME: Nutrition configuration for target calculation
// ABOUTME: BMR coefficients, activity factors, goal offsets, and macro clamps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Nutrition Calculation Configuration
//!
//! Provides the constant tables behind target calculation: Mifflin-St Jeor
//! BMR coefficients, activity factor multipliers, per-goal calorie offsets,
//! and macro coefficients with their safety clamps.
//!
//! The defaults below are the canonical constant set for the engine. Earlier
//! route implementations carried a second, divergent table (sedentary factor,
//! -500/+300 offsets, g/kg protein); that table is intentionally not
//! preserved.
//!
//! # Scientific References
//!
//! - BMR: Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: McArdle et al. (2010), Exercise Physiology

use crate::models::{ActivityLevel, Goal};
use serde::{Deserialize, Serialize};

/// Nutrition calculation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) formula coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Goal offsets and macro coefficients with clamps
    pub macro_targets: MacroTargetConfig,
}

/// Mifflin-St Jeor BMR formula coefficients
///
/// BMR = `weight_coef`·kg + `height_coef`·cm + `age_coef`·age + gender constant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub weight_coef: f64,
    /// Height coefficient (6.25)
    pub height_coef: f64,
    /// Age coefficient (-5.0)
    pub age_coef: f64,
    /// Male constant (+5)
    pub male_constant: f64,
    /// Female constant (-161)
    pub female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Little/no exercise: 1.2
    pub sedentary: f64,
    /// 1-3 days/week: 1.375
    pub light: f64,
    /// 3-5 days/week: 1.55
    pub moderate: f64,
    /// 6-7 days/week: 1.725
    pub active: f64,
    /// Hard training 2x/day: 1.9
    pub very_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for the given activity level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// Goal offsets and macro coefficients
///
/// Output clamping here is intentional and distinct from input validation:
/// inputs outside their domain are rejected, while computed targets are
/// clamped into safe ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargetConfig {
    /// Calorie offset for a weight-loss goal (kcal, negative): -400
    pub calorie_offset_lose: f64,
    /// Calorie offset for a weight-gain goal (kcal): +250
    pub calorie_offset_gain: f64,
    /// Calorie target floor (kcal): 1200
    pub calorie_floor: f64,
    /// Calorie target ceiling (kcal): 4500
    pub calorie_ceiling: f64,
    /// Protein coefficient for weight loss (g per lb bodyweight): 1.0
    pub protein_g_per_lb_lose: f64,
    /// Protein coefficient otherwise (g per lb bodyweight): 0.85
    pub protein_g_per_lb_default: f64,
    /// Protein target floor (g): 90
    pub protein_floor_g: f64,
    /// Protein target ceiling (g): 260
    pub protein_ceiling_g: f64,
    /// Fat coefficient (g per lb bodyweight): 0.35
    pub fat_g_per_lb: f64,
    /// Fat target floor (g): 40
    pub fat_floor_g: f64,
    /// Fat target ceiling (g): 140
    pub fat_ceiling_g: f64,
}

impl MacroTargetConfig {
    /// Calorie offset applied on top of TDEE for the given goal
    #[must_use]
    pub const fn calorie_offset(&self, goal: Goal) -> f64 {
        match goal {
            Goal::Lose => self.calorie_offset_lose,
            Goal::Maintain => 0.0,
            Goal::Gain => self.calorie_offset_gain,
        }
    }

    /// Protein coefficient (g per lb bodyweight) for the given goal
    #[must_use]
    pub const fn protein_g_per_lb(&self, goal: Goal) -> f64 {
        match goal {
            Goal::Lose => self.protein_g_per_lb_lose,
            Goal::Maintain | Goal::Gain => self.protein_g_per_lb_default,
        }
    }
}

impl Default for MacroTargetConfig {
    fn default() -> Self {
        Self {
            calorie_offset_lose: -400.0,
            calorie_offset_gain: 250.0,
            calorie_floor: 1200.0,
            calorie_ceiling: 4500.0,
            protein_g_per_lb_lose: 1.0,
            protein_g_per_lb_default: 0.85,
            protein_floor_g: 90.0,
            protein_ceiling_g: 260.0,
            fat_g_per_lb: 0.35,
            fat_floor_g: 40.0,
            fat_ceiling_g: 140.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_offsets_are_ordered() {
        let config = MacroTargetConfig::default();
        assert!(config.calorie_offset(Goal::Lose) < config.calorie_offset(Goal::Maintain));
        assert!(config.calorie_offset(Goal::Maintain) < config.calorie_offset(Goal::Gain));
    }

    #[test]
    fn test_activity_factors_increase_with_level() {
        let config = ActivityFactorsConfig::default();
        assert!(config.factor_for(ActivityLevel::Sedentary) < config.factor_for(ActivityLevel::Moderate));
        assert!(config.factor_for(ActivityLevel::Moderate) < config.factor_for(ActivityLevel::VeryActive));
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = NutritionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: NutritionConfig = serde_json::from_str(&json).unwrap();
        assert!((parsed.bmr.female_constant - -161.0).abs() < f64::EPSILON);
        assert!((parsed.macro_targets.calorie_ceiling - 4500.0).abs() < f64::EPSILON);
    }
}
