// ABOUTME: Target calculator deriving calorie and macro targets from body metrics
// ABOUTME: Mifflin-St Jeor BMR, activity-factor TDEE, goal offsets, clamped macros
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Target Calculator
//!
//! Pure, synchronous derivation of daily calorie and macronutrient targets
//! from validated body metrics and a weight goal. Given validated input this
//! module does not fail; the guards below only reject values the validation
//! layer should already have caught.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2),
//!   241-247. DOI: 10.1093/ajcn/51.2.241

use crate::config::{ActivityFactorsConfig, BmrConfig, NutritionConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, BodyMetrics, Gender, Goal, MacroTargets};

/// Pounds to kilograms conversion factor
pub const LBS_TO_KG: f64 = 0.453_592_37;

/// Kilocalories per gram of protein or carbohydrate
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;

/// Kilocalories per gram of fat
const KCAL_PER_G_FAT: f64 = 9.0;

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + gender constant
/// - Men: +5
/// - Women: -161
///
/// # Errors
///
/// Returns an error if weight, height, or age are outside the formula's
/// validated domain.
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> AppResult<f64> {
    if weight_kg <= 0.0 || weight_kg > 300.0 {
        return Err(AppError::invalid_input(
            "Weight must be between 0 and 300 kg",
        ));
    }
    if height_cm <= 0.0 || height_cm > 300.0 {
        return Err(AppError::invalid_input(
            "Height must be between 0 and 300 cm",
        ));
    }
    if !(10..=120).contains(&age) {
        return Err(AppError::invalid_input(
            "Age must be between 10 and 120 years",
        ));
    }

    let gender_constant = match gender {
        Gender::Male => config.male_constant,
        Gender::Female => config.female_constant,
    };

    Ok(config.weight_coef * weight_kg
        + config.height_coef * height_cm
        + config.age_coef * f64::from(age)
        + gender_constant)
}

/// Calculate Total Daily Energy Expenditure
///
/// Formula: TDEE = BMR x activity factor
///
/// # Errors
///
/// Returns an error if BMR is not positive.
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if bmr <= 0.0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }
    Ok(bmr * config.factor_for(activity_level))
}

/// Compute the full set of daily calorie and macro targets
///
/// Pipeline: lbs→kg conversion, Mifflin-St Jeor BMR, activity-factor TDEE,
/// per-goal calorie offset clamped into the configured safe range, then
/// protein and fat from bodyweight coefficients (both clamped) with carbs
/// absorbing whatever calories remain, floored at zero.
///
/// # Errors
///
/// Returns an error only for inputs the validation layer should have
/// rejected already.
pub fn compute_targets(
    metrics: &BodyMetrics,
    goal: Goal,
    activity_level: ActivityLevel,
    config: &NutritionConfig,
) -> AppResult<MacroTargets> {
    let weight_kg = metrics.weight_lbs * LBS_TO_KG;
    let bmr = calculate_mifflin_st_jeor(
        weight_kg,
        metrics.height_cm,
        metrics.age,
        metrics.gender,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, activity_level, &config.activity_factors)?;

    let macros = &config.macro_targets;
    let calories = (tdee + macros.calorie_offset(goal))
        .clamp(macros.calorie_floor, macros.calorie_ceiling)
        .round();

    let protein_g = (metrics.weight_lbs * macros.protein_g_per_lb(goal))
        .clamp(macros.protein_floor_g, macros.protein_ceiling_g)
        .round();
    let fats_g = (metrics.weight_lbs * macros.fat_g_per_lb)
        .clamp(macros.fat_floor_g, macros.fat_ceiling_g)
        .round();

    let protein_kcal = protein_g * KCAL_PER_G_PROTEIN_CARB;
    let fat_kcal = fats_g * KCAL_PER_G_FAT;
    let remaining = (calories - protein_kcal - fat_kcal).max(0.0);
    let carbs_g = (remaining / KCAL_PER_G_PROTEIN_CARB).round();

    Ok(MacroTargets {
        calories: calories as u32,
        protein_g: protein_g as u32,
        carbs_g: carbs_g as u32,
        fats_g: fats_g as u32,
        bmr: bmr.round() as i32,
        tdee: tdee.round() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(weight_lbs: f64, height_cm: f64, age: u32, gender: Gender) -> BodyMetrics {
        BodyMetrics {
            weight_lbs,
            height_cm,
            age,
            gender,
        }
    }

    fn compute(m: &BodyMetrics, goal: Goal) -> MacroTargets {
        compute_targets(m, goal, ActivityLevel::Moderate, &NutritionConfig::default()).unwrap()
    }

    #[test]
    fn test_mifflin_st_jeor_male_reference_value() {
        // 70 kg, 170 cm, 30 y male: 700 + 1062.5 - 150 + 5
        let bmr = calculate_mifflin_st_jeor(
            70.0,
            170.0,
            30,
            Gender::Male,
            &BmrConfig::default(),
        )
        .unwrap();
        assert!((bmr - 1617.5).abs() < 0.01);
    }

    #[test]
    fn test_female_constant_lowers_bmr() {
        let config = BmrConfig::default();
        let male = calculate_mifflin_st_jeor(70.0, 170.0, 30, Gender::Male, &config).unwrap();
        let female = calculate_mifflin_st_jeor(70.0, 170.0, 30, Gender::Female, &config).unwrap();
        assert!((male - female - 166.0).abs() < 0.01);
    }

    #[test]
    fn test_maintain_target_tracks_tdee() {
        // 154 lbs, 170 cm, 30 y male at the 1.55 moderate factor
        let m = metrics(154.0, 170.0, 30, Gender::Male);
        let targets = compute(&m, Goal::Maintain);
        assert_eq!(targets.calories, targets.tdee);
        assert!(targets.calories >= 1200 && targets.calories <= 4500);
    }

    #[test]
    fn test_goal_calorie_ordering() {
        let m = metrics(180.0, 178.0, 28, Gender::Male);
        let lose = compute(&m, Goal::Lose);
        let maintain = compute(&m, Goal::Maintain);
        let gain = compute(&m, Goal::Gain);
        assert!(lose.calories < maintain.calories);
        assert!(maintain.calories < gain.calories);
    }

    #[test]
    fn test_calories_clamped_at_extremes() {
        let config = NutritionConfig::default();
        let tiny = metrics(60.0, 120.0, 80, Gender::Female);
        let low = compute_targets(&tiny, Goal::Lose, ActivityLevel::Sedentary, &config).unwrap();
        assert_eq!(low.calories, 1200);

        let huge = metrics(450.0, 225.0, 20, Gender::Male);
        let high = compute_targets(&huge, Goal::Gain, ActivityLevel::VeryActive, &config).unwrap();
        assert_eq!(high.calories, 4500);
    }

    #[test]
    fn test_protein_monotonic_in_weight_and_clamped() {
        let config = NutritionConfig::default();
        let mut previous = 0;
        for weight in [60.0, 100.0, 150.0, 200.0, 300.0, 450.0] {
            let m = metrics(weight, 175.0, 30, Gender::Male);
            let t = compute_targets(&m, Goal::Maintain, ActivityLevel::Moderate, &config).unwrap();
            assert!(t.protein_g >= previous);
            assert!(t.protein_g >= 90 && t.protein_g <= 260);
            previous = t.protein_g;
        }
    }

    #[test]
    fn test_macro_calories_never_exceed_target() {
        for weight in [60.0, 120.0, 250.0, 450.0] {
            for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
                let m = metrics(weight, 180.0, 35, Gender::Female);
                let t = compute(&m, goal);
                // Carbs absorb the remainder, floored at zero, so protein and
                // fat calories alone may already reach the (clamped) target.
                if t.carbs_g > 0 {
                    assert!(t.protein_g * 4 + t.fats_g * 9 <= t.calories);
                }
            }
        }
    }

    #[test]
    fn test_out_of_domain_inputs_rejected() {
        let config = BmrConfig::default();
        assert!(calculate_mifflin_st_jeor(0.0, 170.0, 30, Gender::Male, &config).is_err());
        assert!(calculate_mifflin_st_jeor(70.0, 0.0, 30, Gender::Male, &config).is_err());
        assert!(calculate_mifflin_st_jeor(70.0, 170.0, 5, Gender::Male, &config).is_err());
    }
}
