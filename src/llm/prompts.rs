// ABOUTME: Prompt templates for delegated meal and workout plan generation
// ABOUTME: Embeds computed targets and validated inputs into instruction prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Prompt construction for the generation capability.
//!
//! Prompts embed only validated, already-computed values; nothing here
//! touches raw request input. Each prompt ends with the strict output-shape
//! contract the normalizer expects.

use crate::models::{Gender, MacroTargets};
use crate::plan::workout::WorkoutRequest;
use crate::validation::MealPlanRequest;

/// Build the meal plan instruction prompt
///
/// Embeds body metrics, goal, the computed daily targets, the per-meal prep
/// time ceiling, and the normalized ingredient list.
#[must_use]
pub fn meal_plan_prompt(request: &MealPlanRequest, targets: &MacroTargets) -> String {
    let gender = match request.metrics.gender {
        Gender::Male => "male",
        Gender::Female => "female",
    };
    format!(
        r#"You are FitFlux's AI Meal Planner.

User info:
- Weight: {weight} lbs
- Age: {age}
- Height: {height} cm
- Gender: {gender}
- Goal: {goal}
- Maximum prep time per meal: {prep} minutes
- Available ingredients: {ingredients}

Targets (for the full day):
- Calories target: {calories} kcal
- Protein target: {protein} g
- Carbs target: {carbs} g
- Fats target: {fats} g

Rules:
- Create a 1-day meal plan: Breakfast, Lunch, Dinner, plus 0-2 Snacks.
- Each meal MUST be possible using ONLY the ingredients list above plus basic pantry items (salt, pepper, common spices, oil, water).
- Prep time for each meal must NOT exceed {prep} minutes.
- Keep calories and portions realistic for the user; do not starve or overfeed.
- Focus on balanced nutrition and adequate protein.
- Keep the day's total calories and macros reasonably close to the targets above.
- Use simple cooking methods and clear instructions.
- Do NOT give medical advice or diagnoses.
- All numeric fields must be non-negative integers.
- Output ONLY valid JSON in the exact shape below, with no extra keys and no extra commentary:

{{
  "summary": "1-2 sentence overview of the day",
  "estimated_total_calories": 0,
  "meals": [
    {{
      "name": "Breakfast",
      "description": "Short description of the meal",
      "prep_time_minutes": 0,
      "calories": 0,
      "protein_g": 0,
      "carbs_g": 0,
      "fats_g": 0,
      "ingredients": ["..."],
      "instructions": "short prep instructions"
    }}
  ]
}}"#,
        weight = request.metrics.weight_lbs,
        age = request.metrics.age,
        height = request.metrics.height_cm,
        gender = gender,
        goal = request.goal.as_str(),
        prep = request.prep_time_minutes,
        ingredients = request.ingredients.join(", "),
        calories = targets.calories,
        protein = targets.protein_g,
        carbs = targets.carbs_g,
        fats = targets.fats_g,
    )
}

/// Build the workout program instruction prompt
#[must_use]
pub fn workout_plan_prompt(request: &WorkoutRequest) -> String {
    format!(
        r#"You are FitFlux's AI Strength Coach. Create a realistic, science-based workout program.

USER:
- Experience: {experience}
- Goal: {goal}
- Equipment: {equipment}
- Muscle groups to train: {muscle_groups}

RULES:
1. Create ONE workout for EACH muscle group listed.
2. Each workout MUST include:
   - warm-up (simple and short)
   - 4-6 exercises targeting that muscle group
   - sets and reps appropriate for {experience}
   - rest time (60-120s depending on intensity)
3. Exercises must match the available equipment: {equipment}.
4. Keep instructions short and simple.
5. Never provide dangerous exercises.
6. Output ONLY valid JSON in the exact shape below.

OUTPUT SHAPE:
{{
  "overview": "short summary",
  "workouts": [
    {{
      "muscle_group": "Chest",
      "warmup": "5 minutes incline walk",
      "exercises": [
        {{ "name": "Bench Press", "sets": 4, "reps": "8-12", "rest": "90s" }}
      ],
      "cooldown": "light chest stretch"
    }}
  ]
}}"#,
        experience = request.experience,
        goal = request.goal,
        equipment = request.equipment,
        muscle_groups = request.muscle_groups.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyMetrics, Goal};

    #[test]
    fn test_meal_prompt_embeds_targets_and_prep_ceiling() {
        let request = MealPlanRequest {
            metrics: BodyMetrics {
                weight_lbs: 154.0,
                height_cm: 170.0,
                age: 30,
                gender: Gender::Male,
            },
            goal: Goal::Maintain,
            prep_time_minutes: 25,
            ingredients: vec!["chicken".to_owned(), "rice".to_owned()],
        };
        let targets = MacroTargets {
            calories: 2505,
            protein_g: 131,
            carbs_g: 374,
            fats_g: 54,
            bmr: 1616,
            tdee: 2505,
        };
        let prompt = meal_plan_prompt(&request, &targets);
        assert!(prompt.contains("Calories target: 2505 kcal"));
        assert!(prompt.contains("must NOT exceed 25 minutes"));
        assert!(prompt.contains("chicken, rice"));
        assert!(prompt.contains("Goal: maintain"));
    }

    #[test]
    fn test_workout_prompt_lists_muscle_groups() {
        let request = WorkoutRequest {
            experience: "beginner".to_owned(),
            goal: "build muscle".to_owned(),
            muscle_groups: vec!["Chest".to_owned(), "Back".to_owned()],
            equipment: "gym".to_owned(),
        };
        let prompt = workout_plan_prompt(&request);
        assert!(prompt.contains("Chest, Back"));
        assert!(prompt.contains("Equipment: gym"));
    }
}
