// ABOUTME: Delegated workout program generation with strict output normalization
// ABOUTME: Builds the coach prompt, parses model JSON, and derives volume metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Workout Program Generation
//!
//! Delegated variant only: the workout planner has no local catalog. The
//! request carries defaults rather than hard validation (a missing field is
//! a preference, not an error), the model reply is parsed strictly as JSON,
//! and the normalized program is returned together with volume metadata
//! (total exercises and sets) computed locally.

use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, TextGenerator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Workout generation request with defaults for every field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRequest {
    /// Training experience (default "beginner")
    pub experience: String,
    /// Training goal (default "build muscle")
    pub goal: String,
    /// Muscle groups to program, one workout each
    pub muscle_groups: Vec<String>,
    /// Available equipment (default "gym")
    pub equipment: String,
}

impl WorkoutRequest {
    /// Build a request from a loosely typed body, applying defaults
    ///
    /// A scalar `muscleGroups` value is promoted to a one-element list, the
    /// historical request shape.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let string_or = |key: &str, fallback: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
        };
        let muscle_groups = match body.get("muscleGroups") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        };
        Self {
            experience: string_or("experience", "beginner"),
            goal: string_or("goal", "build muscle"),
            muscle_groups,
            equipment: string_or("equipment", "gym"),
        }
    }
}

/// One exercise in a normalized workout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Set count, non-negative
    pub sets: u32,
    /// Rep scheme as free text (e.g. "8-12")
    pub reps: String,
    /// Rest prescription as free text (e.g. "90s")
    pub rest: String,
}

/// One muscle group's workout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workout {
    /// Targeted muscle group
    pub muscle_group: String,
    /// Short warm-up
    pub warmup: String,
    /// 4-6 exercises in the usual case; whatever the model produced
    pub exercises: Vec<Exercise>,
    /// Short cool-down
    pub cooldown: String,
}

/// A normalized multi-workout program
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutProgram {
    /// Short program summary
    pub overview: String,
    /// One workout per requested muscle group
    pub workouts: Vec<Workout>,
}

/// Volume metadata derived locally from the normalized program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutMeta {
    /// Echoed experience level
    pub experience: String,
    /// Echoed goal
    pub goal: String,
    /// Echoed muscle groups
    pub muscle_groups: Vec<String>,
    /// Echoed equipment
    pub equipment: String,
    /// Exercise count across all workouts
    pub total_exercises: u32,
    /// Set count across all exercises
    pub total_sets: u32,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

/// Delegated workout response: the program plus derived metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanResponse {
    /// Normalized program
    pub plan: WorkoutProgram,
    /// Volume metadata
    pub meta: WorkoutMeta,
}

/// Coerce a set count that may arrive as a number or a numeric string
fn coerce_sets(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|n| *n > 0.0).map_or(0, |n| n.round() as u32),
        Some(Value::String(s)) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    }
}

fn coerce_str(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_owned(), ToOwned::to_owned)
}

fn normalize_exercise(value: &Value) -> Exercise {
    Exercise {
        name: coerce_str(value.get("name"), ""),
        sets: coerce_sets(value.get("sets")),
        reps: coerce_str(value.get("reps"), ""),
        rest: coerce_str(value.get("rest"), ""),
    }
}

fn normalize_workout(value: &Value) -> Workout {
    let exercises = match value.get("exercises") {
        Some(Value::Array(items)) => items.iter().map(normalize_exercise).collect(),
        _ => Vec::new(),
    };
    Workout {
        muscle_group: coerce_str(value.get("muscle_group"), ""),
        warmup: coerce_str(value.get("warmup"), ""),
        exercises,
        cooldown: coerce_str(value.get("cooldown"), ""),
    }
}

/// Normalize a full workout program payload
#[must_use]
pub fn normalize_workout_program(value: &Value) -> WorkoutProgram {
    let workouts = match value.get("workouts") {
        Some(Value::Array(items)) => items.iter().map(normalize_workout).collect(),
        _ => Vec::new(),
    };
    WorkoutProgram {
        overview: coerce_str(value.get("overview"), ""),
        workouts,
    }
}

/// Generate a workout program through the injected generator
///
/// # Errors
///
/// Returns an external-service error (underlying message attached) when the
/// generation call fails or times out, or an invalid-model-output error
/// (raw text attached) when the reply is not valid JSON.
pub async fn generate(
    generator: &dyn TextGenerator,
    body: &Value,
) -> AppResult<WorkoutPlanResponse> {
    let request = WorkoutRequest::from_body(body);
    let prompt = prompts::workout_plan_prompt(&request);

    let text = generator.generate_json(&prompt).await.map_err(|e| {
        warn!(provider = generator.name(), "workout generation failed: {e}");
        let detail = e.context.source_message.unwrap_or(e.message);
        AppError::external_service("Workout Planner Failed", detail)
    })?;

    let raw: Value = serde_json::from_str(&text)
        .map_err(|_| AppError::invalid_model_output("Invalid JSON from model", text))?;
    let plan = normalize_workout_program(&raw);

    let total_exercises = plan
        .workouts
        .iter()
        .map(|w| w.exercises.len() as u32)
        .sum();
    let total_sets = plan
        .workouts
        .iter()
        .flat_map(|w| &w.exercises)
        .map(|e| e.sets)
        .sum();

    info!(
        provider = generator.name(),
        workouts = plan.workouts.len(),
        total_exercises,
        total_sets,
        "generated workout program"
    );

    Ok(WorkoutPlanResponse {
        plan,
        meta: WorkoutMeta {
            experience: request.experience,
            goal: request.goal,
            muscle_groups: request.muscle_groups,
            equipment: request.equipment,
            total_exercises,
            total_sets,
            generated_at: Utc::now(),
        },
    })
}
