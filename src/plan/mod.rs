// ABOUTME: Plan assembly module - meal and workout plan construction
// ABOUTME: Groups the local assembler, delegated generators, and output normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Plan Assembler
//!
//! Combines computed targets with selected candidates (local variant) or an
//! externally generated payload (delegated variant) into the response
//! structures consumed by route handlers.

pub mod meal;
pub mod normalize;
pub mod workout;

pub use meal::{GeneratedMealPlan, LocalMealPlan};
pub use normalize::{normalize_meal, normalize_meal_plan};
pub use workout::{WorkoutPlanResponse, WorkoutRequest};
