// ABOUTME: Main library entry point for the FitFlux plan engine
// ABOUTME: Nutrition target calculation, meal candidate selection, and delegated plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

#![deny(unsafe_code)]

//! # FitFlux Plan Engine
//!
//! The nutrition and plan computation core of the FitFlux fitness
//! application. Route handlers hand this crate a loosely typed JSON request
//! plus injected capabilities (a catalog query, a text generator) and get
//! back a fully typed plan or a structured error.
//!
//! ## Architecture
//!
//! - **`validation`**: coerces loosely typed input, reporting every failing
//!   field at once
//! - **`targets`**: Mifflin-St Jeor BMR, activity-factor TDEE, and clamped
//!   calorie/macro targets
//! - **`catalog`**: catalog query capability and pure candidate selection
//!   with an explicit random source
//! - **`llm`**: text-generation capability and prompt templates
//! - **`plan`**: local and delegated plan assembly plus strict normalization
//!   of model output
//!
//! Local computation is pure and synchronous; only the generation call
//! blocks, bounded by its timeout. Nothing here persists state.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitflux_plan_engine::config::NutritionConfig;
//! use fitflux_plan_engine::llm::OpenAiCompatibleGenerator;
//! use fitflux_plan_engine::plan;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fitflux_plan_engine::errors::AppError> {
//!     let generator = OpenAiCompatibleGenerator::from_env()?;
//!     let body = json!({
//!         "weightLbs": 154, "heightCm": 170, "age": 30,
//!         "gender": "male", "goal": "maintain",
//!         "prepTimeMinutes": 30, "ingredients": ["chicken", "rice"]
//!     });
//!     let response = plan::meal::generate(&generator, &body, &NutritionConfig::default()).await?;
//!     println!("{}", response.plan.summary);
//!     Ok(())
//! }
//! ```

/// Catalog query capability and meal candidate selection
pub mod catalog;

/// Configuration: nutrition formula constants and clamps
pub mod config;

/// Unified error handling and wire error shapes
pub mod errors;

/// Text generation capability and prompt templates
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Core domain types
pub mod models;

/// Plan assembly: local and delegated variants, output normalization
pub mod plan;

/// Target calculator: BMR, TDEE, and macro targets
pub mod targets;

/// Request validation and ingredient normalization
pub mod validation;
