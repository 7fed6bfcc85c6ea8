// ABOUTME: Configuration module for the plan engine
// ABOUTME: Groups nutrition formula constants and their defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Configuration management for plan computation.

pub mod nutrition;

pub use nutrition::{ActivityFactorsConfig, BmrConfig, MacroTargetConfig, NutritionConfig};
