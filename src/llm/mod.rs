// ABOUTME: Text generation capability for plan delegation
// ABOUTME: Defines the generator contract and the OpenAI-compatible implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! # Text Generation Capability
//!
//! The plan engine delegates the actual planning intelligence to an external
//! text-generation service. This module defines the contract for that
//! capability and ships an implementation for any `OpenAI`-compatible
//! `chat/completions` endpoint.
//!
//! The capability is injected into the plan functions rather than reached
//! through a global client, so the arithmetic and selection logic stays
//! testable without any network dependency.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitflux_plan_engine::llm::{OpenAiCompatibleGenerator, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fitflux_plan_engine::errors::AppError> {
//!     let generator = OpenAiCompatibleGenerator::from_env()?;
//!     let json = generator.generate_json("Return {\"ok\": true}").await?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleGenerator};

use crate::errors::AppResult;
use async_trait::async_trait;

/// A text-generation capability with a JSON-object output constraint
///
/// Implementations must honor a bounded request timeout: a call that exceeds
/// its deadline fails, it is never retried automatically by this crate.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier for logging (e.g. "openai-compatible")
    fn name(&self) -> &'static str;

    /// Submit a prompt and return the raw generated text
    ///
    /// The provider is asked for a JSON object, but the reply is returned
    /// untouched; strict parsing and normalization happen in the plan layer
    /// so malformed output can be reported with the raw text attached.
    ///
    /// # Errors
    ///
    /// Returns an external-service error on transport failure, a non-success
    /// status, or timeout.
    async fn generate_json(&self, prompt: &str) -> AppResult<String>;
}
