// ABOUTME: Generic OpenAI-compatible text generator over chat/completions
// ABOUTME: Env-configured endpoint with JSON output constraint and bounded timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! # `OpenAI`-Compatible Generator
//!
//! Implementation of [`TextGenerator`] for any `OpenAI`-compatible
//! `chat/completions` endpoint (`OpenAI` itself, Groq, Ollama, vLLM, ...).
//!
//! ## Configuration
//!
//! - `FITFLUX_LLM_BASE_URL`: Base URL (default: <https://api.openai.com/v1>)
//! - `FITFLUX_LLM_MODEL`: Model to use (default: `gpt-5.2`)
//! - `FITFLUX_LLM_API_KEY`: API key (required for cloud endpoints)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

use super::TextGenerator;
use crate::errors::{AppError, AppResult};

/// Environment variable for the generation endpoint base URL
const BASE_URL_ENV: &str = "FITFLUX_LLM_BASE_URL";

/// Environment variable for the model identifier
const MODEL_ENV: &str = "FITFLUX_LLM_MODEL";

/// Environment variable for the API key
const API_KEY_ENV: &str = "FITFLUX_LLM_API_KEY";

/// Default base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
const DEFAULT_MODEL: &str = "gpt-5.2";

/// Connection timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Full request deadline; a generation call past this is cancelled and failed
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for an `OpenAI`-compatible generator
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// Endpoint base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key; empty for local servers that need none
    pub api_key: String,
}

impl OpenAiCompatibleConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a config error when the API key is missing while the base URL
    /// points at a non-local endpoint.
    pub fn from_env() -> AppResult<Self> {
        let base_url =
            env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let model = env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        let api_key = env::var(API_KEY_ENV).unwrap_or_default();

        let local = base_url.contains("localhost") || base_url.contains("127.0.0.1");
        if api_key.is_empty() && !local {
            return Err(AppError::config(format!(
                "{API_KEY_ENV} is required for non-local endpoints"
            )));
        }
        Ok(Self {
            base_url,
            model,
            api_key,
        })
    }
}

/// [`TextGenerator`] for `OpenAI`-compatible `chat/completions` endpoints
pub struct OpenAiCompatibleGenerator {
    config: OpenAiCompatibleConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiCompatibleGenerator {
    /// Create a generator from explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: OpenAiCompatibleConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// Create a generator from environment configuration
    ///
    /// # Errors
    ///
    /// Returns an error when required configuration is missing.
    pub fn from_env() -> AppResult<Self> {
        Self::new(OpenAiCompatibleConfig::from_env()?)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleGenerator {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn generate_json(&self, prompt: &str) -> AppResult<String> {
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": { "type": "json_object" },
        });

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "submitting generation request"
        );

        let mut request = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            warn!("generation request failed: {e}");
            AppError::external_service("Generation request failed", e.to_string())
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::external_service("Failed to read generation response", e.to_string())
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&text)
                .map_or(text, |parsed| parsed.error.message);
            return Err(AppError::external_service(
                format!("Generation endpoint returned {status}"),
                detail,
            ));
        }

        let completion: CompletionResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service("Malformed generation response envelope", e.to_string())
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AppError::external_service(
                    "No text returned from model",
                    "empty choices or content",
                )
            })
    }
}
