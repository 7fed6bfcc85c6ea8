// ABOUTME: Unified error handling for the plan engine with typed error codes
// ABOUTME: Maps errors to the wire shapes consumed by route handlers and clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! # Unified Error Handling
//!
//! Centralized error types for the plan engine. Three error classes flow
//! through here:
//!
//! - **Input validation** — every failing field is collected and reported
//!   together as `{"errors": [...]}`, so a client can render all problems at
//!   once. Never fatal to the process.
//! - **Upstream dependency failures** — empty catalog, generation call
//!   failure/timeout, malformed model JSON. Fatal to the individual request;
//!   diagnostic detail (raw model text, source error message) is attached,
//!   never silently discarded.
//! - **Unexpected internal errors** — converted at the boundary into a
//!   generic response so nothing escapes unformatted.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Convenient result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Standard error codes used throughout the plan engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// One or more request fields failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A value was out of its documented range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange,
    /// The catalog had no records to recommend from
    #[serde(rename = "RESOURCE_UNAVAILABLE")]
    ResourceUnavailable,
    /// The external generation service failed or timed out
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// The generation service returned text that is not valid JSON
    #[serde(rename = "INVALID_MODEL_OUTPUT")]
    InvalidModelOutput,
    /// Required configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Catch-all for unexpected internal failures
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code a handler should map this error to
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::ValueOutOfRange => 400,
            Self::ResourceUnavailable => 503,
            Self::ExternalServiceError => 502,
            Self::InvalidModelOutput | Self::ConfigError | Self::InternalError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::ResourceUnavailable => "RESOURCE_UNAVAILABLE",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::InvalidModelOutput => "INVALID_MODEL_OUTPUT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(s)
    }
}

/// Additional context attached to an error for diagnosis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request identifier for log correlation
    pub request_id: Option<String>,
    /// Per-field validation messages (validation errors only)
    pub field_errors: Vec<String>,
    /// Raw model output preserved when JSON parsing fails
    pub raw_output: Option<String>,
    /// Underlying error message from an upstream dependency
    pub source_message: Option<String>,
}

/// Application error with code, message, and diagnostic context
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Typed error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Diagnostic context
    pub context: ErrorContext,
}

impl AppError {
    /// Create a new application error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext {
                request_id: Some(Uuid::new_v4().to_string()),
                ..ErrorContext::default()
            },
        }
    }

    /// Invalid input error for a single field or general misuse
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Validation error carrying every failing field message
    #[must_use]
    pub fn validation(field_errors: Vec<String>) -> Self {
        let mut err = Self::new(ErrorCode::InvalidInput, "Request validation failed");
        err.context.field_errors = field_errors;
        err
    }

    /// The catalog (or another required resource) had nothing to offer
    pub fn resource_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceUnavailable, message)
    }

    /// An upstream service call failed; the source message is preserved
    pub fn external_service(message: impl Into<String>, source: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorCode::ExternalServiceError, message);
        err.context.source_message = Some(source.into());
        err
    }

    /// The model returned text that could not be parsed as JSON
    pub fn invalid_model_output(message: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut err = Self::new(ErrorCode::InvalidModelOutput, message);
        err.context.raw_output = Some(raw.into());
        err
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach a request id for log correlation
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("Serialization error: {err}"))
    }
}

/// Wire representation of an error, matching the response shapes clients
/// already consume
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    /// Validation failure: every failing field, reported together
    Validation {
        /// All field-level validation messages
        errors: Vec<String>,
    },
    /// Model returned unparseable output; raw text kept for diagnosis
    ModelOutput {
        /// Generic error message
        error: String,
        /// Raw model text exactly as received
        raw: String,
    },
    /// Upstream or internal failure with optional detail
    Generic {
        /// Generic error message
        error: String,
        /// Underlying detail, when available
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        if err.code == ErrorCode::InvalidInput && !err.context.field_errors.is_empty() {
            return Self::Validation {
                errors: err.context.field_errors,
            };
        }
        if let Some(raw) = err.context.raw_output {
            return Self::ModelOutput {
                error: err.message,
                raw,
            };
        }
        Self::Generic {
            error: err.message,
            message: err.context.source_message,
        }
    }
}
