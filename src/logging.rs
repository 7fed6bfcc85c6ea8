// ABOUTME: Logging configuration and structured logging setup
// ABOUTME: Configures tracing subscriber levels and output formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitFlux

//! Structured logging setup built on `tracing`.

use anyhow::Result;
use std::env;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output for development
    Pretty,
    /// Single-line output
    Compact,
    /// Structured JSON for log aggregation
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var("LOG_FORMAT").unwrap_or_default().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Initialize logging from `RUST_LOG` and `LOG_FORMAT`
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_from_env() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fitflux_plan_engine=info"));

    match LogFormat::from_env() {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json())
                .try_init()?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact())
                .try_init()?;
        }
    }
    Ok(())
}

/// Initialize logging with defaults suitable for tests and examples
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_default() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::new("fitflux_plan_engine=debug"))
        .with(fmt::layer().compact())
        .try_init()?;
    Ok(())
}
