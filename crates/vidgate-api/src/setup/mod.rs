//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vidgate_core::Config;
use vidgate_extractor::{Extractor, YtDlpConfig, YtDlpExtractor};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let extractor = YtDlpExtractor::new(YtDlpConfig::from_config(&config));

    // A missing binary should not stop the process; /ready reports it.
    match extractor.health_check().await {
        Ok(()) => tracing::info!(
            extractor = extractor.id(),
            binary = %config.ytdlp_path(),
            "Extractor available"
        ),
        Err(e) => tracing::warn!(
            extractor = extractor.id(),
            binary = %config.ytdlp_path(),
            error = %e,
            "Extractor health check failed"
        ),
    }

    let state = AppState::new(config.clone(), Arc::new(extractor));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
