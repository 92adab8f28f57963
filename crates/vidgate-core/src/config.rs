//! Configuration module
//!
//! This module provides the configuration for the HTTP server and the extractor backend.
//! Values come from the process environment (after loading an optional `.env` file);
//! tests build a [`Config`] from an in-memory map with [`Config::from_vars`].

use std::collections::HashMap;
use std::env;
use std::time::Duration;

const SERVER_PORT: u16 = 3500;
const YTDLP_PATH: &str = "yt-dlp";
const EXTRACTOR_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    environment: String,
    cors_origins: Vec<String>,
    public_base_url: String,
    ytdlp_path: String,
    ytdlp_extra_args: Vec<String>,
    extractor_timeout_secs: u64,
    http_concurrency_limit: usize,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let cors_origins_str = lookup("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{}", server_port));

        let ytdlp_extra_args = lookup("YTDLP_EXTRA_ARGS")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let config = Config {
            server_port,
            environment,
            cors_origins,
            public_base_url,
            ytdlp_path: lookup("YTDLP_PATH").unwrap_or_else(|| YTDLP_PATH.to_string()),
            ytdlp_extra_args,
            extractor_timeout_secs: lookup("EXTRACTOR_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(EXTRACTOR_TIMEOUT_SECS),
            http_concurrency_limit: lookup("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT),
        };

        config.validate()?;
        Ok(config)
    }

    /// Build configuration from a map of variables.
    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, anyhow::Error> {
        Self::from_vars(|key| vars.get(key).cloned())
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.extractor_timeout_secs == 0 {
            return Err(anyhow::anyhow!("EXTRACTOR_TIMEOUT_SECS cannot be 0"));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        if self.ytdlp_path.trim().is_empty() {
            return Err(anyhow::anyhow!("YTDLP_PATH cannot be empty"));
        }

        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PUBLIC_BASE_URL must start with http:// or https://"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn ytdlp_path(&self) -> &str {
        &self.ytdlp_path
    }

    pub fn ytdlp_extra_args(&self) -> &[String] {
        &self.ytdlp_extra_args
    }

    pub fn extractor_timeout(&self) -> Duration {
        Duration::from_secs(self.extractor_timeout_secs)
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.http_concurrency_limit
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}
