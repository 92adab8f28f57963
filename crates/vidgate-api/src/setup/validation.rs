//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use vidgate_core::Config;

/// Extractor timeouts above this are accepted but logged.
const LONG_EXTRACTOR_TIMEOUT_SECS: u64 = 300;

/// Validate critical configuration values
///
/// Runs [`Config::validate`] and adds the checks that only matter for a deployed server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    // Validate CORS configuration in production
    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if is_production && config.public_base_url().contains("://localhost") {
        tracing::warn!(
            public_base_url = %config.public_base_url(),
            "PUBLIC_BASE_URL points at localhost in production - documentation links will be wrong"
        );
    }

    if config.extractor_timeout().as_secs() > LONG_EXTRACTOR_TIMEOUT_SECS {
        tracing::warn!(
            extractor_timeout_secs = config.extractor_timeout().as_secs(),
            "EXTRACTOR_TIMEOUT_SECS is very high - stalled downloads will hold connections"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_map(&map).expect("valid config")
    }

    #[test]
    fn test_development_defaults_pass() {
        assert!(validate_config(&config(&[])).is_ok());
    }

    #[test]
    fn test_production_with_explicit_origins_passes() {
        let config = config(&[
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://app.example.com"),
            ("PUBLIC_BASE_URL", "https://api.example.com"),
        ]);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_long_timeout_is_only_a_warning() {
        assert!(validate_config(&config(&[("EXTRACTOR_TIMEOUT_SECS", "900")])).is_ok());
    }
}
