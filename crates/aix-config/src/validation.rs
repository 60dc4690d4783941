// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde attributes cannot express: known log levels,
//! usable endpoint URLs, non-zero timeouts, and a well-formed provider list.

use std::collections::HashSet;

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::{AixConfig, KNOWN_PROVIDER_KEYS};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AixConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.general.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "general.log_level `{}` must be one of {}",
                config.general.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (key, url) in [
        ("analysis.base_url", &config.analysis.base_url),
        ("market.base_url", &config.market.base_url),
        ("prime_intellect.base_url", &config.prime_intellect.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{url}` must be an http(s) URL"),
            });
        }
    }

    for (key, secs) in [
        ("analysis.timeout_secs", config.analysis.timeout_secs),
        ("market.timeout_secs", config.market.timeout_secs),
        ("prime_intellect.timeout_secs", config.prime_intellect.timeout_secs),
        ("pricing.provider_timeout_secs", config.pricing.provider_timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1"),
            });
        }
    }

    if config.pricing.providers.is_empty() {
        errors.push(ConfigError::Validation {
            message: "pricing.providers must name at least one provider".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for name in &config.pricing.providers {
        if !KNOWN_PROVIDER_KEYS.contains(&name.as_str()) {
            errors.push(ConfigError::UnknownProvider {
                name: name.clone(),
                suggestion: suggest_key(name, KNOWN_PROVIDER_KEYS),
                valid_keys: KNOWN_PROVIDER_KEYS.join(", "),
            });
        } else if !seen.insert(name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate provider `{name}` in pricing.providers"),
            });
        }
    }

    if config.workflow.max_concurrent_entries == 0 {
        errors.push(ConfigError::Validation {
            message: "workflow.max_concurrent_entries must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
