// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the AIX pricing pipeline.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use aix_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("providers: {:?}", config.pricing.providers);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::AixConfig;

/// Environment variable consulted when no Prime Intellect API key is configured.
pub const PRIME_INTELLECT_API_KEY_ENV: &str = "PRIME_INTELLECT_API_KEY";

/// Load configuration from the XDG hierarchy and validate it.
///
/// On Figment errors the TOML sources are re-read so diagnostics can point
/// at the offending key.
pub fn load_and_validate() -> Result<AixConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a specific TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<AixConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Resolve an API key: the configured value first, then `PRIME_INTELLECT_API_KEY`.
///
/// Empty strings count as unset.
pub fn resolve_api_key(configured: Option<&str>) -> Option<String> {
    resolve_api_key_with(configured, |name| std::env::var(name).ok())
}

fn resolve_api_key_with(
    configured: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
        .or_else(|| lookup(PRIME_INTELLECT_API_KEY_ENV).filter(|k| !k.trim().is_empty()))
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/aix/aix.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("aix/aix.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("aix.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
