// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./aix.toml` > `~/.config/aix/aix.toml` > `/etc/aix/aix.toml`
//! with environment variable overrides via `AIX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AixConfig;

/// Section names, longest first so `prime_intellect_` wins over shorter prefixes.
const SECTIONS: &[&str] = &[
    "prime_intellect",
    "analysis",
    "workflow",
    "general",
    "pricing",
    "market",
    "ledger",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/aix/aix.toml` (system-wide)
/// 3. `~/.config/aix/aix.toml` (user XDG config)
/// 4. `./aix.toml` (local directory)
/// 5. `AIX_*` environment variables
pub fn load_config() -> Result<AixConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AixConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AixConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AixConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AixConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AixConfig::default()))
        .merge(Toml::file("/etc/aix/aix.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("aix/aix.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("aix.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because section and key
/// names contain underscores: `AIX_PRIME_INTELLECT_API_KEY` must map to
/// `prime_intellect.api_key`.
fn env_provider() -> Env {
    Env::prefixed("AIX_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("prime_intellect_api_key"), "prime_intellect.api_key");
        assert_eq!(map_env_key("analysis_timeout_secs"), "analysis.timeout_secs");
        assert_eq!(
            map_env_key("pricing_provider_timeout_secs"),
            "pricing.provider_timeout_secs"
        );
        assert_eq!(map_env_key("general_log_level"), "general.log_level");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }

    #[test]
    fn env_override_applies() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AIX_PRIME_INTELLECT_API_KEY", "pi-from-env");
            jail.set_env("AIX_WORKFLOW_SELECTION", "cheapest");
            jail.create_file("aix.toml", "[general]\nlog_level = \"debug\"\n")?;

            let config = load_config_from_path(Path::new("aix.toml"))?;
            assert_eq!(config.prime_intellect.api_key.as_deref(), Some("pi-from-env"));
            assert_eq!(config.general.log_level, "debug");
            assert_eq!(
                config.workflow.selection,
                crate::model::SelectionPolicy::Cheapest
            );
            Ok(())
        });
    }
}
