// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the AIX configuration system.

use aix_config::diagnostic::ConfigError;
use aix_config::model::{AixConfig, SelectionPolicy};
use aix_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_aix_config() {
    let toml = r#"
[general]
log_level = "debug"

[analysis]
api_key = "pi-analysis"
base_url = "http://localhost:9000/v1"
timeout_secs = 5

[market]
base_url = "http://localhost:9001/api/v3"
api_key = "cg-demo"

[prime_intellect]
api_key = "pi-pricing"
operation_type = "training"

[pricing]
providers = ["aws", "superintelligence"]
provider_timeout_secs = 3

[ledger]
cpu_reward_wei = 1000
gpu_reward_wei = 2000

[workflow]
selection = "cheapest"
max_concurrent_entries = 4
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.analysis.api_key.as_deref(), Some("pi-analysis"));
    assert_eq!(config.analysis.timeout_secs, 5);
    assert_eq!(config.analysis.analysis_type, "resource_estimation");
    assert_eq!(config.market.api_key.as_deref(), Some("cg-demo"));
    assert_eq!(config.prime_intellect.operation_type, "training");
    assert_eq!(config.pricing.providers, vec!["aws", "superintelligence"]);
    assert_eq!(config.pricing.provider_timeout_secs, 3);
    assert_eq!(config.ledger.cpu_reward_wei, 1000);
    assert_eq!(config.workflow.selection, SelectionPolicy::Cheapest);
    assert_eq!(config.workflow.max_concurrent_entries, 4);
}

/// An empty file yields the compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.general.log_level, "info");
    assert!(config.analysis.api_key.is_none());
    assert_eq!(config.analysis.base_url, "https://api.primeintellect.ai/v1");
    assert_eq!(config.market.base_url, "https://api.coingecko.com/api/v3");
    assert_eq!(
        config.pricing.providers,
        vec!["aws", "bittensor", "render", "superintelligence", "primeIntellect"]
    );
    assert_eq!(config.workflow.selection, SelectionPolicy::First);
    assert_eq!(config.workflow.max_concurrent_entries, 1);
}

/// Dotted keys override nested fields the same way the env provider does.
#[test]
fn dotted_override_reaches_nested_field() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: AixConfig = Figment::new()
        .merge(Serialized::defaults(AixConfig::default()))
        .merge(Toml::string("[prime_intellect]\napi_key = \"from-toml\"\n"))
        .merge(("prime_intellect.api_key", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.prime_intellect.api_key.as_deref(), Some("from-env"));
}

/// A typo in a known section is reported as an unknown key with a suggestion.
#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[market]
timeout_sec = 4
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should be rejected");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "timeout_sec");
            assert_eq!(suggestion.as_deref(), Some("timeout_secs"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// An unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[server]
port = 3000
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("server"),
        "error should mention the unknown section, got: {err_str}"
    );
}

/// A string where a number is expected is an invalid type.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[pricing]
provider_timeout_secs = "fast"
"#;

    let errors = load_and_validate_str(toml).expect_err("wrong type should be rejected");
    assert!(errors.iter().any(|e| matches!(e, ConfigError::InvalidType { .. })));

    let err_str = format!("{}", load_config_from_str(toml).unwrap_err());
    assert!(
        err_str.contains("invalid type") || err_str.contains("provider_timeout_secs"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_runs_after_parse() {
    let toml = r#"
[pricing]
providers = ["aws", "bitensor"]
"#;

    let errors = load_and_validate_str(toml).expect_err("unknown provider should fail");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownProvider { name, .. } if name == "bitensor")));
}

/// Unknown selection policy strings are rejected at parse time.
#[test]
fn unknown_selection_policy_is_rejected() {
    let toml = r#"
[workflow]
selection = "random"
"#;

    assert!(load_config_from_str(toml).is_err());
}
