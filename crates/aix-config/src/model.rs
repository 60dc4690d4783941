// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the AIX pricing pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Provider keys the pricing registry knows how to build.
pub const KNOWN_PROVIDER_KEYS: &[&str] = &[
    "aws",
    "bittensor",
    "render",
    "superintelligence",
    "primeIntellect",
];

/// Top-level AIX configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AixConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// External chain-of-thought analysis service.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Market price feed used by token-denominated providers.
    #[serde(default)]
    pub market: MarketConfig,

    /// Prime Intellect compute pricing API.
    #[serde(default)]
    pub prime_intellect: PrimeIntellectConfig,

    /// Provider registry settings.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Local ledger settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Workflow orchestration settings.
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Chain-of-thought analysis service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Bearer token. `None` falls back to `PRIME_INTELLECT_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL; requests go to `{base_url}/analyze`.
    #[serde(default = "default_prime_intellect_url")]
    pub base_url: String,

    /// Value sent as `analysis_type`.
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,

    /// Request timeout in seconds.
    #[serde(default = "default_analysis_timeout")]
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_prime_intellect_url(),
            analysis_type: default_analysis_type(),
            timeout_secs: default_analysis_timeout(),
        }
    }
}

fn default_prime_intellect_url() -> String {
    "https://api.primeintellect.ai/v1".to_string()
}

fn default_analysis_type() -> String {
    "resource_estimation".to_string()
}

fn default_analysis_timeout() -> u64 {
    30
}

/// Market price feed configuration (CoinGecko simple-price API).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarketConfig {
    /// API base URL; requests go to `{base_url}/simple/price`.
    #[serde(default = "default_market_url")]
    pub base_url: String,

    /// Optional demo API key sent as `x-cg-demo-api-key`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_market_timeout")]
    pub timeout_secs: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_url(),
            api_key: None,
            timeout_secs: default_market_timeout(),
        }
    }
}

fn default_market_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_market_timeout() -> u64 {
    10
}

/// Prime Intellect compute pricing API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrimeIntellectConfig {
    /// Bearer token. `None` falls back to `PRIME_INTELLECT_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL; requests go to `{base_url}/pricing`.
    #[serde(default = "default_prime_intellect_url")]
    pub base_url: String,

    /// Value sent as `operation_type`.
    #[serde(default = "default_operation_type")]
    pub operation_type: String,

    /// Request timeout in seconds.
    #[serde(default = "default_analysis_timeout")]
    pub timeout_secs: u64,
}

impl Default for PrimeIntellectConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_prime_intellect_url(),
            operation_type: default_operation_type(),
            timeout_secs: default_analysis_timeout(),
        }
    }
}

fn default_operation_type() -> String {
    "inference".to_string()
}

/// Pricing provider registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Providers to register, in bundle order.
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,

    /// Upper bound on a single provider's quote; slower providers become `null`.
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            provider_timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_providers() -> Vec<String> {
    KNOWN_PROVIDER_KEYS.iter().map(|k| k.to_string()).collect()
}

fn default_provider_timeout() -> u64 {
    20
}

/// Local ledger configuration.
///
/// Reward rates are in wei (18 decimals) per usage unit.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Wei minted per CPU unit.
    #[serde(default = "default_cpu_reward")]
    pub cpu_reward_wei: u64,

    /// Wei minted per GPU unit.
    #[serde(default = "default_gpu_reward")]
    pub gpu_reward_wei: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cpu_reward_wei: default_cpu_reward(),
            gpu_reward_wei: default_gpu_reward(),
        }
    }
}

fn default_cpu_reward() -> u64 {
    10_000_000_000_000_000 // 0.01 AIX
}

fn default_gpu_reward() -> u64 {
    50_000_000_000_000_000 // 0.05 AIX
}

/// How the workflow picks the quote to mint against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// First provider in registry order that produced a quote.
    #[default]
    First,
    /// Provider with the lowest total cost.
    Cheapest,
}

/// Workflow orchestration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Default provider selection policy when no key is given.
    #[serde(default)]
    pub selection: SelectionPolicy,

    /// Number of log entries estimated and priced at the same time.
    #[serde(default = "default_max_concurrent_entries")]
    pub max_concurrent_entries: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            selection: SelectionPolicy::default(),
            max_concurrent_entries: default_max_concurrent_entries(),
        }
    }
}

fn default_max_concurrent_entries() -> usize {
    1
}
