// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common data model shared by estimators, pricing providers, and the workflow.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use strum::{Display, EnumString};

use crate::bundle::PricingBundle;

/// Currency every pricing quote is denominated in.
pub const USD: &str = "USD";

/// Keys written by enrichment. Input fields with the same name are replaced.
const ENRICHMENT_KEYS: &[&str] = &[
    "CPU",
    "GPU",
    "memory",
    "tokenCount",
    "complexityScore",
    "estimatedCost",
    "estimationSource",
    "providerPricing",
];

/// One chain-of-thought record read from a JSONL input file.
///
/// Only `log` is required; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub log: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LogEntry {
    /// Creates an entry with no extra fields.
    pub fn new(log: impl Into<String>) -> Self {
        Self {
            log: log.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Where a resource estimate came from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EstimateSource {
    /// Local text heuristic only.
    Basic,
    /// Heuristic blended with the external analysis service.
    Enhanced,
}

/// Estimated compute consumption implied by a log text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEstimate {
    pub cpu_usage: f64,
    pub gpu_usage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    pub source: EstimateSource,
}

impl ResourceEstimate {
    /// A heuristic-only estimate with no enhanced fields.
    pub fn basic(cpu_usage: f64, gpu_usage: f64) -> Self {
        Self {
            cpu_usage,
            gpu_usage,
            memory_usage: None,
            token_count: None,
            complexity_score: None,
            estimated_cost: None,
            source: EstimateSource::Basic,
        }
    }
}

/// Result of the external chain-of-thought analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub cpu_usage: f64,
    pub gpu_usage: f64,
    #[serde(default)]
    pub memory_usage: Option<f64>,
    #[serde(default)]
    pub token_count: Option<u64>,
    #[serde(default)]
    pub complexity_score: Option<f64>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
}

/// A log entry annotated with its resource estimate and, after pricing, its bundle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEntry {
    #[serde(flatten)]
    pub entry: LogEntry,
    #[serde(rename = "CPU")]
    pub cpu: String,
    #[serde(rename = "GPU")]
    pub gpu: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation_source: Option<EstimateSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_pricing: Option<PricingBundle>,
}

impl EnrichedEntry {
    /// Annotates `entry` with CPU/GPU only, as the plain conversion does.
    pub fn basic(entry: LogEntry, estimate: &ResourceEstimate) -> Self {
        Self {
            entry: strip_enrichment_keys(entry),
            cpu: format!("{:.2}", estimate.cpu_usage),
            gpu: format!("{:.2}", estimate.gpu_usage),
            memory: None,
            token_count: None,
            complexity_score: None,
            estimated_cost: None,
            estimation_source: None,
            provider_pricing: None,
        }
    }

    /// Annotates `entry` with every estimate field, including its source.
    pub fn detailed(entry: LogEntry, estimate: &ResourceEstimate) -> Self {
        Self {
            memory: estimate.memory_usage.map(|m| format!("{m:.2}")),
            token_count: estimate.token_count,
            complexity_score: estimate.complexity_score,
            estimated_cost: estimate.estimated_cost,
            estimation_source: Some(estimate.source),
            ..Self::basic(entry, estimate)
        }
    }

    /// CPU usage as recorded on the entry (two decimals).
    pub fn cpu_usage(&self) -> f64 {
        self.cpu.parse().unwrap_or(0.0)
    }

    /// GPU usage as recorded on the entry (two decimals).
    pub fn gpu_usage(&self) -> f64 {
        self.gpu.parse().unwrap_or(0.0)
    }

    /// Attaches the pricing bundle computed for this entry.
    pub fn with_pricing(mut self, bundle: PricingBundle) -> Self {
        self.provider_pricing = Some(bundle);
        self
    }
}

fn strip_enrichment_keys(mut entry: LogEntry) -> LogEntry {
    for key in ENRICHMENT_KEYS {
        entry.extra.remove(*key);
    }
    entry
}

/// A single provider's cost for one (cpu, gpu) usage pair.
///
/// `total_cost` is always computed from the two components and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    provider: String,
    cpu_cost: f64,
    gpu_cost: f64,
    total_cost: f64,
    currency: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    token_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_per_token: Option<f64>,
}

impl PricingQuote {
    pub fn new(provider: impl Into<String>, cpu_cost: f64, gpu_cost: f64) -> Self {
        Self {
            provider: provider.into(),
            cpu_cost,
            gpu_cost,
            total_cost: cpu_cost + gpu_cost,
            currency: USD,
            token_price: None,
            tokens: None,
            model_type: None,
            estimated_tokens: None,
            price_per_token: None,
        }
    }

    /// Records the USD price of the provider's token and the token amount
    /// the total cost converts to.
    pub fn with_token_price(mut self, token_price: f64) -> Self {
        self.token_price = Some(token_price);
        self.tokens = Some(self.total_cost / token_price);
        self
    }

    /// Records the hardware tier and token budget a usage-priced API quoted for.
    pub fn with_compute_tier(
        mut self,
        model_type: impl Into<String>,
        estimated_tokens: u64,
        price_per_token: Option<f64>,
    ) -> Self {
        self.model_type = Some(model_type.into());
        self.estimated_tokens = Some(estimated_tokens);
        self.price_per_token = price_per_token;
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn cpu_cost(&self) -> f64 {
        self.cpu_cost
    }

    pub fn gpu_cost(&self) -> f64 {
        self.gpu_cost
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn currency(&self) -> &str {
        self.currency
    }

    pub fn token_price(&self) -> Option<f64> {
        self.token_price
    }

    pub fn tokens(&self) -> Option<f64> {
        self.tokens
    }

    pub fn model_type(&self) -> Option<&str> {
        self.model_type.as_deref()
    }

    pub fn estimated_tokens(&self) -> Option<u64> {
        self.estimated_tokens
    }

    pub fn price_per_token(&self) -> Option<f64> {
        self.price_per_token
    }
}

/// Stages of a mint operation. Transitions are linear; any failure aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MintStage {
    Created,
    Submitted,
    Verified,
    Paid,
    Minted,
}

impl MintStage {
    /// The stage that follows this one, or `None` once minted.
    pub fn next(self) -> Option<MintStage> {
        match self {
            MintStage::Created => Some(MintStage::Submitted),
            MintStage::Submitted => Some(MintStage::Verified),
            MintStage::Verified => Some(MintStage::Paid),
            MintStage::Paid => Some(MintStage::Minted),
            MintStage::Minted => None,
        }
    }
}

/// 32-byte task identifier submitted to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub [u8; 32]);

impl TaskId {
    /// Derives a task id from the input source name and a millisecond timestamp.
    ///
    /// Hashes the source followed by the decimal timestamp, so the same file
    /// processed at different times gets distinct ids.
    pub fn derive(source: &str, timestamp_millis: u128) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update(timestamp_millis.to_string().as_bytes());
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for TaskId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Receipt for a submitted or verified ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerReceipt {
    pub tx_hash: String,
}

/// Receipt for the payment transaction, carrying the minted amount event if emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub tx_hash: String,
    /// Minted token amount in wei (18 decimals), from the task-paid event.
    pub minted_amount_wei: Option<u128>,
}

/// Terminal record of one workflow mint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResult {
    pub task_id: TaskId,
    pub cpu_usage: f64,
    pub gpu_usage: f64,
    pub provider: String,
    pub cost: f64,
    /// Minted amount in whole tokens, e.g. `"12.5"`.
    pub minted_amount: String,
}

/// Formats a wei amount as a decimal token amount with 18 decimals.
///
/// Trailing zeros are trimmed but at least one fractional digit is kept,
/// so one token renders as `"1.0"`.
pub fn format_token_amount(wei: u128) -> String {
    const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;
    let whole = wei / WEI_PER_TOKEN;
    let frac = format!("{:018}", wei % WEI_PER_TOKEN);
    let trimmed = frac.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_keeps_extra_fields() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"log":"step","agent":"a1","ts":3}"#).unwrap();
        assert_eq!(entry.log, "step");
        assert_eq!(entry.extra["agent"], "a1");
        assert_eq!(entry.extra["ts"], 3);
    }

    #[test]
    fn log_entry_requires_log_field() {
        let result = serde_json::from_str::<LogEntry>(r#"{"agent":"a1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn basic_enrichment_formats_two_decimals() {
        let entry = LogEntry::new("hello world");
        let enriched = EnrichedEntry::basic(entry, &ResourceEstimate::basic(1.0, 0.6));
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["CPU"], "1.00");
        assert_eq!(json["GPU"], "0.60");
        assert_eq!(json["log"], "hello world");
        assert!(json.get("estimationSource").is_none());
        assert!(json.get("providerPricing").is_none());
    }

    #[test]
    fn enrichment_replaces_existing_fields() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"log":"x","CPU":"99.00","note":"keep"}"#).unwrap();
        let enriched = EnrichedEntry::basic(entry, &ResourceEstimate::basic(0.5, 0.3));
        let text = serde_json::to_string(&enriched).unwrap();
        assert_eq!(text.matches("\"CPU\"").count(), 1);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["CPU"], "0.50");
        assert_eq!(json["note"], "keep");
    }

    #[test]
    fn detailed_enrichment_carries_enhanced_fields() {
        let estimate = ResourceEstimate {
            cpu_usage: 40.0,
            gpu_usage: 20.0,
            memory_usage: Some(512.256),
            token_count: Some(900),
            complexity_score: Some(0.7),
            estimated_cost: Some(1.25),
            source: EstimateSource::Enhanced,
        };
        let enriched = EnrichedEntry::detailed(LogEntry::new("t"), &estimate);
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["memory"], "512.26");
        assert_eq!(json["tokenCount"], 900);
        assert_eq!(json["estimationSource"], "enhanced");
        assert_eq!(enriched.cpu_usage(), 40.0);
    }

    #[test]
    fn quote_total_is_sum_of_components() {
        let quote = PricingQuote::new("AWS", 0.5, 5.0);
        assert_eq!(quote.total_cost(), quote.cpu_cost() + quote.gpu_cost());
        assert_eq!(quote.currency(), "USD");
    }

    #[test]
    fn quote_token_conversion() {
        let quote = PricingQuote::new("Superintelligence", 1.0, 4.0).with_token_price(5.0);
        assert_eq!(quote.token_price(), Some(5.0));
        assert_eq!(quote.tokens(), Some(1.0));
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["tokenPrice"], 5.0);
        assert_eq!(json["totalCost"], 5.0);
        assert!(json.get("modelType").is_none());
    }

    #[test]
    fn mint_stage_is_linear() {
        let mut stage = MintStage::Created;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(
            seen,
            vec![
                MintStage::Created,
                MintStage::Submitted,
                MintStage::Verified,
                MintStage::Paid,
                MintStage::Minted,
            ]
        );
        assert_eq!(MintStage::Verified.to_string(), "verified");
    }

    #[test]
    fn task_id_depends_on_source_and_time() {
        let a = TaskId::derive("cot.jsonl", 1_745_781_648_056);
        let b = TaskId::derive("cot.jsonl", 1_745_781_648_056);
        let c = TaskId::derive("cot.jsonl", 1_745_781_648_057);
        let d = TaskId::derive("other.jsonl", 1_745_781_648_056);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        let rendered = a.to_string();
        assert!(rendered.starts_with("0x"));
        assert_eq!(rendered.len(), 66);
    }

    #[test]
    fn token_amount_formatting() {
        assert_eq!(format_token_amount(0), "0.0");
        assert_eq!(format_token_amount(1_000_000_000_000_000_000), "1.0");
        assert_eq!(format_token_amount(12_500_000_000_000_000_000), "12.5");
        assert_eq!(format_token_amount(1), "0.000000000000000001");
    }
}
