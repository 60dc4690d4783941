// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end pipeline: estimate, price, select, mint.
//!
//! Within one entry the stages run strictly in order. Independent entries are
//! processed up to `max_concurrent_entries` at a time and results keep input
//! order. Minting walks `Created -> Submitted -> Verified -> Paid -> Minted`
//! and stops at the first failure; ledger calls are never retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use aix_core::{
    AixError, EnrichedEntry, Estimator, Ledger, LogEntry, MintResult, MintStage, TaskId,
    format_token_amount,
};
use aix_pricing::PricingAggregator;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::io::{enriched_output_path, load_log_entries, priced_output_path, save_json};
use crate::selection::{Preferred, ProviderSelector};

/// Files written by [`WorkflowOrchestrator::process_file`] and the priced entries.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub enriched_path: PathBuf,
    pub priced_path: PathBuf,
    pub entries: Vec<EnrichedEntry>,
}

/// Result of a full workflow run over one input file.
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub output: ProcessOutput,
    /// Registry key of the provider the mint was paid against.
    pub selected_key: String,
    pub mint: MintResult,
}

/// Drives log entries through estimation, pricing, and minting.
pub struct WorkflowOrchestrator {
    estimator: Arc<dyn Estimator>,
    pricing: PricingAggregator,
    ledger: Arc<dyn Ledger>,
    max_concurrent_entries: usize,
    detailed: bool,
}

impl WorkflowOrchestrator {
    pub fn new(
        estimator: Arc<dyn Estimator>,
        pricing: PricingAggregator,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        Self {
            estimator,
            pricing,
            ledger,
            max_concurrent_entries: 1,
            detailed: false,
        }
    }

    /// Number of entries estimated and priced at the same time. Zero is treated as one.
    pub fn with_max_concurrent_entries(mut self, n: usize) -> Self {
        self.max_concurrent_entries = n.max(1);
        self
    }

    /// Writes memory, token count, complexity, cost, and source alongside CPU/GPU.
    pub fn with_detailed_fields(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    async fn enrich(&self, entry: LogEntry) -> EnrichedEntry {
        let estimate = self.estimator.estimate(&entry.log).await;
        if self.detailed {
            EnrichedEntry::detailed(entry, &estimate)
        } else {
            EnrichedEntry::basic(entry, &estimate)
        }
    }

    async fn enrich_and_price(&self, entry: LogEntry) -> EnrichedEntry {
        let enriched = self.enrich(entry).await;
        // Priced on the recorded two-decimal values, not the raw estimate.
        let bundle = self
            .pricing
            .price_all(enriched.cpu_usage(), enriched.gpu_usage())
            .await;
        enriched.with_pricing(bundle)
    }

    /// Annotates every entry with its resource estimate.
    pub async fn convert(&self, entries: Vec<LogEntry>) -> Vec<EnrichedEntry> {
        stream::iter(entries)
            .map(|entry| self.enrich(entry))
            .buffered(self.max_concurrent_entries)
            .collect()
            .await
    }

    /// Annotates every entry with its estimate and pricing bundle.
    pub async fn run(&self, entries: Vec<LogEntry>) -> Vec<EnrichedEntry> {
        stream::iter(entries)
            .map(|entry| self.enrich_and_price(entry))
            .buffered(self.max_concurrent_entries)
            .collect()
            .await
    }

    /// Converts a JSONL file into an enriched JSON array at `output`.
    ///
    /// `output` defaults to the input path with `.jsonl` replaced by `.json`.
    pub async fn convert_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<(PathBuf, Vec<EnrichedEntry>), AixError> {
        let entries = load_log_entries(input).await?;
        let enriched = self.convert(entries).await;
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| enriched_output_path(input));
        save_json(&output, &enriched).await?;
        info!(input = %input.display(), output = %output.display(), entries = enriched.len(), "converted");
        Ok((output, enriched))
    }

    /// Writes `<input>.json` (estimates) and `<input>-with-pricing.json` (estimates and pricing).
    ///
    /// Input errors abort before either file is written.
    pub async fn process_file(&self, input: &Path) -> Result<ProcessOutput, AixError> {
        let entries = load_log_entries(input).await?;
        info!(input = %input.display(), entries = entries.len(), "processing");

        let priced = self.run(entries).await;

        let enriched_path = enriched_output_path(input);
        let without_pricing: Vec<EnrichedEntry> = priced
            .iter()
            .cloned()
            .map(|mut e| {
                e.provider_pricing = None;
                e
            })
            .collect();
        save_json(&enriched_path, &without_pricing).await?;
        info!(output = %enriched_path.display(), "resource estimates written");

        let priced_path = priced_output_path(input);
        save_json(&priced_path, &priced).await?;
        info!(output = %priced_path.display(), "provider pricing written");

        Ok(ProcessOutput {
            enriched_path,
            priced_path,
            entries: priced,
        })
    }

    /// Processes `input` and mints for its first entry.
    pub async fn run_workflow(
        &self,
        input: &Path,
        selector: &dyn ProviderSelector,
    ) -> Result<WorkflowReport, AixError> {
        let output = self.process_file(input).await?;
        let first = output
            .entries
            .first()
            .ok_or_else(|| AixError::Selection(format!("{} has no entries", input.display())))?;

        let source = input.display().to_string();
        let (selected_key, mint) = self.select_and_mint(&source, first, selector).await?;

        Ok(WorkflowReport {
            output,
            selected_key,
            mint,
        })
    }

    /// Mints against an explicitly named provider.
    pub async fn mint_with_provider(
        &self,
        source: &str,
        entry: &EnrichedEntry,
        provider_key: &str,
    ) -> Result<MintResult, AixError> {
        let selector = Preferred(provider_key.to_string());
        self.select_and_mint(source, entry, &selector)
            .await
            .map(|(_, mint)| mint)
    }

    /// Selects a quote from the entry's bundle and runs the mint on the ledger.
    ///
    /// Returns the selected provider key with the mint result.
    pub async fn select_and_mint(
        &self,
        source: &str,
        entry: &EnrichedEntry,
        selector: &dyn ProviderSelector,
    ) -> Result<(String, MintResult), AixError> {
        let bundle = entry
            .provider_pricing
            .as_ref()
            .ok_or_else(|| AixError::Selection("entry has no provider pricing".into()))?;
        let (key, quote) = selector.select(bundle)?;
        info!(provider = key, total_cost = quote.total_cost(), "provider selected");

        let timestamp = chrono::Utc::now().timestamp_millis().max(0) as u128;
        let task_id = TaskId::derive(source, timestamp);
        let payload = serde_json::to_vec(entry)?;
        let cpu_units = usage_units(entry.cpu_usage());
        let gpu_units = usage_units(entry.gpu_usage());

        let mut stage = MintStage::Created;
        info!(task_id = %task_id, stage = %stage, "mint started");

        let submit = self
            .ledger
            .submit_task(&task_id, &payload, cpu_units, gpu_units)
            .await
            .map_err(|e| at_stage(e, MintStage::Submitted))?;
        stage = advance(stage, &task_id, &submit.tx_hash);

        let verified = self
            .ledger
            .verify_task(&task_id)
            .await
            .map_err(|e| at_stage(e, MintStage::Verified))?;
        if !verified {
            return Err(AixError::ledger(
                MintStage::Verified,
                format!("task {task_id} rejected by validator"),
            ));
        }
        stage = advance(stage, &task_id, "");

        let payment = self
            .ledger
            .pay_for_task(&task_id)
            .await
            .map_err(|e| at_stage(e, MintStage::Paid))?;
        stage = advance(stage, &task_id, &payment.tx_hash);

        let minted_wei = payment.minted_amount_wei.ok_or_else(|| {
            warn!(task_id = %task_id, "payment emitted no minted amount");
            AixError::ledger(MintStage::Minted, "payment emitted no minted amount")
        })?;
        stage = advance(stage, &task_id, "");
        debug_assert_eq!(stage, MintStage::Minted);

        let result = MintResult {
            task_id,
            cpu_usage: entry.cpu_usage(),
            gpu_usage: entry.gpu_usage(),
            provider: quote.provider().to_string(),
            cost: quote.total_cost(),
            minted_amount: format_token_amount(minted_wei),
        };
        info!(task_id = %task_id, minted = %result.minted_amount, "mint complete");

        Ok((key.to_string(), result))
    }
}

/// Usage as whole ledger units.
fn usage_units(usage: f64) -> u64 {
    usage.round().max(0.0) as u64
}

fn advance(stage: MintStage, task_id: &TaskId, tx_hash: &str) -> MintStage {
    let next = stage.next().unwrap_or(stage);
    if tx_hash.is_empty() {
        info!(task_id = %task_id, stage = %next, "mint stage reached");
    } else {
        info!(task_id = %task_id, stage = %next, tx_hash, "mint stage reached");
    }
    next
}

/// Attributes a non-ledger error to the stage being attempted.
fn at_stage(err: AixError, stage: MintStage) -> AixError {
    match err {
        AixError::Ledger { .. } => err,
        other => AixError::ledger(stage, other.to_string()),
    }
}
