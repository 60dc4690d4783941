// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires configured components into a [`WorkflowOrchestrator`].

use std::sync::Arc;

use aix_config::model::AixConfig;
use aix_config::resolve_api_key;
use aix_core::{AixError, Estimator};
use aix_estimator::{AnalysisClient, EnhancedResourceEstimator, ResourceEstimator};
use aix_ledger::InMemoryLedger;
use aix_pricing::PricingAggregator;
use aix_workflow::WorkflowOrchestrator;
use tracing::{info, warn};

/// Basic estimator, or the analysis-backed one when `enhanced` is set and a key exists.
fn build_estimator(config: &AixConfig, enhanced: bool) -> Result<Arc<dyn Estimator>, AixError> {
    if !enhanced {
        return Ok(Arc::new(ResourceEstimator::new()));
    }

    match resolve_api_key(config.analysis.api_key.as_deref()) {
        Some(key) => {
            let client = AnalysisClient::from_config(&config.analysis, &key)?;
            info!(base_url = %config.analysis.base_url, "enhanced estimation enabled");
            Ok(Arc::new(EnhancedResourceEstimator::new(Arc::new(client))))
        }
        None => {
            warn!("no analysis API key configured, using basic estimation");
            Ok(Arc::new(ResourceEstimator::new()))
        }
    }
}

/// Builds the orchestrator for one command invocation.
pub fn build_orchestrator(
    config: &AixConfig,
    enhanced: bool,
) -> Result<WorkflowOrchestrator, AixError> {
    let estimator = build_estimator(config, enhanced)?;

    let pi_key = resolve_api_key(config.prime_intellect.api_key.as_deref());
    if pi_key.is_none() && config.pricing.providers.iter().any(|p| p == "primeIntellect") {
        warn!("no Prime Intellect API key configured, its quotes will be null");
    }
    let pricing = PricingAggregator::from_config(config, pi_key.as_deref())?;
    let ledger = Arc::new(InMemoryLedger::new(&config.ledger));

    Ok(WorkflowOrchestrator::new(estimator, pricing, ledger)
        .with_max_concurrent_entries(config.workflow.max_concurrent_entries)
        .with_detailed_fields(enhanced))
}
