// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pricing provider trait for compute cost sources (fixed tables, market-priced
//! networks, usage-priced APIs).

use async_trait::async_trait;

use crate::error::AixError;
use crate::types::PricingQuote;

/// A named source of compute prices.
///
/// Providers are independent: a provider never calls another provider, so the
/// aggregator can query them concurrently.
#[async_trait]
pub trait PricingProvider: Send + Sync + 'static {
    /// Registry key used in pricing bundles (e.g. `"aws"`).
    fn key(&self) -> &str;

    /// Human-readable provider name written into quotes (e.g. `"AWS"`).
    fn display_name(&self) -> &str;

    /// Prices the given CPU and GPU usage units.
    async fn price(&self, cpu_usage: f64, gpu_usage: f64) -> Result<PricingQuote, AixError>;
}
