// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baseline cloud pricing.
//!
//! Fixed per-unit rates, no network call. The discount providers apply their
//! multipliers to [`baseline_costs`] directly rather than calling this provider.

use aix_core::{AixError, PricingProvider, PricingQuote};
use async_trait::async_trait;

/// USD per CPU unit.
pub const CPU_PRICE: f64 = 0.05;
/// USD per GPU unit.
pub const GPU_PRICE: f64 = 0.25;

/// `(cpu_cost, gpu_cost)` at baseline rates.
pub fn baseline_costs(cpu_usage: f64, gpu_usage: f64) -> (f64, f64) {
    (cpu_usage * CPU_PRICE, gpu_usage * GPU_PRICE)
}

/// Baseline provider registered as `aws`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsProvider;

impl AwsProvider {
    pub const KEY: &'static str = "aws";

    pub fn new() -> Self {
        Self
    }

    pub fn quote(&self, cpu_usage: f64, gpu_usage: f64) -> PricingQuote {
        let (cpu_cost, gpu_cost) = baseline_costs(cpu_usage, gpu_usage);
        PricingQuote::new("AWS", cpu_cost, gpu_cost)
    }
}

#[async_trait]
impl PricingProvider for AwsProvider {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn display_name(&self) -> &str {
        "AWS"
    }

    async fn price(&self, cpu_usage: f64, gpu_usage: f64) -> Result<PricingQuote, AixError> {
        Ok(self.quote(cpu_usage, gpu_usage))
    }
}
