// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock pricing provider for deterministic aggregation tests.
//!
//! `MockPricingProvider` implements `PricingProvider` with a fixed behavior
//! (quote, fail, stall, or panic) and records every request it receives.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use aix_core::{AixError, PricingProvider, PricingQuote};

#[derive(Debug, Clone)]
enum Behavior {
    Quote { cpu_cost: f64, gpu_cost: f64 },
    Fail(String),
    Slow { delay: Duration, cpu_cost: f64, gpu_cost: f64 },
    Panic,
}

/// A pricing provider that answers every request the same way.
#[derive(Debug, Clone)]
pub struct MockPricingProvider {
    key: String,
    behavior: Behavior,
    calls: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl MockPricingProvider {
    fn with_behavior(key: &str, behavior: Behavior) -> Self {
        Self {
            key: key.to_string(),
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Quotes the given component costs regardless of usage.
    pub fn fixed(key: &str, cpu_cost: f64, gpu_cost: f64) -> Self {
        Self::with_behavior(key, Behavior::Quote { cpu_cost, gpu_cost })
    }

    /// Fails every request with a provider error.
    pub fn failing(key: &str, message: &str) -> Self {
        Self::with_behavior(key, Behavior::Fail(message.to_string()))
    }

    /// Sleeps for `delay` before quoting.
    pub fn slow(key: &str, delay: Duration, cpu_cost: f64, gpu_cost: f64) -> Self {
        Self::with_behavior(
            key,
            Behavior::Slow {
                delay,
                cpu_cost,
                gpu_cost,
            },
        )
    }

    /// Panics inside `price`.
    pub fn panicking(key: &str) -> Self {
        Self::with_behavior(key, Behavior::Panic)
    }

    /// The (cpu, gpu) usage pairs this provider was asked to price.
    pub async fn calls(&self) -> Vec<(f64, f64)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PricingProvider for MockPricingProvider {
    fn key(&self) -> &str {
        &self.key
    }

    fn display_name(&self) -> &str {
        &self.key
    }

    async fn price(&self, cpu_usage: f64, gpu_usage: f64) -> Result<PricingQuote, AixError> {
        self.calls.lock().await.push((cpu_usage, gpu_usage));

        match &self.behavior {
            Behavior::Quote { cpu_cost, gpu_cost } => {
                Ok(PricingQuote::new(self.key.as_str(), *cpu_cost, *gpu_cost))
            }
            Behavior::Fail(message) => Err(AixError::provider(&self.key, message.as_str())),
            Behavior::Slow {
                delay,
                cpu_cost,
                gpu_cost,
            } => {
                tokio::time::sleep(*delay).await;
                Ok(PricingQuote::new(self.key.as_str(), *cpu_cost, *gpu_cost))
            }
            Behavior::Panic => panic!("mock provider `{}` panicked", self.key),
        }
    }
}
