// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic resource estimation from raw chain-of-thought text.
//!
//! Zero-cost rules: no network, no model call, deterministic output.

use std::sync::LazyLock;

use aix_core::{Estimator, ResourceEstimate};
use async_trait::async_trait;
use regex::Regex;

/// Numbered bold markdown list markers such as `3. **Check the result**`.
static REASONING_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s+\*\*").unwrap());

/// CPU units per whitespace-delimited token.
pub const CPU_PER_TOKEN: f64 = 0.5;
/// CPU units per explicit reasoning step.
pub const CPU_PER_STEP: f64 = 2.0;
/// GPU units per whitespace-delimited token.
pub const GPU_PER_TOKEN: f64 = 0.3;
/// GPU units per explicit reasoning step.
pub const GPU_PER_STEP: f64 = 1.5;
/// Upper bound on heuristic usage.
pub const MAX_USAGE: f64 = 100.0;

/// Estimates CPU/GPU usage from token count and reasoning-step count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceEstimator;

impl ResourceEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Computes the basic estimate. Both usages are clamped to `[0, 100]`.
    pub fn estimate(&self, text: &str) -> ResourceEstimate {
        let tokens = token_count(text) as f64;
        let steps = reasoning_steps(text) as f64;

        let cpu = (tokens * CPU_PER_TOKEN + steps * CPU_PER_STEP).min(MAX_USAGE);
        let gpu = (tokens * GPU_PER_TOKEN + steps * GPU_PER_STEP).min(MAX_USAGE);

        ResourceEstimate::basic(cpu, gpu)
    }
}

#[async_trait]
impl Estimator for ResourceEstimator {
    async fn estimate(&self, text: &str) -> ResourceEstimate {
        ResourceEstimator::estimate(self, text)
    }
}

/// Number of whitespace-delimited tokens. Empty text has none.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of numbered, bold-markdown list markers.
pub fn reasoning_steps(text: &str) -> usize {
    REASONING_STEP.find_iter(text).count()
}
