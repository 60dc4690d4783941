// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;

use crate::types::ResourceEstimate;

/// Produces a resource estimate for a log text. Estimation never fails.
#[async_trait]
pub trait Estimator: Send + Sync + 'static {
    async fn estimate(&self, text: &str) -> ResourceEstimate;
}
