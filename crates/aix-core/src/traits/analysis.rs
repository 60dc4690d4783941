// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External chain-of-thought analysis service.

use async_trait::async_trait;

use crate::error::AixError;
use crate::types::AnalysisReport;

/// Remote oracle that estimates resource usage for a log text.
#[async_trait]
pub trait AnalysisService: Send + Sync + 'static {
    /// Analyzes `text`. `Ok(None)` means the service answered without data.
    async fn analyze(&self, text: &str) -> Result<Option<AnalysisReport>, AixError>;
}
