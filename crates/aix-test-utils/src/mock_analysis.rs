// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock analysis oracle for estimator tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use aix_core::{AixError, AnalysisReport, AnalysisService};

/// An analysis service with a canned answer. Records the texts it was sent.
#[derive(Debug, Clone)]
pub struct MockAnalysisService {
    response: Result<Option<AnalysisReport>, String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAnalysisService {
    fn with_response(response: Result<Option<AnalysisReport>, String>) -> Self {
        Self {
            response,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answers every request with `report`.
    pub fn with_report(report: AnalysisReport) -> Self {
        Self::with_response(Ok(Some(report)))
    }

    /// Answers with no data.
    pub fn empty() -> Self {
        Self::with_response(Ok(None))
    }

    /// Fails every request.
    pub fn failing(message: &str) -> Self {
        Self::with_response(Err(message.to_string()))
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, text: &str) -> Result<Option<AnalysisReport>, AixError> {
        self.calls.lock().await.push(text.to_string());
        self.response.clone().map_err(|message| AixError::Analysis {
            message,
            source: None,
        })
    }
}
