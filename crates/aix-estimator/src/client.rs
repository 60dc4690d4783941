// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Prime Intellect chain-of-thought analysis API.
//!
//! Provides [`AnalysisClient`] which handles bearer authentication, request
//! construction, and one retry on transient errors.

use std::time::Duration;

use aix_config::model::AnalysisConfig;
use aix_core::http::{describe_error_response, is_transient_status};
use aix_core::{AixError, AnalysisReport, AnalysisService};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::{debug, warn};

/// Body of `POST {base_url}/analyze`.
#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    analysis_type: &'a str,
}

/// HTTP client for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    endpoint: String,
    analysis_type: String,
    max_retries: u32,
}

impl AnalysisClient {
    /// Creates a client authenticated with `api_key`.
    pub fn new(
        api_key: &str,
        base_url: &str,
        analysis_type: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AixError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                AixError::Config(format!("invalid analysis API key header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AixError::Analysis {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/analyze", base_url.trim_end_matches('/')),
            analysis_type: analysis_type.into(),
            max_retries: 1,
        })
    }

    /// Creates a client from the `[analysis]` config section.
    pub fn from_config(config: &AnalysisConfig, api_key: &str) -> Result<Self, AixError> {
        Self::new(
            api_key,
            &config.base_url,
            config.analysis_type.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Sends the text for analysis.
    ///
    /// A JSON `null` body is reported as `Ok(None)`. Retries once after one
    /// second on 429/500/502/503.
    pub async fn analyze_text(&self, text: &str) -> Result<Option<AnalysisReport>, AixError> {
        let request = AnalyzeRequest {
            text,
            analysis_type: &self.analysis_type,
        };

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying analysis request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .json(&request)
                .send()
                .await
                .map_err(|e| AixError::Analysis {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "analysis response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| AixError::Analysis {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str::<Option<AnalysisReport>>(&body).map_err(|e| {
                    AixError::Analysis {
                        message: format!("failed to parse analysis response: {e}"),
                        source: Some(Box::new(e)),
                    }
                });
            }

            let body = response.text().await.unwrap_or_default();
            let message = describe_error_response("Prime Intellect", status.as_u16(), &body);

            if is_transient_status(status.as_u16()) && attempt < self.max_retries {
                warn!(status = %status, "transient analysis error, will retry");
                last_error = Some(AixError::Analysis {
                    message,
                    source: None,
                });
                continue;
            }

            return Err(AixError::Analysis {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| AixError::Analysis {
            message: "analysis request failed after retries".into(),
            source: None,
        }))
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, text: &str) -> Result<Option<AnalysisReport>, AixError> {
        self.analyze_text(text).await
    }
}
