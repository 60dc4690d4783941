// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prime Intellect compute pricing provider.
//!
//! Maps GPU usage onto a hardware tier and a token budget, then asks
//! `GET {base_url}/pricing` for the cost of that workload.

use std::time::Duration;

use aix_config::model::PrimeIntellectConfig;
use aix_core::http::describe_error_response;
use aix_core::{AixError, PricingProvider, PricingQuote};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

const KEY: &str = "primeIntellect";
const DISPLAY_NAME: &str = "Prime Intellect";

/// Share of the GPU cost charged for CPU when the API omits `cpu_cost`.
const CPU_SHARE_OF_GPU: f64 = 0.2;

/// Hardware tier for a GPU usage. Boundaries are exclusive: 80 is `a100`, 40 is `a10`.
pub fn compute_tier(gpu_usage: f64) -> &'static str {
    if gpu_usage > 80.0 {
        "h100"
    } else if gpu_usage > 40.0 {
        "a100"
    } else {
        "a10"
    }
}

/// Token budget quoted for a usage pair: `ceil(cpu * 10 + gpu * 20)`.
pub fn estimated_tokens(cpu_usage: f64, gpu_usage: f64) -> u64 {
    (cpu_usage * 10.0 + gpu_usage * 20.0).ceil().max(0.0) as u64
}

#[derive(Debug, Deserialize)]
struct PricingResponse {
    gpu_cost: f64,
    #[serde(default)]
    cpu_cost: Option<f64>,
    #[serde(default)]
    total_cost: Option<f64>,
    #[serde(default)]
    price_per_token: Option<f64>,
}

/// Provider backed by the Prime Intellect pricing API.
///
/// Built without an API key, every request fails and the aggregator records
/// `null` for this provider.
#[derive(Debug, Clone)]
pub struct PrimeIntellectProvider {
    client: Option<reqwest::Client>,
    endpoint: String,
    operation_type: String,
}

impl PrimeIntellectProvider {
    pub fn new(
        api_key: Option<&str>,
        base_url: &str,
        operation_type: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AixError> {
        let client = match api_key {
            Some(key) => {
                let mut headers = HeaderMap::new();
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                        AixError::Config(format!("invalid Prime Intellect API key header value: {e}"))
                    })?,
                );
                let client = reqwest::Client::builder()
                    .default_headers(headers)
                    .timeout(timeout)
                    .build()
                    .map_err(|e| AixError::Provider {
                        provider: KEY.into(),
                        message: format!("failed to build HTTP client: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                Some(client)
            }
            None => None,
        };

        Ok(Self {
            client,
            endpoint: format!("{}/pricing", base_url.trim_end_matches('/')),
            operation_type: operation_type.into(),
        })
    }

    pub fn from_config(config: &PrimeIntellectConfig, api_key: Option<&str>) -> Result<Self, AixError> {
        Self::new(
            api_key,
            &config.base_url,
            config.operation_type.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    async fn fetch(&self, model_type: &str, token_count: u64) -> Result<PricingResponse, AixError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AixError::provider(KEY, "API key not configured"))?;

        let token_count = token_count.to_string();
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            &[
                ("model_type", model_type),
                ("token_count", token_count.as_str()),
                ("operation_type", self.operation_type.as_str()),
            ],
        )
        .map_err(|e| AixError::Config(format!("invalid Prime Intellect base URL: {e}")))?;

        let response = client.get(url).send().await.map_err(|e| AixError::Provider {
            provider: KEY.into(),
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(status = %status, model_type, "compute pricing response received");

        let body = response.text().await.map_err(|e| AixError::Provider {
            provider: KEY.into(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(AixError::provider(
                KEY,
                describe_error_response(DISPLAY_NAME, status.as_u16(), &body),
            ));
        }

        serde_json::from_str(&body).map_err(|e| AixError::Provider {
            provider: KEY.into(),
            message: format!("failed to parse pricing response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl PricingProvider for PrimeIntellectProvider {
    fn key(&self) -> &str {
        KEY
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    async fn price(&self, cpu_usage: f64, gpu_usage: f64) -> Result<PricingQuote, AixError> {
        let model_type = compute_tier(gpu_usage);
        let tokens = estimated_tokens(cpu_usage, gpu_usage);

        let pricing = self.fetch(model_type, tokens).await?;

        // A zero cpu_cost counts as absent.
        let cpu_cost = pricing
            .cpu_cost
            .filter(|c| *c != 0.0)
            .unwrap_or(pricing.gpu_cost * CPU_SHARE_OF_GPU);

        let quote = PricingQuote::new(DISPLAY_NAME, cpu_cost, pricing.gpu_cost).with_compute_tier(
            model_type,
            tokens,
            pricing.price_per_token,
        );

        if let Some(reported) = pricing.total_cost {
            if (reported - quote.total_cost()).abs() > 1e-9 {
                debug!(
                    reported,
                    computed = quote.total_cost(),
                    "reported total differs from component sum"
                );
            }
        }

        Ok(quote)
    }
}
