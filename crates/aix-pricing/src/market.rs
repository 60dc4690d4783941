// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the CoinGecko-style token price feed.
//!
//! `GET {base_url}/simple/price?ids=<coin>&vs_currencies=usd` answers
//! `{"<coin>": {"usd": <price>}}`.

use std::collections::HashMap;
use std::time::Duration;

use aix_config::model::MarketConfig;
use aix_core::AixError;
use aix_core::http::describe_error_response;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

/// Name used in errors raised by the feed itself.
const FEED: &str = "market";

#[derive(Debug, Deserialize)]
struct CoinPrice {
    usd: Option<f64>,
}

/// Client for USD token prices.
#[derive(Debug, Clone)]
pub struct MarketPriceClient {
    client: reqwest::Client,
    endpoint: String,
}

impl MarketPriceClient {
    /// Creates a client for `base_url`. `api_key` is sent as `x-cg-demo-api-key`.
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self, AixError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            headers.insert(
                "x-cg-demo-api-key",
                HeaderValue::from_str(key).map_err(|e| {
                    AixError::Config(format!("invalid market API key header value: {e}"))
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AixError::Provider {
                provider: FEED.into(),
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/simple/price", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &MarketConfig) -> Result<Self, AixError> {
        Self::new(
            &config.base_url,
            config.api_key.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Current USD price of `coin_id`.
    ///
    /// A missing coin entry, a missing `usd` field, or a non-positive price
    /// is an error.
    pub async fn usd_price(&self, coin_id: &str) -> Result<f64, AixError> {
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            &[("ids", coin_id), ("vs_currencies", "usd")],
        )
        .map_err(|e| AixError::Config(format!("invalid market base URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AixError::Provider {
                provider: FEED.into(),
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, coin_id, "market price response received");

        let body = response.text().await.map_err(|e| AixError::Provider {
            provider: FEED.into(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(AixError::provider(
                FEED,
                describe_error_response("Market", status.as_u16(), &body),
            ));
        }

        let prices: HashMap<String, CoinPrice> =
            serde_json::from_str(&body).map_err(|e| AixError::Provider {
                provider: FEED.into(),
                message: format!("failed to parse price response: {e}"),
                source: Some(Box::new(e)),
            })?;

        match prices.get(coin_id).and_then(|p| p.usd) {
            Some(price) if price > 0.0 && price.is_finite() => Ok(price),
            Some(price) => Err(AixError::provider(
                FEED,
                format!("non-positive USD price {price} for `{coin_id}`"),
            )),
            None => Err(AixError::provider(
                FEED,
                format!("no USD price for `{coin_id}`"),
            )),
        }
    }
}
