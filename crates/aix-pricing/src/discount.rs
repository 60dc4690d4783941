// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decentralized-network providers priced as a discount on the baseline.
//!
//! Each provider scales the baseline CPU and GPU costs by its own multipliers
//! and converts the total into its native token at a market or fixed rate.

use std::sync::Arc;

use aix_core::{AixError, PricingProvider, PricingQuote};
use async_trait::async_trait;
use tracing::debug;

use crate::baseline::baseline_costs;
use crate::market::MarketPriceClient;

/// Where a provider's token price comes from.
#[derive(Debug, Clone)]
pub enum TokenPricing {
    /// Looked up on the price feed under `coin_id`.
    Market {
        coin_id: String,
        feed: Arc<MarketPriceClient>,
    },
    /// Administered USD price, no network call.
    Fixed(f64),
}

/// A provider priced at `baseline * (cpu_multiplier, gpu_multiplier)`.
#[derive(Debug, Clone)]
pub struct DiscountProvider {
    key: String,
    display_name: String,
    cpu_multiplier: f64,
    gpu_multiplier: f64,
    token_pricing: TokenPricing,
}

impl DiscountProvider {
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        cpu_multiplier: f64,
        gpu_multiplier: f64,
        token_pricing: TokenPricing,
    ) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            cpu_multiplier,
            gpu_multiplier,
            token_pricing,
        }
    }

    /// Bittensor: 10% off CPU, 15% off GPU, priced in TAO.
    pub fn bittensor(feed: Arc<MarketPriceClient>) -> Self {
        Self::new(
            "bittensor",
            "Bittensor",
            0.9,
            0.85,
            TokenPricing::Market {
                coin_id: "bittensor".into(),
                feed,
            },
        )
    }

    /// Render Network: 5% off CPU, 20% off GPU, priced in RENDER.
    pub fn render(feed: Arc<MarketPriceClient>) -> Self {
        Self::new(
            "render",
            "Render Network",
            0.95,
            0.8,
            TokenPricing::Market {
                coin_id: "render-token".into(),
                feed,
            },
        )
    }

    /// Superintelligence: 15% off both, fixed token price of 5 USD.
    pub fn superintelligence() -> Self {
        Self::new(
            "superintelligence",
            "Superintelligence",
            0.85,
            0.85,
            TokenPricing::Fixed(5.0),
        )
    }

    /// Discounted `(cpu_cost, gpu_cost)` for a usage pair.
    pub fn discounted_costs(&self, cpu_usage: f64, gpu_usage: f64) -> (f64, f64) {
        let (cpu, gpu) = baseline_costs(cpu_usage, gpu_usage);
        (cpu * self.cpu_multiplier, gpu * self.gpu_multiplier)
    }

    async fn token_price(&self) -> Result<f64, AixError> {
        match &self.token_pricing {
            TokenPricing::Fixed(price) if *price > 0.0 => Ok(*price),
            TokenPricing::Fixed(price) => Err(AixError::provider(
                &self.key,
                format!("non-positive token price {price}"),
            )),
            TokenPricing::Market { coin_id, feed } => {
                feed.usd_price(coin_id)
                    .await
                    .map_err(|e| AixError::Provider {
                        provider: self.key.clone(),
                        message: format!("token price lookup for `{coin_id}` failed"),
                        source: Some(Box::new(e)),
                    })
            }
        }
    }
}

#[async_trait]
impl PricingProvider for DiscountProvider {
    fn key(&self) -> &str {
        &self.key
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    async fn price(&self, cpu_usage: f64, gpu_usage: f64) -> Result<PricingQuote, AixError> {
        let (cpu_cost, gpu_cost) = self.discounted_costs(cpu_usage, gpu_usage);
        let token_price = self.token_price().await?;
        debug!(provider = %self.key, token_price, "token price resolved");

        Ok(PricingQuote::new(self.display_name.as_str(), cpu_cost, gpu_cost)
            .with_token_price(token_price))
    }
}
