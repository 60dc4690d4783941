// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concurrent fan-out over the registered pricing providers.
//!
//! Every provider call runs in its own failure boundary. An error, a panic,
//! or a timeout in one slot turns that slot into `null` and never affects the
//! others. The resulting bundle always has exactly the registered keys.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use aix_config::model::AixConfig;
use aix_core::{AixError, PricingBundle, PricingProvider, PricingQuote};
use futures::FutureExt;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::baseline::AwsProvider;
use crate::discount::DiscountProvider;
use crate::market::MarketPriceClient;
use crate::prime_intellect::PrimeIntellectProvider;

/// Ordered registry of pricing providers.
#[derive(Clone)]
pub struct PricingAggregator {
    providers: Vec<Arc<dyn PricingProvider>>,
    provider_timeout: Duration,
}

impl PricingAggregator {
    /// An empty registry with the given per-provider timeout.
    pub fn new(provider_timeout: Duration) -> Self {
        Self {
            providers: Vec::new(),
            provider_timeout,
        }
    }

    /// Registers a provider. A provider with the same key is replaced in place.
    pub fn register(&mut self, provider: Arc<dyn PricingProvider>) {
        match self.providers.iter().position(|p| p.key() == provider.key()) {
            Some(idx) => self.providers[idx] = provider,
            None => self.providers.push(provider),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn PricingProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Builds the registry named by `[pricing] providers`, in that order.
    ///
    /// `prime_intellect_api_key` is the already-resolved key; without one the
    /// Prime Intellect slot is always `null`.
    pub fn from_config(
        config: &AixConfig,
        prime_intellect_api_key: Option<&str>,
    ) -> Result<Self, AixError> {
        let mut aggregator =
            Self::new(Duration::from_secs(config.pricing.provider_timeout_secs));
        let mut feed: Option<Arc<MarketPriceClient>> = None;
        let mut market = || -> Result<Arc<MarketPriceClient>, AixError> {
            if let Some(feed) = &feed {
                return Ok(feed.clone());
            }
            let client = Arc::new(MarketPriceClient::from_config(&config.market)?);
            feed = Some(client.clone());
            Ok(client)
        };

        for key in &config.pricing.providers {
            let provider: Arc<dyn PricingProvider> = match key.as_str() {
                "aws" => Arc::new(AwsProvider::new()),
                "bittensor" => Arc::new(DiscountProvider::bittensor(market()?)),
                "render" => Arc::new(DiscountProvider::render(market()?)),
                "superintelligence" => Arc::new(DiscountProvider::superintelligence()),
                "primeIntellect" => Arc::new(PrimeIntellectProvider::from_config(
                    &config.prime_intellect,
                    prime_intellect_api_key,
                )?),
                other => {
                    return Err(AixError::Config(format!("unknown pricing provider `{other}`")));
                }
            };
            aggregator.register(provider);
        }

        Ok(aggregator)
    }

    /// Provider keys in registry order.
    pub fn keys(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Prices a usage pair with every provider concurrently.
    pub async fn price_all(&self, cpu_usage: f64, gpu_usage: f64) -> PricingBundle {
        let slots = join_all(self.providers.iter().map(|provider| {
            price_slot(provider.clone(), cpu_usage, gpu_usage, self.provider_timeout)
        }))
        .await;

        let mut bundle = PricingBundle::new();
        for (key, quote) in slots {
            bundle.insert(key, quote);
        }
        debug!(
            available = bundle.available().count(),
            total = bundle.len(),
            "pricing fan-out complete"
        );
        bundle
    }
}

async fn price_slot(
    provider: Arc<dyn PricingProvider>,
    cpu_usage: f64,
    gpu_usage: f64,
    timeout: Duration,
) -> (String, Option<PricingQuote>) {
    let key = provider.key().to_string();
    let call = AssertUnwindSafe(provider.price(cpu_usage, gpu_usage)).catch_unwind();

    let quote = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(Ok(quote))) => Some(quote),
        Ok(Ok(Err(e))) => {
            warn!(provider = %key, error = %e, "pricing provider failed");
            None
        }
        Ok(Err(_)) => {
            warn!(provider = %key, "pricing provider panicked");
            None
        }
        Err(_) => {
            warn!(provider = %key, timeout = ?timeout, "pricing provider timed out");
            None
        }
    };

    (key, quote)
}
