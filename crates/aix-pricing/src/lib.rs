// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compute pricing across centralized and decentralized providers.
//!
//! This crate provides:
//! - **Baseline**: fixed per-unit cloud rates (`aws`)
//! - **Discount providers**: `bittensor`, `render`, `superintelligence`, priced
//!   as multipliers on the baseline and converted into their native tokens
//! - **Prime Intellect**: tiered pricing from the Prime Intellect API
//! - **Aggregator**: concurrent fan-out producing one bundle per usage pair

pub mod aggregator;
pub mod baseline;
pub mod discount;
pub mod market;
pub mod prime_intellect;

pub use aggregator::PricingAggregator;
pub use baseline::AwsProvider;
pub use discount::{DiscountProvider, TokenPricing};
pub use market::MarketPriceClient;
pub use prime_intellect::PrimeIntellectProvider;
