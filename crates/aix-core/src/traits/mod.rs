// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the pipeline and its collaborators.
//!
//! All async traits use `#[async_trait]` so implementations can be held as
//! trait objects in registries and orchestrators.

pub mod analysis;
pub mod estimator;
pub mod ledger;
pub mod provider;

pub use analysis::AnalysisService;
pub use estimator::Estimator;
pub use ledger::Ledger;
pub use provider::PricingProvider;
