// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the AIX compute pricing pipeline.
//!
//! This crate provides the data model (log entries, estimates, quotes,
//! bundles, mint results), the workspace error type, and the trait seams for
//! estimators, pricing providers, the analysis oracle, and the ledger.

pub mod bundle;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use bundle::PricingBundle;
pub use error::AixError;
pub use types::{
    AnalysisReport, EnrichedEntry, EstimateSource, LedgerReceipt, LogEntry, MintResult,
    MintStage, PaymentReceipt, PricingQuote, ResourceEstimate, TaskId, format_token_amount,
};

pub use traits::{AnalysisService, Estimator, Ledger, PricingProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aix_error_messages() {
        let input = AixError::Input {
            line: 3,
            message: "missing field `log`".into(),
        };
        assert_eq!(
            input.to_string(),
            "invalid input at line 3: missing field `log`"
        );

        let provider = AixError::provider("bittensor", "no usd price");
        assert_eq!(
            provider.to_string(),
            "pricing provider `bittensor` failed: no usd price"
        );

        let ledger = AixError::ledger(MintStage::Verified, "task rejected");
        assert_eq!(
            ledger.to_string(),
            "ledger error during verified: task rejected"
        );

        let _timeout = AixError::Timeout {
            duration: std::time::Duration::from_secs(15),
        };
    }

    #[test]
    fn estimate_source_round_trips_through_strum() {
        use std::str::FromStr;
        for source in [EstimateSource::Basic, EstimateSource::Enhanced] {
            let parsed = EstimateSource::from_str(&source.to_string()).unwrap();
            assert_eq!(parsed, source);
        }
    }

    #[test]
    fn all_traits_are_object_safe() {
        fn _provider(_: &dyn PricingProvider) {}
        fn _analysis(_: &dyn AnalysisService) {}
        fn _ledger(_: &dyn Ledger) {}
        fn _estimator(_: &dyn Estimator) {}
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn quote_total_always_matches(cpu in 0.0f64..1e6, gpu in 0.0f64..1e6) {
                let quote = PricingQuote::new("p", cpu, gpu);
                prop_assert_eq!(quote.total_cost(), cpu + gpu);
            }
        }
    }
}
