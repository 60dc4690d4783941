// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Policies for choosing the quote a mint is paid against.

use aix_config::model::SelectionPolicy;
use aix_core::{AixError, PricingBundle, PricingQuote};

/// Picks one available quote from a pricing bundle.
pub trait ProviderSelector: Send + Sync {
    /// Returns the chosen provider key and its quote.
    fn select<'a>(&self, bundle: &'a PricingBundle)
    -> Result<(&'a str, &'a PricingQuote), AixError>;
}

/// First provider in registry order with a quote.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl ProviderSelector for FirstAvailable {
    fn select<'a>(
        &self,
        bundle: &'a PricingBundle,
    ) -> Result<(&'a str, &'a PricingQuote), AixError> {
        bundle
            .available()
            .next()
            .ok_or_else(|| AixError::Selection("no provider returned a quote".into()))
    }
}

/// Provider with the lowest total cost. Ties go to the earlier provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cheapest;

impl ProviderSelector for Cheapest {
    fn select<'a>(
        &self,
        bundle: &'a PricingBundle,
    ) -> Result<(&'a str, &'a PricingQuote), AixError> {
        bundle
            .available()
            .min_by(|(_, a), (_, b)| a.total_cost().total_cmp(&b.total_cost()))
            .ok_or_else(|| AixError::Selection("no provider returned a quote".into()))
    }
}

/// An explicitly named provider.
#[derive(Debug, Clone)]
pub struct Preferred(pub String);

impl ProviderSelector for Preferred {
    fn select<'a>(
        &self,
        bundle: &'a PricingBundle,
    ) -> Result<(&'a str, &'a PricingQuote), AixError> {
        if !bundle.contains_key(&self.0) {
            return Err(AixError::Selection(format!(
                "unknown provider `{}`; available: {}",
                self.0,
                bundle.keys().collect::<Vec<_>>().join(", ")
            )));
        }
        bundle
            .available()
            .find(|(key, _)| *key == self.0)
            .ok_or_else(|| {
                AixError::Selection(format!("provider `{}` has no quote for this entry", self.0))
            })
    }
}

/// Selector for a configured policy.
pub fn selector_for(policy: SelectionPolicy) -> Box<dyn ProviderSelector> {
    match policy {
        SelectionPolicy::First => Box::new(FirstAvailable),
        SelectionPolicy::Cheapest => Box::new(Cheapest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> PricingBundle {
        let mut bundle = PricingBundle::new();
        bundle.insert("aws", None);
        bundle.insert("bittensor", Some(PricingQuote::new("Bittensor", 0.45, 4.25)));
        bundle.insert("render", Some(PricingQuote::new("Render Network", 0.5, 4.0)));
        bundle.insert("superintelligence", Some(PricingQuote::new("Superintelligence", 1.0, 3.5)));
        bundle
    }

    #[test]
    fn first_available_skips_null_slots() {
        let b = bundle();
        let (key, quote) = FirstAvailable.select(&b).unwrap();
        assert_eq!(key, "bittensor");
        assert_eq!(quote.provider(), "Bittensor");
    }

    #[test]
    fn cheapest_breaks_ties_by_order() {
        let b = bundle();
        // render and superintelligence both total 4.5.
        let (key, _) = Cheapest.select(&b).unwrap();
        assert_eq!(key, "render");
    }

    #[test]
    fn preferred_key() {
        let b = bundle();
        let (key, quote) = Preferred("superintelligence".into()).select(&b).unwrap();
        assert_eq!(key, "superintelligence");
        assert_eq!(quote.provider(), "Superintelligence");
    }

    #[test]
    fn preferred_null_slot_is_a_selection_error() {
        let err = Preferred("aws".into()).select(&bundle()).unwrap_err();
        assert!(matches!(err, AixError::Selection(_)));
        assert!(err.to_string().contains("no quote"));
    }

    #[test]
    fn preferred_unknown_key_lists_available() {
        let err = Preferred("gcp".into()).select(&bundle()).unwrap_err();
        assert!(err.to_string().contains("unknown provider `gcp`"));
        assert!(err.to_string().contains("bittensor"));
    }

    #[test]
    fn all_null_bundle_has_nothing_to_select() {
        let mut b = PricingBundle::new();
        b.insert("aws", None);
        assert!(FirstAvailable.select(&b).is_err());
        assert!(Cheapest.select(&b).is_err());
    }

    #[test]
    fn policy_mapping() {
        let b = bundle();
        assert_eq!(selector_for(SelectionPolicy::First).select(&b).unwrap().0, "bittensor");
        assert_eq!(selector_for(SelectionPolicy::Cheapest).select(&b).unwrap().0, "render");
    }
}
