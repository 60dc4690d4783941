// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-entry set of quotes from every registered pricing provider.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::PricingQuote;

/// Mapping from provider key to its quote, or `None` when the provider failed.
///
/// Slots keep registry order, which is also the order they serialize in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingBundle {
    slots: Vec<(String, Option<PricingQuote>)>,
}

impl PricingBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the slot for `key`, replacing an earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, quote: Option<PricingQuote>) {
        let key = key.into();
        match self.slots.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = quote,
            None => self.slots.push((key, quote)),
        }
    }

    /// The quote for `key`, if the provider is registered and succeeded.
    pub fn get(&self, key: &str) -> Option<&PricingQuote> {
        self.slots
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, q)| q.as_ref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&PricingQuote>)> {
        self.slots.iter().map(|(k, q)| (k.as_str(), q.as_ref()))
    }

    /// Successful quotes only, in registry order.
    pub fn available(&self) -> impl Iterator<Item = (&str, &PricingQuote)> {
        self.slots
            .iter()
            .filter_map(|(k, q)| q.as_ref().map(|q| (k.as_str(), q)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Serialize for PricingBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for (key, quote) in &self.slots {
            map.serialize_entry(key, quote)?;
        }
        map.end()
    }
}
