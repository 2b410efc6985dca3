//! Per-query attribute weights
//!
//! A weight of 0 and an absent weight are equivalent: the attribute is left
//! out of the weighted mean entirely.

use casex_core::{Catalog, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight applied to attributes when none is given
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector {
    weights: HashMap<String, f64>,
}

impl WeightVector {
    /// Empty vector: every attribute excluded
    pub fn new() -> Self {
        Self::default()
    }

    /// Every catalog attribute at [`DEFAULT_WEIGHT`]
    pub fn uniform(catalog: &Catalog) -> Self {
        catalog
            .attribute_names()
            .map(|name| (name, DEFAULT_WEIGHT))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        self.set(attribute, weight);
        self
    }

    pub fn set(&mut self, attribute: impl Into<String>, weight: f64) {
        self.weights.insert(attribute.into(), weight);
    }

    /// Weight of `attribute`; absent attributes weigh 0
    #[inline]
    pub fn get(&self, attribute: &str) -> f64 {
        self.weights.get(attribute).copied().unwrap_or(0.0)
    }

    /// Weight to use in scoring, or `None` if the attribute is excluded
    /// (absent, zero, negative or NaN)
    #[inline]
    pub fn effective(&self, attribute: &str) -> Option<f64> {
        let weight = self.get(attribute);
        (weight > 0.0).then_some(weight)
    }

    /// Start from the uniform vector and apply `overrides` on top of it.
    /// Overrides for attributes outside the catalog are ignored.
    pub fn uniform_with_overrides(catalog: &Catalog, overrides: &HashMap<String, f64>) -> Self {
        let mut weights = Self::uniform(catalog);
        for (name, weight) in overrides {
            if catalog.contains(name) {
                weights.set(name.clone(), *weight);
            }
        }
        weights
    }

    /// Reject weights outside `0.0..=1.0` (NaN included)
    pub fn validate(&self) -> Result<()> {
        for (attribute, weight) in &self.weights {
            if !(0.0..=1.0).contains(weight) {
                return Err(Error::InvalidWeight {
                    attribute: attribute.clone(),
                    weight: *weight,
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
