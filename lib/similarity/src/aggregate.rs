//! Weighted aggregation of per-attribute similarities
//!
//! The score of a (query, record) pair is the weighted arithmetic mean of the
//! similarities of every attribute with a positive weight:
//! `Σ(similarity × weight) / Σ weight`, or 0 when nothing is weighted.

use crate::distance::attribute_similarity;
use crate::weights::WeightVector;
use casex_core::{CaseRecord, Catalog, QueryCase};
use serde::Serialize;
use std::collections::HashMap;

/// Contribution of one attribute to an aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeScore {
    /// Unweighted similarity in [0, 1]
    pub similarity: f64,
    /// Weight the similarity entered the mean with
    pub weight: f64,
}

impl AttributeScore {
    #[inline]
    pub fn weighted(&self) -> f64 {
        self.similarity * self.weight
    }
}

/// Aggregate similarity of one base record to the query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub score: f64,
    /// Only attributes that took part in scoring
    pub attribute_scores: HashMap<String, AttributeScore>,
}

/// Score `record` against `query` over the catalog's attributes
pub fn aggregate(
    catalog: &Catalog,
    query: &QueryCase,
    record: &CaseRecord,
    weights: &WeightVector,
) -> Aggregate {
    let mut weighted_sum = 0.0f64;
    let mut weight_sum = 0.0f64;
    let mut attribute_scores = HashMap::new();

    for attribute in catalog.attributes() {
        let Some(weight) = weights.effective(&attribute.name) else {
            continue;
        };

        let similarity =
            attribute_similarity(attribute, query.get(&attribute.name), record.get(&attribute.name));
        weighted_sum += similarity * weight;
        weight_sum += weight;
        attribute_scores.insert(attribute.name.clone(), AttributeScore { similarity, weight });
    }

    let score = if weight_sum == 0.0 {
        0.0
    } else {
        (weighted_sum / weight_sum).clamp(0.0, 1.0)
    };

    Aggregate { score, attribute_scores }
}
