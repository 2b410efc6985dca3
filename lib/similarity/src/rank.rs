//! Ranking engine
//!
//! Scores every record of the case base against a query case and orders them
//! by descending similarity. Equal scores keep the base order, so a ranking
//! is reproducible for a fixed base and query.

use crate::aggregate::{aggregate, AttributeScore};
use crate::weights::WeightVector;
use casex_core::{CaseRecord, Catalog, QueryCase};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// A base record paired with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub record: CaseRecord,
    /// Weighted mean similarity in [0, 1]
    pub score: f64,
    /// Per-attribute similarities that entered the score
    pub attribute_scores: HashMap<String, AttributeScore>,
}

impl ScoredCandidate {
    #[inline]
    pub fn outcome(&self) -> &str {
        &self.record.outcome
    }
}

/// Ranked candidates plus the suggested outcome
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    pub candidates: Vec<ScoredCandidate>,
    /// Outcome of the best candidate, `None` for an empty base
    pub suggestion: Option<String>,
}

impl Ranking {
    pub fn new(candidates: Vec<ScoredCandidate>) -> Self {
        let suggestion = suggested_outcome(&candidates).map(str::to_string);
        Self { candidates, suggestion }
    }

    #[inline]
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Outcome label of the top candidate of an already sorted ranking
pub fn suggested_outcome(ranked: &[ScoredCandidate]) -> Option<&str> {
    ranked.first().map(ScoredCandidate::outcome)
}

/// Scores and orders case records for one catalog
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    catalog: &'a Catalog,
}

impl<'a> Ranker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Score a single record
    pub fn score(
        &self,
        query: &QueryCase,
        record: &CaseRecord,
        weights: &WeightVector,
    ) -> ScoredCandidate {
        let result = aggregate(self.catalog, query, record, weights);
        ScoredCandidate {
            record: record.clone(),
            score: result.score,
            attribute_scores: result.attribute_scores,
        }
    }

    /// Score every record and sort by descending score
    pub fn rank<'r, I>(&self, query: &QueryCase, records: I, weights: &WeightVector) -> Vec<ScoredCandidate>
    where
        I: IntoIterator<Item = &'r CaseRecord>,
    {
        let mut results: Vec<ScoredCandidate> = records
            .into_iter()
            .map(|record| self.score(query, record, weights))
            .collect();

        // Stable: ties keep base order
        results.sort_by(|a, b| OrderedFloat(b.score).cmp(&OrderedFloat(a.score)));

        results
    }

    /// Rank and attach the suggested outcome
    pub fn ranking<'r, I>(&self, query: &QueryCase, records: I, weights: &WeightVector) -> Ranking
    where
        I: IntoIterator<Item = &'r CaseRecord>,
    {
        Ranking::new(self.rank(query, records, weights))
    }
}
