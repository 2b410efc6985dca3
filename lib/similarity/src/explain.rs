//! Explainability for ranked results
//!
//! Serializable views of a ranking: every candidate with its full record, its
//! score (also as a percentage, as shown to users) and the per-attribute
//! breakdown behind it.

use crate::aggregate::AttributeScore;
use crate::rank::{Ranking, ScoredCandidate};
use casex_core::{CaseId, Catalog, OrderedValues};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A ranked candidate with its score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedCandidate {
    pub id: CaseId,
    pub score: f64,
    /// Score formatted as a percentage with two decimals, e.g. `"87.50%"`
    pub percent: String,
    pub outcome: String,
    /// Record values in column order
    pub values: OrderedValues,
    pub explain: HashMap<String, AttributeScore>,
}

impl ExplainedCandidate {
    pub fn from_scored(catalog: &Catalog, scored: ScoredCandidate) -> Self {
        Self {
            id: scored.record.id,
            score: scored.score,
            percent: format_percent(scored.score),
            values: scored.record.ordered_values(catalog),
            outcome: scored.record.outcome,
            explain: scored.attribute_scores,
        }
    }
}

/// Response body for a ranking request
#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub result: Vec<ExplainedCandidate>,
    pub suggestion: Option<String>,
    pub stats: RankingStats,
}

impl RankingResponse {
    pub fn from_ranking(catalog: &Catalog, ranking: Ranking) -> Self {
        let stats = RankingStats::compute(&ranking.candidates);
        Self {
            result: ranking
                .candidates
                .into_iter()
                .map(|scored| ExplainedCandidate::from_scored(catalog, scored))
                .collect(),
            suggestion: ranking.suggestion,
            stats,
        }
    }
}

/// Summary statistics for one ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStats {
    pub candidates_count: usize,
    pub best_score: f64,
    pub avg_score: f64,
    /// Attribute with the largest weighted contribution to the best match
    pub top_contributing_attribute: Option<String>,
}

impl RankingStats {
    /// Compute stats from candidates sorted best first
    pub fn compute(ranked: &[ScoredCandidate]) -> Self {
        let Some(best) = ranked.first() else {
            return Self {
                candidates_count: 0,
                best_score: 0.0,
                avg_score: 0.0,
                top_contributing_attribute: None,
            };
        };

        let avg_score = ranked.iter().map(|c| c.score).sum::<f64>() / ranked.len() as f64;

        // Ties resolve to the alphabetically first attribute
        let top_contributing_attribute = best
            .attribute_scores
            .iter()
            .max_by(|a, b| {
                a.1.weighted()
                    .partial_cmp(&b.1.weighted())
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.0.cmp(a.0))
            })
            .map(|(name, _)| name.clone());

        Self {
            candidates_count: ranked.len(),
            best_score: best.score,
            avg_score,
            top_contributing_attribute,
        }
    }
}

pub fn format_percent(score: f64) -> String {
    format!("{:.2}%", score * 100.0)
}
