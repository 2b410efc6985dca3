//! # CaseX Similarity
//!
//! Weighted per-attribute similarity and ranking for case-based reasoning.
//!
//! ## Features
//!
//! - **Attribute similarity**: numeric (fixed range), ordinal (per-attribute rank
//!   table) and nominal (exact match) comparisons, all normalized into [0, 1]
//! - **Weighted aggregation**: weighted arithmetic mean over the weighted attributes
//! - **Ranking**: stable descending order with the best match's outcome as suggestion
//! - **Explainability**: per-attribute breakdown for every ranked candidate
//!
//! ## Example
//!
//! ```rust
//! use casex_core::{CaseBase, CaseId, CaseRecord, Catalog, QueryCase};
//! use casex_similarity::{Ranker, WeightVector};
//!
//! let catalog = Catalog::spondyloarthritis();
//! let mut base = CaseBase::new();
//! let seen = QueryCase::new().with("TCSE", "importante").with("HLA-B27", "0.9");
//! base.push(CaseRecord::from_query(&catalog, CaseId(1), &seen, "Espondilite anquilosante"));
//!
//! let query = QueryCase::new().with("TCSE", "moderado").with("HLA-B27", "0,8");
//! let weights = WeightVector::uniform(&catalog);
//! let ranking = Ranker::new(&catalog).ranking(&query, &base, &weights);
//!
//! assert_eq!(ranking.suggestion.as_deref(), Some("Espondilite anquilosante"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Distance   │────>│  Aggregate  │────>│   Ranker    │
//! │ (attribute) │     │ (weighted)  │     │  (sorted)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │   Explain   │
//!                                         │ (response)  │
//!                                         └─────────────┘
//! ```

pub mod aggregate;
pub mod distance;
pub mod explain;
pub mod rank;
pub mod weights;

pub use aggregate::{aggregate, Aggregate, AttributeScore};
pub use distance::{
    attribute_similarity, nominal_similarity, numeric_similarity, ordinal_similarity, parse_decimal,
};
pub use explain::{ExplainedCandidate, RankingResponse, RankingStats};
pub use rank::{suggested_outcome, Ranker, Ranking, ScoredCandidate};
pub use weights::{WeightVector, DEFAULT_WEIGHT};
