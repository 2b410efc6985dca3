//! # CaseX
//!
//! A case-based reasoning engine: ranks previously recorded cases by weighted
//! per-attribute similarity to a new case, suggests the outcome of the best
//! match and appends confirmed cases back into the case base.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! casex --data-file ./data/cases.txt --http-port 3001
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use casex::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(CaseFile::open("./data/cases.txt")?);
//! let mut session = CaseSession::load(store, Arc::new(Catalog::spondyloarthritis()))?;
//!
//! let query = QueryCase::new()
//!     .with("Mob", "limitado")
//!     .with("TCSE", "importante")
//!     .with("HLA-B27", "0,9");
//! let weights = WeightVector::uniform(session.catalog());
//!
//! let ranking = session.rank(&query, &weights)?;
//! if let Some(diagnosis) = ranking.suggestion.clone() {
//!     session.ingest(&query, &diagnosis)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `casex-core` - Attribute catalog, rank tables, records and the case base
//! - `casex-similarity` - Attribute similarity, weighted aggregation, ranking
//! - `casex-storage` - Record codec, case files and sessions
//! - `casex-api` - REST API

// Re-export core types
pub use casex_core::{
    Attribute, AttributeKind, CaseBase, CaseId, CaseRecord, Catalog, Error, QueryCase,
    RankTable, Result, ValueOptions,
};

// Re-export similarity
pub use casex_similarity::{Ranker, Ranking, RankingResponse, ScoredCandidate, WeightVector};

// Re-export storage
pub use casex_storage::{
    CaseFile, CaseSession, CaseStore, MemoryCaseStore, RecordCodec, RefreshPolicy, SessionOptions,
};

// Re-export API
pub use casex_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Attribute, AttributeKind, CaseBase, CaseFile, CaseId, CaseRecord, CaseSession, CaseStore,
        Catalog, Error, MemoryCaseStore, QueryCase, RankTable, Ranker, Ranking, RecordCodec,
        RefreshPolicy, Result, RestApi, ScoredCandidate, SessionOptions, ValueOptions,
        WeightVector,
    };
}
