//! Case session
//!
//! Owns one loaded snapshot of the case base together with its store, catalog
//! and codec. Ranking and ingestion go through the session; nothing is held in
//! global state.

use crate::codec::RecordCodec;
use crate::store::CaseStore;
use casex_core::{CaseBase, CaseRecord, Catalog, QueryCase, Result, ValueOptions};
use casex_similarity::{Ranker, Ranking, WeightVector};
use std::sync::Arc;
use tracing::{debug, error, info};

/// When the session re-reads its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Reload before every ranking and ingestion
    #[default]
    BeforeEachQuery,
    /// Only reload on an explicit [`CaseSession::refresh`]
    Manual,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub refresh: RefreshPolicy,
    pub codec: RecordCodec,
}

pub struct CaseSession {
    store: Arc<dyn CaseStore>,
    catalog: Arc<Catalog>,
    options: SessionOptions,
    base: CaseBase,
    value_options: Option<ValueOptions>,
}

impl CaseSession {
    /// Load the case base from `store` with default options
    pub fn load(store: Arc<dyn CaseStore>, catalog: Arc<Catalog>) -> Result<Self> {
        Self::load_with(store, catalog, SessionOptions::default())
    }

    pub fn load_with(
        store: Arc<dyn CaseStore>,
        catalog: Arc<Catalog>,
        options: SessionOptions,
    ) -> Result<Self> {
        let mut session = Self {
            store,
            catalog,
            options,
            base: CaseBase::new(),
            value_options: None,
        };
        session.refresh()?;
        Ok(session)
    }

    /// Re-read the store. On failure the current base is kept.
    ///
    /// Value options are derived on the first successful load only.
    pub fn refresh(&mut self) -> Result<usize> {
        let lines = self.store.read_all().map_err(|e| {
            error!("Failed to load case base: {}", e);
            e
        })?;

        self.base = self.options.codec.decode_all(&self.catalog, &lines);
        if self.value_options.is_none() {
            self.value_options = Some(self.base.value_options(&self.catalog));
        }

        info!("Case base loaded: {} records", self.base.len());
        Ok(self.base.len())
    }

    /// Recompute value options from the current base
    pub fn rebuild_options(&mut self) {
        self.value_options = Some(self.base.value_options(&self.catalog));
    }

    fn refresh_if_needed(&mut self) -> Result<()> {
        if self.options.refresh == RefreshPolicy::BeforeEachQuery {
            self.refresh()?;
        }
        Ok(())
    }

    /// Rank every case against `query`, reloading first if the policy says so
    pub fn rank(&mut self, query: &QueryCase, weights: &WeightVector) -> Result<Ranking> {
        self.refresh_if_needed()?;
        Ok(self.rank_snapshot(query, weights))
    }

    /// Rank against the currently loaded base without touching the store
    pub fn rank_snapshot(&self, query: &QueryCase, weights: &WeightVector) -> Ranking {
        let ranking = Ranker::new(&self.catalog).ranking(query, &self.base, weights);
        debug!(
            "Ranked {} cases, suggestion: {:?}",
            ranking.len(),
            ranking.suggestion
        );
        ranking
    }

    /// Persist `query` with `diagnosis` as a new case.
    ///
    /// The in-memory base only grows once the store has accepted the record.
    /// Failures are returned as-is and never retried.
    pub fn ingest(&mut self, query: &QueryCase, diagnosis: &str) -> Result<CaseRecord> {
        self.refresh_if_needed()?;

        let id = self.base.next_id()?;
        let record = CaseRecord::from_query(&self.catalog, id, query, diagnosis);
        let line = self.options.codec.encode(&self.catalog, &record)?;

        self.store.append_one(&line).map_err(|e| {
            error!("Failed to persist case {}: {}", id, e);
            e
        })?;
        self.base.push(record.clone());

        info!("Case {} added with diagnosis {:?}", id, diagnosis);
        Ok(record)
    }

    #[inline]
    pub fn base(&self) -> &CaseBase {
        &self.base
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Choice lists per attribute; empty before the first successful load
    pub fn options(&self) -> &ValueOptions {
        static EMPTY: ValueOptions = ValueOptions::empty();
        self.value_options.as_ref().unwrap_or(&EMPTY)
    }
}
