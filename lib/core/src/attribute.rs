//! Attribute definitions
//!
//! Every attribute of a case has a fixed comparison kind. Numeric and ordinal
//! attributes carry the range used to normalize distances into [0, 1].

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A named field of a case record together with its comparison kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    pub name: String,
    #[serde(flatten)]
    pub kind: AttributeKind,
}

impl Attribute {
    /// Create a numeric attribute normalized over `[min, max]`
    pub fn numeric(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric { min, max },
        }
    }

    /// Create an ordinal attribute ranked through `scale`
    pub fn ordinal(name: impl Into<String>, scale: RankTable) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Ordinal(scale),
        }
    }

    /// Create a nominal (exact match) attribute
    pub fn nominal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal,
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric { .. })
    }
}

/// How two raw values of an attribute are compared
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeKind {
    /// Real-valued, linear distance over a fixed `[min, max]` range
    Numeric { min: f64, max: f64 },
    /// Textual labels mapped to integer ranks, linear distance over `0..=max_rank`
    Ordinal(RankTable),
    /// Exact match only
    Nominal,
}

/// Label to rank mapping for one ordinal attribute.
///
/// Each ordinal attribute owns its table, so two scales may share a textual
/// label with different ranks. The minimum rank is always 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RankTable {
    pub max_rank: u32,
    pub labels: AHashMap<String, u32>,
}

impl RankTable {
    pub fn new(max_rank: u32) -> Self {
        Self {
            max_rank,
            labels: AHashMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>, rank: u32) -> Self {
        self.labels.insert(label.into(), rank);
        self
    }

    /// Rank of `label`; unknown or empty labels rank 0
    #[inline]
    pub fn rank(&self, label: &str) -> u32 {
        self.labels.get(label).copied().unwrap_or(0)
    }

    #[inline]
    pub fn max_rank(&self) -> u32 {
        self.max_rank
    }

    /// Labels sorted by rank, then alphabetically
    pub fn sorted_labels(&self) -> Vec<(&str, u32)> {
        let mut labels: Vec<_> = self
            .labels
            .iter()
            .map(|(label, rank)| (label.as_str(), *rank))
            .collect();
        labels.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        labels
    }
}
