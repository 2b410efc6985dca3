//! Attribute catalog
//!
//! The catalog fixes, at design time, which attributes a case has, in which
//! column order they are persisted and how each one is compared. The persisted
//! column order is `[id] ++ attributes ++ [outcome]`.

use crate::attribute::{Attribute, AttributeKind, RankTable};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_ID_COLUMN: &str = "Caso";
pub const DEFAULT_OUTCOME_COLUMN: &str = "Diagnostico";

/// Maximum rank of the severity scale used by TCSE, IL and ER
pub const MAX_SEVERITY: u32 = 4;
/// Maximum rank of the mobility scale used by Mob
pub const MAX_MOBILITY: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default = "default_outcome_column")]
    pub outcome_column: String,
    pub attributes: Vec<Attribute>,
}

fn default_id_column() -> String {
    DEFAULT_ID_COLUMN.to_string()
}

fn default_outcome_column() -> String {
    DEFAULT_OUTCOME_COLUMN.to_string()
}

impl Catalog {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self {
            id_column: default_id_column(),
            outcome_column: default_outcome_column(),
            attributes,
        }
    }

    /// The spondyloarthritis catalog the engine ships with
    pub fn spondyloarthritis() -> Self {
        let severity = severity_scale();
        let mobility = mobility_scale();

        Self::new(vec![
            Attribute::nominal("DL"),
            Attribute::nominal("RC"),
            Attribute::nominal("DC"),
            Attribute::ordinal("Mob", mobility),
            Attribute::nominal("DTS"),
            Attribute::ordinal("IL", severity.clone()),
            Attribute::ordinal("ER", severity.clone()),
            Attribute::ordinal("TCSE", severity),
            Attribute::nominal("ART"),
            Attribute::nominal("RM"),
            Attribute::nominal("Bur"),
            Attribute::nominal("Tof"),
            Attribute::nominal("Sin"),
            Attribute::nominal("ATG"),
            Attribute::nominal("NR"),
            Attribute::numeric("HLA-B27", 0.0, 1.0),
            Attribute::nominal("DJ"),
        ])
    }

    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check names are unique and non-empty, ranges are ordered and every
    /// rank fits its scale
    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            return Err(Error::InvalidCatalog("catalog has no attributes".into()));
        }
        if self.id_column == self.outcome_column {
            return Err(Error::InvalidCatalog(
                "id and outcome columns must differ".into(),
            ));
        }

        let mut seen = HashSet::new();
        for attr in &self.attributes {
            if attr.name.is_empty() {
                return Err(Error::InvalidCatalog("attribute with empty name".into()));
            }
            if attr.name == self.id_column || attr.name == self.outcome_column {
                return Err(Error::InvalidCatalog(format!(
                    "attribute '{}' collides with a reserved column",
                    attr.name
                )));
            }
            if !seen.insert(attr.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate attribute '{}'",
                    attr.name
                )));
            }
            match &attr.kind {
                AttributeKind::Numeric { min, max } => {
                    if !min.is_finite() || !max.is_finite() || min > max {
                        return Err(Error::InvalidCatalog(format!(
                            "attribute '{}' has invalid range [{}, {}]",
                            attr.name, min, max
                        )));
                    }
                }
                AttributeKind::Ordinal(table) => {
                    if let Some((label, rank)) =
                        table.labels.iter().find(|(_, rank)| **rank > table.max_rank)
                    {
                        return Err(Error::InvalidCatalog(format!(
                            "label '{}' of '{}' has rank {} above max {}",
                            label, attr.name, rank, table.max_rank
                        )));
                    }
                }
                AttributeKind::Nominal => {}
            }
        }
        Ok(())
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Attribute names in column order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Full persisted header: id, attributes, outcome
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = Vec::with_capacity(self.attributes.len() + 2);
        columns.push(self.id_column.as_str());
        columns.extend(self.attribute_names());
        columns.push(self.outcome_column.as_str());
        columns
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.attributes.len() + 2
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::spondyloarthritis()
    }
}

/// Severity scale shared in shape (not in identity) by TCSE, IL and ER
pub fn severity_scale() -> RankTable {
    RankTable::new(MAX_SEVERITY)
        .with_label("não", 0)
        .with_label("ausente", 0)
        .with_label("leve", 1)
        .with_label("moderado", 2)
        .with_label("importante", 3)
        .with_label("muito importante", 4)
}

pub fn mobility_scale() -> RankTable {
    RankTable::new(MAX_MOBILITY)
        .with_label("normal", 0)
        .with_label("limitado", 1)
}
