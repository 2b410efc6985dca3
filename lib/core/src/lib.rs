//! # CaseX Core
//!
//! Core data model for the CaseX case-based reasoning engine.
//!
//! - [`Attribute`] - A named case field with its comparison kind
//! - [`RankTable`] - Per-attribute label to rank mapping for ordinal scales
//! - [`Catalog`] - The fixed attribute set and persisted column order
//! - [`CaseRecord`] / [`QueryCase`] - Stored and under-construction cases
//! - [`CaseBase`] - The append-only collection of stored cases
//!
//! ## Example
//!
//! ```rust
//! use casex_core::{Catalog, CaseBase, CaseRecord, QueryCase};
//!
//! let catalog = Catalog::spondyloarthritis();
//! let mut base = CaseBase::new();
//!
//! let query = QueryCase::new().with("Mob", "limitado").with("HLA-B27", "0,8");
//! let id = base.next_id()?;
//! let record = CaseRecord::from_query(&catalog, id, &query, "Espondilite anquilosante");
//! base.push(record);
//!
//! assert_eq!(base.next_id()?.get(), 2);
//! # Ok::<(), casex_core::Error>(())
//! ```

pub mod attribute;
pub mod case_base;
pub mod catalog;
pub mod error;
pub mod record;

pub use attribute::{Attribute, AttributeKind, RankTable};
pub use case_base::{AttributeOptions, CaseBase, ValueOptions};
pub use catalog::Catalog;
pub use error::{Error, Result};
pub use record::{CaseId, CaseRecord, CaseValues, OrderedValues, QueryCase, RecordView};
