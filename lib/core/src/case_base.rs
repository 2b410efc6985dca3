use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::record::{CaseId, CaseRecord};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// The historical cases, in insertion order. Grows only by [`CaseBase::push`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseBase {
    records: Vec<CaseRecord>,
}

impl CaseBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: CaseId) -> Option<&CaseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn max_id(&self) -> Option<CaseId> {
        self.records.iter().map(|r| r.id).max()
    }

    /// Identifier for the next appended case: one past the largest id in the
    /// base, or 1 for an empty base. Gaps are never filled.
    ///
    /// Fails with [`Error::IdExhausted`] once the largest id is `u64::MAX`.
    pub fn next_id(&self) -> Result<CaseId> {
        match self.max_id() {
            None => Ok(CaseId(1)),
            Some(last) => last.next().ok_or(Error::IdExhausted { last: last.get() }),
        }
    }

    pub fn push(&mut self, record: CaseRecord) {
        self.records.push(record);
    }

    /// Distinct non-empty values seen per non-numeric attribute, in
    /// first-seen order. Used for query-building choice lists only.
    pub fn value_options(&self, catalog: &Catalog) -> ValueOptions {
        let options = catalog
            .attributes()
            .iter()
            .filter(|attr| !attr.is_numeric())
            .map(|attr| {
                let mut seen = AHashSet::new();
                let values = self
                    .records
                    .iter()
                    .map(|record| record.get(&attr.name))
                    .filter(|value| !value.is_empty() && seen.insert(*value))
                    .map(str::to_string)
                    .collect();
                AttributeOptions {
                    attribute: attr.name.clone(),
                    values,
                }
            })
            .collect();
        ValueOptions { options }
    }
}

impl<'a> IntoIterator for &'a CaseBase {
    type Item = &'a CaseRecord;
    type IntoIter = std::slice::Iter<'a, CaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Legal values of one attribute as observed in the base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOptions {
    pub attribute: String,
    pub values: Vec<String>,
}

/// Choice lists for every non-numeric attribute, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueOptions {
    options: Vec<AttributeOptions>,
}

impl ValueOptions {
    pub const fn empty() -> Self {
        Self { options: Vec::new() }
    }

    pub fn get(&self, attribute: &str) -> Option<&[String]> {
        self.options
            .iter()
            .find(|o| o.attribute == attribute)
            .map(|o| o.values.as_slice())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeOptions> {
        self.options.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CaseValues;

    fn record(id: u64, dl: &str, mob: &str) -> CaseRecord {
        let mut values = CaseValues::new();
        values.insert("DL".to_string(), dl.to_string());
        values.insert("Mob".to_string(), mob.to_string());
        values.insert("HLA-B27".to_string(), "0.5".to_string());
        CaseRecord::new(CaseId(id), values, "EA")
    }

    #[test]
    fn test_next_id_empty_base() {
        assert_eq!(CaseBase::new().next_id().unwrap(), CaseId(1));
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let base = CaseBase::from_records(vec![
            record(1, "sim", "normal"),
            record(3, "sim", "normal"),
            record(3, "não", "normal"),
            record(5, "não", "limitado"),
        ]);
        assert_eq!(base.next_id().unwrap(), CaseId(6));
    }

    #[test]
    fn test_next_id_out_of_order() {
        let base = CaseBase::from_records(vec![record(9, "", ""), record(2, "", "")]);
        assert_eq!(base.next_id().unwrap(), CaseId(10));
    }

    #[test]
    fn test_next_id_exhausted() {
        let base = CaseBase::from_records(vec![record(u64::MAX, "", ""), record(4, "", "")]);
        assert!(matches!(
            base.next_id(),
            Err(Error::IdExhausted { last: u64::MAX })
        ));
    }

    #[test]
    fn test_value_options_first_seen_non_empty() {
        let catalog = Catalog::spondyloarthritis();
        let base = CaseBase::from_records(vec![
            record(1, "sim", "limitado"),
            record(2, "", "normal"),
            record(3, "não", "limitado"),
            record(4, "sim", ""),
        ]);

        let options = base.value_options(&catalog);
        assert_eq!(options.get("DL").unwrap(), &["sim".to_string(), "não".to_string()]);
        assert_eq!(
            options.get("Mob").unwrap(),
            &["limitado".to_string(), "normal".to_string()]
        );
        assert!(options.get("HLA-B27").is_none());
        assert_eq!(options.get("RC").unwrap().len(), 0);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut base = CaseBase::new();
        base.push(record(2, "sim", "normal"));
        base.push(record(1, "não", "normal"));
        let ids: Vec<_> = base.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(base.get(CaseId(1)).unwrap().get("DL"), "não");
    }
}
