use crate::catalog::Catalog;
use ahash::AHashMap;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Raw attribute values keyed by attribute name
pub type CaseValues = AHashMap<String, String>;

/// Identifier of a stored case; positive and assigned in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub u64);

impl CaseId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }

    /// The following id, or `None` past `u64::MAX`
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<CaseId> {
        self.0.checked_add(1).map(CaseId)
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CaseId {
    fn from(id: u64) -> Self {
        CaseId(id)
    }
}

/// A case under construction: attribute values, no id, no outcome.
///
/// Attributes never set read as the empty string, the "unknown" marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryCase {
    values: CaseValues,
}

impl QueryCase {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.values.insert(attribute.into(), value.into());
    }

    #[inline]
    pub fn get(&self, attribute: &str) -> &str {
        self.values.get(attribute).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &CaseValues {
        &self.values
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryCase {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<CaseValues> for QueryCase {
    fn from(values: CaseValues) -> Self {
        Self { values }
    }
}

/// A stored case: id, one raw value per catalog attribute, outcome label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    pub values: CaseValues,
    pub outcome: String,
}

impl CaseRecord {
    pub fn new(id: CaseId, values: CaseValues, outcome: impl Into<String>) -> Self {
        Self {
            id,
            values,
            outcome: outcome.into(),
        }
    }

    /// Build a record from a query case, keeping exactly the catalog's
    /// attributes; attributes the query lacks are stored empty
    pub fn from_query(
        catalog: &Catalog,
        id: CaseId,
        query: &QueryCase,
        outcome: impl Into<String>,
    ) -> Self {
        let values = catalog
            .attribute_names()
            .map(|name| (name.to_string(), query.get(name).to_string()))
            .collect();
        Self::new(id, values, outcome)
    }

    #[inline]
    pub fn get(&self, attribute: &str) -> &str {
        self.values.get(attribute).map(String::as_str).unwrap_or("")
    }

    /// View this record as a query case (without id and outcome)
    pub fn to_query(&self) -> QueryCase {
        QueryCase::from(self.values.clone())
    }

    /// Values in the catalog's column order
    pub fn ordered_values(&self, catalog: &Catalog) -> OrderedValues {
        OrderedValues(
            catalog
                .attribute_names()
                .map(|name| (name.to_string(), self.get(name).to_string()))
                .collect(),
        )
    }

    pub fn view(&self, catalog: &Catalog) -> RecordView {
        RecordView {
            id: self.id,
            values: self.ordered_values(catalog),
            outcome: self.outcome.clone(),
        }
    }
}

/// Attribute values in column order. Serializes as a map whose keys keep
/// that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedValues(Vec<(String, String)>);

impl OrderedValues {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for OrderedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Output form of a stored case, values in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub id: CaseId,
    pub values: OrderedValues,
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_missing_is_empty() {
        let query = QueryCase::new().with("DL", "sim");
        assert_eq!(query.get("DL"), "sim");
        assert_eq!(query.get("RC"), "");
    }

    #[test]
    fn test_from_query_keeps_catalog_attributes_only() {
        let catalog = Catalog::spondyloarthritis();
        let query = QueryCase::new()
            .with("DL", "sim")
            .with("HLA-B27", "0,7")
            .with("not-an-attribute", "x");

        let record = CaseRecord::from_query(&catalog, CaseId(7), &query, "EA");
        assert_eq!(record.id, CaseId(7));
        assert_eq!(record.outcome, "EA");
        assert_eq!(record.values.len(), catalog.attributes().len());
        assert_eq!(record.get("HLA-B27"), "0,7");
        assert_eq!(record.get("TCSE"), "");
        assert!(!record.values.contains_key("not-an-attribute"));
    }

    #[test]
    fn test_case_id_order_and_display() {
        assert!(CaseId(3) < CaseId(10));
        assert_eq!(CaseId(5).next(), Some(CaseId(6)));
        assert_eq!(CaseId(u64::MAX).next(), None);
        assert_eq!(CaseId(42).to_string(), "42");
        assert_eq!(serde_json::to_string(&CaseId(9)).unwrap(), "9");
    }

    #[test]
    fn test_view_keeps_column_order() {
        let catalog = Catalog::spondyloarthritis();
        let query = QueryCase::new().with("DC", "não").with("RC", "sim").with("DL", "sim");
        let record = CaseRecord::from_query(&catalog, CaseId(2), &query, "EA");

        let ordered = record.ordered_values(&catalog);
        let names: Vec<&str> = ordered.iter().map(|(n, _)| n).collect();
        let expected: Vec<&str> = catalog.attribute_names().collect();
        assert_eq!(names, expected);

        let json = serde_json::to_string(&record.view(&catalog)).unwrap();
        assert!(json.starts_with(r#"{"id":2,"values":{"DL":"sim","RC":"sim","DC":"não","Mob":"#));
        assert!(json.ends_with(r#"},"outcome":"EA"}"#));
    }

    #[test]
    fn test_query_from_iter() {
        let query: QueryCase = [("Mob", "limitado"), ("IL", "leve")].into_iter().collect();
        assert_eq!(query.get("Mob"), "limitado");
        assert_eq!(query.values().len(), 2);
    }
}
