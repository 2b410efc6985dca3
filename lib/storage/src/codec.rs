//! Delimited line codec for case records
//!
//! One record per line, fields in catalog column order
//! (`id; attributes...; outcome`). Fields cannot contain the delimiter; there
//! is no escaping.

use casex_core::{CaseBase, CaseId, CaseRecord, CaseValues, Catalog, Error, Result};
use tracing::warn;

pub const DEFAULT_DELIMITER: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCodec {
    delimiter: char,
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl RecordCodec {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    #[inline]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Decode one line. Missing trailing columns read as empty values; extra
    /// columns are ignored. `line_no` is only used in error messages.
    pub fn decode(&self, catalog: &Catalog, line_no: usize, line: &str) -> Result<CaseRecord> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(self.delimiter).collect();

        let raw_id = fields.first().copied().unwrap_or("").trim();
        let id = match raw_id.parse::<u64>() {
            Ok(id) if id > 0 => CaseId(id),
            _ => {
                return Err(Error::MalformedRecord {
                    line: line_no,
                    reason: format!("invalid case id {:?}", raw_id),
                })
            }
        };

        let field = |index: usize| fields.get(index).copied().unwrap_or("");

        let values: CaseValues = catalog
            .attribute_names()
            .enumerate()
            .map(|(i, name)| (name.to_string(), field(i + 1).to_string()))
            .collect();
        let outcome = field(catalog.attributes().len() + 1);

        Ok(CaseRecord::new(id, values, outcome))
    }

    /// Encode a record in column order. Values containing the delimiter or a
    /// line break are rejected.
    pub fn encode(&self, catalog: &Catalog, record: &CaseRecord) -> Result<String> {
        let mut fields = Vec::with_capacity(catalog.column_count());
        fields.push(record.id.to_string());

        for name in catalog.attribute_names() {
            let value = record.get(name);
            self.check_field(name, value)?;
            fields.push(value.to_string());
        }

        self.check_field(&catalog.outcome_column, &record.outcome)?;
        fields.push(record.outcome.clone());

        Ok(fields.join(&self.delimiter.to_string()))
    }

    /// Decode every non-blank line. Malformed lines are logged and skipped.
    pub fn decode_all<S: AsRef<str>>(&self, catalog: &Catalog, lines: &[S]) -> CaseBase {
        let (base, skipped) = self.decode_lines(catalog, lines);
        for e in &skipped {
            warn!("Skipping case record: {}", e);
        }
        base
    }

    /// Decode every non-blank line, returning the malformed ones as errors.
    /// `lines` are numbered from 1 in the order given, blank lines included.
    pub fn decode_lines<S: AsRef<str>>(
        &self,
        catalog: &Catalog,
        lines: &[S],
    ) -> (CaseBase, Vec<Error>) {
        let mut records = Vec::with_capacity(lines.len());
        let mut skipped = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match self.decode(catalog, index + 1, line) {
                Ok(record) => records.push(record),
                Err(e) => skipped.push(e),
            }
        }

        (CaseBase::from_records(records), skipped)
    }

    fn check_field(&self, column: &str, value: &str) -> Result<()> {
        if let Some(bad) = value
            .chars()
            .find(|c| *c == self.delimiter || *c == '\n' || *c == '\r')
        {
            return Err(Error::DelimiterInValue {
                column: column.to_string(),
                delimiter: bad,
            });
        }
        Ok(())
    }
}
