//! Record store: the immutable set of yearly raw records.
//!
//! RULE: Populated once, validated once, never mutated.
//! Any component that needs the data is handed the store (or a borrow of it);
//! there is no process-wide dataset.

use crate::{
    error::{EngineError, EngineResult},
    record::YearRecord,
    types::Year,
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    /// Sorted by year ascending, years unique.
    records: Vec<YearRecord>,
}

impl RecordStore {
    /// Validate and take ownership of a caller-supplied set of records.
    ///
    /// Fails atomically: either every record is accepted or the store is
    /// not built at all.
    pub fn new(records: Vec<YearRecord>) -> EngineResult<Self> {
        if records.is_empty() {
            return Err(EngineError::validation("record set is empty"));
        }

        let mut seen = BTreeSet::new();
        for record in &records {
            record.validate()?;
            if !seen.insert(record.year) {
                return Err(EngineError::validation(format!(
                    "duplicate record for year {}",
                    record.year
                )));
            }
        }

        let mut records = records;
        records.sort_by_key(|r| r.year);

        log::info!(
            "record store loaded: {} years ({}..={})",
            records.len(),
            records[0].year,
            records[records.len() - 1].year
        );
        Ok(Self { records })
    }

    /// Every record, ordered by year ascending.
    pub fn all(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn by_year(&self, year: Year) -> EngineResult<&YearRecord> {
        self.records
            .binary_search_by_key(&year, |r| r.year)
            .map(|idx| &self.records[idx])
            .map_err(|_| EngineError::not_found(format!("Record for year {year}")))
    }

    pub fn years(&self) -> Vec<Year> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
