//! The fixed 2016–2024 eMNC indicator dataset, compiled into the crate.

use crate::{
    error::EngineResult,
    loader::json::parse_records,
    record::YearRecord,
    store::RecordStore,
};

const BUILTIN_RECORDS: &str = include_str!("../../data/records.json");

pub fn builtin_records() -> EngineResult<Vec<YearRecord>> {
    parse_records(BUILTIN_RECORDS)
}

/// A validated store over the built-in dataset.
pub fn builtin_store() -> EngineResult<RecordStore> {
    RecordStore::new(builtin_records()?)
}
