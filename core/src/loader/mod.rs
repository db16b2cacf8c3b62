//! Record loaders: the external collaborators that feed a RecordStore.
//!
//! RULE: Loaders only parse. Validation of the record set (duplicates,
//! finiteness, sign) happens once, in RecordStore::new.
//! A missing or mistyped field is a validation failure, never a default.

pub mod json;
pub mod sqlite;

use crate::{error::EngineResult, record::YearRecord, store::RecordStore};

/// Build a store from any loader's output.
pub fn into_store(records: Vec<YearRecord>) -> EngineResult<RecordStore> {
    RecordStore::new(records)
}
