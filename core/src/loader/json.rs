use crate::{
    error::{EngineError, EngineResult},
    record::YearRecord,
};
use std::path::Path;

/// Read a JSON array of raw records from `path`.
pub fn load_records(path: impl AsRef<Path>) -> EngineResult<Vec<YearRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    let records: Vec<YearRecord> = serde_json::from_str(&content)
        .map_err(|e| EngineError::validation(format!("{}: {e}", path.display())))?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a JSON array of raw records.
pub fn parse_records(content: &str) -> EngineResult<Vec<YearRecord>> {
    serde_json::from_str(content).map_err(|e| EngineError::validation(e.to_string()))
}
