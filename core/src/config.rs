//! Engine settings, loaded from `<data_dir>/engine.json`.

use crate::{
    error::{EngineError, EngineResult},
    metric::Metric,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    /// Record file, relative to the data directory.
    pub records_file:        String,
    pub narrative_file:      String,
    pub top_n:               usize,
    pub correlation_columns: Vec<Metric>,
}

fn default_records_file() -> String { "records.json".into() }
fn default_narrative_file() -> String { "narrative.json".into() }
fn default_top_n() -> usize { DEFAULT_TOP_N }
fn default_columns() -> Vec<Metric> { Metric::CORRELATION_DEFAULT.to_vec() }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            records_file:        default_records_file(),
            narrative_file:      default_narrative_file(),
            top_n:               default_top_n(),
            correlation_columns: default_columns(),
        }
    }
}

impl EngineConfig {
    /// Load from the data directory.
    /// In tests, use EngineConfig::default().
    pub fn load(data_dir: impl AsRef<Path>) -> EngineResult<Self> {
        let path = data_dir.as_ref().join("engine.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        Self::from_json(&content)
    }

    /// Parse and validate. Unknown metric names surface as NotFound.
    pub fn from_json(content: &str) -> EngineResult<Self> {
        let raw: RawConfig = serde_json::from_str(content)?;
        let config = Self {
            records_file:        raw.records_file.unwrap_or_else(default_records_file),
            narrative_file:      raw.narrative_file.unwrap_or_else(default_narrative_file),
            top_n:               raw.top_n.unwrap_or(DEFAULT_TOP_N),
            correlation_columns: match raw.correlation_columns {
                Some(names) => Metric::parse_list(&names)?,
                None => default_columns(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.top_n < 1 {
            return Err(EngineError::invalid_argument("top_n must be at least 1"));
        }
        if self.correlation_columns.len() < 2 {
            return Err(EngineError::invalid_argument(
                "correlation_columns needs at least 2 entries",
            ));
        }
        Ok(())
    }

    pub fn records_path(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(&self.records_file)
    }

    pub fn narrative_path(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(&self.narrative_file)
    }
}

/// File shape. Column names stay strings here so an unknown name becomes
/// NotFound rather than a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    records_file:        Option<String>,
    narrative_file:      Option<String>,
    top_n:               Option<usize>,
    correlation_columns: Option<Vec<String>>,
}
