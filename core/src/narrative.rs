//! Narrative content: yearly summaries, correlation commentary, projections.
//!
//! RULE: This is domain content, not logic. It is loaded from data files and
//! handed to presentation consumers as-is. Nothing here is computed from the
//! records, including the 2025–2026 projection numbers.

use crate::{
    error::{EngineError, EngineResult},
    types::Year,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_NARRATIVE: &str = include_str!("../../data/narrative.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearNarrative {
    pub year:         Year,
    pub theme:        String,
    pub key_findings: Vec<String>,
    pub takeaway:     String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub headline: String,
    pub detail:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationCommentary {
    pub intro:    String,
    pub top_five: Vec<Highlight>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year:  Year,
    /// Display text, e.g. "108" or "43%".
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub label:    String,
    pub headline: String,
    pub change:   String,
    pub points:   Vec<ProjectionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusArea {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub title:   String,
    pub summary: String,
    pub focus:   Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeCatalog {
    yearly:            Vec<YearNarrative>,
    pub correlations:  CorrelationCommentary,
    pub projections:   Vec<Projection>,
    pub focus_areas:   Vec<FocusArea>,
    pub opportunities: Vec<Opportunity>,
}

impl NarrativeCatalog {
    /// The catalogue compiled into the crate.
    pub fn builtin() -> EngineResult<Self> {
        Self::from_json(BUILTIN_NARRATIVE)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> EngineResult<Self> {
        let mut catalog: NarrativeCatalog = serde_json::from_str(content)?;
        catalog.yearly.sort_by_key(|n| n.year);
        for pair in catalog.yearly.windows(2) {
            if pair[0].year == pair[1].year {
                return Err(EngineError::validation(format!(
                    "duplicate narrative for year {}",
                    pair[0].year
                )));
            }
        }
        Ok(catalog)
    }

    pub fn summary_for(&self, year: Year) -> EngineResult<&YearNarrative> {
        self.yearly
            .iter()
            .find(|n| n.year == year)
            .ok_or_else(|| EngineError::not_found(format!("Narrative for year {year}")))
    }

    pub fn yearly(&self) -> &[YearNarrative] {
        &self.yearly
    }
}
