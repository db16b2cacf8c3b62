//! Query facade: the read-only surface presentation layers consume.
//!
//! RULE: No new logic here. Every method composes the record store, the
//! derived-metrics calculator and the correlation engine, and propagates
//! their errors unchanged.

use crate::{
    correlation::{correlation_matrix, rank_pairs, CorrelationMatrix, RankedPair},
    enrich::{enrich_all, EnrichedYearRecord},
    error::{EngineError, EngineResult},
    metric::Metric,
    store::RecordStore,
    summary::{self, Distribution, SeriesPoint, YearSummary},
    types::Year,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSnapshot {
    pub matrix: CorrelationMatrix,
    pub ranked: Vec<RankedPair>,
}

pub struct QueryFacade {
    store:    RecordStore,
    /// Same order as `store.all()`.
    enriched: Vec<EnrichedYearRecord>,
}

impl QueryFacade {
    pub fn new(store: RecordStore) -> Self {
        let enriched = enrich_all(store.all());
        log::debug!("query facade ready: {} enriched years", enriched.len());
        Self { store, enriched }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The enriched table, ordered by year ascending.
    pub fn enriched(&self) -> &[EnrichedYearRecord] {
        &self.enriched
    }

    pub fn enriched_for(&self, year: Year) -> EngineResult<&EnrichedYearRecord> {
        self.enriched
            .binary_search_by_key(&year, |r| r.year())
            .map(|idx| &self.enriched[idx])
            .map_err(|_| EngineError::not_found(format!("Record for year {year}")))
    }

    pub fn year_summary(&self, year: Year) -> EngineResult<YearSummary> {
        Ok(summary::year_summary(self.enriched_for(year)?))
    }

    pub fn distribution(&self, year: Year) -> EngineResult<Distribution> {
        Ok(summary::distribution(self.enriched_for(year)?))
    }

    pub fn series(&self, metric_name: &str) -> EngineResult<Vec<SeriesPoint>> {
        let metric = Metric::from_name(metric_name)?;
        Ok(summary::series(&self.enriched, metric))
    }

    /// Matrix and strongest pairs for columns given by name.
    pub fn correlation_snapshot<S: AsRef<str>>(
        &self,
        columns: &[S],
        top_n: usize,
    ) -> EngineResult<CorrelationSnapshot> {
        let metrics = Metric::parse_list(columns)?;
        self.correlation_snapshot_for(&metrics, top_n)
    }

    pub fn correlation_snapshot_for(
        &self,
        columns: &[Metric],
        top_n: usize,
    ) -> EngineResult<CorrelationSnapshot> {
        let matrix = correlation_matrix(&self.enriched, columns)?;
        let ranked = rank_pairs(&matrix, top_n)?;
        Ok(CorrelationSnapshot { matrix, ranked })
    }
}
