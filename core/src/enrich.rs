//! Derived-metrics calculator.
//!
//! RULE: Every derived field is a pure function of the raw fields of the
//! same record. No cross-year state, no side effects.
//! A zero denominator yields MetricValue::Undefined for that field only;
//! the remaining fields are still computed.

use crate::{
    metric::Metric,
    record::YearRecord,
    types::{MetricValue, Year, FORTUNE_GLOBAL_500},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedYearRecord {
    pub raw: YearRecord,

    /// eMNC count as a percentage of the Fortune Global 500.
    pub emnc_share:                MetricValue,
    /// Inbound minus outbound FDI.
    pub fdi_net:                   MetricValue,
    /// Inbound over outbound FDI.
    pub fdi_ratio:                 MetricValue,
    pub greenfield_share:          MetricValue,
    pub m_and_a_share:             MetricValue,
    /// ESG score per 100 eMNCs.
    pub d_esg_per_100_emnc:        MetricValue,
    pub billionaires_per_100_emnc: MetricValue,
}

impl EnrichedYearRecord {
    pub fn year(&self) -> Year {
        self.raw.year
    }

    /// Uniform access to any raw or derived column.
    pub fn value(&self, metric: Metric) -> MetricValue {
        let r = &self.raw;
        match metric {
            Metric::Usa                    => MetricValue::Value(f64::from(r.usa)),
            Metric::China                  => MetricValue::Value(f64::from(r.china)),
            Metric::India                  => MetricValue::Value(f64::from(r.india)),
            Metric::EmncTotal              => MetricValue::Value(f64::from(r.emnc_total)),
            Metric::Ofdi                   => MetricValue::Value(r.ofdi),
            Metric::Ifdi                   => MetricValue::Value(r.ifdi),
            Metric::Greenfield             => MetricValue::Value(r.greenfield),
            Metric::MAndA                  => MetricValue::Value(r.m_and_a),
            Metric::GdpShare               => MetricValue::Value(r.gdp_share),
            Metric::GdpGrowth              => MetricValue::Value(r.gdp_growth),
            Metric::DEsg                   => MetricValue::Value(r.d_esg),
            Metric::BillionaireCount       => MetricValue::Value(f64::from(r.billionaire_count)),
            Metric::EmncShare              => self.emnc_share,
            Metric::FdiNet                 => self.fdi_net,
            Metric::FdiRatio               => self.fdi_ratio,
            Metric::GreenfieldShare        => self.greenfield_share,
            Metric::MAndAShare             => self.m_and_a_share,
            Metric::DEsgPer100Emnc         => self.d_esg_per_100_emnc,
            Metric::BillionairesPer100Emnc => self.billionaires_per_100_emnc,
        }
    }
}

/// Compute every derived field of a single record.
pub fn enrich(record: &YearRecord) -> EnrichedYearRecord {
    let emnc_total = f64::from(record.emnc_total);
    let investment = record.greenfield + record.m_and_a;

    let greenfield_share = MetricValue::ratio(record.greenfield, investment).map(|v| v * 100.0);
    // Complement of the greenfield share, so the pair always sums to 100.
    let m_and_a_share = greenfield_share.map(|g| 100.0 - g);

    let enriched = EnrichedYearRecord {
        emnc_share:                MetricValue::Value(emnc_total / FORTUNE_GLOBAL_500 * 100.0),
        fdi_net:                   MetricValue::Value(record.ifdi - record.ofdi),
        fdi_ratio:                 MetricValue::ratio(record.ifdi, record.ofdi),
        greenfield_share,
        m_and_a_share,
        d_esg_per_100_emnc:        MetricValue::ratio(record.d_esg, emnc_total).map(|v| v * 100.0),
        billionaires_per_100_emnc: MetricValue::ratio(f64::from(record.billionaire_count), emnc_total)
            .map(|v| v * 100.0),
        raw: record.clone(),
    };

    log::debug!(
        "year={} enriched: emnc_share={:?} fdi_ratio={:?} greenfield_share={:?}",
        record.year,
        enriched.emnc_share,
        enriched.fdi_ratio,
        enriched.greenfield_share
    );
    enriched
}

/// Enrich a sequence of records, preserving input order.
pub fn enrich_all(records: &[YearRecord]) -> Vec<EnrichedYearRecord> {
    records.iter().map(enrich).collect()
}
