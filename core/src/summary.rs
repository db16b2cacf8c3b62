//! Per-year views for presentation consumers: key-metric cards,
//! distribution splits and trend series.
//!
//! Pure reshaping of enriched records. No new arithmetic beyond the
//! "Other" country bucket.

use crate::{
    enrich::EnrichedYearRecord,
    metric::Metric,
    record::Country,
    types::{MetricValue, Year},
};
use serde::{Deserialize, Serialize};

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetric {
    pub label:   String,
    pub metric:  Metric,
    pub value:   MetricValue,
    /// Rendered card text; "n/a" when the value is Undefined.
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year:        Year,
    pub record:      EnrichedYearRecord,
    pub key_metrics: Vec<KeyMetric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub year:            Year,
    /// USA, China, India, then Other.
    pub countries:       Vec<Slice>,
    pub fdi:             Vec<Slice>,
    pub investment_type: Vec<Slice>,
    pub key_metrics:     Vec<KeyMetric>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year:  Year,
    pub value: MetricValue,
}

// ── Builders ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Format {
    Integer,
    Percent,
    Thousands,
    Billions,
    OneDecimal,
}

const OVERVIEW_CARDS: [(&str, Metric, Format); 8] = [
    ("Total eMNCs",       Metric::EmncTotal,        Format::Integer),
    ("Global GDP Share",  Metric::GdpShare,         Format::Percent),
    ("GDP Growth",        Metric::GdpGrowth,        Format::Percent),
    ("ESG Score",         Metric::DEsg,             Format::Integer),
    ("Billionaire Count", Metric::BillionaireCount, Format::Thousands),
    ("FDI Net Flow",      Metric::FdiNet,           Format::Billions),
    ("Greenfield Share",  Metric::GreenfieldShare,  Format::Percent),
    ("M&A Share",         Metric::MAndAShare,       Format::Percent),
];

const DISTRIBUTION_CARDS: [(&str, Metric, Format); 4] = [
    ("eMNC Share of Fortune 500",  Metric::EmncShare,              Format::Percent),
    ("GDP Share",                  Metric::GdpShare,               Format::Percent),
    ("ESG Score",                  Metric::DEsg,                   Format::Integer),
    ("Billionaires per 100 eMNCs", Metric::BillionairesPer100Emnc, Format::OneDecimal),
];

pub fn year_summary(record: &EnrichedYearRecord) -> YearSummary {
    YearSummary {
        year:        record.year(),
        record:      record.clone(),
        key_metrics: cards(record, &OVERVIEW_CARDS),
    }
}

pub fn distribution(record: &EnrichedYearRecord) -> Distribution {
    let raw = &record.raw;
    let mut countries: Vec<Slice> = Country::ALL
        .iter()
        .map(|c| Slice { label: c.label().into(), value: f64::from(raw.country_count(*c)) })
        .collect();
    let listed: i64 = Country::ALL.iter().map(|c| i64::from(raw.country_count(*c))).sum();
    let other = (i64::from(raw.emnc_total) - listed).max(0);
    countries.push(Slice { label: "Other".into(), value: other as f64 });

    Distribution {
        year: record.year(),
        countries,
        fdi: vec![
            Slice { label: "OFDI".into(), value: raw.ofdi },
            Slice { label: "IFDI".into(), value: raw.ifdi },
        ],
        investment_type: vec![
            Slice { label: "Greenfield".into(), value: raw.greenfield },
            Slice { label: "M&A".into(),        value: raw.m_and_a },
        ],
        key_metrics: cards(record, &DISTRIBUTION_CARDS),
    }
}

/// One metric across every record, in record order.
pub fn series(records: &[EnrichedYearRecord], metric: Metric) -> Vec<SeriesPoint> {
    records
        .iter()
        .map(|r| SeriesPoint { year: r.year(), value: r.value(metric) })
        .collect()
}

fn cards(record: &EnrichedYearRecord, layout: &[(&str, Metric, Format)]) -> Vec<KeyMetric> {
    layout.iter()
        .map(|(label, metric, format)| {
            let value = record.value(*metric);
            KeyMetric {
                label: (*label).to_string(),
                metric: *metric,
                value,
                display: render(value, *format),
            }
        })
        .collect()
}

fn render(value: MetricValue, format: Format) -> String {
    let Some(v) = value.as_f64() else {
        return "n/a".to_string();
    };
    match format {
        Format::Integer    => format!("{v:.0}"),
        Format::Percent    => format!("{v:.1}%"),
        Format::Thousands  => group_thousands(v.round() as i64),
        Format::Billions   => format!("${v:.0}B"),
        Format::OneDecimal => format!("{v:.1}"),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
