//! Derived-metrics calculator tests.

use emnc_core::{
    dataset,
    enrich::{enrich, enrich_all},
    record::YearRecord,
    types::MetricValue,
};

fn record_2016() -> YearRecord {
    YearRecord {
        year: 2016,
        usa: 126,
        china: 98,
        india: 8,
        emnc_total: 60,
        ofdi: 300.0,
        ifdi: 400.0,
        greenfield: 150.0,
        m_and_a: 200.0,
        gdp_share: 45.0,
        gdp_growth: 4.8,
        d_esg: 50.0,
        billionaire_count: 3500,
    }
}

fn value(v: MetricValue) -> f64 {
    v.as_f64().expect("expected a defined value")
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: computed={actual}, expected={expected}"
    );
}

/// The 2016 record must produce the published dashboard figures.
#[test]
fn record_2016_derived_fields() {
    let e = enrich(&record_2016());

    assert_eq!(e.emnc_share, MetricValue::Value(12.0));
    assert_eq!(e.fdi_net, MetricValue::Value(100.0));
    assert_close(value(e.fdi_ratio), 4.0 / 3.0, "FDI_ratio");
    assert_close(value(e.greenfield_share), 300.0 / 7.0, "Greenfield_share");
    assert_close(value(e.m_and_a_share), 400.0 / 7.0, "M_and_A_share");
    assert_close(value(e.d_esg_per_100_emnc), 250.0 / 3.0, "D_ESG_per_100eMNC");
    assert_close(value(e.billionaires_per_100_emnc), 17_500.0 / 3.0, "Billionaires_per_100eMNC");
}

/// Enrichment is a pure function: same input, identical output.
#[test]
fn enrich_is_deterministic() {
    let r = record_2016();
    assert_eq!(enrich(&r), enrich(&r));
    assert_eq!(enrich(&r).raw, r, "raw fields must be carried unchanged");
}

/// Outbound FDI of zero makes the ratio undefined, nothing else.
#[test]
fn zero_outbound_fdi_gives_undefined_ratio() {
    let r = YearRecord { ofdi: 0.0, ..record_2016() };
    let e = enrich(&r);

    assert_eq!(e.fdi_ratio, MetricValue::Undefined);
    assert_eq!(e.fdi_net, MetricValue::Value(400.0));
    assert!(!e.greenfield_share.is_undefined());
}

/// No greenfield and no M&A: both shares undefined.
#[test]
fn zero_investment_gives_undefined_shares() {
    let r = YearRecord { greenfield: 0.0, m_and_a: 0.0, ..record_2016() };
    let e = enrich(&r);

    assert_eq!(e.greenfield_share, MetricValue::Undefined);
    assert_eq!(e.m_and_a_share, MetricValue::Undefined);
}

/// Zero eMNCs: both intensity metrics undefined, share is a plain 0.
#[test]
fn zero_emnc_total_gives_undefined_intensities() {
    let r = YearRecord { emnc_total: 0, ..record_2016() };
    let e = enrich(&r);

    assert_eq!(e.d_esg_per_100_emnc, MetricValue::Undefined);
    assert_eq!(e.billionaires_per_100_emnc, MetricValue::Undefined);
    assert_eq!(e.emnc_share, MetricValue::Value(0.0));
}

/// Pure greenfield year: 100% / 0%.
#[test]
fn all_greenfield_is_full_share() {
    let r = YearRecord { m_and_a: 0.0, ..record_2016() };
    let e = enrich(&r);

    assert_eq!(e.greenfield_share, MetricValue::Value(100.0));
    assert_eq!(e.m_and_a_share, MetricValue::Value(0.0));
}

/// Over the built-in dataset, shares stay in range and sum to 100.
#[test]
fn shares_bounded_and_complementary_over_dataset() {
    let enriched = enrich_all(&dataset::builtin_records().unwrap());
    assert_eq!(enriched.len(), 9);

    for e in &enriched {
        let g = value(e.greenfield_share);
        let m = value(e.m_and_a_share);
        let s = value(e.emnc_share);
        assert!((0.0..=100.0).contains(&g), "{}: greenfield share {g}", e.year());
        assert!((0.0..=100.0).contains(&m), "{}: M&A share {m}", e.year());
        assert!((0.0..=100.0).contains(&s), "{}: eMNC share {s}", e.year());
        assert!((g + m - 100.0).abs() < 1e-9, "{}: shares sum to {}", e.year(), g + m);
    }
}

/// enrich_all keeps the caller's order, even when it is not chronological.
#[test]
fn enrich_all_preserves_input_order() {
    let mut records = dataset::builtin_records().unwrap();
    records.reverse();

    let years: Vec<_> = enrich_all(&records).iter().map(|e| e.year()).collect();
    assert_eq!(years, vec![2024, 2023, 2022, 2021, 2020, 2019, 2018, 2017, 2016]);
}
