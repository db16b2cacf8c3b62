//! Query facade tests: end-to-end over the built-in dataset.

use emnc_core::{
    config::EngineConfig,
    dataset,
    error::EngineError,
    facade::QueryFacade,
    metric::Metric,
    types::MetricValue,
};

fn facade() -> QueryFacade {
    let _ = env_logger::builder().is_test(true).try_init();
    QueryFacade::new(dataset::builtin_store().expect("built-in store"))
}

#[test]
fn year_summary_cards_for_2024() {
    let summary = facade().year_summary(2024).unwrap();
    assert_eq!(summary.year, 2024);

    let cards: Vec<(&str, &str)> = summary
        .key_metrics
        .iter()
        .map(|k| (k.label.as_str(), k.display.as_str()))
        .collect();
    assert_eq!(
        cards,
        vec![
            ("Total eMNCs", "95"),
            ("Global GDP Share", "50.2%"),
            ("GDP Growth", "4.0%"),
            ("ESG Score", "63"),
            ("Billionaire Count", "5,200"),
            ("FDI Net Flow", "$30B"),
            ("Greenfield Share", "40.7%"),
            ("M&A Share", "59.3%"),
        ]
    );
}

#[test]
fn year_summary_for_2025_is_not_found() {
    let err = facade().year_summary(2025).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }), "got {err}");
}

/// "Other" is what remains of the eMNC total after the listed countries,
/// floored at zero.
#[test]
fn distribution_other_bucket_floors_at_zero() {
    let d = facade().distribution(2016).unwrap();
    let labels: Vec<_> = d.countries.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["USA", "China", "India", "Other"]);
    // 60 - (126 + 98 + 8) < 0
    assert_eq!(d.countries[3].value, 0.0);

    assert_eq!(d.fdi[0].value, 300.0);
    assert_eq!(d.investment_type[1].label, "M&A");
    assert_eq!(d.key_metrics[0].display, "12.0%");
    assert_eq!(d.key_metrics[3].display, "5833.3");
}

#[test]
fn series_follows_year_order() {
    let points = facade().series("EMNC_share").unwrap();
    assert_eq!(points.len(), 9);
    assert_eq!(points[0].year, 2016);
    assert_eq!(points[0].value, MetricValue::Value(12.0));
    assert_eq!(points[8].value, MetricValue::Value(19.0));
}

#[test]
fn series_of_unknown_metric_is_not_found() {
    let err = facade().series("Patents").unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }), "got {err}");
}

#[test]
fn correlation_snapshot_by_name() {
    let snap = facade()
        .correlation_snapshot(&["Greenfield_share", "M_and_A_share", "FDI_net"], 1)
        .unwrap();

    assert_eq!(snap.matrix.columns().len(), 3);
    assert_eq!(snap.ranked.len(), 1);
    assert_eq!(snap.ranked[0].metric_a, Metric::GreenfieldShare);
    assert_eq!(snap.ranked[0].metric_b, Metric::MAndAShare);
    assert!((snap.ranked[0].correlation + 1.0).abs() < 1e-12);
}

/// Errors from the layers below reach the caller unchanged.
#[test]
fn correlation_snapshot_propagates_errors() {
    let f = facade();

    let err = f.correlation_snapshot(&["USA", "Atlantis"], 3).unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }), "got {err}");

    let err = f.correlation_snapshot(&["USA"], 3).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument { .. }), "got {err}");

    let err = f.correlation_snapshot(&["USA", "China"], 0).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument { .. }), "got {err}");
}

#[test]
fn configured_snapshot_uses_default_columns() {
    let config = EngineConfig::default();
    let snap = facade()
        .correlation_snapshot_for(&config.correlation_columns, config.top_n)
        .unwrap();

    assert_eq!(snap.matrix.columns(), &Metric::CORRELATION_DEFAULT[..]);
    assert_eq!(snap.ranked.len(), 5);
}

/// The snapshot serializes with metric names, ready for a JSON host.
#[test]
fn snapshot_serializes_metric_names() {
    let snap = facade().correlation_snapshot(&["USA", "China"], 1).unwrap();
    let json = serde_json::to_value(&snap).unwrap();

    assert_eq!(json["matrix"]["columns"][0], "USA");
    assert_eq!(json["ranked"][0]["metric_a"], "China");
    assert_eq!(json["ranked"][0]["metric_b"], "USA");
}
