//! Tests for ForecastWindow applied to normalized series.

use salesperf_core::CanonicalPoint;
use salesperf_normalize::ForecastWindow;

fn series(n: usize) -> Vec<CanonicalPoint> {
    (0..n).map(|i| CanonicalPoint::new(format!("P{i}"))).collect()
}

#[test]
fn test_window_keeps_latest_points() {
    let points = series(32);
    let shown = ForecastWindow::Months6.apply(&points);
    assert_eq!(shown.len(), 6);
    assert_eq!(shown[0].label, "P26");
    assert_eq!(shown[5].label, "P31");
}

#[test]
fn test_default_window_keeps_every_point() {
    let points = series(32);
    assert_eq!(ForecastWindow::default().apply(&points).len(), 32);
    let points = series(13);
    let shown = ForecastWindow::default().apply(&points);
    assert_eq!(shown.len(), 13);
    assert_eq!(shown[0].label, "P0");
}

#[test]
fn test_window_serde_uses_selector_strings() {
    let json = serde_json::to_string(&ForecastWindow::Months24).unwrap();
    assert_eq!(json, "\"24M\"");
    let parsed: ForecastWindow = serde_json::from_str("\"6m\"").unwrap();
    assert_eq!(parsed, ForecastWindow::Months6);
    assert!(serde_json::from_str::<ForecastWindow>("\"3M\"").is_err());
}
