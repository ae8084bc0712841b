//! Tests for normalize(): order preservation, zero-as-missing, scaling, labels.

use salesperf_core::{CanonicalPoint, PeriodRecord, RawRecord, RawValue};
use salesperf_normalize::*;

fn monthly_fixture() -> &'static str {
    r#"[
        {"month_date": "2024-06-01", "shpm_sp": 2577.015, "bop_sum_sp": 2537, "sp": "101.60%"},
        {"month_date": "2024-07-01", "shpm_sp": 3308.76, "bop_sum_sp": 3315, "sp": "99.80%"},
        {"month_date": "2024-08-01", "shpm_sp": 4066.866, "bop_sum_sp": 4712, "sp": "86.30%"},
        {"month_date": "2025-01-01", "shpm_sp": 3105.2, "bop_sum_sp": 3291, "sp": "94.40%"},
        {"month_date": "2025-05-01", "shpm_sp": 0, "bop_sum_sp": 3449, "sp": 0},
        {"month_date": "2025-06-01", "shpm_sp": 4407.841, "bop_sum_sp": 0, "sp": 0}
    ]"#
}

#[test]
fn test_one_point_per_record_in_order() {
    let records = records_from_json(monthly_fixture()).unwrap();
    let points = normalize(&records, &NormalizeOptions::default());

    assert_eq!(points.len(), records.len());
    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Jun 24", "Jul 24", "Aug 24", "Jan 25", "May 25", "Jun 25"]);
}

#[test]
fn test_trailing_zero_months_become_absent() {
    let records = records_from_json(
        r#"[
            {"month_date": "2025-05-01", "shpm_sp": 0, "bop_sum_sp": 3449, "sp": 0},
            {"month_date": "2025-06-01", "shpm_sp": 4407.841, "bop_sum_sp": 0, "sp": 0}
        ]"#,
    )
    .unwrap();
    let points = normalize(&records, &NormalizeOptions::default());

    assert_eq!(
        points,
        vec![
            CanonicalPoint {
                label: "May 25".into(),
                primary: Some(3449.0),
                secondary: None,
                ratio: None,
            },
            CanonicalPoint {
                label: "Jun 25".into(),
                primary: None,
                secondary: Some(4407.841),
                ratio: None,
            },
        ]
    );
}

#[test]
fn test_ratio_strings_parse_exactly() {
    let records = records_from_json(monthly_fixture()).unwrap();
    let points = normalize(&records, &NormalizeOptions::default());

    assert_eq!(points[0].ratio, Some(101.6));
    assert_eq!(points[1].ratio, Some(99.8));
    assert_eq!(points[2].ratio, Some(86.3));
}

#[test]
fn test_absent_ratio_inputs() {
    let records: Vec<RawRecord> = [
        RawValue::from("0%"),
        RawValue::Number(0.0),
        RawValue::from(""),
        RawValue::from("abc"),
        RawValue::Missing,
    ]
    .into_iter()
    .map(|ratio| {
        RawRecord::Period(PeriodRecord {
            period_key: "2024-06-01".into(),
            primary: 1.0.into(),
            secondary: 1.0.into(),
            ratio,
        })
    })
    .collect();

    let points = normalize(&records, &NormalizeOptions::default());
    assert_eq!(points.len(), 5);
    assert!(points.iter().all(|p| p.ratio.is_none()));
    assert!(points.iter().all(|p| p.primary == Some(1.0)));
}

#[test]
fn test_volume_scale_applies_to_volumes_only() {
    let records = records_from_json(monthly_fixture()).unwrap();
    let raw = normalize(&records, &NormalizeOptions::default());
    let scaled = normalize(&records, &NormalizeOptions::with_volume_scale(1000.0));

    for (r, s) in raw.iter().zip(&scaled) {
        assert_eq!(s.primary, r.primary.map(|v| v / 1000.0));
        assert_eq!(s.secondary, r.secondary.map(|v| v / 1000.0));
        assert_eq!(s.ratio, r.ratio);
        assert_eq!(s.label, r.label);
    }
}

#[test]
fn test_category_snapshot_document() {
    let records = records_from_json(
        r#"{
            "FAMILYCARE": {"total": true, "shpm_sum": 27967016, "bop_sum": 27660429,
                           "sp": "101.10%", "month": "Aug 23"},
            "FEMCARE": {"total": true, "shpm_sum": 5167166, "bop_sum": 5245380,
                        "sp": "98.50%", "month": "Aug 23"},
            "FABRICCARE": {"total": true, "shpm_sum": 39282796, "bop_sum": 40031982,
                           "sp": "98.10%", "month": "Jan 25"}
        }"#,
    )
    .unwrap();
    let points = normalize(&records, &NormalizeOptions::with_volume_scale(1000.0));

    assert_eq!(points.len(), 3);
    assert_eq!(points[0].label, "FAMILYCARE");
    assert_eq!(points[0].primary, Some(27660429.0 / 1000.0));
    assert_eq!(points[0].secondary, Some(27967016.0 / 1000.0));
    assert_eq!(points[0].ratio, Some(101.1));
    assert_eq!(points[2].label, "FABRICCARE");
}

#[test]
fn test_demo_month_labels_normalized() {
    let records = records_from_json(
        r#"[
            {"month": "JUL 23", "bop": 25000, "sh": 24000, "sp": 104.2},
            {"month": "June 23", "BOP": 27660429, "SH": 27967016, "SP": 101.1}
        ]"#,
    )
    .unwrap();
    let points = normalize(&records, &NormalizeOptions::default());
    assert_eq!(points[0].label, "Jul 23");
    assert_eq!(points[1].label, "Jun 23");
    assert_eq!(points[0].ratio, Some(104.2));
}

#[test]
fn test_empty_input() {
    let records = records_from_json("[]").unwrap();
    assert!(normalize(&records, &NormalizeOptions::default()).is_empty());
}

const GOOD_RECORD: &str =
    r#"{"month_date": "2024-06-01", "shpm_sp": 2577.015, "bop_sum_sp": 2537, "sp": "101.60%"}"#;

fn with_good_record(second: &str) -> Vec<CanonicalPoint> {
    let records = records_from_json(&format!("[{GOOD_RECORD}, {second}]")).unwrap();
    normalize(&records, &NormalizeOptions::default())
}

#[test]
fn test_numeric_period_key_keeps_batch() {
    let points = with_good_record(
        r#"{"month_date": 20240701, "shpm_sp": 3308.76, "bop_sum_sp": 3315, "sp": "99.80%"}"#,
    );

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].label, "Jun 24");
    assert_eq!(points[1].label, "20240701");
    assert_eq!(points[1].primary, Some(3315.0));
    assert_eq!(points[1].ratio, Some(99.8));
}

#[test]
fn test_key_and_alias_together_keeps_batch() {
    let points = with_good_record(
        r#"{"month_date": "2024-07-01", "month": "Jul 24",
            "shpm_sp": 3308.76, "bop_sum_sp": 3315, "sp": "99.80%"}"#,
    );

    assert_eq!(points.len(), 2);
    assert_eq!(
        points[1],
        CanonicalPoint {
            label: "Jul 24".into(),
            primary: Some(3315.0),
            secondary: Some(3308.76),
            ratio: Some(99.8),
        }
    );
}

#[test]
fn test_null_element_becomes_empty_point() {
    let points = with_good_record("null");

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].ratio, Some(101.6));
    assert!(points[1].is_empty());
    assert_eq!(points[1].label, "");
}

#[test]
fn test_malformed_category_entry_keeps_map() {
    let records = records_from_json(
        r#"{
            "FAMILYCARE": {"total": true, "shpm_sum": 27967016, "bop_sum": 27660429,
                           "sp": "101.10%"},
            "FEMCARE": null,
            "PHC": {"total": "yes", "shpm_sum": [1, 2], "bop_sum": 3895495, "sp": "96.30%"}
        }"#,
    )
    .unwrap();
    let points = normalize(&records, &NormalizeOptions::default());

    let labels: Vec<&str> = points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["FAMILYCARE", "FEMCARE", "PHC"]);
    assert!(points[1].is_empty());
    assert_eq!(points[2].secondary, None);
    assert_eq!(points[2].primary, Some(3895495.0));
}
