//! Tests for raw record deserialization across both input shapes.

use salesperf_core::*;

#[test]
fn test_mixed_array_deserializes_per_shape() {
    let json = r#"[
        {"month_date": "2025-05-01", "shpm_sp": 0, "bop_sum_sp": 3449, "sp": 0},
        {"category": "PHC", "shpm_sum": 3749773, "bop_sum": 3895495, "sp": "96.30%"},
        {"month": "AUG 23", "bop": 25500, "sh": 24500, "sp": 104.1}
    ]"#;

    let records: Vec<RawRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records.len(), 3);
    assert!(matches!(records[0], RawRecord::Period(_)));
    assert!(matches!(records[1], RawRecord::Category(_)));
    assert!(matches!(records[2], RawRecord::Period(_)));

    assert_eq!(records[0].secondary(), &RawValue::Number(0.0));
    assert_eq!(records[1].ratio(), &RawValue::Text("96.30%".into()));
    assert_eq!(records[2].primary(), &RawValue::Number(25500.0));
}

#[test]
fn test_category_record_keeps_month() {
    let json = r#"{"category": "FABRICCARE", "shpm_sum": 39282796, "bop_sum": 40031982,
                   "sp": "98.10%", "month": "Jan 25"}"#;
    let record: RawRecord = serde_json::from_str(json).unwrap();
    match record {
        RawRecord::Category(c) => assert_eq!(c.period_key.as_deref(), Some("Jan 25")),
        other => panic!("expected category record, got {other:?}"),
    }
}

#[test]
fn test_unexpected_types_degrade_to_text() {
    let json =
        r#"{"month_date": "2024-07-01", "bop_sum_sp": [1, 2], "shpm_sp": false, "sp": null}"#;
    let record: RawRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.primary(), &RawValue::Text("[1,2]".into()));
    assert_eq!(record.secondary(), &RawValue::Text("false".into()));
    assert!(record.ratio().is_missing());
}

#[test]
fn test_record_serializes_with_upstream_keys() {
    let record = RawRecord::Period(PeriodRecord {
        period_key: "2024-06-01".into(),
        primary: 2537.0.into(),
        secondary: 2577.015.into(),
        ratio: "101.60%".into(),
    });
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["month_date"], "2024-06-01");
    assert_eq!(json["bop_sum_sp"], 2537.0);
    assert_eq!(json["shpm_sp"], 2577.015);
    assert_eq!(json["sp"], "101.60%");
}
