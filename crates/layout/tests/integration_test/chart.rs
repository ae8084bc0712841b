//! End-to-end layout from raw JSON to a chart frame.

use salesperf_layout::ChartTemplate;
use salesperf_normalize::{normalize, records_from_json, ForecastWindow, NormalizeOptions};

const CATEGORIES: &str = r#"{
    "Total": {"total": true, "shpm_sum": 52000000, "bop_sum": 51000000, "sp": 98.2},
    "FAMILYCARE": {"total": true, "shpm_sum": 17820000, "bop_sum": 18110000, "sp": 98.4},
    "BABYCARE": {"total": true, "shpm_sum": 9030000, "bop_sum": 0, "sp": 0},
    "Hidden": {"total": false, "shpm_sum": 1, "bop_sum": 1, "sp": 1}
}"#;

#[test]
fn test_category_chart_columns_follow_input_order() {
    let records = records_from_json(CATEGORIES).unwrap();
    let points = normalize(&records, &NormalizeOptions::with_volume_scale(1_000_000.0));
    let frame = ChartTemplate::default().with_volume_unit("M").layout(&points);

    let labels: Vec<&str> = frame.columns.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, ["Total", "FAMILYCARE", "BABYCARE"]);

    let babycare = &frame.columns[2];
    assert!(babycare.primary_bar.is_none());
    assert!(babycare.secondary_bar.is_some());
    assert!(!babycare.annotation.render());
    assert_eq!(babycare.tooltip, ["BABYCARE", "SH: 9.03M"]);
    assert_eq!(frame.annotation_count(), 2);
}

#[test]
fn test_windowed_series_lays_out_trailing_months() {
    let json: String = {
        let rows: Vec<String> = (1..=12)
            .map(|m| {
                format!(
                    r#"{{"month_date": "2024-{m:02}-01", "bop_sum_sp": {}, "sp": "{}%"}}"#,
                    3000 + m * 10,
                    90 + m
                )
            })
            .collect();
        format!("[{}]", rows.join(","))
    };
    let records = records_from_json(&json).unwrap();
    let points = normalize(&records, &NormalizeOptions::default());
    let visible = ForecastWindow::Months6.apply(&points);

    let frame = ChartTemplate::default().layout(visible);
    assert_eq!(frame.columns.len(), 6);
    assert_eq!(frame.columns[0].label, "Jul 24");
    assert_eq!(frame.columns[5].label, "Dec 24");
    assert_eq!(frame.ratio_segments.len(), 1);
    assert_eq!(frame.ratio_segments[0].len(), 6);
}

#[test]
fn test_columns_spaced_evenly_inside_plot() {
    let records = records_from_json(
        r#"[
            {"month_date": "2024-06-01", "bop_sum_sp": 2537, "shpm_sp": 2577.015, "sp": "101.60%"},
            {"month_date": "2024-07-01", "bop_sum_sp": 3315, "shpm_sp": 3308.76, "sp": "99.80%"},
            {"month_date": "2024-08-01", "bop_sum_sp": 4712, "shpm_sp": 4066.866, "sp": "86.30%"},
            {"month_date": "2024-09-01", "bop_sum_sp": 3394, "shpm_sp": 4576.815, "sp": "134.90%"}
        ]"#,
    )
    .unwrap();
    let points = normalize(&records, &NormalizeOptions::default());
    let frame = ChartTemplate::default().layout(&points);
    let plot = frame.plot;

    let xs: Vec<f64> = frame.columns.iter().map(|c| c.center_x).collect();
    let gap = xs[1] - xs[0];
    for pair in xs.windows(2) {
        assert!((pair[1] - pair[0] - gap).abs() < 1e-9);
    }
    assert!(xs[0] > plot.x && xs[3] < plot.x + plot.width);

    for col in &frame.columns {
        let (_, y) = col.ratio_point.unwrap();
        assert!(y >= plot.y && y <= plot.bottom());
    }
}

#[test]
fn test_frame_serializes_to_json() {
    let records = records_from_json(
        r#"[{"month_date": "2025-06-01", "shpm_sp": 4407.841, "bop_sum_sp": 0, "sp": 0}]"#,
    )
    .unwrap();
    let points = normalize(&records, &NormalizeOptions::default());
    let frame = ChartTemplate::default().layout(&points);
    let value = serde_json::to_value(&frame).unwrap();

    assert_eq!(value["columns"][0]["label"], "Jun 25");
    assert!(value["columns"][0]["primary_bar"].is_null());
    assert_eq!(value["columns"][0]["annotation"]["render"], "skip");
}
