use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use salesperf_core::{
    key_text, CategoryRecord, CategorySnapshot, PeriodRecord, RawRecord, RawValue, Result,
};

/// Parse an input document into raw records.
///
/// Accepts either a JSON array of records (any mix of shapes) or an object
/// keyed by category name:
///
/// ```json
/// { "FAMILYCARE": { "total": true, "shpm_sum": 27967016, "bop_sum": 27660429, "sp": "101.10%" } }
/// ```
///
/// Category order follows the document. Entries flagged `"total": false`
/// are partial rows and are skipped.
///
/// Only a document that is not valid JSON, or is neither an array nor an
/// object, is an error. Each element is converted on its own: an element
/// that is not an object becomes an all-absent record, and an object whose
/// fields don't fit the usual shape is read field by field.
pub fn records_from_json(json: &str) -> Result<Vec<RawRecord>> {
    if json.trim_start().starts_with('{') {
        let map: IndexMap<String, Value> = serde_json::from_str(json)?;
        let snapshots = map
            .into_iter()
            .map(|(category, value)| {
                let snapshot = snapshot_from_value(&category, &value);
                (category, snapshot)
            })
            .collect();
        return Ok(records_from_categories(snapshots));
    }
    let values: Vec<Value> = serde_json::from_str(json)?;
    Ok(values.iter().enumerate().map(|(index, value)| record_from_value(index, value)).collect())
}

/// Flatten a category map into category records.
pub fn records_from_categories(map: IndexMap<String, CategorySnapshot>) -> Vec<RawRecord> {
    map.into_iter()
        .filter_map(|(category, snapshot)| {
            if snapshot.total == Some(false) {
                debug!(%category, "Skipping non-total category entry");
                return None;
            }
            Some(RawRecord::Category(CategoryRecord::from_snapshot(category, snapshot)))
        })
        .collect()
}

fn record_from_value(index: usize, value: &Value) -> RawRecord {
    let Value::Object(fields) = value else {
        debug!(index, %value, "Record is not an object, all fields absent");
        return RawRecord::Period(PeriodRecord::default());
    };
    match RawRecord::deserialize(value) {
        Ok(record) => record,
        Err(e) => {
            debug!(index, error = %e, "Reading record field by field");
            record_from_fields(fields)
        }
    }
}

fn record_from_fields(fields: &Map<String, Value>) -> RawRecord {
    if let Some(category) = fields.get("category") {
        return RawRecord::Category(CategoryRecord {
            category: key_text(category),
            primary: raw_field(fields, &["bop_sum"]),
            secondary: raw_field(fields, &["shpm_sum"]),
            ratio: raw_field(fields, &["sp"]),
            period_key: first_present(fields, &["month"]).map(key_text),
        });
    }
    RawRecord::Period(PeriodRecord {
        period_key: first_present(fields, &["month_date", "month"])
            .map(key_text)
            .unwrap_or_default(),
        primary: raw_field(fields, &["bop_sum_sp", "bop", "BOP"]),
        secondary: raw_field(fields, &["shpm_sp", "sh", "SH"]),
        ratio: raw_field(fields, &["sp", "SP"]),
    })
}

/// First non-null key wins, in the same order the serde aliases list them.
fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| fields.get(*k)).find(|v| !v.is_null())
}

fn raw_field(fields: &Map<String, Value>, keys: &[&str]) -> RawValue {
    first_present(fields, keys).cloned().map(RawValue::from).unwrap_or_default()
}

fn snapshot_from_value(category: &str, value: &Value) -> CategorySnapshot {
    CategorySnapshot::deserialize(value).unwrap_or_else(|e| {
        debug!(%category, error = %e, "Reading category entry field by field");
        let raw = |key: &str| value.get(key).cloned().map(RawValue::from).unwrap_or_default();
        CategorySnapshot {
            total: value.get("total").and_then(Value::as_bool),
            shpm_sum: raw("shpm_sum"),
            bop_sum: raw("bop_sum"),
            sp: raw("sp"),
            month: value.get("month").filter(|v| !v.is_null()).map(key_text),
        }
    })
}
