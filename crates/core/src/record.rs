use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One raw field as the upstream source emits it.
///
/// Volumes usually arrive as JSON numbers and ratios as `"101.60%"` strings,
/// but either may be a number, a string, `null`, or missing entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Missing,
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Number),
            serde_json::Value::String(s) => RawValue::Text(s),
            // Booleans, arrays and objects are kept as text so they degrade to
            // absent during parsing instead of rejecting the whole document.
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(serde_json::Value::deserialize(deserializer)?.into())
    }
}

/// Text form of a key field. Strings are kept as-is, `null` becomes empty and
/// anything else uses its JSON text, so a numeric `month_date` still yields a
/// record.
pub fn key_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(key_text(&serde_json::Value::deserialize(deserializer)?))
}

fn lenient_opt_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| key_text(&value)))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::Value::deserialize(deserializer)?.as_bool())
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => write!(f, "{:?}", s),
            RawValue::Missing => write!(f, "(missing)"),
        }
    }
}

/// Monthly time-series record, keyed by a date such as `"2024-06-01"`.
///
/// Field names follow the upstream query (`month_date`, `bop_sum_sp`,
/// `shpm_sp`, `sp`); the hand-written demo form (`month`, `BOP`, `SH`, `SP`)
/// is accepted through aliases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeriodRecord {
    #[serde(rename = "month_date", alias = "month", default, deserialize_with = "lenient_key")]
    pub period_key: String,
    #[serde(rename = "bop_sum_sp", alias = "bop", alias = "BOP", default)]
    pub primary: RawValue,
    #[serde(rename = "shpm_sp", alias = "sh", alias = "SH", default)]
    pub secondary: RawValue,
    #[serde(rename = "sp", alias = "SP", default)]
    pub ratio: RawValue,
}

/// Per-category snapshot record (`FAMILYCARE`, `FEMCARE`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(deserialize_with = "lenient_key")]
    pub category: String,
    #[serde(rename = "bop_sum", default)]
    pub primary: RawValue,
    #[serde(rename = "shpm_sum", default)]
    pub secondary: RawValue,
    #[serde(rename = "sp", default)]
    pub ratio: RawValue,
    /// Display month of the snapshot (e.g. `"Aug 23"`); informational only.
    #[serde(
        rename = "month",
        default,
        deserialize_with = "lenient_opt_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_key: Option<String>,
}

/// A category entry as it appears in the map-shaped document, where the
/// category name is the object key rather than a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    #[serde(default, deserialize_with = "lenient_flag", skip_serializing_if = "Option::is_none")]
    pub total: Option<bool>,
    #[serde(default)]
    pub shpm_sum: RawValue,
    #[serde(default)]
    pub bop_sum: RawValue,
    #[serde(default)]
    pub sp: RawValue,
    #[serde(default, deserialize_with = "lenient_opt_key", skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl CategoryRecord {
    pub fn from_snapshot(category: impl Into<String>, snapshot: CategorySnapshot) -> Self {
        Self {
            category: category.into(),
            primary: snapshot.bop_sum,
            secondary: snapshot.shpm_sum,
            ratio: snapshot.sp,
            period_key: snapshot.month,
        }
    }
}

/// Raw input record, in either of the two shapes the data source produces.
///
/// Category records are tried first; anything without a `category` field is
/// read as a period record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    Category(CategoryRecord),
    Period(PeriodRecord),
}

impl RawRecord {
    pub fn primary(&self) -> &RawValue {
        match self {
            RawRecord::Category(r) => &r.primary,
            RawRecord::Period(r) => &r.primary,
        }
    }

    pub fn secondary(&self) -> &RawValue {
        match self {
            RawRecord::Category(r) => &r.secondary,
            RawRecord::Period(r) => &r.secondary,
        }
    }

    pub fn ratio(&self) -> &RawValue {
        match self {
            RawRecord::Category(r) => &r.ratio,
            RawRecord::Period(r) => &r.ratio,
        }
    }
}

impl From<PeriodRecord> for RawRecord {
    fn from(r: PeriodRecord) -> Self {
        RawRecord::Period(r)
    }
}

impl From<CategoryRecord> for RawRecord {
    fn from(r: CategoryRecord) -> Self {
        RawRecord::Category(r)
    }
}
