use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use salesperf_core::RawValue;

/// Why a raw field ended up absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// Field missing or `null`.
    Missing,
    /// Exactly zero: the source's marker for "no data".
    Zero,
    /// Text that is not a finite decimal number.
    Unparsable,
}

impl fmt::Display for Absence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absence::Missing => write!(f, "missing"),
            Absence::Zero => write!(f, "zero"),
            Absence::Unparsable => write!(f, "unparsable"),
        }
    }
}

/// Parse a ratio field such as `"101.60%"`, `"98.5"` or `104.2`.
///
/// One trailing `%` is stripped from text values. Zero and anything that
/// does not parse to a finite number is absent.
pub fn parse_ratio(raw: &RawValue) -> Option<f64> {
    classify_ratio(raw).ok()
}

/// Parse a volume field (no scaling). Zero and unparsable values are absent.
pub fn parse_volume(raw: &RawValue) -> Option<f64> {
    classify_volume(raw).ok()
}

pub(crate) fn classify_ratio(raw: &RawValue) -> Result<f64, Absence> {
    classify(raw, |s| s.strip_suffix('%').unwrap_or(s))
}

pub(crate) fn classify_volume(raw: &RawValue) -> Result<f64, Absence> {
    classify(raw, |s| s)
}

fn classify(raw: &RawValue, strip: impl Fn(&str) -> &str) -> Result<f64, Absence> {
    let value = match raw {
        RawValue::Missing => return Err(Absence::Missing),
        RawValue::Number(n) => *n,
        RawValue::Text(s) => strip(s.trim())
            .trim()
            .parse::<f64>()
            .map_err(|_| Absence::Unparsable)?,
    };

    if !value.is_finite() {
        return Err(Absence::Unparsable);
    }
    if value == 0.0 {
        return Err(Absence::Zero);
    }
    Ok(value)
}

/// Derive the display label for a period key.
///
/// Date-like keys become `"{Mon} {yy}"` using the calendar date as written
/// (`"2024-06-01"` → `"Jun 24"`). Keys that are already month labels
/// (`"JUL 23"`, `"June 23"`) are brought to the same pattern. Anything else
/// is returned trimmed.
pub fn period_label(key: &str) -> String {
    let key = key.trim();
    if let Some(date) = parse_period_date(key).or_else(|| parse_month_label(key)) {
        return date.format("%b %y").to_string();
    }
    key.to_string()
}

/// Parse a date-like key, keeping the literal calendar date.
///
/// Tries in order:
/// 1. Just date: `"2024-06-01"`
/// 2. Space-separated: `"2024-06-01 00:00:00"`
/// 3. ISO without offset: `"2024-06-01T00:00:00"`
/// 4. RFC3339: `"2024-06-01T00:00:00+08:00"` (offset ignored, date as written)
/// 5. Year and month: `"2024-06"`
pub fn parse_period_date(value: &str) -> Option<NaiveDate> {
    if let Ok(nd) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(nd);
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(ndt.date());
        }
    }

    // naive_local() is the wall-clock time at the written offset, so the
    // date never shifts across a timezone boundary.
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local().date());
    }

    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").ok()
}

/// Parse `"{month name} {2-digit year}"`, case-insensitively.
fn parse_month_label(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", value), "%d %b %y").ok()
}
