use tracing::{debug, warn};

use salesperf_core::{CanonicalPoint, ChartConfig, RawRecord, RawValue};

use crate::parsing::{classify_ratio, classify_volume, period_label, Absence};

/// Settings for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Divisor applied to primary and secondary volumes. Ratios are never scaled.
    pub volume_scale: f64,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { volume_scale: 1.0 }
    }
}

impl NormalizeOptions {
    pub fn with_volume_scale(volume_scale: f64) -> Self {
        Self { volume_scale }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::with_volume_scale(config.normalize.volume_scale)
    }

    /// The configured scale, or `1.0` when it is not a positive finite number.
    fn effective_scale(&self) -> f64 {
        if self.volume_scale.is_finite() && self.volume_scale > 0.0 {
            self.volume_scale
        } else {
            1.0
        }
    }
}

/// Convert raw records into chart-ready points.
///
/// Exactly one point per record, in input order. Malformed or zero fields
/// become `None` for that field only; the batch itself never fails.
pub fn normalize(records: &[RawRecord], opts: &NormalizeOptions) -> Vec<CanonicalPoint> {
    if opts.effective_scale() != opts.volume_scale {
        warn!(
            volume_scale = opts.volume_scale,
            "Ignoring invalid volume scale, volumes are left unscaled"
        );
    }

    let points: Vec<CanonicalPoint> = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_indexed(index, record, opts))
        .collect();

    debug!(
        records = records.len(),
        empty_points = points.iter().filter(|p| p.is_empty()).count(),
        "Normalized records"
    );
    points
}

/// Normalize a single record.
pub fn normalize_one(record: &RawRecord, opts: &NormalizeOptions) -> CanonicalPoint {
    normalize_indexed(0, record, opts)
}

fn normalize_indexed(index: usize, record: &RawRecord, opts: &NormalizeOptions) -> CanonicalPoint {
    let label = match record {
        RawRecord::Category(r) => r.category.clone(),
        RawRecord::Period(r) => period_label(&r.period_key),
    };
    let scale = opts.effective_scale();

    CanonicalPoint {
        primary: field(index, "primary", record.primary(), classify_volume).map(|v| v / scale),
        secondary: field(index, "secondary", record.secondary(), classify_volume)
            .map(|v| v / scale),
        ratio: field(index, "ratio", record.ratio(), classify_ratio),
        label,
    }
}

fn field(
    index: usize,
    name: &str,
    raw: &RawValue,
    classify: fn(&RawValue) -> Result<f64, Absence>,
) -> Option<f64> {
    match classify(raw) {
        Ok(v) => Some(v),
        Err(Absence::Missing) => None,
        Err(reason) => {
            debug!(record = index, field = name, raw = %raw, %reason, "Field treated as absent");
            None
        }
    }
}
