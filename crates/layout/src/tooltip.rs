use salesperf_core::CanonicalPoint;

use crate::label::format_ratio;

/// Hover text for one point: the label, then one line per present measurement.
///
/// Absent measurements are left out rather than shown as zero.
pub fn tooltip_lines(point: &CanonicalPoint, volume_unit: &str) -> Vec<String> {
    let mut lines = vec![point.label.clone()];
    if let Some(v) = point.primary {
        lines.push(format!("BOP: {}{}", v, volume_unit));
    }
    if let Some(v) = point.secondary {
        lines.push(format!("SH: {}{}", v, volume_unit));
    }
    if let Some(v) = point.ratio {
        lines.push(format!("SP: {}", format_ratio(v)));
    }
    lines
}
