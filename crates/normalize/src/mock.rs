//! Mock monthly series for demo charts.
//!
//! Both generators emit [`RawRecord`]s with real `month_date` keys so the
//! output runs through the same normalizer as upstream data.

use chrono::{Months, NaiveDate};
use rand::Rng;

use salesperf_core::{CategorySnapshot, PeriodRecord, RawRecord, RawValue};

use crate::parsing::{parse_ratio, parse_volume};

/// First month of the demo series (July 2023).
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 7, 1).unwrap_or(NaiveDate::MIN)
}

/// Jul 23 through Feb 26.
pub const DEFAULT_MONTHS: u32 = 32;

/// Random BOP / SH / SP series.
///
/// BOP is drawn from 15000..=28000, SH stays within ±5% of BOP and SP lies
/// between 88% and 102% with two decimals.
pub fn random_series<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    months: u32,
) -> Vec<RawRecord> {
    month_starts(start, months)
        .map(|date| {
            let bop = rng.gen_range(15000..=28000) as f64;
            let sh = (bop * rng.gen_range(0.95..1.05)).floor();
            let sp = round2(rng.gen_range(88.0..102.0));
            period_record(date, RawValue::Number(bop), RawValue::Number(sh), RawValue::Number(sp))
        })
        .collect()
}

/// FAMILYCARE totals used when no other snapshot is supplied.
pub fn familycare_base() -> CategorySnapshot {
    CategorySnapshot {
        total: Some(true),
        shpm_sum: RawValue::Number(27967016.0),
        bop_sum: RawValue::Number(27660429.0),
        sp: RawValue::Text("101.10%".to_string()),
        month: None,
    }
}

/// Tuning for [`template_series`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateOptions {
    /// Divisor from source units to chart units (1000 = thousands).
    pub unit_divisor: f64,
    /// Relative spread applied to volumes (0.2 = ±10%).
    pub volume_spread: f64,
    /// Relative spread applied to the ratio (0.1 = ±5%).
    pub ratio_spread: f64,
    pub volume_bounds: (f64, f64),
    pub ratio_bounds: (f64, f64),
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            unit_divisor: 1000.0,
            volume_spread: 0.2,
            ratio_spread: 0.1,
            volume_bounds: (10000.0, 30000.0),
            ratio_bounds: (88.0, 102.0),
        }
    }
}

/// Series varying randomly around one category snapshot.
///
/// A field that is absent in the snapshot stays missing in every month.
pub fn template_series<R: Rng + ?Sized>(
    rng: &mut R,
    base: &CategorySnapshot,
    start: NaiveDate,
    months: u32,
    opts: &TemplateOptions,
) -> Vec<RawRecord> {
    let base_bop = parse_volume(&base.bop_sum).map(|v| v / opts.unit_divisor);
    let base_sh = parse_volume(&base.shpm_sum).map(|v| v / opts.unit_divisor);
    let base_sp = parse_ratio(&base.sp);

    month_starts(start, months)
        .map(|date| {
            let mut volume = |base: Option<f64>| match base {
                Some(b) => {
                    let v = jitter(rng, b, opts.volume_spread);
                    RawValue::Number(v.clamp(opts.volume_bounds.0, opts.volume_bounds.1).round())
                }
                None => RawValue::Missing,
            };
            let bop = volume(base_bop);
            let sh = volume(base_sh);
            let sp = match base_sp {
                Some(b) => {
                    let v = jitter(rng, b, opts.ratio_spread);
                    RawValue::Number(round2(v.clamp(opts.ratio_bounds.0, opts.ratio_bounds.1)))
                }
                None => RawValue::Missing,
            };
            period_record(date, bop, sh, sp)
        })
        .collect()
}

fn month_starts(start: NaiveDate, months: u32) -> impl Iterator<Item = NaiveDate> {
    (0..months).map_while(move |i| start.checked_add_months(Months::new(i)))
}

fn period_record(date: NaiveDate, bop: RawValue, sh: RawValue, sp: RawValue) -> RawRecord {
    RawRecord::Period(PeriodRecord {
        period_key: date.format("%Y-%m-%d").to_string(),
        primary: bop,
        secondary: sh,
        ratio: sp,
    })
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, base: f64, spread: f64) -> f64 {
    base * (1.0 + (rng.gen::<f64>() - 0.5) * spread)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
