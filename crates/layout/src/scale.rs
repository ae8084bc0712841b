use serde::Serialize;

/// Maps a value domain linearly onto a pixel range.
///
/// The range may be inverted (`(bottom, top)`) for vertical axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Pixel position of `value`. A degenerate domain maps to the range start.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Like [`map`](Self::map) but keeps the result inside the range.
    pub fn map_clamped(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        self.map(value).clamp(r0.min(r1), r0.max(r1))
    }

    /// `count + 1` evenly spaced values from domain start to end.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.domain;
        if count == 0 {
            return vec![d0];
        }
        let step = (d1 - d0) / count as f64;
        (0..=count).map(|i| tidy(d0 + step * i as f64)).collect()
    }
}

/// Smallest "nice" number (1, 2, 2.5, 3, 4, 5, 6 or 8 times a power of
/// ten) at or above `max`. Non-positive input gives `1.0`.
pub fn nice_ceiling(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powi(max.log10().floor() as i32);
    [1.0, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&candidate| candidate >= max)
        .unwrap_or(10.0 * magnitude)
}

/// Strip float noise such as `0.30000000000000004` from tick values.
fn tidy(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

/// Splits a pixel span into equal bands, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandScale {
    pub count: usize,
    pub range: (f64, f64),
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self { count, range }
    }

    pub fn bandwidth(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    /// Horizontal centre of band `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.range.0 + self.bandwidth() * (index as f64 + 0.5)
    }
}
