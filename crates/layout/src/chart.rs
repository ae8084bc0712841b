//! One configurable chart template for every BOP / SH / SP view.
//!
//! Volumes go on the left axis as paired bars, the ratio on the right axis as
//! a line with dots. [`ChartTemplate::layout`] resolves everything to pixels;
//! drawing is left to [`crate::svg`] or any other renderer.

use serde::Serialize;
use tracing::debug;

use salesperf_core::{AnnotationDecision, BoxBounds, CanonicalPoint, ChartConfig};

use crate::label::{format_ratio, place_label, LabelStyle};
use crate::scale::{nice_ceiling, BandScale, LinearScale};
use crate::tooltip::tooltip_lines;

/// Headroom added around the observed ratio range, in percentage points.
const RATIO_HEADROOM: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 70.0,
            right: 60.0,
            bottom: 40.0,
            left: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartTemplate {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub bar_width: f64,
    /// Number of intervals between axis ticks.
    pub tick_count: usize,
    /// Suffix for volume ticks and tooltips. `"K"` by default, matching
    /// thousands-scaled data; [`from_config`](Self::from_config) derives it
    /// from the configured scale.
    pub volume_unit: String,
    pub label_style: LabelStyle,
    /// Fixed left-axis domain; derived from the data when `None`.
    pub volume_domain: Option<(f64, f64)>,
    /// Fixed right-axis domain; derived from the data when `None`.
    pub ratio_domain: Option<(f64, f64)>,
}

impl Default for ChartTemplate {
    fn default() -> Self {
        Self {
            title: "Sales Performance Overview".to_string(),
            width: 1200.0,
            height: 400.0,
            margins: Margins::default(),
            bar_width: 10.0,
            tick_count: 5,
            volume_unit: "K".to_string(),
            label_style: LabelStyle::default(),
            volume_domain: None,
            ratio_domain: None,
        }
    }
}

/// Axis tick with its pixel position and display text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub text: String,
}

/// Everything drawn for one period or category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub label: String,
    pub center_x: f64,
    pub primary_bar: Option<BoxBounds>,
    pub secondary_bar: Option<BoxBounds>,
    pub ratio_point: Option<(f64, f64)>,
    pub annotation: AnnotationDecision,
    pub tooltip: Vec<String>,
}

/// A fully laid-out chart in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub plot: BoxBounds,
    pub label_style: LabelStyle,
    pub columns: Vec<Column>,
    /// Runs of consecutive present ratios; the line breaks at absent ones.
    pub ratio_segments: Vec<Vec<(f64, f64)>>,
    pub volume_ticks: Vec<Tick>,
    pub ratio_ticks: Vec<Tick>,
}

impl ChartFrame {
    pub fn annotation_count(&self) -> usize {
        self.columns.iter().filter(|c| c.annotation.render()).count()
    }
}

impl ChartTemplate {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: f64::from(config.canvas.width),
            height: f64::from(config.canvas.height),
            label_style: LabelStyle::from(&config.label),
            volume_unit: config.normalize.unit_label().to_string(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_volume_domain(mut self, min: f64, max: f64) -> Self {
        self.volume_domain = Some((min, max));
        self
    }

    pub fn with_ratio_domain(mut self, min: f64, max: f64) -> Self {
        self.ratio_domain = Some((min, max));
        self
    }

    pub fn with_volume_unit(mut self, unit: impl Into<String>) -> Self {
        self.volume_unit = unit.into();
        self
    }

    /// Area inside the margins where bars and lines are drawn.
    pub fn plot_area(&self) -> BoxBounds {
        let m = &self.margins;
        BoxBounds {
            x: m.left,
            y: m.top,
            width: (self.width - m.left - m.right).max(0.0),
            height: (self.height - m.top - m.bottom).max(0.0),
        }
    }

    fn resolve_volume_domain(&self, points: &[CanonicalPoint]) -> (f64, f64) {
        self.volume_domain.unwrap_or_else(|| {
            let max = points
                .iter()
                .filter_map(CanonicalPoint::max_volume)
                .fold(0.0, f64::max);
            (0.0, nice_ceiling(max))
        })
    }

    fn resolve_ratio_domain(&self, points: &[CanonicalPoint]) -> (f64, f64) {
        if let Some(domain) = self.ratio_domain {
            return domain;
        }
        let mut ratios = points.iter().filter_map(|p| p.ratio);
        let Some(first) = ratios.next() else {
            return (0.0, 100.0);
        };
        let (min, max) = ratios.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r)));
        (min.floor() - RATIO_HEADROOM, max.ceil() + RATIO_HEADROOM)
    }

    /// Lay out `points` in pixel space, one column per point.
    ///
    /// Absent values produce no bar, no dot and a skipped annotation.
    pub fn layout(&self, points: &[CanonicalPoint]) -> ChartFrame {
        let plot = self.plot_area();
        let bands = BandScale::new(points.len(), (plot.x, plot.x + plot.width));
        let volume = LinearScale::new(self.resolve_volume_domain(points), (plot.bottom(), plot.y));
        let ratio = LinearScale::new(self.resolve_ratio_domain(points), (plot.bottom(), plot.y));

        let bar = |x: f64, value: Option<f64>| {
            value.map(|v| {
                let top = volume.map_clamped(v);
                BoxBounds {
                    x,
                    y: top,
                    width: self.bar_width,
                    height: plot.bottom() - top,
                }
            })
        };

        let columns: Vec<Column> = points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cx = bands.center(i);
                let ratio_point = p.ratio.map(|r| (cx, ratio.map_clamped(r)));
                let anchor_y = ratio_point.map_or(plot.bottom(), |(_, y)| y);
                Column {
                    label: p.label.clone(),
                    center_x: cx,
                    primary_bar: bar(cx - self.bar_width, p.primary),
                    secondary_bar: bar(cx, p.secondary),
                    ratio_point,
                    annotation: place_label(p.ratio, cx, anchor_y, &self.label_style),
                    tooltip: tooltip_lines(p, &self.volume_unit),
                }
            })
            .collect();

        let mut ratio_segments = Vec::new();
        let mut current = Vec::new();
        for column in &columns {
            match column.ratio_point {
                Some(pt) => current.push(pt),
                None if !current.is_empty() => ratio_segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            ratio_segments.push(current);
        }

        let volume_ticks = volume
            .ticks(self.tick_count)
            .into_iter()
            .map(|v| Tick {
                value: v,
                position: volume.map(v),
                text: format!("{}{}", v, self.volume_unit),
            })
            .collect();
        let ratio_ticks = ratio
            .ticks(self.tick_count)
            .into_iter()
            .map(|v| Tick {
                value: v,
                position: ratio.map(v),
                text: format_ratio(v),
            })
            .collect();

        let frame = ChartFrame {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            plot,
            label_style: self.label_style,
            columns,
            ratio_segments,
            volume_ticks,
            ratio_ticks,
        };
        debug!(
            columns = frame.columns.len(),
            annotations = frame.annotation_count(),
            segments = frame.ratio_segments.len(),
            "Chart laid out"
        );
        frame
    }
}
