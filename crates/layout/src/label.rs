use serde::{Deserialize, Serialize};

use salesperf_core::config::LabelConfig;
use salesperf_core::{AnnotationDecision, BoxBounds};

/// Geometry of a ratio annotation: a rounded box with centered text.
///
/// Width is estimated from the character count, which is close enough for
/// short numeric strings like `"101.6%"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub char_width: f64,
    pub padding: f64,
    pub height: f64,
    /// Distance from the plotted point up to the box's vertical centre.
    pub clearance: f64,
    pub corner_radius: f64,
    pub font_size: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            char_width: 6.0,
            padding: 12.0,
            height: 18.0,
            clearance: 10.0,
            corner_radius: 5.0,
            font_size: 10.0,
        }
    }
}

impl From<&LabelConfig> for LabelStyle {
    fn from(cfg: &LabelConfig) -> Self {
        Self {
            char_width: cfg.char_width,
            padding: cfg.padding,
            height: cfg.height,
            clearance: cfg.clearance,
            ..Self::default()
        }
    }
}

impl LabelStyle {
    pub fn box_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width + self.padding
    }
}

/// `"{value}%"` using the shortest decimal form of the value.
pub fn format_ratio(value: f64) -> String {
    format!("{}%", value)
}

/// Decide how to annotate a ratio plotted at `(pixel_x, pixel_y)`.
///
/// An absent ratio yields [`AnnotationDecision::Skip`]: drawing an empty box
/// would read as 0%. Otherwise the box is centered on `pixel_x` and raised
/// `clearance` above `pixel_y` so the point and line stay visible.
pub fn place_label(
    ratio: Option<f64>,
    pixel_x: f64,
    pixel_y: f64,
    style: &LabelStyle,
) -> AnnotationDecision {
    let Some(value) = ratio else {
        return AnnotationDecision::Skip;
    };

    let text = format_ratio(value);
    let width = style.box_width(&text);
    let text_y = pixel_y - style.clearance;

    AnnotationDecision::Draw {
        bounds: BoxBounds {
            x: pixel_x - width / 2.0,
            y: text_y - style.height / 2.0,
            width,
            height: style.height,
        },
        text,
        text_x: pixel_x,
        text_y,
    }
}
