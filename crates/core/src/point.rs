use serde::{Deserialize, Serialize};

/// Chart-ready point produced by the normalizer.
///
/// `None` means "no valid measurement": the source reports missing data as
/// zero, so a zero never survives normalization as `Some(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPoint {
    /// Period (`"Jun 24"`) or category name.
    pub label: String,
    /// Bill-of-Production volume.
    pub primary: Option<f64>,
    /// Shipment volume.
    pub secondary: Option<f64>,
    /// Sales-Performance ratio in percent (`101.6` means 101.6%).
    pub ratio: Option<f64>,
}

impl CanonicalPoint {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            primary: None,
            secondary: None,
            ratio: None,
        }
    }

    /// True when none of the three measurements is present.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none() && self.ratio.is_none()
    }

    /// Largest present volume of this point, if any.
    pub fn max_volume(&self) -> Option<f64> {
        match (self.primary, self.secondary) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Screen-space rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxBounds {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Whether and how to annotate one plotted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "render", rename_all = "snake_case")]
pub enum AnnotationDecision {
    /// Value absent: draw nothing, not even an empty box.
    Skip,
    Draw {
        bounds: BoxBounds,
        text: String,
        /// Text anchor point (centered horizontally and vertically).
        text_x: f64,
        text_y: f64,
    },
}

impl AnnotationDecision {
    pub fn render(&self) -> bool {
        matches!(self, AnnotationDecision::Draw { .. })
    }

    pub fn bounds(&self) -> Option<&BoxBounds> {
        match self {
            AnnotationDecision::Draw { bounds, .. } => Some(bounds),
            AnnotationDecision::Skip => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            AnnotationDecision::Draw { text, .. } => Some(text.as_str()),
            AnnotationDecision::Skip => None,
        }
    }
}
