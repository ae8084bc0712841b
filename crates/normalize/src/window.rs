use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use salesperf_core::SalesPerfError;

/// How many trailing periods a chart shows.
///
/// Defaults to [`All`](ForecastWindow::All): a series is only trimmed when a
/// window is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ForecastWindow {
    Months6,
    Months12,
    Months24,
    #[default]
    All,
}

impl ForecastWindow {
    /// Number of periods kept, or `None` for no limit.
    pub fn months(&self) -> Option<usize> {
        match self {
            ForecastWindow::Months6 => Some(6),
            ForecastWindow::Months12 => Some(12),
            ForecastWindow::Months24 => Some(24),
            ForecastWindow::All => None,
        }
    }

    /// The trailing slice of `points` covered by this window.
    pub fn apply<'a, T>(&self, points: &'a [T]) -> &'a [T] {
        match self.months() {
            Some(n) if points.len() > n => &points[points.len() - n..],
            _ => points,
        }
    }
}

impl fmt::Display for ForecastWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastWindow::Months6 => write!(f, "6M"),
            ForecastWindow::Months12 => write!(f, "12M"),
            ForecastWindow::Months24 => write!(f, "24M"),
            ForecastWindow::All => write!(f, "all"),
        }
    }
}

impl FromStr for ForecastWindow {
    type Err = SalesPerfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "6m" => Ok(ForecastWindow::Months6),
            "12m" => Ok(ForecastWindow::Months12),
            "24m" => Ok(ForecastWindow::Months24),
            "all" => Ok(ForecastWindow::All),
            _ => Err(SalesPerfError::InvalidWindow(s.to_string())),
        }
    }
}

impl TryFrom<String> for ForecastWindow {
    type Error = SalesPerfError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ForecastWindow> for String {
    fn from(w: ForecastWindow) -> Self {
        w.to_string()
    }
}
