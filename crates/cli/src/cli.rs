use clap::{Parser, ValueEnum};

use salesperf_normalize::ForecastWindow;

/// Normalize sales-performance data and render BOP / SH / SP charts.
///
/// Reads monthly records or a category snapshot map from JSON (or generates
/// a mock series) and writes canonical points, a laid-out frame or an SVG.
#[derive(Parser, Debug)]
#[command(name = "salesperf", version, about)]
pub struct CliArgs {
    /// JSON input: an array of records or a category map
    #[arg(long, conflicts_with = "mock", required_unless_present = "mock")]
    pub input: Option<String>,

    /// Generate a mock series instead of reading input
    #[arg(long, value_enum)]
    pub mock: Option<MockKind>,

    /// Months in a mock series
    #[arg(long, default_value_t = 32)]
    pub months: u32,

    /// Seed for mock data (random when not set)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Divisor for volumes, e.g. 1000 to chart thousands (overrides config)
    #[arg(long)]
    pub scale: Option<f64>,

    /// Trailing window: 6M, 12M, 24M or all (overrides config; default all)
    #[arg(long)]
    pub window: Option<ForecastWindow>,

    /// Suffix for volumes on axes and tooltips, e.g. K (derived from the scale by default)
    #[arg(long)]
    pub unit: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Chart title for svg and frame output
    #[arg(long)]
    pub title: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,

    /// Path to a TOML config file (environment is used when not set)
    #[arg(long, env = "SALESPERF_CONFIG")]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MockKind {
    /// Independent random months
    Random,
    /// Months varying around the FAMILYCARE totals
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Canonical points
    Json,
    /// Laid-out chart frame as JSON
    Frame,
    /// Standalone SVG document
    Svg,
}
