use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesPerfError};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Active profile name (empty = default).
    pub profile: String,
    pub normalize: NormalizeConfig,
    pub canvas: CanvasConfig,
    pub label: LabelConfig,
    /// Trailing window shown by default ("6M", "12M", "24M", "all").
    pub forecast_window: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            profile: String::new(),
            normalize: NormalizeConfig::default(),
            canvas: CanvasConfig::default(),
            label: LabelConfig::default(),
            forecast_window: "all".to_string(),
        }
    }
}

impl ChartConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `SALESPERF_PROFILE`. When set (e.g. `DEMO`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("SALESPERF_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            normalize: NormalizeConfig::from_env_profiled(p),
            canvas: CanvasConfig::from_env_profiled(p),
            label: LabelConfig::from_env_profiled(p),
            forecast_window: profiled_env_or(p, "FORECAST_WINDOW", "all"),
        }
    }

    /// Parse config from a TOML string. Missing sections keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Reject values that would make scaling or layout meaningless.
    pub fn validate(&self) -> Result<()> {
        let scale = self.normalize.volume_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SalesPerfError::Config(format!(
                "volume_scale must be a positive number, got {}",
                scale
            )));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SalesPerfError::Config(format!(
                "canvas must have a non-zero size, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        let label = &self.label;
        for (name, v) in [
            ("char_width", label.char_width),
            ("padding", label.padding),
            ("height", label.height),
            ("clearance", label.clearance),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SalesPerfError::Config(format!(
                    "label.{} must be a non-negative number, got {}",
                    name, v
                )));
            }
        }
        Ok(())
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  normalize:   volume_scale={}, volume_unit={:?}",
            self.normalize.volume_scale,
            self.normalize.unit_label()
        );
        tracing::info!("  canvas:      {}x{}", self.canvas.width, self.canvas.height);
        tracing::info!(
            "  label:       char_width={}, padding={}, height={}, clearance={}",
            self.label.char_width,
            self.label.padding,
            self.label.height,
            self.label.clearance
        );
        tracing::info!("  window:      {}", self.forecast_window);
    }
}

// ── Normalizer ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Divisor applied to volume fields (1000 shows raw units as thousands).
    pub volume_scale: f64,
    /// Suffix shown after volumes on axes and tooltips. Derived from
    /// `volume_scale` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_unit: Option<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            volume_scale: 1.0,
            volume_unit: None,
        }
    }
}

impl NormalizeConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            volume_scale: profiled_env_f64(p, "VOLUME_SCALE", 1.0),
            volume_unit: profiled_env_opt(p, "VOLUME_UNIT"),
        }
    }

    /// The configured unit, or the one implied by the scale.
    pub fn unit_label(&self) -> &str {
        match &self.volume_unit {
            Some(unit) => unit,
            None => unit_for_scale(self.volume_scale),
        }
    }
}

/// `"K"` for 1000, `"M"` for a million, `"B"` for a billion, otherwise empty.
pub fn unit_for_scale(scale: f64) -> &'static str {
    if scale == 1e3 {
        "K"
    } else if scale == 1e6 {
        "M"
    } else if scale == 1e9 {
        "B"
    } else {
        ""
    }
}

// ── Canvas ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 400,
        }
    }
}

impl CanvasConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            width: profiled_env_u32(p, "CHART_WIDTH", 1200),
            height: profiled_env_u32(p, "CHART_HEIGHT", 400),
        }
    }
}

// ── Annotation labels ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Estimated pixel width of one character of label text.
    pub char_width: f64,
    /// Horizontal padding added to the estimated text width.
    pub padding: f64,
    pub height: f64,
    /// Distance between the plotted point and the label's vertical centre.
    pub clearance: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            char_width: 6.0,
            padding: 12.0,
            height: 18.0,
            clearance: 10.0,
        }
    }
}

impl LabelConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            char_width: profiled_env_f64(p, "LABEL_CHAR_WIDTH", 6.0),
            padding: profiled_env_f64(p, "LABEL_PADDING", 12.0),
            height: profiled_env_f64(p, "LABEL_HEIGHT", 18.0),
            clearance: profiled_env_f64(p, "LABEL_CLEARANCE", 10.0),
        }
    }
}
