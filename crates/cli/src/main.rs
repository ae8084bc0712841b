mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use salesperf_core::config::load_dotenv;
use salesperf_core::{CanonicalPoint, ChartConfig, RawRecord};
use salesperf_layout::{render_svg, ChartTemplate};
use salesperf_normalize::mock::{self, TemplateOptions};
use salesperf_normalize::{normalize, records_from_json, ForecastWindow, NormalizeOptions};

use crate::cli::{CliArgs, MockKind, OutputFormat};

/// Mock series are generated directly in thousands.
const MOCK_VOLUME_UNIT: &str = "K";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    load_dotenv();

    let config = load_config(&args)?;
    config.log_summary();

    let points = chart_points(&args, &config)?;
    let rendered = render(&args, &config, &points)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("failed to write '{}'", path))?;
            info!(path = %path, "Output written");
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

// ── Config ──────────────────────────────────────────────────────────

fn load_config(args: &CliArgs) -> Result<ChartConfig> {
    let config = match &args.config {
        Some(path) => ChartConfig::from_file(path)
            .with_context(|| format!("failed to load config from '{}'", path))?,
        None => ChartConfig::from_env(),
    };
    apply_overrides(args, config)
}

/// Command-line flags win over file and environment values.
fn apply_overrides(args: &CliArgs, mut config: ChartConfig) -> Result<ChartConfig> {
    if let Some(scale) = args.scale {
        config.normalize.volume_scale = scale;
    }
    if let Some(unit) = &args.unit {
        config.normalize.volume_unit = Some(unit.clone());
    } else if args.mock.is_some() && config.normalize.volume_unit.is_none() {
        config.normalize.volume_unit = Some(MOCK_VOLUME_UNIT.to_string());
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// The `--window` flag, else the configured window. Unset means every period.
fn resolve_window(args: &CliArgs, config: &ChartConfig) -> Result<ForecastWindow> {
    match args.window {
        Some(window) => Ok(window),
        None => config
            .forecast_window
            .parse::<ForecastWindow>()
            .context("invalid forecast window in configuration"),
    }
}

// ── Input ───────────────────────────────────────────────────────────

fn load_records(args: &CliArgs) -> Result<Vec<RawRecord>> {
    if let Some(path) = &args.input {
        let json =
            fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?;
        return records_from_json(&json)
            .with_context(|| format!("failed to parse records in '{}'", path));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let start = mock::default_start();
    let records = match args.mock {
        Some(MockKind::Random) => mock::random_series(&mut rng, start, args.months),
        Some(MockKind::Template) => mock::template_series(
            &mut rng,
            &mock::familycare_base(),
            start,
            args.months,
            &TemplateOptions::default(),
        ),
        None => anyhow::bail!("either --input or --mock is required"),
    };
    info!(months = records.len(), seed = ?args.seed, "Generated mock series");
    Ok(records)
}

/// Normalized points after the forecast window is applied.
fn chart_points(args: &CliArgs, config: &ChartConfig) -> Result<Vec<CanonicalPoint>> {
    let window = resolve_window(args, config)?;
    let records = load_records(args)?;
    let points = normalize(&records, &NormalizeOptions::from_config(config));
    let visible = window.apply(&points).to_vec();
    info!(
        records = records.len(),
        shown = visible.len(),
        window = %window,
        "Normalized input"
    );
    Ok(visible)
}

// ── Output ──────────────────────────────────────────────────────────

fn render(args: &CliArgs, config: &ChartConfig, points: &[CanonicalPoint]) -> Result<String> {
    if args.format == OutputFormat::Json {
        let mut json =
            serde_json::to_string_pretty(points).context("failed to serialize points")?;
        json.push('\n');
        return Ok(json);
    }

    let mut template = ChartTemplate::from_config(config);
    if let Some(title) = &args.title {
        template = template.with_title(title.clone());
    }
    let frame = template.layout(points);

    Ok(match args.format {
        OutputFormat::Svg => render_svg(&frame),
        OutputFormat::Frame | OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&frame)
                .context("failed to serialize chart frame")?;
            json.push('\n');
            json
        }
    })
}
