//! # anomaly-dash
//!
//! Command-line front-end for synthetic anomaly detection sessions.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anomaly::{DashboardConfig, DataType, DetectionMethod, DetectionSession, SessionConfig};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod repl;

use render::{render_distribution, render_report};

type CliResult<T> = std::result::Result<T, String>;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = concat!(env!("CARGO_CRATE_NAME"), "=info,anomaly_core=info");

#[derive(Parser)]
#[command(name = "anomaly-dash")]
#[command(about = "Synthetic business metric anomaly detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a series and report its anomalies
    Detect {
        #[command(flatten)]
        options: SessionOptions,

        /// Print the series, result and distribution as JSON
        #[arg(long)]
        json: bool,

        /// Also print the histogram and box-plot summary
        #[arg(long)]
        distribution: bool,

        /// Write the JSON document to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a generated series as JSON
    Generate {
        #[command(flatten)]
        options: SessionOptions,
    },

    /// Interactive session over stdin
    Session {
        #[command(flatten)]
        options: SessionOptions,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct SessionOptions {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metric type (affiliations, revenue, growth-rate, efficiency)
    #[arg(short = 't', long)]
    data_type: Option<DataType>,

    /// Number of days to generate (7-90)
    #[arg(short, long)]
    days: Option<usize>,

    /// Detection method (iqr, std-dev, percentile)
    #[arg(short, long)]
    method: Option<DetectionMethod>,

    /// Multiplier for the active method (iqr or std-dev)
    #[arg(short = 'k', long)]
    multiplier: Option<f64>,

    /// Lower percentile bound
    #[arg(long)]
    lower_pct: Option<f64>,

    /// Upper percentile bound
    #[arg(long)]
    upper_pct: Option<f64>,

    /// Seed for a reproducible series
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Resolve the dashboard configuration: defaults, file, environment, flags.
fn resolve_config<F>(options: &SessionOptions, lookup: F) -> CliResult<DashboardConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match &options.config {
        Some(path) => DashboardConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => DashboardConfig::default(),
    };
    let mut config = base.with_vars(lookup).map_err(|e| e.to_string())?;

    if let Some(data_type) = options.data_type {
        config.data_type = data_type;
    }
    if let Some(days) = options.days {
        config.num_days = days;
    }
    if let Some(method) = options.method {
        config.method = method;
    }
    if let Some(k) = options.multiplier {
        match config.method {
            DetectionMethod::Iqr => config.iqr_multiplier = k,
            DetectionMethod::StdDev => config.std_dev_multiplier = k,
            DetectionMethod::Percentile => {
                return Err(
                    "The percentile method has no multiplier; use --lower-pct/--upper-pct"
                        .to_string(),
                )
            }
        }
    }
    if let Some(lower) = options.lower_pct {
        config.lower_pct = lower;
    }
    if let Some(upper) = options.upper_pct {
        config.upper_pct = upper;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    Ok(config)
}

fn build_session(options: &SessionOptions) -> CliResult<DetectionSession> {
    let config = resolve_config(options, |key| std::env::var(key).ok())?;
    let session_config: SessionConfig = config.session_config().map_err(|e| e.to_string())?;

    let session = match config.seed {
        Some(seed) => DetectionSession::seeded(session_config, seed),
        None => DetectionSession::new(session_config),
    }
    .map_err(|e| e.to_string())?;

    info!(
        data_type = %session.config().generator.data_type,
        num_days = session.config().generator.num_days,
        method = %session.config().methods.active,
        seeded = config.seed.is_some(),
        "session configured"
    );
    Ok(session)
}

fn run_detect(
    options: SessionOptions,
    json: bool,
    distribution: bool,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let mut session = build_session(&options)?;
    let result = session.run().map_err(|e| e.to_string())?;
    let summary = session.distribution().map_err(|e| e.to_string())?;
    let series = session
        .cached_series()
        .ok_or_else(|| "No series available".to_string())?;

    let document = serde_json::json!({
        "series": series,
        "result": result,
        "distribution": summary,
    });

    if json {
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
        println!("{}", text);
    } else {
        let report = render_report(series, &result)
            .map_err(|e| format!("Failed to render report: {}", e))?;
        print!("{}", report);
        if distribution {
            let chart = render_distribution(&summary)
                .map_err(|e| format!("Failed to render distribution: {}", e))?;
            print!("{}", chart);
        }
    }

    if let Some(path) = output {
        let mut file = File::create(&path).map_err(|e| format!("Failed to create output: {}", e))?;
        serde_json::to_writer_pretty(&mut file, &document)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        writeln!(file).map_err(|e| format!("Failed to write JSON: {}", e))?;
        eprintln!("Results written to {:?}", path);
    }

    Ok(())
}

fn run_generate(options: SessionOptions) -> CliResult<()> {
    let mut session = build_session(&options)?;
    let series = session.series().map_err(|e| e.to_string())?;
    let text = serde_json::to_string_pretty(series)
        .map_err(|e| format!("Failed to serialize JSON: {}", e))?;
    println!("{}", text);
    Ok(())
}

fn run_session(options: SessionOptions) -> CliResult<()> {
    let mut session = build_session(&options)?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl::run_repl(&mut session, stdin.lock(), &mut stdout)
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Detect {
            options,
            json,
            distribution,
            output,
        } => run_detect(options, json, distribution, output),

        Commands::Generate { options } => run_generate(options),

        Commands::Session { options } => run_session(options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
