//! CLI entry point for the SPROUT dashboard data builder.
//!
//! Loads the participant table and the QC workbook, aggregates them and
//! writes the JSON data file the dashboard pages read.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sprout_dashboard::{
    analyzers::thresholds,
    config::DashboardConfig,
    output::{print_pretty, write_feature_summary, write_json},
    pipeline::DashboardPipeline,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sprout_dashboard")]
#[command(about = "Builds the SPROUT research dashboard data file", long_about = None)]
struct Cli {
    /// JSON config file (defaults to $DASHBOARD_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write the dashboard data file
    Build {
        /// Participant table location; repeat to try several in order
        #[arg(short, long = "participants", value_name = "FILE_OR_URL")]
        participants: Vec<String>,

        /// QC workbook (.xlsx) or delimited export
        #[arg(short, long, value_name = "FILE_OR_URL")]
        quality: Option<String>,

        /// JSON file to write
        #[arg(short, long, default_value = "dashboard-data.json")]
        output: String,

        /// Optional: also write the per-feature QC summary as CSV
        #[arg(long)]
        qc_csv: Option<String>,
    },
    /// Run the pipeline and log the headline numbers
    Summary,
    /// Log the fixed QC threshold table
    Thresholds,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/sprout_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sprout_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            participants,
            quality,
            output,
            qc_csv,
        } => {
            if !participants.is_empty() {
                config.participant_sources = participants;
            }
            if quality.is_some() {
                config.quality_source = quality;
            }

            let pipeline = DashboardPipeline::new(config);
            let result = pipeline.run().await;
            print_pretty(&result);

            for notice in &result.notices {
                warn!(notice = %notice, "Dashboard will show a data notice");
            }

            write_json(&output, &result)?;
            if let Some(path) = qc_csv {
                write_feature_summary(&path, &result.quality_control.feature_summary)?;
                info!(path = %path, "QC summary CSV written");
            }
        }
        Commands::Summary => {
            let pipeline = DashboardPipeline::new(config);
            let result = pipeline.run().await;

            info!(
                participants = result.overview.total_participants,
                records = result.overview.total_records,
                cities = result.overview.active_cities,
                avg_age = %result.overview.avg_age,
                age_range = %result.overview.age_range,
                "Participant overview"
            );

            for city in &result.geographic {
                info!(
                    city = %city.city,
                    participants = city.participants,
                    percentage = %city.percentage,
                    "City"
                );
            }

            let qc = &result.quality_control;
            info!(
                segments = qc.total_segments,
                eligible = qc.eligible_segments,
                not_eligible = qc.not_eligible_segments,
                other = qc.other_segments,
                pass_rate = qc.pass_rate,
                "Quality control overview"
            );

            for feature in &qc.feature_summary {
                info!(
                    feature = feature.feature.column(),
                    total = feature.total,
                    below = feature.below_threshold,
                    above = feature.above_threshold,
                    violation_rate = %format!("{:.1}", feature.violation_rate),
                    status = feature.status.label(),
                    "Feature"
                );
            }

            for notice in &result.notices {
                warn!(notice = %notice, "Data notice");
            }
        }
        Commands::Thresholds => {
            for (feature, spec) in thresholds::all() {
                info!(
                    feature = feature.column(),
                    low = spec.low,
                    high = spec.high,
                    "Threshold"
                );
            }
        }
    }

    Ok(())
}

/// Config from an explicit path, `$DASHBOARD_CONFIG`, or the defaults.
fn load_config(path: Option<&str>) -> Result<DashboardConfig> {
    let path = path
        .map(str::to_string)
        .or_else(|| std::env::var("DASHBOARD_CONFIG").ok());

    match path {
        Some(path) => {
            let config = DashboardConfig::load(&path)?;
            info!(path = %path, "Config loaded");
            Ok(config)
        }
        None => Ok(DashboardConfig::default()),
    }
}
