//! CLI entry point for the diner trends dashboard.
//!
//! Provides subcommands for serving the dashboard over HTTP and for
//! exporting the derived views as JSON.

use anyhow::Result;
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use diner_trends::server::{self, AppState, DataSource};
use diner_trends::snapshot::Snapshot;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "diner_trends")]
#[command(about = "Serve and export regional dining change trends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard and its JSON endpoints
    Serve {
        /// Path to the wide-format CSV
        #[arg(short, long, default_value = "data.csv")]
        data: String,

        /// Listen port; falls back to the PORT env var, then 8050
        #[arg(short, long)]
        port: Option<u16>,

        /// Reference year attached to MM/DD columns (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Reload the CSV on every request instead of precomputing at startup
        #[arg(long, default_value_t = false)]
        reload: bool,
    },
    /// Export derived views as pretty-printed JSON
    Export {
        /// Path to the wide-format CSV
        #[arg(short, long, default_value = "data.csv")]
        data: String,

        /// Which view to export
        #[arg(short, long, value_enum, default_value = "all")]
        granularity: Granularity,

        /// Reference year attached to MM/DD columns (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// File to write to instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Granularity {
    All,
    Daily,
    Weekly,
    Monthly,
    Series,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/diner_trends.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("diner_trends.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            data,
            port,
            year,
            reload,
        } => {
            let reference_year = year.unwrap_or_else(|| Utc::now().year());

            let source = if reload {
                info!(data, reference_year, "Reload mode: CSV read on every request");
                DataSource::Reload {
                    path: data,
                    reference_year,
                }
            } else {
                let snapshot = Snapshot::from_file(&data, reference_year)?;
                DataSource::Snapshot(snapshot)
            };

            let port = port
                .or_else(|| {
                    std::env::var("PORT")
                        .ok()
                        .and_then(|value| value.parse().ok())
                })
                .unwrap_or(8050);

            server::serve(AppState::new(source), port).await?;
        }
        Commands::Export {
            data,
            granularity,
            year,
            output,
        } => {
            let reference_year = year.unwrap_or_else(|| Utc::now().year());
            let snapshot = Snapshot::from_file(&data, reference_year)?;

            let json = match granularity {
                Granularity::All => serde_json::to_string_pretty(&snapshot)?,
                Granularity::Daily => serde_json::to_string_pretty(&snapshot.daily)?,
                Granularity::Weekly => serde_json::to_string_pretty(&snapshot.weekly)?,
                Granularity::Monthly => serde_json::to_string_pretty(&snapshot.monthly)?,
                Granularity::Series => serde_json::to_string_pretty(&snapshot.series)?,
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    info!(path, "Export written");
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
