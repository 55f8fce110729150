//! Ticket Triage CLI
//!
//! Classifies helpdesk tickets, routes them by confidence and records or
//! applies the resulting actions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use tracing::{info, warn};

mod commands;
mod config;

use config::{LogFormat, TriageConfig};

#[derive(Parser, Debug)]
#[command(name = "ticket-triage")]
#[command(about = "Helpdesk ticket classification and routing", long_about = None)]
struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, env = "TRIAGE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Trained model artifact, overrides the configuration
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Log intended ticket updates without writing them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Log output format, overrides the configuration
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long, global = true)]
    print_metrics: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single ticket
    Classify {
        /// Ticket subject
        subject: String,

        /// Ticket description
        #[arg(default_value = "")]
        description: String,
    },

    /// Classify tickets from a JSON array or JSON Lines file
    Batch {
        /// Input file, `-` for stdin
        input: PathBuf,
    },

    /// Show the action for a confidence value
    Route {
        #[arg(allow_hyphen_values = true)]
        confidence: f64,
    },

    /// Print normalized text
    Normalize {
        text: String,
    },

    /// Classify, route and execute actions for tickets with ids
    Process {
        /// Input file, `-` for stdin
        input: PathBuf,

        /// Decision log, overrides the configuration
        #[arg(long)]
        decisions_log: Option<PathBuf>,
    },

    /// Describe a model artifact
    InspectModel {
        /// Artifact path, defaults to the configured model
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TriageConfig::load(cli.config.as_deref())?;
    if let Some(model) = &cli.model {
        config.model_path = Some(model.clone());
    }
    if cli.dry_run {
        config.dry_run = true;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_tracing(&config.logging.level, config.logging.format, cli.verbose);

    for warning in config.validate() {
        warn!("{}", warning);
    }

    let thresholds = config.thresholds()?;

    let metrics_handle = if cli.print_metrics {
        Some(init_metrics()?)
    } else {
        None
    };

    match cli.command {
        Command::Classify {
            subject,
            description,
        } => commands::classify(&config, &subject, &description)?,
        Command::Batch { input } => commands::batch(&config, &input)?,
        Command::Route { confidence } => commands::route(thresholds, confidence)?,
        Command::Normalize { text } => commands::normalize(&config, &text)?,
        Command::Process {
            input,
            decisions_log,
        } => {
            if let Some(path) = decisions_log {
                config.decisions_log = path;
            }
            commands::process(&config, thresholds, &input).await?
        }
        Command::InspectModel { path } => commands::inspect_model(&config, path.as_deref())?,
    }

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}

/// Initialize tracing/logging to stderr
fn init_tracing(level: &str, format: LogFormat, verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("triage=debug,ticket_triage=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("triage={0},ticket_triage={0}", level)))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Install the Prometheus recorder and return a handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    triage_telemetry::describe_metrics();

    info!("Metrics recorder installed");
    Ok(handle)
}
