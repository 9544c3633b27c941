mod analyzer;
mod collector;
mod config;
mod model;
mod operator;
mod parser;
mod pipeline;
mod report;
mod scraper;
mod server;
mod utils;
mod visualizer;

use clap::{Parser, Subcommand};
use config::{AppConfig, apply_env_overrides, load_config};
use scraper::HttpFetcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "charge-insight", version, about = "EV charging industry analysis and report generator")]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Collect data, analyze it and write the reports (default)
    Generate,
    /// Serve the generated report over HTTP
    Serve {
        /// Overrides `server.port` and the PORT variable
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(log_file: Option<&Path>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let file_layer = log_file.and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            ),
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", path.display(), e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let loaded = load_config(&cli.config);

    init_tracing(loaded.as_ref().ok().and_then(|cfg| cfg.log_file.as_deref()));

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let mut config: AppConfig = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };
    if !cli.config.exists() {
        warn!("Config {} not found, using defaults", cli.config.display());
    }
    apply_env_overrides(&mut config);
    visualizer::init_chart_font(config.chart_font.as_deref());

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let fetcher = match HttpFetcher::new(&config.user_agent, config.request_timeout_seconds) {
                Ok(f) => f,
                Err(e) => {
                    error!("Failed to build HTTP client: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = pipeline::run(&config, &fetcher).await {
                error!("❌ Analysis failed: {}", e);
                std::process::exit(1);
            }
        }
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            info!("🚗⚡ Starting EV charging analysis web server");
            if let Err(e) = server::run_server(Arc::new(config)).await {
                error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
