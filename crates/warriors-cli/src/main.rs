//! warriors CLI: chat with The Warriors AI from the terminal

mod ask;

use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use warriors_engine::{Config, ConfigError};

/// Chat view for The Warriors AI, with simulated replies
#[derive(Parser, Debug)]
#[command(name = "warriors")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config file (default: .warriors/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the reply delay in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Open the chat view (default when no command specified)
    Tui,

    /// Ask one question and print the transcript
    Ask {
        /// The question; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Write a default config to .warriors/config.json
    Init,
}

const WARRIORS_DIR: &str = ".warriors";
const DEFAULT_FILTER: &str = "warriors=info,warriors_engine=info,warriors_tui=info";

/// Where log lines go when no `--log-file` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogTarget {
    /// Discard: the chat view owns the terminal.
    Discard,
    Stderr,
}

fn main() {
    let cli = Cli::parse();

    let fallback = match cli.command {
        None | Some(Commands::Tui) => LogTarget::Discard,
        Some(_) => LogTarget::Stderr,
    };
    if let Err(e) = init_logging(cli.log_file.as_deref(), fallback) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    match cli.command {
        Some(Commands::Init) => cmd_init(cli.config.as_deref()),
        None | Some(Commands::Tui) => {
            let (config, rt) = prepare(cli.config.as_deref(), cli.delay_ms);
            if let Err(e) = rt.block_on(warriors_tui::run_tui(&config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Ask { query }) => {
            let (config, rt) = prepare(cli.config.as_deref(), cli.delay_ms);
            let query = query.join(" ");
            let stdout = std::io::stdout().lock();
            if let Err(e) = rt.block_on(ask::run_ask(&config, &query, stdout)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Load the config and start the runtime, exiting on failure.
fn prepare(config_path: Option<&Path>, delay_ms: Option<u64>) -> (Config, Runtime) {
    let config = match load_config(config_path, delay_ms) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match Runtime::new() {
        Ok(rt) => (config, rt),
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    }
}

/// Errors setting up logging.
#[derive(Debug, thiserror::Error)]
enum LoggingError {
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_logging(log_file: Option<&Path>, fallback: LogTarget) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (writer, ansi) = match (log_file, fallback) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        (None, LogTarget::Discard) => (BoxMakeWriter::new(std::io::sink), false),
        (None, LogTarget::Stderr) => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

fn default_config_path() -> PathBuf {
    Path::new(WARRIORS_DIR).join("config.json")
}

/// Load the config and apply command-line overrides.
///
/// An explicit `--config` path must exist; the default path may be absent.
fn load_config(path: Option<&Path>, delay_ms: Option<u64>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&default_config_path())?,
    };

    if let Some(delay_ms) = delay_ms {
        config.response_delay_ms = delay_ms;
        config.validate()?;
    }

    info!(
        delay_ms = config.response_delay_ms,
        max_draft_chars = config.max_draft_chars,
        "config loaded"
    );
    Ok(config)
}

fn cmd_init(path: Option<&Path>) {
    let config_path = path.map_or_else(default_config_path, Path::to_path_buf);

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return;
    }

    match Config::default().save(&config_path) {
        Ok(()) => println!("Created {}", config_path.display()),
        Err(e) => {
            eprintln!("Failed to write config: {e}");
            std::process::exit(1);
        }
    }
}
