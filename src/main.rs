use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use session_speakers::stages::{
    DEFAULT_GUESTS_FILE, DEFAULT_MEMBERS_FILE, DEFAULT_NAMES_LIST, DEFAULT_SESSIONS_DIR,
};
use session_speakers::{ClassifyConfig, NamesListConfig, build_names_list, classify_speakers};

#[derive(Parser)]
#[command(name = "session-speakers")]
#[command(author, version, about = "Speaker lists from crawled parliamentary sessions", long_about = None)]
struct Cli {
    /// The level of details to print when running
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a list of unique speaker names for manual correction
    BuildList {
        /// The directory containing crawled sessions
        #[arg(long, default_value = DEFAULT_SESSIONS_DIR)]
        sessions_dir: PathBuf,

        /// The CSV file where to save the list of unique names
        #[arg(long, default_value = DEFAULT_NAMES_LIST)]
        names_list: PathBuf,
    },

    /// Split the speakers of crawled sessions into Parliament members and guests
    Classify {
        /// The directory containing crawled sessions
        #[arg(long, default_value = DEFAULT_SESSIONS_DIR)]
        sessions_dir: PathBuf,

        /// The CSV file where to save Parliament members
        #[arg(long = "save-members-to", default_value = DEFAULT_MEMBERS_FILE)]
        members_file: PathBuf,

        /// The CSV file where to save guest speakers
        #[arg(long = "save-guests-to", default_value = DEFAULT_GUESTS_FILE)]
        guests_file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Filter directive; there is no level above error in tracing
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level, cli.log_file.as_deref())?;

    match cli.command {
        Commands::BuildList {
            sessions_dir,
            names_list,
        } => {
            let config = NamesListConfig {
                sessions_dir,
                names_list,
            };
            let result = build_names_list(&config).context("Failed to build names list")?;
            info!(
                "{} unique names from {} sessions",
                result.unique_names, result.stats.files_read
            );
        }
        Commands::Classify {
            sessions_dir,
            members_file,
            guests_file,
        } => {
            let config = ClassifyConfig {
                sessions_dir,
                members_file,
                guests_file,
            };
            let result = classify_speakers(&config).context("Failed to classify speakers")?;
            info!(
                "{} members, {} guests from {} sessions",
                result.members, result.guests, result.stats.files_read
            );
        }
    }

    info!("That's all folks!");
    Ok(())
}

/// Log to stderr, and to `log_file` as well when one is given.
///
/// `RUST_LOG` overrides the level chosen on the command line.
fn setup_logging(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {:?}", path))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("Failed to set tracing subscriber")?;

    Ok(())
}
