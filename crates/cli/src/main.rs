//! Photolapse CLI - pl command

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod library;
mod system_config;
mod util;

/// Photolapse - photos grouped into sessions, kept within storage limits
#[derive(Parser)]
#[command(name = "pl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Library directory (default: nearest parent containing .pl/)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Timestamp used for imported photos
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TimestampArg {
    /// Time of import
    Now,
    /// File modification time
    Mtime,
}

impl From<TimestampArg> for watcher::TimestampSource {
    fn from(arg: TimestampArg) -> Self {
        match arg {
            TimestampArg::Now => watcher::TimestampSource::Now,
            TimestampArg::Mtime => watcher::TimestampSource::Mtime,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a photo library (in --library, or the current directory)
    Init,
    /// Import image files as new photos
    Import {
        /// Image files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Where capture time comes from
        #[arg(long, value_enum, default_value = "now")]
        timestamp: TimestampArg,
    },
    /// Import photos from an inbox directory as they arrive
    Watch {
        /// Inbox directory
        inbox: PathBuf,
        /// Import what is already there, then exit
        #[arg(long)]
        once: bool,
        /// Quiet period before a new file is imported, in milliseconds
        #[arg(long, default_value = "500")]
        debounce_ms: u64,
        /// Where capture time comes from
        #[arg(long, value_enum, default_value = "now")]
        timestamp: TimestampArg,
    },
    /// Show photo count and storage usage
    Stats {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List photo sessions, newest first
    Sessions {
        /// Session to expand, by its start timestamp (ms)
        #[arg(long)]
        session: Option<u64>,
        /// Expand every session
        #[arg(long)]
        all: bool,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one photo
    Delete {
        /// Photo ID
        id: u64,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Write a photo's image data to a file
    Export {
        /// Photo ID
        id: u64,
        /// Destination file
        output: PathBuf,
    },
    /// Remove the oldest photos until the library is within its limits
    Enforce,
    /// Delete every photo older than a number of months (30-day months)
    Cleanup {
        /// Age in months (1-120)
        #[arg(long, allow_negative_numbers = true)]
        months: i64,
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// View and edit library settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all settings
    List,
    /// Print one setting
    Get {
        /// Setting key (e.g. session.gap_minutes)
        key: String,
    },
    /// Change one setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// Restore default settings
    Reset,
    /// Print the settings file path
    Path,
    /// Print an example settings file
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let library = cli.library.as_deref();

    match cli.command {
        Commands::Init => cmd::init::run(library).await,
        Commands::Import { files, timestamp } => {
            cmd::import::run(library, &files, timestamp.into()).await
        }
        Commands::Watch { inbox, once, debounce_ms, timestamp } => {
            cmd::watch::run(library, &inbox, once, debounce_ms, timestamp.into()).await
        }
        Commands::Stats { json } => cmd::stats::run(library, json).await,
        Commands::Sessions { session, all, json } => {
            cmd::sessions::run(library, session, all, json).await
        }
        Commands::Delete { id, yes } => cmd::delete::run(library, id, yes).await,
        Commands::Export { id, output } => cmd::export::run(library, id, &output).await,
        Commands::Enforce => cmd::enforce::run(library).await,
        Commands::Cleanup { months, yes } => cmd::cleanup::run(library, months, yes).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::List => cmd::config::run_list(library).await,
            ConfigCommands::Get { key } => cmd::config::run_get(library, &key).await,
            ConfigCommands::Set { key, value } => cmd::config::run_set(library, &key, &value).await,
            ConfigCommands::Reset => cmd::config::run_reset(library).await,
            ConfigCommands::Path => cmd::config::run_path(library).await,
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}
