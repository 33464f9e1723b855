//! nsclean CLI: command-line interface for stationary noise suppression.
//!
//! Usage:
//!   nsclean denoise <INPUT>    Denoise one recording
//!   nsclean batch <DIR>        Denoise every recording in a directory
//!   nsclean inspect <INPUT>    Show decoded format and frame geometry

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nsclean_common::config::AppConfig;
use nsclean_common::level::SuppressionLevel;
use nsclean_engine::BackendKind;

mod commands;

#[derive(Parser)]
#[command(
    name = "nsclean",
    about = "Suppress stationary background noise in audio recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Denoise a single recording
    Denoise {
        /// Input audio file (WAV or MP3)
        input: PathBuf,

        /// Output file path (default: <input stem>_out<ext> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppression level: low|moderate|high|very-high
        #[arg(short, long)]
        level: Option<SuppressionLevel>,

        /// Suppression backend: stationary|passthrough
        #[arg(long, default_value = "stationary")]
        backend: BackendKind,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Denoise every recording in a directory
    Batch {
        /// Directory to scan
        dir: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Files processed concurrently
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Suppression level: low|moderate|high|very-high
        #[arg(short, long)]
        level: Option<SuppressionLevel>,

        /// Suppression backend: stationary|passthrough
        #[arg(long, default_value = "stationary")]
        backend: BackendKind,
    },

    /// Show decoded format, duration, and frame geometry
    Inspect {
        /// Input audio file (WAV or MP3)
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    logging.json |= cli.log_json;
    nsclean_common::logging::init_logging(&logging);

    let defaults = &config.defaults;

    match cli.command {
        Commands::Denoise {
            input,
            output,
            level,
            backend,
            json,
        } => commands::denoise::run(
            input,
            output,
            level.unwrap_or(defaults.level),
            backend,
            &defaults.output_suffix,
            json,
        ),
        Commands::Batch {
            dir,
            recursive,
            jobs,
            level,
            backend,
        } => {
            commands::batch::run(
                dir,
                recursive,
                jobs.unwrap_or(defaults.jobs),
                level.unwrap_or(defaults.level),
                backend,
                defaults.output_suffix.clone(),
            )
            .await
        }
        Commands::Inspect { input } => commands::inspect::run(input),
    }
}
