//! # folder-backup
//! Archive a folder into a timestamped zip file.
//!

use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use folder_backup::{
    BackupRequest, CompressionLevel, Config, LoadConfigError, ZipArchiver,
    config::DEFAULT_CONFIG_FILE, init_logger, input::resolve_source, run_backup,
    size::format_size,
};
use mimalloc::MiMalloc;
use tracing::{Level, error, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Archive a folder into a timestamped zip file in the current directory.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The folder to back up, asked for if not given.
    source: Option<PathBuf>,

    /// How much effort to spend compressing, overrides the config file.
    #[arg(short, long, value_enum)]
    level: Option<CompressionLevel>,

    /// The directory to write the archive to, overrides the config file.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// The config file to use.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Write a default config file and exit.
    #[arg(long)]
    init: bool,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let started_at = Local::now().naive_local();
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _logger = match init_logger(level) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("Could not initialize logger: {error}");
            return ExitCode::FAILURE;
        }
    };

    run(cli, started_at)
}

fn run(cli: Cli, started_at: NaiveDateTime) -> ExitCode {
    // Initialize config if requested.
    if cli.init {
        return match Config::default().save_toml(cli.config.clone()) {
            Ok(()) => {
                info!("Wrote default config to '{}'", cli.config.display());
                ExitCode::SUCCESS
            }
            Err(error) => {
                error!("Could not write config: {error}");
                ExitCode::FAILURE
            }
        };
    }

    // Load config, a missing default config is not an error.
    let config = match Config::load_toml(cli.config.clone()) {
        Ok(config) => config,
        Err(LoadConfigError::NoFile) if cli.config == Path::new(DEFAULT_CONFIG_FILE) => {
            Config::default()
        }
        Err(error) => {
            error!("Could not load config '{}': {error}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    let source = match resolve_source(cli.source, io::stdin().lock(), io::stdout()) {
        Ok(source) => source,
        Err(error) => {
            error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let request = BackupRequest {
        source,
        output_directory: cli.output_dir.or(config.output_directory),
        compression_level: cli.level.unwrap_or(config.compression_level),
        started_at,
    };

    match run_backup(&ZipArchiver, &request) {
        Ok(outcome) => {
            info!("Backup created: '{}'", outcome.output_path.display());
            info!("Source folder: '{}'", outcome.source.display());
            info!(
                "Archived {} files and {} directories",
                outcome.summary.files, outcome.summary.directories
            );
            if let Some(size) = outcome.size {
                info!("Size before compression: {}", format_size(size.bytes));
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("Backup failed: {error}");
            ExitCode::FAILURE
        }
    }
}
