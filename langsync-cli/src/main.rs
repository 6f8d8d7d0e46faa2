mod config;
mod scan;
mod sync;
mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, ProviderKind, ResolvedConfig, load_config, resolve};
use crate::scan::{run_scan_command, run_status_command};
use crate::sync::{SyncCommandOptions, run_sync_command};
use crate::validation::{ValidationContext, validate_context};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine activity to stderr (same as LANGSYNC_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the master file and target files found in a directory.
    Scan {
        /// Directory holding the locale files
        directory: String,

        /// Config file (defaults to <directory>/langsync.toml)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// List the keys each target file is missing.
    Status {
        /// Directory holding the locale files
        directory: String,

        /// Config file (defaults to <directory>/langsync.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Translate missing keys into every target file.
    Sync {
        /// Directory holding the locale files
        directory: String,

        /// Translation provider
        #[arg(short, long, value_enum)]
        provider: Option<ProviderKind>,

        /// Language of the master file (e.g. en, en-GB)
        #[arg(short, long)]
        source_lang: Option<String>,

        /// Translate and report without writing any file
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Write the run report as JSON to this path
        #[arg(long)]
        report_json: Option<String>,

        /// Config file (defaults to <directory>/langsync.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("LANGSYNC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("langsync={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load(
    directory: &str,
    config: Option<&str>,
    overrides: Overrides,
) -> Result<ResolvedConfig, String> {
    let mut context = ValidationContext::new().with_directory(directory.to_string());
    if let Some(config) = config {
        context = context.with_config_file(config.to_string());
    }
    if let Some(lang) = &overrides.source_language {
        context = context.with_source_language(lang.clone());
    }
    validate_context(&context)?;

    let file = load_config(Path::new(directory), config.map(PathBuf::from).as_deref())?;
    resolve(file, overrides)
}

fn run(args: Args) -> Result<(), String> {
    match args.commands {
        Commands::Scan { directory, config } => {
            let resolved = load(&directory, config.as_deref(), Overrides::default())?;
            run_scan_command(&directory, &resolved.options)
        }
        Commands::Status {
            directory,
            config,
            json,
        } => {
            let resolved = load(&directory, config.as_deref(), Overrides::default())?;
            run_status_command(&directory, &resolved.options, json)
        }
        Commands::Sync {
            directory,
            provider,
            source_lang,
            dry_run,
            report_json,
            config,
        } => {
            if let Some(report) = &report_json {
                validate_context(&ValidationContext::new().with_report_json(report.clone()))?;
            }
            let overrides = Overrides {
                source_language: source_lang,
                provider,
                dry_run,
            };
            let resolved = load(&directory, config.as_deref(), overrides)?;
            run_sync_command(SyncCommandOptions {
                directory,
                report_json,
                config: resolved,
            })
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
