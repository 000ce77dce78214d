pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use catalog_core::config::{AppConfig, LoadOptions, LogFormat};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::browse::BrowseArgs;

#[derive(Debug, Parser)]
#[command(
    name = "catalog",
    about = "Product catalog browser",
    long_about = "Browse a product catalog joined with its categories and owning users, filtered by user, category set and name search.",
    after_help = "Examples:\n  catalog browse --user 3 --query milk\n  catalog browse --dataset records.json --category 1 --category 3 --json\n  catalog browse --event user:1 --event user:1 --event search:app\n  catalog doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a catalog.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Render the filtered product table for the configured dataset")]
    Browse(BrowseArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, dataset loading and catalog integrity")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            ..LoadOptions::default()
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    if let Ok(config) = AppConfig::load(options.clone()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Browse(args) => commands::browse::run(options, args),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
        Command::Doctor { json } => {
            let report = commands::doctor::run(options, json);
            commands::CommandResult { exit_code: u8::from(!report.passed), output: report.output }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so table and JSON output on stdout stay parseable.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(config.logging.level.trim())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter);

    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
