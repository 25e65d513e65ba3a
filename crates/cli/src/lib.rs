pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use deckhand_core::config::{AppConfig, ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "deckhand",
    about = "Deckhand proposal CLI",
    long_about = "Build financial proposal slides from the location library, render them, and keep the proposal log.",
    after_help = "Examples:\n  deckhand propose --location gateway --start-date 2026-09-01 --duration 2 --net-rate 150000 --client \"Hilltop Beverages\"\n  deckhand locations\n  deckhand doctor --json"
)]
pub struct Cli {
    /// Config file to load instead of the default search path.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Overrides `database.url` for this invocation.
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,
    /// Overrides `logging.level` for this invocation.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Build a priced proposal slide, render it, and record it in the log")]
    Propose(commands::propose::ProposeArgs),
    #[command(about = "List library locations with their placement details")]
    Locations,
    #[command(about = "Generate per-location metadata files from a roster CSV")]
    Metadata(commands::metadata::MetadataArgs),
    #[command(about = "Install brand fonts from the configured source directory")]
    Fonts,
    #[command(about = "Show recent proposal log entries, newest first")]
    History {
        #[arg(long, default_value_t = 10, help = "Maximum number of entries to show")]
        limit: i64,
    },
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load deterministic demo rows into the proposal log")]
    Seed,
    #[command(about = "Validate config, database, library, and renderer readiness checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

impl Cli {
    /// Loader settings from the global flags. `--config` makes the file
    /// mandatory; flag overrides sit above env and file values.
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                database_url: self.database_url.clone(),
                log_level: self.log_level.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

/// Dispatches a parsed invocation. Split from [`run`] so tests can drive
/// commands without installing a logging subscriber or exiting the process.
pub fn run_command(cli: Cli) -> commands::CommandResult {
    let options = cli.load_options();

    match cli.command {
        Command::Propose(args) => commands::propose::run(args, options),
        Command::Locations => commands::locations::run(options),
        Command::Metadata(args) => commands::metadata::run(args, options),
        Command::Fonts => commands::fonts::run(options),
        Command::History { limit } => commands::history::run(limit, options),
        Command::Migrate => commands::migrate::run(options),
        Command::Seed => commands::seed::run(options),
        Command::Doctor { json } => commands::CommandResult {
            exit_code: 0,
            output: commands::doctor::run(json, options),
        },
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.load_options());

    let result = run_command(cli);

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(options: LoadOptions) {
    use deckhand_core::config::LogFormat::{Compact, Json, Pretty};
    use tracing_subscriber::EnvFilter;

    let (level, format) = match AppConfig::load(options) {
        Ok(config) => (config.logging.level.clone(), config.logging.format),
        // The command itself reports the config failure; log plainly meanwhile.
        Err(_) => ("info".to_string(), Compact),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = match format {
        Compact => tracing_subscriber::fmt()
            .with_target(false)
            .with_env_filter(filter)
            .compact()
            .try_init(),
        Pretty => tracing_subscriber::fmt()
            .with_target(false)
            .with_env_filter(filter)
            .pretty()
            .try_init(),
        Json => {
            tracing_subscriber::fmt().with_target(false).with_env_filter(filter).json().try_init()
        }
    };
    let _ = result;
}
