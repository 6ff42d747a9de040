//! ulogger CLI
//!
//! Configures a named file logger and runs an instrumented integer parser
//! over the given inputs, so the log output of each strategy can be seen on
//! disk.
//!
//! ## Usage
//!
//! ```bash
//! # Log start/end of every parse to ulog.log
//! ulogger run 1 2 3
//!
//! # Only log failures, and keep going after them
//! ulogger --strategy exception --no-reraise run 7 seven 8
//!
//! # Custom logger name, level and file
//! ulogger --name parser --level debug --file parser.log run 42
//!
//! # Settings from a JSON document ({"name": ..., "level": ..., "file": ...})
//! ulogger --config ulogger.json run 5
//!
//! # Show the level mapping table
//! ulogger levels
//! ```

use std::num::ParseIntError;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use ulogger_core::{
    create_logger, Decorator, Level, Logger, LoggerLayer, LoggerSettings, Outcome,
};

/// ulogger - execution and failure logging for functions
#[derive(Parser, Debug)]
#[command(name = "ulogger")]
#[command(version = "0.1.0")]
#[command(about = "Run an instrumented parser and log its execution")]
struct Cli {
    /// Increase console verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Logger name (default: UsefulLogger)
    #[arg(short, long, global = true)]
    name: Option<String>,

    /// Log level: critical, error, warning, info, debug (unknown means info)
    #[arg(short, long, global = true)]
    level: Option<String>,

    /// Log file, created if missing (default: ulog.log)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// JSON settings file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Instrumentation strategy: execution, exception, combined
    #[arg(short, long, default_value = "combined", global = true)]
    strategy: String,

    /// Return a suppressed result instead of failing on bad input
    #[arg(long, global = true)]
    no_reraise: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse each input as an integer through the instrumented parser
    Run {
        /// Values to parse
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Print the level mapping table
    Levels,
}

fn parse_input(input: &str) -> Result<i64, ParseIntError> {
    input.trim().parse()
}

fn load_settings(cli: &Cli) -> Result<LoggerSettings> {
    let base = match &cli.config {
        Some(path) => LoggerSettings::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => LoggerSettings::default(),
    };

    Ok(base.merge(LoggerSettings {
        name: cli.name.clone(),
        level: cli.level.clone(),
        file: cli.file.clone(),
    }))
}

fn setup_logging(verbosity: u8, logger: Option<Logger>) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        );

    tracing_subscriber::registry()
        .with(console)
        .with(logger.map(LoggerLayer::new))
        .init();
}

fn run(cli: &Cli, inputs: &[String]) -> Result<()> {
    let decorator = Decorator::from_tag(&cli.strategy)?.re_raise(!cli.no_reraise);

    let config = load_settings(cli)?.into_config();
    let logger = create_logger(config).context("Failed to create logger")?;
    setup_logging(cli.verbose, Some(logger.clone()));
    debug!(strategy = %decorator.strategy(), logger = logger.name(), "Logger ready");

    let parse = decorator.with_logger(logger.clone()).apply(parse_input);

    let mut suppressed = 0usize;
    for input in inputs {
        match parse.call(input.as_str()) {
            Ok(Outcome::Returned(value)) => println!("{} -> {}", input, value),
            Ok(Outcome::Suppressed) => {
                suppressed += 1;
                println!("{} -> suppressed", input);
            }
            Err(e) => {
                logger.flush();
                bail!("Failed to parse {:?}: {}", input, e);
            }
        }
    }

    info!(processed = inputs.len(), suppressed, "Run finished");
    logger.flush();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { inputs } => run(&cli, inputs)?,

        Commands::Levels => {
            setup_logging(cli.verbose, None);
            println!("{:<10} {:>8}", "LEVEL", "SEVERITY");
            for level in Level::ALL {
                println!("{:<10} {:>8}", level.name(), level.severity());
            }
        }
    }

    Ok(())
}
