// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;

use scripture_study::app_config::{self, Config};
use scripture_study::{StudyService, reference};

/// Exit status when the reference cannot be parsed
const EXIT_INVALID_REFERENCE: u8 = 2;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Gather verses, commentary, cross-references, questions and links (default command)
    Study {
        /// Scripture reference, e.g. "John 3:16" or "Genesis 1:1-3"
        #[arg(value_name = "REFERENCE", required = true, num_args = 1..)]
        reference: Vec<String>,
    },

    /// Parse a reference without contacting any provider
    Parse {
        /// Scripture reference to parse
        #[arg(value_name = "REFERENCE", required = true, num_args = 1..)]
        reference: Vec<String>,
    },

    /// Generate shell completions for scripture-study
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// scripture-study - Scripture reference resolution and study aggregation
///
/// Resolves a free-text scripture reference and gathers verse text,
/// commentary, cross-references, study questions and external links.
#[derive(Parser, Debug)]
#[command(name = "scripture-study")]
#[command(version)]
#[command(about = "Scripture reference resolution and study aggregation")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "scripture-study parses a scripture reference and gathers study material for it from several providers.

EXAMPLES:
    scripture-study John 3:16                     # Study a single verse
    scripture-study \"1 Corinthians 13:4-7\"        # Study a verse range
    scripture-study parse Psalm 23:1              # Show the parsed reference only
    scripture-study --log-level debug John 3:16   # Show cache and provider activity
    scripture-study completions bash > ss.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scripture reference to study
    #[arg(value_name = "REFERENCE", num_args = 0..)]
    reference: Vec<String>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print single-line JSON instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The effective level is adjusted later through log::set_max_level
        metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    match &cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "scripture-study", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Parse { reference }) => run_parse(&reference.join(" "), cli.compact),
        Some(Commands::Study { reference }) => run_study(&cli, &reference.join(" ")).await,
        None => {
            // Default behavior - a bare reference means study
            if cli.reference.is_empty() {
                return Err(anyhow!("REFERENCE is required when no subcommand is specified"));
            }
            run_study(&cli, &cli.reference.join(" ")).await
        }
    }
}

fn run_parse(raw: &str, compact: bool) -> Result<ExitCode> {
    match reference::parse(raw) {
        Ok(parsed) => {
            print_json(&parsed, compact)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_json(&e, compact)?;
            Ok(ExitCode::from(EXIT_INVALID_REFERENCE))
        }
    }
}

async fn run_study(cli: &CommandLineOptions, raw: &str) -> Result<ExitCode> {
    let config = load_config(cli)?;

    let cache = config.cache.build();
    let sweeper = config.cache.sweep_interval().map(|every| cache.spawn_sweeper(every));

    let service = StudyService::from_config(&config, cache);
    let result = service.study(raw).await;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }

    let stats = service.cache().stats();
    debug!("Cache: {} entries, {} hits, {} misses", stats.entries, stats.hits, stats.misses);

    match result {
        Ok(material) => {
            print_json(&material, cli.compact)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_json(&e, cli.compact)?;
            Ok(ExitCode::from(EXIT_INVALID_REFERENCE))
        }
    }
}

/// Load or create the configuration, apply CLI overrides and validate it
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", json);
    Ok(())
}
