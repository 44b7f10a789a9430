// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::correction::{AnnotationPipeline, CorrectionService, HeuristicTokenizer};
use crate::errors::AppError;

mod app_config;
mod correction;
mod errors;
mod providers;

/// CLI Wrapper for CorrectionProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCorrectionProvider {
    Ollama,
    Mock,
}

impl From<CliCorrectionProvider> for app_config::CorrectionProvider {
    fn from(cli_provider: CliCorrectionProvider) -> Self {
        match cli_provider {
            CliCorrectionProvider::Ollama => app_config::CorrectionProvider::Ollama,
            CliCorrectionProvider::Mock => app_config::CorrectionProvider::Mock,
        }
    }
}

/// CLI Wrapper for RenderMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliRenderMode {
    WordStream,
    OffsetPreserving,
}

impl From<CliRenderMode> for app_config::RenderMode {
    fn from(cli_mode: CliRenderMode) -> Self {
        match cli_mode {
            CliRenderMode::WordStream => app_config::RenderMode::WordStream,
            CliRenderMode::OffsetPreserving => app_config::RenderMode::OffsetPreserving,
        }
    }
}

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
    /// Correct an essay and print the annotated result (default command)
    Correct(CorrectArgs),

    /// Generate shell completions for redpen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct CorrectArgs {
    /// Input essay file; reads stdin when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Correction provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliCorrectionProvider>,

    /// Model name to use for correction
    #[arg(short, long)]
    model: Option<String>,

    /// Span rendering mode
    #[arg(short, long, value_enum)]
    render_mode: Option<CliRenderMode>,

    /// Maximum tokens per chunk
    #[arg(short, long)]
    token_budget: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// redpen - AI grammar correction and annotation
///
/// Corrects essay text with a grammar model served by an AI provider and
/// prints the corrected text plus two annotated HTML views.
#[derive(Parser, Debug)]
#[command(name = "redpen")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered grammar correction and annotation tool")]
#[command(long_about = "redpen splits an essay into token-budgeted chunks, corrects each chunk
with a grammar model, and renders the corrections as annotated HTML.

EXAMPLES:
    redpen essay.txt                            # Correct using default config
    redpen -p mock essay.txt                    # Dry run without a model server
    redpen -r offset-preserving essay.txt       # Keep original whitespace outside flagged spans
    redpen -t 64 essay.txt                      # Use a 64-token chunk budget
    cat essay.txt | redpen                      # Read the essay from stdin
    redpen completions bash > redpen.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    ollama - Local Ollama server (default: grammarly-coedit:latest)
    mock   - In-process echo provider for tests and dry runs")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input essay file; reads stdin when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Correction provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliCorrectionProvider>,

    /// Model name to use for correction
    #[arg(short, long)]
    model: Option<String>,

    /// Span rendering mode
    #[arg(short, long, value_enum)]
    render_mode: Option<CliRenderMode>,

    /// Maximum tokens per chunk
    #[arg(short, long)]
    token_budget: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");

            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "redpen", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Correct(args)) => Ok(run_correct(args).await?),
        None => {
            // Default behavior - use top-level args
            let correct_args = CorrectArgs {
                input_path: cli.input_path,
                provider: cli.provider,
                model: cli.model,
                render_mode: cli.render_mode,
                token_budget: cli.token_budget,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            Ok(run_correct(correct_args).await?)
        }
    }
}

async fn run_correct(options: CorrectArgs) -> Result<(), AppError> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_or_create_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.correction.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        let provider_str = config.correction.provider.to_lowercase_string();
        if let Some(provider_config) = config
            .correction
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.model = model.clone();
        }
    }
    if let Some(render_mode) = &options.render_mode {
        config.correction.common.render_mode = render_mode.clone().into();
    }
    if let Some(token_budget) = options.token_budget {
        config.correction.common.token_budget = token_budget;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(level_filter(&config.log_level));
    config.validate()?;

    let document = read_document(options.input_path.as_deref())?;
    if document.trim().is_empty() {
        return Err(AppError::Input("Input essay is empty".to_string()));
    }

    let service = CorrectionService::new(&config.correction)?;
    let pipeline = AnnotationPipeline::new(&config, service, Arc::new(HeuristicTokenizer::new()))?;

    let essay = pipeline.annotate(&document).await?;

    let output = serde_json::to_string_pretty(&essay)
        .context("Failed to serialize correction result")?;
    println!("{}", output);

    Ok(())
}

/// Load the config file, creating a default one when it does not exist
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        Ok(config)
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        let serialized = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config")?;
        std::fs::write(config_path, serialized)
            .context(format!("Failed to write default config to {}", config_path))?;
        Ok(config)
    }
}

/// Read the essay from a file or stdin
fn read_document(input_path: Option<&Path>) -> Result<String> {
    match input_path {
        Some(path) => std::fs::read_to_string(path)
            .context(format!("Failed to read input file: {:?}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read essay from stdin")?;
            Ok(buffer)
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
