// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod sentence_split;
mod subtitle_track;
mod text_chunker;
mod timeline;
mod transcript;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize a subtitle file from a recognition transcript (default command)
    #[command(alias = "synth")]
    Synth(SynthArgs),

    /// Re-split multi-sentence entries of an existing SRT file
    Resplit(ResplitArgs),

    /// Generate shell completions for subsynth
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct SynthArgs {
    /// Input transcript file (or directory of transcripts) to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output subtitle file path (defaults to `<stem>.<lang>.srt` next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Language code the transcript was recognized in (e.g. 'en-US', 'de')
    #[arg(short, long)]
    language: Option<String>,

    /// Maximum characters per subtitle line
    #[arg(long)]
    max_width: Option<usize>,

    /// Maximum lines per subtitle entry
    #[arg(long)]
    max_lines: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct ResplitArgs {
    /// Input SRT file to re-split
    #[arg(value_name = "INPUT_SRT")]
    input_path: PathBuf,

    /// Output subtitle file path (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subsynth - Subtitle Timeline Synthesizer
///
/// Converts a time-stamped speech recognition transcript into a correctly
/// timed SRT subtitle track.
#[derive(Parser, Debug)]
#[command(name = "subsynth")]
#[command(version = "1.0.0")]
#[command(about = "Subtitle timeline synthesis from recognition transcripts")]
#[command(long_about = "subsynth reflows a speech recognition transcript into display-bounded
subtitle chunks, allocates each chunk a proportional share of its audio
interval, and writes a gap-free SRT track. Multi-sentence entries are then
re-split into one entry per sentence.

EXAMPLES:
    subsynth talk.json                      # Synthesize using default config
    subsynth -f talk.json                   # Force overwrite existing output
    subsynth -l de-DE talk.json             # Mark the transcript as German
    subsynth --max-width 32 talk.json       # Narrower subtitle lines
    subsynth resplit talk.en.srt            # Re-split an existing SRT in place
    subsynth /transcripts/                  # Process a whole directory
    subsynth completions bash > subsynth.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    synth: SynthArgs,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsynth", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Resplit(args)) => run_resplit(args),
        Some(Commands::Synth(args)) => run_synth(args),
        None => run_synth(cli.synth),
    }
}

/// Load configuration from disk (creating a default file when absent) and
/// apply CLI overrides on top.
fn load_config(config_path: &str, log_level: &Option<CliLogLevel>) -> Result<Config> {
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        config
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    let mut config = config;
    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }

    Ok(config)
}

fn run_synth(options: SynthArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_config(&options.config_path, &options.log_level)?;

    // Override config with CLI options if provided
    if let Some(language) = &options.language {
        config.language = language.clone();
    }
    if let Some(max_width) = options.max_width {
        config.subtitle.max_line_width = max_width;
    }
    if let Some(max_lines) = options.max_lines {
        config.subtitle.max_lines_per_entry = max_lines;
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    let input_path = options
        .input_path
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    if input_path.is_file() {
        // An explicit output path overrides the generated one
        if let Some(output) = &options.output {
            let output_dir = output.parent().unwrap_or(Path::new(".")).to_path_buf();
            file_utils::FileManager::ensure_dir(&output_dir)?;

            if output.exists() && !options.force_overwrite {
                return Err(anyhow!(
                    "Output file already exists (use -f to force overwrite): {:?}",
                    output
                ));
            }

            return run_synth_to_explicit_output(&controller, &input_path, output);
        }

        controller.run(
            input_path.clone(),
            input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            options.force_overwrite,
        )
    } else if input_path.is_dir() {
        controller.run_folder(input_path, options.force_overwrite)
    } else {
        Err(anyhow!("Input path does not exist: {:?}", input_path))
    }
}

/// Synthesis with a caller-chosen output path
fn run_synth_to_explicit_output(controller: &Controller, input_path: &Path, output: &Path) -> Result<()> {
    use file_utils::{FileManager, FileType};

    match FileManager::detect_file_type(input_path)? {
        FileType::Transcript => controller.synthesize_to(input_path, output),
        FileType::Subtitle => controller.resplit_file(input_path, output),
        FileType::Unknown => Err(anyhow!(
            "Unsupported input file (expected a JSON transcript or an SRT subtitle): {:?}",
            input_path
        )),
    }
}

fn run_resplit(options: ResplitArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&options.config_path, &options.log_level)?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    let input_path = &options.input_path;
    if !input_path.is_file() {
        return Err(anyhow!("Input SRT file does not exist: {:?}", input_path));
    }

    let output_path = options.output.clone().unwrap_or_else(|| input_path.clone());
    controller.resplit_file(input_path, &output_path)
}
