// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use vtt2md::app_config::{self, Config};
use vtt2md::app_controller::Controller;
use vtt2md::markdown_renderer;
use vtt2md::transcript::DocumentDate;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Convert caption files to Markdown minutes (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for vtt2md
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input .vtt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    options: ConvertOptions,
}

#[derive(Args, Debug, Clone)]
struct ConvertOptions {
    /// Directory for the generated documents (defaults to next to each input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Meeting date and start time, "YYYY-MM-DD HH:MM", used instead of the file date
    #[arg(short, long, value_name = "DATETIME")]
    meeting_datetime: Option<String>,

    /// Remove filler words such as "えー" or "um"
    #[arg(short, long, overrides_with = "no_remove_fillers")]
    remove_fillers: bool,

    /// Keep filler words even when the config file removes them
    #[arg(long, overrides_with = "remove_fillers")]
    no_remove_fillers: bool,

    /// Split long transcripts into several files
    #[arg(short, long, overrides_with = "no_split")]
    split: bool,

    /// Write one file even when the config file enables splitting
    #[arg(long, overrides_with = "split")]
    no_split: bool,

    /// Maximum characters per file when splitting
    #[arg(long, value_name = "CHARS")]
    max_chars_per_part: Option<usize>,

    /// Maximum pause in seconds between merged statements of the same speaker
    #[arg(short, long, value_name = "SECONDS")]
    gap_seconds: Option<u64>,

    /// Print the document to stdout instead of writing a file (single file only)
    #[arg(long, conflicts_with_all = ["output_dir", "force_overwrite"])]
    stdout: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// vtt2md - WebVTT meeting captions to Markdown minutes
///
/// Converts the caption files exported by online meeting tools into
/// Markdown meeting minutes with participants, duration and a speaker log.
#[derive(Parser, Debug)]
#[command(name = "vtt2md")]
#[command(version)]
#[command(about = "WebVTT meeting captions to Markdown minutes")]
#[command(long_about = "vtt2md converts WebVTT meeting captions into Markdown meeting minutes.

EXAMPLES:
    vtt2md meeting.vtt                              # Write meeting.md next to the input
    vtt2md -f meeting.vtt                           # Force overwrite an existing meeting.md
    vtt2md -m \"2024-05-01 14:30\" meeting.vtt        # Use the meeting time in the header
    vtt2md -r -s meeting.vtt                        # Remove fillers, split long minutes
    vtt2md --no-split meeting.vtt                   # One file even if conf.json splits
    vtt2md --stdout meeting.vtt                     # Print the minutes instead of saving
    vtt2md -o minutes/ recordings/                  # Convert a whole folder
    vtt2md completions bash > vtt2md.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .vtt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    options: ConvertOptions,
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌",
            Level::Warn => "🚧",
            Level::Info => "✅",
            Level::Debug => "🔍",
            Level::Trace => "📋",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
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
    // The logger accepts everything; the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vtt2md", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_convert(ConvertArgs {
                input_path,
                options: cli.options,
            })
            .await
        }
    }
}

// Load the config file, creating it with defaults when missing
fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::from_file(config_path)
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        Ok(config)
    }
}

// Command line flags take precedence over the config file
fn apply_overrides(config: &mut Config, options: &ConvertOptions) {
    if let Some(remove_fillers) = switch(options.remove_fillers, options.no_remove_fillers) {
        config.remove_fillers = remove_fillers;
    }

    if let Some(split) = switch(options.split, options.no_split) {
        config.output.split = split;
    }

    if let Some(max_chars) = options.max_chars_per_part {
        config.output.max_chars_per_part = max_chars;
    }

    if let Some(gap) = options.gap_seconds {
        config.merge_gap_seconds = gap;
    }

    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }
}

// An on/off flag pair; None leaves the config value alone
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

async fn run_convert(args: ConvertArgs) -> Result<()> {
    let options = args.options;

    // Apply a command line log level before the config is read
    if let Some(cmd_log_level) = options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = load_config(&options.config_path)?;
    apply_overrides(&mut config, &options);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let meeting_date = options
        .meeting_datetime
        .as_deref()
        .map(DocumentDate::parse_meeting)
        .transpose()?;

    let controller = Controller::with_config(config)?.with_meeting_date(meeting_date);

    let input_path = args.input_path;
    if options.stdout {
        if !input_path.is_file() {
            return Err(anyhow!("--stdout requires a single input file: {:?}", input_path));
        }

        let documents = controller.convert_file(&input_path)?;
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", markdown_renderer::join_parts(&documents))?;
        return Ok(());
    }

    if input_path.is_file() {
        let output_dir = match options.output_dir {
            Some(dir) => dir,
            None => input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
        };
        controller.run(input_path, output_dir, options.force_overwrite).await?;
    } else if input_path.is_dir() {
        let summary = controller
            .run_folder(input_path, options.output_dir, options.force_overwrite)
            .await?;

        if summary.failed > 0 {
            return Err(anyhow!("{} file(s) could not be converted", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
