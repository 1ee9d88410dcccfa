// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::PathBuf;

use lyricline::app_config::{self, Config};
use lyricline::app_controller::Controller;
use lyricline::export::{ExportFormat, LineEnding};
use lyricline::time_format;

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Lrc,
    EnhancedLrc,
    Json,
    Srt,
    Txt,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Lrc => ExportFormat::Lrc,
            CliExportFormat::EnhancedLrc => ExportFormat::EnhancedLrc,
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Srt => ExportFormat::Srt,
            CliExportFormat::Txt => ExportFormat::Txt,
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
    /// Convert lyric files to another format
    Convert {
        /// Lyric file, audio track or directory of .lrc files
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(short = 'F', long, value_enum)]
        format: Option<CliExportFormat>,

        /// Directory for the converted files (defaults to next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Drop singer tags from the output
        #[arg(long)]
        no_singer_tags: bool,

        /// Drop timestamps from plain text output
        #[arg(long)]
        no_timestamps: bool,

        /// Write CRLF line endings
        #[arg(long)]
        crlf: bool,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Show the line active at a playback position
    Locate {
        /// Lyric file or audio track
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Playback position, `mm:ss.cc` or seconds
        #[arg(value_parser = time_format::parse_playback_time)]
        time: f64,

        /// Lines to show on each side of the active line
        #[arg(short = 'C', long)]
        context: Option<usize>,
    },

    /// Move every line by a fixed offset
    Shift {
        /// Lyric file or audio track
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Offset in seconds, negative moves lines earlier
        #[arg(long, allow_hyphen_values = true)]
        offset: f64,

        /// Write here instead of back to the lyrics file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for lyricline
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lyricline - timed lyrics with singer tags
///
/// Parses LRC documents with inline `@singer@` tags, finds the active line for
/// a playback position, shifts timings and converts to other formats.
#[derive(Parser, Debug)]
#[command(name = "lyricline")]
#[command(version)]
#[command(about = "Timed lyrics toolkit with singer tags")]
#[command(long_about = "lyricline reads LRC lyrics with inline singer tags and converts, inspects or retimes them.

EXAMPLES:
    lyricline convert song.lrc -F srt            # Export subtitles next to the input
    lyricline convert album/ -F json -o out/     # Convert every .lrc below album/
    lyricline convert song.flac -F txt           # Use the lyrics file next to a track
    lyricline locate song.lrc 01:23.45           # Show the line sung at 1:23.45
    lyricline shift song.lrc --offset -0.5       # Move every line half a second earlier
    lyricline completions bash > lyricline.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SINGER TAGS:
    @kaho@Hello @miyu@world       # Each part sung by one singer
    @kaho,miyu@Together           # Sung together (blend)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
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

    // @returns: ANSI color and prefix for a level
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
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, prefix) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, prefix, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set through max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "lyricline", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;
    let controller = Controller::with_config(config)?;

    run_command(&controller, cli.command)
}

fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Convert {
            input_path,
            format,
            output_dir,
            no_singer_tags,
            no_timestamps,
            crlf,
            force_overwrite,
        } => {
            let export_config = &controller.config().export;
            let format = format.map_or(export_config.format, ExportFormat::from);

            let mut options = export_config.options.clone();
            if no_singer_tags {
                options.include_singer_tags = false;
            }
            if no_timestamps {
                options.include_timestamps = false;
            }
            if crlf {
                options.line_ending = LineEnding::Crlf;
            }

            info!("Converting {:?} to {} ({})", input_path, format, format.description());
            let summary = controller.convert_path(
                &input_path,
                format,
                &options,
                output_dir.as_deref(),
                force_overwrite,
            )?;

            if summary.failed > 0 {
                warn!("{} file(s) could not be converted", summary.failed);
            }
        }
        Commands::Locate {
            input_path,
            time,
            context,
        } => {
            let report = controller.locate(&input_path, time, context)?;

            if report.current_index.is_none() {
                info!("No line is active at {}", time_format::format(time));
            }

            let mut stdout = std::io::stdout();
            for line in &report.lines {
                let marker = if line.is_current { ">" } else { " " };
                writeln!(stdout, "{} {} {}", marker, time_format::format_tag(line.time), line.text)?;
            }
        }
        Commands::Shift {
            input_path,
            offset,
            output,
        } => {
            let report = controller.shift(&input_path, offset, output.as_deref())?;
            if report.moved < report.total {
                warn!(
                    "Only {} of {} line(s) moved; the rest were blocked at the start of the song",
                    report.moved, report.total
                );
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
