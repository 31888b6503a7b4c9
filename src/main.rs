// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::chapter_plan::ChapterCatalog;
use crate::export::ChapterExport;
use crate::script_processor::{EntryExtractor, Script, DEFAULT_MUSIC_COMMANDS};

mod chapter_plan;
mod errors;
mod export;
mod file_utils;
mod script_processor;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// scenaslice - Scenario chapter extractor
///
/// Slices a single chapter out of a visual-novel scenario script and emits a
/// JSON file with its narration, dialogue, and music cues. Only the English
/// text channel is retained; other language channels, voice annotations, and
/// engine control codes are stripped.
#[derive(Parser, Debug)]
#[command(name = "scenaslice")]
#[command(version = "1.0.0")]
#[command(about = "Extract a single chapter from a scenario script into JSON")]
#[command(long_about = "scenaslice slices a chapter out of a large scenario script, identified by the
labels in a chapter plan, and exports its narration, dialogue, and music cues
as JSON.

EXAMPLES:
    scenaslice --chapter episode1-opening --output-dir build/epub
    scenaslice --config tools/chapter_plan.json --chapter umi1_opning --output-dir out
    scenaslice --chapter ep1 --output-dir out --script-path script/0.utf
    scenaslice --chapter ep1 --output-dir out --music-commands bgm mflag

CONFIGURATION:
    The chapter plan is a JSON file with a `chapters` array (id, title,
    episode, start_label, end_label) and a `speakers` object mapping speaker
    codes to display names and portraits.")]
struct CommandLineOptions {
    /// Path to the chapter plan JSON file
    #[arg(short, long, default_value = "tools/chapter_plan.json")]
    config: PathBuf,

    /// Chapter id (or start_label) to export
    #[arg(long)]
    chapter: String,

    /// Directory where JSON exports should be written
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Location of the master scenario file
    #[arg(long, default_value = "InDevelopment/ManualUpdates/0.utf")]
    script_path: PathBuf,

    /// Script commands that should be preserved as music cues
    #[arg(long, num_args = 0.., default_values_t = DEFAULT_MUSIC_COMMANDS.map(String::from))]
    music_commands: Vec<String>,

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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

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

fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the CLI flag
    // can tighten or loosen it before any work happens.
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(log_level) = &cli.log_level {
        log::set_max_level(log_level.clone().into());
    }

    run(cli)
}

fn run(options: CommandLineOptions) -> Result<()> {
    let catalog = ChapterCatalog::load(&options.config)?;
    let chapter = catalog.find_chapter(&options.chapter)?.clone();
    debug!(
        "Exporting chapter '{}' ({} - {})",
        chapter.chapter_id, chapter.start_label, chapter.end_label
    );

    // All label and range failures surface here, before the output directory
    // is even created.
    let script = Script::load(&options.script_path)?;
    let segment = script.slice_chapter(&chapter)?;
    info!(
        "Chapter '{}' spans {} script line(s)",
        chapter.chapter_id,
        segment.len()
    );

    let extractor = EntryExtractor::new(&catalog.speakers, &options.music_commands);
    let entries = extractor.extract(segment);

    let export = ChapterExport::new(&chapter, entries, &catalog.speakers);
    let destination = export.write_to(&options.output_dir)?;

    let display_path = std::env::current_dir()
        .ok()
        .and_then(|cwd| destination.strip_prefix(&cwd).ok().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| destination.clone());
    println!("Wrote {}", display_path.display());

    Ok(())
}
