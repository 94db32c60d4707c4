//! Logger setup for shedu-audio.
//!
//! Diagnostics go to stderr by default so they never interleave with the
//! batch output on stdout; `--log-file` redirects them to a file instead.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
pub enum LogDestination {
    /// Truncate and write to the given file.
    File(PathBuf),
    /// Write to stderr.
    Terminal,
}

impl LogDestination {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(path) => LogDestination::File(path.to_path_buf()),
            None => LogDestination::Terminal,
        }
    }
}

/// Initialize the global logger at `level`. Falls back to stderr when the log
/// file cannot be created.
///
/// The sinks accept everything; the effective level is the global maximum,
/// so [`set_level`] can change it once settings are known.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();
    let sink_level = LevelFilter::Trace;

    let logger: Box<dyn SharedLogger> = match destination {
        LogDestination::File(path) => {
            match create_file_logger(&path, sink_level, config.clone()) {
                Some(file_logger) => file_logger,
                None => terminal_logger(sink_level, config),
            }
        }
        LogDestination::Terminal => terminal_logger(sink_level, config),
    };

    let _ = CombinedLogger::init(vec![logger]);
    set_level(level);
}

pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
