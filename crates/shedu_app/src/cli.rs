use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use engine_logging::engine_info;
use log::LevelFilter;
use shedu_core::{render_summary, FolderNaming, Locale, MessageId};
use shedu_engine::{OverwritePolicy, RunOptions};

use crate::platform::logging::{self, LogDestination};
use crate::platform::{console, interactive, settings};

#[derive(Debug, Parser)]
#[command(
    name = "shedu-audio",
    version,
    about = "Fetch and download the audio tracks behind SHEDU textbook access codes"
)]
pub struct Cli {
    /// RON settings file (default: ./shedu_audio.ron if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output language, en or zh (default: from settings, then LANG)
    #[arg(long, global = true, value_name = "LANG")]
    pub lang: Option<Locale>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Diagnostic level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_level_arg)]
    pub log_level: Option<LevelFilter>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the audio page links of each code without downloading
    Links {
        /// Comma-separated 8-digit access codes
        #[arg(short, long)]
        codes: String,
    },
    /// List links and optionally download the files
    Download(DownloadArgs),
    /// Read codes and commands from the terminal
    Interactive,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Comma-separated 8-digit access codes
    #[arg(short, long)]
    pub codes: String,

    /// Download each linked file (otherwise only list links)
    #[arg(short, long)]
    pub download: bool,

    /// Directory downloads are saved under
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Sub-folder naming: n (none), ct (code-title), c (code), t (title), tc (title-code)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub folder_format: Option<FolderNaming>,

    /// Show a progress bar per file
    #[arg(short, long, conflicts_with = "silent")]
    pub verbose: bool,

    /// Hide download progress
    #[arg(short, long)]
    pub silent: bool,

    /// Keep files that already exist instead of replacing them
    #[arg(long)]
    pub no_clobber: bool,
}

fn parse_level_arg(raw: &str) -> Result<LevelFilter, String> {
    engine_logging::parse_level(raw).ok_or_else(|| format!("unknown log level '{raw}'"))
}

pub fn run_from_args() -> anyhow::Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(
        LogDestination::from_option(cli.log_file.as_deref()),
        cli.log_level.unwrap_or(LevelFilter::Warn),
    );

    let settings = settings::load(cli.config.as_deref())?;
    if cli.log_level.is_none() {
        if let Some(level) = settings.log_level() {
            logging::set_level(level);
        }
    }

    let locale = cli
        .lang
        .or_else(|| settings.locale())
        .unwrap_or_else(|| Locale::from_env_lang(env_lang().as_deref()));
    engine_info!("Starting shedu-audio, locale={}", locale);

    match cli.command {
        Command::Links { codes } => {
            let options = RunOptions {
                download: false,
                ..RunOptions::default()
            };
            run_batch(&settings, &codes, options, locale)
        }
        Command::Download(args) => {
            let options = download_options(&settings, &args);
            run_batch(&settings, &args.codes, options, locale)
        }
        Command::Interactive => interactive::run(&settings, locale),
    }
}

fn run_batch(
    settings: &settings::AppSettings,
    codes: &str,
    options: RunOptions,
    locale: Locale,
) -> anyhow::Result<()> {
    let tokens = split_code_arg(codes);
    if tokens.iter().all(|token| token.is_empty()) {
        eprintln!("{}", shedu_core::text(locale, MessageId::EnterCode).red());
        anyhow::bail!("no access codes given");
    }
    let summary = console::run_batch(settings.engine_config(), tokens, options, locale)?;
    engine_info!("{}", render_summary(Locale::En, &summary));
    Ok(())
}

/// The batch commands take one comma-separated argument; every piece,
/// even an empty one, is reported on.
fn split_code_arg(codes: &str) -> Vec<String> {
    codes.split(',').map(|token| token.trim().to_string()).collect()
}

fn download_options(settings: &settings::AppSettings, args: &DownloadArgs) -> RunOptions {
    let silent = if args.verbose {
        false
    } else {
        args.silent || settings.silent
    };
    let overwrite = if args.no_clobber {
        OverwritePolicy::Skip
    } else {
        settings.overwrite_policy()
    };
    RunOptions {
        download: args.download,
        target_dir: args
            .target
            .clone()
            .unwrap_or_else(|| settings.target_dir.clone()),
        naming: args
            .folder_format
            .unwrap_or_else(|| settings.folder_naming()),
        report_progress: !silent,
        overwrite,
    }
}

fn env_lang() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}
