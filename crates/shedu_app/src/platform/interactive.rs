//! Line-oriented interactive front end.
//!
//! Code lines accumulate in the input buffer, `:`-commands map onto [`Msg`]s,
//! and the loop drains input and engine events every [`POLL_INTERVAL`].

use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use colored::Colorize;
use shedu_core::{text, update, AppState, AppViewModel, Locale, LogLine, MessageId, Msg};

use super::console::{paint, ProgressDisplay};
use super::effects::EffectRunner;
use super::settings::AppSettings;

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(settings: &AppSettings, locale: Locale) -> anyhow::Result<()> {
    let runner = EffectRunner::new(settings.engine_config(), settings.overwrite_policy())
        .context("starting download engine")?;
    let input_rx = spawn_stdin_reader();

    let mut state = AppState::with_options(
        settings.target_dir.display().to_string(),
        settings.folder_naming(),
        settings.silent,
        locale,
    );
    let mut screen = Screen::new();
    screen.print_header(&state.view());

    loop {
        let mut inbox = runner.poll();
        inbox.extend(input_rx.try_iter());
        inbox.push(Msg::Tick);

        for msg in inbox {
            let (next, effects) = update(state, msg);
            state = next;
            runner.enqueue(effects);
        }

        if state.consume_dirty() {
            let view = state.view();
            screen.render(&view);
            if view.should_exit {
                break;
            }
        }

        thread::sleep(POLL_INTERVAL);
    }

    screen.progress.clear();
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<Msg> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut parser = InputParser::default();
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            for msg in parser.parse_line(&line) {
                if tx.send(msg).is_err() {
                    return;
                }
            }
        }
        // EOF: leave once the running batch (if any) is done.
        let _ = tx.send(Msg::QuitRequested);
    });
    rx
}

/// Turns typed lines into messages, owning the accumulated code input.
#[derive(Debug, Default)]
pub struct InputParser {
    buffer: String,
}

impl InputParser {
    pub fn parse_line(&mut self, line: &str) -> Vec<Msg> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let Some(command) = trimmed.strip_prefix(':') else {
            if !self.buffer.is_empty() {
                self.buffer.push('\n');
            }
            self.buffer.push_str(trimmed);
            return vec![Msg::InputChanged(self.buffer.clone())];
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "get" => self.start(false),
            "download" | "dl" => self.start(true),
            "dir" if !arg.is_empty() => vec![Msg::TargetDirChanged(arg.to_string())],
            "format" => match arg.parse() {
                Ok(naming) => vec![Msg::FolderNamingSelected(naming)],
                Err(_) => vec![Msg::HelpRequested],
            },
            "silent" => match arg.to_ascii_lowercase().as_str() {
                "on" | "true" | "1" => vec![Msg::SilentToggled(true)],
                "off" | "false" | "0" => vec![Msg::SilentToggled(false)],
                _ => vec![Msg::HelpRequested],
            },
            "lang" => match arg.parse() {
                Ok(locale) => vec![Msg::LocaleSelected(locale)],
                Err(_) => vec![Msg::HelpRequested],
            },
            "clear" => {
                self.buffer.clear();
                vec![Msg::ClearLogClicked, Msg::InputChanged(String::new())]
            }
            "quit" | "q" | "exit" => vec![Msg::QuitRequested],
            _ => vec![Msg::HelpRequested],
        }
    }

    // The submitted codes are consumed; the next lines start a fresh input.
    fn start(&mut self, download: bool) -> Vec<Msg> {
        self.buffer.clear();
        vec![
            Msg::StartClicked { download },
            Msg::InputChanged(String::new()),
        ]
    }
}

/// Prints only what changed between two views.
struct Screen {
    printed: usize,
    generation: u64,
    progress: ProgressDisplay,
}

impl Screen {
    fn new() -> Self {
        Self {
            printed: 0,
            generation: 0,
            progress: ProgressDisplay::new(),
        }
    }

    fn print_header(&self, view: &AppViewModel) {
        println!("{}", view.window_title.bold());
        println!("{}", text(view.locale, MessageId::InteractiveHelp));
        println!(
            "{} {}  {} {}  {} {}",
            text(view.locale, MessageId::TargetDirLabel),
            view.target_dir,
            text(view.locale, MessageId::FolderFormatLabel),
            view.naming_label,
            text(view.locale, MessageId::SilentLabel),
            if view.silent { "on" } else { "off" },
        );
    }

    fn render(&mut self, view: &AppViewModel) {
        for line in self.fresh_lines(view) {
            self.progress.print(stamped(line));
        }
        self.progress.show_view(&view.progress);
    }

    /// Lines not printed yet; everything when the log was cleared meanwhile.
    fn fresh_lines<'a>(&mut self, view: &'a AppViewModel) -> &'a [LogLine] {
        if view.log_generation != self.generation {
            self.generation = view.log_generation;
            self.printed = 0;
        }
        let start = self.printed.min(view.log.len());
        self.printed = view.log.len();
        &view.log[start..]
    }
}

fn stamped(line: &LogLine) -> String {
    format!(
        "{} {}",
        Local::now().format("%H:%M:%S").to_string().dimmed(),
        paint(line)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shedu_core::FolderNaming;

    #[test]
    fn code_lines_accumulate() {
        let mut parser = InputParser::default();
        assert_eq!(
            parser.parse_line("12345678, 87654321"),
            vec![Msg::InputChanged("12345678, 87654321".into())]
        );
        assert_eq!(
            parser.parse_line("  11112222  "),
            vec![Msg::InputChanged("12345678, 87654321\n11112222".into())]
        );
        assert!(parser.parse_line("   ").is_empty());
    }

    #[test]
    fn start_commands_consume_input() {
        let mut parser = InputParser::default();
        parser.parse_line("12345678");
        assert_eq!(
            parser.parse_line(":download"),
            vec![
                Msg::StartClicked { download: true },
                Msg::InputChanged(String::new())
            ]
        );
        assert_eq!(
            parser.parse_line("87654321"),
            vec![Msg::InputChanged("87654321".into())]
        );
    }

    #[test]
    fn option_commands() {
        let mut parser = InputParser::default();
        assert_eq!(
            parser.parse_line(":dir  /tmp/audio books "),
            vec![Msg::TargetDirChanged("/tmp/audio books".into())]
        );
        assert_eq!(
            parser.parse_line(":format TC"),
            vec![Msg::FolderNamingSelected(FolderNaming::TitleCode)]
        );
        assert_eq!(parser.parse_line(":silent on"), vec![Msg::SilentToggled(true)]);
        assert_eq!(
            parser.parse_line(":lang zh"),
            vec![Msg::LocaleSelected(Locale::Zh)]
        );
        assert_eq!(parser.parse_line(":quit"), vec![Msg::QuitRequested]);
    }

    #[test]
    fn bad_commands_show_help() {
        let mut parser = InputParser::default();
        assert_eq!(parser.parse_line(":format zz"), vec![Msg::HelpRequested]);
        assert_eq!(parser.parse_line(":silent maybe"), vec![Msg::HelpRequested]);
        assert_eq!(parser.parse_line(":dir"), vec![Msg::HelpRequested]);
        assert_eq!(parser.parse_line(":frobnicate"), vec![Msg::HelpRequested]);
    }

    #[test]
    fn screen_reprints_a_regrown_log() {
        let state = AppState::with_options(".", FolderNaming::None, false, Locale::En);
        let (state, _) = update(state, Msg::HelpRequested);
        let (state, _) = update(state, Msg::HelpRequested);
        let mut screen = Screen::new();
        assert_eq!(screen.fresh_lines(&state.view()).len(), 2);

        // Cleared and refilled to the same length before the next render.
        let (state, _) = update(state, Msg::ClearLogClicked);
        let (state, _) = update(state, Msg::HelpRequested);
        let (state, _) = update(state, Msg::HelpRequested);
        let view = state.view();
        assert_eq!(screen.fresh_lines(&view).len(), 2);
        assert!(screen.fresh_lines(&view).is_empty());
    }

    #[test]
    fn clear_resets_input_and_log() {
        let mut parser = InputParser::default();
        parser.parse_line("12345678");
        assert_eq!(
            parser.parse_line(":clear"),
            vec![Msg::ClearLogClicked, Msg::InputChanged(String::new())]
        );
        assert_eq!(
            parser.parse_line("22223333"),
            vec![Msg::InputChanged("22223333".into())]
        );
    }
}
