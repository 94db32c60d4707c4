//! Terminal output: coloured log lines and `indicatif` progress bars.

use std::time::Duration;

use anyhow::Context;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use shedu_core::{
    format, render_event, BatchSummary, DownloadProgress, Locale, LogKind, LogLine, MessageId,
    PipelineEvent, ProgressView,
};
use shedu_engine::{EngineConfig, EngineHandle, RunOptions};

const BYTES_TEMPLATE: &str =
    "  {msg} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "  {spinner} {msg} {bytes}";
const PERCENT_TEMPLATE: &str = "  {msg} [{bar:30.cyan/blue}] {percent}%";

pub fn paint(line: &LogLine) -> ColoredString {
    let text = line.text.as_str();
    match line.kind {
        LogKind::Title => text.bright_green(),
        LogKind::Url => text.cyan(),
        LogKind::Warning => text.yellow(),
        LogKind::Error => text.red(),
        LogKind::Separator => text.bright_red(),
        LogKind::Log => text.normal(),
    }
}

/// At most one live bar; log lines are printed around it.
#[derive(Default)]
pub struct ProgressDisplay {
    bar: Option<ProgressBar>,
    key: Option<String>,
}

impl ProgressDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints a line to stdout without tearing the bar.
    pub fn print(&self, line: impl std::fmt::Display) {
        match &self.bar {
            Some(bar) => bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        self.key = None;
    }

    /// Byte-level bar for one file, used by the batch commands.
    pub fn show_download(&mut self, locale: Locale, progress: &DownloadProgress) {
        let key = format!("file:{}", progress.filename);
        if self.key.as_deref() != Some(key.as_str()) {
            self.clear();
            let label = format(
                locale,
                MessageId::ProgressLabel,
                &[("filename", progress.filename.as_str())],
            );
            let bar = match progress.total {
                Some(total) => styled(ProgressBar::new(total), BYTES_TEMPLATE),
                None => {
                    let bar = styled(ProgressBar::new_spinner(), SPINNER_TEMPLATE);
                    bar.enable_steady_tick(Duration::from_millis(120));
                    bar
                }
            };
            bar.set_message(label);
            self.bar = Some(bar);
            self.key = Some(key);
        }

        if let Some(bar) = &self.bar {
            if let Some(total) = progress.total {
                bar.set_length(total);
            }
            bar.set_position(progress.downloaded);
        }
    }

    /// Mirrors the interactive progress view.
    pub fn show_view(&mut self, view: &ProgressView) {
        match view {
            ProgressView::Hidden => self.clear(),
            ProgressView::Determinate { label, percent } => {
                if self.key.as_deref() != Some("view:percent") {
                    self.clear();
                    self.bar = Some(styled(ProgressBar::new(1000), PERCENT_TEMPLATE));
                    self.key = Some("view:percent".into());
                }
                if let Some(bar) = &self.bar {
                    bar.set_message(label.clone());
                    bar.set_position((percent.clamp(0.0, 100.0) * 10.0) as u64);
                }
            }
            ProgressView::Indeterminate { label } => {
                if self.key.as_deref() != Some("view:spinner") {
                    self.clear();
                    let bar = styled(ProgressBar::new_spinner(), "  {spinner} {msg}");
                    bar.enable_steady_tick(Duration::from_millis(120));
                    self.bar = Some(bar);
                    self.key = Some("view:spinner".into());
                }
                if let Some(bar) = &self.bar {
                    bar.set_message(label.clone().unwrap_or_default());
                }
            }
        }
    }
}

fn styled(bar: ProgressBar, template: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(template)
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.with_style(style)
}

/// Runs one batch on a fresh engine and prints its events as they arrive.
pub fn run_batch(
    config: EngineConfig,
    tokens: Vec<String>,
    options: RunOptions,
    locale: Locale,
) -> anyhow::Result<BatchSummary> {
    let engine = EngineHandle::new(config).context("starting download engine")?;
    engine.start_batch(tokens, options);

    let mut progress = ProgressDisplay::new();
    while let Some(event) = engine.recv() {
        match &event {
            PipelineEvent::Progress(update) => {
                progress.show_download(locale, update);
                continue;
            }
            PipelineEvent::DownloadComplete { .. }
            | PipelineEvent::DownloadSkipped { .. }
            | PipelineEvent::DownloadFailed { .. }
            | PipelineEvent::Finished { .. } => progress.clear(),
            _ => {}
        }

        for line in render_event(locale, &event) {
            progress.print(paint(&line));
        }

        if let PipelineEvent::Finished { summary } = event {
            return Ok(summary);
        }
    }

    anyhow::bail!("download engine stopped before the batch finished")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_keeps_text() {
        colored::control::set_override(false);
        let line = LogLine::new(LogKind::Url, "https://x/y.shtml");
        assert_eq!(paint(&line).to_string(), "https://x/y.shtml");
    }

    #[test]
    fn download_bar_follows_file_changes() {
        let mut display = ProgressDisplay::new();
        let first = DownloadProgress {
            filename: "a.mp3".into(),
            downloaded: 10,
            total: Some(100),
        };
        display.show_download(Locale::En, &first);
        assert_eq!(display.bar.as_ref().map(|bar| bar.position()), Some(10));

        let second = DownloadProgress {
            filename: "b.mp3".into(),
            downloaded: 5,
            total: None,
        };
        display.show_download(Locale::En, &second);
        assert_eq!(display.key.as_deref(), Some("file:b.mp3"));
        assert_eq!(display.bar.as_ref().map(|bar| bar.position()), Some(5));

        display.show_view(&ProgressView::Hidden);
        assert!(display.bar.is_none());
    }
}
