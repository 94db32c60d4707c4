use crate::catalog::{self, LogLine, MessageId};
use crate::state::{LogEntry, ProgressState};
use crate::{AppState, FolderNaming, Locale, SessionState};

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressView {
    Hidden,
    Determinate { label: String, percent: f64 },
    Indeterminate { label: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub locale: Locale,
    pub window_title: String,
    pub input: String,
    pub target_dir: String,
    pub naming: FolderNaming,
    pub naming_label: String,
    pub silent: bool,
    /// "Get URLs" and "Get & Download" are only enabled while idle.
    pub controls_enabled: bool,
    pub log: Vec<LogLine>,
    /// Changes whenever `log` was cleared, so front ends that print
    /// incrementally know to start over.
    pub log_generation: u64,
    pub progress: ProgressView,
    pub should_exit: bool,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let locale = state.locale();
        let idle = state.session() == SessionState::Idle;
        Self {
            locale,
            window_title: catalog::text(locale, MessageId::AppTitle).to_string(),
            input: state.input().to_string(),
            target_dir: state.target_dir().to_string(),
            naming: state.naming(),
            naming_label: catalog::folder_label(locale, state.naming()).to_string(),
            silent: state.silent(),
            controls_enabled: idle,
            log: state
                .log()
                .iter()
                .flat_map(|entry| render_entry(locale, entry))
                .collect(),
            log_generation: state.log_generation(),
            progress: progress_view(locale, state.progress()),
            should_exit: state.quit_requested() && idle,
        }
    }
}

fn render_entry(locale: Locale, entry: &LogEntry) -> Vec<LogLine> {
    match entry {
        LogEntry::Event(event) => catalog::render_event(locale, event),
        LogEntry::Notice { kind, id } => vec![LogLine::new(*kind, catalog::text(locale, *id))],
        LogEntry::Options {
            target_dir,
            naming,
            silent,
        } => {
            let silent = if *silent { "on" } else { "off" };
            vec![LogLine::new(
                catalog::LogKind::Log,
                catalog::format(
                    locale,
                    MessageId::OptionsChanged,
                    &[
                        ("dir", target_dir.as_str()),
                        ("format", catalog::folder_label(locale, *naming)),
                        ("silent", silent),
                        ("lang", locale.key()),
                    ],
                ),
            )]
        }
    }
}

fn progress_view(locale: Locale, progress: &ProgressState) -> ProgressView {
    match progress {
        ProgressState::Hidden => ProgressView::Hidden,
        ProgressState::Waiting => ProgressView::Indeterminate { label: None },
        ProgressState::Active(progress) => {
            let label = catalog::format(
                locale,
                MessageId::ProgressLabel,
                &[("filename", progress.filename.as_str())],
            );
            match progress.fraction() {
                Some(fraction) => ProgressView::Determinate {
                    label,
                    percent: fraction * 100.0,
                },
                None => ProgressView::Indeterminate { label: Some(label) },
            }
        }
    }
}
