use crate::catalog::{LogKind, MessageId};
use crate::event::{DownloadProgress, PipelineEvent};
use crate::view_model::AppViewModel;
use crate::{FolderNaming, Locale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

/// A log entry kept in language-neutral form; text is produced at view time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Event(PipelineEvent),
    Notice { kind: LogKind, id: MessageId },
    Options {
        target_dir: String,
        naming: FolderNaming,
        silent: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProgressState {
    #[default]
    Hidden,
    /// Visible but no bytes reported yet.
    Waiting,
    Active(DownloadProgress),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    target_dir: String,
    naming: FolderNaming,
    silent: bool,
    locale: Locale,
    session: SessionState,
    log: Vec<LogEntry>,
    /// Bumped whenever the log is cleared.
    log_generation: u64,
    progress: ProgressState,
    quit_requested: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state seeded from settings.
    pub fn with_options(
        target_dir: impl Into<String>,
        naming: FolderNaming,
        silent: bool,
        locale: Locale,
    ) -> Self {
        Self {
            target_dir: target_dir.into(),
            naming,
            silent,
            locale,
            dirty: true,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn target_dir(&self) -> &str {
        &self.target_dir
    }

    pub fn naming(&self) -> FolderNaming {
        self.naming
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn log_generation(&self) -> u64 {
        self.log_generation
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_target_dir(&mut self, dir: String) {
        self.target_dir = dir;
        self.push_options_snapshot();
    }

    pub(crate) fn set_naming(&mut self, naming: FolderNaming) {
        self.naming = naming;
        self.push_options_snapshot();
    }

    pub(crate) fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
        self.push_options_snapshot();
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
        self.push_options_snapshot();
    }

    pub(crate) fn push_notice(&mut self, kind: LogKind, id: MessageId) {
        self.log.push(LogEntry::Notice { kind, id });
        self.mark_dirty();
    }

    fn push_options_snapshot(&mut self) {
        self.log.push(LogEntry::Options {
            target_dir: self.target_dir.clone(),
            naming: self.naming,
            silent: self.silent,
        });
        self.mark_dirty();
    }

    pub(crate) fn clear_log(&mut self) {
        if !self.log.is_empty() {
            self.log.clear();
            self.log_generation += 1;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_run(&mut self, show_progress: bool) {
        self.log.clear();
        self.log_generation += 1;
        self.session = SessionState::Running;
        self.progress = if show_progress {
            ProgressState::Waiting
        } else {
            ProgressState::Hidden
        };
        self.mark_dirty();
    }

    pub(crate) fn apply_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Progress(progress) => {
                // Progress is only shown while a visible indicator is up.
                if self.progress != ProgressState::Hidden {
                    self.progress = ProgressState::Active(progress);
                    self.mark_dirty();
                }
            }
            finished @ PipelineEvent::Finished { .. } => {
                self.session = SessionState::Idle;
                self.progress = ProgressState::Hidden;
                self.log.push(LogEntry::Event(finished));
                self.mark_dirty();
            }
            other => {
                self.log.push(LogEntry::Event(other));
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit_requested = true;
        self.mark_dirty();
    }
}
