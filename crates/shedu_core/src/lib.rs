//! SHEDU core: access codes, naming rules, the pipeline event vocabulary and
//! the pure state machine behind the interactive front end.
mod catalog;
mod code;
mod effect;
mod event;
mod msg;
mod naming;
mod sanitize;
mod state;
mod update;
mod view_model;

pub use catalog::{
    folder_label, format, render_event, render_summary, text, Locale, LogKind, LogLine, MessageId,
    ParseLocaleError, SEPARATOR,
};
pub use code::{plan_batch, split_codes, AccessCode, BatchPlan, CodeError, PlannedCode, CODE_LEN};
pub use effect::{BatchRequest, Effect};
pub use event::{BatchSummary, DownloadProgress, PipelineEvent};
pub use msg::Msg;
pub use naming::{FolderNaming, ParseNamingError};
pub use sanitize::{sanitize_name, FORBIDDEN_CHARS};
pub use state::{AppState, LogEntry, ProgressState, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ProgressView};
