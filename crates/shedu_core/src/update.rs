use crate::catalog::{LogKind, MessageId};
use crate::code::split_codes;
use crate::effect::BatchRequest;
use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(raw) => {
            state.set_input(raw);
            Vec::new()
        }
        Msg::TargetDirChanged(dir) => {
            state.set_target_dir(dir.trim().to_string());
            Vec::new()
        }
        Msg::FolderNamingSelected(naming) => {
            state.set_naming(naming);
            Vec::new()
        }
        Msg::SilentToggled(silent) => {
            state.set_silent(silent);
            Vec::new()
        }
        Msg::LocaleSelected(locale) => {
            state.set_locale(locale);
            Vec::new()
        }
        Msg::StartClicked { download } => start_batch(&mut state, download),
        Msg::ClearLogClicked => {
            state.clear_log();
            Vec::new()
        }
        Msg::HelpRequested => {
            state.push_notice(LogKind::Log, MessageId::InteractiveHelp);
            Vec::new()
        }
        Msg::QuitRequested => {
            state.request_quit();
            Vec::new()
        }
        Msg::Pipeline(event) => {
            state.apply_event(event);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_batch(state: &mut AppState, download: bool) -> Vec<Effect> {
    // Trigger controls are disabled while a batch runs; there is no cancel.
    if state.session() == SessionState::Running {
        state.push_notice(LogKind::Warning, MessageId::Busy);
        return Vec::new();
    }

    let tokens = split_codes(state.input());
    if tokens.is_empty() {
        state.push_notice(LogKind::Error, MessageId::EnterCode);
        return Vec::new();
    }

    let report_progress = download && !state.silent();
    state.begin_run(report_progress);

    vec![Effect::StartBatch(BatchRequest {
        tokens,
        download,
        target_dir: state.target_dir().to_string(),
        naming: state.naming(),
        report_progress,
    })]
}
