use std::path::PathBuf;

use pretty_assertions::assert_eq;
use shedu_core::{
    update, AppState, BatchRequest, BatchSummary, DownloadProgress, Effect, FolderNaming, Locale,
    LogKind, Msg, PipelineEvent, ProgressView,
};

fn state_with_input(input: &str, silent: bool) -> AppState {
    let state = AppState::with_options("/music", FolderNaming::CodeTitle, silent, Locale::En);
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    state
}

fn finished() -> PipelineEvent {
    PipelineEvent::Finished {
        summary: BatchSummary::default(),
    }
}

#[test]
fn start_with_empty_input_logs_error_and_emits_nothing() {
    let state = state_with_input("  \n , ", false);
    let (mut next, effects) = update(state, Msg::StartClicked { download: true });

    assert!(effects.is_empty());
    assert!(next.consume_dirty());
    let view = next.view();
    assert!(view.controls_enabled);
    assert_eq!(view.log.len(), 1);
    assert_eq!(view.log[0].kind, LogKind::Error);
    assert_eq!(view.log[0].text, "Please enter at least one code.");
}

#[test]
fn start_emits_batch_request_and_disables_controls() {
    let state = state_with_input("22222222\n11111111, abc", false);
    let (state, effects) = update(state, Msg::StartClicked { download: true });

    assert_eq!(
        effects,
        vec![Effect::StartBatch(BatchRequest {
            tokens: vec!["22222222".into(), "11111111".into(), "abc".into()],
            download: true,
            target_dir: "/music".into(),
            naming: FolderNaming::CodeTitle,
            report_progress: true,
        })]
    );
    let view = state.view();
    assert!(!view.controls_enabled);
    assert_eq!(view.progress, ProgressView::Indeterminate { label: None });
}

#[test]
fn link_only_run_and_silent_run_hide_progress() {
    let (state, effects) = update(
        state_with_input("11111111", false),
        Msg::StartClicked { download: false },
    );
    assert!(matches!(&effects[0], Effect::StartBatch(req) if !req.report_progress));
    assert_eq!(state.view().progress, ProgressView::Hidden);

    let (state, effects) = update(
        state_with_input("11111111", true),
        Msg::StartClicked { download: true },
    );
    assert!(matches!(&effects[0], Effect::StartBatch(req) if !req.report_progress));
    assert_eq!(state.view().progress, ProgressView::Hidden);
}

#[test]
fn second_start_while_running_is_rejected() {
    let (state, _) = update(
        state_with_input("11111111", false),
        Msg::StartClicked { download: false },
    );
    let (state, effects) = update(state, Msg::StartClicked { download: true });

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.log.last().unwrap().kind, LogKind::Warning);
}

#[test]
fn pipeline_events_render_in_order_and_finish_reenables_controls() {
    let (state, _) = update(
        state_with_input("11111111", false),
        Msg::StartClicked { download: true },
    );
    let events = vec![
        PipelineEvent::Resolved {
            code: "11111111".into(),
            title: None,
        },
        PipelineEvent::Link {
            code: "11111111".into(),
            url: "https://host/a.shtml".into(),
        },
        PipelineEvent::Progress(DownloadProgress {
            filename: "a.mp3".into(),
            downloaded: 50,
            total: Some(200),
        }),
    ];
    let state = events
        .into_iter()
        .fold(state, |state, event| update(state, Msg::Pipeline(event)).0);

    let view = state.view();
    let texts: Vec<_> = view.log.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(texts, vec!["11111111", "No title found", "https://host/a.shtml"]);
    assert_eq!(
        view.progress,
        ProgressView::Determinate {
            label: "Downloading: a.mp3".into(),
            percent: 25.0,
        }
    );

    let (state, _) = update(state, Msg::Pipeline(finished()));
    let view = state.view();
    assert!(view.controls_enabled);
    assert_eq!(view.progress, ProgressView::Hidden);
}

#[test]
fn unknown_length_progress_is_indeterminate() {
    let (state, _) = update(
        state_with_input("11111111", false),
        Msg::StartClicked { download: true },
    );
    let (state, _) = update(
        state,
        Msg::Pipeline(PipelineEvent::Progress(DownloadProgress {
            filename: "b.mp3".into(),
            downloaded: 10,
            total: None,
        })),
    );
    assert_eq!(
        state.view().progress,
        ProgressView::Indeterminate {
            label: Some("Downloading: b.mp3".into())
        }
    );
}

#[test]
fn new_run_clears_previous_log() {
    let (state, _) = update(
        state_with_input("11111111", false),
        Msg::StartClicked { download: false },
    );
    let (state, _) = update(
        state,
        Msg::Pipeline(PipelineEvent::DownloadComplete {
            filename: "x.mp3".into(),
            path: PathBuf::from("/music/x.mp3"),
        }),
    );
    let (state, _) = update(state, Msg::Pipeline(finished()));
    assert_eq!(state.view().log.len(), 2);

    let (state, _) = update(state, Msg::StartClicked { download: false });
    assert!(state.view().log.is_empty());
}

#[test]
fn locale_switch_rerenders_existing_log() {
    let (state, _) = update(
        state_with_input("1234", false),
        Msg::StartClicked { download: false },
    );
    let (state, _) = update(
        state,
        Msg::Pipeline(PipelineEvent::InvalidCode {
            token: "1234".into(),
        }),
    );
    assert_eq!(
        state.view().log[0].text,
        "Warning: '1234' is not a valid 8-digit number. Skipping."
    );

    let (state, _) = update(state, Msg::LocaleSelected(Locale::Zh));
    let view = state.view();
    assert_eq!(view.log[0].text, "警告: '1234' 不是一个有效的8位数字。已跳过。");
    assert_eq!(view.window_title, "上海中小学教材配套音频下载工具");
}

#[test]
fn quit_waits_for_running_batch() {
    let (state, _) = update(
        state_with_input("11111111", false),
        Msg::StartClicked { download: false },
    );
    let (state, _) = update(state, Msg::QuitRequested);
    assert!(!state.view().should_exit);

    let (state, _) = update(state, Msg::Pipeline(finished()));
    assert!(state.view().should_exit);
}

#[test]
fn option_changes_are_applied_to_next_request() {
    let state = state_with_input("11111111", false);
    let (state, _) = update(state, Msg::TargetDirChanged(" /other ".into()));
    let (state, _) = update(state, Msg::FolderNamingSelected(FolderNaming::Code));
    let (state, _) = update(state, Msg::SilentToggled(true));
    let (_, effects) = update(state, Msg::StartClicked { download: true });

    assert_eq!(
        effects,
        vec![Effect::StartBatch(BatchRequest {
            tokens: vec!["11111111".into()],
            download: true,
            target_dir: "/other".into(),
            naming: FolderNaming::Code,
            report_progress: false,
        })]
    );
}

#[test]
fn clearing_the_log_bumps_its_generation() {
    let state = state_with_input("11111111", false);
    let (state, _) = update(state, Msg::HelpRequested);
    let before = state.view().log_generation;

    // A new run clears the log; a notice in the same tick regrows it.
    let (state, _) = update(state, Msg::StartClicked { download: false });
    let (state, _) = update(state, Msg::StartClicked { download: false });
    let view = state.view();
    assert_eq!(view.log.len(), 1);
    assert_eq!(view.log_generation, before + 1);

    let (state, _) = update(state, Msg::ClearLogClicked);
    assert_eq!(state.view().log_generation, before + 2);
    let (state, _) = update(state, Msg::ClearLogClicked);
    assert_eq!(state.view().log_generation, before + 2);
}
