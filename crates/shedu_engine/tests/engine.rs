use std::sync::{Arc, Mutex};
use std::time::Duration;

use shedu_core::{AccessCode, PipelineEvent};
use shedu_engine::{
    DownloadOutcome, DownloadRequest, EngineHandle, EventSink, FailureKind, FetchError, Fetcher,
    Pipeline, ResolveError, Resolution, Resolver, RunOptions,
};

/// Resolves every code to one link, except codes starting with `9`.
struct FakeResolver {
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Resolver for FakeResolver {
    async fn resolve(&self, code: &AccessCode) -> Result<Resolution, ResolveError> {
        self.calls.lock().unwrap().push(code.to_string());
        if code.as_str().starts_with('9') {
            let err = ResolveError {
                code: code.to_string(),
                kind: FailureKind::Timeout,
                message: "simulated".into(),
            };
            return Err(err);
        }
        Ok(Resolution {
            code: code.to_string(),
            title: None,
            links: vec![format!("https://host/{code}.shtml")],
        })
    }
}

struct FakeFetcher {
    titles: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn download(
        &self,
        request: &DownloadRequest<'_>,
        _sink: &dyn EventSink,
    ) -> Result<DownloadOutcome, FetchError> {
        self.titles.lock().unwrap().push(request.title.to_string());
        Ok(DownloadOutcome::Written {
            filename: "f.mp3".into(),
            path: request.destination_dir().join("f.mp3"),
            bytes: 1,
        })
    }
}

fn collect_until_finished(engine: &EngineHandle) -> Vec<PipelineEvent> {
    let mut events = Vec::new();
    while let Some(event) = engine.recv_timeout(Duration::from_secs(5)) {
        let done = matches!(event, PipelineEvent::Finished { .. });
        events.push(event);
        if done {
            break;
        }
    }
    events
}

#[test]
fn batches_run_on_the_worker_in_sorted_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let titles = Arc::new(Mutex::new(Vec::new()));
    let pipeline = Pipeline::new(
        Arc::new(FakeResolver {
            calls: calls.clone(),
        }),
        Arc::new(FakeFetcher {
            titles: titles.clone(),
        }),
    );
    let engine = EngineHandle::with_pipeline(pipeline).unwrap();

    let options = RunOptions {
        download: true,
        ..RunOptions::default()
    };
    engine.start_batch(
        vec!["22222222".into(), "99999999".into(), "11111111".into(), "bad".into()],
        options.clone(),
    );
    engine.start_batch(vec!["33333333".into()], options);

    let first = collect_until_finished(&engine);
    let second = collect_until_finished(&engine);

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["11111111", "22222222", "99999999", "33333333"]
    );
    // Missing titles fall back to the placeholder for folder naming.
    assert!(titles.lock().unwrap().iter().all(|t| t == "No title found"));

    let separators = first
        .iter()
        .filter(|e| matches!(e, PipelineEvent::Separator))
        .count();
    assert_eq!(separators, 3);
    match first.last() {
        Some(PipelineEvent::Finished { summary }) => {
            assert_eq!(summary.codes_resolved, 2);
            assert_eq!(summary.codes_failed, 1);
            assert_eq!(summary.codes_invalid, 1);
            assert_eq!(summary.files_written, 2);
        }
        other => panic!("unexpected tail {other:?}"),
    }
    assert!(matches!(second.last(), Some(PipelineEvent::Finished { .. })));
    assert!(engine.try_recv().is_none());
}
