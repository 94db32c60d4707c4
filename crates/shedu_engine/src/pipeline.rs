use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use shedu_core::{plan_batch, AccessCode, BatchSummary, PipelineEvent, PlannedCode};

use crate::config::RunOptions;
use crate::fetch::{DownloadRequest, Fetcher};
use crate::resolve::Resolver;
use crate::types::{DownloadOutcome, EventSink};

/// Resolve-then-fetch over a batch of codes, strictly one request at a time.
#[derive(Clone)]
pub struct Pipeline {
    resolver: Arc<dyn Resolver>,
    fetcher: Arc<dyn Fetcher>,
}

/// Forwards events while keeping the batch counters.
struct Recorder<'a> {
    sink: &'a dyn EventSink,
    summary: BatchSummary,
}

impl Recorder<'_> {
    fn emit(&mut self, event: PipelineEvent) {
        self.summary.record(&event);
        self.sink.emit(event);
    }
}

impl Pipeline {
    pub fn new(resolver: Arc<dyn Resolver>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Runs every token of the batch and finishes with [`PipelineEvent::Finished`].
    ///
    /// Tokens are de-duplicated and sorted first. Failures are reported as
    /// events and never stop the batch.
    pub async fn run_batch<S: AsRef<str>>(
        &self,
        tokens: &[S],
        options: &RunOptions,
        sink: &dyn EventSink,
    ) -> BatchSummary {
        let plan = plan_batch(tokens);
        let mut recorder = Recorder {
            sink,
            summary: BatchSummary::default(),
        };
        engine_info!(
            "Batch start: {} distinct tokens, download={}",
            plan.len(),
            options.download
        );

        let last = plan.len().saturating_sub(1);
        for (index, entry) in plan.entries().iter().enumerate() {
            match entry {
                PlannedCode::Invalid(token) => {
                    engine_warn!("Skipping invalid code {:?}", token);
                    recorder.emit(PipelineEvent::InvalidCode {
                        token: token.clone(),
                    });
                }
                PlannedCode::Valid(code) => {
                    self.process_code(code, options, &mut recorder).await;
                    // Only a processed code's block is closed off; skipped
                    // tokens just leave their warning.
                    if index < last {
                        recorder.emit(PipelineEvent::Separator);
                    }
                }
            }
        }

        let summary = recorder.summary;
        engine_info!("Batch finished: {:?}", summary);
        sink.emit(PipelineEvent::Finished { summary });
        summary
    }

    async fn process_code(
        &self,
        code: &AccessCode,
        options: &RunOptions,
        recorder: &mut Recorder<'_>,
    ) {
        let resolution = match self.resolver.resolve(code).await {
            Ok(resolution) => resolution,
            Err(err) => {
                engine_warn!("Resolve failed for {}: {}", code, err);
                recorder.emit(PipelineEvent::ResolveFailed {
                    code: code.to_string(),
                    cause: err.to_string(),
                });
                return;
            }
        };

        recorder.emit(PipelineEvent::Resolved {
            code: code.to_string(),
            title: resolution.title.clone(),
        });

        if resolution.links.is_empty() {
            recorder.emit(PipelineEvent::NoLinks {
                code: code.to_string(),
            });
            return;
        }

        for url in &resolution.links {
            recorder.emit(PipelineEvent::Link {
                code: code.to_string(),
                url: url.clone(),
            });
            if !options.download {
                continue;
            }

            let request = DownloadRequest {
                url,
                code: code.as_str(),
                title: resolution.title_or_placeholder(),
                target_dir: &options.target_dir,
                naming: options.naming,
                report_progress: options.report_progress,
                overwrite: options.overwrite,
            };
            let event = match self.fetcher.download(&request, recorder.sink).await {
                Ok(DownloadOutcome::Written { filename, path, .. }) => {
                    PipelineEvent::DownloadComplete { filename, path }
                }
                Ok(DownloadOutcome::Skipped { filename, path }) => {
                    PipelineEvent::DownloadSkipped { filename, path }
                }
                Err(err) => {
                    engine_warn!("Download failed for {}: {}", url, err);
                    PipelineEvent::DownloadFailed {
                        url: url.clone(),
                        cause: err.to_string(),
                    }
                }
            };
            recorder.emit(event);
        }
    }
}
