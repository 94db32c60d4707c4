use std::path::PathBuf;

use engine_logging::engine_info;
use shedu_core::{BatchRequest, Effect, Msg};
use shedu_engine::{EngineConfig, EngineError, EngineHandle, OverwritePolicy, RunOptions};

/// Carries effects from `update` to the engine and engine events back as
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    overwrite: OverwritePolicy,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, overwrite: OverwritePolicy) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
            overwrite,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartBatch(request) => {
                    engine_info!(
                        "StartBatch tokens={} download={} naming={}",
                        request.tokens.len(),
                        request.download,
                        request.naming
                    );
                    let options = run_options(&request, self.overwrite);
                    self.engine.start_batch(request.tokens, options);
                }
            }
        }
    }

    /// Drains every event the engine has produced so far.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(Msg::Pipeline(event));
        }
        inbox
    }
}

fn run_options(request: &BatchRequest, overwrite: OverwritePolicy) -> RunOptions {
    let target_dir = if request.target_dir.trim().is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(request.target_dir.trim())
    };
    RunOptions {
        download: request.download,
        target_dir,
        naming: request.naming,
        report_progress: request.report_progress,
        overwrite,
    }
}
