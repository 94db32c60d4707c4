use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info};
use shedu_core::PipelineEvent;

use crate::config::{EngineConfig, RunOptions};
use crate::fetch::ReqwestFetcher;
use crate::pipeline::Pipeline;
use crate::resolve::ReqwestResolver;
use crate::types::ChannelEventSink;
use crate::EngineError;

enum EngineCommand {
    RunBatch {
        tokens: Vec<String>,
        options: RunOptions,
    },
}

/// Owns the background worker. Batches queue up and run one after another;
/// their events arrive on one ordered channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<PipelineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let resolver = Arc::new(ReqwestResolver::new(&config)?);
        let fetcher = Arc::new(ReqwestFetcher::new(&config)?);
        Self::with_pipeline(Pipeline::new(resolver, fetcher))
    }

    pub fn with_pipeline(pipeline: Pipeline) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("shedu-engine".into())
            .spawn(move || {
                let sink = ChannelEventSink::new(event_tx);
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::RunBatch { tokens, options } => {
                            runtime.block_on(pipeline.run_batch(&tokens, &options, &sink));
                        }
                    }
                }
                engine_info!("Engine worker stopped");
            })
            .map_err(EngineError::Runtime)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_batch(&self, tokens: Vec<String>, options: RunOptions) {
        if self
            .cmd_tx
            .send(EngineCommand::RunBatch { tokens, options })
            .is_err()
        {
            engine_error!("Engine worker is gone; batch dropped");
        }
    }

    pub fn try_recv(&self) -> Option<PipelineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the worker has gone away.
    pub fn recv(&self) -> Option<PipelineEvent> {
        self.event_rx.recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PipelineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
