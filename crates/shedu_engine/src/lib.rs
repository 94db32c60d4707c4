//! SHEDU engine: access-page resolution, file downloads and the worker that
//! runs batches off the caller's thread.
mod config;
mod content_disposition;
mod decode;
mod engine;
mod fetch;
mod page;
mod persist;
mod pipeline;
mod resolve;
mod types;

pub use config::{
    EngineConfig, OverwritePolicy, RunOptions, DEFAULT_ACCESS_PATH, DEFAULT_BASE_URL,
    LEGACY_USER_AGENT, NO_TITLE_PLACEHOLDER,
};
pub use content_disposition::{filename_from_content_disposition, filename_from_url, percent_decode};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engine::EngineHandle;
pub use fetch::{DownloadRequest, Fetcher, ReqwestFetcher};
pub use page::{parse_access_page, AccessPage};
pub use persist::{ensure_output_dir, PersistError, StreamingFileWriter};
pub use pipeline::Pipeline;
pub use resolve::{ReqwestResolver, Resolver};
pub use types::{
    ChannelEventSink, DownloadOutcome, EventSink, FailureKind, FetchError, ResolveError,
    Resolution,
};

/// Failure to set up the engine itself; per-code and per-file failures are
/// reported as events instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http client setup failed: {0}")]
    Client(String),
    #[error("failed to start engine worker: {0}")]
    Runtime(#[source] std::io::Error),
}
