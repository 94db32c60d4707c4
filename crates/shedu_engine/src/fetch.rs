use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::header::{CONTENT_DISPOSITION, USER_AGENT};

use engine_logging::{engine_debug, engine_info};
use shedu_core::{sanitize_name, DownloadProgress, FolderNaming, PipelineEvent};

use crate::config::{EngineConfig, OverwritePolicy};
use crate::content_disposition::{filename_from_content_disposition, filename_from_url};
use crate::persist::{ensure_output_dir, PersistError, StreamingFileWriter};
use crate::types::{map_reqwest_error, DownloadOutcome, EventSink, FailureKind, FetchError};
use crate::EngineError;

/// One file to fetch, with the metadata that decides where it lands.
#[derive(Debug, Clone)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub code: &'a str,
    pub title: &'a str,
    pub target_dir: &'a Path,
    pub naming: FolderNaming,
    pub report_progress: bool,
    pub overwrite: OverwritePolicy,
}

impl DownloadRequest<'_> {
    /// `target_dir`, plus the sanitized sub-folder when the naming policy has one.
    pub fn destination_dir(&self) -> PathBuf {
        match self.naming.subfolder(self.code, self.title) {
            Some(sub) => self.target_dir.join(sub),
            None => self.target_dir.to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn download(
        &self,
        request: &DownloadRequest<'_>,
        sink: &dyn EventSink,
    ) -> Result<DownloadOutcome, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl ReqwestFetcher {
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.download_timeout)
            .read_timeout(config.download_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn download(
        &self,
        request: &DownloadRequest<'_>,
        sink: &dyn EventSink,
    ) -> Result<DownloadOutcome, FetchError> {
        let parsed = reqwest::Url::parse(request.url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let dir = request.destination_dir();
        ensure_output_dir(&dir).map_err(persist_error)?;

        let response = self
            .client
            .get(parsed)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| FetchError::new(map_reqwest_error(&err), err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let raw_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .or_else(|| filename_from_url(response.url()))
            .unwrap_or_default();
        let filename = sanitize_name(&raw_name);
        if filename.is_empty() {
            return Err(FetchError::new(
                FailureKind::NoFilename,
                format!("cannot derive a filename from {}", response.url()),
            ));
        }

        let path = dir.join(&filename);
        if request.overwrite == OverwritePolicy::Skip && path.exists() {
            engine_info!("Keeping existing {:?}", path);
            return Ok(DownloadOutcome::Skipped { filename, path });
        }

        let total = response.content_length();
        engine_debug!("GET {} -> {:?} ({:?} bytes)", request.url, path, total);

        let mut writer = StreamingFileWriter::create(path).map_err(persist_error)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|err| FetchError::new(map_reqwest_error(&err), err.to_string()))?;
            let downloaded = writer.write_chunk(&chunk).map_err(persist_error)?;
            if request.report_progress {
                sink.emit(PipelineEvent::Progress(DownloadProgress {
                    filename: filename.clone(),
                    downloaded,
                    total,
                }));
            }
        }

        let bytes = writer.written();
        let path = writer.commit().map_err(persist_error)?;
        engine_info!("Saved {:?} ({} bytes)", path, bytes);

        Ok(DownloadOutcome::Written {
            filename,
            path,
            bytes,
        })
    }
}

fn persist_error(err: PersistError) -> FetchError {
    FetchError::new(FailureKind::Io, err.to_string())
}
