use std::fmt;
use std::path::PathBuf;

use shedu_core::PipelineEvent;

use crate::config::NO_TITLE_PLACEHOLDER;

/// Title and links scraped from one access page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub code: String,
    pub title: Option<String>,
    /// Absolute URLs in document order.
    pub links: Vec<String>,
}

impl Resolution {
    pub fn title_or_placeholder(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Written {
        filename: String,
        path: PathBuf,
        bytes: u64,
    },
    Skipped {
        filename: String,
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ResolveError {
    pub code: String,
    pub kind: FailureKind,
    pub message: String,
}

impl ResolveError {
    pub(crate) fn new(code: &str, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    NoFilename,
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unreadable response"),
            FailureKind::NoFilename => write!(f, "no usable filename"),
            FailureKind::Io => write!(f, "file error"),
        }
    }
}

pub(crate) fn map_reqwest_error(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else {
        FailureKind::Network
    }
}

/// Receiver of pipeline events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<PipelineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: PipelineEvent) {
        // The receiver going away only means nobody is rendering anymore.
        let _ = self.tx.send(event);
    }
}
