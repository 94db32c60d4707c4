use std::path::PathBuf;

/// Byte-level progress of one file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadProgress {
    pub filename: String,
    pub downloaded: u64,
    /// `None` when the server did not announce a length.
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Completed fraction in `0.0..=1.0`, or `None` when indeterminate.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some((self.downloaded as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}

/// Counters accumulated over one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub codes_resolved: usize,
    pub codes_invalid: usize,
    pub codes_failed: usize,
    pub links_found: usize,
    pub files_written: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
}

/// Language-neutral event emitted by the pipeline, in processing order.
///
/// Front ends render these; nothing in the pipeline depends on display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// Token failed the 8-digit rule; no request was made for it.
    InvalidCode { token: String },
    /// The access page was fetched and parsed. `title` is `None` when the page
    /// has no title element.
    Resolved { code: String, title: Option<String> },
    /// One absolute link, in document order.
    Link { code: String, url: String },
    /// The access page contained no audio links.
    NoLinks { code: String },
    ResolveFailed { code: String, cause: String },
    Progress(DownloadProgress),
    DownloadComplete { filename: String, path: PathBuf },
    /// The destination already existed and the overwrite policy kept it.
    DownloadSkipped { filename: String, path: PathBuf },
    DownloadFailed { url: String, cause: String },
    /// Marks the boundary between two codes' blocks.
    Separator,
    Finished { summary: BatchSummary },
}

impl BatchSummary {
    /// Folds one event into the counters.
    pub fn record(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::InvalidCode { .. } => self.codes_invalid += 1,
            PipelineEvent::Resolved { .. } => self.codes_resolved += 1,
            PipelineEvent::ResolveFailed { .. } => self.codes_failed += 1,
            PipelineEvent::Link { .. } => self.links_found += 1,
            PipelineEvent::DownloadComplete { .. } => self.files_written += 1,
            PipelineEvent::DownloadSkipped { .. } => self.files_skipped += 1,
            PipelineEvent::DownloadFailed { .. } => self.files_failed += 1,
            PipelineEvent::NoLinks { .. }
            | PipelineEvent::Progress(_)
            | PipelineEvent::Separator
            | PipelineEvent::Finished { .. } => {}
        }
    }
}
