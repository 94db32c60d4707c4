use std::path::PathBuf;
use std::time::Duration;

use shedu_core::FolderNaming;

pub const DEFAULT_BASE_URL: &str = "https://mp3.bookmall.com.cn";
pub const DEFAULT_ACCESS_PATH: &str = "/book/access.action";
/// The endpoint only serves its page to this legacy IE 11 identification.
pub const LEGACY_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.3; WOW64; Trident/7.0; rv:11.0) like Gecko";
/// Folder-naming title used when the access page has no title element.
pub const NO_TITLE_PLACEHOLDER: &str = "No title found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Origin that relative links are resolved against.
    pub base_url: String,
    pub access_path: String,
    pub user_agent: String,
    pub resolve_timeout: Duration,
    /// Applied to connecting and to each read of a streamed download.
    pub download_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_path: DEFAULT_ACCESS_PATH.to_string(),
            user_agent: LEGACY_USER_AGENT.to_string(),
            resolve_timeout: Duration::from_secs(10),
            download_timeout: Duration::from_secs(20),
        }
    }
}

impl EngineConfig {
    /// Same settings, pointed at another origin (mock servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    #[default]
    Overwrite,
    Skip,
}

/// Per-batch options, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub download: bool,
    pub target_dir: PathBuf,
    pub naming: FolderNaming,
    pub report_progress: bool,
    pub overwrite: OverwritePolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            download: false,
            target_dir: PathBuf::from("."),
            naming: FolderNaming::None,
            report_progress: true,
            overwrite: OverwritePolicy::Overwrite,
        }
    }
}
