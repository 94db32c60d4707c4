use crate::FolderNaming;

/// Everything the engine needs to run one batch on behalf of the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub tokens: Vec<String>,
    pub download: bool,
    pub target_dir: String,
    pub naming: FolderNaming,
    pub report_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartBatch(BatchRequest),
}
