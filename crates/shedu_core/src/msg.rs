use crate::{FolderNaming, Locale, PipelineEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the codes input box.
    InputChanged(String),
    /// User picked a new target directory.
    TargetDirChanged(String),
    /// User picked a folder naming format.
    FolderNamingSelected(FolderNaming),
    /// User toggled "hide download progress".
    SilentToggled(bool),
    /// User switched the display language.
    LocaleSelected(Locale),
    /// User clicked "Get URLs" (`download == false`) or "Get & Download".
    StartClicked { download: bool },
    /// User cleared the log.
    ClearLogClicked,
    /// User asked for the usage hint.
    HelpRequested,
    /// User asked to close the front end.
    QuitRequested,
    /// Event forwarded from the pipeline worker.
    Pipeline(PipelineEvent),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
