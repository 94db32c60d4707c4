//! Display strings keyed by message id, in the two supported locales.
//!
//! The pipeline never sees these; front ends turn [`PipelineEvent`]s into text
//! with [`render_event`].

use std::fmt;
use std::str::FromStr;

use crate::event::{BatchSummary, PipelineEvent};
use crate::naming::FolderNaming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}' (expected en or zh)")]
pub struct ParseLocaleError(pub String);

impl Locale {
    /// Picks the locale from a POSIX `LANG`-style value: Simplified Chinese
    /// regions (`zh_CN`, `zh_SG`) select Chinese, anything else English.
    pub fn from_env_lang(lang: Option<&str>) -> Self {
        match lang {
            Some(value) => {
                let lower = value.to_ascii_lowercase();
                if lower.starts_with("zh_cn") || lower.starts_with("zh_sg") {
                    Locale::Zh
                } else {
                    Locale::En
                }
            }
            None => Locale::En,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    AppTitle,
    CodesLabel,
    TargetDirLabel,
    FolderFormatLabel,
    SilentLabel,
    LanguageLabel,
    GetUrlsButton,
    DownloadButton,
    InteractiveHelp,
    EnterCode,
    Busy,
    InvalidCode,
    NoLinks,
    NoTitle,
    RequestError,
    DownloadFailed,
    DownloadComplete,
    DownloadSkipped,
    ProgressLabel,
    Summary,
    OptionsChanged,
    FolderNone,
    FolderCodeTitle,
    FolderCode,
    FolderTitle,
    FolderTitleCode,
}

/// Separator line between two codes' output blocks.
pub const SEPARATOR: &str = "--------";

/// Raw template for `id`. Placeholders look like `{name}`.
pub fn text(locale: Locale, id: MessageId) -> &'static str {
    let (en, zh) = entry(id);
    match locale {
        Locale::En => en,
        Locale::Zh => zh,
    }
}

/// Template for `id` with each `{name}` placeholder replaced by its value.
pub fn format(locale: Locale, id: MessageId, args: &[(&str, &str)]) -> String {
    let mut out = text(locale, id).to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

fn entry(id: MessageId) -> (&'static str, &'static str) {
    match id {
        MessageId::AppTitle => ("SHEDU Audio Downloader", "上海中小学教材配套音频下载工具"),
        MessageId::CodesLabel => ("Codes:", "提取码:"),
        MessageId::TargetDirLabel => ("Target Dir:", "目标文件夹:"),
        MessageId::FolderFormatLabel => ("Sort into folders:", "按照文件夹分类:"),
        MessageId::SilentLabel => ("Hide download progress", "隐藏下载进度"),
        MessageId::LanguageLabel => ("Language:", "语言:"),
        MessageId::GetUrlsButton => ("Get URLs", "获取网址"),
        MessageId::DownloadButton => ("Get & Download", "获取并下载"),
        MessageId::InteractiveHelp => (
            "Type codes (comma/space/newline separated), then :get or :download. \
             Options: :dir PATH, :format n|ct|c|t|tc, :silent on|off, :lang en|zh, :clear, :help, :quit",
            "输入提取码(以逗号、空格或换行分隔), 然后输入 :get 或 :download。\
             选项: :dir 路径, :format n|ct|c|t|tc, :silent on|off, :lang en|zh, :clear, :help, :quit",
        ),
        MessageId::EnterCode => ("Please enter at least one code.", "请输入至少一个提取码。"),
        MessageId::Busy => (
            "A batch is already running; please wait for it to finish.",
            "任务正在运行, 请等待完成。",
        ),
        MessageId::InvalidCode => (
            "Warning: '{code}' is not a valid 8-digit number. Skipping.",
            "警告: '{code}' 不是一个有效的8位数字。已跳过。",
        ),
        MessageId::NoLinks => (
            "No .shtml links found for this code.",
            "未能为此提取码找到 .shtml 链接。",
        ),
        MessageId::NoTitle => ("No title found", "未找到标题"),
        MessageId::RequestError => (
            "An error occurred for code {code}: {e}",
            "处理提取码 {code} 时发生错误: {e}",
        ),
        MessageId::DownloadFailed => ("  -> Download failed: {e}", "  -> 下载失败: {e}"),
        MessageId::DownloadComplete => (" ✔️ Download complete: {filename}", " ✔️ 下载完成: {filename}"),
        MessageId::DownloadSkipped => (
            "  -> Already exists, skipped: {filename}",
            "  -> 文件已存在, 已跳过: {filename}",
        ),
        MessageId::ProgressLabel => ("Downloading: {filename}", "正在下载: {filename}"),
        MessageId::Summary => (
            "Done: {resolved} resolved, {invalid} invalid, {failed} failed, {written} saved, {skipped} skipped, {file_errors} download errors.",
            "完成: 已解析 {resolved} 个, 无效 {invalid} 个, 失败 {failed} 个, 已保存 {written} 个, 已跳过 {skipped} 个, 下载错误 {file_errors} 个。",
        ),
        MessageId::OptionsChanged => (
            "Target: {dir} | Folders: {format} | Hide progress: {silent} | Language: {lang}",
            "目标: {dir} | 分类: {format} | 隐藏进度: {silent} | 语言: {lang}",
        ),
        MessageId::FolderNone => ("No sub-folder (default)", "不进行分类 (默认)"),
        MessageId::FolderCodeTitle => ("{code}-{title}", "{提取码}-{标题}"),
        MessageId::FolderCode => ("{code}", "{提取码}"),
        MessageId::FolderTitle => ("{title}", "{标题}"),
        MessageId::FolderTitleCode => ("{title}-{code}", "{标题}-{提取码}"),
    }
}

/// Display label of a folder naming choice.
pub fn folder_label(locale: Locale, naming: FolderNaming) -> &'static str {
    let id = match naming {
        FolderNaming::None => MessageId::FolderNone,
        FolderNaming::CodeTitle => MessageId::FolderCodeTitle,
        FolderNaming::Code => MessageId::FolderCode,
        FolderNaming::Title => MessageId::FolderTitle,
        FolderNaming::TitleCode => MessageId::FolderTitleCode,
    };
    text(locale, id)
}

/// Colour class of a rendered log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Title,
    Url,
    Warning,
    Error,
    Separator,
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Renders an event into zero or more log lines.
///
/// Progress events produce no lines; they drive a progress indicator instead.
pub fn render_event(locale: Locale, event: &PipelineEvent) -> Vec<LogLine> {
    match event {
        PipelineEvent::InvalidCode { token } => vec![LogLine::new(
            LogKind::Warning,
            format(locale, MessageId::InvalidCode, &[("code", token.as_str())]),
        )],
        PipelineEvent::Resolved { code, title } => {
            let title = title
                .as_deref()
                .unwrap_or_else(|| text(locale, MessageId::NoTitle));
            vec![
                LogLine::new(LogKind::Title, code.clone()),
                LogLine::new(LogKind::Title, title),
            ]
        }
        PipelineEvent::Link { url, .. } => vec![LogLine::new(LogKind::Url, url.clone())],
        PipelineEvent::NoLinks { .. } => {
            vec![LogLine::new(LogKind::Warning, text(locale, MessageId::NoLinks))]
        }
        PipelineEvent::ResolveFailed { code, cause } => vec![LogLine::new(
            LogKind::Error,
            format(locale, MessageId::RequestError, &[("code", code.as_str()), ("e", cause.as_str())]),
        )],
        PipelineEvent::Progress(_) => Vec::new(),
        PipelineEvent::DownloadComplete { filename, .. } => vec![LogLine::new(
            LogKind::Log,
            format(locale, MessageId::DownloadComplete, &[("filename", filename.as_str())]),
        )],
        PipelineEvent::DownloadSkipped { filename, .. } => vec![LogLine::new(
            LogKind::Warning,
            format(locale, MessageId::DownloadSkipped, &[("filename", filename.as_str())]),
        )],
        PipelineEvent::DownloadFailed { cause, .. } => vec![LogLine::new(
            LogKind::Error,
            format(locale, MessageId::DownloadFailed, &[("e", cause.as_str())]),
        )],
        PipelineEvent::Separator => vec![LogLine::new(LogKind::Separator, SEPARATOR)],
        PipelineEvent::Finished { summary } => {
            vec![LogLine::new(LogKind::Log, render_summary(locale, summary))]
        }
    }
}

pub fn render_summary(locale: Locale, summary: &BatchSummary) -> String {
    let resolved = summary.codes_resolved.to_string();
    let invalid = summary.codes_invalid.to_string();
    let failed = summary.codes_failed.to_string();
    let written = summary.files_written.to_string();
    let skipped = summary.files_skipped.to_string();
    let file_errors = summary.files_failed.to_string();
    format(
        locale,
        MessageId::Summary,
        &[
            ("resolved", resolved.as_str()),
            ("invalid", invalid.as_str()),
            ("failed", failed.as_str()),
            ("written", written.as_str()),
            ("skipped", skipped.as_str()),
            ("file_errors", file_errors.as_str()),
        ],
    )
}
