use std::fmt;
use std::str::FromStr;

use crate::sanitize::sanitize_name;

/// How downloaded files are grouped into sub-folders of the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderNaming {
    /// Files go straight into the target directory (`n`).
    #[default]
    None,
    /// `{code}-{title}` (`ct`).
    CodeTitle,
    /// `{code}` (`c`).
    Code,
    /// `{title}` (`t`).
    Title,
    /// `{title}-{code}` (`tc`).
    TitleCode,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown folder format '{0}' (expected one of n, ct, c, t, tc)")]
pub struct ParseNamingError(pub String);

impl FolderNaming {
    pub const ALL: [FolderNaming; 5] = [
        FolderNaming::None,
        FolderNaming::CodeTitle,
        FolderNaming::Code,
        FolderNaming::Title,
        FolderNaming::TitleCode,
    ];

    /// Short key used on the command line and in settings files.
    pub fn key(self) -> &'static str {
        match self {
            FolderNaming::None => "n",
            FolderNaming::CodeTitle => "ct",
            FolderNaming::Code => "c",
            FolderNaming::Title => "t",
            FolderNaming::TitleCode => "tc",
        }
    }

    /// Sanitized sub-folder name for `(code, title)`, or `None` when files
    /// belong directly in the target directory.
    ///
    /// A template that sanitizes to an empty string also yields `None`.
    pub fn subfolder(self, code: &str, title: &str) -> Option<String> {
        let raw = match self {
            FolderNaming::None => return None,
            FolderNaming::CodeTitle => format!("{code}-{title}"),
            FolderNaming::Code => code.to_string(),
            FolderNaming::Title => title.to_string(),
            FolderNaming::TitleCode => format!("{title}-{code}"),
        };
        let safe = sanitize_name(&raw);
        (!safe.is_empty()).then_some(safe)
    }
}

impl FromStr for FolderNaming {
    type Err = ParseNamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        FolderNaming::ALL
            .into_iter()
            .find(|naming| naming.key() == key)
            .ok_or_else(|| ParseNamingError(s.to_string()))
    }
}

impl fmt::Display for FolderNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
