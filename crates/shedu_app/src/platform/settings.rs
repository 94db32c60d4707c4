//! Optional RON settings file with endpoint overrides and front-end defaults.
//!
//! Looked up at `./shedu_audio.ron` unless `--config` names another file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use shedu_core::{FolderNaming, Locale};
use shedu_engine::{
    EngineConfig, OverwritePolicy, DEFAULT_ACCESS_PATH, DEFAULT_BASE_URL, LEGACY_USER_AGENT,
};

pub const DEFAULT_SETTINGS_FILENAME: &str = "shedu_audio.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub base_url: String,
    pub access_path: String,
    pub user_agent: String,
    pub resolve_timeout_secs: u64,
    pub download_timeout_secs: u64,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_path: DEFAULT_ACCESS_PATH.to_string(),
            user_agent: LEGACY_USER_AGENT.to_string(),
            resolve_timeout_secs: 10,
            download_timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub endpoint: EndpointSettings,
    pub target_dir: PathBuf,
    /// One of `n`, `ct`, `c`, `t`, `tc`.
    pub folder_format: String,
    pub silent: bool,
    /// `en` or `zh`; unset means "follow the environment".
    pub language: Option<String>,
    pub no_clobber: bool,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: EndpointSettings::default(),
            target_dir: PathBuf::from("."),
            folder_format: FolderNaming::None.key().to_string(),
            silent: false,
            language: None,
            no_clobber: false,
            log_level: None,
        }
    }
}

impl AppSettings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            base_url: self.endpoint.base_url.clone(),
            access_path: self.endpoint.access_path.clone(),
            user_agent: self.endpoint.user_agent.clone(),
            resolve_timeout: Duration::from_secs(self.endpoint.resolve_timeout_secs),
            download_timeout: Duration::from_secs(self.endpoint.download_timeout_secs),
        }
    }

    pub fn folder_naming(&self) -> FolderNaming {
        match self.folder_format.parse() {
            Ok(naming) => naming,
            Err(err) => {
                engine_warn!("Ignoring folder_format in settings: {}", err);
                FolderNaming::None
            }
        }
    }

    pub fn locale(&self) -> Option<Locale> {
        let raw = self.language.as_deref()?;
        match raw.parse() {
            Ok(locale) => Some(locale),
            Err(err) => {
                engine_warn!("Ignoring language in settings: {}", err);
                None
            }
        }
    }

    pub fn log_level(&self) -> Option<LevelFilter> {
        let raw = self.log_level.as_deref()?;
        let level = engine_logging::parse_level(raw);
        if level.is_none() {
            engine_warn!("Ignoring log_level in settings: unknown level '{}'", raw);
        }
        level
    }

    pub fn overwrite_policy(&self) -> OverwritePolicy {
        if self.no_clobber {
            OverwritePolicy::Skip
        } else {
            OverwritePolicy::Overwrite
        }
    }
}

/// Loads settings. A file named explicitly must exist and parse; the default
/// file is optional and a broken one is reported and ignored.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<AppSettings> {
    if let Some(path) = explicit {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings = ron::from_str(&content)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        engine_info!("Loaded settings from {:?}", path);
        return Ok(settings);
    }

    let path = PathBuf::from(DEFAULT_SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppSettings::default());
        }
        Err(err) => {
            engine_warn!("Failed to read settings from {:?}: {}", path, err);
            return Ok(AppSettings::default());
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            engine_info!("Loaded settings from {:?}", path);
            Ok(settings)
        }
        Err(err) => {
            engine_warn!("Failed to parse settings from {:?}: {}", path, err);
            Ok(AppSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("s.ron");
        fs::write(
            &path,
            r#"(folder_format: "ct", no_clobber: true, log_level: Some("debug"), endpoint: (download_timeout_secs: 60))"#,
        )
        .unwrap();

        let settings = load(Some(&path)).unwrap();
        assert_eq!(settings.folder_naming(), FolderNaming::CodeTitle);
        assert_eq!(settings.overwrite_policy(), OverwritePolicy::Skip);
        assert_eq!(settings.log_level(), Some(LevelFilter::Debug));
        let config = settings.engine_config();
        assert_eq!(config.download_timeout, Duration::from_secs(60));
        assert_eq!(config.resolve_timeout, Duration::from_secs(10));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn explicit_file_must_parse() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ron");
        fs::write(&path, "(folder_format: ").unwrap();
        assert!(load(Some(&path)).is_err());
        assert!(load(Some(&temp.path().join("missing.ron"))).is_err());
    }

    #[test]
    fn bad_values_fall_back() {
        let settings = AppSettings {
            folder_format: "zz".into(),
            language: Some("fr".into()),
            log_level: Some("chatty".into()),
            ..AppSettings::default()
        };
        assert_eq!(settings.folder_naming(), FolderNaming::None);
        assert_eq!(settings.locale(), None);
        assert_eq!(settings.log_level(), None);
    }

    #[test]
    fn settings_round_trip_through_ron() {
        let settings = AppSettings {
            language: Some("zh".into()),
            ..AppSettings::default()
        };
        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::new()).unwrap();
        let back: AppSettings = ron::from_str(&text).unwrap();
        assert_eq!(back, settings);
        assert_eq!(back.locale(), Some(Locale::Zh));
    }
}
