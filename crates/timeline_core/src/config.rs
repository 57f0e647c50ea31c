use std::{fs, path::Path, time::Duration};

use url::Url;

use crate::{error::FetchError, sequencer::DEFAULT_STAGGER_MS};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
pub const SETTINGS_FILE: &str = "rewind.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: Option<String>,
    pub stagger_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_BASE_URL.into()),
            stagger_ms: DEFAULT_STAGGER_MS,
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    /// Parsed API base. Unset or blank is reported as unconfigured rather
    /// than falling back to a guess.
    pub fn api_base(&self) -> Result<Url, FetchError> {
        let raw = self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(FetchError::Unconfigured)?;
        Url::parse(raw).map_err(|e| FetchError::InvalidBaseUrl(format!("'{raw}': {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file, then environment. Values that do not parse
/// are skipped and the previous layer wins.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<toml::Table>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url").and_then(toml::Value::as_str) {
                    settings.api_base_url = Some(v.to_string());
                }
                if let Some(v) = file_cfg.get("stagger_ms").and_then(toml::Value::as_integer) {
                    if let Ok(v) = u64::try_from(v) {
                        settings.stagger_ms = v;
                    }
                }
                if let Some(v) = file_cfg
                    .get("request_timeout_secs")
                    .and_then(toml::Value::as_integer)
                {
                    match u64::try_from(v) {
                        Ok(v) if v > 0 => settings.request_timeout_secs = v,
                        _ => tracing::warn!(value = v, "ignoring invalid request_timeout_secs"),
                    }
                }
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("REWIND_API_URL") {
        settings.api_base_url = Some(v);
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = Some(v);
    }

    if let Some(v) = env("APP__STAGGER_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.stagger_ms = parsed;
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) if parsed > 0 => settings.request_timeout_secs = parsed,
            _ => tracing::warn!(value = %v, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
