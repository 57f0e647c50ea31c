use std::{collections::HashMap, fs, path::PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub timeline_path: Option<PathBuf>,
    pub app_name: String,
    pub env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8000".into(),
            timeline_path: None,
            app_name: "Music Rewind API".into(),
            env: "dev".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("timeline_path") {
                settings.timeline_path = Some(PathBuf::from(v));
            }
            if let Some(v) = file_cfg.get("app_name") {
                settings.app_name = v.clone();
            }
            if let Some(v) = file_cfg.get("env") {
                settings.env = v.clone();
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("TIMELINE_PATH") {
        settings.timeline_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__TIMELINE_PATH") {
        settings.timeline_path = Some(PathBuf::from(v));
    }

    for key in ["APP_NAME", "APP__APP_NAME"] {
        if let Some(v) = env(key).filter(|v| !v.is_empty()) {
            settings.app_name = v;
        }
    }
    for key in ["ENV", "APP__ENV"] {
        if let Some(v) = env(key).filter(|v| !v.is_empty()) {
            settings.env = v;
        }
    }

    settings.timeline_path = settings
        .timeline_path
        .filter(|path| !path.as_os_str().is_empty());

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
