use thiserror::Error;

use crate::copy;

/// Why a timeline fetch did not produce a payload.
///
/// Every variant degrades to the same `ViewState::Error` copy; the variant
/// itself only reaches logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("timeline request failed: {0}")]
    Transport(String),
    #[error("timeline request returned status {0}")]
    Status(u16),
    #[error("timeline payload is malformed: {0}")]
    MalformedPayload(String),
    #[error("API base URL not configured")]
    Unconfigured,
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorCategory {
    Transport,
    Payload,
    Configuration,
}

impl FetchError {
    pub fn category(&self) -> FetchErrorCategory {
        match self {
            Self::Transport(_) | Self::Status(_) => FetchErrorCategory::Transport,
            Self::MalformedPayload(_) => FetchErrorCategory::Payload,
            Self::Unconfigured | Self::InvalidBaseUrl(_) => FetchErrorCategory::Configuration,
        }
    }

    /// Stable, user-safe text for the error view.
    pub fn user_message(&self) -> &'static str {
        copy::ERROR_TITLE
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        if let Some(status) = value.status() {
            Self::Status(status.as_u16())
        } else if value.is_decode() {
            Self::MalformedPayload(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedPayload(value.to_string())
    }
}
