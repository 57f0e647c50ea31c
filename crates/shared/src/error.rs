use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
}

/// JSON error body returned by the timeline server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TimelineQueryError {
    #[error("year must be an integer, got '{0}'")]
    InvalidYear(String),
}

impl TimelineQueryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidYear(_) => ErrorCode::Validation,
        }
    }
}

impl From<TimelineQueryError> for ApiError {
    fn from(value: TimelineQueryError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}
