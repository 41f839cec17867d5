use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures talking to the content backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any non-2xx response
    #[error("backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Timeout(_) => "timeout",
            Self::InvalidBaseUrl(_) => "config",
        }
    }
}
