//! Wire types for the content backend. Field names follow the backend's JSON.

use serde::{Deserialize, Serialize};

pub use crate::wizard::GeneratedContent;

/// `POST /api/keyword` and `POST /api/title`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordRequest {
    pub keyword: String,
}

/// `POST /api/topic`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleRequest {
    pub title: String,
}

/// `POST /api/content`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRequest {
    pub topic: String,
}

/// Newline-delimited candidates returned by the keyword, title and topic endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidatesResponse {
    pub result: String,
}

/// Endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const KEYWORD: &str = "/api/keyword";
    pub const TITLE: &str = "/api/title";
    pub const TOPIC: &str = "/api/topic";
    pub const CONTENT: &str = "/api/content";
}
