//! Async content backend client

use super::error::{ApiError, Result};
use super::types::*;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// The four generation endpoints.
///
/// The candidate endpoints hand back the raw newline-delimited `result` text;
/// splitting it is the orchestrator's job.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Related keyword candidates for a seed keyword
    async fn generate_keywords(&self, keyword: &str) -> Result<String>;

    /// Title candidates for a keyword
    async fn generate_titles(&self, keyword: &str) -> Result<String>;

    /// Topic candidates for a title
    async fn generate_topics(&self, title: &str) -> Result<String>;

    /// Full article and SEO score for a topic
    async fn generate_content(&self, topic: &str) -> Result<GeneratedContent>;
}

/// reqwest-backed [`ContentApi`]
#[derive(Clone)]
pub struct HttpContentApi {
    base_url: String,
    client: Client,
}

impl HttpContentApi {
    /// Create a client with default timeouts
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeouts(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .pool_idle_timeout(DEFAULT_POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!("POST {} returned {}", path, status);
            return Err(ApiError::Status { status, body });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn candidates<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        let resp: CandidatesResponse = self.post(path, body).await?;
        Ok(resp.result)
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn generate_keywords(&self, keyword: &str) -> Result<String> {
        let body = KeywordRequest {
            keyword: keyword.to_string(),
        };
        self.candidates(endpoints::KEYWORD, &body).await
    }

    async fn generate_titles(&self, keyword: &str) -> Result<String> {
        let body = KeywordRequest {
            keyword: keyword.to_string(),
        };
        self.candidates(endpoints::TITLE, &body).await
    }

    async fn generate_topics(&self, title: &str) -> Result<String> {
        let body = TitleRequest {
            title: title.to_string(),
        };
        self.candidates(endpoints::TOPIC, &body).await
    }

    async fn generate_content(&self, topic: &str) -> Result<GeneratedContent> {
        let body = TopicRequest {
            topic: topic.to_string(),
        };
        self.post(endpoints::CONTENT, &body).await
    }
}

/// Check the base URL parses as http(s) and drop any trailing slash
fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(ApiError::InvalidBaseUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/").unwrap(),
            "http://localhost:5000"
        );
        assert_eq!(
            normalize_base_url(" https://api.example.com ").unwrap(),
            "https://api.example.com"
        );
        assert!(matches!(
            normalize_base_url("localhost:5000"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }

    #[tokio::test]
    async fn test_generate_keywords_posts_seed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/keyword")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "keyword": "coffee" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result":"arabica\nrobusta\n"}"#)
            .create_async()
            .await;

        let api = HttpContentApi::new(&server.url()).unwrap();
        let text = api.generate_keywords("coffee").await.unwrap();

        assert_eq!(text, "arabica\nrobusta\n");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_titles_and_topics_use_their_endpoints() {
        let mut server = mockito::Server::new_async().await;
        let titles = server
            .mock("POST", "/api/title")
            .match_body(Matcher::Json(json!({ "keyword": "arabica" })))
            .with_status(200)
            .with_body(r#"{"result":"Top 5 Arabica Beans\n"}"#)
            .create_async()
            .await;
        let topics = server
            .mock("POST", "/api/topic")
            .match_body(Matcher::Json(json!({ "title": "Top 5 Arabica Beans" })))
            .with_status(200)
            .with_body(r#"{"result":"Origins\nRoasting"}"#)
            .create_async()
            .await;

        let api = HttpContentApi::new(&server.url()).unwrap();
        assert_eq!(
            api.generate_titles("arabica").await.unwrap(),
            "Top 5 Arabica Beans\n"
        );
        assert_eq!(
            api.generate_topics("Top 5 Arabica Beans").await.unwrap(),
            "Origins\nRoasting"
        );
        titles.assert_async().await;
        topics.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_content_decodes_score() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/content")
            .match_body(Matcher::Json(json!({ "topic": "Origins" })))
            .with_status(200)
            .with_body(r#"{"content":"Arabica grows high.","seoScore":87}"#)
            .create_async()
            .await;

        let api = HttpContentApi::new(&server.url()).unwrap();
        let generated = api.generate_content("Origins").await.unwrap();

        assert_eq!(generated.content, "Arabica grows high.");
        assert_eq!(generated.seo_score, 87);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/keyword")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let api = HttpContentApi::new(&server.url()).unwrap();
        let err = api.generate_keywords("coffee").await.unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/content")
            .with_status(200)
            .with_body(r#"{"content":"no score here"}"#)
            .create_async()
            .await;

        let api = HttpContentApi::new(&server.url()).unwrap();
        let err = api.generate_content("Origins").await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) is not expected to be listening
        let api = HttpContentApi::with_timeouts(
            "http://127.0.0.1:9",
            Duration::from_secs(2),
            Duration::from_secs(1),
        )
        .unwrap();
        let err = api.generate_keywords("coffee").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
