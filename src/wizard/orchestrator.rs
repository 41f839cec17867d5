//! Stage Request Orchestrator
//!
//! Turns a [`StageRequest`] into exactly one call on the [`ContentApi`], parses
//! the answer and hands it back to the controller.

use std::sync::Arc;
use std::time::Duration;

use super::controller::{Completion, WizardController};
use super::types::*;
use crate::api::{ApiError, ContentApi, HttpContentApi};
use crate::config::Config;

/// Upper bound on a single stage request, on top of the HTTP client's own timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Split a newline-delimited candidate list. Blank lines are dropped, order kept.
pub fn parse_candidates(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Issues stage requests against a [`ContentApi`]
#[derive(Clone)]
pub struct Orchestrator {
    api: Arc<dyn ContentApi>,
    timeout: Duration,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build an orchestrator over the HTTP backend described by `config`
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let api = HttpContentApi::with_timeouts(
            &config.api.base_url,
            config.api.timeout(),
            config.api.connect_timeout(),
        )?;
        tracing::info!("Content backend: {}", api.base_url());
        Ok(Self::new(Arc::new(api)).with_timeout(config.api.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Make the one outbound call for `input` and parse its response
    pub async fn execute(&self, input: &StageInput) -> Result<StagePayload, ApiError> {
        let call = async {
            match input {
                StageInput::Keywords { keyword } => self
                    .api
                    .generate_keywords(keyword)
                    .await
                    .map(|text| StagePayload::Candidates(parse_candidates(&text))),
                StageInput::Titles { keyword } => self
                    .api
                    .generate_titles(keyword)
                    .await
                    .map(|text| StagePayload::Candidates(parse_candidates(&text))),
                StageInput::Topics { title } => self
                    .api
                    .generate_topics(title)
                    .await
                    .map(|text| StagePayload::Candidates(parse_candidates(&text))),
                StageInput::Content { topic } => self
                    .api
                    .generate_content(topic)
                    .await
                    .map(StagePayload::Content),
            }
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.timeout)),
        }
    }

    /// Hand an outcome to the controller, translating failures into the
    /// stage's user-facing message. The underlying cause is only logged.
    pub fn apply(
        controller: &mut WizardController,
        ticket: RequestTicket,
        outcome: Result<StagePayload, ApiError>,
    ) -> Completion {
        let outcome = outcome.map_err(|e| {
            tracing::warn!(
                "Request #{} from {:?} failed ({}): {}",
                ticket.id,
                ticket.stage,
                e.kind(),
                e
            );
            ticket.stage.failure_message().to_string()
        });
        controller.complete(ticket, outcome)
    }

    /// Execute `request` and apply its outcome in one go
    pub async fn advance(
        &self,
        controller: &mut WizardController,
        request: StageRequest,
    ) -> Completion {
        let outcome = self.execute(&request.input).await;
        Self::apply(controller, request.ticket, outcome)
    }
}
