//! Wizard Controller
//!
//! Owns the active stage and every stage-scoped field. All mutations go through
//! here so the cascading reset and single-flight rules hold no matter which front
//! end drives the wizard.

use chrono::Utc;
use uuid::Uuid;

use super::types::*;
use crate::error::WizardError;

/// What happened when a request result was handed back to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Result applied, wizard moved to this stage
    Advanced(Stage),
    /// Request failed, wizard stayed put with this message in `last_error`
    Failed(String),
    /// Result belonged to an abandoned request and was dropped
    Stale,
}

/// Single-session wizard state machine
#[derive(Debug, Default)]
pub struct WizardController {
    state: WizardState,
    history: Vec<HistoryEntry>,
    next_request_id: u64,
    in_flight: Option<RequestTicket>,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_loading
    }

    /// Ticket of the request currently awaited, if any
    pub fn in_flight(&self) -> Option<RequestTicket> {
        self.in_flight
    }

    /// Options of the current stage
    pub fn current_options(&self) -> &[String] {
        self.state.options_for(self.state.stage)
    }

    fn ensure_idle(&self) -> Result<(), WizardError> {
        if self.state.is_loading {
            tracing::debug!("Rejected action while request in flight");
            return Err(WizardError::Busy);
        }
        Ok(())
    }

    fn ensure_stage(&self, expected: Stage) -> Result<(), WizardError> {
        if self.state.stage != expected {
            return Err(WizardError::InvalidStage {
                expected,
                actual: self.state.stage,
            });
        }
        Ok(())
    }

    /// Replace the seed keyword while still on the first stage.
    /// Everything downstream of the seed is invalidated.
    pub fn edit_seed(&mut self, text: impl Into<String>) -> Result<(), WizardError> {
        self.ensure_idle()?;
        self.ensure_stage(Stage::SeedInput)?;

        self.state.seed_keyword = text.into();
        self.state.clear_after(Stage::SeedInput);
        self.state.last_error = None;
        Ok(())
    }

    /// Submit the seed keyword and issue the keyword request
    pub fn submit_seed(&mut self, keyword: &str) -> Result<StageRequest, WizardError> {
        self.ensure_idle()?;
        self.ensure_stage(Stage::SeedInput)?;

        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(WizardError::Validation);
        }

        self.state.seed_keyword = keyword.to_string();
        self.state.clear_after(Stage::SeedInput);

        Ok(self.issue(StageInput::Keywords {
            keyword: keyword.to_string(),
        }))
    }

    /// Pick `value` on `stage` and issue the request for the following stage.
    ///
    /// Only the three pick-list stages accept a selection; anything else, or a
    /// stage other than the current one, is an [`WizardError::InvalidStage`].
    pub fn select_option(&mut self, stage: Stage, value: &str) -> Result<StageRequest, WizardError> {
        self.ensure_idle()?;
        self.ensure_stage(stage)?;

        let value = value.to_string();
        let input = match stage {
            Stage::SelectKeyword => {
                self.state.selected_keyword = Some(value.clone());
                StageInput::Titles { keyword: value }
            }
            Stage::SelectTitle => {
                self.state.selected_title = Some(value.clone());
                StageInput::Topics { title: value }
            }
            Stage::SelectTopic => {
                self.state.selected_topic = Some(value.clone());
                StageInput::Content { topic: value }
            }
            Stage::SeedInput | Stage::ReviewContent => {
                return Err(WizardError::InvalidStage {
                    expected: stage,
                    actual: self.state.stage,
                });
            }
        };
        self.state.clear_after(stage);

        Ok(self.issue(input))
    }

    fn issue(&mut self, input: StageInput) -> StageRequest {
        self.next_request_id += 1;
        let ticket = RequestTicket {
            id: self.next_request_id,
            stage: self.state.stage,
        };

        self.state.last_error = None;
        self.state.is_loading = true;
        self.in_flight = Some(ticket);

        tracing::info!("Issuing request #{} from {:?}", ticket.id, ticket.stage);
        StageRequest { ticket, input }
    }

    /// Store the result of the request issued from `stage` and advance one stage
    pub fn record_success(
        &mut self,
        stage: Stage,
        payload: StagePayload,
    ) -> Result<Stage, WizardError> {
        self.ensure_stage(stage)?;
        let next = stage
            .next()
            .ok_or(WizardError::UnexpectedPayload { stage })?;

        match (next, payload) {
            (Stage::SelectKeyword, StagePayload::Candidates(options)) => {
                self.state.keyword_options = options;
            }
            (Stage::SelectTitle, StagePayload::Candidates(options)) => {
                self.state.title_options = options;
            }
            (Stage::SelectTopic, StagePayload::Candidates(options)) => {
                self.state.topic_options = options;
            }
            (Stage::ReviewContent, StagePayload::Content(generated)) => {
                if generated.seo_score > 100 {
                    tracing::warn!(
                        "SEO score {} is outside 0-100, keeping it as returned",
                        generated.seo_score
                    );
                }
                self.state.content = Some(generated.content);
                self.state.seo_score = Some(generated.seo_score);
            }
            _ => return Err(WizardError::UnexpectedPayload { stage }),
        }

        self.state.stage = next;
        self.state.clear_after(next);
        self.state.last_error = None;
        self.state.is_loading = false;
        self.in_flight = None;

        if next == Stage::ReviewContent {
            let entry = self.snapshot();
            self.append_history(entry);
        }

        tracing::debug!("[record_success] {:?} → {:?}", stage, next);
        Ok(next)
    }

    /// Keep the wizard on `stage` and surface `message`
    pub fn record_failure(
        &mut self,
        stage: Stage,
        message: impl Into<String>,
    ) -> Result<(), WizardError> {
        self.ensure_stage(stage)?;

        self.state.last_error = Some(message.into());
        self.state.is_loading = false;
        self.in_flight = None;
        Ok(())
    }

    /// Apply the outcome of a ticketed request. Outcomes for any ticket other
    /// than the one in flight are dropped untouched.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<StagePayload, String>,
    ) -> Completion {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                "Dropping stale result for request #{} (in flight: {:?})",
                ticket.id,
                self.in_flight.map(|t| t.id)
            );
            return Completion::Stale;
        }

        let message = match outcome {
            Ok(payload) => match self.record_success(ticket.stage, payload) {
                Ok(next) => return Completion::Advanced(next),
                Err(e) => {
                    tracing::warn!("Could not apply result for request #{}: {}", ticket.id, e);
                    ticket.stage.failure_message().to_string()
                }
            },
            Err(message) => message,
        };

        // The ticket matched, so the stage is the one it was issued from
        let _ = self.record_failure(ticket.stage, message.clone());
        Completion::Failed(message)
    }

    /// Append a finished generation to the session history
    pub fn append_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            seed_keyword: self.state.seed_keyword.clone(),
            selected_keyword: self.state.selected_keyword.clone().unwrap_or_default(),
            selected_title: self.state.selected_title.clone().unwrap_or_default(),
            selected_topic: self.state.selected_topic.clone().unwrap_or_default(),
            content: self.state.content.clone().unwrap_or_default(),
            seo_score: self.state.seo_score.unwrap_or_default(),
        }
    }

    /// Return to `target` (current stage or earlier), clearing everything owned
    /// by later stages. A pending request is abandoned.
    pub fn go_back(&mut self, target: Stage) -> Result<(), WizardError> {
        if target > self.state.stage {
            return Err(WizardError::InvalidStage {
                expected: target,
                actual: self.state.stage,
            });
        }

        if let Some(ticket) = self.in_flight.take() {
            tracing::info!("Abandoning request #{} on reset to {:?}", ticket.id, target);
            self.state.is_loading = false;
        }

        tracing::debug!("[go_back] {:?} → {:?}", self.state.stage, target);
        self.state.stage = target;
        self.state.clear_after(target);
        self.state.last_error = None;
        Ok(())
    }

    /// Go back one stage. Returns `false` when already on the first stage.
    pub fn go_back_one(&mut self) -> bool {
        match self.state.stage.prev() {
            Some(prev) => self.go_back(prev).is_ok(),
            None => false,
        }
    }

    /// Start over with an empty seed. History is kept.
    pub fn restart(&mut self) {
        // SeedInput is never later than the current stage
        let _ = self.go_back(Stage::SeedInput);
        self.state.seed_keyword.clear();
    }
}
