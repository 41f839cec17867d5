//! Stage request dispatch and result handling

use crate::api::ApiError;
use crate::error::WizardError;
use crate::wizard::{Completion, Orchestrator, RequestTicket, StagePayload, StageRequest};

use super::events::TuiEvent;
use super::state::{App, Notice};

impl App {
    /// Route one event
    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Paste(text) => self.handle_paste(&text),
            TuiEvent::Resize => {}
            TuiEvent::StageFinished { ticket, outcome } => {
                self.handle_stage_finished(ticket, outcome)
            }
        }
    }

    /// Run `request` on a background task; the result comes back as
    /// [`TuiEvent::StageFinished`]
    pub(super) fn dispatch(&mut self, request: StageRequest) {
        self.notice = None;
        self.spinner_frame = 0;

        let orchestrator = self.orchestrator.clone();
        let sender = self.event_sender();
        tokio::spawn(async move {
            let outcome = orchestrator.execute(&request.input).await;
            let _ = sender.send(TuiEvent::StageFinished {
                ticket: request.ticket,
                outcome,
            });
        });
    }

    pub(super) fn handle_stage_finished(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<StagePayload, ApiError>,
    ) {
        match Orchestrator::apply(&mut self.controller, ticket, outcome) {
            Completion::Advanced(stage) => {
                tracing::debug!("Now at {:?}", stage);
                self.reset_view();
            }
            // lastError is rendered from controller state
            Completion::Failed(_) => {}
            Completion::Stale => {}
        }
    }

    /// Surface a rejected action. Only busy rejections reach the user; request
    /// failures arrive through `last_error` instead.
    pub(super) fn report(&mut self, err: WizardError) {
        match err {
            WizardError::Busy => {
                self.notice = Some(Notice::info("Please wait for the current request to finish"));
            }
            WizardError::Validation => {
                tracing::debug!("Ignoring empty seed keyword");
            }
            other => {
                tracing::warn!("UI out of sync with wizard: {}", other);
            }
        }
    }
}
