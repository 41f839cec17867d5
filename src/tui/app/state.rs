//! App state
//!
//! Front-end state layered on top of the wizard controller: list cursors,
//! scroll offsets, transient notices and the event channel.

use crate::config::ExportConfig;
use std::cell::Cell;
use crate::wizard::{Orchestrator, Stage, WizardController};
use tokio::sync::mpsc;

use super::events::TuiEvent;

/// Braille spinner frames shown while a request is in flight
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Transient one-line message below the stage body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Main application state
pub struct App {
    pub controller: WizardController,
    pub(super) orchestrator: Orchestrator,
    pub(super) export_config: ExportConfig,

    /// Highlighted row in the current pick list
    pub option_cursor: usize,
    /// Scroll offset of the article body on the review stage
    pub content_scroll: u16,
    /// Width the article was last drawn at (0 before the first draw)
    pub(crate) review_width: Cell<u16>,
    pub show_history: bool,
    pub notice: Option<Notice>,
    pub spinner_frame: usize,
    pub should_quit: bool,

    event_tx: mpsc::UnboundedSender<TuiEvent>,
    event_rx: mpsc::UnboundedReceiver<TuiEvent>,
}

impl App {
    pub fn new(orchestrator: Orchestrator, export_config: ExportConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            controller: WizardController::new(),
            orchestrator,
            export_config,
            option_cursor: 0,
            content_scroll: 0,
            review_width: Cell::new(0),
            show_history: true,
            notice: None,
            spinner_frame: 0,
            should_quit: false,
            event_tx,
            event_rx,
        }
    }

    /// Sender for terminal listeners and request tasks
    pub fn event_sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.event_tx.clone()
    }

    /// Wait for the next event
    pub async fn next_event(&mut self) -> Option<TuiEvent> {
        self.event_rx.recv().await
    }

    /// Take an already-queued event without waiting
    pub fn try_next_event(&mut self) -> Option<TuiEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn stage(&self) -> Stage {
        self.controller.stage()
    }

    /// Advance the loading animation
    pub fn tick(&mut self) {
        if self.controller.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Put the list cursor on the current selection, or the first row
    pub(super) fn reset_view(&mut self) {
        let stage = self.controller.stage();
        let state = self.controller.state();
        self.option_cursor = state
            .selection_for(stage)
            .and_then(|picked| state.options_for(stage).iter().position(|o| o == picked))
            .unwrap_or(0);
        self.content_scroll = 0;
    }
}
