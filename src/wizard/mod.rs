//! Content Wizard
//!
//! Five-stage generation flow: seed keyword → keyword → title → topic → article.
//! The controller owns the state machine, the orchestrator runs the one request
//! each transition needs.

mod controller;
mod orchestrator;
mod types;


pub use controller::{Completion, WizardController};
pub use orchestrator::{DEFAULT_REQUEST_TIMEOUT, Orchestrator, parse_candidates};
pub use types::{
    GeneratedContent, HistoryEntry, PREVIEW_CHARS, RequestTicket, Stage, StageInput,
    StagePayload, StageRequest, WizardState,
};
