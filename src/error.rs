//! Error types
//!
//! Wizard-level and export-level errors. Transport errors live in [`crate::api::ApiError`]
//! and surface here only as [`WizardError::RequestFailure`].

use crate::wizard::Stage;
use thiserror::Error;

/// Errors raised by the wizard controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// Empty or whitespace-only seed keyword. Rejected before any request is made.
    #[error("seed keyword must not be empty")]
    Validation,

    /// An action for one stage was attempted while the wizard sits on another.
    #[error("action for stage {expected:?} attempted while wizard is at {actual:?}")]
    InvalidStage { expected: Stage, actual: Stage },

    /// A request is already in flight.
    #[error("a request is already in progress, please wait")]
    Busy,

    /// The remote call for a stage failed (transport, non-2xx, decode or timeout).
    #[error("{message}")]
    RequestFailure { stage: Stage, message: String },

    /// The payload handed to the controller does not fit the stage it completes.
    #[error("unexpected payload for stage {stage:?}")]
    UnexpectedPayload { stage: Stage },
}

/// Errors raised by the content export collaborators.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no generated content to export")]
    NothingToExport,

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}
