//! Blogwriter - Guided AI Blog Writer
//!
//! A step-by-step content generation wizard for the terminal. Starting from a single
//! seed keyword, each stage asks the content backend for candidates and lets you pick
//! one before moving on:
//!
//! - **Keyword:** expand the seed into related keyword candidates
//! - **Title:** turn the chosen keyword into article titles
//! - **Topic:** break the chosen title into topic angles
//! - **Content:** write the full article for the chosen topic, with an SEO score
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive mode
//! blogwriter
//!
//! # Non-interactive mode (first option at every stage)
//! blogwriter run "coffee"
//!
//! # Pick the second title, write markdown to a file
//! blogwriter run "coffee" --title 2 --format markdown --output post.md
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod tui;
pub mod wizard;

// Re-export commonly used types
pub use error::{ExportError, WizardError};
pub use wizard::{Orchestrator, Stage, WizardController, WizardState};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
