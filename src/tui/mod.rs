//! Terminal UI
//!
//! Ratatui front end for the wizard: a stepper across the top, the current
//! stage in the middle and the generated-article history alongside.

pub mod app;
pub mod events;
mod render;
pub mod runner;

pub use app::App;
pub use runner::run;
