//! App Module: TUI application state and logic.

mod input;
mod requests;
mod state;

#[cfg(test)]
mod tests;

pub use state::*;

pub(crate) use super::events;
