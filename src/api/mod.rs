//! Content API
//!
//! The four remote operations the wizard drives, and the reqwest-backed client
//! that talks to the content backend over JSON.

mod client;
pub mod error;
pub mod types;

pub use client::{ContentApi, HttpContentApi};
pub use error::{ApiError, Result};
pub use types::*;
