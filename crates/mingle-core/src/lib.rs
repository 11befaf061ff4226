// Public fallible APIs in this crate share one concrete error contract
// (`MingleError`). Repeating per-function `# Errors` boilerplate obscures
// behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod error;
pub(crate) mod locks;
pub mod models;
pub mod search;
pub mod session;
pub mod state;
pub mod tracker;

pub use client::Mingle;
pub use error::{MingleError, Result};
pub use models::{MatchOutcome, NextOutcome, Profile, ProfileField, SearchHit};
pub use session::{FormEvent, FormStep, ProfileDraft, SessionState};
