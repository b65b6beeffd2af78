//! Query session: the submit → request → parse → append cycle.
//!
//! `SessionState` is the per-mount state (transcript, in-flight flag,
//! composer draft). `QuerySession` is its only writer and enforces
//! one request in flight at a time, which keeps every User/Bot pair
//! adjacent in the transcript.

mod manager;
mod state;
mod submit;
mod types;

#[cfg(test)]
mod tests;

pub use manager::QuerySession;
pub use state::SessionState;
pub use types::{RejectReason, SessionPhase, SubmitOutcome};
