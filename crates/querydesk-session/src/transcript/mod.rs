//! Append-only transcript of exchanges.
//!
//! The store is the single source of truth for what is rendered. Exchanges
//! are immutable once appended and are handed out as shared snapshots.

mod store;
mod types;


pub use store::{TranscriptSnapshot, TranscriptStore};
pub use types::{Entry, Exchange, ExchangeId, Role};
