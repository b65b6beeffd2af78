//! Query-session pipeline for QueryDesk.
//!
//! Turns a submitted query into an ordered transcript of exchanges:
//! - `TranscriptStore`: append-only exchange log with copy-on-read snapshots
//! - `parser`: normalizes plain-text or JSON backend replies into `RenderableResult`
//! - `QuerySession`: the submit → request → parse → append state machine
//! - `HttpBackend`: reqwest transport for queries and connection registration

pub mod connection;
pub mod http;
pub mod loading;
pub mod parser;
pub mod result;
pub mod session;
pub mod transcript;

use async_trait::async_trait;

pub use connection::{ConnectionError, ConnectionForm, ConnectionHandle, FieldError, FormErrors};
pub use http::{HttpBackend, HttpConfig};
pub use loading::LoadingIndicator;
pub use result::{
    Cell, ExchangeError, FailureCause, RenderableResult, StructuredResult, Table, TableError,
};
pub use session::{QuerySession, RejectReason, SessionPhase, SessionState, SubmitOutcome};
pub use transcript::{Entry, Exchange, ExchangeId, Role, TranscriptSnapshot, TranscriptStore};

/// Carries one query to the backend and returns its raw reply.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn execute(&self, query: &str) -> Result<RawReply, BackendError>;
}

/// How the backend labeled its reply body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    PlainText,
    Json,
}

impl ContentKind {
    /// Classify a `Content-Type` header value. Any `text/*` type is plain
    /// text; everything else, including a missing header, is decoded as JSON.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if essence.starts_with("text/") {
            Self::PlainText
        } else {
            Self::Json
        }
    }
}

/// An undecoded backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub body: Vec<u8>,
    pub content_kind: ContentKind,
}

impl RawReply {
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_kind: ContentKind::Json,
        }
    }

    pub fn plain_text(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_kind: ContentKind::PlainText,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("failed to read response: {0}")]
    Decode(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
