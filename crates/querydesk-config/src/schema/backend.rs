//! Query backend configuration types.

use serde::{Deserialize, Serialize};

/// How a submitted query is carried to the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Transport {
    /// `POST {endpoint}` with a `{"query": ...}` JSON body.
    #[default]
    PostJson,
    /// `GET {endpoint}/{query}` with the query as a percent-encoded path segment.
    GetPath,
}

/// Query backend endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub endpoint: String,
    pub transport: Transport,
    /// Connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds. `0` disables the timeout.
    pub request_timeout_secs: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/query".into(),
            transport: Transport::PostJson,
            connect_timeout_secs: 10,
            request_timeout_secs: 0,
        }
    }
}
