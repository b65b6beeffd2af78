//! HttpBackend struct and request building.

use querydesk_config::schema::Transport;

use crate::BackendError;

use super::config::HttpConfig;

/// reqwest-backed query backend.
pub struct HttpBackend {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: HttpConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| BackendError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Build the request that carries `query` under the configured transport.
    pub(crate) fn build_request(&self, query: &str) -> Result<reqwest::RequestBuilder, BackendError> {
        match self.config.transport {
            Transport::PostJson => Ok(self
                .http
                .post(&self.config.endpoint)
                .json(&serde_json::json!({ "query": query }))),
            Transport::GetPath => {
                let url = query_url(&self.config.endpoint, query)?;
                Ok(self.http.get(url))
            }
        }
    }
}

/// Append `query` to `endpoint` as a single percent-encoded path segment.
pub(crate) fn query_url(endpoint: &str, query: &str) -> Result<reqwest::Url, BackendError> {
    let mut url = reqwest::Url::parse(endpoint)
        .map_err(|e| BackendError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| BackendError::InvalidEndpoint(format!("{endpoint}: cannot be a base")))?
        .pop_if_empty()
        .push(query);
    Ok(url)
}
