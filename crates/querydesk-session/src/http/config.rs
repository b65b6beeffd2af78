//! HTTP backend configuration.

use std::time::Duration;

use querydesk_config::schema::{QueryDeskConfig, Transport};

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub endpoint: String,
    pub transport: Transport,
    pub connect_timeout: Duration,
    /// `None` lets a request run until the server answers.
    pub request_timeout: Option<Duration>,
    pub connection_endpoint: String,
}

impl HttpConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let defaults = QueryDeskConfig::default();
        Self {
            endpoint: endpoint.into(),
            transport: Transport::default(),
            connect_timeout: Duration::from_secs(u64::from(defaults.backend.connect_timeout_secs)),
            request_timeout: None,
            connection_endpoint: defaults.connection.endpoint,
        }
    }

    pub fn from_config(config: &QueryDeskConfig) -> Self {
        let backend = &config.backend;
        Self {
            endpoint: backend.endpoint.clone(),
            transport: backend.transport,
            connect_timeout: Duration::from_secs(u64::from(backend.connect_timeout_secs)),
            request_timeout: match backend.request_timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(u64::from(secs))),
            },
            connection_endpoint: config.connection.endpoint.clone(),
        }
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_connection_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.connection_endpoint = endpoint.into();
        self
    }
}
