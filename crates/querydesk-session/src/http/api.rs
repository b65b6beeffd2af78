//! QueryBackend implementation and connection registration for HttpBackend.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::connection::{ConnectionError, ConnectionForm, ConnectionHandle};
use crate::{BackendError, ContentKind, QueryBackend, RawReply};

use super::client::HttpBackend;

#[async_trait]
impl QueryBackend for HttpBackend {
    async fn execute(&self, query: &str) -> Result<RawReply, BackendError> {
        let request = self.build_request(query)?;

        debug!(endpoint = %self.config.endpoint, transport = ?self.config.transport, "query request");

        let response = request.send().await.map_err(send_error)?;
        let response = check_status(response).await?;

        let content_kind = ContentKind::from_content_type(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(RawReply {
            body: body.to_vec(),
            content_kind,
        })
    }
}

impl HttpBackend {
    /// Validate `form` and register it with the backend's connection endpoint.
    pub async fn register_connection(
        &self,
        form: &ConnectionForm,
    ) -> Result<ConnectionHandle, ConnectionError> {
        form.validate()?;

        debug!(endpoint = %self.config.connection_endpoint, database = %form.database, "registering connection");

        let response = self
            .http
            .post(&self.config.connection_endpoint)
            .json(form)
            .send()
            .await
            .map_err(send_error)?;
        let response = check_status(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let details = serde_json::from_slice(&body).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
        });

        info!(database_type = %form.database_type, database = %form.database, "connection registered");

        Ok(ConnectionHandle {
            database_type: form.database_type,
            database: form.database.clone(),
            host: form.host.clone(),
            details,
        })
    }
}

fn send_error(e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout
    } else {
        BackendError::Network(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body: text.chars().take(200).collect(),
    })
}
