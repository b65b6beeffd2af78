//! Validation for the `[backend]` and `[connection]` sections.

use crate::schema::QueryDeskConfig;

use super::helpers::{validate_http_url, validate_range};

pub(crate) fn validate_backend(errors: &mut Vec<String>, config: &QueryDeskConfig) {
    validate_http_url(errors, "backend.endpoint", &config.backend.endpoint);
    validate_range(
        errors,
        "backend.connect_timeout_secs",
        config.backend.connect_timeout_secs,
        1,
        120,
    );
}

pub(crate) fn validate_connection(errors: &mut Vec<String>, config: &QueryDeskConfig) {
    validate_http_url(errors, "connection.endpoint", &config.connection.endpoint);
}
