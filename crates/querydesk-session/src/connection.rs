//! Database connection registration form.
//!
//! The form is validated locally before it is posted to the backend's
//! connection endpoint (see `HttpBackend::register_connection`). The
//! backend's reply is kept in memory for the lifetime of the session.

use std::fmt;
use std::sync::OnceLock;

use querydesk_config::schema::{ConnectionConfig, DatabaseType};
use regex::Regex;
use serde::Serialize;

/// Credentials for one database, serialized the way the backend expects.
#[derive(Clone, Default, Serialize)]
pub struct ConnectionForm {
    pub user: String,
    pub password: String,
    pub host: String,
    /// Kept as text so validation can report non-numeric input.
    pub port: String,
    pub database: String,
    #[serde(rename = "databasetype")]
    pub database_type: DatabaseType,
}

impl fmt::Debug for ConnectionForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionForm")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("database_type", &self.database_type)
            .finish()
    }
}

/// One rejected form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(pub Vec<FieldError>);

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl FormErrors {
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl ConnectionForm {
    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self {
            user: config.user.clone(),
            password: config.password.clone(),
            host: config.host.clone(),
            port: config.port.clone(),
            database: config.database.clone(),
            database_type: config.database_type,
        }
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), FormErrors> {
        static DIGITS: OnceLock<Regex> = OnceLock::new();
        let digits = DIGITS.get_or_init(|| Regex::new(r"^[0-9]+$").expect("static regex compiles"));

        let mut errors = Vec::new();
        let mut require = |field, value: &str, message| {
            if value.is_empty() {
                errors.push(FieldError { field, message });
            }
        };
        require("user", &self.user, "Username is required");
        require("password", &self.password, "Password is required");
        require("host", &self.host, "Host is required");
        require("database", &self.database, "Database name is required");

        if !digits.is_match(&self.port) {
            errors.push(FieldError {
                field: "port",
                message: "Port must be a number",
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(errors))
        }
    }
}

/// The backend's acknowledgement of a registered connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionHandle {
    pub database_type: DatabaseType,
    pub database: String,
    pub host: String,
    /// Whatever the backend returned, kept verbatim.
    pub details: serde_json::Value,
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} database {} on {}", self.database_type, self.database, self.host)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("invalid connection form: {0}")]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Backend(#[from] crate::BackendError),
}
