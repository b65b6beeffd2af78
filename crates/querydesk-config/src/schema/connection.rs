//! Database connection registration settings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Database engines the backend can connect to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DatabaseType {
    #[default]
    Postgres,
    #[serde(rename = "SQLlite", alias = "sqlite", alias = "SQLite")]
    SQLlite,
    MongoDB,
}

impl DatabaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "Postgres",
            Self::SQLlite => "SQLlite",
            Self::MongoDB => "MongoDB",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqllite" | "sqlite" => Ok(Self::SQLlite),
            "mongodb" | "mongo" => Ok(Self::MongoDB),
            other => Err(format!("unknown database type: {other}")),
        }
    }
}

/// Connection registration endpoint plus optional saved form values.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub endpoint: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub database: String,
    pub database_type: DatabaseType,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("database_type", &self.database_type)
            .finish()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/database/createconnection".into(),
            user: String::new(),
            password: String::new(),
            host: String::new(),
            port: String::new(),
            database: String::new(),
            database_type: DatabaseType::Postgres,
        }
    }
}

impl ConnectionConfig {
    /// Whether any form field was saved in the config file.
    pub fn has_saved_form(&self) -> bool {
        !(self.user.is_empty()
            && self.host.is_empty()
            && self.port.is_empty()
            && self.database.is_empty())
    }
}
