//! Configuration schema types for QueryDesk.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod backend;
mod connection;
mod session;
mod system;

pub use backend::*;
pub use connection::*;
pub use session::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct QueryDeskConfig {
    pub backend: BackendConfig,
    pub connection: ConnectionConfig,
    pub session: SessionConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}
