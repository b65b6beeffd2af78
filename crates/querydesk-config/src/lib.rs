//! QueryDesk configuration system.
//!
//! TOML-based configuration with full validation. Every section uses
//! serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use querydesk_config::load_config;
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config.backend.endpoint);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{QueryDeskConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use querydesk_common::ConfigError;

/// Load and validate config.
///
/// With `path`, that file must exist. Without it, `config.toml` is read from
/// the OS config directory and created with defaults if missing.
pub fn load_config(path: Option<&Path>) -> Result<QueryDeskConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}
