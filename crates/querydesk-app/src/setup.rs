//! Config loading with CLI overrides applied.

use querydesk_common::ConfigError;
use querydesk_config::schema::{OutputFormat, QueryDeskConfig};
use querydesk_config::validation;

use crate::cli::Args;

/// Load the config, falling back to defaults on error, then apply `args`.
/// The load error, if any, is returned next to the fallback config.
///
/// Fails only when the overridden config no longer validates.
pub fn load(args: &Args) -> Result<(QueryDeskConfig, Option<ConfigError>), ConfigError> {
    let (mut config, error) = match querydesk_config::load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (QueryDeskConfig::default(), Some(e)),
    };
    apply_overrides(&mut config, args);
    validation::validate(&config)?;
    Ok((config, error))
}

pub fn apply_overrides(config: &mut QueryDeskConfig, args: &Args) {
    if let Some(endpoint) = &args.endpoint {
        config.backend.endpoint = endpoint.clone();
    }
    if let Some(transport) = args.transport {
        config.backend.transport = transport.into();
    }
    if let Some(path) = &args.html {
        config.output.format = OutputFormat::Html;
        config.output.html_path = Some(path.clone());
    }
}

/// Accept either a bare level ("debug") or a full filter directive.
pub fn log_directive(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        lvl @ ("trace" | "debug" | "info" | "warn" | "error") => format!("querydesk={lvl}"),
        _ => level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use querydesk_config::schema::Transport;
    use std::io::Write;

    #[test]
    fn bare_level_is_scoped() {
        assert_eq!(log_directive("DEBUG"), "querydesk=debug");
        assert_eq!(log_directive("querydesk_session=trace"), "querydesk_session=trace");
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "querydesk",
            "--endpoint",
            "http://db.internal/q",
            "--transport",
            "get-path",
            "--html",
            "out.html",
        ])
        .unwrap();
        let mut config = QueryDeskConfig::default();
        apply_overrides(&mut config, &args);

        assert_eq!(config.backend.endpoint, "http://db.internal/q");
        assert_eq!(config.backend.transport, Transport::GetPath);
        assert_eq!(config.output.format, OutputFormat::Html);
        assert_eq!(config.output.html_path.as_deref(), Some(std::path::Path::new("out.html")));
    }

    #[test]
    fn load_reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\nendpoint = \"http://example.com/api\"\n\n[session]\nloading_reset_delay_ms = 50"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::try_parse_from(["querydesk", "--config", &path]).unwrap();
        let (config, error) = load(&args).unwrap();
        assert!(error.is_none());
        assert_eq!(config.backend.endpoint, "http://example.com/api");
        assert_eq!(config.session.loading_reset_delay_ms, 50);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nendpoint = \"ftp://nope\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::try_parse_from(["querydesk", "--config", &path]).unwrap();
        let (config, error) = load(&args).unwrap();
        assert!(matches!(error, Some(ConfigError::ValidationError(_))));
        assert_eq!(config.backend.endpoint, QueryDeskConfig::default().backend.endpoint);
    }

    #[test]
    fn invalid_endpoint_flag_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\nendpoint = \"http://example.com/api\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        for endpoint in ["ftp://x", "not a url"] {
            let args =
                Args::try_parse_from(["querydesk", "--config", &path, "--endpoint", endpoint])
                    .unwrap();
            let err = load(&args).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{endpoint}: {err}");
        }
    }
}
