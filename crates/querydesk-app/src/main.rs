mod cli;
mod host;
mod output;
mod setup;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let (config, config_error) = match setup::load(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(host::EXIT_USAGE);
        }
    };

    let log_directive = args
        .log_level
        .as_deref()
        .map(setup::log_directive)
        .unwrap_or_else(|| config.logging.level.directive().to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "querydesk=info".parse().expect("static directive")),
            ),
        )
        .init();

    tracing::info!("QueryDesk v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    tracing::debug!(endpoint = %config.backend.endpoint, transport = ?config.backend.transport, "config loaded");

    let result = match args.command.clone().unwrap_or(cli::Command::Chat) {
        cli::Command::Chat => host::run_chat(&config).await,
        cli::Command::Ask { query } => host::run_ask(&config, &query.join(" ")).await,
        cli::Command::Connect(connect) => host::run_connect(&config, &connect).await,
    };

    match result {
        Ok(code) => {
            tracing::info!("Shutdown complete");
            ExitCode::from(code)
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(host::EXIT_FAILED)
        }
    }
}
