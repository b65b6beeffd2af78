//! Session hosting for the `chat`, `ask` and `connect` commands.

use std::path::PathBuf;
use std::sync::Arc;

use querydesk_common::{Event, QueryDeskError};
use querydesk_config::schema::{OutputFormat, QueryDeskConfig};
use querydesk_session::{
    ConnectionError, ConnectionForm, ConnectionHandle, HttpBackend, HttpConfig, QuerySession,
    RejectReason, SessionState, SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::ConnectArgs;
use crate::output;

const DEFAULT_HTML_PATH: &str = "querydesk-transcript.html";

/// Process exit codes.
pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

fn backend(config: &QueryDeskConfig) -> Result<Arc<HttpBackend>, QueryDeskError> {
    HttpBackend::new(HttpConfig::from_config(config))
        .map(Arc::new)
        .map_err(|e| QueryDeskError::Network(e.to_string()))
}

/// Where the transcript page goes, if anywhere.
fn html_path(config: &QueryDeskConfig) -> Option<PathBuf> {
    match (&config.output.html_path, config.output.format) {
        (Some(path), _) => Some(path.clone()),
        (None, OutputFormat::Html) => Some(PathBuf::from(DEFAULT_HTML_PATH)),
        (None, OutputFormat::Text) => None,
    }
}

fn mount(
    config: &QueryDeskConfig,
    backend: Arc<HttpBackend>,
    connection: Option<ConnectionHandle>,
) -> Arc<QuerySession> {
    let mut state = SessionState::new();
    if let Some(handle) = connection {
        state = state.with_connection(handle);
    }
    let session = QuerySession::from_config(Arc::new(state), backend, &config.session);
    info!(session = %session.state().id(), "session mounted");
    Arc::new(session)
}

/// Register the saved `[connection]` form, if there is one. Failures are
/// logged and the session continues without a connection.
async fn saved_connection(
    config: &QueryDeskConfig,
    backend: &HttpBackend,
) -> Option<ConnectionHandle> {
    if !config.connection.has_saved_form() {
        return None;
    }
    match backend
        .register_connection(&ConnectionForm::from_config(&config.connection))
        .await
    {
        Ok(handle) => {
            info!(connection = %handle, "saved connection registered");
            Some(handle)
        }
        Err(e) => {
            warn!("Saved connection could not be registered: {e}");
            None
        }
    }
}

/// First line of an interactive chat.
fn banner(config: &QueryDeskConfig, connection: Option<&ConnectionHandle>) -> String {
    let target = match connection {
        Some(handle) => format!("{}, connected to {handle}", config.backend.endpoint),
        None => config.backend.endpoint.clone(),
    };
    format!(
        "QueryDesk v{} ({target}). Type a query, or /quit to exit.",
        env!("CARGO_PKG_VERSION")
    )
}

/// Interactive loop: each stdin line is one submission.
pub async fn run_chat(config: &QueryDeskConfig) -> Result<u8, QueryDeskError> {
    let backend = backend(config)?;
    let connection = saved_connection(config, &backend).await;
    let session = mount(config, backend, connection);
    let printer = output::spawn(session.clone(), html_path(config), true);

    println!("{}", banner(config, session.state().connection()));
    output::print_prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }
        session.set_draft(line);
        session.submit_draft().await;
    }

    shutdown(&session, printer).await;
    Ok(EXIT_OK)
}

/// Submit one query, print the exchange pair and exit.
pub async fn run_ask(config: &QueryDeskConfig, query: &str) -> Result<u8, QueryDeskError> {
    let backend = backend(config)?;
    let connection = saved_connection(config, &backend).await;
    let session = mount(config, backend, connection);
    let printer = output::spawn(session.clone(), html_path(config), false);

    let outcome = session.submit(query).await;
    shutdown(&session, printer).await;

    Ok(match outcome {
        SubmitOutcome::Succeeded { .. } => EXIT_OK,
        SubmitOutcome::Rejected(RejectReason::EmptyInput) => {
            eprintln!("error: query is empty");
            EXIT_USAGE
        }
        SubmitOutcome::Rejected(RejectReason::InFlight) | SubmitOutcome::Failed { .. } => {
            EXIT_FAILED
        }
    })
}

/// Validate the connection form and register it with the backend.
pub async fn run_connect(
    config: &QueryDeskConfig,
    args: &ConnectArgs,
) -> Result<u8, QueryDeskError> {
    let form = connection_form(config, args);
    let backend = backend(config)?;

    match backend.register_connection(&form).await {
        Ok(handle) => {
            println!("Connected: {handle}");
            println!("{:#}", handle.details);
            Ok(EXIT_OK)
        }
        Err(ConnectionError::Invalid(errors)) => {
            for error in &errors.0 {
                eprintln!("{}: {}", error.field, error.message);
            }
            Ok(EXIT_USAGE)
        }
        Err(ConnectionError::Backend(e)) => Err(QueryDeskError::Connection(e.to_string())),
    }
}

/// Saved `[connection]` values with any flags layered on top.
fn connection_form(config: &QueryDeskConfig, args: &ConnectArgs) -> ConnectionForm {
    let mut form = ConnectionForm::from_config(&config.connection);
    let fields = [
        (&mut form.user, &args.user),
        (&mut form.password, &args.password),
        (&mut form.host, &args.host),
        (&mut form.port, &args.port),
        (&mut form.database, &args.database),
    ];
    for (field, flag) in fields {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }
    if let Some(database_type) = args.database_type {
        form.database_type = database_type;
    }
    form
}

async fn shutdown(session: &QuerySession, printer: tokio::task::JoinHandle<()>) {
    session.events().publish(Event::Shutdown);
    if let Err(e) = printer.await {
        warn!("Render task ended abnormally: {e}");
    }
}
