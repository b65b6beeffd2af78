//! Render task: prints new exchanges and rewrites the HTML page.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use querydesk_common::{Event, Notification};
use querydesk_render::{exchange_to_plain_text, render, render_exchange, to_html_page};
use querydesk_session::{ExchangeId, QuerySession};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const PROMPT: &str = "> ";

struct TranscriptPrinter {
    session: Arc<QuerySession>,
    html_path: Option<PathBuf>,
    interactive: bool,
    last_printed: Option<ExchangeId>,
}

/// Subscribe to the session's events and print until `Event::Shutdown`.
///
/// The subscription is taken before this returns, so nothing published
/// afterwards is missed.
pub fn spawn(
    session: Arc<QuerySession>,
    html_path: Option<PathBuf>,
    interactive: bool,
) -> JoinHandle<()> {
    let rx = session.events().subscribe();
    let printer = TranscriptPrinter {
        session,
        html_path,
        interactive,
        last_printed: None,
    };
    tokio::spawn(printer.run(rx))
}

pub fn print_prompt() {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{PROMPT}");
    let _ = stdout.flush();
}

impl TranscriptPrinter {
    async fn run(mut self, mut rx: broadcast::Receiver<Event>) {
        loop {
            match rx.recv().await {
                Ok(Event::ExchangeAppended { .. }) => self.flush().await,
                Ok(Event::LoadingChanged(true)) if self.interactive => {
                    eprintln!("  ... running");
                }
                Ok(Event::SubmissionSettled { .. }) => {
                    self.flush().await;
                    self.print_notifications();
                    if self.interactive {
                        print_prompt();
                    }
                }
                Ok(Event::SubmissionRejected { reason }) => {
                    debug!(%reason, "submission rejected");
                    if self.interactive {
                        print_prompt();
                    }
                }
                Ok(Event::Shutdown) => {
                    self.flush().await;
                    self.print_notifications();
                    break;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(n)) => {
                    warn!("Render task lagged, skipped {n} events");
                    self.flush().await;
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Print every exchange appended since the last flush, then rewrite the
    /// HTML page if one is configured.
    async fn flush(&mut self) {
        let snapshot = self.session.state().transcript().snapshot();
        {
            let mut stdout = std::io::stdout().lock();
            for exchange in snapshot.since(self.last_printed) {
                let _ = write!(stdout, "{}", exchange_to_plain_text(&render_exchange(exchange)));
                self.last_printed = Some(exchange.id());
            }
            let _ = stdout.flush();
        }

        if let Some(path) = &self.html_path {
            let page = to_html_page(&render(&snapshot));
            if let Err(e) = tokio::fs::write(path, page).await {
                warn!("Failed to write transcript page {}: {e}", path.display());
            }
        }
    }

    fn print_notifications(&self) {
        for notification in self.session.take_notifications() {
            eprintln!("{}", format_notification(&notification));
        }
    }
}

fn format_notification(notification: &Notification) -> String {
    format!(
        "[{:?}] {}: {}",
        notification.level, notification.title, notification.body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use querydesk_common::NotificationLevel;
    use querydesk_session::{BackendError, QueryBackend, RawReply, SessionState};
    use std::time::Duration;

    struct Echo;

    #[async_trait]
    impl QueryBackend for Echo {
        async fn execute(&self, query: &str) -> Result<RawReply, BackendError> {
            Ok(RawReply::plain_text(format!("you asked: {query}")))
        }
    }

    #[tokio::test]
    async fn writes_html_page_for_each_exchange() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.html");
        let session = Arc::new(
            QuerySession::new(Arc::new(SessionState::new()), Arc::new(Echo))
                .with_loading_reset_delay(Duration::ZERO),
        );

        let printer = spawn(session.clone(), Some(path.clone()), false);
        assert!(session.submit("<b>hi</b>").await.is_success());
        session.events().publish(Event::Shutdown);
        printer.await.unwrap();

        let page = std::fs::read_to_string(&path).unwrap();
        assert!(page.contains("id=\"exchange-1\""));
        assert!(page.contains("id=\"exchange-2\""));
        assert!(page.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(!page.contains("<b>hi</b>"));
    }

    #[test]
    fn notification_line() {
        let line = format_notification(&Notification::error("Error", "boom"));
        assert_eq!(line, "[Error] Error: boom");
        assert_eq!(
            Notification::error("Error", "boom").level,
            NotificationLevel::Error
        );
    }
}
