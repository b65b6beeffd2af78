//! Submission flow for QuerySession.

use querydesk_common::{new_correlation_id, Event, Notification};
use tracing::{debug, info, warn};

use crate::parser;
use crate::result::ExchangeError;
use crate::transcript::{Entry, ExchangeId};

use super::manager::QuerySession;
use super::types::{BusyGuard, RejectReason, SubmitOutcome};

impl QuerySession {
    /// Submit one query and wait for it to settle.
    ///
    /// Empty input and overlapping submissions are rejected without touching
    /// the transcript. Otherwise exactly one User exchange and then exactly
    /// one Bot exchange (result or error) are appended, and the session is
    /// idle again when this returns. Failures never escape as errors.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let query = text.trim();
        if query.is_empty() {
            return self.reject(RejectReason::EmptyInput);
        }

        let guard = match BusyGuard::acquire(&self.state.in_flight) {
            Ok(guard) => guard,
            Err(reason) => return self.reject(reason),
        };

        let cid = new_correlation_id();
        let user = self.append(Entry::User(query.to_string()));
        self.state.clear_draft();
        self.loading.start();
        debug!(session = %self.state.id(), %cid, %user, "submitting query");

        let outcome = match self.backend.execute(query).await {
            Ok(raw) => match parser::parse(&raw) {
                Ok(result) => {
                    let bot = self.append(Entry::Bot(result));
                    info!(%cid, %bot, "query settled");
                    SubmitOutcome::Succeeded { user, bot }
                }
                Err(error) => {
                    warn!(%cid, detail = ?error.detail, "malformed backend response");
                    self.fail(user, error)
                }
            },
            Err(e) => {
                warn!(%cid, error = %e, "query request failed");
                self.fail(user, ExchangeError::network(e.to_string()))
            }
        };

        drop(guard);
        self.loading.settle();
        self.events.publish(Event::SubmissionSettled {
            ok: outcome.is_success(),
        });
        outcome
    }

    /// Submit the current composer text. A rejected submission leaves the
    /// draft as it was.
    pub async fn submit_draft(&self) -> SubmitOutcome {
        if self.state.is_in_flight() {
            return self.reject(RejectReason::InFlight);
        }
        let draft = self.state.draft();
        self.submit(&draft).await
    }

    fn append(&self, entry: Entry) -> ExchangeId {
        let id = self.state.transcript().append(entry);
        self.events.publish(Event::ExchangeAppended { id: id.get() });
        id
    }

    fn fail(&self, user: ExchangeId, error: ExchangeError) -> SubmitOutcome {
        self.notify(Notification::error("Error", error.message.clone()));
        let bot = self.append(Entry::BotError(error.clone()));
        SubmitOutcome::Failed { user, bot, error }
    }

    fn reject(&self, reason: RejectReason) -> SubmitOutcome {
        debug!(session = %self.state.id(), %reason, "submission rejected");
        self.events.publish(Event::SubmissionRejected {
            reason: reason.to_string(),
        });
        SubmitOutcome::Rejected(reason)
    }
}
