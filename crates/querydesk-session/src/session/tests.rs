//! State-machine tests against a scripted backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use querydesk_common::{Event, NotificationLevel};
use serde_json::json;
use tokio::sync::Notify;

use super::*;
use crate::result::{FailureCause, RenderableResult, NETWORK_FAILURE_MESSAGE};
use crate::transcript::{Entry, Role};
use crate::{BackendError, QueryBackend, RawReply};

/// Replays canned replies in order; optionally waits on a gate first.
#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<RawReply, BackendError>>>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn replying(replies: Vec<Result<RawReply, BackendError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl QueryBackend for ScriptedBackend {
    async fn execute(&self, query: &str) -> Result<RawReply, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Network("no scripted reply".into())))
    }
}

fn select_one_reply() -> RawReply {
    RawReply::json(
        json!({
            "query": "SELECT 1",
            "table": {"columns": ["?column?"], "rows": [[1]]},
            "answer": "The result is 1."
        })
        .to_string(),
    )
}

fn session_with(backend: ScriptedBackend) -> (QuerySession, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    let session = QuerySession::new(Arc::new(SessionState::new()), backend.clone())
        .with_loading_reset_delay(Duration::ZERO);
    (session, backend)
}

#[tokio::test]
async fn select_one_scenario() {
    let (session, _) = session_with(ScriptedBackend::replying(vec![Ok(select_one_reply())]));

    let outcome = session.submit("SELECT 1").await;
    assert!(outcome.is_success());
    assert!(!session.is_in_flight());
    assert_eq!(session.phase(), SessionPhase::Idle);

    let snapshot = session.state().transcript().snapshot();
    let exchanges: Vec<_> = snapshot.iter().collect();
    assert_eq!(exchanges.len(), 2);
    assert_eq!(exchanges[0].entry(), &Entry::User("SELECT 1".into()));
    let Entry::Bot(RenderableResult::Structured(result)) = exchanges[1].entry() else {
        panic!("expected structured bot exchange");
    };
    assert_eq!(result.table.rows().len(), 1);
    assert_eq!(result.answer, "The result is 1.");
}

#[tokio::test]
async fn submission_appends_adjacent_pair() {
    let (session, _) = session_with(ScriptedBackend::replying(vec![
        Ok(RawReply::plain_text("first")),
        Err(BackendError::Timeout),
        Ok(RawReply::plain_text("third")),
    ]));

    for q in ["a", "b", "c"] {
        let outcome = session.submit(q).await;
        let Some(bot) = outcome.bot_id() else {
            panic!("submission was rejected");
        };
        let snapshot = session.state().transcript().snapshot();
        let last_two: Vec<_> = snapshot.iter().rev().take(2).collect();
        assert_eq!(last_two[0].id(), bot);
        assert_eq!(last_two[0].role(), Role::Bot);
        assert_eq!(last_two[1].role(), Role::User);
        assert_eq!(last_two[1].id().get() + 1, bot.get());
        assert!(!session.is_in_flight());
    }

    let ids: Vec<_> = session
        .state()
        .transcript()
        .snapshot()
        .iter()
        .map(|e| e.id().get())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn input_is_trimmed() {
    let (session, backend) =
        session_with(ScriptedBackend::replying(vec![Ok(RawReply::plain_text("ok"))]));

    session.submit("   how many users?\n").await;
    let snapshot = session.state().transcript().snapshot();
    assert_eq!(
        snapshot.iter().next().unwrap().entry(),
        &Entry::User("how many users?".into())
    );
    assert_eq!(*backend.queries.lock().unwrap(), vec!["how many users?"]);
}

#[tokio::test]
async fn empty_input_is_ignored() {
    let (session, backend) = session_with(ScriptedBackend::default());

    assert_eq!(
        session.submit("   \t\n").await,
        SubmitOutcome::Rejected(RejectReason::EmptyInput)
    );
    assert!(session.state().transcript().is_empty());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert!(session.visible_notifications().is_empty());
}

#[tokio::test]
async fn submit_while_pending_is_dropped() {
    let gate = Arc::new(Notify::new());
    let (session, backend) = session_with(
        ScriptedBackend::replying(vec![Ok(select_one_reply())]).gated(gate.clone()),
    );

    let first = session.submit("SELECT 1");
    let second = async {
        // Runs once `first` is parked on the gate.
        tokio::task::yield_now().await;
        assert!(session.is_in_flight());
        assert_eq!(session.phase(), SessionPhase::Submitting);
        assert_eq!(session.state().transcript().len(), 1);

        let outcome = session.submit("SELECT 2").await;
        assert_eq!(session.state().transcript().len(), 1);
        gate.notify_one();
        outcome
    };

    let (first, second) = tokio::join!(first, second);
    assert!(first.is_success());
    assert_eq!(second, SubmitOutcome::Rejected(RejectReason::InFlight));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.state().transcript().len(), 2);
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn http_500_becomes_error_exchange_and_toast() {
    let (session, _) = session_with(ScriptedBackend::replying(vec![Err(
        BackendError::Status {
            status: 500,
            body: "internal".into(),
        },
    )]));

    let outcome = session.submit("SELECT 1").await;
    let SubmitOutcome::Failed { error, bot, .. } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(error.cause, FailureCause::NetworkFailure);
    assert_eq!(error.message, NETWORK_FAILURE_MESSAGE);
    assert!(error.detail.as_deref().unwrap().contains("500"));

    let snapshot = session.state().transcript().snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.last().unwrap().id(), bot);
    assert!(snapshot.last().unwrap().is_error());
    assert!(!session.is_in_flight());

    let toasts = session.take_notifications();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, NotificationLevel::Error);
    assert_eq!(toasts[0].body, NETWORK_FAILURE_MESSAGE);
    assert!(session.visible_notifications().is_empty());
}

#[tokio::test]
async fn malformed_reply_becomes_error_exchange() {
    let bad = RawReply::json(
        json!({
            "query": "SELECT id, name FROM t",
            "table": {"columns": ["id", "name"], "rows": [[1]]},
            "answer": ""
        })
        .to_string(),
    );
    let (session, _) = session_with(ScriptedBackend::replying(vec![Ok(bad)]));

    let outcome = session.submit("list").await;
    let SubmitOutcome::Failed { error, .. } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(error.cause, FailureCause::MalformedResponse);
    assert!(error.message.contains("row 0"));

    let snapshot = session.state().transcript().snapshot();
    let Entry::BotError(recorded) = snapshot.last().unwrap().entry() else {
        panic!("expected error exchange");
    };
    assert_eq!(recorded, &error);
    assert_eq!(session.visible_notifications().len(), 1);
}

#[tokio::test]
async fn session_recovers_after_failure() {
    let (session, _) = session_with(ScriptedBackend::replying(vec![
        Err(BackendError::Network("connection refused".into())),
        Ok(select_one_reply()),
    ]));

    assert!(!session.submit("SELECT 1").await.is_success());
    assert!(session.submit("SELECT 1").await.is_success());
    assert_eq!(session.state().transcript().len(), 4);
}

#[tokio::test]
async fn draft_is_cleared_on_submit_only() {
    let (session, _) =
        session_with(ScriptedBackend::replying(vec![Ok(RawReply::plain_text("ok"))]));

    session.set_draft("   ");
    assert_eq!(
        session.submit_draft().await,
        SubmitOutcome::Rejected(RejectReason::EmptyInput)
    );
    assert_eq!(session.draft(), "   ");

    session.set_draft("show tables");
    assert!(session.submit_draft().await.is_success());
    assert_eq!(session.draft(), "");
}

#[tokio::test]
async fn draft_survives_rejected_overlap() {
    let gate = Arc::new(Notify::new());
    let (session, _) = session_with(
        ScriptedBackend::replying(vec![Ok(RawReply::plain_text("ok"))]).gated(gate.clone()),
    );

    let first = session.submit("first");
    let second = async {
        tokio::task::yield_now().await;
        session.set_draft("typed while waiting");
        let outcome = session.submit_draft().await;
        assert_eq!(session.draft(), "typed while waiting");
        gate.notify_one();
        outcome
    };

    let (_, second) = tokio::join!(first, second);
    assert_eq!(second, SubmitOutcome::Rejected(RejectReason::InFlight));
}

#[tokio::test]
async fn publishes_events_in_order() {
    let (session, _) = session_with(ScriptedBackend::replying(vec![Ok(select_one_reply())]));
    let mut rx = session.events().subscribe();

    session.submit("").await;
    session.submit("SELECT 1").await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            Event::SubmissionRejected {
                reason: "empty input".into()
            },
            Event::ExchangeAppended { id: 1 },
            Event::LoadingChanged(true),
            Event::ExchangeAppended { id: 2 },
            Event::LoadingChanged(false),
            Event::SubmissionSettled { ok: true },
        ]
    );
}

#[tokio::test]
async fn loading_indicator_tracks_submission() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(
        ScriptedBackend::replying(vec![Ok(RawReply::plain_text("ok"))]).gated(gate.clone()),
    );
    let session = QuerySession::new(Arc::new(SessionState::new()), backend)
        .with_loading_reset_delay(Duration::from_millis(20));

    let first = session.submit("q");
    let check = async {
        tokio::task::yield_now().await;
        assert!(session.loading().is_visible());
        gate.notify_one();
    };
    tokio::join!(first, check);

    // Still shown right after settling, hidden once the delay elapses.
    assert!(session.loading().is_visible());
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!session.loading().is_visible());
}

#[test]
fn from_config_applies_session_settings() {
    let config = querydesk_config::schema::SessionConfig {
        loading_reset_delay_ms: 25,
        notification_capacity: 2,
    };
    let session = QuerySession::from_config(
        Arc::new(SessionState::new()),
        Arc::new(ScriptedBackend::default()),
        &config,
    );
    assert_eq!(session.loading().reset_delay(), Duration::from_millis(25));
}
