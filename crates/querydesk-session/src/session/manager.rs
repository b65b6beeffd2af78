//! QuerySession struct, construction, and read accessors.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use querydesk_common::{EventBus, Notification, NotificationQueue};
use querydesk_config::schema::SessionConfig;

use crate::loading::LoadingIndicator;
use crate::QueryBackend;

use super::state::SessionState;
use super::types::SessionPhase;

/// Drives submissions for one mounted session.
pub struct QuerySession {
    /// Shared with renderers, which only ever read snapshots.
    pub(super) state: Arc<SessionState>,
    pub(super) backend: Arc<dyn QueryBackend>,
    /// Toasts raised for failed submissions.
    pub(super) notifications: Mutex<NotificationQueue>,
    pub(super) events: Arc<EventBus>,
    pub(super) loading: LoadingIndicator,
}

impl QuerySession {
    pub fn new(state: Arc<SessionState>, backend: Arc<dyn QueryBackend>) -> Self {
        let events = Arc::new(EventBus::default());
        Self {
            state,
            backend,
            notifications: Mutex::new(NotificationQueue::default()),
            loading: LoadingIndicator::with_events(Duration::from_millis(300), events.clone()),
            events,
        }
    }

    /// Build with the `[session]` settings from config.
    pub fn from_config(
        state: Arc<SessionState>,
        backend: Arc<dyn QueryBackend>,
        config: &SessionConfig,
    ) -> Self {
        Self::new(state, backend)
            .with_loading_reset_delay(Duration::from_millis(config.loading_reset_delay_ms.into()))
            .with_notification_capacity(config.notification_capacity as usize)
    }

    /// Publish session events on an externally owned bus.
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.loading = LoadingIndicator::with_events(self.loading.reset_delay(), events.clone());
        self.events = events;
        self
    }

    pub fn with_loading_reset_delay(mut self, delay: Duration) -> Self {
        self.loading = LoadingIndicator::with_events(delay, self.events.clone());
        self
    }

    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notifications = Mutex::new(NotificationQueue::new(capacity));
        self
    }

    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    pub fn phase(&self) -> SessionPhase {
        if self.state.is_in_flight() {
            SessionPhase::Submitting
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    pub fn draft(&self) -> String {
        self.state.draft()
    }

    /// Replace the composer text.
    pub fn set_draft(&self, text: impl Into<String>) {
        self.state.set_draft(text.into());
    }

    /// Toasts that have not expired yet, oldest first.
    pub fn visible_notifications(&self) -> Vec<Notification> {
        self.lock_notifications()
            .visible()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Take every visible toast, e.g. once the shell has displayed them.
    pub fn take_notifications(&self) -> Vec<Notification> {
        self.lock_notifications().drain_visible()
    }

    pub(super) fn notify(&self, notification: Notification) {
        self.lock_notifications().push(notification);
    }

    fn lock_notifications(&self) -> MutexGuard<'_, NotificationQueue> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
