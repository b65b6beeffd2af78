//! Per-mount session state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use querydesk_common::SessionId;

use crate::connection::ConnectionHandle;
use crate::transcript::TranscriptStore;

/// Everything one mounted session owns. Created on mount, dropped on unmount;
/// nothing here outlives the page visit.
#[derive(Debug, Default)]
pub struct SessionState {
    id: SessionId,
    transcript: TranscriptStore,
    pub(crate) in_flight: AtomicBool,
    draft: Mutex<String>,
    connection: Option<ConnectionHandle>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount with an already-registered database connection.
    pub fn with_connection(mut self, connection: ConnectionHandle) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    pub fn connection(&self) -> Option<&ConnectionHandle> {
        self.connection.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn draft(&self) -> String {
        self.lock_draft().clone()
    }

    pub(crate) fn set_draft(&self, text: String) {
        *self.lock_draft() = text;
    }

    pub(crate) fn clear_draft(&self) {
        self.lock_draft().clear();
    }

    fn lock_draft(&self) -> MutexGuard<'_, String> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
