//! Loading indicator with a delayed hide.
//!
//! Shown when a submission starts and hidden a fixed delay after it settles.
//! Purely cosmetic: the session's in-flight flag is the source of truth.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use querydesk_common::{Event, EventBus};
use tokio::sync::watch;
use tracing::debug;

struct Shared {
    visible: watch::Sender<bool>,
    /// Bumped on every `start`, so a stale delayed hide can tell it lost.
    generation: AtomicU64,
    events: Option<Arc<EventBus>>,
}

impl Shared {
    fn set(&self, value: bool) {
        let changed = self.visible.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
        if changed {
            debug!(visible = value, "loading indicator changed");
            if let Some(events) = &self.events {
                events.publish(Event::LoadingChanged(value));
            }
        }
    }
}

pub struct LoadingIndicator {
    shared: Arc<Shared>,
    reset_delay: Duration,
}

impl LoadingIndicator {
    pub fn new(reset_delay: Duration) -> Self {
        Self::build(reset_delay, None)
    }

    /// Publish visibility changes on `events` as well.
    pub fn with_events(reset_delay: Duration, events: Arc<EventBus>) -> Self {
        Self::build(reset_delay, Some(events))
    }

    fn build(reset_delay: Duration, events: Option<Arc<EventBus>>) -> Self {
        let (visible, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                visible,
                generation: AtomicU64::new(0),
                events,
            }),
            reset_delay,
        }
    }

    pub fn is_visible(&self) -> bool {
        *self.shared.visible.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.visible.subscribe()
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }

    pub(crate) fn start(&self) {
        self.shared.generation.fetch_add(1, Ordering::AcqRel);
        self.shared.set(true);
    }

    /// Hide after the reset delay unless a newer submission started meanwhile.
    /// Without a tokio runtime (or with a zero delay) it hides immediately.
    pub(crate) fn settle(&self) {
        let generation = self.shared.generation.load(Ordering::Acquire);
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) if !self.reset_delay.is_zero() => handle,
            _ => {
                self.shared.set(false);
                return;
            }
        };

        let shared = self.shared.clone();
        let delay = self.reset_delay;
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if shared.generation.load(Ordering::Acquire) == generation {
                shared.set(false);
            }
        });
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
