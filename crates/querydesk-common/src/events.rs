use tokio::sync::broadcast;

/// Session lifecycle events consumed by renderers and the page shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new exchange was appended to the transcript.
    ExchangeAppended { id: u64 },
    /// A submission was dropped by the composer guard.
    SubmissionRejected { reason: String },
    /// The in-flight request settled and the session is idle again.
    SubmissionSettled { ok: bool },
    /// The loading indicator changed visibility.
    LoadingChanged(bool),
    /// The host is closing; subscribers finish their work and stop.
    Shutdown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an event, returning the number of receivers reached.
    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
