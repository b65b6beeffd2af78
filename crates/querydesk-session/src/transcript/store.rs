//! Transcript storage with cached copy-on-read snapshots.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::types::{Entry, Exchange, ExchangeId};

/// Read-only, insertion-ordered view of the transcript at one point in time.
#[derive(Debug, Clone)]
pub struct TranscriptSnapshot {
    exchanges: Arc<[Arc<Exchange>]>,
}

impl TranscriptSnapshot {
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Exchange> + ExactSizeIterator {
        self.exchanges.iter().map(|e| e.as_ref())
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.last().map(|e| e.as_ref())
    }

    /// Exchanges appended after `id`, in order.
    pub fn since(&self, id: Option<ExchangeId>) -> impl Iterator<Item = &Exchange> {
        self.iter().filter(move |e| id.map_or(true, |after| e.id() > after))
    }
}

#[derive(Debug, Default)]
struct Inner {
    exchanges: Vec<Arc<Exchange>>,
    next_id: u64,
    cached: Option<TranscriptSnapshot>,
}

/// Append-only exchange log. No removal; dropping the store discards it.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    inner: RwLock<Inner>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id and append at the tail.
    pub fn append(&self, entry: Entry) -> ExchangeId {
        let mut inner = self.write();
        inner.next_id += 1;
        let id = ExchangeId(inner.next_id);
        inner.exchanges.push(Arc::new(Exchange::new(id, entry)));
        inner.cached = None;
        id
    }

    /// Current transcript, rebuilt only if something was appended since the
    /// last call.
    pub fn snapshot(&self) -> TranscriptSnapshot {
        if let Some(cached) = self.read().cached.clone() {
            return cached;
        }

        let mut inner = self.write();
        let Inner {
            exchanges, cached, ..
        } = &mut *inner;
        cached
            .get_or_insert_with(|| TranscriptSnapshot {
                exchanges: Arc::from(exchanges.as_slice()),
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.read().exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().exchanges.is_empty()
    }

    // The push is the last write in `append`, so a poisoned log is still whole.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
