//! Session outcome types and the in-flight guard.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::result::ExchangeError;
use crate::transcript::ExchangeId;

/// Externally visible phase. The result of a submission is reported through
/// `SubmitOutcome`; the phase is back to `Idle` before `submit` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Submitting,
}

/// Why a submission was dropped without touching the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    InFlight,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("empty input"),
            Self::InFlight => f.write_str("a request is already in flight"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    Succeeded {
        user: ExchangeId,
        bot: ExchangeId,
    },
    Failed {
        user: ExchangeId,
        bot: ExchangeId,
        error: ExchangeError,
    },
}

impl SubmitOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The bot exchange appended by this submission, if any.
    pub fn bot_id(&self) -> Option<ExchangeId> {
        match self {
            Self::Rejected(_) => None,
            Self::Succeeded { bot, .. } | Self::Failed { bot, .. } => Some(*bot),
        }
    }
}

/// Holds the in-flight flag for the duration of one submission and clears
/// it on drop, including when the future is dropped mid-request.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, RejectReason> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(RejectReason::InFlight);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
