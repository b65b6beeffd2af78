//! Exchange types.

use std::fmt;

use crate::result::{ExchangeError, RenderableResult};

/// Position of an exchange in the transcript. Starts at 1 and only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExchangeId(pub(crate) u64);

impl ExchangeId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// What an exchange carries. The role follows from the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// Trimmed query text as submitted.
    User(String),
    Bot(RenderableResult),
    BotError(ExchangeError),
}

impl Entry {
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Bot(_) | Self::BotError(_) => Role::Bot,
        }
    }
}

/// One transcript entry. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    id: ExchangeId,
    entry: Entry,
}

impl Exchange {
    pub(crate) fn new(id: ExchangeId, entry: Entry) -> Self {
        Self { id, entry }
    }

    pub fn id(&self) -> ExchangeId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.entry.role()
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn is_error(&self) -> bool {
        matches!(self.entry, Entry::BotError(_))
    }
}
