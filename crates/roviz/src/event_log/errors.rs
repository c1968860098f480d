//! Error types for event log operations.

use thiserror::Error;

use super::entry::EntryId;

/// Errors surfaced while recording or transitioning log entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventLogError {
    /// Caller supplied malformed input (for example an empty URL).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The requested lifecycle transition is not legal from the entry's
    /// current state.
    #[error("entry {id} is {state}; cannot {operation}")]
    InvalidState {
        id: EntryId,
        state: &'static str,
        operation: &'static str,
    },

    /// No entry carries the given identifier.
    #[error("unknown entry {id}")]
    UnknownEntry { id: EntryId },
}

impl EventLogError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an invalid state error.
    pub fn invalid_state(id: EntryId, state: &'static str, operation: &'static str) -> Self {
        Self::InvalidState {
            id,
            state,
            operation,
        }
    }

    /// Creates an unknown entry error.
    pub fn unknown_entry(id: EntryId) -> Self {
        Self::UnknownEntry { id }
    }
}
