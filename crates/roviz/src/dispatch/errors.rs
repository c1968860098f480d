//! Error types for response dispatch failures.
//!
//! `InvalidState` and `UnknownEntry` mean the caller sequenced the pipeline
//! incorrectly and must not be retried. The remaining variants describe data
//! the client could not interpret; they are recorded on the entry before
//! being returned.

use thiserror::Error;

use crate::event_log::{EntryId, EventLogError};
use crate::representation::RepresentationKind;

/// Errors surfaced while dispatching a resolved entry.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No entry carries the given identifier.
    #[error("unknown entry {id}")]
    UnknownEntry { id: EntryId },

    /// The entry is not resolved (for example its response has not arrived).
    #[error("entry {id} is {state}; only resolved entries can be dispatched")]
    InvalidState { id: EntryId, state: &'static str },

    /// The response body is not valid JSON.
    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No handler recognises the representation shape.
    #[error("no handler recognises the response from {url}")]
    UnroutableResponse { url: String },

    /// The selected handler rejected the representation.
    #[error("{kind} handler failed for {url}: {source}")]
    Handler {
        url: String,
        kind: RepresentationKind,
        #[source]
        source: HandlerError,
    },

    /// Recording a lifecycle transition failed.
    #[error(transparent)]
    Log(#[from] EventLogError),
}

impl DispatchError {
    /// Creates an unknown entry error.
    pub fn unknown_entry(id: EntryId) -> Self {
        Self::UnknownEntry { id }
    }

    /// Creates an invalid state error.
    pub fn invalid_state(id: EntryId, state: &'static str) -> Self {
        Self::InvalidState { id, state }
    }

    /// Creates a malformed response error.
    pub fn malformed_response(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            source,
        }
    }

    /// Creates an unroutable response error.
    pub fn unroutable(url: impl Into<String>) -> Self {
        Self::UnroutableResponse { url: url.into() }
    }

    /// Creates a handler error.
    pub fn handler(url: impl Into<String>, kind: RepresentationKind, source: HandlerError) -> Self {
        Self::Handler {
            url: url.into(),
            kind,
            source,
        }
    }

    /// Returns true for errors caused by the caller's sequencing rather than
    /// by the response data.
    #[must_use]
    pub const fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEntry { .. } | Self::InvalidState { .. } | Self::Log(_)
        )
    }
}

/// Errors raised by a [`Handler`](super::Handler).
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The representation does not deserialize into the handler's shape.
    #[error("failed to decode representation: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field the handler requires is absent.
    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    /// A link the handler would follow has an empty href.
    #[error("link '{rel}' has an empty href")]
    EmptyHref { rel: String },

    /// A follow-up the handler requested could not be started.
    #[error("follow-up '{url}' could not be started: {source}")]
    InvalidFollowUp {
        url: String,
        #[source]
        source: EventLogError,
    },
}

impl HandlerError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates an empty href error.
    pub fn empty_href(rel: impl Into<String>) -> Self {
        Self::EmptyHref { rel: rel.into() }
    }

    /// Creates an invalid follow-up error.
    pub fn invalid_follow_up(url: impl Into<String>, source: EventLogError) -> Self {
        Self::InvalidFollowUp {
            url: url.into(),
            source,
        }
    }
}
