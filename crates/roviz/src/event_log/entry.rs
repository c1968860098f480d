//! Lifecycle record for a single request/response exchange.
//!
//! An entry moves forward through `pending → resolved → dispatched →
//! consumed`. Any non-terminal state may instead end in `failed`, which keeps
//! the entry in the log as an audit record of what went wrong.

use std::fmt;

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use crate::representation::RepresentationKind;

use super::errors::EventLogError;

/// Position of an entry within its [`EventLog`](super::EventLog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(usize);

impl EntryId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position in chronological order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why an entry ended without producing a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Failure {
    /// The transport could not deliver a response body.
    Transport {
        /// Transport error rendered as text.
        message: String,
    },
    /// The response body was not valid JSON.
    Malformed {
        /// Parser error rendered as text.
        message: String,
    },
    /// No handler recognises the representation.
    Unroutable,
    /// The selected handler rejected the representation.
    Handler {
        /// Handler error rendered as text.
        message: String,
    },
    /// The exchange was abandoned before a response arrived.
    Abandoned,
}

/// Lifecycle state of a [`LogEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// Created; waiting for the response body.
    Pending,
    /// Response body assigned.
    Resolved,
    /// Handed to the dispatcher.
    Dispatched,
    /// A handler produced a model.
    Consumed,
    /// Terminal failure.
    Failed(Failure),
}

impl EntryState {
    /// Short lowercase name used in errors and log events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Dispatched => "dispatched",
            Self::Consumed => "consumed",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns true for states that admit no further transition.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Consumed | Self::Failed(_))
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded request/response exchange.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    id: EntryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<EntryId>,
    depth: usize,
    url: String,
    title: String,
    request: Option<String>,
    response: Option<String>,
    state: EntryState,
    self_href: Option<String>,
    kind: Option<RepresentationKind>,
    #[serde(with = "time::serde::rfc3339")]
    started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    resolved_at: Option<OffsetDateTime>,
}

impl LogEntry {
    pub(super) fn new(
        id: EntryId,
        lineage: Option<(EntryId, usize)>,
        url: String,
        title: String,
        request: Option<String>,
    ) -> Self {
        Self {
            id,
            parent: lineage.map(|(parent, _)| parent),
            depth: lineage.map_or(0, |(_, depth)| depth),
            url,
            title,
            request,
            response: None,
            state: EntryState::Pending,
            self_href: None,
            kind: None,
            started_at: OffsetDateTime::now_utc(),
            resolved_at: None,
        }
    }

    /// Identifier of this entry.
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// Entry whose dispatch started this one, if it was cascaded.
    #[must_use]
    pub const fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Cascade generation: zero for explicit requests.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Requested URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Human-readable label; may be empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Serialized outgoing payload, if any.
    #[must_use]
    pub fn request(&self) -> Option<&str> {
        self.request.as_deref()
    }

    /// Serialized response body, once resolved.
    #[must_use]
    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &EntryState {
        &self.state
    }

    /// Returns true once the entry has failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.state, EntryState::Failed(_))
    }

    /// Failure reason, when the entry has failed.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match &self.state {
            EntryState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Self link of the dispatched representation.
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        self.self_href.as_deref()
    }

    /// Representation kind chosen during dispatch.
    #[must_use]
    pub const fn kind(&self) -> Option<RepresentationKind> {
        self.kind
    }

    /// When the entry was started.
    #[must_use]
    pub const fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    /// When the response was assigned.
    #[must_use]
    pub const fn resolved_at(&self) -> Option<OffsetDateTime> {
        self.resolved_at
    }

    /// Time between start and resolution.
    #[must_use]
    pub fn response_time(&self) -> Option<Duration> {
        self.resolved_at.map(|resolved| resolved - self.started_at)
    }

    /// Size of the response body in bytes.
    #[must_use]
    pub fn response_size(&self) -> Option<usize> {
        self.response.as_ref().map(String::len)
    }

    /// Replaces the label.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Assigns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::InvalidState`] unless the entry is pending.
    pub fn resolve(&mut self, response: impl Into<String>) -> Result<(), EventLogError> {
        self.expect_state(&EntryState::Pending, "resolve")?;
        self.response = Some(response.into());
        self.resolved_at = Some(OffsetDateTime::now_utc());
        self.state = EntryState::Resolved;
        Ok(())
    }

    /// Marks the entry as terminally failed.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::InvalidState`] when the entry already reached
    /// a terminal state.
    pub fn fail(&mut self, failure: Failure) -> Result<(), EventLogError> {
        if self.state.is_terminal() {
            return Err(self.invalid("fail"));
        }
        self.state = EntryState::Failed(failure);
        Ok(())
    }

    pub(crate) fn mark_dispatched(&mut self) -> Result<(), EventLogError> {
        self.expect_state(&EntryState::Resolved, "dispatch")?;
        self.state = EntryState::Dispatched;
        Ok(())
    }

    pub(crate) fn mark_consumed(&mut self) -> Result<(), EventLogError> {
        self.expect_state(&EntryState::Dispatched, "consume")?;
        self.state = EntryState::Consumed;
        Ok(())
    }

    /// Records correlation data extracted from the representation.
    pub(crate) fn record_representation(&mut self, self_href: Option<&str>, title: Option<&str>) {
        self.self_href = self_href.map(str::to_owned);
        if self.title.is_empty()
            && let Some(title) = title
        {
            self.title = title.to_owned();
        }
    }

    pub(crate) fn record_kind(&mut self, kind: RepresentationKind) {
        self.kind = Some(kind);
    }

    fn expect_state(
        &self,
        expected: &EntryState,
        operation: &'static str,
    ) -> Result<(), EventLogError> {
        if &self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &'static str) -> EventLogError {
        EventLogError::invalid_state(self.id, self.state.as_str(), operation)
    }
}
