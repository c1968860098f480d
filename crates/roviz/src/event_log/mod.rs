//! Chronological record of every request/response exchange.
//!
//! The [`EventLog`] is an append-only sequence of [`LogEntry`] values. Entries
//! are created through [`EventLog::start`] (explicit requests) or
//! [`EventLog::start_follow_up`] (requests cascaded from a dispatched
//! response) and are never removed while the session lasts; only their
//! lifecycle fields change in place. Insertion order is the order in which
//! requests were started, so the log doubles as an audit trail of cascades.

mod entry;
mod errors;

use std::collections::HashMap;

use tracing::debug;

pub use self::entry::{EntryId, EntryState, Failure, LogEntry};
pub use self::errors::EventLogError;

/// Tracing target for event log operations.
pub(crate) const EVENT_LOG_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::event_log");

/// Ordered store of log entries for one session.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<LogEntry>,
    by_url: HashMap<String, Vec<EntryId>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an explicit exchange and returns the new pending entry.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::InvalidArgument`] when `url` is empty or
    /// whitespace. The log is left unchanged in that case.
    pub fn start(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        request: Option<String>,
    ) -> Result<&mut LogEntry, EventLogError> {
        self.append(None, url.into(), title.into(), request)
    }

    /// Starts an exchange triggered while dispatching `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::UnknownEntry`] when `parent` is not in the log
    /// and [`EventLogError::InvalidArgument`] when `url` is empty.
    pub fn start_follow_up(
        &mut self,
        parent: EntryId,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<&mut LogEntry, EventLogError> {
        let depth = self
            .entry(parent)
            .ok_or_else(|| EventLogError::unknown_entry(parent))?
            .depth();
        self.append(Some((parent, depth + 1)), url.into(), title.into(), None)
    }

    fn append(
        &mut self,
        lineage: Option<(EntryId, usize)>,
        url: String,
        title: String,
        request: Option<String>,
    ) -> Result<&mut LogEntry, EventLogError> {
        if url.trim().is_empty() {
            return Err(EventLogError::invalid_argument("url must not be empty"));
        }

        let id = EntryId::new(self.entries.len());
        debug!(
            target: EVENT_LOG_TARGET,
            entry = %id,
            url = %url,
            parent = ?lineage.map(|(parent, _)| parent),
            "entry started"
        );
        self.by_url.entry(url.clone()).or_default().push(id);
        self.entries.push(LogEntry::new(id, lineage, url, title, request));
        self.entries
            .last_mut()
            .ok_or_else(|| EventLogError::unknown_entry(id))
    }

    /// All entries in the order they were started.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Looks up an entry.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&LogEntry> {
        self.entries.get(id.index())
    }

    /// Looks up an entry for in-place field updates.
    pub fn entry_mut(&mut self, id: EntryId) -> Option<&mut LogEntry> {
        self.entries.get_mut(id.index())
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently started entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries requested for `url`, oldest first.
    pub fn find_by_url<'a>(&'a self, url: &str) -> impl Iterator<Item = &'a LogEntry> + use<'a> {
        self.by_url
            .get(url)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entry(*id))
    }

    /// Entries cascaded directly from `parent`, in triggering order.
    pub fn children(&self, parent: EntryId) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.parent() == Some(parent))
    }

    /// Abandons a pending exchange, recording it as failed.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::UnknownEntry`] for an unknown id and
    /// [`EventLogError::InvalidState`] when the entry is no longer pending.
    pub fn abandon(&mut self, id: EntryId) -> Result<(), EventLogError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| EventLogError::unknown_entry(id))?;
        if entry.state() != &EntryState::Pending {
            return Err(EventLogError::invalid_state(
                id,
                entry.state().as_str(),
                "abandon",
            ));
        }
        entry.fail(Failure::Abandoned)
    }

    /// Discards every entry at session teardown.
    ///
    /// Numbering restarts at `#0`, so ids handed out before the call must
    /// not be reused: they name whichever entry takes their index next.
    pub fn clear(&mut self) {
        debug!(
            target: EVENT_LOG_TARGET,
            entries = self.entries.len(),
            "event log cleared"
        );
        self.entries.clear();
        self.by_url.clear();
    }
}
