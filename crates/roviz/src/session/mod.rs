//! Session context tying the log, dispatcher and transport together.
//!
//! A [`Session`] owns everything one client session needs: the event log,
//! the dispatcher, the transport that fetches bodies, the observer that is
//! told about lifecycle changes and the models produced so far. Follow-up
//! requests started during dispatch are queued and drained breadth-first
//! before control returns to the caller, so a parent's children are always
//! appended before any of them is fetched.

mod errors;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tracing::{debug, warn};

use roviz_config::Config;

use crate::dispatch::{DispatchError, Dispatched, Dispatcher};
use crate::event_log::{EntryId, EventLog, EventLogError, Failure};
use crate::model::Model;
use crate::observer::{LogObserver, StructuredLogObserver};
use crate::transport::Transport;

pub use self::errors::SessionError;

/// Tracing target for session operations.
pub(crate) const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Explicit context for one client session.
pub struct Session<T> {
    log: EventLog,
    dispatcher: Dispatcher,
    transport: T,
    observer: Arc<dyn LogObserver>,
    models: HashMap<EntryId, Model>,
    queue: VecDeque<EntryId>,
}

impl<T: Transport> Session<T> {
    /// Creates a session that reports to a [`StructuredLogObserver`].
    #[must_use]
    pub fn new(transport: T, dispatcher: Dispatcher) -> Self {
        Self {
            log: EventLog::new(),
            dispatcher,
            transport,
            observer: Arc::new(StructuredLogObserver::new()),
            models: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// Creates a session with the standard handlers and the configured
    /// cascade limit.
    #[must_use]
    pub fn from_config(config: &Config, transport: T) -> Self {
        Self::new(transport, Dispatcher::from_config(config))
    }

    /// Replaces the lifecycle observer.
    #[must_use]
    pub fn with_observer(mut self, observer: impl LogObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// The session's event log.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The transport used for follow-up fetches.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Model produced for `id`, if the entry was consumed.
    #[must_use]
    pub fn model(&self, id: EntryId) -> Option<&Model> {
        self.models.get(&id)
    }

    /// Starts an explicit request and returns its entry id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Log`] when `url` is empty.
    pub fn start(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        request: Option<String>,
    ) -> Result<EntryId, SessionError> {
        let entry = self.log.start(url, title, request)?;
        self.observer.entry_started(entry);
        Ok(entry.id())
    }

    /// Assigns a response body to the pending entry `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Log`] when the entry is unknown or not pending.
    pub fn resolve(&mut self, id: EntryId, body: impl Into<String>) -> Result<(), SessionError> {
        let entry = self
            .log
            .entry_mut(id)
            .ok_or_else(|| EventLogError::unknown_entry(id))?;
        entry.resolve(body)?;
        self.observer.entry_resolved(entry);
        Ok(())
    }

    /// Abandons the pending entry `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Log`] when the entry is unknown or not pending.
    pub fn abandon(&mut self, id: EntryId) -> Result<(), SessionError> {
        self.log.abandon(id)?;
        self.notify_failed(id);
        Ok(())
    }

    /// Dispatches the resolved entry `id`, then fetches and dispatches every
    /// follow-up it triggered, breadth-first.
    ///
    /// Failures of follow-up entries are recorded on those entries and never
    /// abort the drain.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Dispatch`] when `id` itself cannot be
    /// dispatched.
    pub fn dispatch(&mut self, id: EntryId) -> Result<&Model, SessionError> {
        self.dispatch_one(id)?;
        self.drain();
        self.models
            .get(&id)
            .ok_or_else(|| DispatchError::unknown_entry(id).into())
    }

    /// Starts a request for `url`, fetches it through the transport and
    /// dispatches it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] when the body cannot be fetched;
    /// the entry is marked failed. Dispatch errors are returned as for
    /// [`Session::dispatch`].
    pub fn fetch(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<&Model, SessionError> {
        let id = self.start(url, title, None)?;
        self.load(id)?;
        self.dispatch(id)
    }

    /// Ends the session, discarding the log and every model.
    ///
    /// Entry ids restart at `#0` afterwards; ids from before the call are
    /// stale.
    pub fn clear(&mut self) {
        debug!(target: SESSION_TARGET, entries = self.log.len(), "session cleared");
        self.log.clear();
        self.models.clear();
        self.queue.clear();
    }

    fn drain(&mut self) {
        while let Some(id) = self.queue.pop_front() {
            if let Err(error) = self.load(id).and_then(|()| self.dispatch_one(id)) {
                warn!(
                    target: SESSION_TARGET,
                    entry = %id,
                    error = %error,
                    "follow-up failed"
                );
            }
        }
    }

    fn load(&mut self, id: EntryId) -> Result<(), SessionError> {
        let url = self
            .log
            .entry(id)
            .ok_or_else(|| EventLogError::unknown_entry(id))?
            .url()
            .to_owned();

        match self.transport.fetch(&url) {
            Ok(body) => self.resolve(id, body),
            Err(source) => {
                if let Some(entry) = self.log.entry_mut(id) {
                    entry.fail(Failure::Transport {
                        message: source.to_string(),
                    })?;
                }
                self.notify_failed(id);
                Err(SessionError::transport(url, source))
            }
        }
    }

    fn dispatch_one(&mut self, id: EntryId) -> Result<(), SessionError> {
        match self.dispatcher.handle(&mut self.log, id) {
            Ok(dispatched) => {
                self.record_consumed(id, dispatched);
                Ok(())
            }
            Err(error) => {
                if !matches!(
                    error,
                    DispatchError::UnknownEntry { .. } | DispatchError::InvalidState { .. }
                ) {
                    self.notify_abandoned_children(id);
                    self.notify_failed(id);
                }
                Err(error.into())
            }
        }
    }

    fn record_consumed(&mut self, id: EntryId, dispatched: Dispatched) {
        let Dispatched { model, follow_ups } = dispatched;
        if let Some(entry) = self.log.entry(id) {
            self.observer.entry_consumed(entry, &model);
        }
        for child in follow_ups {
            if let Some(entry) = self.log.entry(child) {
                self.observer.entry_started(entry);
            }
            self.queue.push_back(child);
        }
        self.models.insert(id, model);
    }

    /// Reports children a failed dispatch appended and then abandoned, so
    /// every entry in the log is observed.
    fn notify_abandoned_children(&self, parent: EntryId) {
        for child in self.log.children(parent) {
            self.observer.entry_started(child);
            self.observer.entry_failed(child);
        }
    }

    fn notify_failed(&self, id: EntryId) {
        if let Some(entry) = self.log.entry(id).filter(|entry| entry.is_failed()) {
            self.observer.entry_failed(entry);
        }
    }
}

impl<T> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("entries", &self.log.len())
            .field("models", &self.models.len())
            .field("queued", &self.queue.len())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
