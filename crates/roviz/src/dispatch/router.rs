//! Routing of resolved log entries to their handlers.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use roviz_config::{Config, DEFAULT_MAX_CASCADE_DEPTH};

use crate::event_log::{EntryId, EntryState, EventLog, Failure};
use crate::model::Model;
use crate::representation::{self, RepresentationKind};

use super::errors::{DispatchError, HandlerError};
use super::registry::{FollowUp, HandlerRegistry};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Outcome of dispatching one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    /// Model produced by the handler.
    pub model: Model,
    /// Entries started for the handler's follow-up requests, in order.
    pub follow_ups: Vec<EntryId>,
}

/// Routes resolved entries to the handler registered for their kind.
///
/// The dispatcher never fetches anything itself: follow-up requests are
/// appended to the log as pending entries and left for the caller.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
    max_cascade_depth: usize,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry` with the default cascade limit.
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self {
            registry,
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }

    /// Creates a dispatcher with the standard handlers and the configured
    /// cascade limit.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HandlerRegistry::standard()))
            .with_max_cascade_depth(config.max_cascade_depth())
    }

    /// Sets the depth at which entries stop starting follow-ups.
    #[must_use]
    pub const fn with_max_cascade_depth(mut self, depth: usize) -> Self {
        self.max_cascade_depth = depth;
        self
    }

    /// Depth at which entries stop starting follow-ups.
    #[must_use]
    pub const fn max_cascade_depth(&self) -> usize {
        self.max_cascade_depth
    }

    /// Dispatches the resolved entry `id`.
    ///
    /// On success the entry is consumed and any follow-up entries have been
    /// appended to `log` in the order the handler requested them.
    ///
    /// # Errors
    ///
    /// `UnknownEntry` and `InvalidState` leave the log untouched. Malformed,
    /// unroutable and rejected responses are recorded as a failure on the
    /// entry before being returned.
    pub fn handle(&self, log: &mut EventLog, id: EntryId) -> Result<Dispatched, DispatchError> {
        let entry = log
            .entry_mut(id)
            .ok_or_else(|| DispatchError::unknown_entry(id))?;
        if *entry.state() != EntryState::Resolved {
            return Err(DispatchError::invalid_state(id, entry.state().as_str()));
        }

        let url = entry.url().to_owned();
        let depth = entry.depth();
        let parsed = serde_json::from_str::<Value>(entry.response().unwrap_or_default());
        let representation = match parsed {
            Ok(representation) => representation,
            Err(source) => {
                entry.fail(Failure::Malformed {
                    message: source.to_string(),
                })?;
                warn!(target: DISPATCH_TARGET, entry = %id, url = %url, "malformed response");
                return Err(DispatchError::malformed_response(url, source));
            }
        };

        entry.mark_dispatched()?;
        entry.record_representation(
            representation::self_href(&representation),
            representation::title(&representation),
        );

        let Some(kind) = self.registry.classify(&representation) else {
            entry.fail(Failure::Unroutable)?;
            warn!(target: DISPATCH_TARGET, entry = %id, url = %url, "unroutable response");
            return Err(DispatchError::unroutable(url));
        };
        entry.record_kind(kind);
        debug!(target: DISPATCH_TARGET, entry = %id, kind = %kind, "routing response");

        let handled = match self.registry.handler(kind).handle(&representation) {
            Ok(handled) => handled,
            Err(source) => {
                entry.fail(Failure::Handler {
                    message: source.to_string(),
                })?;
                warn!(
                    target: DISPATCH_TARGET,
                    entry = %id,
                    kind = %kind,
                    error = %source,
                    "handler rejected response"
                );
                return Err(DispatchError::handler(url, kind, source));
            }
        };

        let follow_ups = if handled.follow_ups.is_empty() {
            Vec::new()
        } else if depth >= self.max_cascade_depth {
            debug!(
                target: DISPATCH_TARGET,
                entry = %id,
                depth,
                skipped = handled.follow_ups.len(),
                "cascade depth reached; follow-ups not started"
            );
            Vec::new()
        } else {
            start_follow_ups(log, id, kind, &handled.follow_ups)?
        };

        log.entry_mut(id)
            .ok_or_else(|| DispatchError::unknown_entry(id))?
            .mark_consumed()?;
        debug!(
            target: DISPATCH_TARGET,
            entry = %id,
            follow_ups = follow_ups.len(),
            "entry consumed"
        );

        Ok(Dispatched {
            model: handled.model,
            follow_ups,
        })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(HandlerRegistry::standard()))
    }
}

/// Appends one entry per follow-up. If any cannot be started, the ones
/// already appended are abandoned and the parent fails as if its handler had
/// rejected the representation.
fn start_follow_ups(
    log: &mut EventLog,
    parent: EntryId,
    kind: RepresentationKind,
    requests: &[FollowUp],
) -> Result<Vec<EntryId>, DispatchError> {
    let mut started = Vec::with_capacity(requests.len());
    for request in requests {
        match log.start_follow_up(parent, request.url.as_str(), request.title.as_str()) {
            Ok(child) => started.push(child.id()),
            Err(error) => {
                for child in &started {
                    log.abandon(*child)?;
                }
                let source = HandlerError::invalid_follow_up(request.url.as_str(), error);
                let entry = log
                    .entry_mut(parent)
                    .ok_or_else(|| DispatchError::unknown_entry(parent))?;
                entry.fail(Failure::Handler {
                    message: source.to_string(),
                })?;
                warn!(
                    target: DISPATCH_TARGET,
                    entry = %parent,
                    abandoned = started.len(),
                    error = %source,
                    "follow-up rejected"
                );
                return Err(DispatchError::handler(entry.url(), kind, source));
            }
        }
    }
    Ok(started)
}
