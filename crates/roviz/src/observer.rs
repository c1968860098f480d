//! Lifecycle observation for log entries.

use std::sync::Arc;

use crate::event_log::{EVENT_LOG_TARGET, LogEntry};
use crate::model::Model;

/// Observer notified as entries move through their lifecycle.
pub trait LogObserver {
    /// Invoked after an entry (explicit or follow-up) is appended.
    fn entry_started(&self, entry: &LogEntry);

    /// Invoked after a response body is assigned.
    fn entry_resolved(&self, entry: &LogEntry);

    /// Invoked after a handler produced `model` for the entry.
    fn entry_consumed(&self, entry: &LogEntry, model: &Model);

    /// Invoked after the entry reached the failed state.
    fn entry_failed(&self, entry: &LogEntry);
}

impl<T> LogObserver for Arc<T>
where
    T: LogObserver + ?Sized,
{
    fn entry_started(&self, entry: &LogEntry) {
        (**self).entry_started(entry);
    }

    fn entry_resolved(&self, entry: &LogEntry) {
        (**self).entry_resolved(entry);
    }

    fn entry_consumed(&self, entry: &LogEntry, model: &Model) {
        (**self).entry_consumed(entry, model);
    }

    fn entry_failed(&self, entry: &LogEntry) {
        (**self).entry_failed(entry);
    }
}

/// Default observer that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredLogObserver;

impl StructuredLogObserver {
    /// Builds a new observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LogObserver for StructuredLogObserver {
    fn entry_started(&self, entry: &LogEntry) {
        tracing::info!(
            target: EVENT_LOG_TARGET,
            event = "entry_started",
            entry = %entry.id(),
            parent = ?entry.parent(),
            depth = entry.depth(),
            url = %entry.url(),
            started_at = %entry.started_at(),
            "request started"
        );
    }

    fn entry_resolved(&self, entry: &LogEntry) {
        tracing::debug!(
            target: EVENT_LOG_TARGET,
            event = "entry_resolved",
            entry = %entry.id(),
            bytes = entry.response_size().unwrap_or_default(),
            elapsed_ms = entry
                .response_time()
                .map(|elapsed| elapsed.whole_milliseconds())
                .unwrap_or_default(),
            "response received"
        );
    }

    fn entry_consumed(&self, entry: &LogEntry, model: &Model) {
        tracing::info!(
            target: EVENT_LOG_TARGET,
            event = "entry_consumed",
            entry = %entry.id(),
            kind = %model.kind(),
            self_href = entry.self_href().unwrap_or_default(),
            "response consumed"
        );
    }

    fn entry_failed(&self, entry: &LogEntry) {
        tracing::warn!(
            target: EVENT_LOG_TARGET,
            event = "entry_failed",
            entry = %entry.id(),
            url = %entry.url(),
            failure = ?entry.failure(),
            "request failed"
        );
    }
}
