//! Response dispatch and event tracking for a Restful Objects client.
//!
//! Every request the client issues is recorded as a [`LogEntry`] in an
//! [`EventLog`]. Once the response body arrives, the [`Dispatcher`]
//! classifies the JSON by its structure, hands it to the handler for that
//! [`RepresentationKind`] and appends the follow-up requests the handler asks
//! for as child entries. A [`Session`] owns the log together with a
//! [`Transport`] and drains those follow-ups breadth-first, so a single
//! "list all" request fans out into one entry per listed object.
//!
//! The log is the audit trail of the session: entries are never removed,
//! failures stay recorded on their entry, and [`EventLog::entries`] always
//! returns them in the order they were started.

mod app;
pub mod dispatch;
pub mod event_log;
pub mod model;
mod observer;
pub mod representation;
mod session;
pub mod telemetry;
pub mod transport;

pub use app::run;
pub use dispatch::{DispatchError, Dispatched, Dispatcher, HandlerRegistry};
pub use event_log::{EntryId, EntryState, EventLog, EventLogError, Failure, LogEntry};
pub use model::Model;
pub use observer::{LogObserver, StructuredLogObserver};
pub use representation::{Link, RepresentationKind, self_href};
pub use session::{Session, SessionError};
pub use transport::{DirectoryTransport, StaticTransport, Transport, TransportError};

#[cfg(test)]
mod tests;
