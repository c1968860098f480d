//! Response dispatch.
//!
//! A [`Dispatcher`] takes a resolved [`LogEntry`](crate::event_log::LogEntry),
//! classifies its JSON body through the [`HandlerRegistry`] and hands it to
//! the handler for that [`RepresentationKind`](crate::representation::RepresentationKind).
//! Handlers return a model plus the follow-up requests they want started;
//! the dispatcher appends those to the log as pending children of the entry.

mod errors;
mod handlers;
mod registry;
mod router;

pub use self::errors::{DispatchError, HandlerError};
pub use self::handlers::{ListHandler, MenuBarHandler, MenuHandler, ObjectHandler};
pub use self::registry::{FollowUp, Handled, Handler, HandlerRegistry};
pub use self::router::{Dispatched, Dispatcher};
