//! Transports deliver raw response bodies for URLs.
//!
//! The dispatch core never performs I/O itself; a [`Session`](crate::Session)
//! asks its transport for each body and records the outcome on the entry.

mod directory;
mod errors;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

pub use self::directory::DirectoryTransport;
pub use self::errors::TransportError;

/// Fetches the serialized representation behind a URL.
pub trait Transport {
    /// Returns the response body for `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no body can be delivered.
    fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch(url)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        (**self).fetch(url)
    }
}

/// In-memory transport serving canned bodies by exact URL.
#[derive(Debug, Default)]
pub struct StaticTransport {
    responses: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl StaticTransport {
    /// Creates an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canned body for `url`.
    #[must_use]
    pub fn with_response(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    /// Adds or replaces the canned body for `url`.
    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.responses.insert(url.into(), body.into());
    }

    /// URLs fetched so far, in request order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for StaticTransport {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::not_found(url))
    }
}
