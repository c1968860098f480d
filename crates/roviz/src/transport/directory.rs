//! Fixture-directory transport.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use url::Url;

use super::{Transport, TransportError};

/// Serves bodies recorded as `<root>/<url path>.json`.
///
/// `http://host/restful/services` maps to `<root>/restful/services.json`;
/// the root path maps to `<root>/index.json`. Host and query are ignored.
#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    root: Utf8PathBuf,
}

impl DirectoryTransport {
    /// Creates a transport rooted at `root`.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the fixtures are read from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// File that would hold the body for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] when `url` is not absolute.
    pub fn fixture_path(&self, url: &str) -> Result<Utf8PathBuf, TransportError> {
        let parsed = Url::parse(url).map_err(|source| TransportError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;
        let relative = parsed.path().trim_matches('/');
        let stem = if relative.is_empty() { "index" } else { relative };
        Ok(self.root.join(format!("{stem}.json")))
    }
}

impl Transport for DirectoryTransport {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let path = self.fixture_path(url)?;
        fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TransportError::not_found(url)
            } else {
                TransportError::Io { path, source }
            }
        })
    }
}
