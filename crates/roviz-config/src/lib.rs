//! Shared configuration for the roviz hypermedia client.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults, an
//! optional configuration file, `ROVIZ_*` environment variables, and finally
//! command-line flags. The resolved [`Config`] drives telemetry set-up, the
//! cascade depth limit applied by the dispatcher, and the fixture transport
//! used by the `roviz` binary.

mod defaults;
mod logging;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_CASCADE_DEPTH, default_log_filter, default_log_filter_string,
    default_log_format, default_max_cascade_depth,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ROVIZ")]
pub struct Config {
    /// Tracing filter expression (for example `info` or `roviz=debug`).
    #[serde(default = "defaults::default_log_filter_string")]
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured logs.
    #[serde(default = "defaults::default_log_format")]
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Number of follow-up generations started from one explicit request.
    #[serde(default = "defaults::default_max_cascade_depth")]
    #[ortho_config(default = defaults::default_max_cascade_depth())]
    pub max_cascade_depth: usize,
    /// Directory of recorded JSON responses served by the fixture transport.
    #[serde(default)]
    pub fixture_dir: Option<Utf8PathBuf>,
    /// URL fetched by the binary on start-up.
    #[serde(default)]
    pub start_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            max_cascade_depth: default_max_cascade_depth(),
            fixture_dir: None,
            start_url: None,
        }
    }
}

impl Config {
    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Structured log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Maximum cascade depth honoured by the dispatcher.
    #[must_use]
    pub fn max_cascade_depth(&self) -> usize {
        self.max_cascade_depth
    }

    /// Fixture directory, when configured.
    #[must_use]
    pub fn fixture_dir(&self) -> Option<&Utf8PathBuf> {
        self.fixture_dir.as_ref()
    }

    /// Start URL, when configured.
    #[must_use]
    pub fn start_url(&self) -> Option<&str> {
        self.start_url.as_deref()
    }

    /// Checks values that the layered loader cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCascadeDepth`] when the cascade depth is
    /// zero and [`ConfigError::InvalidStartUrl`] when the start URL is not an
    /// absolute URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cascade_depth == 0 {
            return Err(ConfigError::ZeroCascadeDepth);
        }
        if let Some(raw) = self.start_url() {
            Url::parse(raw).map_err(|source| ConfigError::InvalidStartUrl {
                url: raw.to_owned(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Errors raised by [`Config::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A depth of zero would forbid the explicit request itself from fanning
    /// out and is almost always a typo.
    #[error("max_cascade_depth must be at least 1")]
    ZeroCascadeDepth,
    /// The configured start URL could not be parsed.
    #[error("invalid start URL '{url}': {source}")]
    InvalidStartUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
