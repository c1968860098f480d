//! Command-line runner behind the `roviz` binary.
//!
//! The runner loads configuration, fetches the configured start URL from a
//! fixture directory, lets the session cascade through every follow-up and
//! prints the resulting event log to stdout as JSON lines.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use thiserror::Error;

use roviz_config::{Config, ConfigError};

use crate::event_log::EventLog;
use crate::session::{Session, SessionError};
use crate::telemetry::{self, TelemetryError};
use crate::transport::DirectoryTransport;

#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("a fixture directory must be provided (--fixture-dir)")]
    MissingFixtureDir,
    #[error("a start URL must be provided (--start-url)")]
    MissingStartUrl,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to serialise log entry: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write event log: {0}")]
    Write(io::Error),
}

pub(crate) trait ConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, RunError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, RunError> {
        Config::load_from_iter(args.iter().cloned()).map_err(RunError::LoadConfiguration)
    }
}

/// Runs the client using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match execute(&args, stdout, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "roviz: {error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<W, L>(args: &[OsString], stdout: &mut W, loader: &L) -> Result<(), RunError>
where
    W: Write,
    L: ConfigLoader,
{
    let config = loader.load(args)?;
    config.validate()?;
    telemetry::initialise(&config)?;

    let fixture_dir = config.fixture_dir().ok_or(RunError::MissingFixtureDir)?;
    let start_url = config
        .start_url()
        .ok_or(RunError::MissingStartUrl)?
        .to_owned();

    let mut session = Session::from_config(&config, DirectoryTransport::new(fixture_dir.clone()));
    // Printed even when the start URL fails.
    let outcome = session.fetch(start_url, "").map(|_| ());
    write_log(session.log(), stdout)?;
    outcome.map_err(RunError::from)
}

fn write_log<W: Write>(log: &EventLog, stdout: &mut W) -> Result<(), RunError> {
    for entry in log.entries() {
        serde_json::to_writer(&mut *stdout, entry).map_err(RunError::Serialise)?;
        writeln!(stdout).map_err(RunError::Write)?;
    }
    stdout.flush().map_err(RunError::Write)
}
