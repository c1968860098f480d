//! `roviz` replays a start URL against recorded fixtures and prints the
//! resulting event log as JSON lines.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    roviz::run(std::env::args_os(), &mut stdout, &mut stderr)
}
