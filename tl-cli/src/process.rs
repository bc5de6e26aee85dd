//! Child process hand-off: inherited stdio, blocking wait, exit status mapping

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Exit code for every error the shims detect themselves
pub const LAUNCHER_FAILURE: i32 = 1;

/// Run `program` with `args`, sharing this process's stdin/stdout/stderr, and wait for it.
pub fn run_inherited(program: &Path, args: &[OsString]) -> io::Result<ExitStatus> {
    tracing::debug!(program = %program.display(), argc = args.len(), "spawning child");

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    tracing::debug!(%status, "child exited");
    Ok(status)
}

/// Exit code to leave with after the child finished.
///
/// The child's own code when it has one. A child killed by a signal maps to
/// `128 + signal` like a shell would report it; anything else falls back to 0.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    0
}
