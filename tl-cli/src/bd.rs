//! bd dispatch wrapper
//!
//! Daily-use beads (`bd`) subcommands are served by tl, so they are forwarded to it.
//! Anything else falls through to the real bd, installed on `PATH` as `bd.real`.

use crate::process::{LAUNCHER_FAILURE, exit_code, run_inherited};
use anyhow::{Context, Result, anyhow};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// bd subcommands that tl handles directly
pub const KNOWN_TL_COMMANDS: [&str; 15] = [
    "init", "create", "list", "show", "update", "close", "reopen", "ready", "claim", "blocked",
    "stats", "dep", "import", "export", "sync",
];

pub const REAL_BD: &str = "bd.real";

const NOT_HANDLED: &str =
    "bd: command not handled by tl and real bd binary (bd.real) not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Tl,
    RealBd,
}

/// Pick the destination from the first argument.
pub fn route(args: &[OsString]) -> Route {
    match args.first().and_then(|arg| arg.to_str()) {
        Some(command) if KNOWN_TL_COMMANDS.contains(&command) => Route::Tl,
        _ => Route::RealBd,
    }
}

/// Search `path_var` (a `PATH` value) for an executable file called `name`.
pub fn lookup_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut found = vec![dir.join(name)];
    if cfg!(windows) {
        found.push(dir.join(format!("{name}.exe")));
    }
    found
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// tl next to this wrapper, else tl on `PATH`, else a bare `tl` for the OS to resolve.
pub fn find_tl(self_exe: Option<&Path>, path_var: Option<&OsStr>) -> PathBuf {
    let file_name = format!("tl{}", std::env::consts::EXE_SUFFIX);

    if let Some(sibling) = self_exe
        .and_then(Path::parent)
        .map(|dir| dir.join(&file_name))
        .filter(|candidate| candidate.exists())
    {
        return sibling;
    }

    lookup_path("tl", path_var).unwrap_or_else(|| PathBuf::from(file_name))
}

/// Run tl with `args` and return the exit code to leave with.
pub fn forward_to_tl(tl: &Path, args: &[OsString]) -> i32 {
    match run_inherited(tl, args) {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("bd: failed to run {}: {e}", tl.display());
            LAUNCHER_FAILURE
        }
    }
}

/// Hand `args` to `bd.real`. Only returns on failure on Unix, where the process image
/// is replaced.
pub fn fall_through(args: &[OsString], path_var: Option<&OsStr>) -> Result<i32> {
    let real = lookup_path(REAL_BD, path_var).ok_or_else(|| anyhow!("{REAL_BD} not on PATH"))?;
    tracing::debug!(real = %real.display(), "falling through to real bd");
    exec_replacing(&real, args).with_context(|| format!("failed to exec {}", real.display()))
}

#[cfg(unix)]
fn exec_replacing(program: &Path, args: &[OsString]) -> std::io::Result<i32> {
    use std::os::unix::process::CommandExt;
    Err(std::process::Command::new(program).args(args).exec())
}

#[cfg(not(unix))]
fn exec_replacing(program: &Path, args: &[OsString]) -> std::io::Result<i32> {
    run_inherited(program, args).map(exit_code)
}

/// Entry point of the `bd` binary. `args` excludes the invocation name.
pub fn run(args: impl IntoIterator<Item = OsString>) -> i32 {
    let args: Vec<OsString> = args.into_iter().collect();
    let path_var = std::env::var_os("PATH");

    match route(&args) {
        Route::Tl => {
            let self_exe = std::env::current_exe().ok();
            let tl = find_tl(self_exe.as_deref(), path_var.as_deref());
            tracing::debug!(tl = %tl.display(), "forwarding to tl");
            forward_to_tl(&tl, &args)
        }
        Route::RealBd => match fall_through(&args, path_var.as_deref()) {
            Ok(code) => code,
            Err(e) => {
                tracing::debug!("{e:#}");
                eprintln!("{NOT_HANDLED}");
                LAUNCHER_FAILURE
            }
        },
    }
}
