//! `tl` launcher
//!
//! Installed as `bin/tl` inside the package; re-executes `binaries/tl-<os>-<arch>` with the
//! same arguments and exits with its status.

use std::process::exit;

fn main() {
    tl_cli::logging::init();

    // argv[0] is the launcher itself, everything after belongs to tl
    let code = tl_cli::dispatcher::run(std::env::args_os().skip(1));
    exit(code);
}
