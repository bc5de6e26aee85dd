//! Thin wrapper binary that translates `bd` invocations
//!
//! Known daily-use bd subcommands go to tl; everything else to `bd.real` on PATH.

use std::process::exit;

fn main() {
    tl_cli::logging::init();

    let code = tl_cli::bd::run(std::env::args_os().skip(1));
    exit(code);
}
