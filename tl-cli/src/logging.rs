//! Logging setup shared by the shim binaries
//!
//! Silent unless `TL_LAUNCHER_LOG` asks for output: the child process owns the terminal.
//! `RUST_LOG` is left alone, it belongs to the child (tl is itself a Rust program).

use tracing_subscriber::EnvFilter;

/// Filter variable read by the launcher, e.g. `TL_LAUNCHER_LOG=tl_cli=debug`
pub const LOG_ENV: &str = "TL_LAUNCHER_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}
