//! Error taxonomy for the launcher
//!
//! Every variant is fatal. The `Display` text is the message body only; the binaries
//! prefix each line with the program name (`tl: ...`) when reporting.

use snafu::Snafu;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("unsupported architecture: {arch}"))]
    UnsupportedArchitecture { arch: String },

    #[snafu(display("unsupported platform: {platform}"))]
    UnsupportedPlatform { platform: String },

    /// Rendered as two lines: the missing path, then every supported pair.
    #[snafu(display(
        "no pre-built binary found at {}\nsupported platforms: {supported}",
        path.display()
    ))]
    BinaryNotFound { path: PathBuf, supported: String },

    #[snafu(display("failed to run binary {}: {source}", path.display()))]
    SpawnFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("cannot determine launcher location: {source}"))]
    LocateSelf { source: std::io::Error },

    #[snafu(display("failed to make {} executable: {source}", path.display()))]
    Permissions {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to parse {}: {source}", path.display()))]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("invalid {}: {reason}", path.display()))]
    InvalidConfig { path: PathBuf, reason: String },
}
