//! Install layout of a packaged launcher
//!
//! ```text
//! <package root>/
//!   bin/tl                      <- this launcher (possibly reached through a symlink)
//!   binaries/tl-linux-amd64     <- pre-built binaries, one per supported target
//!   tl-launcher.toml            <- optional
//! ```
//!
//! The root is derived from the launcher's own location, never from the working directory.

use crate::config::LauncherConfig;
use crate::error::{BinaryNotFoundSnafu, LocateSelfSnafu, Result};
use crate::platform::{PlatformTarget, supported_targets};
use snafu::ResultExt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout for a launcher executable at `exe`: one directory up from the one holding it.
    pub fn from_executable(exe: &Path) -> Self {
        let bin_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        let root = match bin_dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => bin_dir.join(".."),
        };
        Self { root }
    }

    /// Layout of the running launcher, with symlinks (npm/cargo bin shims) resolved.
    pub fn current() -> Result<Self> {
        let exe = std::env::current_exe().context(LocateSelfSnafu)?;
        let exe = match std::fs::canonicalize(&exe) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!(exe = %exe.display(), error = %e, "canonicalize failed, using raw path");
                exe
            }
        };
        Ok(Self::from_executable(&exe))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the binary for `target` is expected, whether or not it exists.
    pub fn binary_path(&self, config: &LauncherConfig, target: &PlatformTarget) -> PathBuf {
        self.root
            .join(&config.binaries_dir)
            .join(target.binary_name(&config.program))
    }

    /// Like [`binary_path`](Self::binary_path) but fails when nothing is there.
    pub fn locate(&self, config: &LauncherConfig, target: &PlatformTarget) -> Result<PathBuf> {
        let path = self.binary_path(config, target);
        if !path.exists() {
            return BinaryNotFoundSnafu {
                path,
                supported: supported_targets(),
            }
            .fail();
        }

        tracing::debug!(path = %path.display(), "located binary");
        Ok(path)
    }
}
