//! Launcher configuration
//!
//! Read from an optional `tl-launcher.toml` in the package root. Without the file the
//! launcher uses the stock layout: `binaries/tl-<os>-<arch>[.exe]`.

use crate::error::{InvalidConfigSnafu, ParseConfigSnafu, ReadConfigSnafu, Result};
use serde::Deserialize;
use snafu::ResultExt;
use std::io::ErrorKind;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "tl-launcher.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Binary name prefix, also used to prefix diagnostics
    pub program: String,
    /// Subdirectory of the package root holding the pre-built binaries
    pub binaries_dir: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            program: "tl".to_string(),
            binaries_dir: "binaries".to_string(),
        }
    }
}

impl LauncherConfig {
    /// Load `tl-launcher.toml` from `package_root`, falling back to defaults when absent.
    pub fn load(package_root: &Path) -> Result<Self> {
        let path = package_root.join(CONFIG_FILE_NAME);

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "no launcher config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).context(ReadConfigSnafu { path }),
        }
    }

    /// Parse TOML content; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).context(ParseConfigSnafu { path })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.program.is_empty() || self.program.contains(['/', '\\']) {
            return InvalidConfigSnafu {
                path,
                reason: format!("program must be a bare file name prefix, got {:?}", self.program),
            }
            .fail();
        }

        if self.binaries_dir.is_empty() {
            return InvalidConfigSnafu {
                path,
                reason: "binaries_dir must not be empty",
            }
            .fail();
        }

        Ok(())
    }
}
