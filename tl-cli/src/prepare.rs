//! Make an extracted binary runnable before handing off to it

use snafu::ResultExt;
use std::path::Path;
use tl_core::Os;
use tl_core::error::{PermissionsSnafu, Result};

/// rwxr-xr-x
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Set [`EXECUTABLE_MODE`] on `path`, unconditionally, unless `os` decides executability by
/// file extension. Package extraction often drops the execute bit.
pub fn ensure_executable(path: &Path, os: Os) -> Result<()> {
    if !os.uses_permission_bits() {
        tracing::trace!(path = %path.display(), "skipping chmod for extension-based platform");
        return Ok(());
    }

    set_mode(path)
}

#[cfg(unix)]
fn set_mode(path: &Path) -> Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, Permissions::from_mode(EXECUTABLE_MODE))
        .context(PermissionsSnafu { path })?;
    tracing::trace!(path = %path.display(), "set mode 755");
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path) -> Result<()> {
    // No mode bits to set; still surface a vanished file the same way
    std::fs::metadata(path)
        .map(|_| ())
        .context(PermissionsSnafu { path })
}
