//! Core shared library for the tl launcher binaries
//!
//! Everything here is free of process side effects except [`InstallLayout::current`] and
//! [`LauncherConfig::load`]:
//! - platform model: `(os, arch)` → binary file name
//! - host environment reader so resolution stays unit-testable
//! - install layout: where the pre-built binaries live relative to the launcher
//! - error taxonomy shared by the `tl` and `bd` shims

pub mod config;
pub mod error;
pub mod layout;
pub mod platform;

pub use config::LauncherConfig;
pub use error::{Error, Result};
pub use layout::InstallLayout;
pub use platform::{
    Arch, FixedHost, HostEnvironment, NativeHost, Os, PlatformTarget, SUPPORTED_TARGETS,
    supported_targets,
};
