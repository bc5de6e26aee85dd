//! Platform detection for OS and architecture.
//!
//! Maps the host `(os, arch)` pair onto the release naming used for the pre-built
//! binaries: `<program>-<os>-<arch>[.exe]`.

use crate::error::{Result, UnsupportedArchitectureSnafu, UnsupportedPlatformSnafu};
use std::fmt;

/// Reads the ambient OS and architecture identifiers.
///
/// The dispatcher only ever sees the host through this trait, so resolution can be
/// exercised with any identifier pair.
pub trait HostEnvironment {
    fn os(&self) -> &str;
    fn arch(&self) -> &str;
}

/// The identifiers this binary was compiled for (`std::env::consts`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl HostEnvironment for NativeHost {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    fn arch(&self) -> &str {
        std::env::consts::ARCH
    }
}

/// A host with fixed identifiers
#[derive(Debug, Clone)]
pub struct FixedHost {
    os: String,
    arch: String,
}

impl FixedHost {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }
}

impl HostEnvironment for FixedHost {
    fn os(&self) -> &str {
        &self.os
    }

    fn arch(&self) -> &str {
        &self.arch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
}

impl Os {
    /// Accepts both Rust (`macos`, `windows`) and Node-style (`darwin`, `win32`) names.
    pub fn from_host(raw: &str) -> Option<Self> {
        match raw {
            "darwin" | "macos" => Some(Self::Darwin),
            "linux" => Some(Self::Linux),
            "windows" | "win32" => Some(Self::Windows),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "windows",
        }
    }

    pub const fn executable_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Darwin | Self::Linux => "",
        }
    }

    /// Windows decides executability by extension, not mode bits.
    pub const fn uses_permission_bits(self) -> bool {
        !matches!(self, Self::Windows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    pub fn from_host(raw: &str) -> Option<Self> {
        match raw {
            "x86_64" | "amd64" | "x64" => Some(Self::Amd64),
            "aarch64" | "arm64" => Some(Self::Arm64),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

/// The `(os, arch)` pair a launcher invocation dispatches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformTarget {
    pub os: Os,
    pub arch: Arch,
}

/// Pairs that ship a pre-built binary, in the order diagnostics list them.
pub const SUPPORTED_TARGETS: [PlatformTarget; 5] = [
    PlatformTarget::new(Os::Darwin, Arch::Arm64),
    PlatformTarget::new(Os::Darwin, Arch::Amd64),
    PlatformTarget::new(Os::Linux, Arch::Arm64),
    PlatformTarget::new(Os::Linux, Arch::Amd64),
    PlatformTarget::new(Os::Windows, Arch::Amd64),
];

/// `darwin-arm64, darwin-amd64, ...` for error output
pub fn supported_targets() -> String {
    SUPPORTED_TARGETS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PlatformTarget {
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Resolve the host identifiers. The architecture is checked first.
    pub fn resolve(host: &impl HostEnvironment) -> Result<Self> {
        let raw_arch = host.arch();
        let Some(arch) = Arch::from_host(raw_arch) else {
            return UnsupportedArchitectureSnafu { arch: raw_arch }.fail();
        };

        let raw_os = host.os();
        let Some(os) = Os::from_host(raw_os) else {
            return UnsupportedPlatformSnafu { platform: raw_os }.fail();
        };

        let target = Self::new(os, arch);
        tracing::debug!(os = raw_os, arch = raw_arch, platform = %target, "resolved platform target");
        Ok(target)
    }

    /// File name of the pre-built binary, e.g. `tl-windows-amd64.exe`.
    pub fn binary_name(&self, program: &str) -> String {
        format!(
            "{program}-{}-{}{}",
            self.os.token(),
            self.arch.token(),
            self.os.executable_suffix()
        )
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_TARGETS.contains(self)
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.token(), self.arch.token())
    }
}
