//! Platform dispatcher behind the `tl` command
//!
//! resolve target → locate binary → fix permissions → spawn → propagate status.
//! Any failure along the way is reported once on stderr and ends the launcher with
//! [`LAUNCHER_FAILURE`]; nothing is retried and no fallback binary is tried.

use crate::prepare::ensure_executable;
use crate::process::{LAUNCHER_FAILURE, exit_code, run_inherited};
use snafu::ResultExt;
use std::ffi::OsString;
use std::path::PathBuf;
use tl_core::error::{Result, SpawnFailureSnafu};
use tl_core::{Error, HostEnvironment, InstallLayout, LauncherConfig, NativeHost, PlatformTarget};

/// A binary that is present and ready to be executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedBinary {
    pub target: PlatformTarget,
    pub path: PathBuf,
}

/// One launcher invocation. The target is resolved once, before anything else is read.
pub struct Dispatcher {
    target: PlatformTarget,
    layout: InstallLayout,
    config: LauncherConfig,
}

impl Dispatcher {
    pub fn new(target: PlatformTarget, layout: InstallLayout, config: LauncherConfig) -> Self {
        Self {
            target,
            layout,
            config,
        }
    }

    /// Dispatcher for the running launcher: layout from its own location, config from the
    /// package root.
    pub fn from_install(host: &impl HostEnvironment) -> Result<Self> {
        Self::load(host, InstallLayout::current)
    }

    /// Resolve `host` first; only a supported host goes on to `locate_self` and the config.
    pub fn load(
        host: &impl HostEnvironment,
        locate_self: impl FnOnce() -> Result<InstallLayout>,
    ) -> Result<Self> {
        let target = PlatformTarget::resolve(host)?;
        let layout = locate_self()?;
        let config = LauncherConfig::load(layout.root())?;
        tracing::debug!(root = %layout.root().display(), ?config, "launcher install");
        Ok(Self::new(target, layout, config))
    }

    pub fn target(&self) -> PlatformTarget {
        self.target
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Locate and chmod; everything short of running the binary.
    pub fn prepare(&self) -> Result<PreparedBinary> {
        let target = self.target;
        if !target.is_supported() {
            tracing::debug!(platform = %target, "no release is published for this target");
        }
        let path = self.layout.locate(&self.config, &target)?;
        ensure_executable(&path, target.os)?;
        Ok(PreparedBinary { target, path })
    }

    /// Run the platform binary with `args` and return the exit code to leave with.
    pub fn dispatch(&self, args: &[OsString]) -> Result<i32> {
        let binary = self.prepare()?;
        let status = run_inherited(&binary.path, args).context(SpawnFailureSnafu {
            path: binary.path.as_path(),
        })?;
        Ok(exit_code(status))
    }
}

/// Write `err` to stderr, one `<program>: ` prefixed line per message line.
pub fn report(program: &str, err: &Error) {
    for line in err.to_string().lines() {
        eprintln!("{program}: {line}");
    }
}

/// Entry point of the `tl` binary. `args` excludes the invocation name.
pub fn run(args: impl IntoIterator<Item = OsString>) -> i32 {
    let args: Vec<OsString> = args.into_iter().collect();

    let dispatcher = match Dispatcher::from_install(&NativeHost) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            report(&LauncherConfig::default().program, &e);
            return LAUNCHER_FAILURE;
        }
    };

    match dispatcher.dispatch(&args) {
        Ok(code) => code,
        Err(e) => {
            report(&dispatcher.config().program, &e);
            LAUNCHER_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tl_core::{Arch, FixedHost, Os};

    fn dispatcher(root: &std::path::Path, os: &str, arch: &str) -> Result<Dispatcher> {
        Dispatcher::load(&FixedHost::new(os, arch), || Ok(InstallLayout::new(root)))
    }

    #[test]
    fn test_unsupported_architecture_stops_before_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let err = dispatcher(dir.path(), "linux", "s390x").err().unwrap();
        assert!(matches!(err, Error::UnsupportedArchitecture { .. }));
        assert!(err.to_string().contains("s390x"));
    }

    #[test]
    fn test_unsupported_platform_names_raw_os() {
        let dir = tempfile::tempdir().unwrap();
        let err = dispatcher(dir.path(), "openbsd", "x64").err().unwrap();
        assert!(matches!(err, Error::UnsupportedPlatform { .. }));
        assert!(err.to_string().contains("openbsd"));
    }

    #[test]
    fn test_missing_binary_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = dispatcher(dir.path(), "darwin", "arm64")
            .unwrap()
            .dispatch(&[OsString::from("--version")])
            .unwrap_err();

        let expected = dir.path().join("binaries").join("tl-darwin-arm64");
        assert!(err.to_string().contains(&expected.display().to_string()));
        assert!(err.to_string().contains("windows-amd64"));
    }

    #[test]
    fn test_prepare_windows_target_finds_exe() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("binaries")).unwrap();
        std::fs::write(dir.path().join("binaries/tl-windows-amd64.exe"), b"MZ").unwrap();

        let prepared = dispatcher(dir.path(), "win32", "x64")
            .unwrap()
            .prepare()
            .unwrap();
        assert_eq!(prepared.target, PlatformTarget::new(Os::Windows, Arch::Amd64));
        assert_eq!(
            prepared.path,
            dir.path().join("binaries").join("tl-windows-amd64.exe")
        );
    }

    #[test]
    fn test_unsupported_host_wins_over_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tl-launcher.toml"), "program = [").unwrap();

        let err = dispatcher(dir.path(), "linux", "s390x").err().unwrap();
        assert!(matches!(err, Error::UnsupportedArchitecture { ref arch } if arch == "s390x"));

        let err = dispatcher(dir.path(), "haiku", "x86_64").err().unwrap();
        assert!(matches!(err, Error::UnsupportedPlatform { ref platform } if platform == "haiku"));

        // A supported host does read the config
        let err = dispatcher(dir.path(), "linux", "x86_64").err().unwrap();
        assert!(matches!(err, Error::ParseConfig { .. }), "{err:?}");
    }

    #[test]
    fn test_unsupported_host_never_locates_itself() {
        let err = Dispatcher::load(&FixedHost::new("linux", "mips"), || {
            panic!("launcher location looked up for an unsupported host")
        })
        .err()
        .unwrap();
        assert!(matches!(err, Error::UnsupportedArchitecture { .. }));
    }

    #[test]
    fn test_target_is_resolved_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = dispatcher(dir.path(), "macos", "aarch64").unwrap();
        assert_eq!(launcher.target(), PlatformTarget::new(Os::Darwin, Arch::Arm64));
        assert_eq!(launcher.config(), &LauncherConfig::default());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        /// Writes a non-executable `/bin/sh` stand-in for the tl binary.
        fn install_stub(root: &Path, name: &str, body: &str) -> PathBuf {
            let dir = root.join("binaries");
            std::fs::create_dir_all(&dir).unwrap();
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
            path
        }

        fn linux(root: &Path) -> Dispatcher {
            dispatcher(root, "linux", "x86_64").unwrap()
        }

        #[test]
        fn test_forwards_exact_arguments_and_exit_code() {
            let dir = tempfile::tempdir().unwrap();
            let args_file = dir.path().join("args.txt");
            install_stub(
                dir.path(),
                "tl-linux-amd64",
                &format!(
                    "printf '%s\\n' \"$@\" > '{}'\nexit 7",
                    args_file.display()
                ),
            );

            let code = linux(dir.path())
                .dispatch(&[OsString::from("--version")])
                .unwrap();

            assert_eq!(code, 7);
            assert_eq!(std::fs::read_to_string(&args_file).unwrap(), "--version\n");
        }

        #[test]
        fn test_arguments_are_not_interpreted() {
            let dir = tempfile::tempdir().unwrap();
            let args_file = dir.path().join("args.txt");
            install_stub(
                dir.path(),
                "tl-linux-amd64",
                &format!("printf '%s\\n' \"$@\" > '{}'", args_file.display()),
            );

            let args: Vec<OsString> = ["--", "two words", "-h", ""]
                .into_iter()
                .map(OsString::from)
                .collect();
            let code = linux(dir.path()).dispatch(&args).unwrap();

            assert_eq!(code, 0);
            assert_eq!(
                std::fs::read_to_string(&args_file).unwrap(),
                "--\ntwo words\n-h\n\n"
            );
        }

        #[test]
        fn test_binary_made_executable_before_run() {
            let dir = tempfile::tempdir().unwrap();
            let path = install_stub(dir.path(), "tl-linux-amd64", "exit 0");

            linux(dir.path()).dispatch(&[]).unwrap();

            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
            assert_eq!(mode & 0o777, 0o755);
        }

        #[test]
        fn test_repeated_dispatch_is_idempotent() {
            let dir = tempfile::tempdir().unwrap();
            install_stub(dir.path(), "tl-linux-amd64", "exit 3");

            let launcher = linux(dir.path());
            let args = [OsString::from("list")];
            let first = launcher.dispatch(&args).unwrap();
            let second = launcher.dispatch(&args).unwrap();

            assert_eq!(first, 3);
            assert_eq!(first, second);
        }

        #[test]
        fn test_signalled_child_is_not_success() {
            let dir = tempfile::tempdir().unwrap();
            install_stub(dir.path(), "tl-linux-amd64", "kill -9 $$");

            let code = linux(dir.path()).dispatch(&[]).unwrap();
            assert_eq!(code, 128 + 9);
        }

        #[test]
        fn test_unspawnable_binary_is_spawn_failure() {
            let dir = tempfile::tempdir().unwrap();
            // A directory passes the existence check but cannot be executed
            std::fs::create_dir_all(dir.path().join("binaries/tl-linux-amd64")).unwrap();

            let err = linux(dir.path()).dispatch(&[]).unwrap_err();
            assert!(matches!(err, Error::SpawnFailure { .. }), "{err:?}");
            assert!(err.to_string().starts_with("failed to run binary"));
        }
    }
}
