//! Launcher shims for the pre-built tl binaries
//!
//! - [`dispatcher`]: `tl` picks `binaries/tl-<os>-<arch>` and hands the terminal over to it
//! - [`bd`]: `bd` forwards daily-use beads commands to `tl`, everything else to `bd.real`

pub mod bd;
pub mod dispatcher;
pub mod logging;
pub mod prepare;
pub mod process;

pub use dispatcher::Dispatcher;
