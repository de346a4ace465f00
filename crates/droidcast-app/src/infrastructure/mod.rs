//! Infrastructure layer: everything that touches the operating system.
//!
//! Subprocess invocation, tool path resolution, the per-run diagnostic log,
//! TOML configuration persistence, and the UI command bridge live here.  The
//! application layer depends on this module only through the
//! [`process::CommandRunner`] trait seam.

pub mod process;
pub mod runlog;
pub mod storage;
pub mod tools;
pub mod ui_bridge;
