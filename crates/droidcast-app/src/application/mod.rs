//! Application layer: the use cases behind the bridge commands.
//!
//! Each use case drives the external tools through the
//! [`crate::infrastructure::process::CommandRunner`] seam and returns either
//! the tool's trimmed output or a propagated tool failure.  No use case keeps
//! cross-request state beyond the mirror-session registry; every operation is
//! independent and may be invoked in any order.

pub mod device_directory;
pub mod session;
