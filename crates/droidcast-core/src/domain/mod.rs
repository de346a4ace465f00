//! Domain entities for Droidcast.
//!
//! Pure business types with no infrastructure dependencies.  Everything the
//! rest of the system knows about an attached Android device lives here; the
//! records are rebuilt from tool output on every listing request and are
//! never persisted.

/// Android device record and connection-mode classification.
///
/// See [`device::AndroidDevice`] for the main type.
pub mod device;
