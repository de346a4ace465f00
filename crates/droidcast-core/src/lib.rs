//! # droidcast-core
//!
//! Shared library for Droidcast containing the device domain entities and the
//! parser for the debug bridge's device-listing output.
//!
//! This crate is the foundation of the desktop backend.  It has zero
//! dependencies on OS APIs, subprocess handling, or async runtimes, so every
//! type and function here can be unit-tested on any platform without an
//! Android device attached.
//!
//! # Architecture overview
//!
//! Droidcast is a desktop front-end over two external command-line tools:
//! the Android Debug Bridge (`adb`) for device enumeration, pairing, and
//! shell relay, and `scrcpy` for live screen mirroring.  This crate defines:
//!
//! - **`domain`** – The [`AndroidDevice`] record surfaced to the UI and the
//!   [`ConnectionMode`] classification derived from the shape of a device id.
//!
//! - **`listing`** – The parser that turns the tabular text output of
//!   `adb devices -l` into structured [`AndroidDevice`] records.

pub mod domain;
pub mod listing;

// Re-export the most-used types at the crate root so callers can write
// `droidcast_core::AndroidDevice` instead of the full module path.
pub use domain::device::{AndroidDevice, ConnectionMode};
pub use listing::parse_device_listing;
