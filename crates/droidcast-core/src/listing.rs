//! Parser for the debug bridge's `devices -l` listing output.
//!
//! The tool prints a known header line followed by one line per attached
//! device:
//!
//! ```text
//! List of devices attached
//! XYZ123                 device usb:1-1 product:raven model:Pixel_6 device:raven
//! 192.168.1.5:5555       device product:raven model:Pixel_6 device:raven
//! 0A1B2C3D               unauthorized usb:1-2
//! ```
//!
//! Only lines in the authorized `device` state are surfaced.  Blank lines,
//! `unauthorized`/`offline` entries, and trailing summary lines do not match
//! the line pattern and are silently skipped.  An unparsable `model:` token
//! never aborts the overall parse; that device falls back to `"Unknown"`.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::domain::device::{AndroidDevice, ConnectionMode};

/// Matches `<id> device [details]`.  The id is the first whitespace-free
/// token; the literal state token `device` must follow; everything after it
/// is free-form `key:value` details.
fn device_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\S+)\s+device(?:\s+(.*))?$").expect("valid regex"))
}

/// Extracts the value of a `model:<value>` token from the details substring.
fn model_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"model:(\S+)").expect("valid regex"))
}

/// Parses the raw stdout of `adb devices -l` into device records.
///
/// The first line is the known header and is always discarded.  Records are
/// emitted in source order, one per matching line, without deduplication.
/// Empty output (no devices attached) yields an empty vec, not an error —
/// parsing itself cannot fail.
pub fn parse_device_listing(output: &str) -> Vec<AndroidDevice> {
    let mut devices = Vec::new();

    for line in output.lines().skip(1) {
        let Some(captures) = device_line_re().captures(line) else {
            continue;
        };

        // Group 1 always matches `\S+`, so the id is non-empty.
        let id = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let details = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

        let model = model_re()
            .captures(details)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        devices.push(AndroidDevice {
            id: id.to_string(),
            model,
            status: "device".to_string(),
            connection_mode: ConnectionMode::classify(id),
        });
    }

    devices
}
