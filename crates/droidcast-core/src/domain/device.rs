//! Android device entity and connection-mode classification.
//!
//! An [`AndroidDevice`] is derived entirely from one line of `adb devices -l`
//! output.  The id is either a USB serial (`ABC123XYZ`) or a network endpoint
//! (`192.168.1.5:5555`) depending on how the device is attached.
//!
//! # Connection-mode heuristic
//!
//! The listing output carries no explicit transport field, so the mode is
//! inferred from the shape of the id alone: a `:5555` suffix or any literal
//! `.` character suggests a dotted host address and classifies the device as
//! TCP/IP; everything else is treated as USB.  A USB-attached device could in
//! principle carry a dotted serial, but no better signal is available from
//! the tool's output, so the heuristic is kept as-is.

use serde::{Deserialize, Serialize};

/// How a device is attached to the debug bridge.
///
/// Serialized lowercase (`"usb"`, `"tcpip"`, `"unknown"`) to match the
/// transport strings the UI shell expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// Attached over a USB cable; the id is a device serial.
    Usb,
    /// Attached over the network; the id is a `host:port` endpoint.
    Tcpip,
    /// Reserved for ids the heuristic cannot classify.  The current
    /// heuristic always resolves to `Usb` or `Tcpip`, but the variant is
    /// part of the UI contract.
    Unknown,
}

impl ConnectionMode {
    /// Classifies a device id by its shape.
    ///
    /// `:5555` suffix or any `.` character → [`ConnectionMode::Tcpip`],
    /// otherwise [`ConnectionMode::Usb`].
    pub fn classify(id: &str) -> Self {
        if id.contains(":5555") || id.contains('.') {
            ConnectionMode::Tcpip
        } else {
            ConnectionMode::Usb
        }
    }
}

/// One attached Android device as reported by a single listing request.
///
/// Invariant: `id` is non-empty and unique within one listing response
/// (uniqueness is the debug bridge's contract; the parser does not
/// deduplicate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidDevice {
    /// Device serial or `host:port` endpoint.
    pub id: String,
    /// Human-readable model name, `"Unknown"` when the listing line carries
    /// no parsable `model:` token.
    pub model: String,
    /// Authorization state.  Only devices in the `device` state are surfaced
    /// by the parser, so this is currently always `"device"`.
    pub status: String,
    /// Transport classification per [`ConnectionMode::classify`].
    pub connection_mode: ConnectionMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Connection-mode classification ────────────────────────────────────────

    #[test]
    fn test_classify_default_tcpip_port_is_tcpip() {
        assert_eq!(
            ConnectionMode::classify("192.168.1.5:5555"),
            ConnectionMode::Tcpip
        );
    }

    #[test]
    fn test_classify_dotted_host_with_other_port_is_tcpip() {
        // The `.` alone is enough; the port does not have to be 5555.
        assert_eq!(
            ConnectionMode::classify("192.168.1.5:40000"),
            ConnectionMode::Tcpip
        );
    }

    #[test]
    fn test_classify_plain_serial_is_usb() {
        assert_eq!(ConnectionMode::classify("ABC123XYZ"), ConnectionMode::Usb);
    }

    #[test]
    fn test_classify_emulator_serial_is_usb() {
        // Emulator ids contain `:` but neither `:5555` nor `.`.
        assert_eq!(
            ConnectionMode::classify("emulator-5554"),
            ConnectionMode::Usb
        );
    }

    #[test]
    fn test_classify_dotted_serial_without_port_is_tcpip() {
        // Documented ambiguity: any dot classifies as tcpip.
        assert_eq!(
            ConnectionMode::classify("serial.with.dots"),
            ConnectionMode::Tcpip
        );
    }

    // ── Serde representation ──────────────────────────────────────────────────

    #[test]
    fn test_connection_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ConnectionMode::Tcpip).unwrap(),
            r#""tcpip""#
        );
        assert_eq!(
            serde_json::to_string(&ConnectionMode::Usb).unwrap(),
            r#""usb""#
        );
        assert_eq!(
            serde_json::to_string(&ConnectionMode::Unknown).unwrap(),
            r#""unknown""#
        );
    }

    #[test]
    fn test_android_device_round_trips_through_json() {
        // Arrange
        let device = AndroidDevice {
            id: "XYZ123".to_string(),
            model: "Pixel_6".to_string(),
            status: "device".to_string(),
            connection_mode: ConnectionMode::Usb,
        };

        // Act
        let json = serde_json::to_string(&device).unwrap();
        let decoded: AndroidDevice = serde_json::from_str(&json).unwrap();

        // Assert
        assert_eq!(device, decoded);
        assert!(json.contains(r#""connection_mode":"usb""#));
    }
}
