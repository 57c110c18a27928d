//! # Telemetry Packet
//!
//! Fixed three-field payload sent once per frame.
//!
//! ## Wire Format
//!
//! One compact UTF-8 JSON object per datagram:
//!
//! ```text
//! {"roll":0.42,"pitch":-0.17,"active":true}
//! ```
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `roll` | number | Smoothed roll (-1.0 to 1.0) |
//! | `pitch` | number | Smoothed pitch (-1.0 to 1.0) |
//! | `active` | bool | Hand tracked this frame |

use serde::{Deserialize, Serialize};

use crate::control::pipeline::ControlFrame;
use crate::error::{HandPilotError, Result};

/// Serialized form of a [`ControlFrame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryPacket {
    pub roll: f32,
    pub pitch: f32,
    pub active: bool,
}

impl From<&ControlFrame> for TelemetryPacket {
    fn from(frame: &ControlFrame) -> Self {
        Self {
            roll: frame.roll,
            pitch: frame.pitch,
            active: frame.tracking,
        }
    }
}

/// Encode a control frame into a datagram payload
///
/// # Errors
///
/// Returns [`HandPilotError::Serialization`] if roll or pitch is not finite.
/// JSON has no representation for NaN or infinity.
///
/// # Examples
///
/// ```
/// use hand_pilot::control::pipeline::ControlFrame;
/// use hand_pilot::telemetry::packet::encode;
///
/// let frame = ControlFrame { roll: 0.5, pitch: -0.25, tracking: true };
/// let bytes = encode(&frame)?;
/// assert_eq!(bytes, br#"{"roll":0.5,"pitch":-0.25,"active":true}"#);
/// # Ok::<(), hand_pilot::error::HandPilotError>(())
/// ```
pub fn encode(frame: &ControlFrame) -> Result<Vec<u8>> {
    let packet = TelemetryPacket::from(frame);

    for (name, value) in [("roll", packet.roll), ("pitch", packet.pitch)] {
        if !value.is_finite() {
            return Err(HandPilotError::Serialization(format!(
                "{} is not a finite number ({})",
                name, value
            )));
        }
    }

    serde_json::to_vec(&packet).map_err(|e| HandPilotError::Serialization(e.to_string()))
}

/// Decode a datagram payload
///
/// # Errors
///
/// Returns [`HandPilotError::Serialization`] if the payload is not a JSON
/// object with exactly the three expected fields.
pub fn decode(bytes: &[u8]) -> Result<TelemetryPacket> {
    serde_json::from_slice(bytes).map_err(|e| HandPilotError::Serialization(e.to_string()))
}
