//! # Telemetry Module
//!
//! Streams control frames to the external consumer over UDP.
//!
//! This module handles:
//! - Encoding frames as a fixed three-field JSON payload
//! - Non-blocking, drop-on-backpressure transmission
//! - Socket lifetime (released on drop)
//! - Receiving and decoding packets for local testing

pub mod listener;
pub mod packet;
pub mod socket;
pub mod transport;

pub use packet::TelemetryPacket;
pub use transport::{TelemetryDestination, TelemetryTransport, TransportOptions, TransportStats};
