//! # Telemetry Transport
//!
//! Sends one datagram per [`ControlFrame`] to a fixed destination.
//!
//! This module handles:
//! - Validating and resolving the destination
//! - Binding a non-blocking UDP socket
//! - Dropping packets on backpressure instead of queueing or retrying
//! - Dropping packets that cannot be serialized
//! - Releasing the socket on every exit path
//!
//! Telemetry is a live state stream. The next frame supersedes a dropped one,
//! so `send` never blocks and never reports an error to the caller.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use tracing::{debug, info, warn};

use super::packet;
use super::socket::{self, DatagramSocket};
use crate::control::pipeline::ControlFrame;
use crate::error::{HandPilotError, Result};

/// Where telemetry packets are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryDestination {
    host: String,
    port: u16,
}

impl TelemetryDestination {
    /// Creates a validated destination.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::InvalidParameter`] if `host` is empty or
    /// `port` is outside 1-65535.
    ///
    /// # Examples
    ///
    /// ```
    /// use hand_pilot::telemetry::transport::TelemetryDestination;
    ///
    /// let dest = TelemetryDestination::new("127.0.0.1", 5005)?;
    /// assert_eq!(dest.to_string(), "127.0.0.1:5005");
    ///
    /// assert!(TelemetryDestination::new("127.0.0.1", 0).is_err());
    /// assert!(TelemetryDestination::new("127.0.0.1", 70000).is_err());
    /// # Ok::<(), hand_pilot::error::HandPilotError>(())
    /// ```
    pub fn new(host: impl Into<String>, port: u32) -> Result<Self> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(HandPilotError::InvalidParameter(
                "telemetry host cannot be empty".to_string(),
            ));
        }

        let port = u16::try_from(port)
            .ok()
            .filter(|&p| p != 0)
            .ok_or_else(|| {
                HandPilotError::InvalidParameter(format!(
                    "port must be between 1 and 65535, got {}",
                    port
                ))
            })?;

        Ok(Self { host, port })
    }

    /// Destination host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Destination port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolves to the first socket address for this destination.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::Resource`] if the host cannot be resolved.
    pub fn resolve(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(HandPilotError::Resource)?
            .next()
            .ok_or_else(|| {
                HandPilotError::Resource(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address found for {}", self),
                ))
            })
    }
}

impl fmt::Display for TelemetryDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Transport behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportOptions {
    /// Log every transmitted payload at info level.
    pub debug_packets: bool,
}

/// Packet counters kept by a [`TelemetryTransport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Datagrams handed to the socket.
    pub sent: u64,
    /// Packets dropped because the send buffer was full.
    pub dropped_backpressure: u64,
    /// Packets dropped because roll or pitch was not finite.
    pub dropped_invalid: u64,
    /// Packets dropped on any other socket error.
    pub failed: u64,
}

impl TransportStats {
    /// Total packets that were not sent.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped_backpressure + self.dropped_invalid + self.failed
    }
}

/// Non-blocking, drop-tolerant telemetry sender.
///
/// Owns its socket exclusively. The socket is released when the transport is
/// closed or dropped.
pub struct TelemetryTransport<S: DatagramSocket = UdpSocket> {
    socket: Option<S>,
    target: SocketAddr,
    options: TransportOptions,
    stats: TransportStats,
}

impl<S: DatagramSocket> fmt::Debug for TelemetryTransport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryTransport")
            .field("target", &self.target)
            .field("open", &self.socket.is_some())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl TelemetryTransport<UdpSocket> {
    /// Opens a UDP transport to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::Resource`] if the destination cannot be
    /// resolved or the socket cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hand_pilot::control::pipeline::ControlFrame;
    /// use hand_pilot::telemetry::transport::{
    ///     TelemetryDestination, TelemetryTransport, TransportOptions,
    /// };
    ///
    /// let dest = TelemetryDestination::new("127.0.0.1", 5005)?;
    /// let mut transport = TelemetryTransport::open(&dest, TransportOptions::default())?;
    /// transport.send(&ControlFrame::neutral());
    /// # Ok::<(), hand_pilot::error::HandPilotError>(())
    /// ```
    pub fn open(destination: &TelemetryDestination, options: TransportOptions) -> Result<Self> {
        let target = destination.resolve()?;
        let socket = socket::bind_for(&target).map_err(|e| {
            warn!("Failed to create telemetry socket for {}: {}", destination, e);
            HandPilotError::Resource(e)
        })?;

        info!("UDP telemetry initialized targeting {} ({})", destination, target);
        Ok(Self::with_socket(socket, target, options))
    }
}

impl<S: DatagramSocket> TelemetryTransport<S> {
    /// Wraps an already-created socket.
    #[must_use]
    pub fn with_socket(socket: S, target: SocketAddr, options: TransportOptions) -> Self {
        Self {
            socket: Some(socket),
            target,
            options,
            stats: TransportStats::default(),
        }
    }

    /// Resolved destination address.
    #[must_use]
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Local address of the socket, if still open.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    /// Packet counters since the transport was opened.
    #[must_use]
    pub fn stats(&self) -> TransportStats {
        self.stats
    }

    /// Sends one frame.
    ///
    /// Never blocks and never fails. Unserializable frames are logged as a
    /// warning and dropped. A full send buffer drops the packet silently.
    pub fn send(&mut self, frame: &ControlFrame) {
        let Some(socket) = self.socket.as_ref() else {
            return;
        };

        let payload = match packet::encode(frame) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Dropping telemetry packet: {}", e);
                self.stats.dropped_invalid += 1;
                return;
            }
        };

        match socket.send_to(&payload, self.target) {
            Ok(_) => {
                self.stats.sent += 1;
                if self.options.debug_packets {
                    info!("Sent telemetry: {}", String::from_utf8_lossy(&payload));
                } else {
                    debug!("Sent telemetry packet ({} bytes)", payload.len());
                }
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                debug!("Send buffer full, dropping telemetry packet");
                self.stats.dropped_backpressure += 1;
            }
            Err(e) => {
                warn!("Telemetry transmission error: {}", e);
                self.stats.failed += 1;
            }
        }
    }

    /// Closes the socket and returns the final counters.
    pub fn close(mut self) -> TransportStats {
        self.release();
        self.stats
    }

    fn release(&mut self) {
        if self.socket.take().is_some() {
            info!(
                "UDP telemetry socket closed ({} sent, {} dropped)",
                self.stats.sent,
                self.stats.dropped()
            );
        }
    }
}

impl<S: DatagramSocket> Drop for TelemetryTransport<S> {
    fn drop(&mut self) {
        self.release();
    }
}
