//! Async receiver for telemetry packets.
//!
//! Stands in for the downstream consumer when testing locally
//! (`hand-pilot --listen`).

use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::debug;

use super::packet::{self, TelemetryPacket};
use crate::error::{HandPilotError, Result};

/// Largest datagram accepted. Telemetry payloads are far smaller.
const MAX_DATAGRAM_SIZE: usize = 1024;

/// Receives and decodes telemetry datagrams.
#[derive(Debug)]
pub struct TelemetryListener {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl TelemetryListener {
    /// Binds a listener to `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`HandPilotError::Resource`] if the address cannot be bound.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await.map_err(HandPilotError::Resource)?;
        Ok(Self {
            socket,
            buf: vec![0u8; MAX_DATAGRAM_SIZE],
        })
    }

    /// Address the listener is bound to.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket address cannot be read.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Waits for the next datagram and decodes it.
    ///
    /// # Returns
    ///
    /// * `Ok((Ok(packet), from))` - A well-formed packet
    /// * `Ok((Err(e), from))` - A datagram arrived but did not decode
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket fails.
    pub async fn recv(&mut self) -> Result<(Result<TelemetryPacket>, SocketAddr)> {
        let (len, from) = self.socket.recv_from(&mut self.buf).await?;
        debug!("Received {} bytes from {}", len, from);
        Ok((packet::decode(&self.buf[..len]), from))
    }
}
