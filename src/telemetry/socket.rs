//! Trait abstraction for datagram socket operations to enable testing

use std::io;
use std::net::{SocketAddr, UdpSocket};

/// Trait for non-blocking datagram sends
#[cfg_attr(test, mockall::automock)]
pub trait DatagramSocket: Send {
    /// Send one datagram to `target`.
    ///
    /// Must not block. A full send buffer is reported as
    /// [`io::ErrorKind::WouldBlock`].
    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize>;

    /// Local address the socket is bound to
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl DatagramSocket for UdpSocket {
    fn send_to(&self, buf: &[u8], target: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, target)
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        UdpSocket::local_addr(self)
    }
}

/// Binds an ephemeral non-blocking UDP socket of the same address family as `target`.
pub fn bind_for(target: &SocketAddr) -> io::Result<UdpSocket> {
    let bind_addr: SocketAddr = if target.is_ipv4() {
        SocketAddr::from(([0, 0, 0, 0], 0))
    } else {
        SocketAddr::from(([0u16; 8], 0))
    };

    let socket = UdpSocket::bind(bind_addr)?;
    socket.set_nonblocking(true)?;
    Ok(socket)
}
