use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpStream};
use std::time::Duration;

use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::{Result, TransportError};

/// A connected stream to the emulator — implements Read + Write.
///
/// Loopback TCP on Windows-style endpoints, a Unix domain socket
/// elsewhere. The stream exclusively owns its handle; dropping it
/// closes the connection.
pub struct PineStream {
    inner: StreamInner,
}

enum StreamInner {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(std::os::unix::net::UnixStream),
}

impl PineStream {
    /// Connect to an endpoint with a bounded connect timeout, then
    /// apply the same bound as read/write timeout on the stream.
    pub fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<Self> {
        let stream = match endpoint {
            Endpoint::Loopback { port } => {
                let port =
                    u16::try_from(*port).map_err(|_| TransportError::PortOutOfRange { slot: *port })?;
                let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port));
                let stream =
                    TcpStream::connect_timeout(&addr, timeout).map_err(|e| TransportError::Connect {
                        endpoint: endpoint.to_string(),
                        source: e,
                    })?;
                stream.set_nodelay(true)?;
                Self {
                    inner: StreamInner::Tcp(stream),
                }
            }
            Endpoint::Socket { path } => Self::connect_socket(path, endpoint)?,
        };

        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        debug!(%endpoint, ?timeout, "connected to emulator");
        Ok(stream)
    }

    #[cfg(unix)]
    fn connect_socket(path: &std::path::Path, endpoint: &Endpoint) -> Result<Self> {
        let stream =
            std::os::unix::net::UnixStream::connect(path).map_err(|e| TransportError::Connect {
                endpoint: endpoint.to_string(),
                source: e,
            })?;
        Ok(Self {
            inner: StreamInner::Unix(stream),
        })
    }

    // Socket endpoints are never resolved on Windows-style platforms,
    // but an explicit endpoint override can still name one.
    #[cfg(not(unix))]
    fn connect_socket(_path: &std::path::Path, endpoint: &Endpoint) -> Result<Self> {
        Err(TransportError::Connect {
            endpoint: endpoint.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "unix socket endpoints require a unix platform",
            ),
        })
    }

    /// Set read timeout on the underlying stream.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            StreamInner::Tcp(stream) => stream.set_read_timeout(timeout).map_err(Into::into),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.set_read_timeout(timeout).map_err(Into::into),
        }
    }

    /// Set write timeout on the underlying stream.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            StreamInner::Tcp(stream) => stream.set_write_timeout(timeout).map_err(Into::into),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.set_write_timeout(timeout).map_err(Into::into),
        }
    }
}

impl Read for PineStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            StreamInner::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for PineStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            StreamInner::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            StreamInner::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            StreamInner::Unix(stream) => stream.flush(),
        }
    }
}

impl std::fmt::Debug for PineStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.inner {
            StreamInner::Tcp(_) => "tcp",
            #[cfg(unix)]
            StreamInner::Unix(_) => "unix",
        };
        f.debug_struct("PineStream").field("type", &kind).finish()
    }
}
