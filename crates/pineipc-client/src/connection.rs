use std::time::Duration;

use tracing::debug;

use pineipc_transport::{Endpoint, PineStream};

/// Connection lifecycle state.
///
/// ```text
/// Disconnected --connect success--> Connected
/// Connected    --send/recv error--> Disconnected
/// Disconnected --connect failure--> Disconnected
/// ```
///
/// There is no terminal state; reconnection is retried lazily on the
/// next use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No usable transport handle.
    Disconnected,
    /// Transport handle open and presumed healthy.
    Connected,
}

/// Owns the transport handle and the reconnect policy.
///
/// The stream is opened lazily on first use and dropped on any
/// detected fault, so the next call re-acquires it from the resolver.
#[derive(Debug)]
pub struct Connection {
    endpoint: Endpoint,
    timeout: Duration,
    stream: Option<PineStream>,
}

impl Connection {
    /// Create a connection in the `Disconnected` state.
    #[must_use]
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Self {
        Self {
            endpoint,
            timeout,
            stream: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        if self.stream.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Attempt to connect if disconnected. A failed attempt is
    /// swallowed and leaves the state unchanged; callers observe it
    /// through [`Connection::stream_mut`] failing.
    pub fn ensure_connected(&mut self) {
        if self.stream.is_some() {
            return;
        }
        match PineStream::connect(&self.endpoint, self.timeout) {
            Ok(stream) => {
                debug!(endpoint = %self.endpoint, "connection established");
                self.stream = Some(stream);
            }
            Err(err) => {
                debug!(endpoint = %self.endpoint, %err, "connect attempt failed");
            }
        }
    }

    /// The open stream, or a `NotConnected` error naming the endpoint
    /// that could not be reached.
    pub fn stream_mut(&mut self) -> std::io::Result<&mut PineStream> {
        match self.stream.as_mut() {
            Some(stream) => Ok(stream),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                format!("emulator is not reachable at {}", self.endpoint),
            )),
        }
    }

    /// Drop the transport handle after a detected fault.
    pub fn reset(&mut self) {
        if self.stream.take().is_some() {
            debug!(endpoint = %self.endpoint, "connection reset");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disconnected() {
        let conn = Connection::new(
            Endpoint::Socket {
                path: "/tmp/absent.sock".into(),
            },
            Duration::from_millis(10),
        );
        assert_eq!(conn.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn failed_connect_leaves_state_unchanged() {
        let mut conn = Connection::new(
            Endpoint::Socket {
                path: std::env::temp_dir()
                    .join(format!("pineipc-conn-none-{}.sock", std::process::id())),
            },
            Duration::from_millis(10),
        );
        conn.ensure_connected();
        assert_eq!(conn.state(), ConnectionState::Disconnected);

        let err = conn.stream_mut().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotConnected);
        assert!(err.to_string().contains("pineipc-conn-none"));
    }

    #[test]
    #[cfg(unix)]
    fn connects_resets_and_reconnects() {
        let dir = std::env::temp_dir().join(format!("pineipc-conn-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let sock_path = dir.join("test.sock");
        let listener = std::os::unix::net::UnixListener::bind(&sock_path).unwrap();

        let mut conn = Connection::new(
            Endpoint::Socket {
                path: sock_path.clone(),
            },
            Duration::from_millis(200),
        );

        conn.ensure_connected();
        assert_eq!(conn.state(), ConnectionState::Connected);
        let _first = listener.accept().unwrap();

        conn.reset();
        assert_eq!(conn.state(), ConnectionState::Disconnected);

        conn.ensure_connected();
        assert_eq!(conn.state(), ConnectionState::Connected);
        let _second = listener.accept().unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
