//! Live Data Out listener
//!
//! The game sends one datagram per telemetry frame to the address set in its
//! HUD options. Datagrams are handed on as-is; length checking is left to the
//! decoder.

use async_trait::async_trait;
use bytes::Bytes;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};

use super::PacketSource;
use crate::config::ListenerConfig;
use crate::error::{Result, TelemetryError};

/// UDP socket bound to the Data Out address
pub struct UdpSource {
    socket: UdpSocket,
    buf: Vec<u8>,
    read_timeout: Option<Duration>,
    local_addr: SocketAddr,
}

impl std::fmt::Debug for UdpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpSource")
            .field("local_addr", &self.local_addr)
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}

impl UdpSource {
    /// Bind the listener socket
    ///
    /// # Arguments
    ///
    /// * `config` - Listener settings (address, port, buffer size, timeout)
    ///
    /// # Returns
    ///
    /// * `Result<UdpSource>` - Bound socket or error
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be bound
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fh5_dash::config::ListenerConfig;
    /// use fh5_dash::source::{PacketSource, UdpSource};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut source = UdpSource::bind(&ListenerConfig::default()).await?;
    ///     let packet = source.next_packet().await?;
    ///     println!("received {} bytes", packet.len());
    ///     Ok(())
    /// }
    /// ```
    pub async fn bind(config: &ListenerConfig) -> Result<Self> {
        let addr = config.socket_addr();
        let socket = UdpSocket::bind(&addr).await.map_err(|e| {
            warn!("Failed to bind UDP socket on {}: {}", addr, e);
            e
        })?;
        let local_addr = socket.local_addr()?;

        info!("Listening for Data Out telemetry on udp://{}", local_addr);

        Ok(Self {
            socket,
            buf: vec![0u8; config.recv_buffer_size],
            read_timeout: (config.read_timeout_ms > 0)
                .then(|| Duration::from_millis(config.read_timeout_ms)),
            local_addr,
        })
    }

    /// Address the socket is actually bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[async_trait]
impl PacketSource for UdpSource {
    async fn next_packet(&mut self) -> Result<Bytes> {
        let recv = self.socket.recv_from(&mut self.buf);

        let (len, peer) = match self.read_timeout {
            Some(limit) => tokio::time::timeout(limit, recv)
                .await
                .map_err(|_| TelemetryError::ReadTimeout(limit.as_millis() as u64))??,
            None => recv.await?,
        };

        debug!("Received {} byte datagram from {}", len, peer);
        Ok(Bytes::copy_from_slice(&self.buf[..len]))
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_config(read_timeout_ms: u64) -> ListenerConfig {
        ListenerConfig {
            bind_address: "127.0.0.1".to_string(),
            // OS-assigned port so tests can run in parallel
            port: 0,
            recv_buffer_size: 1024,
            read_timeout_ms,
        }
    }

    async fn bind_loopback(read_timeout_ms: u64) -> UdpSource {
        UdpSource::bind(&loopback_config(read_timeout_ms)).await.unwrap()
    }

    #[tokio::test]
    async fn test_receives_one_datagram_per_read() {
        let mut source = bind_loopback(2000).await;
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        sender.send_to(&[1u8; 324], source.local_addr()).await.unwrap();
        sender.send_to(&[2u8; 10], source.local_addr()).await.unwrap();

        let first = source.next_packet().await.unwrap();
        assert_eq!(first.len(), 324);
        assert!(first.iter().all(|&b| b == 1));

        let second = source.next_packet().await.unwrap();
        assert_eq!(&second[..], &[2u8; 10]);
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let mut source = bind_loopback(50).await;
        let result = source.next_packet().await;
        assert!(matches!(result, Err(TelemetryError::ReadTimeout(50))));
    }

    #[tokio::test]
    async fn test_describe_includes_address() {
        let source = bind_loopback(0).await;
        assert_eq!(source.describe(), format!("udp://{}", source.local_addr()));
        assert!(source.describe().starts_with("udp://127.0.0.1:"));
    }

    #[tokio::test]
    async fn test_bind_unavailable_address() {
        let mut config = loopback_config(0);
        // TEST-NET-3, never assigned to a local interface
        config.bind_address = "203.0.113.1".to_string();
        let result = UdpSource::bind(&config).await;
        assert!(matches!(result, Err(TelemetryError::Io(_))));
    }
}
