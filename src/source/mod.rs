//! # Packet Source Module
//!
//! Byte sources that feed raw telemetry frames to the decoder.
//!
//! This module handles:
//! - Receiving Data Out datagrams from the game over UDP
//! - Replaying a recorded debug stream from disk in an endless loop
//!
//! Each call to [`PacketSource::next_packet`] yields exactly one packet; no
//! reassembly or resynchronisation is attempted.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

pub mod replay;
pub mod udp;

pub use replay::ReplaySource;
pub use udp::UdpSource;

/// Trait for anything that yields one telemetry packet per read
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PacketSource: Send {
    /// Wait for and return the next packet
    async fn next_packet(&mut self) -> Result<Bytes>;

    /// Short human-readable description (address or file path)
    fn describe(&self) -> String;
}
