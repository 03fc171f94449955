//! # Packet Recorder
//!
//! One-shot capture of live telemetry into a debug stream file that
//! [`ReplaySource`](crate::source::ReplaySource) can loop over.
//!
//! Only packets that are exactly one frame long and decode cleanly are kept,
//! so the resulting file is always a whole number of valid frames.

use bytes::BytesMut;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::RecorderConfig;
use crate::debug::format_hex_dump;
use crate::error::Result;
use crate::packet::{decode_packet, PACKET_SIZE};
use crate::source::PacketSource;

/// Bytes of a rejected packet shown at debug level
const HEX_DUMP_LIMIT: usize = 64;

/// Frames reserved up front; longer recordings grow the buffer as they go
const PREALLOC_FRAMES: u64 = 3600;

/// Outcome of a finished recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSummary {
    /// Frames written to disk
    pub kept: u64,
    /// Packets dropped for bad size or failed decode
    pub rejected: u64,
    pub bytes_written: usize,
    pub path: PathBuf,
}

/// Fixed-length capture session
#[derive(Debug, Clone)]
pub struct PacketRecorder {
    config: RecorderConfig,
}

impl PacketRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self { config }
    }

    /// Capture packets from `source` and write them to the output file
    ///
    /// Reads `packets_per_second * seconds_to_record` packets. Invalid
    /// packets are logged and skipped but still count towards the total.
    ///
    /// # Arguments
    ///
    /// * `source` - Packet source to capture from (normally the UDP listener)
    ///
    /// # Returns
    ///
    /// * `Result<RecordingSummary>` - Counts and output location
    ///
    /// # Errors
    ///
    /// Returns error if the source fails to read or the file cannot be written.
    /// Nothing is written when the source fails.
    pub async fn record(&self, source: &mut dyn PacketSource) -> Result<RecordingSummary> {
        let total = self.config.total_packets();
        let per_second = u64::from(self.config.packets_per_second);
        let mut capture = BytesMut::with_capacity(total.min(PREALLOC_FRAMES) as usize * PACKET_SIZE);
        let mut rejected = 0u64;

        info!(
            "Recording {} packets ({}s at {}Hz) from {}",
            total,
            self.config.seconds_to_record,
            self.config.packets_per_second,
            source.describe()
        );

        for i in 0..total {
            let packet = source.next_packet().await?;

            if packet.len() != PACKET_SIZE {
                warn!(
                    "Packet {}: expected {} bytes, got {} bytes",
                    i,
                    PACKET_SIZE,
                    packet.len()
                );
                debug!("Rejected packet:\n{}", format_hex_dump(&packet, HEX_DUMP_LIMIT));
                rejected += 1;
                continue;
            }

            if let Err(e) = decode_packet(&packet) {
                warn!("Packet {}: parse error: {}", i, e);
                debug!("Rejected packet:\n{}", format_hex_dump(&packet, HEX_DUMP_LIMIT));
                rejected += 1;
                continue;
            }

            capture.extend_from_slice(&packet);

            if i % per_second == 0 {
                info!(
                    "Recording: {}/{} seconds",
                    i / per_second,
                    self.config.seconds_to_record
                );
            }
        }

        let expected = total.saturating_mul(PACKET_SIZE as u64);
        if capture.len() as u64 != expected {
            warn!(
                "Expected file size {}, got {}",
                expected,
                capture.len()
            );
        }

        let path = PathBuf::from(&self.config.output_path);
        tokio::fs::write(&path, &capture).await?;

        let kept = (capture.len() / PACKET_SIZE) as u64;
        info!(
            "File written successfully: {} packets ({} bytes) to {}",
            kept,
            capture.len(),
            path.display()
        );

        Ok(RecordingSummary {
            kept,
            rejected,
            bytes_written: capture.len(),
            path,
        })
    }
}
