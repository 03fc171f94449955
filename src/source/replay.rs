//! Debug stream replay
//!
//! A debug stream is a file of back-to-back 324-byte frames, as written by
//! the recorder. Reading past the last frame wraps around to the first one,
//! so a short recording can drive the dashboard indefinitely.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::PacketSource;
use crate::error::{Result, TelemetryError};
use crate::packet::PACKET_SIZE;

/// Looping reader over a recorded debug stream
#[derive(Debug)]
pub struct ReplaySource {
    data: Bytes,
    position: usize,
    origin: Option<PathBuf>,
    period: Option<Duration>,
    next_due: Option<Instant>,
}

impl ReplaySource {
    /// Load a debug stream file
    ///
    /// # Arguments
    ///
    /// * `path` - Recording made of whole 324-byte frames
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file cannot be read
    /// - The file size is not a multiple of the frame size
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fh5_dash::source::ReplaySource;
    ///
    /// let mut replay = ReplaySource::open("debugstream")?;
    /// let first = replay.read_next()?;
    /// assert_eq!(first.len(), 324);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut source = Self::from_bytes(Bytes::from(data))?;
        source.origin = Some(path.to_path_buf());

        info!(
            "Loaded debug stream {} ({} frames)",
            path.display(),
            source.frame_count()
        );
        Ok(source)
    }

    /// Wrap an in-memory recording
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::FileSizeMismatch`] if `data` is not a whole
    /// number of frames.
    pub fn from_bytes(data: Bytes) -> Result<Self> {
        if data.len() % PACKET_SIZE != 0 {
            return Err(TelemetryError::FileSizeMismatch {
                size: data.len(),
                frame_size: PACKET_SIZE,
            });
        }

        Ok(Self {
            data,
            position: 0,
            origin: None,
            period: None,
            next_due: None,
        })
    }

    /// Pace [`PacketSource::next_packet`] to a fixed rate (0 = unpaced)
    pub fn with_rate(mut self, packets_per_second: u32) -> Self {
        self.period = (packets_per_second > 0)
            .then(|| Duration::from_secs(1) / packets_per_second);
        self
    }

    /// Number of frames in the recording
    pub fn frame_count(&self) -> usize {
        self.data.len() / PACKET_SIZE
    }

    /// Return the next frame, wrapping to the start after the last one
    ///
    /// The returned buffer shares the underlying recording; no copy is made.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::IncompletePacketAtOffset`] if less than one
    /// frame remains at the read position (only possible for an empty
    /// recording).
    pub fn read_next(&mut self) -> Result<Bytes> {
        if self.position >= self.data.len() {
            if self.position > 0 {
                debug!("Debug stream exhausted, wrapping to start");
            }
            self.position = 0;
        }

        if self.data.len() - self.position < PACKET_SIZE {
            return Err(TelemetryError::IncompletePacketAtOffset {
                offset: self.position,
            });
        }

        let frame = self.data.slice(self.position..self.position + PACKET_SIZE);
        self.position += PACKET_SIZE;
        Ok(frame)
    }

    async fn wait_for_slot(&mut self) {
        let Some(period) = self.period else {
            return;
        };

        let now = Instant::now();
        match self.next_due {
            Some(due) if due > now => {
                tokio::time::sleep_until(due).await;
                self.next_due = Some(due + period);
            }
            _ => self.next_due = Some(now + period),
        }
    }
}

#[async_trait]
impl PacketSource for ReplaySource {
    async fn next_packet(&mut self) -> Result<Bytes> {
        self.wait_for_slot().await;
        self.read_next()
    }

    fn describe(&self) -> String {
        match &self.origin {
            Some(path) => format!("replay {}", path.display()),
            None => "replay <memory>".to_string(),
        }
    }
}
