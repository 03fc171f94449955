//! # Error Types
//!
//! Custom error types for FH5 Dash using `thiserror`.

use thiserror::Error;

/// Main error type for FH5 Dash
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Buffer shorter than one telemetry frame
    #[error("packet too small: got {got} bytes, need {want}")]
    PacketTooSmall { got: usize, want: usize },

    /// Replay data ended part-way through a frame
    #[error("incomplete packet at offset {offset}")]
    IncompletePacketAtOffset { offset: usize },

    /// Replay file is not a whole number of frames
    #[error("file size {size} is not a multiple of packet size {frame_size}")]
    FileSizeMismatch { size: usize, frame_size: usize },

    /// No datagram arrived within the configured read timeout
    #[error("no packet received within {0} ms")]
    ReadTimeout(u64),

    /// Configuration parse errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for FH5 Dash
pub type Result<T> = std::result::Result<T, TelemetryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_too_small_message() {
        let err = TelemetryError::PacketTooSmall { got: 10, want: 324 };
        assert_eq!(err.to_string(), "packet too small: got 10 bytes, need 324");
    }

    #[test]
    fn test_file_size_mismatch_message() {
        let err = TelemetryError::FileSizeMismatch { size: 700, frame_size: 324 };
        assert_eq!(
            err.to_string(),
            "file size 700 is not a multiple of packet size 324"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TelemetryError = io.into();
        assert!(matches!(err, TelemetryError::Io(_)));
    }
}
