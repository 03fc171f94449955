//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every section and field is optional; anything left out falls back to the
//! defaults below, which match the game's stock Data Out settings
//! (127.0.0.1:9999) and a 50-column dashboard layout.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::{Result, TelemetryError};
use crate::packet::PACKET_SIZE;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub listener: ListenerConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub recorder: RecorderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UDP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ListenerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,

    /// 0 waits forever
    #[serde(default)]
    pub read_timeout_ms: u64,
}

/// Debug stream replay configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReplayConfig {
    /// 0 replays as fast as the consumer reads
    #[serde(default = "default_replay_packets_per_second")]
    pub packets_per_second: u32,
}

/// Terminal dashboard configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_updates_per_second")]
    pub updates_per_second: u32,

    #[serde(default = "default_rpm_meter_width")]
    pub rpm_meter_width: usize,

    #[serde(default = "default_rpm_green_segments")]
    pub rpm_green_segments: usize,

    #[serde(default = "default_speedometer_width")]
    pub speedometer_width: usize,

    #[serde(default = "default_max_speed_kmh")]
    pub max_speed_kmh: u32,

    #[serde(default)]
    pub start_in_debug_view: bool,
}

/// Packet recorder configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RecorderConfig {
    #[serde(default = "default_recorder_packets_per_second")]
    pub packets_per_second: u32,

    #[serde(default = "default_seconds_to_record")]
    pub seconds_to_record: u32,

    #[serde(default = "default_output_path")]
    pub output_path: String,
}

/// Log file configuration (the dashboard owns the terminal)
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub directory: String,

    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,
}

// Default value functions
fn default_bind_address() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 9999 }
fn default_recv_buffer_size() -> usize { 1024 }

fn default_replay_packets_per_second() -> u32 { 60 }

fn default_updates_per_second() -> u32 { 10 }
fn default_rpm_meter_width() -> usize { 50 }
fn default_rpm_green_segments() -> usize { 30 }
fn default_speedometer_width() -> usize { 50 }
fn default_max_speed_kmh() -> u32 { 400 }

fn default_recorder_packets_per_second() -> u32 { 60 }
fn default_seconds_to_record() -> u32 { 10 }
fn default_output_path() -> String { "./debugstream".to_string() }

fn default_log_dir() -> String { "./logs".to_string() }
fn default_log_file_prefix() -> String { "fh5-dash.log".to_string() }

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            recv_buffer_size: default_recv_buffer_size(),
            read_timeout_ms: 0,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            packets_per_second: default_replay_packets_per_second(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            updates_per_second: default_updates_per_second(),
            rpm_meter_width: default_rpm_meter_width(),
            rpm_green_segments: default_rpm_green_segments(),
            speedometer_width: default_speedometer_width(),
            max_speed_kmh: default_max_speed_kmh(),
            start_in_debug_view: false,
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            packets_per_second: default_recorder_packets_per_second(),
            seconds_to_record: default_seconds_to_record(),
            output_path: default_output_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            file_prefix: default_log_file_prefix(),
        }
    }
}

impl ListenerConfig {
    /// `address:port` string for binding the socket
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl RecorderConfig {
    /// Number of read attempts in one recording
    pub fn total_packets(&self) -> u64 {
        u64::from(self.packets_per_second) * u64::from(self.seconds_to_record)
    }
}

fn invalid(msg: impl std::fmt::Display) -> TelemetryError {
    TelemetryError::Config(toml::de::Error::custom(msg))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fh5_dash::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        // Listener
        if self.listener.bind_address.is_empty() {
            return Err(invalid("bind_address cannot be empty"));
        }

        if self.listener.port == 0 {
            return Err(invalid("port must be between 1 and 65535"));
        }

        // A smaller buffer would truncate every datagram below the decoder minimum
        if self.listener.recv_buffer_size < PACKET_SIZE {
            return Err(invalid(format!(
                "recv_buffer_size must be at least {} bytes",
                PACKET_SIZE
            )));
        }

        if self.listener.read_timeout_ms > 60000 {
            return Err(invalid("read_timeout_ms must be between 0 and 60000"));
        }

        // Replay
        if self.replay.packets_per_second > 1000 {
            return Err(invalid("replay packets_per_second must be between 0 and 1000"));
        }

        // Dashboard
        if self.dashboard.updates_per_second == 0 || self.dashboard.updates_per_second > 120 {
            return Err(invalid("updates_per_second must be between 1 and 120"));
        }

        if self.dashboard.rpm_meter_width < 10 || self.dashboard.rpm_meter_width > 200 {
            return Err(invalid("rpm_meter_width must be between 10 and 200"));
        }

        if self.dashboard.rpm_green_segments > self.dashboard.rpm_meter_width {
            return Err(invalid("rpm_green_segments cannot exceed rpm_meter_width"));
        }

        if self.dashboard.speedometer_width < 16 || self.dashboard.speedometer_width > 256 {
            return Err(invalid("speedometer_width must be between 16 and 256"));
        }

        if self.dashboard.max_speed_kmh == 0 {
            return Err(invalid("max_speed_kmh must be greater than 0"));
        }

        // Recorder
        if self.recorder.packets_per_second == 0 || self.recorder.packets_per_second > 1000 {
            return Err(invalid("recorder packets_per_second must be between 1 and 1000"));
        }

        if self.recorder.seconds_to_record == 0 || self.recorder.seconds_to_record > 3600 {
            return Err(invalid("seconds_to_record must be between 1 and 3600"));
        }

        if self.recorder.output_path.is_empty() {
            return Err(invalid("recorder output_path cannot be empty"));
        }

        // Logging
        if self.logging.directory.is_empty() {
            return Err(invalid("log directory cannot be empty"));
        }

        if self.logging.file_prefix.is_empty() {
            return Err(invalid("log file_prefix cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.listener.socket_addr(), "127.0.0.1:9999");
        assert_eq!(config.recorder.total_packets(), 600);
        assert!(!config.dashboard.start_in_debug_view);
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[listener]
bind_address = "0.0.0.0"
port = 5300
read_timeout_ms = 2000

[dashboard]
updates_per_second = 30
start_in_debug_view = true

[recorder]
seconds_to_record = 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.listener.socket_addr(), "0.0.0.0:5300");
        assert_eq!(config.listener.read_timeout_ms, 2000);
        assert_eq!(config.listener.recv_buffer_size, 1024);
        assert_eq!(config.dashboard.updates_per_second, 30);
        assert!(config.dashboard.start_in_debug_view);
        assert_eq!(config.recorder.total_packets(), 300);
        assert_eq!(config.recorder.output_path, "./debugstream");
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.listener.port, 9999);
        assert_eq!(config.dashboard.rpm_meter_width, 50);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/fh5-dash/config.toml");
        assert!(matches!(result, Err(TelemetryError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[listener]\nport = \"not a number\"\n").unwrap();
        temp_file.flush().unwrap();

        let result = Config::load(temp_file.path());
        assert!(matches!(result, Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[dashboard]\nupdates_per_second = 0\n").unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }

    #[test]
    fn test_empty_bind_address() {
        let mut config = Config::default();
        config.listener.bind_address = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_port_zero() {
        let mut config = Config::default();
        config.listener.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recv_buffer_too_small() {
        let mut config = Config::default();
        config.listener.recv_buffer_size = 323;
        assert!(config.validate().is_err());

        config.listener.recv_buffer_size = 324;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_read_timeout_too_high() {
        let mut config = Config::default();
        config.listener.read_timeout_ms = 60001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_replay_rate_too_high() {
        let mut config = Config::default();
        config.replay.packets_per_second = 1001;
        assert!(config.validate().is_err());

        config.replay.packets_per_second = 0;
        assert!(config.validate().is_ok(), "0 means unpaced replay");
    }

    #[test]
    fn test_updates_per_second_bounds() {
        let mut config = Config::default();
        config.dashboard.updates_per_second = 0;
        assert!(config.validate().is_err());

        config.dashboard.updates_per_second = 121;
        assert!(config.validate().is_err());

        config.dashboard.updates_per_second = 120;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rpm_meter_width_bounds() {
        let mut config = Config::default();
        config.dashboard.rpm_meter_width = 9;
        assert!(config.validate().is_err());

        config.dashboard.rpm_meter_width = 201;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_green_segments_exceed_width() {
        let mut config = Config::default();
        config.dashboard.rpm_green_segments = config.dashboard.rpm_meter_width + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_speedometer_width_bounds() {
        let mut config = Config::default();
        config.dashboard.speedometer_width = 15;
        assert!(config.validate().is_err());

        config.dashboard.speedometer_width = 257;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_speed_zero() {
        let mut config = Config::default();
        config.dashboard.max_speed_kmh = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recorder_rate_zero() {
        let mut config = Config::default();
        config.recorder.packets_per_second = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recorder_seconds_zero() {
        let mut config = Config::default();
        config.recorder.seconds_to_record = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recorder_seconds_too_high() {
        let mut config = Config::default();
        config.recorder.seconds_to_record = 3600;
        assert!(config.validate().is_ok());

        config.recorder.seconds_to_record = 3601;
        assert!(config.validate().is_err());

        config.recorder.seconds_to_record = u32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recorder_rate_too_high() {
        let mut config = Config::default();
        config.recorder.packets_per_second = 1000;
        assert!(config.validate().is_ok());

        config.recorder.packets_per_second = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_output_path() {
        let mut config = Config::default();
        config.recorder.output_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_settings() {
        let mut config = Config::default();
        config.logging.directory = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.file_prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_bind_address(), "127.0.0.1");
        assert_eq!(default_port(), 9999);
        assert_eq!(default_recv_buffer_size(), 1024);
        assert_eq!(default_replay_packets_per_second(), 60);
        assert_eq!(default_updates_per_second(), 10);
        assert_eq!(default_rpm_meter_width(), 50);
        assert_eq!(default_rpm_green_segments(), 30);
        assert_eq!(default_speedometer_width(), 50);
        assert_eq!(default_max_speed_kmh(), 400);
        assert_eq!(default_recorder_packets_per_second(), 60);
        assert_eq!(default_seconds_to_record(), 10);
        assert_eq!(default_output_path(), "./debugstream");
        assert_eq!(default_log_dir(), "./logs");
        assert_eq!(default_log_file_prefix(), "fh5-dash.log");
    }
}
