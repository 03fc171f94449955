//! # FH5 Dash
//!
//! Live terminal dashboard for Forza Horizon 5 "Data Out" telemetry.
//!
//! Two commands are provided:
//! - `dash` shows car and race information, an RPM bar and a speedometer,
//!   fed either by the game over UDP or by a recorded debug stream
//! - `record` captures a few seconds of live packets into a debug stream file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use fh5_dash::config::{Config, LoggingConfig};
use fh5_dash::dashboard::{render_frame, DashboardState, LatestState, View};
use fh5_dash::debug::format_hex_dump;
use fh5_dash::packet::decode_packet;
use fh5_dash::recorder::PacketRecorder;
use fh5_dash::source::{PacketSource, ReplaySource, UdpSource};

/// Move the cursor home and clear the screen
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

#[derive(Parser, Debug)]
#[command(name = "fh5-dash")]
#[command(version)]
#[command(
    about = "Live terminal dashboard for Forza Horizon 5 Data Out telemetry",
    long_about = None,
    after_help = "Examples:\n  fh5-dash dash\n  fh5-dash dash --replay debugstream --debug-view\n  fh5-dash --config config/default.toml record --seconds 30"
)]
struct Cli {
    /// Path to a TOML configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the live dashboard
    Dash {
        /// Replay a recorded debug stream instead of listening on UDP
        #[arg(long)]
        replay: Option<PathBuf>,

        /// Start in the debug view
        #[arg(long)]
        debug_view: bool,
    },
    /// Record live packets into a debug stream file
    Record {
        /// Output file (overrides recorder.output_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seconds to record (overrides recorder.seconds_to_record)
        #[arg(long)]
        seconds: Option<u32>,
    },
}

/// Main entry point for FH5 Dash
///
/// # Control Flow
///
/// 1. Parse the command line and load configuration
/// 2. Set up logging (to a rolling file for `dash`, since the dashboard owns
///    the terminal; to stderr for `record`)
/// 3. Run the selected command until it finishes or Ctrl+C is pressed
///
/// # Errors
///
/// Returns error if:
/// - The configuration file cannot be loaded or is invalid
/// - The UDP socket cannot be bound or the replay file cannot be opened
/// - The recording cannot be written
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dash { replay, debug_view } => {
            let _guard = init_file_logging(&config.logging);
            info!("FH5 Dash v{} starting...", env!("CARGO_PKG_VERSION"));
            run_dashboard(&config, replay.as_deref(), debug_view).await
        }
        Commands::Record { output, seconds } => {
            init_stderr_logging();
            apply_record_overrides(&mut config, output, seconds)?;
            run_recorder(&config).await
        }
    }
}

/// Load the config file if one was given, otherwise use the defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn apply_record_overrides(
    config: &mut Config,
    output: Option<PathBuf>,
    seconds: Option<u32>,
) -> Result<()> {
    if let Some(output) = output {
        config.recorder.output_path = output.display().to_string();
    }
    if let Some(seconds) = seconds {
        config.recorder.seconds_to_record = seconds;
    }
    config.validate().context("Invalid recorder options")?;
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
}

/// Log to a daily-rolling file; the returned guard flushes on drop
fn init_file_logging(config: &LoggingConfig) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Open the configured packet source
async fn open_source(config: &Config, replay: Option<&Path>) -> Result<Box<dyn PacketSource>> {
    match replay {
        Some(path) => {
            let source = ReplaySource::open(path)
                .with_context(|| format!("Failed to open debug stream {}", path.display()))?
                .with_rate(config.replay.packets_per_second);
            Ok(Box::new(source))
        }
        None => {
            let source = UdpSource::bind(&config.listener)
                .await
                .with_context(|| format!("Failed to listen on {}", config.listener.socket_addr()))?;
            Ok(Box::new(source))
        }
    }
}

/// Read and decode packets, publishing each record as the latest state
///
/// Stops at the first read or decode error after publishing it.
async fn pump_packets(mut source: Box<dyn PacketSource>, latest: watch::Sender<LatestState>) {
    info!("Reading telemetry from {}", source.describe());
    let mut count: u64 = 0;

    loop {
        let packet = match source.next_packet().await {
            Ok(packet) => packet,
            Err(e) => {
                warn!("Read error after {} packets: {}", count, e);
                let _ = latest.send(LatestState::Failed(format!("Read error: {}", e)));
                return;
            }
        };

        match decode_packet(&packet) {
            Ok(record) => {
                count += 1;
                if latest.send(LatestState::Record(record)).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!("Decode error after {} packets: {}", count, e);
                debug!("Rejected packet:\n{}", format_hex_dump(&packet, 0));
                let _ = latest.send(LatestState::Failed(format!("Error parsing packet: {}", e)));
                return;
            }
        }
    }
}

/// Forward each Enter press on stdin as a toggle request
fn spawn_toggle_listener(toggles: mpsc::Sender<()>) {
    // Not a runtime blocking task: a pending stdin read would stall shutdown
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            if line.is_err() || toggles.blocking_send(()).is_err() {
                break;
            }
        }
    });
}

/// Run the live dashboard until Ctrl+C
async fn run_dashboard(config: &Config, replay: Option<&Path>, debug_view: bool) -> Result<()> {
    let source = open_source(config, replay).await?;

    let (latest_tx, latest_rx) = watch::channel(LatestState::Waiting);
    let reader = tokio::spawn(pump_packets(source, latest_tx));

    let (toggle_tx, mut toggle_rx) = mpsc::channel(8);
    spawn_toggle_listener(toggle_tx);

    let mut state = DashboardState::from_config(&config.dashboard);
    if debug_view {
        state = DashboardState::new(View::Debug);
    }

    let mut redraw = interval(Duration::from_secs(1) / config.dashboard.updates_per_second);
    let mut stdout = tokio::io::stdout();

    info!(
        "Rendering at {}Hz, press Enter to toggle views",
        config.dashboard.updates_per_second
    );

    loop {
        tokio::select! {
            _ = redraw.tick() => {
                let latest = latest_rx.borrow().clone();
                let frame = render_frame(&state, &latest, &config.dashboard);
                stdout.write_all(CLEAR_SCREEN.as_bytes()).await?;
                stdout.write_all(frame.as_bytes()).await?;
                stdout.flush().await?;
            }

            Some(()) = toggle_rx.recv() => {
                state.toggle();
                info!("Switched to {}", state.view.label());
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    reader.abort();
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

/// Record a debug stream from the UDP listener
async fn run_recorder(config: &Config) -> Result<()> {
    let mut source = UdpSource::bind(&config.listener)
        .await
        .with_context(|| format!("Failed to listen on {}", config.listener.socket_addr()))?;
    let recorder = PacketRecorder::new(config.recorder.clone());

    tokio::select! {
        summary = recorder.record(&mut source) => {
            let summary = summary.context("Recording failed")?;
            info!(
                "Recorded {} packets ({} rejected) to {}",
                summary.kept,
                summary.rejected,
                summary.path.display()
            );
        }

        _ = tokio::signal::ctrl_c() => {
            warn!("Received Ctrl+C, recording discarded");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use fh5_dash::packet::{encode_packet, TelemetryRecord};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dash_defaults() {
        let cli = Cli::try_parse_from(["fh5-dash", "dash"]).unwrap();
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Dash { replay, debug_view } => {
                assert!(replay.is_none());
                assert!(!debug_view);
            }
            other => panic!("Expected Dash, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dash_replay() {
        let cli = Cli::try_parse_from([
            "fh5-dash",
            "dash",
            "--replay",
            "debugstream",
            "--debug-view",
            "--config",
            "fh5.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("fh5.toml")));
        match cli.command {
            Commands::Dash { replay, debug_view } => {
                assert_eq!(replay, Some(PathBuf::from("debugstream")));
                assert!(debug_view);
            }
            other => panic!("Expected Dash, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_record() {
        let cli = Cli::try_parse_from(["fh5-dash", "record", "-o", "lap.bin", "--seconds", "30"])
            .unwrap();
        match cli.command {
            Commands::Record { output, seconds } => {
                assert_eq!(output, Some(PathBuf::from("lap.bin")));
                assert_eq!(seconds, Some(30));
            }
            other => panic!("Expected Record, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(Cli::try_parse_from(["fh5-dash"]).is_err());
    }

    #[test]
    fn test_load_config_defaults_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.listener.port, 9999);
    }

    #[test]
    fn test_load_config_bad_path_has_context() {
        let err = load_config(Some(Path::new("/nonexistent/fh5.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fh5.toml"));
    }

    #[test]
    fn test_record_overrides() {
        let mut config = Config::default();
        apply_record_overrides(&mut config, Some(PathBuf::from("out.bin")), Some(3)).unwrap();
        assert_eq!(config.recorder.output_path, "out.bin");
        assert_eq!(config.recorder.seconds_to_record, 3);
        assert_eq!(config.recorder.total_packets(), 180);
    }

    #[test]
    fn test_record_overrides_validated() {
        let mut config = Config::default();
        assert!(apply_record_overrides(&mut config, None, Some(0)).is_err());
        assert!(apply_record_overrides(&mut config, None, Some(u32::MAX)).is_err());
    }

    #[tokio::test]
    async fn test_pump_publishes_records() {
        let record = TelemetryRecord {
            is_race_on: 1,
            lap_number: 5,
            ..Default::default()
        };
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&encode_packet(&record)).unwrap();
        file.flush().unwrap();

        let source = open_source(&Config::default(), Some(file.path())).await.unwrap();
        let (tx, mut rx) = watch::channel(LatestState::Waiting);
        let pump = tokio::spawn(pump_packets(source, tx));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), LatestState::Record(record));
        pump.abort();
    }

    #[tokio::test]
    async fn test_pump_publishes_error_and_stops() {
        let replay = ReplaySource::from_bytes(bytes::Bytes::new()).unwrap();
        let (tx, rx) = watch::channel(LatestState::Waiting);

        pump_packets(Box::new(replay), tx).await;

        match &*rx.borrow() {
            LatestState::Failed(msg) => assert!(msg.starts_with("Read error:")),
            other => panic!("Expected Failed, got {:?}", other),
        };
    }
}
