//! End-to-end: record frames to disk, replay them and decode the result

use bytes::Bytes;
use fh5_dash::config::{Config, DashboardConfig, RecorderConfig};
use fh5_dash::dashboard::{render_frame, DashboardState, LatestState};
use fh5_dash::error::TelemetryError;
use fh5_dash::packet::{decode_packet, encode_packet, TelemetryRecord, Vec3, WheelSet, PACKET_SIZE};
use fh5_dash::recorder::PacketRecorder;
use fh5_dash::source::{PacketSource, ReplaySource};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn lap_record(lap: u16) -> TelemetryRecord {
    TelemetryRecord {
        is_race_on: 1,
        timestamp_ms: 1_000 * u32::from(lap),
        engine_max_rpm: 8500.0,
        current_engine_rpm: 6250.5,
        velocity: Vec3::new(0.5, 0.0, 41.2),
        tire_temp: WheelSet::new(180.0, 181.5, 176.25, 177.0),
        speed: 41.3,
        lap_number: lap,
        race_position: 2,
        steer: -30,
        gear: 4,
        ..Default::default()
    }
}

fn write_stream(records: &[TelemetryRecord]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for record in records {
        file.write_all(&encode_packet(record)).unwrap();
    }
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_replay_decodes_every_frame_and_wraps() {
    let records: Vec<TelemetryRecord> = (1..=3).map(lap_record).collect();
    let file = write_stream(&records);

    let mut replay = ReplaySource::open(file.path()).unwrap().with_rate(0);
    assert_eq!(replay.frame_count(), 3);

    for expected in records.iter().chain(records.iter()) {
        let packet = replay.next_packet().await.unwrap();
        assert_eq!(packet.len(), PACKET_SIZE);
        assert_eq!(&decode_packet(&packet).unwrap(), expected);
    }
}

#[test]
fn test_truncated_stream_is_rejected() {
    let mut file = write_stream(&[lap_record(1)]);
    file.write_all(&[0u8; 10]).unwrap();
    file.flush().unwrap();

    match ReplaySource::open(file.path()) {
        Err(TelemetryError::FileSizeMismatch { size, frame_size }) => {
            assert_eq!(size, PACKET_SIZE + 10);
            assert_eq!(frame_size, PACKET_SIZE);
        }
        other => panic!("Expected FileSizeMismatch, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_recording_replays_into_dashboard() {
    let dir = TempDir::new().unwrap();
    let source_data: Vec<u8> = (1..=2)
        .flat_map(|lap| encode_packet(&lap_record(lap)))
        .collect();
    let mut live = ReplaySource::from_bytes(Bytes::from(source_data)).unwrap();

    let recorder = PacketRecorder::new(RecorderConfig {
        packets_per_second: 2,
        seconds_to_record: 2,
        output_path: dir.path().join("debugstream").display().to_string(),
    });
    let summary = recorder.record(&mut live).await.unwrap();
    assert_eq!(summary.kept, 4);
    assert_eq!(summary.rejected, 0);

    let mut replay = ReplaySource::open(&summary.path).unwrap();
    let record = decode_packet(&replay.read_next().unwrap()).unwrap();
    assert_eq!(record, lap_record(1));
    assert!(record.race_on());
    assert_eq!(record.speed_kmh(), 148.0);

    let frame = render_frame(
        &DashboardState::default(),
        &LatestState::Record(record),
        &DashboardConfig::default(),
    );
    assert!(frame.contains("6250/8500"));
    assert!(frame.contains("Position: 2"));
}

#[test]
fn test_sample_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
    let config = Config::load(path).unwrap();
    let defaults = Config::default();

    assert_eq!(config.listener.socket_addr(), defaults.listener.socket_addr());
    assert_eq!(config.recorder.total_packets(), defaults.recorder.total_packets());
    assert_eq!(config.dashboard.max_speed_kmh, defaults.dashboard.max_speed_kmh);
    assert_eq!(config.logging.directory, defaults.logging.directory);
}
