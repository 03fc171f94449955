//! # Data Out Packet Decoder
//!
//! Decodes a raw 324-byte Forza Horizon 5 telemetry frame into a
//! [`TelemetryRecord`].

use super::layout::*;
use super::record::{TelemetryRecord, Vec3, WheelSet};
use crate::error::{TelemetryError, Result};

/// Decode one telemetry frame
///
/// Only the first [`PACKET_SIZE`] bytes are read; anything after them is
/// ignored. The length check is the only validation performed.
///
/// # Arguments
///
/// * `buffer` - Raw datagram or replay frame
///
/// # Returns
///
/// * `Result<TelemetryRecord>` - Fully populated record, or error if too short
///
/// # Errors
///
/// Returns [`TelemetryError::PacketTooSmall`] if `buffer` holds fewer than
/// 324 bytes. No record is produced in that case.
///
/// # Examples
///
/// ```
/// use fh5_dash::packet::{decode_packet, PACKET_SIZE};
///
/// let frame = [0u8; PACKET_SIZE];
/// let record = decode_packet(&frame)?;
/// assert!(!record.race_on());
/// # Ok::<(), fh5_dash::error::TelemetryError>(())
/// ```
pub fn decode_packet(buffer: &[u8]) -> Result<TelemetryRecord> {
    let frame: &[u8; PACKET_SIZE] = buffer
        .get(..PACKET_SIZE)
        .and_then(|head| head.try_into().ok())
        .ok_or(TelemetryError::PacketTooSmall {
            got: buffer.len(),
            want: PACKET_SIZE,
        })?;

    let r = FrameReader { frame };

    Ok(TelemetryRecord {
        is_race_on: r.i32_at(OFF_IS_RACE_ON),
        timestamp_ms: r.u32_at(OFF_TIMESTAMP_MS),
        engine_max_rpm: r.f32_at(OFF_ENGINE_MAX_RPM),
        engine_idle_rpm: r.f32_at(OFF_ENGINE_IDLE_RPM),
        current_engine_rpm: r.f32_at(OFF_CURRENT_ENGINE_RPM),

        acceleration: r.vec3_at(OFF_ACCELERATION),
        velocity: r.vec3_at(OFF_VELOCITY),
        angular_velocity: r.vec3_at(OFF_ANGULAR_VELOCITY),
        yaw: r.f32_at(OFF_YAW),
        pitch: r.f32_at(OFF_PITCH),
        roll: r.f32_at(OFF_ROLL),

        normalized_suspension_travel: r.wheels_f32_at(OFF_NORMALIZED_SUSPENSION_TRAVEL),
        tire_slip_ratio: r.wheels_f32_at(OFF_TIRE_SLIP_RATIO),
        wheel_rotation_speed: r.wheels_f32_at(OFF_WHEEL_ROTATION_SPEED),
        wheel_on_rumble_strip: r.wheels_i32_at(OFF_WHEEL_ON_RUMBLE_STRIP),
        wheel_in_puddle_depth: r.wheels_f32_at(OFF_WHEEL_IN_PUDDLE_DEPTH),
        surface_rumble: r.wheels_f32_at(OFF_SURFACE_RUMBLE),
        tire_slip_angle: r.wheels_f32_at(OFF_TIRE_SLIP_ANGLE),
        tire_combined_slip: r.wheels_f32_at(OFF_TIRE_COMBINED_SLIP),
        suspension_travel_meters: r.wheels_f32_at(OFF_SUSPENSION_TRAVEL_METERS),

        car_ordinal: r.i32_at(OFF_CAR_ORDINAL),
        car_class: r.i32_at(OFF_CAR_CLASS),
        car_performance_index: r.i32_at(OFF_CAR_PERFORMANCE_INDEX),
        drivetrain_type: r.i32_at(OFF_DRIVETRAIN_TYPE),
        num_cylinders: r.u8_at(OFF_NUM_CYLINDERS),
        car_type: r.i32_at(OFF_CAR_TYPE),
        object_hit: r.i64_at(OFF_OBJECT_HIT),

        position: r.vec3_at(OFF_POSITION),
        speed: r.f32_at(OFF_SPEED),
        power: r.f32_at(OFF_POWER),
        torque: r.f32_at(OFF_TORQUE),
        tire_temp: r.wheels_f32_at(OFF_TIRE_TEMP),

        boost: r.f32_at(OFF_BOOST),
        fuel: r.f32_at(OFF_FUEL),
        distance_traveled: r.f32_at(OFF_DISTANCE_TRAVELED),
        best_lap: r.f32_at(OFF_BEST_LAP),
        last_lap: r.f32_at(OFF_LAST_LAP),
        current_lap: r.f32_at(OFF_CURRENT_LAP),
        current_race_time: r.f32_at(OFF_CURRENT_RACE_TIME),
        lap_number: r.u16_at(OFF_LAP_NUMBER),
        race_position: r.u8_at(OFF_RACE_POSITION),

        throttle: r.u8_at(OFF_THROTTLE),
        brake: r.u8_at(OFF_BRAKE),
        clutch: r.u8_at(OFF_CLUTCH),
        handbrake: r.u8_at(OFF_HANDBRAKE),
        gear: r.u8_at(OFF_GEAR),
        steer: r.u8_at(OFF_STEER) as i8,
        normalized_driving_line: r.u8_at(OFF_NORMALIZED_DRIVING_LINE),
        normalized_ai_brake_difference: r.u8_at(OFF_NORMALIZED_AI_BRAKE_DIFFERENCE),
    })
}

/// Little-endian reads at fixed offsets of a length-checked frame
struct FrameReader<'a> {
    frame: &'a [u8; PACKET_SIZE],
}

impl FrameReader<'_> {
    fn bytes<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.frame[offset..offset + N]);
        out
    }

    fn u8_at(&self, offset: usize) -> u8 {
        self.frame[offset]
    }

    fn u16_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes(self.bytes(offset))
    }

    fn u32_at(&self, offset: usize) -> u32 {
        u32::from_le_bytes(self.bytes(offset))
    }

    fn i32_at(&self, offset: usize) -> i32 {
        i32::from_le_bytes(self.bytes(offset))
    }

    fn i64_at(&self, offset: usize) -> i64 {
        i64::from_le_bytes(self.bytes(offset))
    }

    fn f32_at(&self, offset: usize) -> f32 {
        f32::from_le_bytes(self.bytes(offset))
    }

    fn vec3_at(&self, offset: usize) -> Vec3 {
        Vec3::new(
            self.f32_at(offset),
            self.f32_at(offset + 4),
            self.f32_at(offset + 8),
        )
    }

    fn wheels_f32_at(&self, offset: usize) -> WheelSet<f32> {
        WheelSet(std::array::from_fn(|i| self.f32_at(offset + i * WHEEL_STRIDE)))
    }

    fn wheels_i32_at(&self, offset: usize) -> WheelSet<i32> {
        WheelSet(std::array::from_fn(|i| self.i32_at(offset + i * WHEEL_STRIDE)))
    }
}
