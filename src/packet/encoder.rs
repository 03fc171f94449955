//! # Data Out Packet Encoder
//!
//! Writes a [`TelemetryRecord`] back into the 324-byte wire layout. Used to
//! build replay recordings and test fixtures.

use super::layout::*;
use super::record::{TelemetryRecord, Vec3, WheelSet};

/// Encode a record into a complete telemetry frame
///
/// # Arguments
///
/// * `record` - Record to serialize
///
/// # Returns
///
/// * `[u8; PACKET_SIZE]` - Frame with every field at its wire offset; padding bytes are zero
///
/// # Examples
///
/// ```
/// use fh5_dash::packet::{decode_packet, encode_packet, TelemetryRecord};
///
/// let record = TelemetryRecord { is_race_on: 1, speed: 27.5, ..Default::default() };
/// let frame = encode_packet(&record);
/// assert_eq!(decode_packet(&frame).unwrap(), record);
/// ```
pub fn encode_packet(record: &TelemetryRecord) -> [u8; PACKET_SIZE] {
    let mut w = FrameWriter {
        frame: [0u8; PACKET_SIZE],
    };

    w.put(OFF_IS_RACE_ON, &record.is_race_on.to_le_bytes());
    w.put(OFF_TIMESTAMP_MS, &record.timestamp_ms.to_le_bytes());
    w.put(OFF_ENGINE_MAX_RPM, &record.engine_max_rpm.to_le_bytes());
    w.put(OFF_ENGINE_IDLE_RPM, &record.engine_idle_rpm.to_le_bytes());
    w.put(OFF_CURRENT_ENGINE_RPM, &record.current_engine_rpm.to_le_bytes());

    w.vec3(OFF_ACCELERATION, &record.acceleration);
    w.vec3(OFF_VELOCITY, &record.velocity);
    w.vec3(OFF_ANGULAR_VELOCITY, &record.angular_velocity);
    w.put(OFF_YAW, &record.yaw.to_le_bytes());
    w.put(OFF_PITCH, &record.pitch.to_le_bytes());
    w.put(OFF_ROLL, &record.roll.to_le_bytes());

    w.wheels(OFF_NORMALIZED_SUSPENSION_TRAVEL, &record.normalized_suspension_travel, f32::to_le_bytes);
    w.wheels(OFF_TIRE_SLIP_RATIO, &record.tire_slip_ratio, f32::to_le_bytes);
    w.wheels(OFF_WHEEL_ROTATION_SPEED, &record.wheel_rotation_speed, f32::to_le_bytes);
    w.wheels(OFF_WHEEL_ON_RUMBLE_STRIP, &record.wheel_on_rumble_strip, i32::to_le_bytes);
    w.wheels(OFF_WHEEL_IN_PUDDLE_DEPTH, &record.wheel_in_puddle_depth, f32::to_le_bytes);
    w.wheels(OFF_SURFACE_RUMBLE, &record.surface_rumble, f32::to_le_bytes);
    w.wheels(OFF_TIRE_SLIP_ANGLE, &record.tire_slip_angle, f32::to_le_bytes);
    w.wheels(OFF_TIRE_COMBINED_SLIP, &record.tire_combined_slip, f32::to_le_bytes);
    w.wheels(OFF_SUSPENSION_TRAVEL_METERS, &record.suspension_travel_meters, f32::to_le_bytes);

    w.put(OFF_CAR_ORDINAL, &record.car_ordinal.to_le_bytes());
    w.put(OFF_CAR_CLASS, &record.car_class.to_le_bytes());
    w.put(OFF_CAR_PERFORMANCE_INDEX, &record.car_performance_index.to_le_bytes());
    w.put(OFF_DRIVETRAIN_TYPE, &record.drivetrain_type.to_le_bytes());
    w.put(OFF_NUM_CYLINDERS, &[record.num_cylinders]);
    w.put(OFF_CAR_TYPE, &record.car_type.to_le_bytes());
    w.put(OFF_OBJECT_HIT, &record.object_hit.to_le_bytes());

    w.vec3(OFF_POSITION, &record.position);
    w.put(OFF_SPEED, &record.speed.to_le_bytes());
    w.put(OFF_POWER, &record.power.to_le_bytes());
    w.put(OFF_TORQUE, &record.torque.to_le_bytes());
    w.wheels(OFF_TIRE_TEMP, &record.tire_temp, f32::to_le_bytes);

    w.put(OFF_BOOST, &record.boost.to_le_bytes());
    w.put(OFF_FUEL, &record.fuel.to_le_bytes());
    w.put(OFF_DISTANCE_TRAVELED, &record.distance_traveled.to_le_bytes());
    w.put(OFF_BEST_LAP, &record.best_lap.to_le_bytes());
    w.put(OFF_LAST_LAP, &record.last_lap.to_le_bytes());
    w.put(OFF_CURRENT_LAP, &record.current_lap.to_le_bytes());
    w.put(OFF_CURRENT_RACE_TIME, &record.current_race_time.to_le_bytes());
    w.put(OFF_LAP_NUMBER, &record.lap_number.to_le_bytes());
    w.put(OFF_RACE_POSITION, &[record.race_position]);

    w.put(OFF_THROTTLE, &[record.throttle]);
    w.put(OFF_BRAKE, &[record.brake]);
    w.put(OFF_CLUTCH, &[record.clutch]);
    w.put(OFF_HANDBRAKE, &[record.handbrake]);
    w.put(OFF_GEAR, &[record.gear]);
    w.put(OFF_STEER, &record.steer.to_le_bytes());
    w.put(OFF_NORMALIZED_DRIVING_LINE, &[record.normalized_driving_line]);
    w.put(OFF_NORMALIZED_AI_BRAKE_DIFFERENCE, &[record.normalized_ai_brake_difference]);

    w.frame
}

struct FrameWriter {
    frame: [u8; PACKET_SIZE],
}

impl FrameWriter {
    fn put(&mut self, offset: usize, bytes: &[u8]) {
        self.frame[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn vec3(&mut self, offset: usize, v: &Vec3) {
        self.put(offset, &v.x.to_le_bytes());
        self.put(offset + 4, &v.y.to_le_bytes());
        self.put(offset + 8, &v.z.to_le_bytes());
    }

    fn wheels<T: Copy>(&mut self, offset: usize, set: &WheelSet<T>, to_bytes: fn(T) -> [u8; 4]) {
        for (i, value) in set.0.iter().enumerate() {
            self.put(offset + i * WHEEL_STRIDE, &to_bytes(*value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::record::Wheel;

    #[test]
    fn test_encode_default_is_all_zero() {
        let frame = encode_packet(&TelemetryRecord::default());
        assert_eq!(frame.len(), PACKET_SIZE);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_field_positions() {
        let mut record = TelemetryRecord {
            is_race_on: 1,
            speed: 10.0,
            lap_number: 0x0102,
            steer: -2,
            object_hit: -1,
            num_cylinders: 8,
            ..Default::default()
        };
        record.tire_temp[Wheel::RearLeft] = 1.0;

        let frame = encode_packet(&record);

        assert_eq!(&frame[0..4], &[1, 0, 0, 0]);
        assert_eq!(&frame[256..260], &10.0f32.to_le_bytes());
        assert_eq!(&frame[312..314], &[0x02, 0x01], "lap number must be little-endian");
        assert_eq!(frame[320], 0xFE);
        assert_eq!(&frame[236..244], &[0xFF; 8]);
        assert_eq!(frame[228], 8);
        assert_eq!(&frame[276..280], &1.0f32.to_le_bytes());
    }

    #[test]
    fn test_encode_leaves_padding_zero() {
        let record = TelemetryRecord {
            num_cylinders: 0xFF,
            car_type: -1,
            normalized_ai_brake_difference: 0xFF,
            ..Default::default()
        };
        let frame = encode_packet(&record);
        assert_eq!(&frame[229..232], &[0, 0, 0]);
        assert_eq!(frame[323], 0);
    }
}
