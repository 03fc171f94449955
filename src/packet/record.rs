//! # Telemetry Record
//!
//! Typed, in-memory representation of one decoded Data Out frame, plus the
//! derived display values the dashboard reads from it.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::ops::{Index, IndexMut};

use super::layout::{MPS_TO_KMH, MPS_TO_MPH};

/// Wheel position, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Wheel {
    /// All wheels in wire order (FL, FR, RL, RR)
    pub const ALL: [Wheel; 4] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];

    /// Slot index of this wheel inside a per-wheel group
    pub fn index(self) -> usize {
        match self {
            Wheel::FrontLeft => 0,
            Wheel::FrontRight => 1,
            Wheel::RearLeft => 2,
            Wheel::RearRight => 3,
        }
    }

    /// Field name used in debug dumps
    pub fn name(self) -> &'static str {
        match self {
            Wheel::FrontLeft => "front_left",
            Wheel::FrontRight => "front_right",
            Wheel::RearLeft => "rear_left",
            Wheel::RearRight => "rear_right",
        }
    }
}

/// One value per wheel, indexed by [`Wheel`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSet<T>(pub [T; 4]);

impl<T: Copy> WheelSet<T> {
    /// Build a set from values in FL, FR, RL, RR order
    pub fn new(fl: T, fr: T, rl: T, rr: T) -> Self {
        Self([fl, fr, rl, rr])
    }

    /// Values as a (FL, FR, RL, RR) tuple
    pub fn as_tuple(&self) -> (T, T, T, T) {
        let [fl, fr, rl, rr] = self.0;
        (fl, fr, rl, rr)
    }

    /// Iterate `(wheel, value)` pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (Wheel, T)> + '_ {
        Wheel::ALL.iter().map(move |&w| (w, self.0[w.index()]))
    }
}

impl<T> Index<Wheel> for WheelSet<T> {
    type Output = T;

    fn index(&self, wheel: Wheel) -> &T {
        &self.0[wheel.index()]
    }
}

impl<T> IndexMut<Wheel> for WheelSet<T> {
    fn index_mut(&mut self, wheel: Wheel) -> &mut T {
        &mut self.0[wheel.index()]
    }
}

impl<T: Serialize> Serialize for WheelSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WheelSet", 4)?;
        for wheel in Wheel::ALL {
            state.serialize_field(wheel.name(), &self.0[wheel.index()])?;
        }
        state.end()
    }
}

/// Three-axis vector
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn as_tuple(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}

/// Drivetrain layout reported in the `drivetrain_type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivetrainType {
    Fwd,
    Rwd,
    Awd,
}

impl DrivetrainType {
    /// Map the raw wire value (0=FWD, 1=RWD, 2=AWD)
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(DrivetrainType::Fwd),
            1 => Some(DrivetrainType::Rwd),
            2 => Some(DrivetrainType::Awd),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DrivetrainType::Fwd => "FWD",
            DrivetrainType::Rwd => "RWD",
            DrivetrainType::Awd => "AWD",
        }
    }
}

/// One decoded telemetry frame
///
/// Every field is populated on a successful decode. Values are taken as-is
/// from the wire; no range or cross-field checks are applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct TelemetryRecord {
    // Session / engine
    pub is_race_on: i32,
    pub timestamp_ms: u32,
    pub engine_max_rpm: f32,
    pub engine_idle_rpm: f32,
    pub current_engine_rpm: f32,

    // Motion
    pub acceleration: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,

    // Per-wheel
    pub normalized_suspension_travel: WheelSet<f32>,
    pub tire_slip_ratio: WheelSet<f32>,
    pub wheel_rotation_speed: WheelSet<f32>,
    pub wheel_on_rumble_strip: WheelSet<i32>,
    pub wheel_in_puddle_depth: WheelSet<f32>,
    pub surface_rumble: WheelSet<f32>,
    pub tire_slip_angle: WheelSet<f32>,
    pub tire_combined_slip: WheelSet<f32>,
    pub suspension_travel_meters: WheelSet<f32>,

    // Car identity
    pub car_ordinal: i32,
    pub car_class: i32,
    pub car_performance_index: i32,
    pub drivetrain_type: i32,
    pub num_cylinders: u8,
    pub car_type: i32,
    pub object_hit: i64,

    // World state
    pub position: Vec3,
    /// Speed in m/s
    pub speed: f32,
    pub power: f32,
    pub torque: f32,
    pub tire_temp: WheelSet<f32>,

    // Session metrics
    pub boost: f32,
    pub fuel: f32,
    pub distance_traveled: f32,
    pub best_lap: f32,
    pub last_lap: f32,
    pub current_lap: f32,
    pub current_race_time: f32,
    pub lap_number: u16,
    pub race_position: u8,

    // Driver controls
    pub throttle: u8,
    pub brake: u8,
    pub clutch: u8,
    pub handbrake: u8,
    pub gear: u8,
    pub steer: i8,
    pub normalized_driving_line: u8,
    pub normalized_ai_brake_difference: u8,
}

impl TelemetryRecord {
    /// True only when the raw race-on value is exactly 1
    pub fn race_on(&self) -> bool {
        self.is_race_on == 1
    }

    /// Speed in km/h, floored after conversion
    ///
    /// # Examples
    ///
    /// ```
    /// use fh5_dash::packet::TelemetryRecord;
    ///
    /// let record = TelemetryRecord { speed: -0.5, ..Default::default() };
    /// assert_eq!(record.speed_kmh(), -2.0);
    /// ```
    pub fn speed_kmh(&self) -> f32 {
        (self.speed * MPS_TO_KMH).floor()
    }

    /// Speed in mph, floored after conversion
    pub fn speed_mph(&self) -> f32 {
        (self.speed * MPS_TO_MPH).floor()
    }

    pub fn current_engine_rpm_floor(&self) -> f32 {
        self.current_engine_rpm.floor()
    }

    pub fn engine_max_rpm_floor(&self) -> f32 {
        self.engine_max_rpm.floor()
    }

    pub fn engine_idle_rpm_floor(&self) -> f32 {
        self.engine_idle_rpm.floor()
    }

    pub fn power_floor(&self) -> f32 {
        self.power.floor()
    }

    pub fn torque_floor(&self) -> f32 {
        self.torque.floor()
    }

    pub fn boost_floor(&self) -> f32 {
        self.boost.floor()
    }

    pub fn distance_traveled_floor(&self) -> f32 {
        self.distance_traveled.floor()
    }

    /// (best, last, current) lap times, floored
    pub fn lap_times_floor(&self) -> (f32, f32, f32) {
        (
            self.best_lap.floor(),
            self.last_lap.floor(),
            self.current_lap.floor(),
        )
    }

    pub fn current_race_time_floor(&self) -> f32 {
        self.current_race_time.floor()
    }

    /// (best, last, current) lap times as sent
    pub fn lap_times(&self) -> (f32, f32, f32) {
        (self.best_lap, self.last_lap, self.current_lap)
    }

    pub fn acceleration_xyz(&self) -> (f32, f32, f32) {
        self.acceleration.as_tuple()
    }

    pub fn position_xyz(&self) -> (f32, f32, f32) {
        self.position.as_tuple()
    }

    /// Tire temperatures (FL, FR, RL, RR)
    pub fn tire_temperatures(&self) -> (f32, f32, f32, f32) {
        self.tire_temp.as_tuple()
    }

    /// (throttle, brake, clutch, handbrake)
    pub fn controls(&self) -> (u8, u8, u8, u8) {
        (self.throttle, self.brake, self.clutch, self.handbrake)
    }

    pub fn car_class(&self) -> i32 {
        self.car_class
    }

    pub fn car_performance_index(&self) -> i32 {
        self.car_performance_index
    }

    pub fn drivetrain_type(&self) -> i32 {
        self.drivetrain_type
    }

    /// Drivetrain as an enum, `None` for values outside 0..=2
    pub fn drivetrain(&self) -> Option<DrivetrainType> {
        DrivetrainType::from_raw(self.drivetrain_type)
    }

    pub fn num_cylinders(&self) -> u8 {
        self.num_cylinders
    }

    pub fn lap_number(&self) -> u16 {
        self.lap_number
    }

    pub fn race_position(&self) -> u8 {
        self.race_position
    }

    pub fn gear(&self) -> u8 {
        self.gear
    }
}
