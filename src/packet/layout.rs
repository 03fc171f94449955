//! # Data Out Wire Layout
//!
//! Byte offsets of every field in the 324-byte Forza Horizon 5 "Data Out"
//! packet. All multi-byte fields are little-endian. The positions are fixed
//! by the game and are not derived from field order (note the padding at
//! 229..232 after the cylinder count and at 323).

/// Size of one telemetry frame in bytes
pub const PACKET_SIZE: usize = 324;

/// Per-wheel field groups are four consecutive 4-byte slots (FL, FR, RL, RR)
pub const WHEEL_STRIDE: usize = 4;

// Session / engine
pub const OFF_IS_RACE_ON: usize = 0; // i32
pub const OFF_TIMESTAMP_MS: usize = 4; // u32
pub const OFF_ENGINE_MAX_RPM: usize = 8; // f32
pub const OFF_ENGINE_IDLE_RPM: usize = 12; // f32
pub const OFF_CURRENT_ENGINE_RPM: usize = 16; // f32

// Motion (x, y, z at +0, +4, +8)
pub const OFF_ACCELERATION: usize = 20; // f32 x3
pub const OFF_VELOCITY: usize = 32; // f32 x3
pub const OFF_ANGULAR_VELOCITY: usize = 44; // f32 x3
pub const OFF_YAW: usize = 56; // f32
pub const OFF_PITCH: usize = 60; // f32
pub const OFF_ROLL: usize = 64; // f32

// Per-wheel groups, first slot is front-left
pub const OFF_NORMALIZED_SUSPENSION_TRAVEL: usize = 68; // f32 x4
pub const OFF_TIRE_SLIP_RATIO: usize = 84; // f32 x4
pub const OFF_WHEEL_ROTATION_SPEED: usize = 100; // f32 x4
pub const OFF_WHEEL_ON_RUMBLE_STRIP: usize = 116; // i32 x4
pub const OFF_WHEEL_IN_PUDDLE_DEPTH: usize = 132; // f32 x4
pub const OFF_SURFACE_RUMBLE: usize = 148; // f32 x4
pub const OFF_TIRE_SLIP_ANGLE: usize = 164; // f32 x4
pub const OFF_TIRE_COMBINED_SLIP: usize = 180; // f32 x4
pub const OFF_SUSPENSION_TRAVEL_METERS: usize = 196; // f32 x4

// Car identity
pub const OFF_CAR_ORDINAL: usize = 212; // i32
pub const OFF_CAR_CLASS: usize = 216; // i32
pub const OFF_CAR_PERFORMANCE_INDEX: usize = 220; // i32
pub const OFF_DRIVETRAIN_TYPE: usize = 224; // i32
pub const OFF_NUM_CYLINDERS: usize = 228; // u8
pub const OFF_CAR_TYPE: usize = 232; // i32
pub const OFF_OBJECT_HIT: usize = 236; // i64

// World state
pub const OFF_POSITION: usize = 244; // f32 x3
pub const OFF_SPEED: usize = 256; // f32, m/s
pub const OFF_POWER: usize = 260; // f32
pub const OFF_TORQUE: usize = 264; // f32
pub const OFF_TIRE_TEMP: usize = 268; // f32 x4

// Session metrics
pub const OFF_BOOST: usize = 284; // f32
pub const OFF_FUEL: usize = 288; // f32
pub const OFF_DISTANCE_TRAVELED: usize = 292; // f32
pub const OFF_BEST_LAP: usize = 296; // f32
pub const OFF_LAST_LAP: usize = 300; // f32
pub const OFF_CURRENT_LAP: usize = 304; // f32
pub const OFF_CURRENT_RACE_TIME: usize = 308; // f32
pub const OFF_LAP_NUMBER: usize = 312; // u16
pub const OFF_RACE_POSITION: usize = 314; // u8

// Driver controls
pub const OFF_THROTTLE: usize = 315; // u8
pub const OFF_BRAKE: usize = 316; // u8
pub const OFF_CLUTCH: usize = 317; // u8
pub const OFF_HANDBRAKE: usize = 318; // u8
pub const OFF_GEAR: usize = 319; // u8
pub const OFF_STEER: usize = 320; // i8
pub const OFF_NORMALIZED_DRIVING_LINE: usize = 321; // u8
pub const OFF_NORMALIZED_AI_BRAKE_DIFFERENCE: usize = 322; // u8

/// Conversion factor from m/s to km/h
pub const MPS_TO_KMH: f32 = 3.6;

/// Conversion factor from m/s to mph, as the game's own HUD uses it
pub const MPS_TO_MPH: f32 = 2.237;
