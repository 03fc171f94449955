//! # Data Out Packet Module
//!
//! Forza Horizon 5 "Data Out" telemetry packet handling.
//!
//! This module handles:
//! - Fixed 324-byte little-endian wire layout
//! - Decoding raw frames into a typed record
//! - Derived display values (unit conversion, floor rounding, groupings)
//! - Encoding records back into frames for recordings and tests

pub mod layout;
pub mod record;
pub mod decoder;
pub mod encoder;

pub use decoder::decode_packet;
pub use encoder::encode_packet;
pub use layout::PACKET_SIZE;
pub use record::{DrivetrainType, TelemetryRecord, Vec3, Wheel, WheelSet};
