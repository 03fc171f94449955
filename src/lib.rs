//! # FH5 Dash Library
//!
//! Decode and display Forza Horizon 5 "Data Out" telemetry.
//!
//! This library provides the fixed-layout packet decoder, the byte sources
//! that feed it (UDP listener and debug stream replay), a recorder for
//! capturing debug streams, and the text renderers used by the terminal
//! dashboard.

pub mod config;
pub mod dashboard;
pub mod debug;
pub mod error;
pub mod packet;
pub mod recorder;
pub mod source;
