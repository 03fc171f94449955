//! # Dashboard Module
//!
//! Text rendering for the live terminal dashboard.
//!
//! This module handles:
//! - The RPM bar and speedometer widgets
//! - Car and race information panels
//! - The debug view (full record dump)
//! - Composing a whole frame from explicit view and data state
//!
//! Rendering is pure: every function takes the state it draws and returns a
//! string. Writing to the terminal is left to the caller.

pub mod meters;
pub mod panels;
pub mod style;

pub use meters::{render_rpm_meter, render_speedometer};
pub use panels::render_info_panels;

use crate::config::DashboardConfig;
use crate::debug::format_record;
use crate::packet::TelemetryRecord;
use style::{paint, Color};

/// Which view the dashboard is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Normal,
    Debug,
}

impl View {
    /// The view a toggle switches to
    pub fn other(self) -> Self {
        match self {
            View::Normal => View::Debug,
            View::Debug => View::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Normal => "Normal View",
            View::Debug => "Debug View",
        }
    }
}

/// User-controlled UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardState {
    pub view: View,
}

impl DashboardState {
    pub fn new(view: View) -> Self {
        Self { view }
    }

    /// Initial state for the given dashboard settings
    pub fn from_config(config: &DashboardConfig) -> Self {
        if config.start_in_debug_view {
            Self::new(View::Debug)
        } else {
            Self::new(View::Normal)
        }
    }

    /// Switch between the normal and debug views
    pub fn toggle(&mut self) {
        self.view = self.view.other();
    }
}

/// Latest data published by the I/O task
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LatestState {
    /// Nothing received yet
    #[default]
    Waiting,
    Record(TelemetryRecord),
    /// Reading or decoding stopped with this error
    Failed(String),
}

/// Compose one full dashboard frame
///
/// # Arguments
///
/// * `state` - Current view selection
/// * `latest` - Most recent record or error from the I/O task
/// * `config` - Widget sizes
///
/// # Returns
///
/// * `String` - Frame text with ANSI colours, lines separated by `\n`
///
/// # Examples
///
/// ```
/// use fh5_dash::config::DashboardConfig;
/// use fh5_dash::dashboard::{render_frame, DashboardState, LatestState};
///
/// let frame = render_frame(
///     &DashboardState::default(),
///     &LatestState::Waiting,
///     &DashboardConfig::default(),
/// );
/// assert!(frame.contains("Waiting for data..."));
/// ```
pub fn render_frame(state: &DashboardState, latest: &LatestState, config: &DashboardConfig) -> String {
    let mut lines = vec![header(state)];
    lines.push(String::new());

    match latest {
        LatestState::Waiting => lines.push("Waiting for data...".to_string()),
        LatestState::Failed(msg) => lines.push(paint(Color::Red, msg)),
        LatestState::Record(record) => match state.view {
            View::Normal => lines.extend(normal_view(record, config)),
            View::Debug => lines.extend(debug_view(record)),
        },
    }

    lines.join("\n")
}

fn header(state: &DashboardState) -> String {
    format!(
        "{}  {}",
        paint(Color::Yellow, "Forza Horizon 5 Telemetry"),
        paint(
            Color::Gray,
            &format!("[Enter] Toggle {}  [Ctrl+C] Quit", state.view.other().label())
        )
    )
}

fn normal_view(record: &TelemetryRecord, config: &DashboardConfig) -> Vec<String> {
    let mut lines = render_info_panels(record);
    lines.push(String::new());

    // Max RPM stays 0 until a car is loaded
    if let Some(meter) = render_rpm_meter(
        record.current_engine_rpm_floor(),
        record.engine_max_rpm_floor(),
        config.rpm_meter_width,
        config.rpm_green_segments,
    ) {
        lines.push(meter);
    }
    lines.push(String::new());

    lines.extend(
        render_speedometer(record.speed_kmh(), config.speedometer_width, config.max_speed_kmh)
            .lines()
            .map(str::to_string),
    );
    lines
}

fn debug_view(record: &TelemetryRecord) -> Vec<String> {
    let mut lines = vec![paint(Color::Yellow, "Debug View")];
    lines.extend(format_record(record).lines().map(str::to_string));
    lines
}
