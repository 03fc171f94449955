//! Car and race information panels

use super::style::{pad_to, paint, Color};
use crate::packet::TelemetryRecord;

/// Mechanical horsepower in watts
const WATTS_PER_HP: f32 = 745.7;

/// Inner width of each boxed panel
pub const PANEL_WIDTH: usize = 30;

/// Lines of the "Car Information" panel
pub fn car_info_lines(record: &TelemetryRecord) -> Vec<String> {
    vec![
        paint(Color::Yellow, "Car Information"),
        "-".repeat("Car Information".len()),
        format!("Speed: {:.0} km/h", record.speed_kmh()),
        format!("Power: {:.0} hp", (record.power_floor() / WATTS_PER_HP).floor()),
        format!("Torque: {:.0} Nm", record.torque_floor()),
        format!("Car Class: {}", record.car_class()),
        format!("PI: {}", record.car_performance_index()),
    ]
}

/// Lines of the "Race Information" panel
pub fn race_info_lines(record: &TelemetryRecord) -> Vec<String> {
    let (best, last, current) = record.lap_times();
    vec![
        paint(Color::Yellow, "Race Information"),
        "-".repeat("Race Information".len()),
        format!("Position: {}", record.race_position()),
        format!("Lap: {}", record.lap_number()),
        format!("Best Lap: {:.2}", best),
        format!("Last Lap: {:.2}", last),
        format!("Current Lap: {:.2}", current),
    ]
}

/// Draw a box around `lines`, padding each to `width` columns
pub fn boxed(lines: &[String], width: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(width + 2)));
    for line in lines {
        out.push(format!("│ {} │", pad_to(line, width)));
    }
    out.push(format!("└{}┘", "─".repeat(width + 2)));
    out
}

/// Place two blocks of lines next to each other
///
/// The shorter block is padded with blank lines. `left_width` is the
/// visible width of the left block's lines.
pub fn side_by_side(left: &[String], right: &[String], left_width: usize) -> Vec<String> {
    let rows = left.len().max(right.len());
    (0..rows)
        .map(|i| {
            let l = left.get(i).map(String::as_str).unwrap_or("");
            let r = right.get(i).map(String::as_str).unwrap_or("");
            format!("{} {}", pad_to(l, left_width), r)
        })
        .collect()
}

/// Both info panels, boxed and side by side
pub fn render_info_panels(record: &TelemetryRecord) -> Vec<String> {
    let left = boxed(&car_info_lines(record), PANEL_WIDTH);
    let right = boxed(&race_info_lines(record), PANEL_WIDTH);
    side_by_side(&left, &right, PANEL_WIDTH + 4)
}
