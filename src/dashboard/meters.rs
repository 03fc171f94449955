//! RPM bar and speedometer widgets

use super::style::{paint, Color, Painter};

/// Major divisions on the speedometer scale
pub const SPEED_SEGMENTS: usize = 8;

/// Share of the scale drawn green
const GREEN_ZONE: f32 = 0.3;
/// Share of the scale below which the needle is yellow
const YELLOW_ZONE: f32 = 0.7;

/// Render the segmented RPM bar
///
/// Filled segments are green up to `green_segments`; the rest of the filled
/// bar goes yellow for the first half of the remaining zone and red after
/// that. Unfilled segments are grey. The line ends with `current/max`.
///
/// # Arguments
///
/// * `current` - Current engine RPM
/// * `max` - Engine max RPM
/// * `width` - Total number of segments
/// * `green_segments` - Segments drawn green before the warning zone
///
/// # Returns
///
/// * `Option<String>` - Rendered line, or `None` when `max` is zero
///   (no car loaded yet)
///
/// # Examples
///
/// ```
/// use fh5_dash::dashboard::render_rpm_meter;
///
/// assert!(render_rpm_meter(0.0, 0.0, 50, 30).is_none());
/// let line = render_rpm_meter(4000.0, 8000.0, 50, 30).unwrap();
/// assert!(line.ends_with("4000/8000"));
/// ```
pub fn render_rpm_meter(current: f32, max: f32, width: usize, green_segments: usize) -> Option<String> {
    if max == 0.0 {
        return None;
    }

    let filled = filled_segments(current, max, width);
    let warning_zone = width.saturating_sub(green_segments) as f32;

    let mut line = Painter::new();
    line.plain("RPM: ");

    for i in 0..width {
        if i >= filled {
            line.paint(Color::Gray, "░");
        } else if i < green_segments {
            line.paint(Color::Green, "█");
        } else if ((i - green_segments) as f32 / warning_zone) < 0.5 {
            line.paint(Color::Yellow, "█");
        } else {
            line.paint(Color::Red, "█");
        }
    }

    let mut text = line.finish();
    text.push_str(&format!(" {:.0}/{:.0}", current, max));
    Some(text)
}

/// Segments to fill for `current` out of `max`, clamped to `[0, width]`
fn filled_segments(current: f32, max: f32, width: usize) -> usize {
    // Float to int casts saturate and map NaN to 0
    let filled = (width as f32 * (current / max)) as i64;
    filled.clamp(0, width as i64) as usize
}

/// Render the speedometer
///
/// Produces six lines: a three-line arc, the digital readout, the scale with
/// the needle and a label row from 0 to `max_speed`.
///
/// # Arguments
///
/// * `speed_kmh` - Speed to display
/// * `width` - Scale width in columns
/// * `max_speed` - Speed at the right end of the scale
pub fn render_speedometer(speed_kmh: f32, width: usize, max_speed: u32) -> String {
    let mut lines = speedometer_arc(width);
    lines.push(speed_readout(speed_kmh));
    lines.push(speed_markers(speed_kmh, width, max_speed));
    lines.push(speed_labels(max_speed));
    lines.join("\n")
}

fn speedometer_arc(width: usize) -> Vec<String> {
    let inner = width.saturating_sub(2);
    vec![
        format!("      {}", paint(Color::White, &format!("╭{}╮", "─".repeat(inner)))),
        format!("   {}", paint(Color::White, &format!("╭╯{}╰╮", " ".repeat(inner)))),
        paint(
            Color::White,
            &format!("╭╯  {}  ╰╮", " ".repeat(width.saturating_sub(6))),
        ),
    ]
}

fn speed_readout(speed_kmh: f32) -> String {
    let mut line = Painter::new();
    line.paint_fmt(Color::Yellow, format_args!("{:>3.0}", speed_kmh))
        .paint(Color::White, "km/h");
    line.finish()
}

fn zone_color(fraction: f32) -> Color {
    if fraction < GREEN_ZONE {
        Color::Green
    } else if fraction < YELLOW_ZONE {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn speed_markers(speed_kmh: f32, width: usize, max_speed: u32) -> String {
    let max_speed = max_speed as f32;
    let needle = (speed_kmh / max_speed * width as f32) as i64;
    let major = (width / SPEED_SEGMENTS).max(1);
    let minor = (width / SPEED_SEGMENTS / 2).max(1);

    let mut line = Painter::new();
    line.paint(Color::White, "│");

    for i in 0..width {
        let tick = if i % major == 0 {
            "┃"
        } else if i % minor == 0 {
            "┊"
        } else {
            "━"
        };

        let pos = i as i64;
        if pos == needle {
            line.paint(zone_color(speed_kmh / max_speed), "█");
        } else if pos < needle {
            line.paint(zone_color(i as f32 / width as f32), tick);
        } else {
            line.paint(Color::Gray, tick);
        }
    }

    line.paint(Color::White, "│");
    line.finish()
}

fn speed_labels(max_speed: u32) -> String {
    let mut line = Painter::new();
    line.plain("   ");

    let segments = SPEED_SEGMENTS as u32;
    for i in 0..=segments {
        let label = u64::from(i) * u64::from(max_speed) / u64::from(segments);
        let text = if i == 0 {
            format!("{:<6}", label)
        } else if i == segments {
            label.to_string()
        } else {
            format!("{:<5}", label)
        };
        line.paint(Color::Gray, &text);
    }

    line.finish()
}
