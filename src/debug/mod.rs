//! # Debug Formatting
//!
//! Human-readable dumps used by the debug view and for inspecting captures:
//! - Hex + ASCII view of raw bytes
//! - Key-sorted, nested dump of a decoded record

use serde_json::Value;
use std::fmt::Write;

use crate::packet::TelemetryRecord;

/// Bytes shown per hex dump line
const BYTES_PER_LINE: usize = 16;

/// Indentation per nesting level in record dumps
const INDENT: &str = "    ";

/// Format raw bytes as an offset / hex / ASCII table
///
/// # Arguments
///
/// * `data` - Bytes to dump
/// * `limit` - Maximum number of bytes to show (0 = no limit)
///
/// # Returns
///
/// * `String` - Multi-line dump, with a trailing notice if truncated
///
/// # Examples
///
/// ```
/// use fh5_dash::debug::format_hex_dump;
///
/// let dump = format_hex_dump(b"Forza", 0);
/// assert!(dump.contains("46 6F 72 7A 61"));
/// assert!(dump.contains("Forza"));
/// ```
pub fn format_hex_dump(data: &[u8], limit: usize) -> String {
    let mut out = String::new();

    out.push_str("Offset    Hex                                        ASCII\n");
    out.push_str("--------  ----------------------------------------  ----------------\n");

    let shown = if limit > 0 && limit < data.len() {
        limit
    } else {
        data.len()
    };

    for (line, chunk) in data[..shown].chunks(BYTES_PER_LINE).enumerate() {
        let _ = write!(out, "{:08X}  ", line * BYTES_PER_LINE);

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(b) => {
                    let _ = write!(out, "{:02X} ", b);
                }
                None => out.push_str("   "),
            }
        }

        out.push(' ');
        for &b in chunk {
            out.push(if (32..=126).contains(&b) { b as char } else { '.' });
        }
        out.push('\n');
    }

    if shown < data.len() {
        let _ = writeln!(out, "\n... {} more bytes not shown ...", data.len() - shown);
    }

    out
}

/// Format a record as a key-sorted, indented field listing
///
/// Nested groups (vectors, per-wheel sets) are printed as indented blocks.
/// Non-finite floats are shown as `non-finite`.
pub fn format_record(record: &TelemetryRecord) -> String {
    let mut out = String::from("TelemetryRecord\n");
    // A struct of plain scalars always serializes
    if let Ok(Value::Object(fields)) = serde_json::to_value(record) {
        write_fields(&mut out, &fields, 1);
    }
    out
}

fn write_fields(out: &mut String, fields: &serde_json::Map<String, Value>, depth: usize) {
    // serde_json's default map is ordered by key
    for (key, value) in fields {
        let indent = INDENT.repeat(depth);
        match value {
            Value::Object(nested) => {
                let _ = writeln!(out, "{}{}:", indent, key);
                write_fields(out, nested, depth + 1);
            }
            other => {
                let _ = writeln!(out, "{}{}: {}", indent, key, format_scalar(other));
            }
        }
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            // Every float in the record is an f32; print it at that precision
            Some(f) => format!("{}", f as f32),
            None => n.to_string(),
        },
        Value::Null => "non-finite".to_string(),
        other => other.to_string(),
    }
}
