//! ANSI colour helpers

use std::fmt::Write;

/// Terminal colours used by the dashboard widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
    Gray,
    White,
}

impl Color {
    /// SGR escape sequence selecting this foreground colour
    pub fn code(self) -> &'static str {
        match self {
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Red => "\x1b[31m",
            Color::Gray => "\x1b[90m",
            Color::White => "\x1b[37m",
        }
    }
}

pub const RESET: &str = "\x1b[0m";

/// Wrap `text` in `color`, resetting afterwards
pub fn paint(color: Color, text: &str) -> String {
    format!("{}{}{}", color.code(), text, RESET)
}

/// String builder that only emits an escape when the colour changes
#[derive(Debug, Default)]
pub struct Painter {
    out: String,
    current: Option<Color>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append uncoloured text, keeping whatever colour is active
    pub fn plain(&mut self, text: &str) -> &mut Self {
        self.out.push_str(text);
        self
    }

    pub fn paint(&mut self, color: Color, text: &str) -> &mut Self {
        if self.current != Some(color) {
            self.out.push_str(color.code());
            self.current = Some(color);
        }
        self.out.push_str(text);
        self
    }

    pub fn paint_fmt(&mut self, color: Color, args: std::fmt::Arguments<'_>) -> &mut Self {
        self.paint(color, "");
        // Writing into a String cannot fail
        let _ = self.out.write_fmt(args);
        self
    }

    /// Reset the terminal colour and return the built line
    pub fn finish(mut self) -> String {
        if self.current.is_some() {
            self.out.push_str(RESET);
        }
        self.out
    }
}

/// Printable width of `s`, ignoring SGR escape sequences
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Remove SGR escape sequences, leaving the printable text
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Pad `s` with spaces to `width` visible columns
pub fn pad_to(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{}{}", s, " ".repeat(pad))
}
