use std::io::Write;

use super::{DisplaySurface, ErrorIndicator};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Parse `#rrggbb` (or `#rgb`) into its channels.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |h: &str| u8::from_str_radix(h, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

/// 24-bit foreground SGR for `color`; plain red if it does not parse.
fn foreground(color: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m"),
        None => RED.to_string(),
    }
}

/// Renders the counter on one terminal line, redrawn in place.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// End the line after the final value.
    pub fn finish(&mut self) {
        self.emit(format_args!("\n"));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        let res = self.out.write_fmt(args).and_then(|_| self.out.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn set_text(&mut self, text: &str) {
        self.emit(format_args!("\rvisitors: {text}"));
    }

    fn show_error(&mut self, indicator: &ErrorIndicator) {
        let fg = foreground(&indicator.color);
        self.emit(format_args!("\r{fg}{}{RESET}\n", indicator.text));
    }
}
