//! Where the count ends up.
//!
//! `DisplaySurface` is the "set text" half of a page element; the "next
//! animation frame" half is the frame interval in `animate`.

pub mod animate;
pub mod terminal;

use std::time::Duration;

pub use animate::{animate_count, ease_out_cubic, frame_value, FRAME_INTERVAL};
pub use terminal::{parse_hex_color, TerminalSurface};

/// Terminal error treatment: what to show and in which colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorIndicator {
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Count-up duration on success.
    pub animation: Duration,
    pub error: ErrorIndicator,
}

pub trait DisplaySurface {
    fn set_text(&mut self, text: &str);
    fn show_error(&mut self, indicator: &ErrorIndicator);
}
