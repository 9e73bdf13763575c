#![forbid(unsafe_code)]

//! SGR (Select Graphic Rendition) sequence generation.
//!
//! Pure string-building helpers; no state tracking. Diffing against the
//! currently-active style lives in [`Pen::sgr_delta`](crate::Pen::sgr_delta).
//!
//! # Sequence reference
//!
//! | Attribute  | Set                          | Reset      |
//! |------------|------------------------------|------------|
//! | Foreground | `CSI 3n m` / `CSI 38;5;n m`  | `CSI 39 m` |
//! | Background | `CSI 4n m` / `CSI 48;5;n m`  | `CSI 49 m` |
//! | Bold       | `CSI 1 m`                    | `CSI 22 m` |
//! | Underline  | `CSI 4 m`                    | `CSI 24 m` |
//! | Italic     | `CSI 3 m`                    | `CSI 23 m` |
//!
//! The short forms (`3n`/`4n`) are only valid for palette indices below 8;
//! everything else uses the 256-color extended form. Byte-exact output
//! depends on this split.

use std::fmt::Write as _;

/// Reset foreground to the terminal default: `CSI 39 m`.
pub const FG_RESET: &str = "\x1b[39m";
/// Reset background to the terminal default: `CSI 49 m`.
pub const BG_RESET: &str = "\x1b[49m";
/// Bold on: `CSI 1 m`.
pub const BOLD_ON: &str = "\x1b[1m";
/// Bold off: `CSI 22 m`.
pub const BOLD_OFF: &str = "\x1b[22m";
/// Underline on: `CSI 4 m`.
pub const UNDERLINE_ON: &str = "\x1b[4m";
/// Underline off: `CSI 24 m`.
pub const UNDERLINE_OFF: &str = "\x1b[24m";
/// Italic on: `CSI 3 m`.
pub const ITALIC_ON: &str = "\x1b[3m";
/// Italic off: `CSI 23 m`.
pub const ITALIC_OFF: &str = "\x1b[23m";

/// Append a foreground-set sequence for a palette index.
///
/// Indices 0–7 use the 3/4-bit form `CSI 3n m`; 8–255 use `CSI 38;5;n m`.
pub fn push_fg(out: &mut String, index: u8) {
    // Writing to a String cannot fail.
    if index < 8 {
        let _ = write!(out, "\x1b[3{index}m");
    } else {
        let _ = write!(out, "\x1b[38;5;{index}m");
    }
}

/// Append a background-set sequence for a palette index.
///
/// Indices 0–7 use the 3/4-bit form `CSI 4n m`; 8–255 use `CSI 48;5;n m`.
pub fn push_bg(out: &mut String, index: u8) {
    if index < 8 {
        let _ = write!(out, "\x1b[4{index}m");
    } else {
        let _ = write!(out, "\x1b[48;5;{index}m");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fg_short_form_below_eight() {
        let mut out = String::new();
        push_fg(&mut out, 2);
        assert_eq!(out, "\x1b[32m");
    }

    #[test]
    fn fg_extended_form_from_eight() {
        let mut out = String::new();
        push_fg(&mut out, 8);
        assert_eq!(out, "\x1b[38;5;8m");
        out.clear();
        push_fg(&mut out, 160);
        assert_eq!(out, "\x1b[38;5;160m");
    }

    #[test]
    fn bg_short_and_extended_forms() {
        let mut out = String::new();
        push_bg(&mut out, 7);
        assert_eq!(out, "\x1b[47m");
        out.clear();
        push_bg(&mut out, 9);
        assert_eq!(out, "\x1b[48;5;9m");
    }
}
