#![forbid(unsafe_code)]

//! Color name resolution.
//!
//! Pens store color *names*; something has to turn those into 0–255 palette
//! indices at render time. [`ResolveColor`] is that capability, and
//! [`Palette`] is the stock implementation: a named-color table plus hex
//! quantization into the xterm 256-color cube and grayscale ramp.
//!
//! Resolution is total and deterministic. An unresolvable string is a
//! configuration problem on the caller's side, so it falls back to index 7
//! (the default-ish white) instead of failing mid-render.

/// Capability for mapping a color name to a terminal palette index.
///
/// Implementations must be deterministic and total over any string a style
/// dictionary can contain.
pub trait ResolveColor {
    /// Resolve a palette name or hex string to a palette index.
    fn resolve(&self, name: &str) -> u8;
}

impl<F> ResolveColor for F
where
    F: Fn(&str) -> u8,
{
    fn resolve(&self, name: &str) -> u8 {
        self(name)
    }
}

/// Palette index used when a name cannot be resolved at all.
const FALLBACK_INDEX: u8 = 7;

/// The default resolver: named ANSI colors plus hex quantization.
///
/// Named colors map straight to palette indices (the primaries land on
/// their bright variants, matching common terminal expectations: `red` is
/// 9, `blue` is 12). Hex strings — three or six digits, leading `#`
/// optional — quantize to the nearest 256-color cube or grayscale entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette;

impl ResolveColor for Palette {
    fn resolve(&self, name: &str) -> u8 {
        if let Some(index) = named_index(name) {
            return index;
        }
        if let Some((r, g, b)) = parse_hex(name) {
            return rgb_to_256(r, g, b);
        }
        FALLBACK_INDEX
    }
}

/// Look up a color by name, case-insensitively.
fn named_index(name: &str) -> Option<u8> {
    // Indices for the extended names are the rgb_to_256 quantization of
    // their CSS values, frozen here so name lookups stay table-driven.
    let index = match name.to_ascii_lowercase().as_str() {
        "black" => 0,
        "maroon" => 88,
        "green" => 2,
        "olive" => 100,
        "navy" => 18,
        "purple" | "magenta" | "fuchsia" => 13,
        "teal" => 30,
        "silver" => 7,
        "gray" | "grey" => 8,
        "red" => 9,
        "lime" => 46,
        "yellow" => 11,
        "blue" => 12,
        "cyan" | "aqua" => 14,
        "white" => 15,
        "orange" => 214,
        "brown" => 124,
        "pink" => 218,
        "gold" => 220,
        _ => return None,
    };
    Some(index)
}

/// Parse a 3- or 6-digit hex color, with or without a leading `#`.
fn parse_hex(name: &str) -> Option<(u8, u8, u8)> {
    let hex = name.strip_prefix('#').unwrap_or(name);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let r = chars.next()?.to_digit(16)? as u8;
            let g = chars.next()?.to_digit(16)? as u8;
            let b = chars.next()?.to_digit(16)? as u8;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Quantize an RGB color to the nearest ANSI 256-color index.
///
/// Pure grays use the 24-step grayscale ramp (232–255, clamped to black and
/// white cube corners at the extremes); everything else maps per channel
/// into the 6x6x6 cube.
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        let idx = ((r - 8) / 10).min(23);
        return 232 + idx;
    }

    16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
}

/// Map an 8-bit channel to the nearest 6x6x6 cube level.
///
/// The cube levels `[0, 95, 135, 175, 215, 255]` are not uniformly spaced,
/// so this splits at the midpoints between adjacent levels rather than
/// using equal-width bins.
fn cube_index(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}
