#![forbid(unsafe_code)]

//! Style attribute model for terminal text.
//!
//! This crate owns everything about *what* a run of text should look like:
//!
//! - [`Pen`] — an immutable set of style attributes (colors, emphasis flags,
//!   padding intent) with merge and diff operations.
//! - [`ResolveColor`] / [`Palette`] — the capability that turns a color name
//!   or hex string into a 0–255 terminal palette index.
//! - [`StyleSheet`] — a registry of named pens for markup dictionaries.
//!
//! It deliberately knows nothing about text content or trees; see
//! `inkpen-text` for composition and rendering.

pub mod palette;
pub mod pen;
pub mod sgr;
pub mod sheet;

pub use palette::{Palette, ResolveColor};
pub use pen::{Pen, PenSpec};
pub use sheet::StyleSheet;
