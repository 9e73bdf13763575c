#![forbid(unsafe_code)]

//! Inkpen public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//! ```
//! use inkpen::prelude::*;
//!
//! let cli = Console::new(ConsoleConfig::default().with_on_tty(false));
//! let line = cli.merge([
//!     Item::from("deployed "),
//!     cli.color("green", [Item::from("ok")]).into(),
//! ]);
//! assert_eq!(cli.render(&line), "deployed \u{1b}[32mok\u{1b}[39m");
//! ```

use std::fmt;

pub mod console;

// --- Console ---------------------------------------------------------------

pub use console::{Console, ConsoleConfig, DEFAULT_STYLES};

// --- Style re-exports ------------------------------------------------------

pub use inkpen_style::{Palette, Pen, PenSpec, ResolveColor, StyleSheet};

// --- Text re-exports -------------------------------------------------------

pub use inkpen_text::{parse_markup, span, Item, MarkupError, SliceError, Span};

// --- Status re-exports -----------------------------------------------------

pub use inkpen_status::{StatusConfig, StatusUpdater};

// --- Errors ----------------------------------------------------------------

/// Top-level error type for inkpen apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while writing to an output stream.
    Io(std::io::Error),
    /// Template parse failure.
    Markup(MarkupError),
    /// Invalid span slice range.
    Slice(SliceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Markup(err) => write!(f, "{err}"),
            Self::Slice(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Markup(err) => Some(err),
            Self::Slice(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<MarkupError> for Error {
    fn from(err: MarkupError) -> Self {
        Self::Markup(err)
    }
}

impl From<SliceError> for Error {
    fn from(err: SliceError) -> Self {
        Self::Slice(err)
    }
}

/// Standard result type for inkpen APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Console, ConsoleConfig, Error, Item, Pen, PenSpec, Result, Span, StatusUpdater,
        StyleSheet, span,
    };

    pub use crate::{status, style, text};
}

pub use inkpen_status as status;
pub use inkpen_style as style;
pub use inkpen_text as text;
