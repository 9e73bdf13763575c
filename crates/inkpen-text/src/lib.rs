#![forbid(unsafe_code)]

//! Styled text trees for terminal output.
//!
//! The central type is [`Span`]: an immutable tree of literal text and
//! styled sub-spans that tracks its *visible* length independently of any
//! escape codes. On top of it:
//!
//! - [`span`] composes items under a [`Pen`](inkpen_style::Pen) and is the
//!   one place where a pen's padding intent becomes actual spaces.
//! - [`Span::slice`] cuts a visible-character range out of a tree without
//!   ever looking at control bytes.
//! - [`Span::to_ansi`] renders with delta-minimal escape output: codes are
//!   emitted only where the desired style differs from the style the
//!   terminal last actually received.
//! - [`markup::parse_markup`] builds the same trees from
//!   `<tag>...</tag>` template strings and a [`StyleSheet`](inkpen_style::StyleSheet).

pub mod markup;
pub mod span;

pub use markup::{MarkupError, parse_markup};
pub use span::{Item, SliceError, Span, span};
