#![forbid(unsafe_code)]

//! Rate-limited single-line status redraws.
//!
//! A status line is one terminal row overwritten in place with carriage
//! returns. [`StatusUpdater`] bounds how often redraw strings are produced
//! while guaranteeing the most recent message is eventually drawn.

pub mod status;

pub use status::{StatusConfig, StatusUpdater};
