#![forbid(unsafe_code)]

//! StyleSheet: a registry of named pens.
//!
//! A `StyleSheet` maps tag names to [`Pen`]s, the way CSS classes map names
//! to declarations. The markup parser consults one to know what `<error>`
//! means; applications define their own vocabulary on top.
//!
//! # Example
//! ```
//! use inkpen_style::{Pen, StyleSheet};
//!
//! let mut sheet = StyleSheet::new();
//! sheet.define("error", Pen::new().fg("c00").bold());
//! sheet.define("number", Pen::new().fg("blue").pad_left(4));
//!
//! assert!(sheet.contains("error"));
//! assert_eq!(sheet.get("number").unwrap().padding, Some(-4));
//! ```

use std::collections::HashMap;

use crate::pen::{Pen, PenSpec};

/// A registry of named styles for markup dictionaries and theming.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pens: HashMap<String, Pen>,
}

impl StyleSheet {
    /// Create an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from `(name, spec)` pairs.
    pub fn from_specs<'a, I>(specs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, PenSpec)>,
    {
        let mut sheet = Self::new();
        for (name, spec) in specs {
            sheet.define(name, Pen::make(&spec));
        }
        sheet
    }

    /// Define a named pen, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>, pen: Pen) {
        self.pens.insert(name.into(), pen);
    }

    /// Remove a named pen, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Pen> {
        self.pens.remove(name)
    }

    /// Look up a pen by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pen> {
        self.pens.get(name)
    }

    /// Check whether a name is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pens.contains_key(name)
    }

    /// Number of defined pens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pens.len()
    }

    /// Check whether the sheet is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pens.is_empty()
    }

    /// All defined names, in arbitrary order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.pens.keys().map(String::as_str).collect()
    }
}
