#![forbid(unsafe_code)]

//! The `Pen`: an immutable style-attribute set.
//!
//! Every attribute is tri-state: unset (inherit), or an explicit value.
//! This matters for [`Pen::merge`] — a plain `bool` defaulting to `false`
//! would make an inner span unable to leave an attribute alone.
//!
//! Colors are stored as *names* (palette names or hex strings); resolution
//! to a palette index happens at render time through [`ResolveColor`], so a
//! pen built against one palette renders correctly against another.

use crate::palette::ResolveColor;
use crate::sgr;

/// An immutable set of terminal style attributes.
///
/// `Pen` is the unit of style state: spans carry one, rendering diffs one
/// against another. All combinators return new values; nothing mutates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pen {
    /// Foreground color name, if set.
    pub fg: Option<String>,
    /// Background color name, if set.
    pub bg: Option<String>,
    /// Bold: unset (inherit), on, or explicitly off.
    pub bold: Option<bool>,
    /// Underline: unset, on, or explicitly off.
    pub underline: Option<bool>,
    /// Italic: unset, on, or explicitly off.
    pub italic: Option<bool>,
    /// Padding intent: negative pads left to `|n|`, positive pads right to
    /// `n`. Only `inkpen_text::span` turns this into visible spaces.
    pub padding: Option<i32>,
}

/// A sparse pen description, the input shape for [`Pen::make`].
///
/// This mirrors what a style dictionary entry looks like: every field is
/// optional, and `pad_left`/`pad_right` are conveniences for the signed
/// `padding` encoding.
#[derive(Debug, Clone, Default)]
pub struct PenSpec {
    /// Foreground color name.
    pub fg: Option<String>,
    /// Background color name.
    pub bg: Option<String>,
    /// Bold flag.
    pub bold: Option<bool>,
    /// Underline flag.
    pub underline: Option<bool>,
    /// Italic flag.
    pub italic: Option<bool>,
    /// Pad left to this many columns (encodes as negative `padding`).
    pub pad_left: Option<u32>,
    /// Pad right to this many columns (encodes as positive `padding`).
    pub pad_right: Option<u32>,
}

impl Pen {
    /// Create an all-unset pen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pen from a sparse description.
    ///
    /// If both `pad_left` and `pad_right` are supplied, `pad_left` wins;
    /// supplying both is a caller mistake and the choice is deliberate and
    /// stable rather than an error.
    #[must_use]
    pub fn make(spec: &PenSpec) -> Self {
        let padding = match (spec.pad_left, spec.pad_right) {
            (Some(n), _) => Some(-(n as i32)),
            (None, Some(n)) => Some(n as i32),
            (None, None) => None,
        };
        Self {
            fg: spec.fg.clone(),
            bg: spec.bg.clone(),
            bold: spec.bold,
            underline: spec.underline,
            italic: spec.italic,
            padding,
        }
    }

    /// Set the foreground color name.
    #[must_use]
    pub fn fg(mut self, name: impl Into<String>) -> Self {
        self.fg = Some(name.into());
        self
    }

    /// Set the background color name.
    #[must_use]
    pub fn bg(mut self, name: impl Into<String>) -> Self {
        self.bg = Some(name.into());
        self
    }

    /// Turn bold on.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    /// Turn underline on.
    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    /// Turn italic on.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    /// Request left padding to `n` columns.
    #[must_use]
    pub fn pad_left(mut self, n: u32) -> Self {
        self.padding = Some(-(n as i32));
        self
    }

    /// Request right padding to `n` columns.
    #[must_use]
    pub fn pad_right(mut self, n: u32) -> Self {
        self.padding = Some(n as i32);
        self
    }

    /// Check whether every attribute is unset.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay `other` on top of this pen.
    ///
    /// Per attribute, `other`'s value wins when set; otherwise this pen's
    /// value carries through. Right-biased: merging in order makes the
    /// rightmost set value win regardless of grouping.
    #[must_use]
    pub fn merge(&self, other: &Pen) -> Pen {
        Pen {
            fg: other.fg.clone().or_else(|| self.fg.clone()),
            bg: other.bg.clone().or_else(|| self.bg.clone()),
            bold: other.bold.or(self.bold),
            underline: other.underline.or(self.underline),
            italic: other.italic.or(self.italic),
            padding: other.padding.or(self.padding),
        }
    }

    /// Escape codes moving the terminal from `active` to this pen.
    ///
    /// Only attributes that actually differ emit anything, in fixed order:
    /// background, foreground, bold, underline, italic. Color names compare
    /// as strings; two names that happen to resolve to the same index still
    /// count as a change.
    #[must_use]
    pub fn sgr_delta(&self, active: &Pen, colors: &dyn ResolveColor) -> String {
        let mut out = String::new();

        if active.bg != self.bg {
            match &self.bg {
                None => out.push_str(sgr::BG_RESET),
                Some(name) => sgr::push_bg(&mut out, colors.resolve(name)),
            }
        }

        if active.fg != self.fg {
            match &self.fg {
                None => out.push_str(sgr::FG_RESET),
                Some(name) => sgr::push_fg(&mut out, colors.resolve(name)),
            }
        }

        if active.bold != self.bold {
            out.push_str(if self.bold == Some(true) {
                sgr::BOLD_ON
            } else {
                sgr::BOLD_OFF
            });
        }

        if active.underline != self.underline {
            out.push_str(if self.underline == Some(true) {
                sgr::UNDERLINE_ON
            } else {
                sgr::UNDERLINE_OFF
            });
        }

        if active.italic != self.italic {
            out.push_str(if self.italic == Some(true) {
                sgr::ITALIC_ON
            } else {
                sgr::ITALIC_OFF
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use proptest::prelude::*;

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn make_maps_pad_left_to_negative_padding() {
        let pen = Pen::make(&PenSpec {
            pad_left: Some(5),
            ..PenSpec::default()
        });
        assert_eq!(pen.padding, Some(-5));
    }

    #[test]
    fn make_maps_pad_right_to_positive_padding() {
        let pen = Pen::make(&PenSpec {
            pad_right: Some(5),
            ..PenSpec::default()
        });
        assert_eq!(pen.padding, Some(5));
    }

    #[test]
    fn make_pad_left_wins_over_pad_right() {
        let pen = Pen::make(&PenSpec {
            pad_left: Some(3),
            pad_right: Some(9),
            ..PenSpec::default()
        });
        assert_eq!(pen.padding, Some(-3));
    }

    #[test]
    fn is_plain_only_when_every_attribute_is_unset() {
        assert!(Pen::new().is_plain());
        assert!(!Pen::new().fg("red").is_plain());
        assert!(!Pen::new().underline().is_plain());
        assert!(!Pen::new().pad_left(1).is_plain());
        let explicit_off = Pen {
            bold: Some(false),
            ..Pen::default()
        };
        assert!(!explicit_off.is_plain());
    }

    #[test]
    fn equality_is_field_for_field() {
        assert_eq!(Pen::new().fg("red").bold(), Pen::new().fg("red").bold());
        assert_ne!(Pen::new().fg("red"), Pen::new().fg("red").bold());
        assert_ne!(Pen::new(), Pen::new().pad_left(1));
    }

    // =========================================================================
    // Merge
    // =========================================================================

    #[test]
    fn merge_is_right_biased() {
        let base = Pen::new().fg("red").bold();
        let over = Pen::new().fg("blue");
        let merged = base.merge(&over);
        assert_eq!(merged.fg.as_deref(), Some("blue"));
        assert_eq!(merged.bold, Some(true));
    }

    #[test]
    fn merge_keeps_explicit_false() {
        let base = Pen::new().bold();
        let over = Pen {
            bold: Some(false),
            ..Pen::default()
        };
        assert_eq!(base.merge(&over).bold, Some(false));
    }

    #[test]
    fn merge_does_not_mutate_inputs() {
        let base = Pen::new().fg("red");
        let over = Pen::new().fg("blue");
        let _ = base.merge(&over);
        assert_eq!(base.fg.as_deref(), Some("red"));
        assert_eq!(over.fg.as_deref(), Some("blue"));
    }

    fn arb_pen() -> impl Strategy<Value = Pen> {
        (
            proptest::option::of("[a-f0-9]{3}"),
            proptest::option::of("[a-f0-9]{3}"),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(-8i32..8),
        )
            .prop_map(|(fg, bg, bold, underline, italic, padding)| Pen {
                fg,
                bg,
                bold,
                underline,
                italic,
                padding,
            })
    }

    proptest! {
        #[test]
        fn merge_rightmost_wins_regardless_of_grouping(
            a in arb_pen(), b in arb_pen(), c in arb_pen()
        ) {
            prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
        }
    }

    // =========================================================================
    // SGR deltas
    // =========================================================================

    #[test]
    fn delta_from_unset_emits_set_codes_in_order() {
        let pen = Pen::new().bg("red").fg("green").bold().underline().italic();
        let out = pen.sgr_delta(&Pen::new(), &Palette);
        assert_eq!(out, "\x1b[48;5;9m\x1b[32m\x1b[1m\x1b[4m\x1b[3m");
    }

    #[test]
    fn delta_to_unset_emits_reset_codes() {
        let pen = Pen::new().bg("red").fg("green").bold().underline().italic();
        let out = Pen::new().sgr_delta(&pen, &Palette);
        assert_eq!(out, "\x1b[49m\x1b[39m\x1b[22m\x1b[24m\x1b[23m");
    }

    #[test]
    fn delta_between_equal_pens_is_empty() {
        let pen = Pen::new().fg("blue").bold();
        assert_eq!(pen.sgr_delta(&pen.clone(), &Palette), "");
    }

    #[test]
    fn delta_only_emits_changed_attributes() {
        let from = Pen::new().fg("blue").bold();
        let to = Pen::new().fg("blue").bold().underline();
        assert_eq!(to.sgr_delta(&from, &Palette), "\x1b[4m");
    }

    #[test]
    fn delta_compares_color_names_not_indices() {
        // Both resolve to index 9, but the name changed, so a code is
        // emitted anyway. The diff is on the pen, not the terminal cell.
        let resolver = |_: &str| 9u8;
        let from = Pen::new().fg("scarlet");
        let to = Pen::new().fg("crimson");
        assert_eq!(to.sgr_delta(&from, &resolver), "\x1b[38;5;9m");
    }
}
