#![forbid(unsafe_code)]

//! The `Span` tree: immutable styled text with a visible-length invariant.
//!
//! A span is a pen plus an ordered list of children, each either literal
//! text or another span. `length` counts *visible* characters only and is
//! memoized at construction, which is what lets [`Span::slice`] cut by
//! display column without ever parsing escape codes out of a rendered
//! string.
//!
//! Rendering is a single recursive pass that threads one "truly active"
//! pen — the style the terminal last actually received bytes for — through
//! the whole walk. Each literal run emits only the delta between that
//! active pen and its own resolved style, so adjacent same-styled runs cost
//! one transition, not one per node.

use std::fmt;

use inkpen_style::{Palette, Pen, ResolveColor};

/// One child of a [`Span`]: literal text or a nested span.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A literal text run, styled by the enclosing span's resolved pen.
    Text(String),
    /// A nested span with its own pen.
    Span(Span),
}

impl Item {
    /// Visible length in characters (no control bytes).
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self {
            Item::Text(s) => s.chars().count(),
            Item::Span(sp) => sp.len(),
        }
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Text(s.to_string())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Text(s)
    }
}

impl From<Span> for Item {
    fn from(sp: Span) -> Self {
        Item::Span(sp)
    }
}

/// An immutable tree of styled text.
///
/// Built by [`span`] (or the markup parser); never mutated afterwards.
/// Slicing produces a new, independent tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pen: Pen,
    items: Vec<Item>,
    length: usize,
}

/// Requested slice range was inverted (`end` precedes `start`).
///
/// Reported with the indices after negative-from-end adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceError {
    /// Adjusted start index.
    pub start: isize,
    /// Adjusted end index.
    pub end: isize,
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid slice range: end {} precedes start {}",
            self.end, self.start
        )
    }
}

impl std::error::Error for SliceError {}

/// A run of `n` spaces.
#[must_use]
pub fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// Compose items under a pen.
///
/// This is the one entry point where a pen's padding intent manifests: if
/// `pen.padding` is set and the composed content is shorter than the
/// requested width, a literal run of spaces is synthesized on the left
/// (negative padding) or right (positive) and the span rebuilt with it.
#[must_use]
pub fn span<I>(pen: Pen, items: I) -> Span
where
    I: IntoIterator<Item = Item>,
{
    let items: Vec<Item> = items.into_iter().collect();
    let built = Span::new(pen.clone(), items.clone());
    if let Some(padding) = pen.padding {
        let want = padding.unsigned_abs() as usize;
        if want > built.len() {
            let fill = Item::Text(spaces(want - built.len()));
            let mut padded = Vec::with_capacity(items.len() + 1);
            if padding < 0 {
                padded.push(fill);
                padded.extend(items);
            } else {
                padded.extend(items);
                padded.push(fill);
            }
            return Span::new(pen, padded);
        }
    }
    built
}

impl Span {
    /// Construct a span directly, without applying padding.
    ///
    /// A wrapper around exactly one child span is collapsed: the outer pen
    /// acts as the base and the child's pen as the override, and the child's
    /// own children are adopted. Repeats until the single remaining child is
    /// not a span.
    #[must_use]
    pub fn new(pen: Pen, items: Vec<Item>) -> Self {
        let mut pen = pen;
        let mut items = items;
        loop {
            if items.len() != 1 {
                break;
            }
            match items.pop() {
                Some(Item::Span(child)) => {
                    pen = pen.merge(&child.pen);
                    items = child.items;
                }
                Some(other) => {
                    items.push(other);
                    break;
                }
                None => break,
            }
        }
        let length = items.iter().map(Item::visible_len).sum();
        Self { pen, items, length }
    }

    /// The span's own pen.
    #[must_use]
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// The child items, in order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Visible length in characters, excluding all control bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check whether the span has no visible content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Cut the half-open visible-character range `[start, end)` into a new
    /// span carrying the same outer pen.
    ///
    /// Negative indices count from the end; `end` of `None` means the full
    /// length. An `end` that precedes `start` after adjustment is a contract
    /// violation. Children wholly outside the range are dropped, children
    /// wholly inside are kept as-is, and children straddling a boundary are
    /// sliced recursively (literal text at character granularity).
    pub fn slice(
        &self,
        start: isize,
        end: impl Into<Option<isize>>,
    ) -> Result<Span, SliceError> {
        let len = self.length as isize;
        let mut start = start;
        let mut end = end.into().unwrap_or(len);
        if start < 0 {
            start += len;
        }
        if end < 0 {
            end += len;
        }
        if end < start {
            return Err(SliceError { start, end });
        }
        let start = start.clamp(0, len) as usize;
        let end = end.clamp(0, len) as usize;

        let mut kept: Vec<Item> = Vec::new();
        let mut i = 0usize;
        for item in &self.items {
            let n = item.visible_len();
            if i < end && i + n >= start {
                if i >= start && i + n < end {
                    kept.push(item.clone());
                } else {
                    let lo = start.saturating_sub(i);
                    let hi = (end - i).min(n);
                    kept.push(match item {
                        Item::Text(s) => {
                            Item::Text(s.chars().skip(lo).take(hi - lo).collect())
                        }
                        Item::Span(sp) => Item::Span(sp.slice(lo as isize, hi as isize)?),
                    });
                }
            }
            i += n;
        }
        Ok(Span::new(self.pen.clone(), kept))
    }

    /// Render with escape codes, resolving color names through `colors`.
    ///
    /// Starts from an all-unset style and appends a final transition back to
    /// it, so no style leaks past the rendered text.
    #[must_use]
    pub fn to_ansi(&self, colors: &dyn ResolveColor) -> String {
        let mut out = String::new();
        let mut active = Pen::default();
        self.render_into(&mut out, &mut active, &Pen::default(), colors, true);
        if !active.is_plain() {
            out.push_str(&Pen::default().sgr_delta(&active, colors));
        }
        out
    }

    /// Render with the default [`Palette`].
    #[must_use]
    pub fn to_ansi_default(&self) -> String {
        self.to_ansi(&Palette)
    }

    /// Concatenate the literal text in order, with no escape bytes at all.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        let mut active = Pen::default();
        self.render_into(&mut out, &mut active, &Pen::default(), &plain_resolver, false);
        out
    }

    /// Recursive render pass.
    ///
    /// `active` is the style the output buffer last emitted codes for and is
    /// threaded through the entire walk; `inherited` is the resolved style
    /// of the enclosing spans. Codes are emitted per literal run, for the
    /// delta between `active` and this subtree's resolved style only.
    fn render_into(
        &self,
        out: &mut String,
        active: &mut Pen,
        inherited: &Pen,
        colors: &dyn ResolveColor,
        emit: bool,
    ) {
        let pen = inherited.merge(&self.pen);
        for item in &self.items {
            match item {
                Item::Span(sp) => sp.render_into(out, active, &pen, colors, emit),
                Item::Text(s) if !s.is_empty() => {
                    if emit {
                        out.push_str(&pen.sgr_delta(active, colors));
                    }
                    *active = pen.clone();
                    out.push_str(s);
                }
                // Zero-length runs contribute nothing, including style churn.
                Item::Text(_) => {}
            }
        }
    }
}

fn plain_resolver(_name: &str) -> u8 {
    0
}
