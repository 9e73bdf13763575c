#![forbid(unsafe_code)]

//! Tag-based template parsing for styled text.
//!
//! Templates interleave literal text with `<name>...</name>` markers, where
//! every `name` must be a key in the supplied [`StyleSheet`]. Parsing builds
//! the same [`Span`] tree that direct composition calls would, so rendering
//! and slicing behave identically regardless of which path built the tree.
//!
//! # Syntax
//!
//! - `<name>` opens a styled region, `</name>` closes it. Regions nest.
//! - `\<name>` suppresses the marker: the backslash is dropped and the
//!   marker text appears literally. A backslash anywhere else is an
//!   ordinary character.
//! - A `<` that does not begin a well-formed marker (no `>` before end of
//!   input, or nothing between the brackets) is an ordinary character.
//!
//! # Example
//! ```
//! use inkpen_style::{Pen, StyleSheet};
//! use inkpen_text::parse_markup;
//!
//! let mut styles = StyleSheet::new();
//! styles.define("warn", Pen::new().fg("yellow"));
//! let span = parse_markup(&styles, "ready <warn>low disk</warn>").unwrap();
//! assert_eq!(span.to_plain(), "ready low disk");
//! ```

use std::fmt;

use smallvec::SmallVec;

use inkpen_style::{Pen, StyleSheet};

use crate::span::{span, Item, Span};

/// Errors from template parsing.
///
/// Positions are character indices into the template string, pointing at the
/// `<` of the marker involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A close marker appeared with no region open.
    UnmatchedClose { tag: String, position: usize },
    /// A close marker named a different tag than the innermost open region.
    MismatchedTag {
        expected: String,
        opened_at: usize,
        found: String,
        position: usize,
    },
    /// A closed region's tag is not a key in the style sheet.
    UnknownStyle { tag: String, position: usize },
    /// End of input with a region still open.
    UnclosedTag { tag: String, position: usize },
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedClose { tag, position } => {
                write!(
                    f,
                    "unexpected close tag </{}> at position {} with nothing open",
                    tag, position
                )
            }
            Self::MismatchedTag {
                expected,
                opened_at,
                found,
                position,
            } => {
                write!(
                    f,
                    "mismatched close tag </{}> at position {}: <{}> opened at position {} is still open",
                    found, position, expected, opened_at
                )
            }
            Self::UnknownStyle { tag, position } => {
                write!(
                    f,
                    "unknown style '{}' at position {}",
                    tag, position
                )
            }
            Self::UnclosedTag { tag, position } => {
                write!(
                    f,
                    "tag <{}> opened at position {} was never closed",
                    tag, position
                )
            }
        }
    }
}

impl std::error::Error for MarkupError {}

/// One open region during the scan.
#[derive(Debug)]
struct Frame {
    tag: String,
    position: usize,
    items: Vec<Item>,
}

impl Frame {
    fn root() -> Self {
        Self {
            tag: String::new(),
            position: 0,
            items: Vec::new(),
        }
    }

    fn flush(&mut self, buffer: &mut String) {
        if !buffer.is_empty() {
            self.items.push(Item::Text(std::mem::take(buffer)));
        }
    }
}

/// A well-formed `<...>` marker starting at `at`: its body and the index
/// one past the closing `>`.
fn scan_marker(chars: &[char], at: usize) -> Option<(String, usize)> {
    debug_assert_eq!(chars[at], '<');
    let close = chars[at + 1..].iter().position(|&c| c == '>')?;
    if close == 0 {
        return None;
    }
    let body: String = chars[at + 1..at + 1 + close].iter().collect();
    Some((body, at + close + 2))
}

/// Parse a template into a [`Span`] against the given style sheet.
///
/// Styles are looked up when a region closes, so an unknown tag name is only
/// an error if its region is actually completed.
pub fn parse_markup(styles: &StyleSheet, template: &str) -> Result<Span, MarkupError> {
    let chars: Vec<char> = template.chars().collect();
    // The implicit unstyled root sits outside the stack; the stack holds
    // only tagged regions that are still open.
    let mut root = Frame::root();
    let mut stack: SmallVec<[Frame; 8]> = SmallVec::new();
    let mut buffer = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() && chars[i + 1] == '<' => {
                if let Some((body, next)) = scan_marker(&chars, i + 1) {
                    // Escaped marker: drop the backslash, keep the marker
                    // text as literal characters.
                    buffer.push('<');
                    buffer.push_str(&body);
                    buffer.push('>');
                    i = next;
                } else {
                    buffer.push('\\');
                    i += 1;
                }
            }
            '<' => match scan_marker(&chars, i) {
                Some((body, next)) if body.starts_with('/') => {
                    let found = body[1..].to_string();
                    let mut frame = match stack.pop() {
                        Some(frame) => frame,
                        None => {
                            return Err(MarkupError::UnmatchedClose {
                                tag: found,
                                position: i,
                            });
                        }
                    };
                    frame.flush(&mut buffer);
                    if frame.tag != found {
                        return Err(MarkupError::MismatchedTag {
                            expected: frame.tag,
                            opened_at: frame.position,
                            found,
                            position: i,
                        });
                    }
                    let pen = match styles.get(&frame.tag) {
                        Some(pen) => pen.clone(),
                        None => {
                            return Err(MarkupError::UnknownStyle {
                                tag: frame.tag,
                                position: i,
                            });
                        }
                    };
                    let completed = span(pen, frame.items);
                    stack
                        .last_mut()
                        .unwrap_or(&mut root)
                        .items
                        .push(Item::Span(completed));
                    i = next;
                }
                Some((body, next)) => {
                    stack.last_mut().unwrap_or(&mut root).flush(&mut buffer);
                    stack.push(Frame {
                        tag: body,
                        position: i,
                        items: Vec::new(),
                    });
                    i = next;
                }
                None => {
                    buffer.push('<');
                    i += 1;
                }
            },
            c => {
                buffer.push(c);
                i += 1;
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(MarkupError::UnclosedTag {
            tag: open.tag.clone(),
            position: open.position,
        });
    }
    root.flush(&mut buffer);
    Ok(Span::new(Pen::default(), root.items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::span;

    fn sheet() -> StyleSheet {
        let mut styles = StyleSheet::new();
        styles.define("blue", Pen::new().fg("blue"));
        styles.define("red10", Pen::new().bg("red").pad_left(10));
        styles.define("info", Pen::new().fg("cyan"));
        styles.define("number", Pen::new().fg("blue").pad_left(4));
        styles
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn simple_tag_matches_direct_composition() {
        let parsed = parse_markup(&sheet(), "<blue>green</blue>").unwrap();
        let direct = span(Pen::new().fg("blue"), [Item::from("green")]);
        assert_eq!(parsed, direct);
        assert_eq!(parsed.to_ansi_default(), "\x1b[38;5;12mgreen\x1b[39m");
    }

    #[test]
    fn tag_style_padding_is_applied() {
        let parsed = parse_markup(&sheet(), "<red10>green</red10>").unwrap();
        assert_eq!(
            parsed.to_ansi_default(),
            "\x1b[48;5;9m     green\x1b[49m"
        );
    }

    #[test]
    fn nested_tags_build_nested_spans() {
        let parsed = parse_markup(
            &sheet(),
            "<info>Downloading launch codes (<number>23</number>)</info>",
        )
        .unwrap();
        assert_eq!(
            parsed.to_ansi_default(),
            "\x1b[38;5;14mDownloading launch codes (\
             \x1b[38;5;12m  23\x1b[38;5;14m)\x1b[39m"
        );
    }

    #[test]
    fn literal_text_around_tags_survives() {
        let parsed = parse_markup(&sheet(), "a <blue>b</blue> c").unwrap();
        assert_eq!(parsed.to_plain(), "a b c");
    }

    #[test]
    fn plain_template_is_a_single_text_item() {
        let parsed = parse_markup(&sheet(), "no tags here").unwrap();
        assert_eq!(parsed.items(), &[Item::from("no tags here")]);
    }

    // =========================================================================
    // Escaping and malformed markers
    // =========================================================================

    #[test]
    fn escaped_marker_becomes_literal_text() {
        let parsed = parse_markup(&sheet(), "\\<blue>ok").unwrap();
        assert_eq!(parsed.to_plain(), "<blue>ok");
        assert_eq!(parsed.to_ansi_default(), "<blue>ok");
    }

    #[test]
    fn escaped_close_marker_becomes_literal_text() {
        let parsed = parse_markup(&sheet(), "<blue>a\\</blue>b</blue>").unwrap();
        assert_eq!(parsed.to_plain(), "a</blue>b");
    }

    #[test]
    fn backslash_without_a_marker_is_ordinary() {
        assert_eq!(parse_markup(&sheet(), "a\\b").unwrap().to_plain(), "a\\b");
        assert_eq!(parse_markup(&sheet(), "a\\<b").unwrap().to_plain(), "a\\<b");
        assert_eq!(parse_markup(&sheet(), "tail\\").unwrap().to_plain(), "tail\\");
    }

    #[test]
    fn bare_or_empty_brackets_are_ordinary() {
        assert_eq!(parse_markup(&sheet(), "a<>b").unwrap().to_plain(), "a<>b");
        assert_eq!(parse_markup(&sheet(), "a<blue").unwrap().to_plain(), "a<blue");
        assert_eq!(parse_markup(&sheet(), "2 < 3").unwrap().to_plain(), "2 < 3");
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn close_with_nothing_open_fails() {
        assert_eq!(
            parse_markup(&sheet(), "x</blue>"),
            Err(MarkupError::UnmatchedClose {
                tag: "blue".to_string(),
                position: 1,
            })
        );
    }

    #[test]
    fn mismatched_close_reports_both_positions() {
        assert_eq!(
            parse_markup(&sheet(), "<blue>x</info>"),
            Err(MarkupError::MismatchedTag {
                expected: "blue".to_string(),
                opened_at: 0,
                found: "info".to_string(),
                position: 7,
            })
        );
    }

    #[test]
    fn unknown_style_fails_at_close() {
        assert_eq!(
            parse_markup(&sheet(), "ok <bogus>x</bogus>"),
            Err(MarkupError::UnknownStyle {
                tag: "bogus".to_string(),
                position: 11,
            })
        );
    }

    #[test]
    fn unclosed_tag_fails_at_end_of_input() {
        assert_eq!(
            parse_markup(&sheet(), "a <blue>b"),
            Err(MarkupError::UnclosedTag {
                tag: "blue".to_string(),
                position: 2,
            })
        );
    }

    #[test]
    fn errors_render_tag_and_position() {
        let err = MarkupError::MismatchedTag {
            expected: "blue".to_string(),
            opened_at: 0,
            found: "info".to_string(),
            position: 7,
        };
        assert_eq!(
            err.to_string(),
            "mismatched close tag </info> at position 7: <blue> opened at position 0 is still open"
        );
    }
}
