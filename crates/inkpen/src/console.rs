#![forbid(unsafe_code)]

//! The `Console` facade: composition helpers, display routing, and the
//! status line, behind one configuration surface.
//!
//! A console never probes its environment. Width, TTY-ness, color use, and
//! quiet mode all arrive through [`ConsoleConfig`]; the embedded
//! [`StatusUpdater`] and color resolver follow from it. This keeps every
//! method deterministic for a given configuration, terminals or not.
//!
//! # Style aliases
//!
//! The config carries a name-to-color alias table. [`Console::color`] and
//! [`Console::background`] consult it first, so `color("error", ...)` picks
//! up whatever "error" is configured as, while unknown names fall through to
//! the resolver as literal color names. Four aliases ship by default:
//!
//! | Alias | Color |
//! |-----------|-------|
//! | `dim` | `888` |
//! | `timestamp`| `0cc` |
//! | `warning` | `f60` |
//! | `error` | `c00` |

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use tracing::trace;

use inkpen_status::{StatusConfig, StatusUpdater};
use inkpen_style::{Palette, Pen, ResolveColor, StyleSheet};
use inkpen_text::{parse_markup, span, Item, MarkupError, Span};

/// Default style aliases, overridable per name via
/// [`ConsoleConfig::with_style`].
pub const DEFAULT_STYLES: [(&str, &str); 4] = [
    ("dim", "888"),
    ("timestamp", "0cc"),
    ("warning", "f60"),
    ("error", "c00"),
];

/// Configuration for a [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Terminal width in columns, used by the status line.
    pub width: u16,
    /// Minimum interval between status redraws.
    pub frequency: std::time::Duration,
    /// Emit escape codes when rendering. Plain text otherwise.
    pub use_color: bool,
    /// Whether output goes to a terminal. Off disables the status line and
    /// the clear-before-display handshake.
    pub on_tty: bool,
    /// Suppress verbose output and the status line.
    pub quiet: bool,
    /// Style alias table, name to color name.
    pub styles: HashMap<String, String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            width: 80,
            frequency: std::time::Duration::from_millis(100),
            use_color: true,
            on_tty: true,
            quiet: false,
            styles: DEFAULT_STYLES
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl ConsoleConfig {
    /// Set the terminal width in columns.
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the minimum interval between status redraws.
    #[must_use]
    pub fn with_frequency(mut self, frequency: std::time::Duration) -> Self {
        self.frequency = frequency;
        self
    }

    /// Enable or disable escape-code output.
    #[must_use]
    pub fn with_use_color(mut self, enabled: bool) -> Self {
        self.use_color = enabled;
        self
    }

    /// Declare whether output goes to a terminal.
    #[must_use]
    pub fn with_on_tty(mut self, on_tty: bool) -> Self {
        self.on_tty = on_tty;
        self
    }

    /// Enable or disable quiet mode.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Add or override a style alias.
    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, color: impl Into<String>) -> Self {
        self.styles.insert(name.into(), color.into());
        self
    }
}

/// Facade over composition, rendering, display, and the status line.
pub struct Console {
    use_color: bool,
    on_tty: bool,
    quiet: bool,
    styles: HashMap<String, String>,
    updater: StatusUpdater,
    colors: Box<dyn ResolveColor>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("use_color", &self.use_color)
            .field("on_tty", &self.on_tty)
            .field("quiet", &self.quiet)
            .field("styles", &self.styles)
            .field("updater", &self.updater)
            .finish_non_exhaustive()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl Console {
    /// Create a console resolving colors through the default [`Palette`].
    #[must_use]
    pub fn new(config: ConsoleConfig) -> Self {
        Self::with_resolver(config, Palette)
    }

    /// Create a console with a custom color resolver.
    #[must_use]
    pub fn with_resolver(config: ConsoleConfig, colors: impl ResolveColor + 'static) -> Self {
        let updater = StatusUpdater::new(
            StatusConfig::default()
                .with_width(config.width)
                .with_frequency(config.frequency),
        );
        Self {
            use_color: config.use_color,
            on_tty: config.on_tty,
            quiet: config.quiet,
            styles: config.styles,
            updater,
            colors: Box::new(colors),
        }
    }

    /// Toggle escape-code output.
    pub fn set_use_color(&mut self, enabled: bool) {
        self.use_color = enabled;
    }

    /// Toggle quiet mode.
    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    /// Check whether escape codes are emitted.
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.use_color
    }

    /// Check whether quiet mode is on.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Join items under an unset pen.
    #[must_use]
    pub fn merge(&self, items: impl IntoIterator<Item = Item>) -> Span {
        span(Pen::default(), items)
    }

    /// Wrap items in a foreground color. `name` is alias-resolved first.
    #[must_use]
    pub fn color(&self, name: &str, items: impl IntoIterator<Item = Item>) -> Span {
        span(Pen::new().fg(self.alias(name)), items)
    }

    /// Wrap items in a background color. `name` is alias-resolved first.
    #[must_use]
    pub fn background(&self, name: &str, items: impl IntoIterator<Item = Item>) -> Span {
        span(Pen::new().bg(self.alias(name)), items)
    }

    /// Wrap items in underline.
    #[must_use]
    pub fn underline(&self, items: impl IntoIterator<Item = Item>) -> Span {
        span(Pen::new().underline(), items)
    }

    /// Wrap items in bold.
    #[must_use]
    pub fn bold(&self, items: impl IntoIterator<Item = Item>) -> Span {
        span(Pen::new().bold(), items)
    }

    /// Wrap items in italic.
    #[must_use]
    pub fn italic(&self, items: impl IntoIterator<Item = Item>) -> Span {
        span(Pen::new().italic(), items)
    }

    /// Join items, left-padded with spaces to at least `width` visible
    /// characters.
    #[must_use]
    pub fn pad_left(&self, width: usize, items: impl IntoIterator<Item = Item>) -> Span {
        let joined = self.merge(items);
        if width > joined.len() {
            let fill = Item::from(" ".repeat(width - joined.len()));
            self.merge([fill, joined.into()])
        } else {
            joined
        }
    }

    /// Join items, right-padded with spaces to at least `width` visible
    /// characters.
    #[must_use]
    pub fn pad_right(&self, width: usize, items: impl IntoIterator<Item = Item>) -> Span {
        let joined = self.merge(items);
        if width > joined.len() {
            let fill = Item::from(" ".repeat(width - joined.len()));
            self.merge([joined.into(), fill])
        } else {
            joined
        }
    }

    /// Parse a tag template against a style sheet.
    pub fn format(&self, styles: &StyleSheet, template: &str) -> Result<Span, MarkupError> {
        parse_markup(styles, template)
    }

    /// Render a span per the color setting: escape codes on, plain text off.
    #[must_use]
    pub fn render(&self, message: &Span) -> String {
        if self.use_color {
            message.to_ansi(self.colors.as_ref())
        } else {
            message.to_plain()
        }
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Write a rendered line to `out`, clearing the status line first when
    /// on a terminal.
    pub fn display_to(&mut self, out: &mut dyn Write, message: &Span) -> io::Result<()> {
        let clear = if self.on_tty {
            self.updater.clear()
        } else {
            String::new()
        };
        let text = self.render(message);
        out.write_all(clear.as_bytes())?;
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")
    }

    /// Write a rendered line to stdout.
    pub fn display(&mut self, message: &Span) -> io::Result<()> {
        self.display_to(&mut io::stdout(), message)
    }

    /// Write a rendered line to stdout unless quiet.
    pub fn display_verbose(&mut self, message: &Span) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.display(message)
    }

    /// Parse a tag template against `styles` and write the rendered line to
    /// `out`.
    ///
    /// Fails with [`Error::Markup`](crate::Error::Markup) on a bad template
    /// and [`Error::Io`](crate::Error::Io) on a write failure.
    pub fn display_markup(
        &mut self,
        out: &mut dyn Write,
        styles: &StyleSheet,
        template: &str,
    ) -> crate::Result<()> {
        let message = self.format(styles, template)?;
        self.display_to(out, &message)?;
        Ok(())
    }

    /// Write a line to stderr prefixed with a colored `ERROR: ` label.
    pub fn display_error(&mut self, message: &Span) -> io::Result<()> {
        let line = self.labeled("error", "ERROR", message);
        self.display_to(&mut io::stderr(), &line)
    }

    /// Write a line to stderr prefixed with a colored `WARNING: ` label.
    pub fn display_warning(&mut self, message: &Span) -> io::Result<()> {
        let line = self.labeled("warning", "WARNING", message);
        self.display_to(&mut io::stderr(), &line)
    }

    /// Build a `LABEL: message` line with the label in the named alias
    /// color.
    #[must_use]
    pub fn labeled(&self, alias: &str, label: &str, message: &Span) -> Span {
        self.merge([
            self.color(alias, [Item::from(label)]).into(),
            Item::from(": "),
            message.clone().into(),
        ])
    }

    // =========================================================================
    // Status line
    // =========================================================================

    /// Redraw the status line with `message`, or clear it with `None`.
    /// Writes nothing when not on a terminal or quiet.
    pub fn status_to(&mut self, out: &mut dyn Write, message: Option<&Span>) -> io::Result<()> {
        if !self.on_tty || self.quiet {
            return Ok(());
        }
        let bytes = match message {
            None => self.updater.clear(),
            Some(message) => {
                let text = self.render(message);
                trace!(target: "inkpen.status", chars = message.len(), "status");
                self.updater.update(Some(&text))
            }
        };
        out.write_all(bytes.as_bytes())
    }

    /// [`Console::status_to`] against stdout.
    pub fn status(&mut self, message: Option<&Span>) -> io::Result<()> {
        self.status_to(&mut io::stdout(), message)
    }

    /// Flush a deferred status redraw if one is due. Call periodically while
    /// a status line is active.
    pub fn status_tick_to(&mut self, out: &mut dyn Write) -> io::Result<()> {
        if !self.on_tty || self.quiet {
            return Ok(());
        }
        out.write_all(self.updater.tick().as_bytes())
    }

    /// [`Console::status_tick_to`] against stdout.
    pub fn status_tick(&mut self) -> io::Result<()> {
        self.status_tick_to(&mut io::stdout())
    }

    fn alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.styles.get(name).map_or(name, String::as_str)
    }
}
