#![forbid(unsafe_code)]

//! Rate-limited status-line updater.
//!
//! Produces redraw strings for a single terminal line overwritten in place:
//! carriage return, a blank line of `width - 1` spaces, carriage return,
//! then the message truncated to `width - 1` visible characters. Escape
//! sequences in the message are copied through without counting toward the
//! width, trailing resets included.
//!
//! Emissions are bounded to roughly one per `frequency`. An update landing
//! inside the quiet window is held as pending and flushed by [`StatusUpdater::tick`]
//! once the window elapses, so the final message in a burst is never dropped.
//!
//! # Invariants
//!
//! - **Latest-wins**: only the most recent pending message is ever flushed.
//! - **At most one deferred flush**: any `update` or `clear` supersedes a
//!   scheduled one.
//! - **Eventual delivery**: a pending message is emitted once the window
//!   elapses, provided the caller keeps ticking.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use inkpen_status::{StatusConfig, StatusUpdater};
//!
//! let config = StatusConfig::default()
//!     .with_width(40)
//!     .with_frequency(Duration::from_millis(50));
//! let mut status = StatusUpdater::new(config);
//! print!("{}", status.update(Some("downloading...")));
//! // each frame:
//! print!("{}", status.tick());
//! // when done:
//! print!("{}", status.clear());
//! ```
//!
//! Driving the updater from a deterministic clock for tests is explicit:
//! every time-dependent operation has an `_at(now)` variant.

use std::time::{Duration, Instant};

use tracing::trace;

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::ZERO)
}

/// A run of `n` spaces.
#[must_use]
pub fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// Configuration for a [`StatusUpdater`].
#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Minimum interval between emitted redraws.
    pub frequency: Duration,
    /// Terminal width in columns. Redraws blank and occupy `width - 1`
    /// columns so the cursor never wraps.
    pub width: u16,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            frequency: Duration::from_millis(100),
            width: 80,
        }
    }
}

impl StatusConfig {
    /// Set the minimum interval between emitted redraws.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Duration) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the terminal width in columns.
    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
}

/// Rate-limited status-line state machine.
///
/// Pure with respect to I/O: every operation returns the bytes to write
/// (possibly empty) and never touches a stream itself.
#[derive(Debug)]
pub struct StatusUpdater {
    config: StatusConfig,
    blank_line: String,
    pending: Option<String>,
    last_emit: Option<Instant>,
    /// When the deferred flush is due. At most one is live.
    deadline: Option<Instant>,
}

impl StatusUpdater {
    /// Create an updater with the given configuration.
    #[must_use]
    pub fn new(config: StatusConfig) -> Self {
        let blank_line = spaces(usize::from(config.width.saturating_sub(1)));
        Self {
            config,
            blank_line,
            pending: None,
            last_emit: None,
            deadline: None,
        }
    }

    /// Record `message` (or re-issue the pending one when `None`) and return
    /// the redraw string if the quiet window has elapsed.
    ///
    /// Inside the window this returns `""` and arranges for [`StatusUpdater::tick`]
    /// to flush the message once the window ends. `None` with nothing
    /// pending is a no-op.
    pub fn update(&mut self, message: Option<&str>) -> String {
        self.update_at(message, Instant::now())
    }

    /// [`StatusUpdater::update`] against an explicit clock.
    pub fn update_at(&mut self, message: Option<&str>, now: Instant) -> String {
        let message = match message {
            Some(m) => m.to_string(),
            None => match self.pending.as_ref() {
                Some(m) => m.clone(),
                None => return String::new(),
            },
        };
        self.pending = Some(message.clone());

        let due = match self.last_emit {
            None => true,
            Some(t) => duration_since_or_zero(now, t) >= self.config.frequency,
        };
        if due {
            self.last_emit = Some(now);
            self.deadline = None;
            trace!(target: "inkpen.status", chars = message.chars().count(), "emit");
            return self.redraw(&message);
        }
        if self.deadline.is_none()
            && let Some(t) = self.last_emit
        {
            let at = t + self.config.frequency;
            trace!(
                target: "inkpen.status",
                wait_ms = duration_since_or_zero(at, now).as_millis() as u64,
                "defer"
            );
            self.deadline = Some(at);
        }
        String::new()
    }

    /// Forget the pending message and return the blank-redraw string.
    ///
    /// Cancels any deferred flush. Idempotent: with nothing pending this
    /// returns `""`.
    pub fn clear(&mut self) -> String {
        self.deadline = None;
        if self.pending.take().is_none() {
            return String::new();
        }
        trace!(target: "inkpen.status", "clear");
        self.redraw("")
    }

    /// Drive the deferred flush. Returns the redraw string when a scheduled
    /// flush is due, `""` otherwise. Call this periodically.
    pub fn tick(&mut self) -> String {
        self.tick_at(Instant::now())
    }

    /// [`StatusUpdater::tick`] against an explicit clock.
    pub fn tick_at(&mut self, now: Instant) -> String {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                self.update_at(None, now)
            }
            _ => String::new(),
        }
    }

    /// Time remaining until the deferred flush is due, if one is scheduled.
    #[must_use]
    pub fn time_until_flush(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|at| duration_since_or_zero(at, now))
    }

    /// Check whether a message is recorded (shown or awaiting flush).
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn redraw(&self, message: &str) -> String {
        let limit = usize::from(self.config.width.saturating_sub(1));
        let mut out = String::with_capacity(self.blank_line.len() + message.len() + 2);
        out.push('\r');
        out.push_str(&self.blank_line);
        out.push('\r');
        out.push_str(&truncate_visible(message, limit));
        out
    }
}

/// Truncate to `limit` visible characters, copying escape sequences through
/// uncounted. Escapes after the cutoff are kept so trailing resets survive.
fn truncate_visible(message: &str, limit: usize) -> String {
    let mut out = String::with_capacity(message.len());
    let mut visible = 0;
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            for esc in chars.by_ref() {
                out.push(esc);
                if esc == 'm' {
                    break;
                }
            }
            continue;
        }
        if visible < limit {
            out.push(c);
            visible += 1;
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
