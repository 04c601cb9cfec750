// RestoreConfig - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.

use crate::util::constants::MAX_LOG_LINES;
use crate::util::error::RestoreError;
use std::collections::VecDeque;

// =============================================================================
// Restore button state
// =============================================================================

/// State of the Restore button.
///
/// `Running` means an attempt is in flight and the button is disabled.
/// There is no terminal state; the panel is disposed externally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreState {
    #[default]
    Idle,
    Running,
}

impl RestoreState {
    /// Whether the Restore button accepts activation in this state.
    pub fn restore_enabled(self) -> bool {
        matches!(self, Self::Idle)
    }
}

// =============================================================================
// Buttons and keys
// =============================================================================

/// One of the two action buttons in the panel's button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    Restore,
    Close,
}

/// Visual order of the action buttons, leading to trailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOrder {
    RestoreThenClose,
    CloseThenRestore,
}

impl ButtonOrder {
    /// Buttons in leading-to-trailing order.
    pub fn buttons(self) -> [PanelButton; 2] {
        match self {
            Self::RestoreThenClose => [PanelButton::Restore, PanelButton::Close],
            Self::CloseThenRestore => [PanelButton::Close, PanelButton::Restore],
        }
    }
}

/// Keys the panel reacts to. Everything that is not Escape is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    Escape,
    Other,
}

// =============================================================================
// Diagnostic severity
// =============================================================================

/// Severity attached to diagnostic entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
}

// =============================================================================
// Worker -> UI messages
// =============================================================================

/// Messages sent from the restoration worker thread to the UI thread.
///
/// Exactly one of `Completed`, `Failed`, or `Cancelled` ends an attempt.
#[derive(Debug)]
pub enum RestoreProgress {
    /// One human-readable status line produced by the routine.
    Line(String),
    /// The routine returned successfully.
    Completed,
    /// The routine signalled a failure.
    Failed(RestoreError),
    /// The routine stopped early because cancellation was requested.
    Cancelled,
}

impl RestoreProgress {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Line(_))
    }
}

// =============================================================================
// Log buffer
// =============================================================================

/// Ordered, append-only list of status lines shown in the log area.
///
/// Capacity is bounded; once full, the oldest line is dropped for each new
/// one and `dropped()` counts how many were lost. The joined text is kept
/// up to date on every push so the UI can show it each frame without
/// rebuilding it.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    dropped: usize,
    /// `lines` joined with `\n`, starting at byte `text_start`.
    text: String,
    text_start: usize,
}

/// Dropped prefix size at which the joined text is compacted.
const TEXT_COMPACT_THRESHOLD: usize = 64 * 1024;

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_LINES)
    }

    /// Create a buffer holding at most `capacity` lines (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
            dropped: 0,
            text: String::new(),
            text_start: 0,
        }
    }

    /// Append one line. Embedded newlines are kept as-is.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();

        if self.lines.len() == self.capacity {
            if let Some(oldest) = self.lines.pop_front() {
                self.dropped += 1;
                if self.lines.is_empty() {
                    self.text.clear();
                    self.text_start = 0;
                } else {
                    // Skip the oldest line and the separator after it.
                    self.text_start += oldest.len() + 1;
                }
            }
        }

        if !self.lines.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(&line);
        self.lines.push_back(line);

        if self.text_start >= TEXT_COMPACT_THRESHOLD && self.text_start * 2 > self.text.len() {
            self.text.drain(..self.text_start);
            self.text_start = 0;
        }
    }

    /// Remove every line and reset the dropped counter.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.dropped = 0;
        self.text.clear();
        self.text_start = 0;
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines discarded because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Snapshot of the current lines.
    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    /// All lines joined with `\n`, as shown in the text area.
    pub fn text(&self) -> &str {
        &self.text[self.text_start..]
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_order_lists_leading_first() {
        assert_eq!(
            ButtonOrder::RestoreThenClose.buttons(),
            [PanelButton::Restore, PanelButton::Close]
        );
        assert_eq!(
            ButtonOrder::CloseThenRestore.buttons(),
            [PanelButton::Close, PanelButton::Restore]
        );
    }

    #[test]
    fn only_idle_enables_restore() {
        assert!(RestoreState::Idle.restore_enabled());
        assert!(!RestoreState::Running.restore_enabled());
        assert_eq!(RestoreState::default(), RestoreState::Idle);
    }

    #[test]
    fn log_buffer_keeps_order_and_clears() {
        let mut buf = LogBuffer::new();
        buf.push("first");
        buf.push(String::from("second"));
        assert_eq!(buf.to_vec(), vec!["first", "second"]);
        assert_eq!(buf.text(), "first\nsecond");

        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn log_buffer_drops_oldest_when_full() {
        let mut buf = LogBuffer::with_capacity(2);
        buf.push("a");
        buf.push("b");
        buf.push("c");
        assert_eq!(buf.to_vec(), vec!["b", "c"]);
        assert_eq!(buf.dropped(), 1);

        buf.clear();
        assert_eq!(buf.dropped(), 0);
    }

    #[test]
    fn log_buffer_text_tracks_dropped_lines() {
        let mut buf = LogBuffer::with_capacity(3);
        for i in 0..5 {
            buf.push(format!("line{i}"));
        }
        assert_eq!(buf.text(), "line2\nline3\nline4");
        assert_eq!(buf.dropped(), 2);

        let mut single = LogBuffer::with_capacity(1);
        single.push("a");
        single.push("b");
        assert_eq!(single.text(), "b");
    }

    #[test]
    fn log_buffer_text_survives_compaction() {
        let mut buf = LogBuffer::with_capacity(10);
        let long = "x".repeat(1024);
        for i in 0..500 {
            buf.push(format!("{i}:{long}"));
        }
        let expected = buf.to_vec().join("\n");
        assert_eq!(buf.text(), expected);
        assert!(buf.text().starts_with("490:"));
        assert_eq!(buf.dropped(), 490);
    }

    #[test]
    fn only_line_is_non_terminal() {
        assert!(!RestoreProgress::Line("x".into()).is_terminal());
        assert!(RestoreProgress::Completed.is_terminal());
        assert!(RestoreProgress::Cancelled.is_terminal());
    }
}
