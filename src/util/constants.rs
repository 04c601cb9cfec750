// RestoreConfig - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "RestoreConfig";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "RestoreConfig";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Restoration worker limits
// =============================================================================

/// Maximum number of lines kept in the visible log area.
///
/// A misbehaving restoration routine that streams output forever must not
/// grow the buffer without bound. The oldest lines are dropped first.
pub const MAX_LOG_LINES: usize = 10_000;

/// Maximum number of progress messages drained by the UI per frame.
/// Remaining messages are picked up on the following frames.
pub const MAX_PROGRESS_MESSAGES_PER_FRAME: usize = 500;

/// Repaint cadence while a restoration is running (ms).
pub const RUNNING_REPAINT_INTERVAL_MS: u64 = 50;

/// How often the command restorer checks the cancel flag while waiting
/// for the child process to exit (ms).
pub const COMMAND_CANCEL_CHECK_INTERVAL_MS: u64 = 100;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Initial window size (logical points).
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [600.0, 420.0];

/// Minimum window size (logical points).
pub const MIN_WINDOW_SIZE: [f32; 2] = [420.0, 300.0];

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// tracing target used for diagnostic entries recorded by the panel.
pub const DIAGNOSTICS_TARGET: &str = "restoreconfig::diagnostics";

/// Least verbose level the diagnostics target is ever filtered to, so
/// restoration failures and warnings stay visible under `level = "error"`.
pub const DIAGNOSTICS_MIN_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Optional message-table override file name (stored next to config.toml).
pub const MESSAGES_FILE_NAME: &str = "messages.toml";

/// Maximum size of a config or message file in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB
