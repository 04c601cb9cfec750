// RestoreConfig - core/messages.rs
//
// User-facing text lookup, keyed by opaque message ids. English defaults
// are compiled in; `messages.toml` (see platform::config) may override any
// key. A missing key renders as the key itself so a gap in a translation
// is visible rather than silent.

use serde::Deserialize;
use std::collections::HashMap;

/// Introductory text above the log area.
pub const RESTORE_INTRO: &str = "restore.intro";
/// Caption of the Restore button.
pub const RESTORE_BUTTON: &str = "restore.button";
/// Accessible description of the Restore button.
pub const RESTORE_BUTTON_DESCRIPTION: &str = "restore.button.description";
/// Caption of the Close button.
pub const CLOSE_BUTTON: &str = "close.button";
/// Accessible description of the Close button.
pub const CLOSE_BUTTON_DESCRIPTION: &str = "close.button.description";
/// Title of the hosting window.
pub const WINDOW_TITLE: &str = "window.title";
/// Header above the log area once old lines were discarded. `{count}` is
/// replaced with the number of discarded lines.
pub const LOG_LINES_OMITTED: &str = "restore.log.omitted";

const DEFAULTS: &[(&str, &str)] = &[
    (
        RESTORE_INTRO,
        "Restores the browser and certificate store configuration \
         required by the signing application.",
    ),
    (RESTORE_BUTTON, "Restore"),
    (
        RESTORE_BUTTON_DESCRIPTION,
        "Start restoring the signing application configuration",
    ),
    (CLOSE_BUTTON, "Close"),
    (CLOSE_BUTTON_DESCRIPTION, "Close this window"),
    (WINDOW_TITLE, "Restore configuration"),
    (LOG_LINES_OMITTED, "{count} earlier lines omitted"),
];

/// On-disk shape of `messages.toml`.
///
/// ```toml
/// [messages]
/// "restore.button" = "Restaurar"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MessageOverrides {
    pub messages: HashMap<String, String>,
}

/// Message table used for every user-visible string.
#[derive(Debug, Clone)]
pub struct Messages {
    table: HashMap<String, String>,
}

impl Messages {
    /// Table holding only the built-in English strings.
    pub fn builtin() -> Self {
        Self {
            table: DEFAULTS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Replace built-in strings with `overrides`. Unknown keys are kept so a
    /// newer translation file still works with an older binary.
    pub fn with_overrides(mut self, overrides: MessageOverrides) -> Self {
        for (key, value) in overrides.messages {
            if !DEFAULTS.iter().any(|(k, _)| *k == key) {
                tracing::debug!(key = %key, "Message override for unknown key");
            }
            self.table.insert(key, value);
        }
        self
    }

    /// Look up `key`; falls back to the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        match self.table.get(key) {
            Some(text) => text.as_str(),
            None => {
                tracing::debug!(key, "Missing message key");
                key
            }
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::builtin()
    }
}
