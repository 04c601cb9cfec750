// RestoreConfig - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation between layers; every error keeps its
// causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all RestoreConfig operations.
#[derive(Debug)]
pub enum RestoreConfigError {
    /// The restoration routine failed.
    Restore(RestoreError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for RestoreConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Restore(e) => write!(f, "Restoration error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for RestoreConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Restore(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Restoration errors
// ---------------------------------------------------------------------------

/// Failures signalled by a restoration routine.
///
/// These are never produced by the panel itself; the panel only catches
/// them and records a diagnostic entry.
#[derive(Debug)]
pub enum RestoreError {
    /// A certificate, key store, or permission check failed.
    Security {
        reason: String,
        source: Option<io::Error>,
    },

    /// The restoration could not run because of a configuration problem
    /// (missing routine, bad arguments, non-zero exit status).
    Configuration { reason: String },

    /// I/O failure while performing a restoration step.
    Io {
        operation: &'static str,
        source: io::Error,
    },
}

impl RestoreError {
    /// Short category name used in diagnostic entries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Security { .. } => "security",
            Self::Configuration { .. } => "configuration",
            Self::Io { .. } => "io",
        }
    }
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Security {
                reason,
                source: Some(source),
            } => write!(f, "Security failure: {reason}: {source}"),
            Self::Security {
                reason,
                source: None,
            } => write!(f, "Security failure: {reason}"),
            Self::Configuration { reason } => write!(f, "Configuration failure: {reason}"),
            Self::Io { operation, source } => {
                write!(f, "I/O failure during {operation}: {source}")
            }
        }
    }
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Security { source, .. } => {
                source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
            }
            Self::Io { source, .. } => Some(source),
            Self::Configuration { .. } => None,
        }
    }
}

impl From<RestoreError> for RestoreConfigError {
    fn from(e: RestoreError) -> Self {
        Self::Restore(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration and message-table loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// File exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading a config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for RestoreConfigError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for RestoreConfig results.
pub type Result<T> = std::result::Result<T, RestoreConfigError>;
