// RestoreConfig - platform/config.rs
//
// Platform-specific configuration directory resolution plus config.toml and
// messages.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance. Every problem found while loading is turned
// into a human-readable warning and the affected value falls back to its
// default; the application always starts.

use crate::core::messages::{MessageOverrides, Messages};
use crate::util::constants;
use crate::util::error::{self, ConfigError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for RestoreConfig configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/restoreconfig/ or %APPDATA%\RestoreConfig\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[restore]` section.
    pub restore: RestoreSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[restore]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RestoreSection {
    /// Program that performs the restoration.
    pub command: Option<String>,
    /// Arguments passed to `command`.
    pub args: Option<Vec<String>>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Restoration program; `None` means no routine is configured.
    pub restore_command: Option<PathBuf>,
    /// Arguments for `restore_command`.
    pub restore_args: Vec<String>,
    /// Body font size in points.
    pub font_size: f32,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            restore_command: None,
            restore_args: Vec::new(),
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Read a small text file.
///
/// `Ok(None)` when the file does not exist (first run). Files above
/// `MAX_CONFIG_FILE_SIZE` are rejected without being read.
fn read_bounded(path: &Path) -> Result<Option<String>, ConfigError> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if meta.len() > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }

    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Read and deserialise a TOML file, `Ok(None)` if it does not exist.
fn parse_toml_file<T: serde::de::DeserializeOwned>(path: &Path) -> error::Result<Option<T>> {
    let Some(content) = read_bounded(path)? else {
        return Ok(None);
    };
    let parsed = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match parse_toml_file(&config_path) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
            return (AppConfig::default(), warnings);
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();

    // -- Restore: command / args --
    match raw.restore.command {
        Some(ref cmd) if cmd.trim().is_empty() => {
            warnings.push(out_of_range("restore.command", "", "a program path or name"));
        }
        Some(ref cmd) => config.restore_command = Some(PathBuf::from(cmd.trim())),
        None => {}
    }
    if let Some(args) = raw.restore.args {
        if config.restore_command.is_some() {
            config.restore_args = args;
        } else if !args.is_empty() {
            warnings.push(
                "[restore] args is set but [restore] command is not; args ignored.".to_string(),
            );
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(out_of_range(
                "ui.font_size",
                &size.to_string(),
                &format!(
                    "{}-{} (default {})",
                    constants::MIN_FONT_SIZE,
                    constants::MAX_FONT_SIZE,
                    constants::DEFAULT_FONT_SIZE
                ),
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(out_of_range(
                "logging.level",
                level,
                &constants::VALID_LOG_LEVELS.join(", "),
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

fn out_of_range(field: &str, value: &str, expected: &str) -> String {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
    .to_string()
}

// =============================================================================
// messages.toml
// =============================================================================

/// Build the message table: built-in strings plus any `messages.toml`
/// overrides found in `config_dir`.
pub fn load_messages(config_dir: &Path) -> (Messages, Vec<String>) {
    let path = config_dir.join(constants::MESSAGES_FILE_NAME);
    match parse_toml_file::<MessageOverrides>(&path) {
        Ok(Some(overrides)) => {
            tracing::info!(
                path = %path.display(),
                count = overrides.messages.len(),
                "Loaded message overrides"
            );
            (Messages::builtin().with_overrides(overrides), Vec::new())
        }
        Ok(None) => (Messages::builtin(), Vec::new()),
        Err(e) => {
            let msg = format!("{e}. Using built-in messages.");
            tracing::warn!("{}", msg);
            (Messages::builtin(), vec![msg])
        }
    }
}
