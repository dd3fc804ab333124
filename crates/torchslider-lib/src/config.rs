//! Application configuration: TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::camera::Facing;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# torchslider configuration, changes made outside the app may be overwritten.\n\n";

/// Default blink period, matching the stock handler.
pub const DEFAULT_BLINK_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Blink period in milliseconds. Default: 250.
    #[serde(default = "default_blink_interval_ms")]
    pub blink_interval_ms: u64,

    /// Preferred light source facing: "back", "front" or "external".
    /// Default: "back".
    #[serde(default = "default_facing")]
    pub facing: String,

    /// Explicit light source id. Empty = auto-select by facing.
    #[serde(default)]
    pub light_source: String,
}

fn default_blink_interval_ms() -> u64 {
    DEFAULT_BLINK_INTERVAL_MS
}

fn default_facing() -> String {
    "back".into()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            blink_interval_ms: default_blink_interval_ms(),
            facing: default_facing(),
            light_source: String::new(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `facing` field is not one of the known facings.
    InvalidFacing(String),
    /// The `blink_interval_ms` field is zero.
    ZeroBlinkInterval,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidFacing(v) => {
                write!(f, "Invalid facing: {v} (expected back, front or external)")
            }
            ValidationError::ZeroBlinkInterval => {
                write!(f, "blink_interval_ms must be greater than zero")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("torchslider"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Load config from an arbitrary path, returning the config and any
    /// parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any
    /// parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Save config to an arbitrary path atomically (write to temp file,
    /// then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct
                // write + cleanup.
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Save config to the default platform path.
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config directory",
            ));
        };
        self.save_to(&path)
    }

    /// The blink period as a `Duration`.
    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    /// Parse the `facing` field. Unparseable values fall back to `Back`
    /// (the stock handler's behavior); `validate` reports them.
    pub fn preferred_facing(&self) -> Facing {
        Facing::parse(&self.facing).unwrap_or(Facing::Back)
    }

    /// Validate the config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if Facing::parse(&self.facing).is_none() {
            errors.push(ValidationError::InvalidFacing(self.facing.clone()));
        }

        if self.blink_interval_ms == 0 {
            errors.push(ValidationError::ZeroBlinkInterval);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
