//! Settings store for query preferences.
//!
//! Persists `min_magnitude` and `order_by` in a YAML file under the
//! platform config directory. Both are opaque strings passed through to
//! URL construction; nothing here validates them.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::QuakewatchError;

/// Default minimum magnitude sent to the feed.
pub const DEFAULT_MIN_MAGNITUDE: &str = "6.5";

/// Default result ordering sent to the feed.
pub const DEFAULT_ORDER_BY: &str = "time";

/// File name of the settings file inside the app config directory.
const SETTINGS_FILE: &str = "config.yaml";

/// App directory name under the platform config directory.
const APP_DIR: &str = "quakewatch";

/// User-adjustable query preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Minimum magnitude, as sent in the `minmag` query parameter
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: String,

    /// Result ordering, as sent in the `orderby` query parameter
    #[serde(default = "default_order_by")]
    pub order_by: String,
}

fn default_min_magnitude() -> String {
    DEFAULT_MIN_MAGNITUDE.to_string()
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_magnitude: default_min_magnitude(),
            order_by: default_order_by(),
        }
    }
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file (or no resolvable config directory) yields the
    /// defaults; a file that exists but fails to parse is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not
    /// valid YAML.
    pub fn load() -> Result<Self, QuakewatchError> {
        match settings_path() {
            Some(path) if path.exists() => {
                debug!("loading settings from {}", path.display());
                let content = fs::read_to_string(&path)?;
                Ok(serde_yaml::from_str(&content)?)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Write settings to the default location, creating directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory can be resolved or the
    /// file cannot be written.
    pub fn save(&self) -> Result<(), QuakewatchError> {
        let Some(path) = settings_path() else {
            return Err(QuakewatchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory available",
            )));
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(&path, content)?;
        debug!("saved settings to {}", path.display());
        Ok(())
    }
}

/// Resolve the settings file path, e.g. `~/.config/quakewatch/config.yaml`.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.min_magnitude, "6.5");
        assert_eq!(settings.order_by, "time");
    }

    #[test]
    fn test_yaml_round_trip() {
        let settings = Settings {
            min_magnitude: "4".to_string(),
            order_by: "magnitude".to_string(),
        };

        let yaml = serde_yaml::to_string(&settings).expect("serialize");
        let back: Settings = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(back.min_magnitude, "4");
        assert_eq!(back.order_by, "magnitude");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let back: Settings = serde_yaml::from_str("min_magnitude: \"2.5\"\n").expect("deserialize");
        assert_eq!(back.min_magnitude, "2.5");
        assert_eq!(back.order_by, DEFAULT_ORDER_BY);
    }
}
