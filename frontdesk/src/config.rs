//! Configuration loading for the frontdesk library.
//!
//! Settings come from three layers, each overriding the one before:
//! built-in defaults, an optional `config.yaml` in the data directory, and
//! environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "FRONTDESK_DATA_DIR";

/// Environment variable that overrides the no-show grace period (hours).
pub const NO_SHOW_GRACE_ENV: &str = "FRONTDESK_NO_SHOW_GRACE_HOURS";

const fn default_busy_timeout() -> u64 {
    30
}

const fn default_no_show_grace_hours() -> u64 {
    24
}

/// Settings for the scheduled sweeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Hours past the scheduled check-in before a Pending reservation is
    /// treated as a no-show.
    #[serde(default = "default_no_show_grace_hours")]
    pub no_show_grace_hours: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            no_show_grace_hours: default_no_show_grace_hours(),
        }
    }
}

/// Complete configuration for the frontdesk tools.
///
/// # Examples
///
/// ```no_run
/// use frontdesk::Config;
///
/// let config = Config::load(None).unwrap();
/// println!("database at {}", config.database_path().display());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database and configuration file.
    #[serde(skip)]
    pub data_dir: PathBuf,

    /// Maximum time to wait for the database lock (seconds).
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_seconds: u64,

    /// Sweep settings.
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            busy_timeout_seconds: default_busy_timeout(),
            sweep: SweepConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration for the given data directory.
    ///
    /// When `data_dir` is `None` the directory is taken from the
    /// `FRONTDESK_DATA_DIR` environment variable, falling back to
    /// `~/.frontdesk`. If `{data_dir}/config.yaml` exists it is parsed;
    /// environment variables are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, if the
    /// configuration file exists but cannot be read or parsed, or if an
    /// environment override does not parse.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };

        let mut config = Self::from_file(&data_dir.join("config.yaml"))?;
        config.data_dir = data_dir;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Returns the default data directory.
    ///
    /// Honors `FRONTDESK_DATA_DIR`, falling back to `~/.frontdesk`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_data_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }
        home::home_dir()
            .map(|h| h.join(".frontdesk"))
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine home directory",
                ))
            })
    }

    /// Returns the path of the reservation database inside the data directory.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("frontdesk.db")
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = env::var(NO_SHOW_GRACE_ENV) {
            let hours: u64 = value.trim().parse().map_err(|_| Error::Validation {
                field: NO_SHOW_GRACE_ENV.into(),
                message: format!("'{value}' is not a valid number of hours"),
            })?;
            self.sweep.no_show_grace_hours = hours;
        }
        Ok(())
    }
}
