//! Layered settings: built-in defaults, an optional TOML file, then
//! `VITALS_LOG_*` environment variables.
//!
//! ```toml
//! data_dir = "/home/me/health"
//! table_limit = 20
//! utc_offset_minutes = 180
//!
//! [zones.red]
//! systolic = 165
//! diastolic = 105
//! pulse = 125
//! ```
//!
//! A `[zones]` override must spell out all three bounds of every tier it
//! names; tiers left out keep their defaults.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::Deserialize;
use vitals_types::{ZoneBounds, ZoneThresholds};

use crate::storage::DEFAULT_KEY;

/// Directory name used under the platform config and data dirs.
pub const APP_DIR: &str = "vitals-log";

/// Prefix of environment overrides, e.g. `VITALS_LOG_TABLE_LIMIT=20`.
/// Nested keys use a double underscore: `VITALS_LOG_ZONES__RED__PULSE`.
pub const ENV_PREFIX: &str = "VITALS_LOG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the file storage keeps `<storage_key>.json`.
    pub data_dir: PathBuf,
    pub storage_key: String,
    /// Rows shown by `list` and the dashboard table.
    pub table_limit: usize,
    /// Days of history drawn by the trend charts.
    pub chart_days: u32,
    /// Fixed offset for new timestamps; local time when unset.
    pub utc_offset_minutes: Option<i32>,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub zones: ZoneSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: DEFAULT_KEY.to_string(),
            table_limit: 10,
            chart_days: 10,
            utc_offset_minutes: None,
            log_level: "warn".to_string(),
            log_file: None,
            zones: ZoneSettings::default(),
        }
    }
}

/// Per-tier threshold overrides.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    pub yellow: ZoneBounds,
    pub orange: ZoneBounds,
    pub red: ZoneBounds,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        let standard = ZoneThresholds::STANDARD;
        Self {
            yellow: standard.yellow,
            orange: standard.orange,
            red: standard.red,
        }
    }
}

impl ZoneSettings {
    fn thresholds(&self) -> ZoneThresholds {
        ZoneThresholds {
            yellow: self.yellow,
            orange: self.orange,
            red: self.red,
        }
    }
}

impl Settings {
    /// Load settings from `path` (required when given) or the default
    /// config file (if it exists), plus the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), with an explicit environment map in place
    /// of the process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => Some(File::from(p).format(FileFormat::Toml).required(true)),
            None => default_config_file()
                .map(|p| File::from(p).format(FileFormat::Toml).required(false)),
        };

        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.utc_offset()?;

        let z = &self.zones;
        let ordered = |f: fn(&ZoneBounds) -> u16| {
            f(&z.yellow) <= f(&z.orange) && f(&z.orange) <= f(&z.red)
        };
        if !(ordered(|b| b.systolic) && ordered(|b| b.diastolic) && ordered(|b| b.pulse)) {
            return Err(ConfigError::Message(
                "zone bounds must not decrease from yellow to orange to red".to_string(),
            ));
        }

        if self.table_limit == 0 {
            return Err(ConfigError::Message("table_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Zone thresholds for new entries.
    pub fn thresholds(&self) -> ZoneThresholds {
        self.zones.thresholds()
    }

    /// The configured fixed offset, if any.
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        self.utc_offset_minutes
            .map(|minutes| {
                minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| {
                        ConfigError::Message(format!(
                            "utc_offset_minutes out of range: {}",
                            minutes
                        ))
                    })
            })
            .transpose()
    }

    /// Full path of the storage file for the configured key.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}

/// `<data dir>/vitals-log`, or `./vitals-log` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// `<config dir>/vitals-log/config.toml`.
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}
