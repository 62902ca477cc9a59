//! Settings loading and startup validation

use config_publisher::TelemetrySettings;
use numeric_format::NumericFormatConfig;
use serde::{Deserialize, Serialize};
use stability_filter::StabilityConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One monitored meter region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterSpec {
    /// Unique meter name, used for routing and log rows
    pub name: String,
    /// Require the full display grammar before a reading is parsed
    #[serde(default)]
    pub strict_format: bool,
    /// Skip captures shorter than this many characters (0 disables the
    /// check); weeds out partial captures before the engine sees them
    #[serde(default)]
    pub min_raw_length: usize,
    /// Stability bounds for this meter; global bounds apply when omitted
    #[serde(default)]
    pub stability: Option<StabilityConfig>,
}

/// Full monitor configuration, loaded once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Seconds between capture ticks, also the telemetry cadence
    #[serde(default = "default_interval")]
    pub poll_interval_secs: u64,
    /// Path of the accepted-readings CSV log
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Display locale shared by every meter
    pub format: NumericFormatConfig,
    /// Global stability bounds
    pub stability: StabilityConfig,
    /// Monitored meters
    pub meters: Vec<MeterSpec>,
    /// MQTT configuration telemetry, off when omitted
    #[serde(default)]
    pub telemetry: Option<TelemetrySettings>,
}

fn default_interval() -> u64 {
    5
}

fn default_log_path() -> PathBuf {
    PathBuf::from("ocr_log.csv")
}

/// Configuration problems that must stop startup
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("numeric format: {0}")]
    Format(#[from] numeric_format::ConfigError),

    #[error("stability bounds for {meter}: {source}")]
    Stability {
        meter: String,
        #[source]
        source: stability_filter::ConfigError,
    },

    #[error("no meters configured")]
    NoMeters,

    #[error("duplicate meter name {0:?}")]
    DuplicateMeter(String),

    #[error("poll_interval_secs must be at least 1")]
    ZeroInterval,
}

impl MonitorSettings {
    /// Load settings from a YAML file and validate every section.
    ///
    /// Fails fast: a monitor with a contradictory configuration must not
    /// process a single reading.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings: Self = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the locale, the global bounds, and every meter entry
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.poll_interval_secs == 0 {
            return Err(SettingsError::ZeroInterval);
        }
        self.format.validate()?;
        self.stability
            .validate()
            .map_err(|source| SettingsError::Stability {
                meter: "global".to_string(),
                source,
            })?;

        if self.meters.is_empty() {
            return Err(SettingsError::NoMeters);
        }
        let mut seen = HashSet::new();
        for meter in &self.meters {
            if !seen.insert(meter.name.as_str()) {
                return Err(SettingsError::DuplicateMeter(meter.name.clone()));
            }
            if let Some(stability) = &meter.stability {
                stability
                    .validate()
                    .map_err(|source| SettingsError::Stability {
                        meter: meter.name.clone(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    /// Stability bounds effective for one meter, override or global
    pub fn stability_for(&self, meter: &MeterSpec) -> StabilityConfig {
        meter
            .stability
            .clone()
            .unwrap_or_else(|| self.stability.clone())
    }
}
