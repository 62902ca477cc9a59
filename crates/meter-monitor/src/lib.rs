//! Meter Monitoring Host
//!
//! Wires the stability engine into a running system: raw readings arrive on
//! a channel from an external capture stage, each configured meter gets its
//! own stability filter, accepted readings land in a CSV log, and the static
//! configuration is optionally republished over MQTT.

mod monitor;
mod settings;
mod sink;

pub use monitor::MeterMonitor;
pub use settings::{MeterSpec, MonitorSettings, SettingsError};
pub use sink::{AcceptedLog, SinkError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// One raw text capture from a meter region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReading {
    /// Name of the meter the text was read from
    pub meter: String,
    /// Raw OCR output, possibly empty or garbled
    pub text: String,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

impl RawReading {
    /// Stamp a reading with the current time
    pub fn now(meter: &str, text: &str) -> Self {
        Self {
            meter: meter.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
