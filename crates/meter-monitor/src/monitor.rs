//! Per-meter filter bank and run loop

use crate::settings::{MonitorSettings, SettingsError};
use crate::sink::{AcceptedLog, SinkError};
use crate::RawReading;
use stability_filter::{Decision, StabilityFilter};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Filter and intake policy for one meter
struct MeterSlot {
    filter: StabilityFilter,
    min_raw_length: usize,
}

/// Routes raw readings to per-meter stability filters.
///
/// Every meter owns an independent filter, so one meter's state can never
/// leak into another's decisions.
pub struct MeterMonitor {
    slots: HashMap<String, MeterSlot>,
}

impl MeterMonitor {
    /// Build the filter bank from settings.
    ///
    /// Validation reruns here so a monitor cannot be constructed from a
    /// contradictory configuration, however the settings were obtained.
    pub fn new(settings: &MonitorSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut slots = HashMap::new();
        for meter in &settings.meters {
            let stability = settings.stability_for(meter);
            let filter =
                StabilityFilter::new(settings.format.clone(), stability, meter.strict_format);
            slots.insert(
                meter.name.clone(),
                MeterSlot {
                    filter,
                    min_raw_length: meter.min_raw_length,
                },
            );
        }

        info!("monitoring {} meter(s)", slots.len());
        Ok(Self { slots })
    }

    /// Evaluate one reading against its meter's filter.
    ///
    /// `None` means the reading never reached the engine: the meter is not
    /// configured, or the capture is shorter than the meter's minimum
    /// length.
    pub fn process(&mut self, reading: &RawReading) -> Option<Decision> {
        let slot = match self.slots.get_mut(&reading.meter) {
            Some(slot) => slot,
            None => {
                warn!("reading for unknown meter {:?} dropped", reading.meter);
                return None;
            }
        };

        if reading.text.trim().chars().count() < slot.min_raw_length {
            debug!(
                "{}: capture {:?} shorter than {} chars, skipped",
                reading.meter, reading.text, slot.min_raw_length
            );
            return None;
        }

        Some(slot.filter.evaluate(&reading.text))
    }

    /// Receive readings until the channel closes.
    ///
    /// Each reading is fully evaluated and recorded before the next is taken
    /// off the channel, so every filter state always reflects a whole number
    /// of readings. Accepted readings go to `log`; rejections are already
    /// reported by the filters.
    pub async fn run(
        mut self,
        mut readings: mpsc::Receiver<RawReading>,
        mut log: AcceptedLog,
    ) -> Result<(), SinkError> {
        while let Some(reading) = readings.recv().await {
            let decision = match self.process(&reading) {
                Some(decision) => decision,
                None => continue,
            };

            match &decision {
                Decision::Accepted { value, raw } => {
                    info!("{}: accepted {:?} as {}", reading.meter, raw, value);
                    log.append(&reading, *value)?;
                }
                other => {
                    debug!("{}: {:?}", reading.meter, other);
                }
            }
        }

        info!("reading channel closed, monitor stopping");
        Ok(())
    }
}
