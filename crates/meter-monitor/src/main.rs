//! Meter Monitor - Main Entry Point

use anyhow::Context;
use config_publisher::ConfigPublisher;
use meter_monitor::{init_logging, AcceptedLog, MeterMonitor, MonitorSettings, RawReading};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Meter Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yaml"));

    let settings = MonitorSettings::load(&path)
        .with_context(|| format!("loading settings from {}", path.display()))?;
    info!("settings loaded from {}", path.display());

    let monitor = MeterMonitor::new(&settings)?;
    let log = AcceptedLog::open(&settings.log_path)
        .with_context(|| format!("opening log at {}", settings.log_path.display()))?;

    if let Some(telemetry) = &settings.telemetry {
        let publisher = ConfigPublisher::connect(telemetry).await;
        let snapshot =
            serde_json::to_value(&settings).context("rendering configuration snapshot")?;
        let interval = Duration::from_secs(settings.poll_interval_secs);
        tokio::spawn(publisher.run(snapshot, interval));
    }

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(read_stdin_readings(tx));

    info!("monitoring started, reading meter lines from stdin");
    monitor.run(rx, log).await?;

    Ok(())
}

/// Feed `meter<TAB>raw text` lines from stdin into the monitor.
///
/// Stands in for the capture pipeline that screenshots and OCRs the display;
/// EOF closes the channel and shuts the monitor down cleanly.
async fn read_stdin_readings(tx: mpsc::Sender<RawReading>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let (meter, text) = match line.split_once('\t') {
                    Some(pair) => pair,
                    None => {
                        warn!("ignoring malformed reading line {:?}", line);
                        continue;
                    }
                };
                if tx.send(RawReading::now(meter, text)).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("stdin read error: {}", e);
                break;
            }
        }
    }
}
