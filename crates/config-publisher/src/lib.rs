//! Configuration Telemetry Module
//!
//! Publishes the monitor's static configuration snapshot to an MQTT topic on
//! a fixed cadence, so dashboards can always see what a running monitor is
//! configured to do. A last-will message tells subscribers when the monitor
//! went away instead of cleanly shutting down.

use rumqttc::{AsyncClient, Event, LastWill, MqttOptions, Packet, QoS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Payload subscribers receive when the connection dies uncleanly
const PUBLISHER_DOWN_PAYLOAD: &str = r#"{"status":"publisher_down"}"#;

/// Configuration telemetry error types
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Publish failed: {0}")]
    Publish(String),
}

/// Where and how the configuration snapshot is published
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// MQTT broker hostname
    pub broker_host: String,
    /// MQTT broker port
    #[serde(default = "default_port")]
    pub broker_port: u16,
    /// Topic the snapshot is published to
    pub topic: String,
    /// Client id; a random one is generated when omitted
    #[serde(default)]
    pub client_id: Option<String>,
}

fn default_port() -> u16 {
    1883
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: default_port(),
            topic: "meterwatch/config".to_string(),
            client_id: None,
        }
    }
}

/// Configuration snapshot publisher
pub struct ConfigPublisher {
    client: AsyncClient,
    topic: String,
}

impl ConfigPublisher {
    /// Start the MQTT connection and hand back the publisher.
    ///
    /// The broker learns a last-will on connect: if the monitor drops off
    /// without disconnecting, subscribers see [`PUBLISHER_DOWN_PAYLOAD`] on
    /// the telemetry topic.
    pub async fn connect(settings: &TelemetrySettings) -> Self {
        let client_id = settings
            .client_id
            .clone()
            .unwrap_or_else(|| format!("meter-monitor-{}", Uuid::new_v4().simple()));

        let mut options = MqttOptions::new(client_id, &settings.broker_host, settings.broker_port);
        options.set_keep_alive(Duration::from_secs(60));
        options.set_last_will(LastWill::new(
            &settings.topic,
            PUBLISHER_DOWN_PAYLOAD,
            QoS::AtMostOnce,
            false,
        ));

        let (client, mut eventloop) = AsyncClient::new(options, 10);

        // Spawn event loop handler
        tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        info!("Connected to MQTT broker");
                    }
                    Ok(Event::Incoming(incoming)) => {
                        debug!("MQTT incoming: {:?}", incoming);
                    }
                    Err(e) => {
                        error!("MQTT error: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    _ => {}
                }
            }
        });

        info!(
            "Configuration telemetry targeting {}:{} topic {}",
            settings.broker_host, settings.broker_port, settings.topic
        );

        Self {
            client,
            topic: settings.topic.clone(),
        }
    }

    /// Publish one pre-rendered payload to the telemetry topic
    pub async fn publish(&self, payload: &str) -> Result<(), TelemetryError> {
        self.client
            .publish(&self.topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .await
            .map_err(|e| TelemetryError::Publish(e.to_string()))
    }

    /// Render the snapshot once, then publish it every `interval` forever.
    ///
    /// The snapshot is static for the life of the monitor, so failures are
    /// logged and retried on the next tick rather than bubbled up.
    pub async fn run(self, snapshot: serde_json::Value, interval: Duration) {
        let payload = match serde_json::to_string_pretty(&snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Configuration snapshot cannot be rendered: {}", e);
                return;
            }
        };

        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match self.publish(&payload).await {
                Ok(()) => debug!("Published configuration to {}", self.topic),
                Err(e) => error!("Configuration publish failed: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = TelemetrySettings::default();
        assert_eq!(settings.broker_port, 1883);
        assert_eq!(settings.topic, "meterwatch/config");
        assert!(settings.client_id.is_none());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: TelemetrySettings = serde_json::from_str(
            r#"{"broker_host": "broker.local", "topic": "meters/config"}"#,
        )
        .unwrap();
        assert_eq!(settings.broker_host, "broker.local");
        assert_eq!(settings.broker_port, 1883);
        assert!(settings.client_id.is_none());
    }

    #[test]
    fn test_down_payload_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(PUBLISHER_DOWN_PAYLOAD).unwrap();
        assert_eq!(value["status"], "publisher_down");
    }
}
