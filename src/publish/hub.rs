//! Home Assistant publishing over the REST states API.
//!
//! Each reading fans out into six state updates, one per sensor entity.
//! Building the update payloads is pure ([`channel_updates`]) so the channel
//! mapping can be tested without a hub; the HTTP side is a single
//! bearer-authenticated POST per entity. A failed channel is logged and
//! counted, never allowed to block the remaining channels.

use crate::publish::error::PublishError;
use crate::types::reading::StationReading;
use serde_json::{json, Value};
use std::time::Duration;

const PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);

/// State value of the archival "complete" channel.
const ONLINE_MARKER: &str = "Online";

/// One pending state update: the entity to write and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelUpdate {
    pub entity_id: String,
    pub state: Value,
    pub attributes: Value,
}

/// Outcome of one publish pass over a reading's channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PublishSummary {
    pub published: usize,
    pub failed: usize,
}

impl PublishSummary {
    pub fn total(&self) -> usize {
        self.published + self.failed
    }
}

/// Client for the hub's `/api/states/<entity_id>` endpoint.
pub struct HubClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HubClient {
    /// Creates a client for the given hub base URL and long-lived access
    /// token. A trailing slash on the base URL is tolerated.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: reqwest::Client::builder()
                .timeout(PUBLISH_TIMEOUT)
                .build()
                .expect("HTTP client construction"),
        }
    }

    /// Writes one entity's state and attribute mapping to the hub.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::NetworkRequest`] on connection or timeout
    /// failures and [`PublishError::HttpStatus`] on a non-2xx response.
    pub async fn set_state(
        &self,
        entity_id: &str,
        state: &Value,
        attributes: &Value,
    ) -> Result<(), PublishError> {
        let url = format!("{}/api/states/{}", self.base_url, entity_id);
        let body = json!({ "state": state, "attributes": attributes });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::NetworkRequest(entity_id.to_string(), e))?;

        match response.error_for_status() {
            Ok(_) => {
                log::info!("Updated {entity_id}");
                Ok(())
            }
            Err(e) => {
                let status = e.status().unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                Err(PublishError::HttpStatus {
                    entity_id: entity_id.to_string(),
                    status,
                    source: e,
                })
            }
        }
    }

    /// Publishes every channel of a reading, containing per-channel
    /// failures. Each failed channel is logged; the rest are still
    /// attempted. Partial success is an expected outcome, not an error.
    pub async fn publish_reading(&self, reading: &StationReading) -> PublishSummary {
        let mut summary = PublishSummary::default();

        for update in channel_updates(reading) {
            match self
                .set_state(&update.entity_id, &update.state, &update.attributes)
                .await
            {
                Ok(()) => summary.published += 1,
                Err(e) => {
                    log::error!("Channel publish failed: {e}");
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}

fn entity_id(station_code: &str, metric: &str) -> String {
    format!("sensor.cgesp_{station_code}_{metric}")
}

/// Maps a reading onto its six channel updates, in publish order:
/// temperature, humidity, rain, wind_speed, pressure, complete.
///
/// The five measurement channels carry their section's current value as the
/// state plus max/min, previous-period or gust context as attributes; the
/// complete channel carries a fixed online marker and embeds the whole
/// reading for archival.
pub fn channel_updates(reading: &StationReading) -> Vec<ChannelUpdate> {
    let station = json!({
        "station_name": reading.station_name,
        "station_code": reading.station_code,
        "timestamp": reading.timestamp,
    });
    let with_station = |mut attributes: Value| {
        if let (Some(map), Some(base)) = (attributes.as_object_mut(), station.as_object()) {
            for (key, value) in base {
                map.insert(key.clone(), value.clone());
            }
        }
        attributes
    };

    vec![
        ChannelUpdate {
            entity_id: entity_id(&reading.station_code, "temperature"),
            state: json!(reading.temperature.current),
            attributes: with_station(json!({
                "friendly_name": format!("CGESP {} Temperature", reading.station_name),
                "unit_of_measurement": "°C",
                "device_class": "temperature",
                "state_class": "measurement",
                "max_today": reading.temperature.max,
                "min_today": reading.temperature.min,
            })),
        },
        ChannelUpdate {
            entity_id: entity_id(&reading.station_code, "humidity"),
            state: json!(reading.humidity.current),
            attributes: with_station(json!({
                "friendly_name": format!("CGESP {} Humidity", reading.station_name),
                "unit_of_measurement": "%",
                "device_class": "humidity",
                "state_class": "measurement",
                "max_today": reading.humidity.max,
                "min_today": reading.humidity.min,
            })),
        },
        ChannelUpdate {
            entity_id: entity_id(&reading.station_code, "rain"),
            state: json!(reading.rain.current),
            attributes: with_station(json!({
                "friendly_name": format!("CGESP {} Rain", reading.station_name),
                "unit_of_measurement": "mm",
                "device_class": "precipitation",
                "state_class": "total_increasing",
                "previous_period": reading.rain.previous,
                "reset_time": reading.rain.reset_time,
            })),
        },
        ChannelUpdate {
            entity_id: entity_id(&reading.station_code, "wind_speed"),
            state: json!(reading.wind.speed),
            attributes: with_station(json!({
                "friendly_name": format!("CGESP {} Wind Speed", reading.station_name),
                "unit_of_measurement": "km/h",
                "device_class": "wind_speed",
                "state_class": "measurement",
                "gust_speed": reading.wind.gust,
            })),
        },
        ChannelUpdate {
            entity_id: entity_id(&reading.station_code, "pressure"),
            state: json!(reading.pressure.current),
            attributes: with_station(json!({
                "friendly_name": format!("CGESP {} Pressure", reading.station_name),
                "unit_of_measurement": "hPa",
                "device_class": "pressure",
                "state_class": "measurement",
                "max_today": reading.pressure.max,
                "min_today": reading.pressure.min,
            })),
        },
        ChannelUpdate {
            entity_id: entity_id(&reading.station_code, "complete"),
            state: json!(ONLINE_MARKER),
            attributes: with_station(json!({
                "friendly_name": format!("CGESP {} Complete Data", reading.station_name),
                "rain": reading.rain,
                "temperature": reading.temperature,
                "humidity": reading.humidity,
                "wind": reading.wind,
                "pressure": reading.pressure,
                "history": reading.history,
            })),
        },
    ]
}
