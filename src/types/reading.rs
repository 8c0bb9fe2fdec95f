//! Defines the data structures for a single CGESP station reading: the
//! per-section measurement records, the historical table rows, and the
//! station-selector entries. Everything is `Serialize` so a complete reading
//! can be embedded verbatim in the hub's archival channel attributes.

use serde::Serialize;

/// One full snapshot of a station page, produced once per poll cycle.
///
/// A reading is always fully populated: sections that could not be extracted
/// carry their [`Default`] values instead of being absent. It is built fresh
/// each cycle and discarded after publishing; nothing is retained across
/// iterations.
#[derive(Debug, Clone, Serialize)]
pub struct StationReading {
    /// The numeric CGESP station code (e.g., "1000840").
    pub station_code: String,
    /// The resolved display name, or a `Station_<code>` placeholder.
    pub station_name: String,
    /// RFC 3339 timestamp with the America/Sao_Paulo offset, taken when the
    /// reading was assembled.
    pub timestamp: String,
    pub rain: RainReading,
    pub temperature: MeasurementRange,
    pub humidity: MeasurementRange,
    pub wind: WindReading,
    pub pressure: MeasurementRange,
    /// Historical table rows in the order they appear on the page.
    pub history: Vec<HistoryEntry>,
}

/// A current/max/min triple, shared by temperature, humidity and pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct MeasurementRange {
    pub current: f64,
    pub max: f64,
    pub min: f64,
}

/// Accumulated rainfall for the current and previous period, plus the time
/// of day at which the accumulator resets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainReading {
    pub current: f64,
    pub previous: f64,
    /// "HH:MM:SS" as printed on the page.
    pub reset_time: String,
}

impl Default for RainReading {
    fn default() -> Self {
        Self {
            current: 0.0,
            previous: 0.0,
            reset_time: "00:00:00".to_string(),
        }
    }
}

/// Sustained wind speed and gust speed, both in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct WindReading {
    pub speed: f64,
    pub gust: f64,
}

/// One row of the station page's historical table.
///
/// Columns are positional on the page: date, rain, wind speed, wind
/// direction, temperature, humidity, pressure. The direction is published
/// numerically (degrees) the way the page renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub date: String,
    pub rain: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// One entry of the station-selector dropdown on the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationOption {
    /// Leading numeric code parsed from the option value.
    pub code: String,
    /// The option's display text.
    pub name: String,
    /// The raw option value (e.g., "1000840 - Ipiranga").
    pub value: String,
}
