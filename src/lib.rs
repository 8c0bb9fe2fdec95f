//! Scrapes CGESP weather-station pages and republishes the readings as
//! Home Assistant sensor entities.
//!
//! The pipeline has three stages, run in sequence by [`StationMonitor`]:
//! fetch the station's detail page ([`PageFetcher`]), extract a typed
//! [`StationReading`] from the HTML ([`extract_reading`]), and write one
//! state update per sensor channel to the hub ([`HubClient`]). Every stage
//! is best-effort: a fetch failure skips the cycle, a broken page section
//! degrades to default values, and a failed channel never blocks the rest.

mod error;
mod extract;
mod fetch;
mod monitor;
mod publish;
mod types;

pub use error::CgespError;

pub use extract::error::ExtractError;
pub use extract::extract_reading;

pub use fetch::error::FetchError;
pub use fetch::page::{available_stations, PageFetcher};

pub use monitor::{remaining_wait, StationMonitor};

pub use publish::error::PublishError;
pub use publish::hub::{channel_updates, ChannelUpdate, HubClient, PublishSummary};

pub use types::known_stations::{known_station_name, KNOWN_STATIONS};
pub use types::reading::{
    HistoryEntry, MeasurementRange, RainReading, StationOption, StationReading, WindReading,
};
