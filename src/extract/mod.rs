//! Turns a rendered station page into a fully populated [`StationReading`].
//!
//! Extraction is best-effort and never fails as a whole: each measurement
//! section is located and parsed independently, and a section that cannot be
//! extracted degrades to its default values with the reason logged. The
//! markup-matching step (finding a section's container) is kept apart from
//! the text-pattern step (parsing the container's flattened text, in
//! [`sections`]) so each can be tested on its own.

pub mod error;
pub mod history;
pub mod sections;
pub mod station_name;
pub mod text;

use crate::extract::error::ExtractError;
use crate::extract::history::history_from_document;
use crate::extract::sections::{
    rain_from_text, range_from_text, wind_from_text, HUMIDITY_PATTERNS, PRESSURE_PATTERNS,
    TEMPERATURE_PATTERNS,
};
use crate::extract::station_name::resolve_station_name;
use crate::types::reading::StationReading;
use chrono::Utc;
use chrono_tz::America::Sao_Paulo;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

static RAIN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Chuva.*Por Período").unwrap());
static RAIN_KEYWORD_ALT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Precipitação").unwrap());
static TEMPERATURE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Temperatura").unwrap());
static HUMIDITY_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Umidade").unwrap());
static WIND_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Vento").unwrap());
static PRESSURE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)Pressão").unwrap());

/// Finds the first text node matching any of `keywords` and returns the
/// flattened text of its enclosing container element.
fn section_text(
    document: &Html,
    section: &'static str,
    keywords: &[&Regex],
) -> Result<String, ExtractError> {
    let mut matched = None;
    'search: for keyword in keywords {
        for node in document.tree.nodes() {
            if let Some(node_text) = node.value().as_text() {
                if keyword.is_match(node_text) {
                    matched = Some(node);
                    break 'search;
                }
            }
        }
    }

    let node = matched.ok_or(ExtractError::SectionNotFound(section))?;
    let container = node
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::ContainerNotFound(section))?;
    Ok(container.text().collect::<Vec<_>>().join(" "))
}

/// Resolves a section outcome, substituting defaults with the reason logged.
fn section_or_default<T: Default>(outcome: Result<T, ExtractError>) -> T {
    match outcome {
        Ok(value) => value,
        Err(reason) => {
            log::warn!("Using default values: {reason}");
            T::default()
        }
    }
}

/// Extracts one [`StationReading`] from a rendered station page.
///
/// Always succeeds; any section that cannot be located or parsed carries its
/// default values instead. The timestamp is taken at extraction time in the
/// America/Sao_Paulo timezone.
pub fn extract_reading(html: &str, station_code: &str) -> StationReading {
    let document = Html::parse_document(html);

    let reading = StationReading {
        station_code: station_code.to_string(),
        station_name: resolve_station_name(&document, station_code),
        timestamp: Utc::now().with_timezone(&Sao_Paulo).to_rfc3339(),
        rain: section_or_default(
            section_text(&document, "rain", &[&RAIN_KEYWORD, &RAIN_KEYWORD_ALT])
                .map(|t| rain_from_text(&t)),
        ),
        temperature: section_or_default(
            section_text(&document, "temperature", &[&TEMPERATURE_KEYWORD])
                .map(|t| range_from_text(&t, &TEMPERATURE_PATTERNS)),
        ),
        humidity: section_or_default(
            section_text(&document, "humidity", &[&HUMIDITY_KEYWORD])
                .map(|t| range_from_text(&t, &HUMIDITY_PATTERNS)),
        ),
        wind: section_or_default(
            section_text(&document, "wind", &[&WIND_KEYWORD]).map(|t| wind_from_text(&t)),
        ),
        pressure: section_or_default(
            section_text(&document, "pressure", &[&PRESSURE_KEYWORD])
                .map(|t| range_from_text(&t, &PRESSURE_PATTERNS)),
        ),
        history: history_from_document(&document),
    };

    log::info!(
        "Extracted reading for station {} - {}",
        reading.station_code,
        reading.station_name
    );
    reading
}
