//! Pure per-section parsers: each takes the flattened text of a section
//! container and returns the typed sub-record. Locating the container is the
//! caller's job, so markup matching and text-pattern matching stay
//! independently testable.
//!
//! Labels are matched as the page prints them ("Atual", "Máxima", "Mínima",
//! "Velocidade", "Rajada", "Zeramento"); any label that fails to match
//! leaves its field at the documented 0.0 / "00:00:00" default.

use crate::extract::text::parse_number;
use crate::types::reading::{MeasurementRange, RainReading, WindReading};
use regex::Regex;
use std::sync::LazyLock;

/// Compiled current/max/min patterns for one unit-bearing section.
pub struct RangePatterns {
    current: Regex,
    max: Regex,
    min: Regex,
}

impl RangePatterns {
    fn for_unit(unit: &str) -> Self {
        let build = |label: &str| {
            Regex::new(&format!(r"(?i){label}:\s*([\d.]+)\s*{unit}")).unwrap()
        };
        Self {
            current: build("Atual"),
            max: build("Máxima"),
            min: build("Mínima"),
        }
    }
}

pub static TEMPERATURE_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::for_unit("°?C"));
pub static HUMIDITY_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::for_unit("%"));
pub static PRESSURE_PATTERNS: LazyLock<RangePatterns> =
    LazyLock::new(|| RangePatterns::for_unit("hPa"));

static RAIN_CURRENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Per\. Atual:\s*([\d.]+)\s*mm").unwrap());
static RAIN_PREVIOUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Per\. Anterior:\s*([\d.]+)\s*mm").unwrap());
static RAIN_RESET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Zeramento:\s*(\d{2}:\d{2}:\d{2})").unwrap());

static WIND_SPEED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Velocidade:\s*([\d.]+)\s*km/h").unwrap());
static WIND_GUST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Rajada:\s*([\d.]+)\s*km/h").unwrap());

fn capture_number(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures(text)
        .map(|c| parse_number(&c[1]))
        .unwrap_or(0.0)
}

/// Parses the rain section: current and previous period in mm, plus the
/// accumulator reset time.
pub fn rain_from_text(text: &str) -> RainReading {
    RainReading {
        current: capture_number(&RAIN_CURRENT, text),
        previous: capture_number(&RAIN_PREVIOUS, text),
        reset_time: RAIN_RESET
            .captures(text)
            .map(|c| c[1].to_string())
            .unwrap_or_else(|| "00:00:00".to_string()),
    }
}

/// Parses a current/max/min section (temperature, humidity or pressure)
/// using the unit-specific pattern set.
pub fn range_from_text(text: &str, patterns: &RangePatterns) -> MeasurementRange {
    MeasurementRange {
        current: capture_number(&patterns.current, text),
        max: capture_number(&patterns.max, text),
        min: capture_number(&patterns.min, text),
    }
}

/// Parses the wind section: sustained speed and gust, both in km/h.
pub fn wind_from_text(text: &str) -> WindReading {
    WindReading {
        speed: capture_number(&WIND_SPEED, text),
        gust: capture_number(&WIND_GUST, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_temperature_triple() {
        let text = "Temperatura Atual: 23.4°C Máxima: 30.1°C Mínima: 18.0°C";
        let range = range_from_text(text, &TEMPERATURE_PATTERNS);
        assert_eq!(
            range,
            MeasurementRange {
                current: 23.4,
                max: 30.1,
                min: 18.0
            }
        );
    }

    #[test]
    fn temperature_degree_sign_is_optional() {
        let text = "Atual: 21.0 C Máxima: 25.5 C Mínima: 19.9 C";
        let range = range_from_text(text, &TEMPERATURE_PATTERNS);
        assert_eq!(range.current, 21.0);
        assert_eq!(range.min, 19.9);
    }

    #[test]
    fn parses_humidity_and_pressure_units() {
        let humidity = range_from_text("Atual: 65.0% Máxima: 90.0% Mínima: 40.0%", &HUMIDITY_PATTERNS);
        assert_eq!(humidity.max, 90.0);

        let pressure = range_from_text(
            "Atual: 1013.2 hPa Máxima: 1015.0 hPa Mínima: 1009.8 hPa",
            &PRESSURE_PATTERNS,
        );
        assert_eq!(pressure.min, 1009.8);
    }

    #[test]
    fn missing_labels_default_to_zero() {
        let range = range_from_text("Atual: 12.0°C", &TEMPERATURE_PATTERNS);
        assert_eq!(range.current, 12.0);
        assert_eq!(range.max, 0.0);
        assert_eq!(range.min, 0.0);
    }

    #[test]
    fn parses_rain_section() {
        let text = "Chuva - Por Período Per. Atual: 5.2 mm Per. Anterior: 1.0 mm Zeramento: 07:00:00";
        let rain = rain_from_text(text);
        assert_eq!(rain.current, 5.2);
        assert_eq!(rain.previous, 1.0);
        assert_eq!(rain.reset_time, "07:00:00");
    }

    #[test]
    fn rain_reset_time_defaults_when_absent() {
        let rain = rain_from_text("Per. Atual: 0.0 mm");
        assert_eq!(rain.reset_time, "00:00:00");
    }

    #[test]
    fn parses_wind_section() {
        let wind = wind_from_text("Vento Velocidade: 12.3 km/h Rajada: 20.1 km/h");
        assert_eq!(wind.speed, 12.3);
        assert_eq!(wind.gust, 20.1);
    }

    #[test]
    fn empty_text_yields_defaults() {
        assert_eq!(rain_from_text(""), RainReading::default());
        assert_eq!(wind_from_text(""), WindReading::default());
        assert_eq!(
            range_from_text("", &PRESSURE_PATTERNS),
            MeasurementRange::default()
        );
    }
}
