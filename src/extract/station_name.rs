//! Station display-name resolution.
//!
//! Resolution order: the page title, then the first heading that mentions
//! the station, then the static known-station table, and finally a
//! synthesized `Station_<code>` placeholder. The first non-empty match wins.

use crate::extract::text::clean_text;
use crate::types::known_stations::known_station_name;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

// The page serves its title unaccented.
static TITLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Estacao Meteorologica - (.*?) -").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1, h2, h3").unwrap());

pub fn resolve_station_name(document: &Html, station_code: &str) -> String {
    if let Some(title) = document.select(&TITLE).next() {
        let text = title.text().collect::<String>();
        if let Some(captures) = TITLE_NAME.captures(&text) {
            let name = captures[1].trim().to_string();
            if !name.is_empty() {
                return name;
            }
        }
    }

    for heading in document.select(&HEADINGS) {
        let text = heading.text().collect::<String>();
        let lowered = text.to_lowercase();
        if lowered.contains("estacao") || lowered.contains("meteorologica") {
            let name = clean_text(&text);
            if !name.is_empty() {
                return name;
            }
        }
    }

    known_station_name(station_code)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Station_{station_code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn title_match_wins_over_heading() {
        let html = r#"
            <html><head>
              <title>Estacao Meteorologica - Vila Maria - CGESP</title>
            </head><body>
              <h2>Estacao Santana</h2>
            </body></html>"#;
        assert_eq!(resolve_station_name(&parse(html), "1000837"), "Vila Maria");
    }

    #[test]
    fn heading_wins_over_lookup() {
        let html = r#"
            <html><head><title>CGESP</title></head>
            <body><h1>Estacao Santana</h1></body></html>"#;
        assert_eq!(resolve_station_name(&parse(html), "1000837"), "Estacao Santana");
    }

    #[test]
    fn lookup_used_when_page_is_silent() {
        let html = "<html><head><title>CGESP</title></head><body></body></html>";
        assert_eq!(
            resolve_station_name(&parse(html), "1000836"),
            "Santana"
        );
    }

    #[test]
    fn unknown_code_synthesizes_placeholder() {
        let html = "<html><body></body></html>";
        assert_eq!(
            resolve_station_name(&parse(html), "9999999"),
            "Station_9999999"
        );
    }
}
