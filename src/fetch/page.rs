//! Loads CGESP station pages over HTTP.
//!
//! The station detail page is server-rendered, so a plain GET with a bounded
//! timeout yields the same document a browser session would. One client is
//! built up front; each request's connection is scoped to the call and
//! released on every exit path.

use crate::fetch::error::FetchError;
use crate::types::reading::StationOption;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

const STATION_URL_TEMPLATE: &str = "https://www.cgesp.org/v3/estacao.jsp?POSTO=";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

static STATION_SELECT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("select#estacao option").unwrap());
static CODE_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)").unwrap());

/// Fetches station detail pages from the CGESP site.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("HTTP client construction"),
        }
    }

    /// Builds the detail-page URL for a station code.
    pub fn station_url(station_code: &str) -> String {
        format!("{STATION_URL_TEMPLATE}{station_code}")
    }

    /// Loads the station's detail page and returns its HTML text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NetworkRequest`] on connection or timeout
    /// failures, [`FetchError::HttpStatus`] on a non-2xx response, and
    /// [`FetchError::BodyRead`] when the body cannot be read. The poll loop
    /// treats any of these as "no data this cycle".
    pub async fn fetch_page(&self, station_code: &str) -> Result<String, FetchError> {
        let url = Self::station_url(station_code);
        log::info!("Fetching station page: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                if let Some(status) = e.status() {
                    return Err(FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    });
                }
                return Err(FetchError::NetworkRequest(url, e));
            }
        };

        response
            .text()
            .await
            .map_err(|e| FetchError::BodyRead(url, e))
    }
}

/// Enumerates the selectable stations from a page containing the station
/// dropdown.
///
/// Each option contributes its leading numeric code, display text and raw
/// value. Options with empty text/value or without a leading numeric code
/// are skipped.
pub fn available_stations(html: &str) -> Vec<StationOption> {
    let document = Html::parse_document(html);
    let mut stations = Vec::new();

    for option in document.select(&STATION_SELECT) {
        let name = option.text().collect::<String>().trim().to_string();
        let value = option.value().attr("value").unwrap_or("").to_string();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        if let Some(captures) = CODE_PREFIX.captures(&value) {
            stations.push(StationOption {
                code: captures[1].to_string(),
                name,
                value,
            });
        }
    }

    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECTOR_PAGE: &str = r#"
        <html><body>
          <select id="estacao">
            <option value="">Selecione</option>
            <option value="1000840 - Ipiranga">1000840 - Ipiranga</option>
            <option value="1000839 - Cidade Universitária">1000839 - Cidade Universitária</option>
            <option value="sem-codigo">Entrada inválida</option>
          </select>
        </body></html>"#;

    #[test]
    fn station_url_substitutes_code() {
        assert_eq!(
            PageFetcher::station_url("1000840"),
            "https://www.cgesp.org/v3/estacao.jsp?POSTO=1000840"
        );
    }

    #[test]
    fn lists_stations_with_numeric_codes() {
        let stations = available_stations(SELECTOR_PAGE);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].code, "1000840");
        assert_eq!(stations[0].name, "1000840 - Ipiranga");
        assert_eq!(stations[1].code, "1000839");
    }

    #[test]
    fn skips_options_without_code_or_value() {
        let stations = available_stations(SELECTOR_PAGE);
        assert!(stations.iter().all(|s| !s.code.is_empty()));
        assert!(!stations.iter().any(|s| s.value == "sem-codigo"));
    }

    #[test]
    fn no_dropdown_yields_empty_list() {
        assert!(available_stations("<html><body></body></html>").is_empty());
    }
}
