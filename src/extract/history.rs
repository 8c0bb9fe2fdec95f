//! Extraction of the station page's historical readings table.

use crate::extract::text::{clean_text, parse_number};
use crate::types::reading::HistoryEntry;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Minimum column count for both the header and each data row.
const HISTORY_COLUMNS: usize = 7;

/// Extracts the historical table as ordered [`HistoryEntry`] records.
///
/// The qualifying table is the first one whose header has at least seven
/// cells including a "Data" and a "Chuva" column (untranslated, as the page
/// prints them). Data rows with fewer than seven cells are skipped without
/// shifting the mapping of later rows. No qualifying table yields an empty
/// vec.
pub fn history_from_document(document: &Html) -> Vec<HistoryEntry> {
    for table in document.select(&TABLE) {
        let headers: Vec<String> = table
            .select(&HEADER_CELL)
            .map(|cell| clean_text(&cell.text().collect::<String>()))
            .collect();

        if headers.len() < HISTORY_COLUMNS {
            continue;
        }
        let has_date = headers.iter().any(|h| h.contains("Data"));
        let has_rain = headers.iter().any(|h| h.contains("Chuva"));
        if !has_date || !has_rain {
            continue;
        }

        let mut entries = Vec::new();
        for row in table.select(&ROW).skip(1) {
            let cells: Vec<String> = row
                .select(&DATA_CELL)
                .map(|cell| cell.text().collect::<String>())
                .collect();
            if cells.len() < HISTORY_COLUMNS {
                continue;
            }
            entries.push(HistoryEntry {
                date: clean_text(&cells[0]),
                rain: parse_number(&cells[1]),
                wind_speed: parse_number(&cells[2]),
                wind_direction: parse_number(&cells[3]),
                temperature: parse_number(&cells[4]),
                humidity: parse_number(&cells[5]),
                pressure: parse_number(&cells[6]),
            });
        }
        return entries;
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    const HISTORY_TABLE: &str = r#"
        <html><body>
          <table>
            <tr>
              <th>Data</th><th>Chuva (mm)</th><th>Vel. (km/h)</th><th>Dir.</th>
              <th>Temp (°C)</th><th>Umidade (%)</th><th>Pressão (hPa)</th>
            </tr>
            <tr>
              <td>01/06/2025 14:00</td><td>0.2</td><td>10.5</td><td>180</td>
              <td>22.1</td><td>70</td><td>1013.0</td>
            </tr>
            <tr>
              <td>01/06/2025 13:00</td><td>0.0</td><td>8.0</td><td>170</td>
              <td>23.0</td><td>65</td><td>1012.5</td>
            </tr>
          </table>
        </body></html>"#;

    #[test]
    fn extracts_rows_in_source_order() {
        let entries = history_from_document(&parse(HISTORY_TABLE));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "01/06/2025 14:00");
        assert_eq!(entries[0].rain, 0.2);
        assert_eq!(entries[0].wind_direction, 180.0);
        assert_eq!(entries[1].date, "01/06/2025 13:00");
        assert_eq!(entries[1].pressure, 1012.5);
    }

    #[test]
    fn short_rows_are_skipped_without_shifting() {
        let html = r#"
            <table>
              <tr>
                <th>Data</th><th>Chuva</th><th>c</th><th>d</th><th>e</th><th>f</th><th>g</th>
              </tr>
              <tr><td>01/06</td><td>1.0</td></tr>
              <tr>
                <td>02/06</td><td>2.0</td><td>3.0</td><td>4.0</td><td>5.0</td><td>6.0</td><td>7.0</td>
              </tr>
            </table>"#;
        let entries = history_from_document(&parse(html));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "02/06");
        assert_eq!(entries[0].rain, 2.0);
        assert_eq!(entries[0].pressure, 7.0);
    }

    #[test]
    fn table_without_required_headers_is_ignored() {
        let html = r#"
            <table>
              <tr><th>a</th><th>b</th><th>c</th><th>d</th><th>e</th><th>f</th><th>g</th></tr>
              <tr><td>1</td><td>2</td><td>3</td><td>4</td><td>5</td><td>6</td><td>7</td></tr>
            </table>"#;
        assert!(history_from_document(&parse(html)).is_empty());
    }

    #[test]
    fn narrow_table_is_ignored() {
        let html = r#"
            <table>
              <tr><th>Data</th><th>Chuva</th></tr>
              <tr><td>01/06</td><td>1.0</td></tr>
            </table>"#;
        assert!(history_from_document(&parse(html)).is_empty());
    }

    #[test]
    fn no_table_yields_empty_history() {
        assert!(history_from_document(&parse("<html><body></body></html>")).is_empty());
    }
}
