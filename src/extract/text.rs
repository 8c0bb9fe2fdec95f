//! Text normalization shared by every extraction routine: numeric cleaning
//! and best-effort repair of mojibake in the page's Latin-1 heritage markup.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Mojibake sequences the CGESP pages are known to emit (UTF-8 bytes decoded
/// as Latin-1), paired with the intended character. A best-effort patch for
/// the corruption actually observed, not a general transcoder.
const MOJIBAKE_REPAIRS: &[(&str, &str)] = &[
    ("Ã¡", "á"),
    ("Ã¢", "â"),
    ("Ã£", "ã"),
    ("Ã§", "ç"),
    ("Ã©", "é"),
    ("Ãª", "ê"),
    ("Ã­", "í"),
    ("Ã³", "ó"),
    ("Ãµ", "õ"),
    ("Ãº", "ú"),
];

/// Repairs known mojibake sequences and collapses runs of whitespace into
/// single spaces, trimming the ends.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut repaired = text.to_string();
    for (broken, fixed) in MOJIBAKE_REPAIRS {
        if repaired.contains(broken) {
            repaired = repaired.replace(broken, fixed);
        }
    }
    WHITESPACE.replace_all(&repaired, " ").trim().to_string()
}

/// Extracts a floating-point magnitude from noisy cell text.
///
/// Strips every character except digits, `.` and `-`, then parses the
/// remainder. Anything unparseable (including digit-free input) yields 0.0,
/// the documented default for numeric fields.
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}
