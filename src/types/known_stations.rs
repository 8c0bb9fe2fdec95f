//! Static lookup of the eleven CGESP station codes to their display names,
//! used as the third fallback during station-name resolution.

/// Known station codes and display names, as listed on the CGESP overview
/// page. Immutable; the final fallback when a code is absent here is the
/// synthesized `Station_<code>` placeholder.
pub const KNOWN_STATIONS: &[(&str, &str)] = &[
    ("1000840", "Ipiranga - Ribeirão dos Meninos"),
    ("1000839", "Cidade Universitária"),
    ("1000838", "Morumbi - USP"),
    ("1000837", "Vila Maria"),
    ("1000836", "Santana"),
    ("1000835", "Sé - Centro"),
    ("1000834", "Vila Prudente"),
    ("1000833", "Itaim Paulista"),
    ("1000832", "Jardim São Luís"),
    ("1000831", "Capela do Socorro"),
    ("1000830", "Parelheiros"),
];

/// Looks up the display name for a known station code.
pub fn known_station_name(code: &str) -> Option<&'static str> {
    KNOWN_STATIONS
        .iter()
        .find(|(known_code, _)| *known_code == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_code() {
        assert_eq!(known_station_name("1000839"), Some("Cidade Universitária"));
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(known_station_name("9999999"), None);
    }
}
