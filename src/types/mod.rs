pub mod known_stations;
pub mod reading;
