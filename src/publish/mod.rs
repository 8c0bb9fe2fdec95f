pub mod error;
pub mod hub;
