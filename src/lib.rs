//! `TravelMaker` - backend of a kids' travel product builder
//!
//! This library turns generated city descriptions into structured records,
//! looks up encyclopedia articles and current weather, and exposes all of
//! it over a small HTTP API.

pub mod api;
pub mod config;
pub mod encyclopedia;
pub mod error;
pub mod generative;
pub mod logging;
pub mod models;
pub mod parser;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::{AppState, router};
pub use config::AppConfig;
pub use encyclopedia::{Encyclopedia, WikipediaClient};
pub use error::TravelError;
pub use generative::{OpenAiClient, TextGenerator};
pub use models::{CityArticle, CulturalInfo, ParsedCityInfo, WeatherReport};
pub use parser::CityInfoParser;
pub use weather::{OpenMeteoClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
