//! Data models for the TravelMaker service
//!
//! This module contains the records returned by the HTTP endpoints:
//! - City info: structured record parsed from generative text
//! - Article: encyclopedia summary for a city
//! - Location: geocoded city coordinates
//! - Weather: current conditions for a city

pub mod article;
pub mod city_info;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use article::{ArticleSource, CityArticle};
pub use city_info::{CulturalInfo, ParsedCityInfo};
pub use location::Location;
pub use weather::WeatherReport;
