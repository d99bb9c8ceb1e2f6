//! Structured city record assembled from a generative-text answer

use serde::{Deserialize, Serialize};

/// City overview shown to the user after a city search.
///
/// `highlights`, `travel_tips` and `cultural_info.famous_for` hold at most
/// three entries; `learning_points` holds one to three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCityInfo {
    /// City name exactly as requested
    pub city: String,
    /// Country name, empty when the text did not name one
    pub country: String,
    /// Opening lines of the answer, at most 200 characters
    pub summary: String,
    pub highlights: Vec<String>,
    pub cultural_info: CulturalInfo,
    pub travel_tips: Vec<String>,
    pub learning_points: Vec<String>,
}

/// Language, money and seasons of a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalInfo {
    pub language: String,
    pub currency: String,
    pub best_time_to_visit: String,
    pub famous_for: Vec<String>,
}
