//! Encyclopedia article model

use serde::{Deserialize, Serialize};

/// Where a [`CityArticle`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSource {
    /// Live encyclopedia answer
    Wikipedia,
    /// Entry of the built-in table of well-known cities
    Mock,
    /// Generic text generated from the city name
    Template,
}

/// Short encyclopedia summary of a city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityArticle {
    /// City name as requested
    pub city: String,
    /// Country, empty when unknown
    pub country: String,
    /// Article title
    pub title: String,
    /// Opening paragraph
    pub summary: String,
    /// One-line description
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// Link to the full article
    pub url: String,
    pub source: ArticleSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ArticleSource::Mock).unwrap(), "mock");
        assert_eq!(serde_json::to_value(ArticleSource::Wikipedia).unwrap(), "wikipedia");
    }
}
