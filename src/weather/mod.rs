//! Current weather for a city via Open-Meteo
//!
//! A lookup geocodes the city name, then asks the forecast endpoint for
//! current conditions at the first match. Neither API needs a key.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::models::weather::weather_code_to_description;
use crate::models::{Location, WeatherReport};
use crate::{Result, TravelError};

/// Source of current weather
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions in `city`; `Ok(None)` when the city is unknown.
    async fn current_weather(&self, city: &str) -> Result<Option<WeatherReport>>;
}

/// Open-Meteo geocoding and forecast client
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    geocoding_url: String,
    language: String,
}

impl OpenMeteoClient {
    /// Create a new client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TravelMaker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TravelError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    /// First geocoding hit for `name`
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> Result<Option<Location>> {
        let url = format!(
            "{}/search?name={}&count=1&language={}&format=json",
            self.geocoding_url,
            urlencoding::encode(name.trim()),
            urlencoding::encode(&self.language)
        );

        let response: openmeteo::GeocodingResponse = self.get_json(&url).await?;
        let location = response
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Location::from);

        match &location {
            Some(found) => debug!(
                "Geocoded '{}' to {} ({})",
                name,
                found.name,
                found.format_coordinates()
            ),
            None => warn!("No geocoding results found for '{}'", name),
        }

        Ok(location)
    }

    /// Current conditions at `location`
    #[instrument(skip(self), fields(location = %location.name))]
    pub async fn current_at(&self, location: &Location) -> Result<WeatherReport> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&current=temperature_2m,relative_humidity_2m,wind_speed_10m,weather_code&wind_speed_unit=ms&timezone=UTC",
            self.base_url, location.latitude, location.longitude
        );

        let response: openmeteo::ForecastResponse = self.get_json(&url).await?;
        let current = response.current.ok_or_else(|| {
            TravelError::parse("No current weather data available from Open-Meteo")
        })?;

        Ok(current.into_report(location))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TravelError::api(format!("Open-Meteo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TravelError::api(format!(
                "Open-Meteo request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let parsed = response
            .json()
            .await
            .map_err(|e| TravelError::parse(format!("Invalid data received from Open-Meteo: {e}")))?;

        let total_duration = start_time.elapsed();
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow Open-Meteo response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current_weather(&self, city: &str) -> Result<Option<WeatherReport>> {
        let Some(location) = self.geocode(city).await? else {
            return Ok(None);
        };

        let report = self.current_at(&location).await?;
        info!(
            "Current weather in {}: {}, {}, wind {}",
            report.city,
            report.format_temperature(),
            report.description,
            report.format_wind()
        );
        Ok(Some(report))
    }
}

/// Parse an Open-Meteo `YYYY-MM-DDTHH:MM` timestamp (UTC)
fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|dt| dt.and_utc())
}

/// `Open-Meteo` API response structures and conversion utilities
mod openmeteo {
    use super::{Location, WeatherReport, parse_time, weather_code_to_description};
    use chrono::Utc;
    use serde::Deserialize;

    /// Forecast response; only the `current` block is requested
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        pub time: String,
        #[serde(rename = "temperature_2m")]
        pub temperature: f32,
        #[serde(rename = "relative_humidity_2m")]
        pub humidity: u8,
        #[serde(rename = "wind_speed_10m")]
        pub wind_speed: f32,
        pub weather_code: u8,
    }

    impl CurrentData {
        pub fn into_report(self, location: &Location) -> WeatherReport {
            WeatherReport {
                city: location.name.clone(),
                country: location.country.clone().unwrap_or_default(),
                latitude: location.latitude,
                longitude: location.longitude,
                temperature: self.temperature,
                humidity: self.humidity,
                wind_speed: self.wind_speed,
                weather_code: self.weather_code,
                description: weather_code_to_description(self.weather_code).to_string(),
                observed_at: parse_time(&self.time).unwrap_or_else(Utc::now),
            }
        }
    }

    /// Geocoding response from `OpenMeteo`
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(result: GeocodingResult) -> Self {
            Location {
                latitude: result.latitude,
                longitude: result.longitude,
                name: result.name,
                country: result.country,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_time() {
        let parsed = parse_time("2026-10-19T14:45").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2026, 10, 19));
        assert_eq!((parsed.hour(), parsed.minute()), (14, 45));
        assert!(parse_time("yesterday").is_none());
    }

    #[test]
    fn test_current_data_conversion() {
        let json = r#"{
            "latitude": 35.7, "longitude": 139.69,
            "current": {
                "time": "2026-10-19T03:00", "interval": 900,
                "temperature_2m": 18.4, "relative_humidity_2m": 71,
                "wind_speed_10m": 2.5, "weather_code": 3
            }
        }"#;
        let response: openmeteo::ForecastResponse = serde_json::from_str(json).unwrap();
        let location = Location {
            latitude: 35.6895,
            longitude: 139.6917,
            name: "도쿄".to_string(),
            country: Some("일본".to_string()),
        };
        let report = response.current.unwrap().into_report(&location);

        assert_eq!(report.city, "도쿄");
        assert_eq!(report.country, "일본");
        assert_eq!(report.humidity, 71);
        assert_eq!(report.weather_code, 3);
        assert_eq!(report.description, "Overcast");
        assert_eq!(report.observed_at.hour(), 3);
    }

    #[test]
    fn test_geocoding_without_results() {
        let response: openmeteo::GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(response.results.is_none());
    }
}
