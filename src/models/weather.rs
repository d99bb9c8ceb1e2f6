//! Weather report model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// City name as resolved by the geocoder
    pub city: String,
    /// Country name, empty when unknown
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f32,
    /// WMO weather code
    pub weather_code: u8,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Time of the observation
    pub observed_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}

/// Convert a WMO weather code to a human-readable description
#[must_use]
pub fn weather_code_to_description(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_code_descriptions() {
        assert_eq!(weather_code_to_description(0), "Clear sky");
        assert_eq!(weather_code_to_description(63), "Moderate rain");
        assert_eq!(weather_code_to_description(42), "Unknown");
    }

    #[test]
    fn test_formatting() {
        let report = WeatherReport {
            city: "Paris".to_string(),
            country: "France".to_string(),
            latitude: 48.85,
            longitude: 2.35,
            temperature: 17.26,
            humidity: 60,
            wind_speed: 3.04,
            weather_code: 2,
            description: "Partly cloudy".to_string(),
            observed_at: Utc::now(),
        };
        assert_eq!(report.format_temperature(), "17.3°C");
        assert_eq!(report.format_wind(), "3.0 m/s");
    }
}
