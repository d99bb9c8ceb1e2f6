//! Configuration management for the `TravelMaker` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "TRAVELMAKER_CONFIG";

/// Root configuration structure for the `TravelMaker` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Generative-text API settings
    #[serde(default)]
    pub generative: GenerativeConfig,
    /// Encyclopedia API settings
    #[serde(default)]
    pub encyclopedia: EncyclopediaConfig,
    /// Weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Heading keywords, labels and fallbacks used by the city-info parser
    #[serde(default)]
    pub parser: ParserConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// PEM certificate, enables TLS together with `tls_key_path`
    #[serde(default)]
    pub tls_cert_path: Option<String>,
    /// PEM private key
    #[serde(default)]
    pub tls_key_path: Option<String>,
    /// Maximum request body size in KB
    #[serde(default = "default_body_limit_kb")]
    pub body_limit_kb: u32,
}

/// Generative-text (chat completions) API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// Bearer key; requests fail with a configuration error when absent
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_generative_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_generative_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_generative_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens
    #[serde(default = "default_generative_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_generative_timeout")]
    pub timeout_seconds: u32,
}

/// Encyclopedia (Wikipedia REST) API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncyclopediaConfig {
    /// Base URL of the REST API, including the language subdomain
    #[serde(default = "default_encyclopedia_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_lookup_timeout")]
    pub timeout_seconds: u32,
}

/// Weather (Open-Meteo) API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Forecast API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Geocoding API base URL
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_url: String,
    /// Language used for geocoding results
    #[serde(default = "default_weather_language")]
    pub language: String,
    /// Request timeout in seconds
    #[serde(default = "default_lookup_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Keyword tables for the city-info parser.
///
/// Headings are matched as substrings of a line; labels are matched at the
/// start of a line, optionally behind a list marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_highlight_headings")]
    pub highlight_headings: Vec<String>,
    #[serde(default = "default_tip_headings")]
    pub tip_headings: Vec<String>,
    #[serde(default = "default_learning_headings")]
    pub learning_headings: Vec<String>,
    /// Headings that only close other sections
    #[serde(default = "default_cultural_headings")]
    pub cultural_headings: Vec<String>,
    /// Regex matching a list-item marker at the start of a line
    #[serde(default = "default_enumerator_pattern")]
    pub enumerator_pattern: String,
    #[serde(default = "default_country_labels")]
    pub country_labels: Vec<String>,
    #[serde(default = "default_language_labels")]
    pub language_labels: Vec<String>,
    #[serde(default = "default_currency_labels")]
    pub currency_labels: Vec<String>,
    #[serde(default = "default_best_time_labels")]
    pub best_time_labels: Vec<String>,
    #[serde(default = "default_famous_for_labels")]
    pub famous_for_labels: Vec<String>,
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default = "default_best_time")]
    pub default_best_time: String,
    #[serde(default = "default_learning_points")]
    pub default_learning_points: Vec<String>,
}

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_body_limit_kb() -> u32 {
    64
}

fn default_generative_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_generative_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generative_temperature() -> f32 {
    0.7
}

fn default_generative_max_tokens() -> u32 {
    1000
}

fn default_generative_timeout() -> u32 {
    30
}

fn default_encyclopedia_base_url() -> String {
    "https://ko.wikipedia.org/api/rest_v1".to_string()
}

fn default_lookup_timeout() -> u32 {
    10
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_weather_language() -> String {
    "ko".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_highlight_headings() -> Vec<String> {
    strings(&["주요 특징", "특징", "highlights"])
}

fn default_tip_headings() -> Vec<String> {
    strings(&["여행 팁", "팁", "travel tips"])
}

fn default_learning_headings() -> Vec<String> {
    strings(&["학습 포인트", "배울 점", "learning points"])
}

fn default_cultural_headings() -> Vec<String> {
    strings(&["문화 정보", "문화적 정보", "cultural info"])
}

fn default_enumerator_pattern() -> String {
    r"^(?:\d+\.|-|•)\s*".to_string()
}

fn default_country_labels() -> Vec<String> {
    strings(&["국가", "나라", "country"])
}

fn default_language_labels() -> Vec<String> {
    strings(&["언어", "language"])
}

fn default_currency_labels() -> Vec<String> {
    strings(&["화폐", "통화", "currency"])
}

fn default_best_time_labels() -> Vec<String> {
    strings(&[
        "최적 방문 시기",
        "최적 시기",
        "여행하기 좋은 시기",
        "best time to visit",
        "best season",
    ])
}

fn default_famous_for_labels() -> Vec<String> {
    strings(&["유명한 것", "유명한", "famous for"])
}

fn default_language() -> String {
    "현지 언어".to_string()
}

fn default_currency() -> String {
    "현지 화폐".to_string()
}

fn default_best_time() -> String {
    "봄, 가을".to_string()
}

fn default_learning_points() -> Vec<String> {
    strings(&[
        "현지 문화와 전통 이해하기",
        "역사적 배경 알아보기",
        "기본 인사말과 언어 배우기",
    ])
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            tls_cert_path: None,
            tls_key_path: None,
            body_limit_kb: default_body_limit_kb(),
        }
    }
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generative_base_url(),
            model: default_generative_model(),
            temperature: default_generative_temperature(),
            max_tokens: default_generative_max_tokens(),
            timeout_seconds: default_generative_timeout(),
        }
    }
}

impl Default for EncyclopediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_encyclopedia_base_url(),
            timeout_seconds: default_lookup_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            geocoding_url: default_geocoding_base_url(),
            language: default_weather_language(),
            timeout_seconds: default_lookup_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            highlight_headings: default_highlight_headings(),
            tip_headings: default_tip_headings(),
            learning_headings: default_learning_headings(),
            cultural_headings: default_cultural_headings(),
            enumerator_pattern: default_enumerator_pattern(),
            country_labels: default_country_labels(),
            language_labels: default_language_labels(),
            currency_labels: default_currency_labels(),
            best_time_labels: default_best_time_labels(),
            famous_for_labels: default_famous_for_labels(),
            default_language: default_language(),
            default_currency: default_currency(),
            default_best_time: default_best_time(),
            default_learning_points: default_learning_points(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVELMAKER_SERVER__PORT=9000 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("TRAVELMAKER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelmaker").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit_kb();
        }
        if self.generative.base_url.is_empty() {
            self.generative.base_url = default_generative_base_url();
        }
        if self.generative.model.is_empty() {
            self.generative.model = default_generative_model();
        }
        if self.generative.max_tokens == 0 {
            self.generative.max_tokens = default_generative_max_tokens();
        }
        if self.generative.timeout_seconds == 0 {
            self.generative.timeout_seconds = default_generative_timeout();
        }
        if self.encyclopedia.base_url.is_empty() {
            self.encyclopedia.base_url = default_encyclopedia_base_url();
        }
        if self.encyclopedia.timeout_seconds == 0 {
            self.encyclopedia.timeout_seconds = default_lookup_timeout();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.geocoding_url.is_empty() {
            self.weather.geocoding_url = default_geocoding_base_url();
        }
        if self.weather.language.is_empty() {
            self.weather.language = default_weather_language();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_lookup_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.parser.enumerator_pattern.is_empty() {
            self.parser.enumerator_pattern = default_enumerator_pattern();
        }
        if self.parser.default_learning_points.is_empty() {
            self.parser.default_learning_points = default_learning_points();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_parser()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // The key may be absent; only city search needs it
        if let Some(api_key) = &self.generative.api_key {
            if api_key.trim().is_empty() {
                return Err(TravelError::config(
                    "Generative API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(TravelError::config(
                    "Generative API key appears to be invalid (too short). Please check your API key."
                ).into());
            }

            if api_key.len() > 200 {
                return Err(TravelError::config(
                    "Generative API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("Generative API", self.generative.timeout_seconds),
            ("Encyclopedia API", self.encyclopedia.timeout_seconds),
            ("Weather API", self.weather.timeout_seconds),
        ];
        for (name, timeout) in timeouts {
            if timeout > 300 {
                return Err(
                    TravelError::config(format!("{name} timeout cannot exceed 300 seconds")).into(),
                );
            }
        }

        if !(0.0..=2.0).contains(&self.generative.temperature) {
            return Err(TravelError::config(
                "Generative temperature must be between 0.0 and 2.0"
            ).into());
        }

        if self.generative.max_tokens > 8192 {
            return Err(TravelError::config(
                "Generative max tokens cannot exceed 8192"
            ).into());
        }

        if self.server.body_limit_kb > 10_240 {
            return Err(TravelError::config(
                "Request body limit cannot exceed 10240 KB (10 MB)"
            ).into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelError::config(
                format!("Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_log_levels.join(", ")
                )
            ).into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelError::config(
                format!("Invalid log format '{}'. Must be one of: {}",
                    self.logging.format,
                    valid_log_formats.join(", ")
                )
            ).into());
        }

        let urls = [
            ("Generative API", &self.generative.base_url),
            ("Encyclopedia API", &self.encyclopedia.base_url),
            ("Weather API", &self.weather.base_url),
            ("Geocoding API", &self.weather.geocoding_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TravelError::config(
                    format!("{name} base URL must be a valid HTTP or HTTPS URL")
                ).into());
            }
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(TravelError::config(
                "TLS needs both tls_cert_path and tls_key_path"
            ).into());
        }

        Ok(())
    }

    /// Validate keyword tables and fallbacks of the parser
    fn validate_parser(&self) -> Result<()> {
        let parser = &self.parser;

        let keyword_lists = [
            ("highlight_headings", &parser.highlight_headings),
            ("tip_headings", &parser.tip_headings),
            ("learning_headings", &parser.learning_headings),
            ("country_labels", &parser.country_labels),
            ("language_labels", &parser.language_labels),
            ("currency_labels", &parser.currency_labels),
            ("best_time_labels", &parser.best_time_labels),
            ("famous_for_labels", &parser.famous_for_labels),
        ];
        for (name, list) in keyword_lists {
            if list.is_empty() || list.iter().any(|k| k.trim().is_empty()) {
                return Err(TravelError::config(
                    format!("parser.{name} must contain at least one non-empty keyword")
                ).into());
            }
        }

        regex::Regex::new(&parser.enumerator_pattern).map_err(|e| {
            TravelError::config(format!("Invalid parser.enumerator_pattern: {e}"))
        })?;

        let fallbacks = [
            ("default_language", &parser.default_language),
            ("default_currency", &parser.default_currency),
            ("default_best_time", &parser.default_best_time),
        ];
        for (name, value) in fallbacks {
            if value.trim().is_empty() {
                return Err(TravelError::config(
                    format!("parser.{name} cannot be empty")
                ).into());
            }
        }

        let learning = &parser.default_learning_points;
        if learning.is_empty() || learning.len() > 3 || learning.iter().any(|p| p.trim().is_empty()) {
            return Err(TravelError::config(
                "parser.default_learning_points must hold one to three non-empty entries"
            ).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generative.base_url, "https://api.openai.com/v1");
        assert_eq!(config.generative.timeout_seconds, 30);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.parser.default_learning_points.len(), 3);
        assert!(config.generative.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = AppConfig::default();
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = AppConfig::default();
        config.generative.api_key = Some("short".to_string());
        let result = config.validate_api_keys();
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AppConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_config_validation_half_tls() {
        let mut config = AppConfig::default();
        config.server.tls_cert_path = Some("cert.pem".to_string());
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("TLS"));
    }

    #[test]
    fn test_config_validation_bad_enumerator_pattern() {
        let mut config = AppConfig::default();
        config.parser.enumerator_pattern = "(unclosed".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("enumerator_pattern"));
    }

    #[test]
    fn test_config_validation_too_many_learning_defaults() {
        let mut config = AppConfig::default();
        config.parser.default_learning_points.push("네 번째".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = env::temp_dir().join(format!("travelmaker-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[parser]\ntip_headings = [\"꿀팁\"]\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AppConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.parser.tip_headings, vec!["꿀팁".to_string()]);
        assert_eq!(config.logging.format, "json");
        // untouched sections keep their defaults
        assert_eq!(config.parser.highlight_headings, default_highlight_headings());
        assert_eq!(config.encyclopedia.timeout_seconds, 10);
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = AppConfig::default();
        config.logging.format = String::new();
        config.weather.timeout_seconds = 0;
        config.apply_defaults();
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.weather.timeout_seconds, 10);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("travelmaker"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
