//! HTTP API
//!
//! Routes, nested under `/api` by [`crate::web`]:
//! - `POST /city-search`: generated city overview
//! - `GET /wiki`: encyclopedia article, never fails once `city` is given
//! - `GET /weather`: current weather
//! - `GET /health`: liveness probe

mod error;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::encyclopedia::{self, Encyclopedia};
use crate::generative::{TextGenerator, build_city_prompt};
use crate::models::{CityArticle, ParsedCityInfo, WeatherReport};
use crate::parser::CityInfoParser;
use crate::weather::WeatherProvider;

pub use error::ApiError;

/// Clients and parser shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
    pub encyclopedia: Arc<dyn Encyclopedia>,
    pub weather: Arc<dyn WeatherProvider>,
    pub parser: Arc<CityInfoParser>,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        encyclopedia: Arc<dyn Encyclopedia>,
        weather: Arc<dyn WeatherProvider>,
        parser: CityInfoParser,
    ) -> Self {
        Self {
            generator,
            encyclopedia,
            weather,
            parser: Arc::new(parser),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CitySearchRequest {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WikiQuery {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/city-search", post(city_search))
        .route("/wiki", get(wiki))
        .route("/weather", get(weather))
        .route("/health", get(health))
        .with_state(state)
}

/// Query parameters, with malformed query strings answered as 400 JSON
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(params)| params).map_err(|rejection| {
        warn!("Rejected query string: {}", rejection);
        ApiError::BadRequest(format!("invalid query string: {}", rejection.body_text()))
    })
}

/// Value of a required parameter, rejected when absent or blank
fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{name} is required")))
}

#[instrument(skip_all)]
async fn city_search(
    State(state): State<AppState>,
    payload: Result<Json<CitySearchRequest>, JsonRejection>,
) -> Result<Json<ParsedCityInfo>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected city search body: {}", rejection);
        ApiError::BadRequest("request body must be JSON like {\"city\": \"...\"}".to_string())
    })?;
    let city = required(request.city, "city")?;

    info!("City search for '{}'", city);
    let text = state
        .generator
        .generate(&build_city_prompt(&city))
        .await
        .map_err(|e| {
            warn!("Generating city info for '{}' failed: {}", city, e);
            ApiError::Internal("failed to get city information".to_string())
        })?;

    Ok(Json(state.parser.parse(&city, &text)))
}

#[instrument(skip_all)]
async fn wiki(
    State(state): State<AppState>,
    query: Result<Query<WikiQuery>, QueryRejection>,
) -> Result<Json<CityArticle>, ApiError> {
    let query = query_params(query)?;
    let city = required(query.city, "city")?;
    let country = query
        .country
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let article =
        encyclopedia::lookup_or_fallback(state.encyclopedia.as_ref(), &city, country.as_deref())
            .await;
    Ok(Json(article))
}

#[instrument(skip_all)]
async fn weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherReport>, ApiError> {
    let query = query_params(query)?;
    let city = required(query.city, "city")?;

    match state.weather.current_weather(&city).await {
        Ok(Some(report)) => Ok(Json(report)),
        Ok(None) => Err(ApiError::NotFound(format!("no weather for '{city}'"))),
        Err(e) => {
            warn!("Weather lookup for '{}' failed: {}", city, e);
            Err(ApiError::Internal("failed to get weather information".to_string()))
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}
