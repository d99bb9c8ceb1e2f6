use std::sync::Arc;

use anyhow::{Context, Result};
use travelmaker::{
    AppConfig, AppState, CityInfoParser, OpenAiClient, OpenMeteoClient, WikipediaClient, logging,
    web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    if config.generative.api_key.is_none() {
        tracing::warn!("No generative API key configured; city search will answer with 500");
    }

    let parser = CityInfoParser::new(&config.parser).context("Failed to build city-info parser")?;
    let state = AppState::new(
        Arc::new(OpenAiClient::new(&config.generative)?),
        Arc::new(WikipediaClient::new(&config.encyclopedia)?),
        Arc::new(OpenMeteoClient::new(&config.weather)?),
        parser,
    );

    tracing::info!("Starting TravelMaker {}", travelmaker::VERSION);
    web::run(&config.server, state).await
}
