//! Encyclopedia lookup
//!
//! [`WikipediaClient`] fetches the page summary of a city from the
//! Wikipedia REST API. Callers go through [`lookup_or_fallback`], which
//! never fails: misses and upstream errors fall back to the built-in
//! [`mock`] articles.

pub mod mock;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::EncyclopediaConfig;
use crate::models::{ArticleSource, CityArticle};
use crate::{Result, TravelError};

pub use mock::{fallback_article, mock_article, template_article};

/// Source of city articles
#[async_trait]
pub trait Encyclopedia: Send + Sync {
    /// Article for `city`; `Ok(None)` when the encyclopedia has no page.
    async fn lookup(&self, city: &str, country: Option<&str>) -> Result<Option<CityArticle>>;
}

/// Page summary as returned by `/page/summary/{title}`
#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: PageUrl,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: String,
}

impl PageSummary {
    fn is_not_found(&self) -> bool {
        self.kind.ends_with("not_found")
    }

    fn into_article(self, city: &str, country: Option<&str>) -> CityArticle {
        CityArticle {
            city: city.to_string(),
            country: country.unwrap_or_default().trim().to_string(),
            title: self.title,
            summary: self.extract,
            description: self.description.unwrap_or_default(),
            thumbnail: self.thumbnail.map(|t| t.source).unwrap_or_default(),
            url: self.content_urls.map(|u| u.desktop.page).unwrap_or_default(),
            source: ArticleSource::Wikipedia,
        }
    }
}

/// Wikipedia REST API client
pub struct WikipediaClient {
    client: Client,
    base_url: String,
}

impl WikipediaClient {
    /// Create a new client
    pub fn new(config: &EncyclopediaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TravelMaker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TravelError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Encyclopedia for WikipediaClient {
    #[instrument(skip(self))]
    async fn lookup(&self, city: &str, country: Option<&str>) -> Result<Option<CityArticle>> {
        let title = city.trim().replace(' ', "_");
        let url = format!(
            "{}/page/summary/{}",
            self.base_url,
            urlencoding::encode(&title)
        );
        debug!("Encyclopedia request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TravelError::api(format!("Encyclopedia request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!("No encyclopedia page for '{}'", city);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TravelError::api(format!(
                "Encyclopedia API returned {status}"
            )));
        }

        let summary: PageSummary = response.json().await.map_err(|e| {
            TravelError::parse(format!("Failed to parse encyclopedia response: {e}"))
        })?;

        if summary.is_not_found() || summary.extract.trim().is_empty() {
            info!("Encyclopedia page for '{}' is missing or empty", city);
            return Ok(None);
        }

        Ok(Some(summary.into_article(city, country)))
    }
}

/// Look up `city`, absorbing every miss and failure into the built-in
/// fallback articles.
pub async fn lookup_or_fallback(
    encyclopedia: &dyn Encyclopedia,
    city: &str,
    country: Option<&str>,
) -> CityArticle {
    match encyclopedia.lookup(city, country).await {
        Ok(Some(article)) => article,
        Ok(None) => {
            debug!("Using fallback article for '{}'", city);
            fallback_article(city, country)
        }
        Err(e) => {
            warn!("Encyclopedia lookup for '{}' failed, using fallback: {}", city, e);
            fallback_article(city, country)
        }
    }
}
