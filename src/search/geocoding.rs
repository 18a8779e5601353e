use super::types::Location;
use crate::{Error, Result, config::GeocodingConfig};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    components: Components,
}

#[derive(Debug, Default, Deserialize)]
struct Components {
    city: Option<String>,
    town: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

/// Reverse geocoding through OpenCage.
pub struct OpenCageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenCageClient {
    /// `None` when no API key is configured.
    pub fn from_config(config: GeocodingConfig) -> Option<Self> {
        let api_key = config.api_key.filter(|key| !key.is_empty())?;
        Some(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            api_key,
        })
    }
}

#[async_trait]
impl Geocoder for OpenCageClient {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Location> {
        debug!("Reverse geocoding {},{}", latitude, longitude);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", format!("{},{}", latitude, longitude)),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::geocoding(format!(
                "Error getting location details: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response.json().await?;
        let components = body
            .results
            .into_iter()
            .next()
            .map(|result| result.components)
            .ok_or_else(|| Error::not_found("Location not found"))?;

        Ok(Location {
            city: components.city.or(components.town).or(components.state),
            country: components.country,
        })
    }
}
