use super::types::{SearchQuery, SearchResponse};
use crate::{Error, Result, config::SearchConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Raw JSON body of the search API's answer.
    async fn search_raw(&self, query: &SearchQuery) -> Result<Value>;

    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let raw = self.search_raw(query).await?;
        Ok(serde_json::from_value(raw)?)
    }

    fn has_api_key(&self) -> bool;
}

/// Client for the Serper web search API.
pub struct SerperClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SerperClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            api_key: config.api_key,
        }
    }
}

#[async_trait]
impl SearchApi for SerperClient {
    async fn search_raw(&self, query: &SearchQuery) -> Result<Value> {
        debug!("Search query: {}", query.q);

        let response = self
            .http
            .post(&self.base_url)
            .header("X-API-KEY", &self.api_key)
            .json(query)
            .send()
            .await
            .map_err(|e| {
                error!("Search API request failed: {}", e);
                Error::search(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Search API returned {}", status);
            return Err(Error::search(format!("search API returned {}", status)));
        }

        Ok(response.json().await?)
    }

    fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
