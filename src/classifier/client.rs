use super::{
    preprocess::normalize_image,
    types::{LabelScore, Prediction, top_label},
};
use crate::{Error, Result, config::ClassifierConfig};
use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, info};

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<Prediction>;

    async fn classify_path(&self, path: &Path) -> Result<Prediction> {
        let bytes = tokio::fs::read(path).await?;
        self.classify(&bytes).await
    }
}

/// Image classification through a hosted inference endpoint.
///
/// Built once at startup; the HTTP client and endpoint are reused for every
/// request instead of reloading the model per upload.
pub struct HostedClassifier {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
    model: String,
}

impl HostedClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let endpoint = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        info!("Image classifier bound to {}", endpoint);

        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_token: config.api_token,
            model: config.model,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Classifier for HostedClassifier {
    async fn classify(&self, image: &[u8]) -> Result<Prediction> {
        let png = normalize_image(image)?;
        debug!("Posting {} byte image to {}", png.len(), self.endpoint);

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "image/png")
            .body(png);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::classifier(format!(
                "inference endpoint returned {}: {}",
                status, body
            )));
        }

        let scores: Vec<LabelScore> = response.json().await?;
        let prediction = top_label(&scores)
            .ok_or_else(|| Error::classifier("inference endpoint returned no labels"))?;

        info!(
            "Model {} predicted {} ({:.3})",
            self.model, prediction.label, prediction.score
        );
        Ok(prediction)
    }
}
