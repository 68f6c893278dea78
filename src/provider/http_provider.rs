//! HTTP provider client implementation

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::error::{AppError, Result};
use crate::provider::traits::{
    ImageGenerationRequest, MediaKind, MediaProvider, ProviderResponse, VideoGenerationRequest,
};

const USER_AGENT: &str = concat!("media-relay/", env!("CARGO_PKG_VERSION"));

/// Provider reached over plain HTTPS with a `Key` authorization header
pub struct HttpProvider {
    name: String,
    client: Client,
    api_key: String,
    image_endpoint: String,
    video_endpoint: String,
    image_timeout: Duration,
    video_timeout: Duration,
}

impl HttpProvider {
    /// Create a new HTTP provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: "fal".to_string(),
            client,
            api_key: config.api_key().to_string(),
            image_endpoint: config.image_endpoint.clone(),
            video_endpoint: config.video_endpoint.clone(),
            image_timeout: config.image_timeout(),
            video_timeout: config.video_timeout(),
        })
    }

    fn endpoint(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.image_endpoint,
            MediaKind::Video => &self.video_endpoint,
        }
    }

    fn timeout(&self, kind: MediaKind) -> Duration {
        match kind {
            MediaKind::Image => self.image_timeout,
            MediaKind::Video => self.video_timeout,
        }
    }

    /// POST a body to the endpoint for `kind` and parse the reply.
    /// Transport failures and timeouts surface as `AppError::HttpClient`.
    async fn submit<T: Serialize + Sync>(&self, kind: MediaKind, body: &T) -> Result<ProviderResponse> {
        let endpoint = self.endpoint(kind);

        debug!(provider = %self.name, endpoint = %endpoint, kind = %kind, "Sending generate request");

        let response = self
            .client
            .post(endpoint)
            .header(AUTHORIZATION, format!("Key {}", self.api_key))
            .header(ACCEPT, "application/json")
            .timeout(self.timeout(kind))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(
                provider = %self.name,
                kind = %kind,
                status = status.as_u16(),
                "Provider returned an error status"
            );
            return Err(AppError::Provider {
                kind,
                status: status.as_u16(),
                body: text,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            warn!(provider = %self.name, kind = %kind, error = %e, "Invalid JSON from provider");
            AppError::InvalidJson {
                kind,
                details: e.to_string(),
            }
        })?;

        let parsed = ProviderResponse::from_value(value);
        debug!(provider = %self.name, kind = %kind, items = parsed.data.len(), "Provider responded");

        Ok(parsed)
    }
}

#[async_trait]
impl MediaProvider for HttpProvider {
    async fn generate_images(&self, request: ImageGenerationRequest) -> Result<ProviderResponse> {
        self.submit(MediaKind::Image, &request).await
    }

    async fn generate_videos(&self, request: VideoGenerationRequest) -> Result<ProviderResponse> {
        self.submit(MediaKind::Video, &request).await
    }
}
