//! Common traits and types for the upstream media provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::Result;

/// The two kinds of media the provider can synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// File extension used when an inline payload is saved
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Image => "png",
            Self::Video => "mp4",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("Image"),
            Self::Video => f.write_str("Video"),
        }
    }
}

/// Body sent upstream for image generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,

    /// Requested dimensions, e.g. "512x512"
    pub size: String,

    /// Number of images to generate
    pub n: u32,
}

/// Body sent upstream for video generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoGenerationRequest {
    pub prompt: String,

    /// Passed through untouched; omitted when the caller gave none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
}

/// Parsed provider response. Only the `data` list is read.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub data: Vec<ProviderItem>,
}

impl ProviderResponse {
    /// Build a response from an already parsed JSON document.
    /// A missing or non-list `data` field yields no items.
    pub fn from_value(value: Value) -> Self {
        let data = match value {
            Value::Object(mut map) => match map.remove("data") {
                Some(Value::Array(items)) => items.into_iter().map(ProviderItem::from).collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self { data }
    }
}

/// One entry of the provider's `data` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderItem {
    /// Remote URL, passed through verbatim
    Url(String),
    /// Inline base64 payload to be saved locally
    Inline(String),
    /// Object carrying neither a URL nor a payload
    Empty,
    /// Anything that is not an object, rendered as a string
    Other(String),
}

impl From<Value> for ProviderItem {
    fn from(value: Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            Value::String(s) => return Self::Other(s),
            other => return Self::Other(other.to_string()),
        };

        let non_empty = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if let Some(url) = non_empty("url") {
            Self::Url(url)
        } else if let Some(b64) = non_empty("b64").or_else(|| non_empty("b64_json")) {
            Self::Inline(b64)
        } else {
            Self::Empty
        }
    }
}

/// Trait for generative media providers
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Generate images from a request
    async fn generate_images(&self, request: ImageGenerationRequest) -> Result<ProviderResponse>;

    /// Generate videos from a request
    async fn generate_videos(&self, request: VideoGenerationRequest) -> Result<ProviderResponse>;
}
