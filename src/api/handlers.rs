//! HTTP handlers for generation, library and health routes

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer, Serialize,
};
use serde_json::Value;
use tracing::info;

use crate::api::extract::CallerId;
use crate::error::{AppError, Result};
use crate::provider::traits::{ImageGenerationRequest, MediaKind, VideoGenerationRequest};
use crate::response::file::asset_ref;
use crate::AppState;

pub const DEFAULT_SIZE: &str = "512x512";
pub const DEFAULT_COUNT: u32 = 1;
pub const HEALTH_MESSAGE: &str = "Media relay running";

/// Body of `POST /api/generate`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateImageBody {
    pub prompt: Option<String>,
    pub size: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub count: Option<u32>,
}

/// Body of `POST /api/generate-video`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateVideoBody {
    pub prompt: Option<String>,
    pub duration: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    pub images: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateVideoResponse {
    pub videos: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LibraryResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Image generation
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    CallerId(caller): CallerId,
    body: Bytes,
) -> Result<Json<GenerateImageResponse>> {
    if let Some(user_id) = &caller {
        info!(user_id = %user_id, "Image request from user");
    }

    let body: GenerateImageBody = parse_body(&body)?;
    let prompt = require_prompt(body.prompt)?;

    let request = ImageGenerationRequest {
        prompt,
        size: body.size.unwrap_or_else(|| DEFAULT_SIZE.to_string()),
        n: body.count.unwrap_or(DEFAULT_COUNT),
    };

    info!(
        endpoint = %state.settings.provider.image_endpoint,
        n = request.n,
        "Requesting images from provider"
    );

    let response = state.provider.generate_images(request).await?;
    let images = state
        .response_handler
        .process_batch(response.data, MediaKind::Image)
        .await?;

    Ok(Json(GenerateImageResponse { images }))
}

/// Video generation
pub async fn generate_video(
    State(state): State<Arc<AppState>>,
    CallerId(caller): CallerId,
    body: Bytes,
) -> Result<Json<GenerateVideoResponse>> {
    if let Some(user_id) = &caller {
        info!(user_id = %user_id, "Video request from user");
    }

    let body: GenerateVideoBody = parse_body(&body)?;
    let prompt = require_prompt(body.prompt)?;

    let request = VideoGenerationRequest {
        prompt,
        duration: body.duration.filter(is_truthy),
    };

    info!(
        endpoint = %state.settings.provider.video_endpoint,
        "Requesting videos from provider"
    );

    let response = state.provider.generate_videos(request).await?;
    let videos = state
        .response_handler
        .process_batch(response.data, MediaKind::Video)
        .await?;

    Ok(Json(GenerateVideoResponse { videos }))
}

/// List every stored media file
pub async fn library(State(state): State<Arc<AppState>>) -> Result<Json<LibraryResponse>> {
    let files = state
        .assets
        .list()
        .await?
        .iter()
        .map(|name| asset_ref(name))
        .collect();

    Ok(Json(LibraryResponse { files }))
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: HEALTH_MESSAGE.to_string(),
    })
}

/// Parse a JSON body. An empty body or a literal `null` counts as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidRequest(e.to_string()))?;
    if value.is_null() {
        return Ok(T::default());
    }

    serde_json::from_value(value).map_err(|e| AppError::InvalidRequest(e.to_string()))
}

/// Accepts `2`, `2.0` (truncated) and `"2"`. Null counts as absent.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    let count = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(int), _) => u32::try_from(int).ok(),
            (None, Some(float)) if (0.0..=u32::MAX as f64).contains(&float) => {
                Some(float.trunc() as u32)
            }
            _ => None,
        },
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        Some(_) => None,
    };

    count
        .map(Some)
        .ok_or_else(|| de::Error::custom("count must be a non-negative integer"))
}

fn require_prompt(prompt: Option<String>) -> Result<String> {
    prompt.filter(|p| !p.is_empty()).ok_or(AppError::MissingPrompt)
}

/// JSON truthiness: null, false, zero and empty strings or containers are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
