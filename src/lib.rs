//! Media Relay
//!
//! A small backend-for-frontend that forwards image and video generation
//! prompts to a hosted provider, stores inline results on disk and serves
//! them back to the client.

pub mod api;
pub mod config;
pub mod error;
pub mod provider;
pub mod response;

pub use error::{AppError, Result};

use std::sync::Arc;

use provider::{HttpProvider, MediaProvider};
use response::{file::AssetStore, ResponseHandler};

/// Application state shared across all handlers
pub struct AppState {
    pub settings: Arc<config::Settings>,
    pub provider: Arc<dyn MediaProvider>,
    pub assets: Arc<AssetStore>,
    pub response_handler: Arc<ResponseHandler>,
}

impl AppState {
    /// Build state around an existing provider
    pub fn new(settings: config::Settings, provider: Arc<dyn MediaProvider>) -> Self {
        let assets = Arc::new(AssetStore::new(&settings.storage.output_dir));
        let response_handler = Arc::new(ResponseHandler::new(assets.clone()));

        Self {
            settings: Arc::new(settings),
            provider,
            assets,
            response_handler,
        }
    }

    /// Build state with the HTTP provider described by the settings
    pub fn from_settings(settings: config::Settings) -> Result<Self> {
        let provider = Arc::new(HttpProvider::new(&settings.provider)?);
        Ok(Self::new(settings, provider))
    }
}
