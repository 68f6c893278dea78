//! Response handling module - base64 payloads, the asset store and output normalization

pub mod base64;
pub mod file;

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::provider::traits::{MediaKind, ProviderItem};
use file::{asset_ref, AssetStore};

/// Turns provider items into the output strings returned to the client
pub struct ResponseHandler {
    store: Arc<AssetStore>,
}

impl ResponseHandler {
    /// Create a new response handler
    pub fn new(store: Arc<AssetStore>) -> Self {
        Self { store }
    }

    /// Process a single item. Returns `None` for entries that carry no output.
    pub async fn process(&self, item: ProviderItem, kind: MediaKind) -> Result<Option<String>> {
        match item {
            ProviderItem::Url(url) => Ok(Some(url)),
            ProviderItem::Inline(b64_data) => {
                let filename = self.store.save_base64(&b64_data, kind).await?;
                Ok(Some(asset_ref(&filename)))
            }
            ProviderItem::Other(text) => Ok(Some(text)),
            ProviderItem::Empty => {
                debug!(kind = %kind, "Skipping provider entry without url or payload");
                Ok(None)
            }
        }
    }

    /// Process items in order. The first failed save fails the whole batch.
    pub async fn process_batch(&self, items: Vec<ProviderItem>, kind: MediaKind) -> Result<Vec<String>> {
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            if let Some(output) = self.process(item, kind).await? {
                results.push(output);
            }
        }

        Ok(results)
    }
}
