//! Asset store: the flat directory holding generated media

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::provider::traits::MediaKind;
use crate::response::base64;

/// Public path prefix under which stored files are served
pub const URL_PREFIX: &str = "/output";

/// Extensions the library listing recognizes
pub const LIBRARY_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "mp4", "gif"];

const ID_LEN: usize = 10;

/// Directory-backed store for generated files. The filename is the only key.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Create a new store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the storage directory exists
    pub async fn ensure_storage_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).await.map_err(AppError::Io)?;
            debug!(path = ?self.root, "Created storage directory");
        }
        Ok(())
    }

    /// Decode a base64 payload and save it, returning the new filename
    pub async fn save_base64(&self, b64_data: &str, kind: MediaKind) -> Result<String> {
        let data = base64::decode(b64_data)?;
        self.save_raw(&data, kind.extension()).await
    }

    /// Save raw bytes under a fresh random name, returning the filename
    pub async fn save_raw(&self, data: &[u8], extension: &str) -> Result<String> {
        self.ensure_storage_dir().await?;

        let filename = format!("{}.{}", generate_id(), extension);
        let file_path = self.get_path(&filename);

        fs::write(&file_path, data).await.map_err(AppError::Io)?;

        debug!(path = ?file_path, size = data.len(), "Saved media file");

        Ok(filename)
    }

    /// List stored files with a recognized media extension.
    /// A missing directory is treated as empty. Order is whatever the filesystem yields.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::Io(e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(AppError::Io)? {
            if let Some(name) = entry.file_name().to_str() {
                if is_media_file(name) {
                    files.push(name.to_string());
                }
            }
        }

        Ok(files)
    }

    /// Get the full path for a filename
    pub fn get_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

/// External reference for a stored file
pub fn asset_ref(filename: &str) -> String {
    format!("{}/{}", URL_PREFIX, filename)
}

/// Whether a filename ends with one of the library extensions (case-insensitive)
pub fn is_media_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    LIBRARY_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Ten lowercase hex characters from a v4 UUID
fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}
