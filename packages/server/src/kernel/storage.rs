//! Local filesystem storage for house images.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::BaseImageStorage;
use crate::domains::houses::models::ImageUpload;

/// Stores images content-addressed under a base directory.
///
/// References look like `avatars/<sha256>.<ext>`, so uploading the same file
/// twice yields the same reference.
pub struct LocalImageStorage {
    base_dir: PathBuf,
}

impl LocalImageStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn file_name(upload: &ImageUpload) -> String {
        let digest = Sha256::digest(&upload.bytes);
        format!("{}.{}", hex::encode(digest), upload.extension())
    }
}

#[async_trait]
impl BaseImageStorage for LocalImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<String> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.base_dir.display()))?;

        let file_name = Self::file_name(upload);
        let path = self.base_dir.join(&file_name);
        tokio::fs::write(&path, &upload.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("Stored house image at {}", path.display());
        Ok(format!("avatars/{}", file_name))
    }
}
