use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::core::config::Settings;
use crate::db::models::StoredPhoto;

/// Uploaded photo blobs, kept flat in the cache directory under generated names.
#[derive(Debug, Clone)]
pub(crate) struct StorageService {
    root: PathBuf,
}

impl StorageService {
    pub(crate) async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::open(settings.cache_dir()).await
    }

    pub(crate) async fn open(dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        let root = tokio::fs::canonicalize(dir).await?;
        Ok(Self { root })
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Writes the bytes under a fresh random name. The client's filename never reaches disk.
    pub(crate) async fn upload_bytes(
        &self,
        content_type: Option<String>,
        bytes: &[u8],
    ) -> io::Result<StoredPhoto> {
        let filename = Uuid::new_v4().simple().to_string();
        tokio::fs::write(self.path_for(&filename), bytes).await?;

        Ok(StoredPhoto {
            filename,
            content_type,
            size: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(bytes)),
        })
    }

    pub(crate) async fn exists(&self, filename: &str) -> bool {
        tokio::fs::try_exists(self.path_for(filename)).await.unwrap_or(false)
    }

    pub(crate) async fn read(&self, filename: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(filename)).await
    }

    /// Best effort; a blob that cannot be removed is only logged.
    pub(crate) async fn remove(&self, filename: &str) {
        match tokio::fs::remove_file(self.path_for(filename)).await {
            Ok(()) => tracing::debug!(filename, "Removed photo blob"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, filename, "Failed to remove photo blob");
            }
        }
    }

    pub(crate) async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.root).await.map(|meta| meta.is_dir()).unwrap_or(false)
    }
}
