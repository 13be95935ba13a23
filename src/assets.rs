//! Copying or downloading resources into a project.

use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};
use url::Url;

/// Capability for acquiring a resource at `destination`.
///
/// Each call resolves exactly once, with success or with the reason the
/// resource could not be acquired.
#[async_trait]
pub trait AssetLoader: Send + Sync {
    async fn copy(&self, source: &str, destination: &Path) -> Result<()>;
}

/// Fetches `http(s)` URLs with `reqwest` and copies everything else from disk.
#[derive(Debug, Clone, Default)]
pub struct DefaultAssetLoader {
    client: reqwest::Client,
}

impl DefaultAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let asset_error = |e: reqwest::Error| Error::AssetError {
            source_ref: url.to_string(),
            reason: e.to_string(),
        };
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(asset_error)?;
        Ok(response.bytes().await.map_err(asset_error)?.to_vec())
    }
}

fn local_path(source: &str) -> Result<PathBuf> {
    match Url::parse(source) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|_| Error::AssetError {
            source_ref: source.to_string(),
            reason: "not a local file path".to_string(),
        }),
        Ok(url) => Err(Error::AssetError {
            source_ref: source.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(_) => Ok(PathBuf::from(source)),
    }
}

#[async_trait]
impl AssetLoader for DefaultAssetLoader {
    async fn copy(&self, source: &str, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                debug!("Downloading {source} to {}", destination.display());
                let bytes = self.download(&url).await?;
                tokio::fs::write(destination, bytes).await?;
            }
            _ => {
                let path = local_path(source)?;
                debug!("Copying {} to {}", path.display(), destination.display());
                tokio::fs::copy(&path, destination).await.map_err(|e| Error::AssetError {
                    source_ref: source.to_string(),
                    reason: e.to_string(),
                })?;
            }
        }
        Ok(())
    }
}

/// Resolves an icon reference against the manifest URL. Absolute references
/// are returned unchanged.
pub fn resolve_reference(manifest_url: &Url, reference: &str) -> Result<String> {
    match Url::parse(reference) {
        Ok(url) => Ok(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(manifest_url.join(reference)?.into()),
        Err(e) => Err(e.into()),
    }
}
