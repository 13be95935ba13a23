//! Signing identities: one key file per manifest hostname, created on first
//! use and never overwritten.
//!
//! Key generation is serialized per hostname inside one process through the
//! locks held by [`KeyStore`]. Two factory processes must not share a key
//! directory.

use crate::constants::{
    DEFAULT_ALIAS, DEFAULT_ALIAS_PASSWORD, DEFAULT_STORE_PASSWORD, KEYGEN_TEMPLATE,
    UNKNOWN_COUNTRY, UNKNOWN_SUBJECT,
};
use crate::error::{Error, Result};
use crate::manifest::Developer;
use crate::process::{CommandRunner, Invocation};
use crate::renderer::TemplateRenderer;
use log::{debug, error, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

/// Keystore credentials shared by every generated key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    pub store_password: String,
    pub alias: String,
    pub alias_password: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            store_password: DEFAULT_STORE_PASSWORD.to_string(),
            alias: DEFAULT_ALIAS.to_string(),
            alias_password: DEFAULT_ALIAS_PASSWORD.to_string(),
        }
    }
}

/// Handle on the directory holding per-hostname key files. Clones share
/// the same locks. The directory is made absolute on creation since the
/// build tool reads key paths from inside the project.
#[derive(Debug, Clone)]
pub struct KeyStore {
    dir: PathBuf,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl KeyStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        let dir = std::path::absolute(&dir).unwrap_or(dir);
        Self { dir, locks: Arc::default() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the key file for `hostname`.
    pub fn key_path(&self, hostname: &str) -> PathBuf {
        self.dir.join(hostname)
    }

    fn lock_for(&self, hostname: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(hostname.to_string()).or_default().clone()
    }
}

/// Hostname component of a manifest URL, which names its signing key.
pub fn key_hostname(manifest_url: &Url) -> Result<String> {
    manifest_url
        .host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::ManifestError(format!("manifest URL '{manifest_url}' has no hostname")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    /// The key file was already present.
    Existing,
    /// The key was generated by this call.
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    pub path: PathBuf,
    pub status: KeyStatus,
}

/// Creates missing signing keys with the external key generation tool.
pub struct KeyProvisioner<'a> {
    pub renderer: &'a dyn TemplateRenderer,
    pub runner: &'a dyn CommandRunner,
    pub signing: &'a SigningConfig,
}

impl KeyProvisioner<'_> {
    /// Template data for the key generation command.
    pub fn keygen_context(
        &self,
        keystore: &Path,
        hostname: &str,
        developer: Option<&Developer>,
    ) -> serde_json::Value {
        let developer = developer.cloned().unwrap_or_default();
        serde_json::json!({
            "keystore": keystore.to_string_lossy(),
            "store_password": self.signing.store_password,
            "alias": self.signing.alias,
            "alias_password": self.signing.alias_password,
            "common_name": developer.name.unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
            "organization_unit": developer.url.unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
            "organization": hostname,
            "city": UNKNOWN_SUBJECT,
            "state": UNKNOWN_SUBJECT,
            "country_code": UNKNOWN_COUNTRY,
        })
    }

    /// Returns the key for `hostname`, generating it first if it does not exist.
    ///
    /// # Errors
    /// * `Error::KeyGenerationError` if the key generation command fails
    /// * rendering and spawn errors are passed through
    pub async fn ensure_key(
        &self,
        store: &KeyStore,
        hostname: &str,
        developer: Option<&Developer>,
    ) -> Result<SigningKey> {
        let path = store.key_path(hostname);
        let lock = store.lock_for(hostname);
        let _guard = lock.lock().await;

        if path.exists() {
            debug!("Reusing signing key {}", path.display());
            return Ok(SigningKey { path, status: KeyStatus::Existing });
        }

        tokio::fs::create_dir_all(store.dir()).await?;
        let script = self
            .renderer
            .render(KEYGEN_TEMPLATE, &self.keygen_context(&path, hostname, developer))?;
        let output = self.runner.run(&Invocation::shell(script)).await?;

        if !output.success {
            error!("Key generation for '{hostname}' failed with {}", output.status());
            error!("{}", output.stderr);
            return Err(Error::KeyGenerationError {
                hostname: hostname.to_string(),
                stderr: output.stderr,
            });
        }

        info!("Generated signing key {}", path.display());
        Ok(SigningKey { path, status: KeyStatus::Generated })
    }
}
