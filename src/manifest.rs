//! The web application manifest as consumed by the factory.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Developer {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// How the web application is delivered to the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    #[default]
    Hosted,
    Packaged,
}

/// Typed view of a manifest. The verbatim JSON is kept alongside so it can be
/// shipped inside the package unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
    /// Icon source references keyed by size, in manifest order.
    #[serde(default)]
    pub icons: IndexMap<String, String>,
    pub default_locale: Option<String>,
    #[serde(default)]
    pub locales: IndexMap<String, Map<String, Value>>,
    #[serde(default)]
    pub permissions: IndexMap<String, Value>,
    pub developer: Option<Developer>,
    #[serde(skip)]
    raw: Value,
}

impl Manifest {
    /// Parses a manifest from JSON. The value must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::ManifestError("a JSON object manifest is required".to_string()));
        }
        let mut manifest: Manifest = serde_json::from_value(value.clone())?;
        manifest.raw = value;
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(content)?)
    }

    /// The manifest exactly as it was supplied.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Strings shared by every locale: `name` and `description`.
    pub fn strings(&self) -> Map<String, Value> {
        let mut strings = Map::new();
        strings.insert("name".to_string(), Value::String(self.name.clone()));
        strings.insert(
            "description".to_string(),
            Value::String(self.description.clone().unwrap_or_default()),
        );
        strings
    }

    /// Base strings overlaid with the entries of `locale`, if the manifest has it.
    pub fn localized_strings(&self, locale: &str) -> Map<String, Value> {
        let mut strings = self.strings();
        if let Some(overrides) = self.locales.get(locale) {
            for (key, value) in overrides {
                strings.insert(key.clone(), value.clone());
            }
        }
        strings
    }
}

/// Reads a manifest from a local JSON file.
pub fn load_manifest_file<P: AsRef<Path>>(path: P) -> Result<Manifest> {
    let path = path.as_ref();
    debug!("Loading manifest from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Manifest::parse(&content)
}

/// Retrieves a manifest from its URL. `file://` URLs are read from disk.
pub async fn fetch_manifest(manifest_url: &Url) -> Result<Manifest> {
    if manifest_url.scheme() == "file" {
        let path = manifest_url.to_file_path().map_err(|_| {
            Error::ManifestError(format!("'{manifest_url}' is not a local file path"))
        })?;
        return load_manifest_file(path);
    }

    debug!("Downloading manifest from {manifest_url}");
    let response = reqwest::get(manifest_url.as_str())
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::ManifestError(format!("failed to download manifest: {e}")))?;
    let content = response
        .text()
        .await
        .map_err(|e| Error::ManifestError(format!("failed to read manifest: {e}")))?;
    Manifest::parse(&content)
}
