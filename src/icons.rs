//! Concurrent acquisition of launcher icons.
//!
//! One fetch is issued per manifest icon entry. All fetches run concurrently
//! and are joined into a single [`IconReport`]; a failed fetch counts as
//! finished and is recorded in the report instead of aborting the others.

use crate::androidify::ManifestTranslator;
use crate::assets::{resolve_reference, AssetLoader};
use crate::constants::ICON_FILE_NAME;
use crate::error::Error;
use futures::future::join_all;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use url::Url;

/// A single icon to acquire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRequest {
    /// Manifest size key, e.g. `"60"`.
    pub size: String,
    pub source: String,
    pub destination: PathBuf,
}

#[derive(Debug)]
pub struct IconFailure {
    pub request: IconRequest,
    pub error: Error,
}

/// Outcome of fetching every icon of a manifest.
#[derive(Debug, Default)]
pub struct IconReport {
    pub fetched: Vec<IconRequest>,
    pub failed: Vec<IconFailure>,
}

impl IconReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of fetches that finished, successfully or not.
    pub fn total(&self) -> usize {
        self.fetched.len() + self.failed.len()
    }
}

/// Destination of the launcher icon for a density bucket.
pub fn icon_destination(root: &Path, bucket: &str) -> PathBuf {
    root.join("res").join(format!("drawable-{bucket}")).join(ICON_FILE_NAME)
}

/// Builds one request per icon entry, in manifest order.
pub fn plan_icons(
    icons: &IndexMap<String, String>,
    manifest_url: &Url,
    translator: &dyn ManifestTranslator,
    root: &Path,
) -> Vec<IconRequest> {
    icons
        .iter()
        .map(|(size, reference)| IconRequest {
            size: size.clone(),
            // An unresolvable reference is handed over as-is; the loader reports it.
            source: resolve_reference(manifest_url, reference).unwrap_or_else(|_| reference.clone()),
            destination: icon_destination(root, &translator.icon_bucket(size)),
        })
        .collect()
}

/// Issues every request concurrently and waits for all of them.
///
/// Resolves immediately when `requests` is empty.
pub async fn fetch_icons(loader: &dyn AssetLoader, requests: Vec<IconRequest>) -> IconReport {
    let fetches = requests.into_iter().map(|request| async move {
        debug!("Fetching icon {} from {}", request.size, request.source);
        let outcome = loader.copy(&request.source, &request.destination).await;
        (request, outcome)
    });

    let mut report = IconReport::default();
    for (request, outcome) in join_all(fetches).await {
        match outcome {
            Ok(()) => report.fetched.push(request),
            Err(error) => {
                warn!("Icon {} could not be fetched: {}", request.size, error);
                report.failed.push(IconFailure { request, error });
            }
        }
    }

    info!("Icons fetched: {} of {}", report.fetched.len(), report.total());
    report
}
