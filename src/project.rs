//! Project materialization and build orchestration.
//!
//! A [`Project`] owns one destination directory. [`Project::create`]
//! populates it from a manifest, [`Project::build`] may then be called any
//! number of times, and [`Project::cleanup`] removes the directory.

use crate::androidify::{Androidifier, ManifestTranslator};
use crate::assets::AssetLoader;
use crate::build::BuildInvoker;
use crate::config::FactoryConfig;
use crate::constants::{
    ANDROID_MANIFEST_TEMPLATE, BUILD_FILE_TEMPLATE, RAW_MANIFEST_PATH, STRINGS_TEMPLATE,
};
use crate::error::{Error, Result};
use crate::icons::{fetch_icons, plan_icons, IconReport};
use crate::locale::{localized_strings_path, normalize_locale, LocaleStrings};
use crate::manifest::{AppType, Manifest};
use crate::process::{CommandRunner, SystemRunner};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::resources::ResourceWriter;
use crate::sanitize::sanitize_value;
use crate::signing::{key_hostname, KeyProvisioner, KeyStore, SigningConfig};
use crate::skeleton::make_new_skeleton;
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Values rendered into `AndroidManifest.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestProperties {
    pub version: Option<String>,
    pub version_code: u32,
    pub manifest_url: String,
    pub app_type: AppType,
    pub permissions: Vec<String>,
    pub package_name: String,
}

/// Result of a completed [`Project::create`].
#[derive(Debug)]
pub struct Created {
    pub properties: ManifestProperties,
    pub icons: IconReport,
}

pub struct Project {
    template_root: PathBuf,
    destination: PathBuf,
    library_project: PathBuf,
    renderer: Box<dyn TemplateRenderer>,
    loader: Arc<dyn AssetLoader>,
    translator: Box<dyn ManifestTranslator>,
    runner: Arc<dyn CommandRunner>,
    signing: SigningConfig,
    build_command: Vec<String>,
    package_extension: String,
    locale_strings: LocaleStrings,
    manifest_url: Option<Url>,
    manifest: Option<Manifest>,
}

impl Project {
    /// Creates a project building into `destination` with the settings of `config`.
    ///
    /// Nothing is written until [`Project::create`] runs.
    pub fn new<P: AsRef<Path>>(
        config: &FactoryConfig,
        destination: P,
        loader: Arc<dyn AssetLoader>,
    ) -> Result<Self> {
        let template_root = std::path::absolute(&config.template_dir)?;
        let util_root = std::path::absolute(&config.util_template_dir)?;
        Ok(Self {
            renderer: Box::new(MiniJinjaRenderer::new(&template_root, &util_root)),
            library_project: std::path::absolute(config.library_project())?,
            destination: std::path::absolute(destination.as_ref())?,
            template_root,
            loader,
            translator: Box::new(Androidifier),
            runner: Arc::new(SystemRunner),
            signing: config.signing.clone(),
            build_command: config.build_command.clone(),
            package_extension: config.package_extension.clone(),
            locale_strings: config.locale_strings,
            manifest_url: None,
            manifest: None,
        })
    }

    /// Replaces the process runner used for key generation and builds.
    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_translator(mut self, translator: Box<dyn ManifestTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// Project root. Canonical once [`Project::create`] has succeeded.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    fn manifest_properties(
        &self,
        url: &Url,
        manifest: &Manifest,
        app_type: AppType,
    ) -> ManifestProperties {
        ManifestProperties {
            version: manifest.version.clone(),
            version_code: self.translator.version_code(manifest.version.as_deref()),
            manifest_url: url.to_string(),
            app_type,
            permissions: self.translator.permissions(&manifest.permissions),
            package_name: self.translator.package_name(url),
        }
    }

    /// Writes the default strings file and, when enabled, one per locale.
    fn write_strings(&self, writer: &ResourceWriter<'_>, manifest: &Manifest) -> Result<()> {
        let Some(default_locale) = &manifest.default_locale else {
            writer.render_in_place(STRINGS_TEMPLATE, &manifest.strings().into())?;
            return Ok(());
        };

        for locale in manifest.locales.keys() {
            match (normalize_locale(locale), self.locale_strings) {
                (Some(qualifier), LocaleStrings::PerLocale) => {
                    writer.render_to(
                        STRINGS_TEMPLATE,
                        &localized_strings_path(&qualifier),
                        &manifest.localized_strings(locale).into(),
                    )?;
                }
                (qualifier, _) => {
                    debug!("No separate strings for locale '{locale}' (qualifier {qualifier:?})");
                }
            }
        }

        writer.render_in_place(
            STRINGS_TEMPLATE,
            &manifest.localized_strings(default_locale).into(),
        )?;
        Ok(())
    }

    /// Populates the destination from `manifest`.
    ///
    /// # Flow
    /// 1. Recreates the project skeleton from the template
    /// 2. Renders `AndroidManifest.xml`, the strings files and `build.xml`
    /// 3. Stores the raw manifest
    /// 4. Fetches every icon concurrently
    ///
    /// Resolves once every icon fetch has finished. Icon failures are
    /// reported in [`Created::icons`] and do not fail the call.
    ///
    /// # Errors
    /// * `Error::ManifestError` / `Error::UrlError` for an unusable manifest URL
    /// * `Error::SkeletonSetupError` if the destination cannot be recreated
    /// * `Error::SkeletonCopyError` if the template copy fails
    /// * template and I/O errors while writing resources
    pub async fn create(
        &mut self,
        manifest_url: &str,
        manifest: Manifest,
        app_type: AppType,
    ) -> Result<Created> {
        let url = Url::parse(manifest_url)?;
        key_hostname(&url)?;

        self.destination = make_new_skeleton(&self.template_root, &self.destination).await?;

        let properties = self.manifest_properties(&url, &manifest, app_type);
        {
            let writer = ResourceWriter::new(&*self.renderer, &self.destination);
            writer.render_in_place(ANDROID_MANIFEST_TEMPLATE, &serde_json::to_value(&properties)?)?;
            self.write_strings(&writer, &manifest)?;
            writer.render_in_place(BUILD_FILE_TEMPLATE, &sanitize_value(&manifest.strings().into()))?;
            writer.write_json(RAW_MANIFEST_PATH, manifest.raw())?;
        }
        info!("Project resources written for {}", properties.package_name);

        let requests = plan_icons(&manifest.icons, &url, &*self.translator, &self.destination);
        let icons = fetch_icons(&*self.loader, requests).await;

        self.manifest_url = Some(url);
        self.manifest = Some(manifest);
        Ok(Created { properties, icons })
    }

    /// Signs and builds the project, returning the package path.
    ///
    /// The signing key for the manifest's hostname is generated first when
    /// `keys` has none. A failed key generation ends the build before the
    /// build tool runs.
    ///
    /// # Errors
    /// * `Error::ManifestError` if [`Project::create`] has not succeeded
    /// * `Error::KeyGenerationError` if the key could not be generated
    /// * `Error::BuildError` if the build tool fails
    pub async fn build(&self, keys: &KeyStore) -> Result<PathBuf> {
        let (Some(url), Some(manifest)) = (&self.manifest_url, &self.manifest) else {
            return Err(Error::ManifestError("project has not been created".to_string()));
        };
        let hostname = key_hostname(url)?;

        let key = KeyProvisioner {
            renderer: &*self.renderer,
            runner: &*self.runner,
            signing: &self.signing,
        }
        .ensure_key(keys, &hostname, manifest.developer.as_ref())
        .await?;

        BuildInvoker {
            renderer: &*self.renderer,
            runner: &*self.runner,
            signing: &self.signing,
            command: &self.build_command,
            package_extension: &self.package_extension,
        }
        .build(&self.destination, &self.library_project, &key.path, &manifest.name)
        .await
    }

    /// Deletes the destination tree.
    pub fn cleanup(&self) -> Result<()> {
        if self.destination.exists() {
            debug!("Removing project at {}", self.destination.display());
            std::fs::remove_dir_all(&self.destination)?;
        }
        Ok(())
    }
}
