//! Configuration handling for apk-factory.
//! Settings come from an optional `apk-factory.{json,yml,yaml}` file and can be
//! overridden from the command line.

use crate::constants::{
    CONFIG_FILES, DEFAULT_BUILD_COMMAND, DEFAULT_KEY_DIR, DEFAULT_PACKAGE_EXTENSION,
    DEFAULT_TEMPLATE_DIR, DEFAULT_UTIL_TEMPLATE_DIR,
};
use crate::error::{Error, Result};
use crate::locale::LocaleStrings;
use crate::signing::SigningConfig;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Factory settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    /// Vendor Android project template.
    pub template_dir: PathBuf,
    /// Internal utility templates (key generation script).
    pub util_template_dir: PathBuf,
    /// Library project referenced from `project.properties`. Defaults to the
    /// template directory.
    pub library_project: Option<PathBuf>,
    /// Directory holding one signing key per hostname.
    pub key_dir: PathBuf,
    pub build_command: Vec<String>,
    pub package_extension: String,
    pub signing: SigningConfig,
    pub locale_strings: LocaleStrings,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            util_template_dir: PathBuf::from(DEFAULT_UTIL_TEMPLATE_DIR),
            library_project: None,
            key_dir: PathBuf::from(DEFAULT_KEY_DIR),
            build_command: DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect(),
            package_extension: DEFAULT_PACKAGE_EXTENSION.to_string(),
            signing: SigningConfig::default(),
            locale_strings: LocaleStrings::default(),
        }
    }
}

impl FactoryConfig {
    pub fn library_project(&self) -> &Path {
        self.library_project.as_deref().unwrap_or(&self.template_dir)
    }
}

/// Loads the first configuration file found in `dir`.
///
/// # Returns
/// * `Result<Option<String>>` - File contents, or `None` when no file exists
pub fn find_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> Result<FactoryConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Reads the configuration from `explicit` if given, otherwise from a
/// configuration file in `dir`, otherwise returns the defaults.
pub fn get_config<P: AsRef<Path>>(dir: P, explicit: Option<&Path>) -> Result<FactoryConfig> {
    let content = match explicit {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read '{}': {e}", path.display()))
        })?),
        None => find_config(dir, &CONFIG_FILES)?,
    };
    match content {
        Some(content) => parse_config(&content),
        None => Ok(FactoryConfig::default()),
    }
}
