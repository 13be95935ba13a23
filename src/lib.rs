//! apk-factory turns a web application manifest into a signed Android package.
//! It materializes an Android project from a template, renders its manifest,
//! string resources and build files, fetches launcher icons, provisions a
//! signing key per origin and runs the external build tool.

/// Translation of manifest fields into Android values
pub mod androidify;

/// Copying or downloading icons and other assets
pub mod assets;

/// External build tool invocation
pub mod build;

/// Command-line interface module for the apk-factory binary
pub mod cli;

/// Factory configuration
/// Supports JSON and YAML formats (apk-factory.json, apk-factory.yml, apk-factory.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling
pub mod error;

/// Concurrent launcher icon acquisition
pub mod icons;

/// Locale key normalization
pub mod locale;

/// Logger initialization
pub mod logger;

/// Web application manifest model
pub mod manifest;

/// External process execution
pub mod process;

/// Project creation and build orchestration
/// Combines all components into the create / build / cleanup lifecycle
pub mod project;

/// Template rendering against the vendor and utility template roots
pub mod renderer;

/// Writing rendered resources into a project
pub mod resources;

/// Cleaning of manifest values for paths and build files
pub mod sanitize;

/// Per-hostname signing key provisioning
pub mod signing;

/// Project skeleton creation
pub mod skeleton;
