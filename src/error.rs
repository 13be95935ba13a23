//! Error handling for apk-factory.
//! Defines the crate-wide error type and the result alias used by every stage
//! of the materialization and build pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while creating or building an Android project.
///
/// Setup failures are returned before any work is done; every later stage
/// reports its failure through the `Err` of the awaited operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur during template loading or rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}.")]
    UrlError(#[from] url::ParseError),

    /// Represents errors in the configuration file or command line overrides
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The manifest or manifest URL cannot be used, or the project has no manifest yet
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    /// The destination directory could not be cleared or recreated.
    #[error("Failed to prepare destination '{}': {source}.", path.display())]
    SkeletonSetupError { path: PathBuf, source: io::Error },

    /// Copying the project template into the destination failed.
    #[error("Failed to copy template into '{}': {source}.", path.display())]
    SkeletonCopyError { path: PathBuf, source: io::Error },

    #[error("Failed to fetch asset '{source_ref}': {reason}.")]
    AssetError { source_ref: String, reason: String },

    /// A subprocess could not be started at all.
    #[error("Failed to run '{command}': {source}.")]
    ProcessError { command: String, source: io::Error },

    /// The key generation command exited unsuccessfully.
    #[error("Key generation for '{hostname}' failed: {stderr}")]
    KeyGenerationError { hostname: String, stderr: String },

    /// The build tool exited unsuccessfully. `package_path` is where the
    /// package would have been written.
    #[error("Build failed ({status}), expected package at '{}': {stderr}", package_path.display())]
    BuildError { package_path: PathBuf, status: String, stderr: String },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
