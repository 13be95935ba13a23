//! apk-factory's application entry point.
//! Parses the command line, loads configuration and the manifest, then
//! drives project creation and the signed build.

use std::sync::Arc;

use apk_factory::{
    assets::DefaultAssetLoader,
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, Result},
    logger::init_logger,
    manifest::{fetch_manifest, load_manifest_file},
    project::Project,
    signing::KeyStore,
};
use log::warn;
use url::Url;

#[tokio::main]
async fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args).await {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads configuration and applies command line overrides
/// 2. Reads or downloads the manifest
/// 3. Creates the project and reports icons that could not be fetched
/// 4. Signs and builds the package unless `--skip-build`
/// 5. Removes the project when `--cleanup` is given
async fn run(args: Args) -> Result<()> {
    let mut config = get_config(std::env::current_dir()?, args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let manifest = match &args.manifest {
        Some(path) => load_manifest_file(path)?,
        None => fetch_manifest(&Url::parse(&args.manifest_url)?).await?,
    };

    let mut project = Project::new(&config, &args.output_dir, Arc::new(DefaultAssetLoader::new()))?;
    let created = project.create(&args.manifest_url, manifest, args.app_type).await?;
    for failure in &created.icons.failed {
        warn!("Missing icon {}: {}", failure.request.size, failure.error);
    }
    println!(
        "Project for '{}' generated in {}.",
        created.properties.package_name,
        project.destination().display()
    );

    if args.skip_build {
        return Ok(());
    }

    let keys = KeyStore::new(&config.key_dir);
    let package = project.build(&keys).await?;
    println!("Package built: {}", package.display());

    if args.cleanup {
        project.cleanup()?;
    }
    Ok(())
}
