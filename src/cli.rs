//! Command-line interface implementation for apk-factory.
//! Provides argument parsing and help text formatting using clap.

use crate::config::FactoryConfig;
use crate::manifest::AppType;
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for apk-factory.
#[derive(Parser, Debug)]
#[command(author, version, about = "apk-factory: build an Android package from a web app manifest", long_about = None)]
pub struct Args {
    /// URL of the web app manifest
    #[arg(value_name = "MANIFEST_URL")]
    pub manifest_url: String,

    /// Directory where the Android project is generated and built
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Read the manifest from this file instead of downloading it
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Configuration file (defaults to apk-factory.{json,yml,yaml} in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Vendor Android project template directory
    #[arg(long, value_name = "DIR")]
    pub template: Option<PathBuf>,

    /// Internal utility templates directory
    #[arg(long, value_name = "DIR")]
    pub util_templates: Option<PathBuf>,

    /// Directory holding one signing key per hostname
    #[arg(short, long, value_name = "DIR")]
    pub key_dir: Option<PathBuf>,

    /// How the application is delivered
    #[arg(long, value_enum, default_value_t = AppType::Hosted)]
    pub app_type: AppType,

    /// Only generate the project, do not sign and build it
    #[arg(long)]
    pub skip_build: bool,

    /// Remove the project directory after a successful build
    #[arg(long, conflicts_with = "skip_build")]
    pub cleanup: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies the path overrides given on the command line to `config`.
    pub fn apply_overrides(&self, config: &mut FactoryConfig) {
        if let Some(template) = &self.template {
            config.template_dir = template.clone();
        }
        if let Some(util) = &self.util_templates {
            config.util_template_dir = util.clone();
        }
        if let Some(key_dir) = &self.key_dir {
            config.key_dir = key_dir.clone();
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
