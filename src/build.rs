//! Invoking the external build tool on a populated project.

use crate::constants::{OUTPUT_DIR, PROJECT_PROPERTIES_TEMPLATE};
use crate::error::{Error, Result};
use crate::process::{CommandRunner, Invocation};
use crate::renderer::TemplateRenderer;
use crate::resources::ResourceWriter;
use crate::sanitize::sanitize;
use crate::signing::SigningConfig;
use log::{error, info};
use std::path::{Component, Path, PathBuf};

/// Path of `to` relative to the directory `from`. Both must be absolute.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut relative: PathBuf = from[common..].iter().map(|_| Component::ParentDir).collect();
    relative.extend(&to[common..]);
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    relative
}

/// Expected location of the release package for an application name.
pub fn package_path(root: &Path, app_name: &str, extension: &str) -> PathBuf {
    root.join(OUTPUT_DIR).join(format!("{}-release.{}", sanitize(app_name), extension))
}

/// Renders the build configuration and runs the build tool in a project.
pub struct BuildInvoker<'a> {
    pub renderer: &'a dyn TemplateRenderer,
    pub runner: &'a dyn CommandRunner,
    pub signing: &'a SigningConfig,
    pub command: &'a [String],
    pub package_extension: &'a str,
}

impl BuildInvoker<'_> {
    pub fn properties_context(
        &self,
        root: &Path,
        library_project: &Path,
        keystore: &Path,
    ) -> serde_json::Value {
        serde_json::json!({
            "library_project": relative_path(root, library_project).to_string_lossy(),
            "keystore": keystore.to_string_lossy(),
            "keystore_password": self.signing.store_password,
            "alias": self.signing.alias,
            "alias_password": self.signing.alias_password,
        })
    }

    /// Builds the project at `root` and returns the package path.
    ///
    /// # Errors
    /// * `Error::BuildError` when the build tool cannot be started or exits
    ///   unsuccessfully; it carries the path the package was expected at
    pub async fn build(
        &self,
        root: &Path,
        library_project: &Path,
        keystore: &Path,
        app_name: &str,
    ) -> Result<PathBuf> {
        ResourceWriter::new(self.renderer, root).render_in_place(
            PROJECT_PROPERTIES_TEMPLATE,
            &self.properties_context(root, library_project, keystore),
        )?;

        let invocation = Invocation::from_command(self.command)?.in_dir(root);
        info!("Building {} with '{invocation}'", root.display());
        let package_path = package_path(root, app_name, self.package_extension);
        let output = match self.runner.run(&invocation).await {
            Ok(output) => output,
            Err(e) => {
                error!("Build tool '{invocation}' could not be started: {e}");
                return Err(Error::BuildError {
                    package_path,
                    status: "failed to start".to_string(),
                    stderr: e.to_string(),
                });
            }
        };

        if !output.success {
            error!("Build of {} failed with {}", root.display(), output.status());
            error!("{}", output.stderr);
            return Err(Error::BuildError {
                package_path,
                status: output.status(),
                stderr: output.stderr,
            });
        }

        info!("Package built at {}", package_path.display());
        Ok(package_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/tmp/build/app"), Path::new("/opt/factory/library")),
            PathBuf::from("../../../opt/factory/library")
        );
        assert_eq!(
            relative_path(Path::new("/srv/app"), Path::new("/srv/app/lib")),
            PathBuf::from("lib")
        );
        assert_eq!(relative_path(Path::new("/srv/app"), Path::new("/srv")), PathBuf::from(".."));
        assert_eq!(relative_path(Path::new("/srv/app"), Path::new("/srv/app")), PathBuf::from("."));
    }

    #[test]
    fn test_package_path_uses_sanitized_name() {
        assert_eq!(
            package_path(Path::new("/srv/app"), "My App!", "apk"),
            PathBuf::from("/srv/app/bin/MyApp-release.apk")
        );
    }
}
