//! Creation of a fresh project tree from the vendor template.

use crate::constants::SOURCE_DIR;
use crate::error::{Error, Result};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Clears `destination`, recreates it empty and returns its canonical path.
///
/// Any previous content is removed unconditionally.
pub fn prepare_destination(destination: &Path) -> Result<PathBuf> {
    let setup_error = |source| Error::SkeletonSetupError { path: destination.to_path_buf(), source };

    if destination.is_file() {
        debug!("Removing file in place of project at {}", destination.display());
        fs::remove_file(destination).map_err(setup_error)?;
    } else if destination.exists() {
        debug!("Removing previous project at {}", destination.display());
        fs::remove_dir_all(destination).map_err(setup_error)?;
    }
    fs::create_dir_all(destination).map_err(setup_error)?;
    fs::canonicalize(destination).map_err(setup_error)
}

/// Recursively copies the contents of `source` into the existing `destination`.
pub fn copy_tree(source: &Path, destination: &Path) -> io::Result<()> {
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).map_err(io::Error::other)?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            debug!("Copying file: {}", target.display());
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Materializes a new project skeleton.
///
/// # Flow
/// 1. Clears and recreates `destination` (failures are returned before any copy)
/// 2. Copies the template tree on the blocking pool
/// 3. Adds the empty `src/` directory the build tool requires
///
/// # Returns
/// * `Result<PathBuf>` - Canonical destination path
pub async fn make_new_skeleton(template_root: &Path, destination: &Path) -> Result<PathBuf> {
    if !template_root.is_dir() {
        return Err(Error::ConfigError(format!(
            "template directory '{}' does not exist",
            template_root.display()
        )));
    }

    let destination = prepare_destination(destination)?;

    let (source, target) = (template_root.to_path_buf(), destination.clone());
    tokio::task::spawn_blocking(move || copy_tree(&source, &target))
        .await
        .map_err(io::Error::other)
        .and_then(|copied| copied)
        .map_err(|source| Error::SkeletonCopyError { path: destination.clone(), source })?;

    // Templates cannot track an empty directory, so src/ is created here.
    let src_dir = destination.join(SOURCE_DIR);
    fs::create_dir_all(&src_dir)
        .map_err(|source| Error::SkeletonCopyError { path: src_dir, source })?;

    info!("Project skeleton ready at {}", destination.display());
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_destination_clobbers() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("app");
        fs::create_dir_all(dest.join("old/deep")).unwrap();
        fs::write(dest.join("old/deep/file.txt"), "stale").unwrap();

        let resolved = prepare_destination(&dest).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(fs::read_dir(&resolved).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_destination_replaces_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("app");
        fs::write(&dest, "a file where the project goes").unwrap();

        let resolved = prepare_destination(&dest).unwrap();
        assert!(resolved.is_dir());
        assert_eq!(fs::read_dir(&resolved).unwrap().count(), 0);
    }

    #[test]
    fn test_prepare_destination_fails_on_file_parent() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a dir").unwrap();

        let err = prepare_destination(&blocker.join("app")).unwrap_err();
        assert!(matches!(err, Error::SkeletonSetupError { .. }));
    }

    #[test]
    fn test_copy_tree() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("res/values")).unwrap();
        fs::write(src.path().join("res/values/strings.xml"), "s").unwrap();
        fs::write(src.path().join("build.xml"), "b").unwrap();

        copy_tree(src.path(), dst.path()).unwrap();
        assert_eq!(fs::read_to_string(dst.path().join("res/values/strings.xml")).unwrap(), "s");
        assert_eq!(fs::read_to_string(dst.path().join("build.xml")).unwrap(), "b");
    }
}
