//! Writing rendered templates and raw data into a project tree.

use crate::error::Result;
use crate::renderer::TemplateRenderer;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `content` to `path`, replacing any existing file and creating
/// parent directories as needed. The old file is deleted first.
pub fn write_file<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if path.exists() {
        fs::remove_file(path)?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content)?;
    Ok(())
}

/// Renders templates into a project rooted at `root`.
pub struct ResourceWriter<'a> {
    renderer: &'a dyn TemplateRenderer,
    root: &'a Path,
}

impl<'a> ResourceWriter<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, root: &'a Path) -> Self {
        Self { renderer, root }
    }

    /// Renders `name` and writes it to the same relative path in the project.
    pub fn render_in_place(&self, name: &str, context: &serde_json::Value) -> Result<PathBuf> {
        self.render_to(name, name, context)
    }

    /// Renders `name` and writes it to `destination`, relative to the project root.
    pub fn render_to(
        &self,
        name: &str,
        destination: &str,
        context: &serde_json::Value,
    ) -> Result<PathBuf> {
        let content = self.renderer.render(name, context)?;
        let target = self.root.join(destination);
        write_file(&target, content.as_bytes())?;
        Ok(target)
    }

    /// Serializes `value` as compact JSON at `destination`.
    pub fn write_json(&self, destination: &str, value: &serde_json::Value) -> Result<PathBuf> {
        let target = self.root.join(destination);
        write_file(&target, serde_json::to_string(value)?.as_bytes())?;
        Ok(target)
    }
}
