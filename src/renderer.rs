//! Named-template rendering for project files.
//! Templates are looked up in the vendor project template first and in the
//! internal utility templates second.
use crate::error::{Error, Result};
use log::debug;
use minijinja::{path_loader, Environment};
use std::path::Path;

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Renders the template called `name` with the given context.
    ///
    /// # Arguments
    /// * `name` - Template path relative to a search root, `/` separated
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template text
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String>;
}

/// Quotes a value for safe interpolation into a POSIX shell command.
fn shell_escape(value: String) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// MiniJinja-based renderer bound to two search roots.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer searching `template_root` before `util_root`.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(template_root: P, util_root: Q) -> Self {
        let vendor = path_loader(template_root.as_ref());
        let util = path_loader(util_root.as_ref());

        let mut env = Environment::new();
        env.set_loader(move |name| match vendor(name)? {
            Some(source) => Ok(Some(source)),
            None => util(name),
        });
        env.add_filter("shell_escape", shell_escape);
        Self { env }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a named template using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template is found in neither root,
    ///   fails to parse, or fails to render
    fn render(&self, name: &str, context: &serde_json::Value) -> Result<String> {
        debug!("Rendering template '{name}'");
        let tmpl = self.env.get_template(name).map_err(Error::MinijinjaError)?;
        tmpl.render(context).map_err(Error::MinijinjaError)
    }
}
