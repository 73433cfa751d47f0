//! Document templates rendered with Handlebars.
//!
//! Two templates are registered at construction:
//!
//! - `preview`: the runnable document (import map, styles, mount script)
//! - `status`: a static page for the welcome, no-entry and compile-error
//!   states
//!
//! Strict mode is on, so a context missing a field the template uses is an
//! error rather than an empty string.

use crate::error::{PreviewError, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Name of the runnable document template.
pub const PREVIEW_TEMPLATE: &str = "preview";

/// Name of the static status page template.
pub const STATUS_TEMPLATE: &str = "status";

/// Template engine for preview documents.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with the built-in document templates.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Template` if a built-in template does not
    /// parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use uigen_preview::template_engine::TemplateEngine;
    ///
    /// let engine = TemplateEngine::new().unwrap();
    /// ```
    pub fn new() -> Result<Self> {
        let mut engine = Self {
            handlebars: Handlebars::new(),
        };
        engine.handlebars.set_strict_mode(true);

        engine.register_template_string(
            PREVIEW_TEMPLATE,
            include_str!("../templates/preview.html.hbs"),
        )?;
        engine.register_template_string(
            STATUS_TEMPLATE,
            include_str!("../templates/status.html.hbs"),
        )?;

        Ok(engine)
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Template` if the template is unknown, the
    /// context is missing a field, or rendering fails.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| PreviewError::Template {
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers an additional template, replacing any with the same name.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::Template` if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| PreviewError::Template {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }
}
