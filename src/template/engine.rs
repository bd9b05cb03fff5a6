// ABOUTME: Shared template engine wrapping a Handlebars registry
// ABOUTME: Re-parses a single named root template per render while helper registrations persist

use handlebars::{Handlebars, HelperDef};
use serde_json::Value as JsonValue;

use super::error::Result;
use super::helpers;

/// Name of the single root template slot. Every parse (the manifest at open
/// time, each step body during generation) replaces this slot; the helper
/// registry persists across replacements.
const ROOT_TEMPLATE: &str = "solution";

#[derive(Clone, Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new engine with the built-in helper set registered
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        // Output is JSON config text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        helpers::register_builtins(&mut handlebars);

        Self { handlebars }
    }

    /// Parse a new body into the root template slot, keeping all registered
    /// helpers visible to it
    pub fn set_body(&mut self, body: &str) -> Result<()> {
        self.handlebars
            .register_template_string(ROOT_TEMPLATE, body)?;
        Ok(())
    }

    /// Execute the current root template against a substitution context
    pub fn render(&self, context: &JsonValue) -> Result<String> {
        let rendered = self.handlebars.render(ROOT_TEMPLATE, context)?;
        Ok(rendered)
    }

    /// Parse and execute in one call
    pub fn render_body(&mut self, body: &str, context: &JsonValue) -> Result<String> {
        self.set_body(body)?;
        self.render(context)
    }

    /// Register a helper function, replacing any existing helper of the
    /// same name. The registry only grows for the lifetime of the engine.
    pub fn register_helper(&mut self, name: &str, helper: Box<dyn HelperDef + Send + Sync>) {
        self.handlebars.register_helper(name, helper);
    }

    /// Check template syntax without touching the root slot
    pub fn validate_body(body: &str) -> Result<()> {
        handlebars::Template::compile(body)?;
        Ok(())
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
