// ABOUTME: Error types for template engine operations
// ABOUTME: Separates parse-time syntax failures from render-time execution failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template syntax error: {0}")]
    Syntax(#[from] handlebars::TemplateError),

    #[error("template render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
