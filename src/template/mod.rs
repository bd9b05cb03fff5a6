// ABOUTME: Template module for solstice
// ABOUTME: Exports the shared engine wrapper, built-in helpers, and template errors

pub mod engine;
pub mod error;
pub mod helpers;

pub use engine::TemplateEngine;
pub use error::TemplateError;
