// ABOUTME: Main library module for the solstice solution renderer
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod ffi;
pub mod solution;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use solution::{
    compact_json, namespace_selector, Manifest, RunStep, SequencePart, Solution, SolutionError,
};
pub use template::{TemplateEngine, TemplateError};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
