// ABOUTME: Solution aggregate - open lifecycle, environment setters, helper registration
// ABOUTME: Owns the run list, the base directory, and the lock-guarded shared state

use handlebars::HelperDef;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{Result, SolutionError};
use super::manifest::{Manifest, RunStep, MANIFEST_FILE};
use crate::template::TemplateEngine;

/// The mutable pair guarded by the solution lock. Every read or write of
/// either field happens under the lock as one critical section per operation.
#[derive(Debug)]
pub(super) struct Shared {
    pub(super) env: Map<String, Value>,
    pub(super) engine: TemplateEngine,
}

/// One opened solution bundle. The run list and base directory are immutable
/// after open; the environment and the helper registry mutate through the
/// explicit setters for the lifetime of the solution.
#[derive(Debug)]
pub struct Solution {
    pub(super) dir: PathBuf,
    pub(super) run: Vec<RunStep>,
    pub(super) shared: Mutex<Shared>,
}

impl Solution {
    /// Open a solution bundle from a directory.
    ///
    /// Reads the fixed-named manifest, renders it as a template against an
    /// empty context (the manifest must not depend on runtime variables),
    /// then parses the result as JSON. Any failure aborts the whole open;
    /// no partially-initialized solution is returned.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let manifest_path = dir.join(MANIFEST_FILE);

        let content = fs::read_to_string(&manifest_path).map_err(|source| {
            SolutionError::ManifestRead {
                path: manifest_path.clone(),
                source,
            }
        })?;

        let mut engine = TemplateEngine::new();
        let rendered = engine.render_body(&content, &json!({}))?;
        let manifest = Manifest::from_json(&rendered)?;

        info!(
            dir = %dir.display(),
            steps = manifest.run.len(),
            "opened solution bundle"
        );

        Ok(Self {
            dir,
            run: manifest.run,
            shared: Mutex::new(Shared {
                env: manifest.env,
                engine,
            }),
        })
    }

    /// Set a single environment value, overwriting any existing entry.
    /// Values are opaque JSON; no shape validation.
    pub fn set_value(&self, key: &str, value: Value) {
        debug!(key, "set environment value");
        let mut shared = self.shared.lock();
        shared.env.insert(key.to_string(), value);
    }

    /// Bulk-merge environment values, overwriting on conflict. Last applied
    /// value wins in map iteration order.
    pub fn add_values(&self, values: Map<String, Value>) {
        debug!(count = values.len(), "merge environment values");
        let mut shared = self.shared.lock();
        shared.env.extend(values);
    }

    /// Register a helper function with the shared engine, replacing any
    /// existing helper of the same name. Visible to every subsequent
    /// parse/execute; never retroactive.
    pub fn set_template_function(&self, name: &str, function: Box<dyn HelperDef + Send + Sync>) {
        debug!(name, "register template function");
        let mut shared = self.shared.lock();
        shared.engine.register_helper(name, function);
    }

    /// Bulk-register helper functions, replacing by name
    pub fn add_template_functions<I>(&self, functions: I)
    where
        I: IntoIterator<Item = (String, Box<dyn HelperDef + Send + Sync>)>,
    {
        let mut shared = self.shared.lock();
        for (name, function) in functions {
            debug!(name = %name, "register template function");
            shared.engine.register_helper(&name, function);
        }
    }

    /// Base directory the bundle was opened from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The ordered run-step list from the manifest
    pub fn run_steps(&self) -> &[RunStep] {
        &self.run
    }

    /// Snapshot of the current environment
    pub fn environment(&self) -> Map<String, Value> {
        self.shared.lock().env.clone()
    }
}
