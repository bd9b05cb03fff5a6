// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a builder for writing solution bundles into temp directories

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use solstice::solution::MANIFEST_FILE;

/// Builds a solution bundle on disk: a manifest plus step config files
pub struct SolutionBundleBuilder {
    env: Map<String, Value>,
    steps: Vec<(String, String)>,
    files: Vec<(String, String)>,
    raw_manifest: Option<String>,
}

impl SolutionBundleBuilder {
    pub fn new() -> Self {
        Self {
            env: Map::new(),
            steps: Vec::new(),
            files: Vec::new(),
            raw_manifest: None,
        }
    }

    pub fn with_env(mut self, key: &str, value: Value) -> Self {
        self.env.insert(key.to_string(), value);
        self
    }

    /// Add a run step and write its config file with the given body
    pub fn add_step(mut self, step_type: &str, config_file: &str, body: &str) -> Self {
        self.steps
            .push((step_type.to_string(), config_file.to_string()));
        self.files
            .push((config_file.to_string(), body.to_string()));
        self
    }

    /// Add a run step whose config file is never written to disk
    pub fn add_missing_step(mut self, step_type: &str, config_file: &str) -> Self {
        self.steps
            .push((step_type.to_string(), config_file.to_string()));
        self
    }

    /// Replace the generated manifest with verbatim text
    pub fn with_raw_manifest(mut self, manifest: &str) -> Self {
        self.raw_manifest = Some(manifest.to_string());
        self
    }

    pub fn build(self) -> TestBundle {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let manifest = match self.raw_manifest {
            Some(raw) => raw,
            None => {
                let run: Vec<Value> = self
                    .steps
                    .iter()
                    .map(|(step_type, config_file)| {
                        json!({"type": step_type, "config_file": config_file})
                    })
                    .collect();
                serde_json::to_string_pretty(&json!({"env": self.env, "run": run}))
                    .expect("Failed to serialize manifest")
            }
        };

        fs::write(temp_dir.path().join(MANIFEST_FILE), manifest)
            .expect("Failed to write manifest");

        for (name, body) in &self.files {
            let path = temp_dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("Failed to create step directory");
            }
            fs::write(path, body).expect("Failed to write step file");
        }

        TestBundle { temp_dir }
    }
}

impl Default for SolutionBundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TestBundle {
    pub temp_dir: TempDir,
}

impl TestBundle {
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

/// A bundle with one deploy step referencing FOO and NS, mirroring the
/// canonical render example
pub fn basic_bundle() -> TestBundle {
    SolutionBundleBuilder::new()
        .with_env("FOO", json!("bar"))
        .add_step("deploy", "deploy.json", r#"{"value": "{{FOO}}-{{NS}}"}"#)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_writes_manifest_and_steps() {
        let bundle = SolutionBundleBuilder::new()
            .with_env("KEY", json!("value"))
            .add_step("deploy", "deploy.json", "{}")
            .build();

        assert!(bundle.file(MANIFEST_FILE).exists());
        assert!(bundle.file("deploy.json").exists());

        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(bundle.file(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(manifest["env"]["KEY"], "value");
        assert_eq!(manifest["run"][0]["type"], "deploy");
    }

    #[test]
    fn test_missing_step_has_no_file() {
        let bundle = SolutionBundleBuilder::new()
            .add_missing_step("deploy", "ghost.json")
            .build();
        assert!(!bundle.file("ghost.json").exists());
    }
}
