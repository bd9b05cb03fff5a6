// ABOUTME: Solution manifest data structures and JSON parsing
// ABOUTME: Defines the Manifest struct with environment defaults and ordered run steps

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::Result;

/// Fixed name of the manifest file inside a solution bundle directory
pub const MANIFEST_FILE: &str = ".solstice.json";

/// Top-level descriptor of a solution bundle: environment defaults plus
/// the ordered list of run steps. Parsed once at open time, after the
/// manifest body has been rendered as a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub env: Map<String, Value>,

    #[serde(default)]
    pub run: Vec<RunStep>,
}

/// One typed reference to a config file rendered as part of the sequence.
/// Order within the manifest defines output order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStep {
    #[serde(rename = "type")]
    pub step_type: String,

    pub config_file: String,
}

impl Manifest {
    /// Parse a manifest from rendered JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)?;
        Ok(manifest)
    }
}
