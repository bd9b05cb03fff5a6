// ABOUTME: Error types for solution open and run-sequence generation
// ABOUTME: Separates fatal open failures from the aggregated per-step generation failure

use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum SolutionError {
    #[error("cannot open solution manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest template error: {0}")]
    ManifestTemplate(#[from] TemplateError),

    #[error("manifest is not valid JSON: {0}")]
    ManifestJson(#[from] serde_json::Error),

    /// Aggregate of every per-step failure collected during one generation
    /// call, one line per failure, in step order.
    #[error("{}", .0.join("\n"))]
    Generation(Vec<String>),
}

pub type Result<T> = std::result::Result<T, SolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_joins_lines() {
        let err = SolutionError::Generation(vec![
            "first failure".to_string(),
            "second failure".to_string(),
        ]);
        assert_eq!(err.to_string(), "first failure\nsecond failure");
    }
}
