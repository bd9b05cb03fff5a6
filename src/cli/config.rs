// ABOUTME: Configuration management for the solstice CLI
// ABOUTME: Handles loading and merging configuration from files and environment variables

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default namespace used when a command does not specify one
    #[serde(default)]
    pub namespace: Option<String>,

    /// Environment values merged into every opened solution, below any
    /// values given on the command line
    #[serde(default)]
    pub template_vars: HashMap<String, String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file path or default locations
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::find_config_file(),
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = serde_json::from_str(&contents)?;
            config.merge_env();
            Ok(config)
        } else {
            let mut config = Config::default();
            config.merge_env();
            Ok(config)
        }
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> PathBuf {
        let possible_paths = [
            PathBuf::from("solstice.config.json"),
            PathBuf::from(".solstice.config.json"),
        ];

        for path in possible_paths {
            if path.exists() {
                return path;
            }
        }

        // Default path (may not exist)
        PathBuf::from("solstice.config.json")
    }

    /// Merge environment variables into configuration
    fn merge_env(&mut self) {
        if let Ok(namespace) = std::env::var("SOLSTICE_NAMESPACE") {
            self.namespace = Some(namespace);
        }
        if let Ok(level) = std::env::var("SOLSTICE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SOLSTICE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Merge additional variables into template variables
    pub fn merge_variables(&mut self, vars: HashMap<String, String>) {
        self.template_vars.extend(vars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.namespace.is_none());
        assert!(config.template_vars.is_empty());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("solstice.config.json");

        fs::write(
            &config_path,
            r#"{
                "namespace": "staging",
                "template_vars": {"REGION": "eu-west-1"},
                "logging": {"level": "debug", "format": "compact"}
            }"#,
        )
        .unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.namespace.as_deref(), Some("staging"));
        assert_eq!(
            config.template_vars.get("REGION"),
            Some(&"eu-west-1".to_string())
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_merge_variables_overwrites() {
        let mut config = Config::default();
        config
            .template_vars
            .insert("FOO".to_string(), "file".to_string());

        let mut overrides = HashMap::new();
        overrides.insert("FOO".to_string(), "cli".to_string());
        config.merge_variables(overrides);

        assert_eq!(config.template_vars.get("FOO"), Some(&"cli".to_string()));
    }
}
