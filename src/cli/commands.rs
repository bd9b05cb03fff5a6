// ABOUTME: Command implementations for the solstice CLI
// ABOUTME: Handles execution of render and validate commands

use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

use super::config::Config;
use crate::solution::Solution;

/// Render a solution bundle into its run sequence for one namespace
pub fn render_solution(
    bundle: PathBuf,
    namespace: String,
    vars: Vec<String>,
    values_file: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
    config: &Config,
) -> Result<()> {
    info!("Rendering solution bundle: {}", bundle.display());

    let solution = Solution::open(&bundle)
        .map_err(|e| anyhow::anyhow!("Failed to open solution: {}", e))?;

    // Lowest precedence: config-file template vars; then the values file;
    // --var overrides win last
    solution.add_values(string_values(&config.template_vars));

    if let Some(path) = values_file {
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read values file '{}': {}", path.display(), e))?;
        solution.add_values(parse_values_object(&contents)?);
    }

    let cli_vars = super::Args::parse_variables(&vars)?;
    solution.add_values(string_values(&cli_vars));

    let sequence = solution
        .generate_run_sequence(&namespace)
        .map_err(|e| anyhow::anyhow!("Run sequence generation failed:\n{}", e))?;

    info!(
        "Generated {} sequence parts for namespace '{}'",
        sequence.len(),
        namespace
    );

    let serialized = if pretty {
        serde_json::to_string_pretty(&sequence)?
    } else {
        serde_json::to_string(&sequence)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &serialized).map_err(|e| {
                anyhow::anyhow!("Failed to write output file '{}': {}", path.display(), e)
            })?;
            info!("Sequence written to: {}", path.display());
        }
        None => println!("{}", serialized),
    }

    Ok(())
}

/// Validate a solution bundle; with a namespace, also render the sequence
pub fn validate_solution(
    bundle: PathBuf,
    namespace: Option<String>,
    config: &Config,
) -> Result<()> {
    info!("Validating solution bundle: {}", bundle.display());

    let solution = Solution::open(&bundle)
        .map_err(|e| anyhow::anyhow!("Solution validation failed: {}", e))?;

    println!("✓ Solution bundle '{}' is valid", bundle.display());
    println!("  Run steps: {}", solution.run_steps().len());
    println!("  Environment defaults: {}", solution.environment().len());

    let namespace = namespace.or_else(|| config.namespace.clone());
    if let Some(namespace) = namespace {
        solution.add_values(string_values(&config.template_vars));
        let sequence = solution
            .generate_run_sequence(&namespace)
            .map_err(|e| anyhow::anyhow!("Step rendering failed:\n{}", e))?;
        println!("✓ All {} steps render for namespace '{}'", sequence.len(), namespace);
    }

    info!("Solution validation completed successfully");

    Ok(())
}

fn string_values(vars: &HashMap<String, String>) -> Map<String, Value> {
    vars.iter()
        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
        .collect()
}

fn parse_values_object(contents: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(contents) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(anyhow::anyhow!("Values file must contain a JSON object")),
        Err(e) => Err(anyhow::anyhow!("Values file is not valid JSON: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values_object() {
        let map = parse_values_object(r#"{"FOO": "bar", "N": 2}"#).unwrap();
        assert_eq!(map.get("FOO"), Some(&Value::from("bar")));
        assert_eq!(map.get("N"), Some(&Value::from(2)));

        assert!(parse_values_object("[1, 2]").is_err());
        assert!(parse_values_object("{bad").is_err());
    }

    #[test]
    fn test_string_values_conversion() {
        let mut vars = HashMap::new();
        vars.insert("KEY".to_string(), "value".to_string());
        let map = string_values(&vars);
        assert_eq!(map.get("KEY"), Some(&Value::from("value")));
    }
}
