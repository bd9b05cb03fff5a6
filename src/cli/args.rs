// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for solstice

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "solstice")]
#[command(about = "Renders deployable solution bundles from templated JSON configuration")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a solution bundle into its run sequence
    Render {
        #[arg(help = "Path to the solution bundle directory")]
        bundle: PathBuf,

        #[arg(short, long, help = "Target namespace for the rendered sequence")]
        namespace: String,

        #[arg(
            short = 'V',
            long = "var",
            help = "Override environment values (key=value)"
        )]
        vars: Vec<String>,

        #[arg(long, help = "JSON file with environment values to merge")]
        values: Option<PathBuf>,

        #[arg(short, long, help = "Write the sequence to a file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Pretty-print the output sequence")]
        pretty: bool,
    },

    /// Validate a solution bundle without emitting output
    Validate {
        #[arg(help = "Path to the solution bundle directory")]
        bundle: PathBuf,

        #[arg(short, long, help = "Also render the sequence for this namespace")]
        namespace: Option<String>,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(
        vars: &[String],
    ) -> anyhow::Result<std::collections::HashMap<String, String>> {
        let mut variables = std::collections::HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid variable format '{}'. Expected 'key=value'",
                    var
                ));
            }
        }

        Ok(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables() {
        let vars = vec![
            "FOO=bar".to_string(),
            "REPLICAS=3".to_string(),
            "IMAGE=registry/app:1.0".to_string(),
        ];

        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(parsed.get("FOO"), Some(&"bar".to_string()));
        assert_eq!(parsed.get("REPLICAS"), Some(&"3".to_string()));
        assert_eq!(parsed.get("IMAGE"), Some(&"registry/app:1.0".to_string()));
    }

    #[test]
    fn test_parse_variables_invalid() {
        let vars = vec!["invalid_format".to_string()];
        let result = Args::parse_variables(&vars);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_variables_value_may_contain_equals() {
        let vars = vec!["SELECTOR=app=frontend".to_string()];
        let parsed = Args::parse_variables(&vars).unwrap();
        assert_eq!(parsed.get("SELECTOR"), Some(&"app=frontend".to_string()));
    }
}
