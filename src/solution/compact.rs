// ABOUTME: Config compactor - strips non-semantic formatting from JSON text
// ABOUTME: Degrades silently on unparsable input instead of raising an error

use serde_json::Value;

/// Minify JSON text: parse and re-serialize compactly, preserving key order.
///
/// Input that does not parse as JSON is returned unchanged. This silent
/// degradation is intentionally asymmetric with the generator's
/// aggregate-and-fail policy for read/parse/execute failures; a step that
/// renders non-JSON still produces output, just uncompacted.
pub fn compact_json(input: &str) -> String {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|_| input.to_string()),
        Err(_) => input.to_string(),
    }
}
