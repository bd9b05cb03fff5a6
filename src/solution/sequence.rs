// ABOUTME: Run sequence generation - per-step render loop with error aggregation
// ABOUTME: All-or-nothing delivery: any step failure discards the partial result

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use tracing::{debug, instrument, warn};

use super::compact::compact_json;
use super::error::{Result, SolutionError};
use super::selector::namespace_selector;
use super::solution::Solution;

/// Reserved environment key carrying the target namespace for one call
pub const NAMESPACE_KEY: &str = "NS";

/// Reserved environment key carrying the derived namespace selector
pub const NAMESPACE_SELECTOR_KEY: &str = "NS_SELECTOR";

/// One item of a generated run sequence. The field names are the versioned
/// serialization contract consumed by the host binding and the CLI output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencePart {
    #[serde(rename = "type")]
    pub part_type: String,

    pub config: String,
}

impl Solution {
    /// Generate the ordered run sequence for one target namespace.
    ///
    /// Builds an immutable per-call context: a snapshot of the stored
    /// environment with `NS` and `NS_SELECTOR` laid over it. The stored
    /// environment itself is never mutated here; caller-set values for the
    /// reserved keys are shadowed for this call only.
    ///
    /// Each step is read, parsed, and executed in manifest order. Failures
    /// are recorded and the loop continues; parse and execute run under one
    /// scoped lock acquisition per step so the helper registry stays
    /// consistent and the guard is released on every exit path. If any step
    /// failed, the whole partial result is discarded and a single aggregated
    /// error is returned.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn generate_run_sequence(&self, namespace: &str) -> Result<Vec<SequencePart>> {
        let mut context = self.shared.lock().env.clone();
        context.insert(NAMESPACE_KEY.to_string(), Value::from(namespace));
        context.insert(
            NAMESPACE_SELECTOR_KEY.to_string(),
            Value::from(namespace_selector(namespace)),
        );
        let context = Value::Object(context);

        let mut parts = Vec::with_capacity(self.run.len());
        let mut errors = Vec::new();

        for step in &self.run {
            let path = self.dir.join(&step.config_file);

            // File I/O stays outside the lock
            let body = match fs::read_to_string(&path) {
                Ok(body) => body,
                Err(e) => {
                    warn!(step = %step.step_type, file = %step.config_file, "read failed");
                    errors.push(format!("{}: {}", path.display(), e));
                    continue;
                }
            };

            // One scoped acquisition per step covers parse and execute; the
            // guard drops on every path out of this block.
            let rendered = {
                let mut shared = self.shared.lock();
                shared
                    .engine
                    .set_body(&body)
                    .and_then(|_| shared.engine.render(&context))
            };

            match rendered {
                Ok(text) => {
                    debug!(step = %step.step_type, file = %step.config_file, "step rendered");
                    parts.push(SequencePart {
                        part_type: step.step_type.clone(),
                        config: compact_json(&text),
                    });
                }
                Err(e) => {
                    warn!(step = %step.step_type, file = %step.config_file, "render failed");
                    errors.push(format!("{}: {}", step.config_file, e));
                }
            }
        }

        if !errors.is_empty() {
            return Err(SolutionError::Generation(errors));
        }

        Ok(parts)
    }
}
