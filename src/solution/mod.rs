// ABOUTME: Solution module - the templated-configuration engine core
// ABOUTME: Exports the Solution aggregate, manifest types, sequence generator, and compactor

pub mod compact;
pub mod error;
pub mod manifest;
pub mod selector;
pub mod sequence;
#[allow(clippy::module_inception)]
pub mod solution;

pub use compact::compact_json;
pub use error::SolutionError;
pub use manifest::{Manifest, RunStep, MANIFEST_FILE};
pub use selector::namespace_selector;
pub use sequence::{SequencePart, NAMESPACE_KEY, NAMESPACE_SELECTOR_KEY};
pub use solution::Solution;
