//! Adapters - Connections between the domain and the outside world.
//!
//! - `decision_file` - YAML / JSON decision files read by the CLI

pub mod decision_file;

pub use decision_file::{DecisionFile, DecisionFileError, DecisionFileFormat};
