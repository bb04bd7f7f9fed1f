//! Configuration
//!
//! Layered configuration: built-in defaults, the global config file, then
//! `HYPERGRAPH__*` environment variables. CLI flags are applied on top by the
//! caller.

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HypergraphConfig {
    /// Engine environment directory; `None` means `~/.hypergraph`
    #[serde(default)]
    pub env: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}
