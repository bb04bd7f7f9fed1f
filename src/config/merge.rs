//! MergeService: orchestrates sources and deserializes to HypergraphConfig.

use crate::config::sources::{environment, global_file};
use crate::config::HypergraphConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<HypergraphConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<HypergraphConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = HypergraphConfig::default();
    Config::builder()
        .set_default("logging.enabled", defaults.logging.enabled)?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.format", defaults.logging.format)?
        .set_default("logging.output", defaults.logging.output)?
        .set_default("logging.color", defaults.logging.color)
}
