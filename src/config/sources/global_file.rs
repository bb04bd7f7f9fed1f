//! Global config file source: `<config dir>/hypergraph/config.toml`, optional.

use crate::config::paths;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match paths::global_config_file() {
        Some(path) => Ok(builder.add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(false),
        )),
        None => {
            tracing::debug!("No platform config directory; skipping global config file");
            Ok(builder)
        }
    }
}
