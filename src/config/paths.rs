//! Default locations for the environment directory and config file.

use crate::error::CliError;
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Name of the default environment directory under the home directory.
pub const DEFAULT_ENV_DIR: &str = ".hypergraph";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "hypergraph", "hypergraph")
}

/// `~/.hypergraph`
pub fn default_env_dir() -> Result<PathBuf, CliError> {
    let base = BaseDirs::new().ok_or_else(|| {
        CliError::Config("Could not determine home directory for environment".to_string())
    })?;
    Ok(base.home_dir().join(DEFAULT_ENV_DIR))
}

/// `<platform config dir>/config.toml`, e.g. `~/.config/hypergraph/config.toml`
pub fn global_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Platform state directory for log files, when the platform has one.
pub fn state_dir() -> Option<PathBuf> {
    project_dirs().and_then(|dirs| dirs.state_dir().map(|p| p.to_path_buf()))
}

/// Environment directory with precedence: CLI flag, config file, default.
pub fn resolve_env_dir(
    cli_env: Option<PathBuf>,
    config_env: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    if let Some(p) = cli_env {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Some(p) = config_env {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    default_env_dir()
}
