//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format, and
//! destination come from config, overridden by `HYPERGRAPH_LOG*` environment
//! variables and CLI flags.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// EnvFilter directives, e.g. `warn` or `warn,hypergraph::dispatch=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means the state dir
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

// stdout carries command output
fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Logging settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct LoggingOverrides {
    pub verbose: bool,
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Apply CLI overrides; `--verbose` without `--log-level` means debug.
    pub fn with_overrides(mut self, overrides: &LoggingOverrides) -> Self {
        if let Some(level) = &overrides.level {
            self.level = level.clone();
        } else if overrides.verbose {
            self.level = "debug".to_string();
        }
        if let Some(format) = &overrides.format {
            self.format = format.clone();
        }
        if let Some(output) = &overrides.output {
            self.output = output.clone();
        }
        if overrides.file.is_some() {
            self.file = overrides.file.clone();
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CliError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Destinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

impl FromStr for Destinations {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stdout, stderr, file) = match s {
            "stdout" => (true, false, false),
            "stderr" => (false, true, false),
            "file" => (false, false, true),
            "file+stderr" => (false, true, true),
            "both" => (true, true, false),
            other => {
                return Err(CliError::Config(format!(
                    "Invalid log output: {} (must be stdout, stderr, file, file+stderr, or both)",
                    other
                )))
            }
        };
        Ok(Destinations {
            stdout,
            stderr,
            file,
        })
    }
}

/// `HYPERGRAPH_LOG*` value when set and non-empty, otherwise `configured`.
fn env_or(var: &str, configured: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Log file path: `HYPERGRAPH_LOG_FILE`, then the configured path (CLI
/// `--log-file` is already merged into it), then the platform state dir.
pub fn resolve_log_file_path(configured: Option<&Path>) -> Result<PathBuf, CliError> {
    if let Some(path) = std::env::var_os("HYPERGRAPH_LOG_FILE").filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = configured.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path.to_path_buf());
    }
    let state_dir = crate::config::paths::state_dir().ok_or_else(|| {
        CliError::Config("Platform state directory not available for log file".to_string())
    })?;
    Ok(state_dir.join("hypergraph.log"))
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (`HYPERGRAPH_LOG`, `HYPERGRAPH_LOG_FORMAT`,
///    `HYPERGRAPH_LOG_OUTPUT`, `HYPERGRAPH_LOG_FILE`)
/// 2. CLI arguments (already merged into `config`)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let installed = if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
    } else {
        let filter = EnvFilter::try_new(env_or("HYPERGRAPH_LOG", &config.level))
            .map_err(|e| CliError::Config(format!("Invalid log level: {}", e)))?;
        let format: LogFormat = env_or("HYPERGRAPH_LOG_FORMAT", &config.format).parse()?;
        let destinations: Destinations = env_or("HYPERGRAPH_LOG_OUTPUT", &config.output).parse()?;
        let writer = make_writer(destinations, config.file.as_deref())?;
        let use_color = config.color && !destinations.file;

        let registry = Registry::default().with(filter);
        match format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(writer),
                )
                .try_init(),
            LogFormat::Text => registry
                .with(
                    fmt::layer()
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(use_color)
                        .with_writer(writer),
                )
                .try_init(),
        }
    };
    installed.map_err(|e| CliError::Config(format!("Failed to install logger: {}", e)))
}

fn make_writer(destinations: Destinations, file: Option<&Path>) -> Result<BoxMakeWriter, CliError> {
    let writer = match destinations {
        Destinations { file: true, stderr, .. } => {
            let file = open_log_file(&resolve_log_file_path(file)?)?;
            if stderr {
                BoxMakeWriter::new(file.and(std::io::stderr))
            } else {
                BoxMakeWriter::new(file)
            }
        }
        Destinations {
            stdout: true,
            stderr: true,
            ..
        } => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        Destinations { stdout: true, .. } => BoxMakeWriter::new(std::io::stdout),
        _ => BoxMakeWriter::new(std::io::stderr),
    };
    Ok(writer)
}

fn open_log_file(path: &Path) -> Result<Arc<File>, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CliError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::Config(format!("Failed to open log file {}: {}", path.display(), e)))?;
    Ok(Arc::new(file))
}
