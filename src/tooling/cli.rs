//! CLI Tooling
//!
//! Command-line surface of hypergraph: positional `<action> [<inputs>...]`
//! plus flags. Parsing here only builds an `Invocation`; everything else is
//! the dispatcher's job.

use crate::config::{paths, ConfigLoader, HypergraphConfig};
use crate::dispatch::{dispatch, Invocation, InvocationFlags};
use crate::engine::LocalEngine;
use crate::error::CliError;
use crate::logging::{LoggingConfig, LoggingOverrides};
use crate::prompt::Prompt;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Hypergraph CLI - manage p2p commons modules
#[derive(Parser, Debug)]
#[command(name = "hypergraph", version)]
#[command(about = "Create, read, update, and list p2p commons modules")]
#[command(after_help = "Actions:
  create [type]               Create a content module or your profile
  read [hash] [key]           Print a module's metadata, or a single key
  update [hash] [key] [value] Update title, description, or main
  list [type]                 List content modules or profiles
  register [content] [profile] Register content to your profile

Run without arguments for interactive mode.")]
pub struct Cli {
    /// Action followed by its inputs
    #[arg(value_name = "ACTION")]
    pub input: Vec<String>,

    /// Custom environment directory (defaults to ~/.hypergraph)
    #[arg(short, long)]
    pub env: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Module title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Profile name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Module description (bare flag means empty)
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    pub description: Option<String>,

    /// Wikidata subtype identifier of content
    #[arg(short, long)]
    pub subtype: Option<String>,

    /// Parent content address (repeatable)
    #[arg(short, long = "parent", value_name = "ADDRESS")]
    pub parent: Vec<String>,

    /// Skip license confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn logging_overrides(&self) -> LoggingOverrides {
        LoggingOverrides {
            verbose: self.verbose,
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }

    /// Invocation for `env_dir`, consuming the parsed arguments.
    pub fn into_invocation(self, env_dir: PathBuf) -> Invocation {
        let flags = InvocationFlags {
            env: env_dir,
            title: self.title,
            name: self.name,
            description: self.description,
            subtype: self.subtype,
            parents: self.parent,
            yes: self.yes,
        };
        Invocation::from_args(self.input, flags)
    }
}

/// CLI context: resolved configuration plus the invocation to run.
pub struct CliContext {
    config: HypergraphConfig,
    invocation: Invocation,
}

impl CliContext {
    /// Load configuration and resolve the environment directory.
    pub fn new(cli: Cli) -> Result<Self, CliError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        config.logging = config.logging.with_overrides(&cli.logging_overrides());
        let env_dir = paths::resolve_env_dir(cli.env.clone(), config.env.clone())?;
        let invocation = cli.into_invocation(env_dir);
        Ok(Self { config, invocation })
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.config.logging
    }

    /// Run the invocation against the local engine.
    pub async fn execute(self, prompt: &mut dyn Prompt) -> Result<String, CliError> {
        dispatch(self.invocation, prompt, |env: &Path| LocalEngine::new(env)).await
    }
}

/// Exit code when clap stops before a `Cli` exists: version is a success,
/// help and parse errors are not.
pub fn parse_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Exit code of a finished invocation.
pub fn exit_code(result: &Result<String, CliError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Text printed on stderr for a failed invocation: the bare message for user
/// errors, the full cause chain otherwise.
pub fn error_report(err: CliError) -> String {
    if err.is_user_error() {
        err.to_string()
    } else {
        format!("Error: {:?}", anyhow::Error::new(err))
    }
}
