//! Tooling & Integration Layer
//!
//! Command-line front end that turns process arguments into an invocation.

pub mod cli;

pub use cli::{Cli, CliContext};
