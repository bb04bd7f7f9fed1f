//! Hypergraph: Interactive CLI for p2p commons modules
//!
//! Resolves an action and its inputs from arguments or prompts, then runs the
//! action against a module-management engine inside a scoped session.

pub mod action;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod tooling;
pub mod types;
