//! Hypergraph CLI Binary
//!
//! Command-line interface for managing p2p commons modules.

use clap::Parser;
use hypergraph::logging::init_logging;
use hypergraph::prompt::TerminalPrompt;
use hypergraph::tooling::cli::{error_report, exit_code, parse_exit_code, Cli, CliContext};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(parse_exit_code(e.kind()));
        }
    };

    let context = match CliContext::new(cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(context.logging()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            process::exit(1);
        }
    };

    let mut prompt = TerminalPrompt::new();
    let result = runtime.block_on(context.execute(&mut prompt));
    let code = exit_code(&result);
    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            let highlight = e.is_user_error() && std::io::stderr().is_terminal();
            let report = error_report(e);
            if highlight {
                eprintln!("{}", report.red());
            } else {
                eprintln!("{}", report);
            }
        }
    }
    process::exit(code);
}
