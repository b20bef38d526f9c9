//! ccadapt CLI - compiler-family adapters for cross toolchains

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccadapt::util::diagnostic;
use ccadapt::ToolchainError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ToolchainError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ccadapt=debug")
    } else {
        EnvFilter::new("ccadapt=info")
    };

    // stdout carries command lines and JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let toolchain_file = cli.toolchain_file.as_deref();

    match cli.command {
        Commands::Args(args) => commands::args::execute(args, toolchain_file),
        Commands::Rebase(args) => commands::rebase::execute(args, toolchain_file),
        Commands::Toolchain(args) => commands::toolchain::execute(args, toolchain_file),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
