//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use ccadapt::builder::{ColorChoice, OptimizationLevel};

/// ccadapt - turn build intents into cross-compiler arguments
#[derive(Parser)]
#[command(name = "ccadapt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Toolchain file to use instead of .ccadapt/toolchain.toml
    #[arg(long, global = true, env = "CCADAPT_TOOLCHAIN_FILE")]
    pub toolchain_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the compile command for a source file
    Args(ArgsArgs),

    /// Re-anchor relative -I/-L arguments at a build directory
    Rebase(RebaseArgs),

    /// Toolchain management
    Toolchain(ToolchainArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ArgsArgs {
    /// Source file to compile
    pub source: PathBuf,

    /// Output object file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Include directory
    #[arg(short = 'I', long = "include")]
    pub include_dirs: Vec<PathBuf>,

    /// Preprocessor define (NAME or NAME=VALUE)
    #[arg(short = 'D', long = "define")]
    pub defines: Vec<String>,

    /// Optimization level (plain, 0, g, 1, 2, 3, s)
    #[arg(short = 'O', long)]
    pub optimization: Option<OptimizationLevel>,

    /// Emit debug information
    #[arg(short = 'g', long)]
    pub debug: bool,

    /// Omit debug information even if the config asks for it
    #[arg(long, conflicts_with = "debug")]
    pub no_debug: bool,

    /// Colored diagnostics (auto, always, never)
    #[arg(long)]
    pub color: Option<ColorChoice>,

    /// Request position-independent code
    #[arg(long)]
    pub pic: bool,

    /// Directory holding precompiled headers
    #[arg(long, requires = "pch_header")]
    pub pch_dir: Option<PathBuf>,

    /// Header the precompiled header was built from
    #[arg(long, requires = "pch_dir")]
    pub pch_header: Option<PathBuf>,

    /// Write a dependency file next to the object
    #[arg(long)]
    pub depfile: bool,

    /// Print a compile_commands.json entry instead of a command line
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RebaseArgs {
    /// Build directory to anchor relative paths at
    #[arg(long)]
    pub build_dir: PathBuf,

    /// Arguments to rewrite
    #[arg(last = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ToolchainArgs {
    #[command(subcommand)]
    pub command: ToolchainCommands,
}

#[derive(Subcommand)]
pub enum ToolchainCommands {
    /// Show current toolchain configuration
    Show,

    /// Override the toolchain for this project
    Override(ToolchainOverrideArgs),
}

#[derive(Args)]
pub struct ToolchainOverrideArgs {
    /// Compiler path
    #[arg(long)]
    pub cc: Option<PathBuf>,

    /// Linker path
    #[arg(long)]
    pub linker: Option<PathBuf>,

    /// Target triple
    #[arg(long)]
    pub target: Option<String>,

    /// Force cross-compilation on or off
    #[arg(long)]
    pub cross: Option<bool>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,

    /// Write the script to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
