//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};

use ccadapt::builder::toolchain::load_toolchain_config_from_files;
use ccadapt::builder::{toolchain_from_config, CompileDriver};
use ccadapt::util::ToolchainConfig;

pub mod args;
pub mod completions;
pub mod rebase;
pub mod toolchain;

/// Load the toolchain configuration for the current directory.
pub fn load_config(toolchain_file: Option<&Path>) -> Result<ToolchainConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    load_toolchain_config_from_files(toolchain_file, &cwd)
}

/// Load the toolchain and bind its compiler family.
pub fn load_driver(toolchain_file: Option<&Path>) -> Result<(ToolchainConfig, CompileDriver)> {
    let config = load_config(toolchain_file)?;
    let toolchain = toolchain_from_config(&config)?;
    let driver = CompileDriver::for_toolchain(toolchain)?;
    Ok((config, driver))
}
