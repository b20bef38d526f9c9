//! `ccadapt rebase` command

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::RebaseArgs;
use crate::commands::load_driver;
use ccadapt::util::fs::normalize_lexically;

pub fn execute(args: RebaseArgs, toolchain_file: Option<&Path>) -> Result<()> {
    let (_, driver) = load_driver(toolchain_file)?;

    let build_dir = if args.build_dir.is_absolute() {
        args.build_dir
    } else {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        normalize_lexically(&cwd.join(&args.build_dir))
    };

    for arg in driver.rebase_args(args.args, &build_dir) {
        println!("{}", arg);
    }

    Ok(())
}
