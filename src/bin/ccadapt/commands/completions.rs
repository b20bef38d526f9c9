//! `ccadapt completions` command

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};
use ccadapt::util::fs::ensure_dir;

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let Some(path) = args.output else {
        generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    generate(args.shell, &mut cmd, bin_name, &mut out);
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("Wrote {} completions to {}", args.shell, path.display());

    Ok(())
}
