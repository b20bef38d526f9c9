//! `ccadapt toolchain` command

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{ToolchainArgs, ToolchainCommands, ToolchainOverrideArgs};
use crate::commands::load_config;
use ccadapt::builder::{bind_family, toolchain_from_config, CompileOptions, FamilyId};
use ccadapt::util::config::project_toolchain_config_path;
use ccadapt::util::diagnostic::{self, Diagnostic};
use ccadapt::util::ToolchainConfig;

pub fn execute(args: ToolchainArgs, toolchain_file: Option<&Path>) -> Result<()> {
    match args.command {
        ToolchainCommands::Show => show_toolchain(toolchain_file),
        ToolchainCommands::Override(override_args) => {
            override_toolchain(override_args, toolchain_file)
        }
    }
}

fn show_toolchain(toolchain_file: Option<&Path>) -> Result<()> {
    let config = load_config(toolchain_file)?;
    let toolchain = toolchain_from_config(&config)?;

    println!("Toolchain:");
    println!();
    println!("  CC:       {}", toolchain.exelist.join(" "));
    println!(
        "  Linker:   {} ({})",
        toolchain.linker.invocation(),
        toolchain.linker.kind()
    );
    match &toolchain.target {
        Some(target) => println!("  Target:   {}", target),
        None => println!("  Target:   host"),
    }
    println!(
        "  Cross:    {}",
        if toolchain.is_cross { "yes" } else { "no" }
    );
    if !toolchain.cflags.is_empty() {
        println!("  CFLAGS:   {}", toolchain.cflags.join(" "));
    }

    let family = bind_family(&toolchain)?;
    let suffixes: Vec<String> = family.compile_suffixes().snapshot().into_iter().collect();

    println!(
        "  Family:   {} ({})",
        family.id(),
        family.id().display_name()
    );
    println!("  Suffixes: {}", suffixes.join(", "));

    let opts = CompileOptions::from_settings(&config.build);
    println!();
    println!("Defaults:");
    println!("  Optimization: {}", opts.optimization);
    println!("  Debug:        {}", opts.debug);
    println!("  Color:        {}", opts.color);

    Ok(())
}

fn override_toolchain(args: ToolchainOverrideArgs, toolchain_file: Option<&Path>) -> Result<()> {
    let path = match toolchain_file {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("failed to determine current directory")?;
            project_toolchain_config_path(&cwd)
        }
    };

    if let Some(cc) = &args.cc {
        if FamilyId::from_program(cc).is_none() {
            let warning = Diagnostic::warning(format!(
                "`{}` does not look like a supported compiler",
                cc.display()
            ))
            .with_context("the override is saved, but binding a compiler family will fail")
            .with_suggestion("Use `tiarmclang` from the TI Arm Clang toolchain");
            diagnostic::emit(&warning, std::io::stderr().is_terminal());
        }
    }

    // An unreadable file is left alone rather than overwritten
    let mut config = ToolchainConfig::load_or_default(&path)?;

    let mut update = ToolchainConfig::default();
    update.toolchain.cc = args.cc;
    update.toolchain.linker = args.linker;
    update.toolchain.target = args.target;
    update.toolchain.cross = args.cross;

    if !update.has_overrides() {
        anyhow::bail!(
            "nothing to override\n\
             help: pass at least one of --cc, --linker, --target, --cross"
        );
    }

    config.merge(update);
    config.save(&path)?;

    tracing::info!("Wrote toolchain override to {}", path.display());

    Ok(())
}
