//! `ccadapt args` command

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ArgsArgs;
use crate::commands::load_driver;
use ccadapt::builder::{CompileInput, CompileOptions, PchUse};

pub fn execute(args: ArgsArgs, toolchain_file: Option<&Path>) -> Result<()> {
    let (config, driver) = load_driver(toolchain_file)?;

    let mut opts = CompileOptions::from_settings(&config.build);
    if let Some(level) = args.optimization {
        opts.optimization = level;
    }
    if args.debug {
        opts.debug = true;
    } else if args.no_debug {
        opts.debug = false;
    }
    if let Some(color) = args.color {
        opts.color = color;
    }
    opts.pic = args.pic;
    opts.depfile = args.depfile;
    opts.pch = args
        .pch_dir
        .zip(args.pch_header)
        .map(|(dir, header)| PchUse { dir, header });

    let input = CompileInput {
        source: args.source,
        output: args.output,
        include_dirs: args.include_dirs,
        defines: parse_defines(&args.defines),
        cflags: Vec::new(),
    };

    if args.json {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        let commands = driver.compile_commands(std::slice::from_ref(&input), &opts, &cwd)?;
        let json = serde_json::to_string_pretty(&commands)
            .context("failed to serialize compile command")?;
        println!("{}", json);
    } else {
        let cmd = driver.compile_command(&input, &opts)?;
        println!("{}", cmd.to_argv().join(" "));
    }

    Ok(())
}

/// Split `NAME=VALUE` defines; a bare `NAME` has no value.
fn parse_defines(defines: &[String]) -> Vec<(String, Option<String>)> {
    defines
        .iter()
        .filter(|d| !d.is_empty())
        .map(|d| match d.split_once('=') {
            Some((name, value)) => (name.to_string(), Some(value.to_string())),
            None => (d.to_string(), None),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defines() {
        let parsed = parse_defines(&[
            "DEBUG".to_string(),
            "BOARD=launchxl".to_string(),
            "EMPTY=".to_string(),
            String::new(),
        ]);

        assert_eq!(
            parsed,
            vec![
                ("DEBUG".to_string(), None),
                ("BOARD".to_string(), Some("launchxl".to_string())),
                ("EMPTY".to_string(), Some(String::new())),
            ]
        );
    }
}
