//! Generic compile driver.
//!
//! Assembles compiler invocations from a [`ToolchainInstance`] and whatever
//! [`CompilerFamily`] is bound to it. The driver never looks at the family's
//! dialect; it only concatenates the argument fragments the family returns.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::builder::toolchain::{
    bind_family, ColorChoice, CommandSpec, CompileInput, CompilerFamily, OptimizationLevel,
    ToolchainError, ToolchainInstance,
};
use crate::core::language::Language;
use crate::util::config::BuildSettings;
use crate::util::fs::write_string;

/// Use of a precompiled header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PchUse {
    /// Directory holding precompiled-header artifacts
    pub dir: PathBuf,
    /// The header the artifact was built from
    pub header: PathBuf,
}

/// What to ask of the compiler, independent of its dialect.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub optimization: OptimizationLevel,
    pub debug: bool,
    pub color: ColorChoice,
    /// Request position-independent code
    pub pic: bool,
    /// Precompiled header to use for C/C++ sources
    pub pch: Option<PchUse>,
    /// Write a make-style dependency file next to each object
    pub depfile: bool,
}

impl CompileOptions {
    /// Options seeded from the `[build]` section of the toolchain config.
    pub fn from_settings(settings: &BuildSettings) -> Self {
        CompileOptions {
            optimization: settings.optimization.unwrap_or_default(),
            debug: settings.debug.unwrap_or(false),
            color: settings.color.unwrap_or_default(),
            ..CompileOptions::default()
        }
    }
}

/// compile_commands.json entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileCommand {
    pub directory: String,
    pub file: String,
    pub arguments: Vec<String>,
    pub output: Option<String>,
}

/// Turns compile inputs into commands for one toolchain.
pub struct CompileDriver {
    toolchain: ToolchainInstance,
    family: Box<dyn CompilerFamily>,
}

impl CompileDriver {
    /// Create a driver around an already bound family.
    pub fn new(toolchain: ToolchainInstance, family: Box<dyn CompilerFamily>) -> Self {
        CompileDriver { toolchain, family }
    }

    /// Bind the matching family to `toolchain` and wrap both in a driver.
    pub fn for_toolchain(toolchain: ToolchainInstance) -> Result<Self, ToolchainError> {
        let family = bind_family(&toolchain)?;
        Ok(CompileDriver::new(toolchain, family))
    }

    /// The toolchain this driver compiles with.
    pub fn toolchain(&self) -> &ToolchainInstance {
        &self.toolchain
    }

    /// The bound compiler family.
    pub fn family(&self) -> &dyn CompilerFamily {
        self.family.as_ref()
    }

    /// Generate the compile command for one source file.
    pub fn compile_command(
        &self,
        input: &CompileInput,
        opts: &CompileOptions,
    ) -> Result<CommandSpec, ToolchainError> {
        let family = self.family();

        if !family.can_compile(&input.source) {
            return Err(ToolchainError::UnsupportedSource {
                family: family.id(),
                source_file: input.source.clone(),
            });
        }

        let lang = Language::from_path(&input.source).unwrap_or_default();

        let mut cmd = CommandSpec::new(self.toolchain.program());

        // Fixed leading arguments of the compiler invocation
        cmd = cmd.args(self.toolchain.exelist.iter().skip(1).cloned());

        cmd = cmd.args(family.colorout_args(opts.color));
        cmd = cmd.args(family.optimization_args(opts.optimization));
        cmd = cmd.args(family.debug_args(opts.debug));

        if opts.pic {
            cmd = cmd.args(family.pic_args());
        }

        for dir in &input.include_dirs {
            cmd = cmd.arg(format!("-I{}", dir.display()));
        }

        for (name, value) in &input.defines {
            match value {
                Some(v) => cmd = cmd.arg(format!("-D{}={}", name, v)),
                None => cmd = cmd.arg(format!("-D{}", name)),
            }
        }

        // Precompiled headers only apply to C and C++
        if let Some(pch) = &opts.pch {
            if lang != Language::Asm {
                cmd = cmd.args(family.pch_use_args(&pch.dir, &pch.header));
            }
        }

        if opts.depfile {
            let output = input.output.display().to_string();
            let depfile = input.output.with_extension("d").display().to_string();
            cmd = cmd.args(family.dependency_gen_args(&output, &depfile));
        }

        cmd = cmd.args(self.toolchain.cflags.iter().cloned());
        cmd = cmd.args(input.cflags.iter().cloned());

        cmd = cmd.arg("-c");
        cmd = cmd.arg(input.source.display().to_string());
        cmd = cmd.arg("-o");
        cmd = cmd.arg(input.output.display().to_string());

        tracing::debug!(
            "Planned {} compile of {}: {} args",
            lang,
            input.source.display(),
            cmd.args.len()
        );

        Ok(cmd)
    }

    /// Generate compile commands for many sources in parallel.
    ///
    /// Suffix registration happens once up front; after that every unit only
    /// reads the family's configuration.
    pub fn plan_all(
        &self,
        inputs: &[CompileInput],
        opts: &CompileOptions,
    ) -> Result<Vec<CommandSpec>, ToolchainError> {
        self.family.compile_suffixes();

        if !inputs.is_empty() {
            tracing::info!("Planning {} compile commands", inputs.len());
        }

        inputs
            .par_iter()
            .map(|input| self.compile_command(input, opts))
            .collect()
    }

    /// Re-anchor relative `-I`/`-L` arguments at `build_dir`.
    pub fn rebase_args(&self, args: Vec<String>, build_dir: &Path) -> Vec<String> {
        self.family
            .compute_parameters_with_absolute_paths(args, build_dir)
    }

    /// Build compile_commands.json entries for `inputs`.
    pub fn compile_commands(
        &self,
        inputs: &[CompileInput],
        opts: &CompileOptions,
        directory: &Path,
    ) -> Result<Vec<CompileCommand>, ToolchainError> {
        let specs = self.plan_all(inputs, opts)?;

        Ok(inputs
            .iter()
            .zip(specs)
            .map(|(input, spec)| CompileCommand {
                directory: directory.display().to_string(),
                file: input.source.display().to_string(),
                arguments: spec.to_argv(),
                output: Some(input.output.display().to_string()),
            })
            .collect())
    }

    /// Emit compile_commands.json for IDE integration.
    pub fn emit_compile_commands(
        &self,
        inputs: &[CompileInput],
        opts: &CompileOptions,
        path: &Path,
    ) -> Result<()> {
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        let commands = self.compile_commands(inputs, opts, directory)?;

        let json = serde_json::to_string_pretty(&commands)
            .context("failed to serialize compile_commands.json")?;

        write_string(path, &json)?;

        tracing::info!("Wrote {} entries to {}", commands.len(), path.display());

        Ok(())
    }
}

impl std::fmt::Debug for CompileDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileDriver")
            .field("toolchain", &self.toolchain)
            .field("family", &self.family.id())
            .finish()
    }
}
