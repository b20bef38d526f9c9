//! Toolchain resolution and family binding.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::machine::TargetTriple;
use crate::util::config::{
    global_toolchain_config_path, load_toolchain_config, project_toolchain_config_path,
    ToolchainConfig,
};

use super::{
    CompilerFamily, FamilyId, Linker, LinkerKind, TiArmClangCompiler, ToolchainError,
    ToolchainInstance,
};

/// Load toolchain configuration.
///
/// An explicit file is used as-is. Otherwise searches in this order:
/// 1. Project config (`.ccadapt/toolchain.toml` under `project_root`)
/// 2. Global config (`~/.ccadapt/toolchain.toml`)
pub fn load_toolchain_config_from_files(
    explicit: Option<&Path>,
    project_root: &Path,
) -> Result<ToolchainConfig> {
    if let Some(path) = explicit {
        return ToolchainConfig::load(path);
    }

    let project_path = project_toolchain_config_path(project_root);
    let global_path = global_toolchain_config_path().unwrap_or_default();

    load_toolchain_config(&global_path, &project_path)
}

/// Build the toolchain described by a configuration.
///
/// Nothing is executed: a compiler missing from PATH only produces a warning.
pub fn toolchain_from_config(config: &ToolchainConfig) -> Result<ToolchainInstance> {
    let tc = &config.toolchain;

    let Some(cc) = tc.cc.clone() else {
        bail!(
            "no compiler configured\n\
             \n\
             Set `cc` under [toolchain] in .ccadapt/toolchain.toml,\n\
             or pass --toolchain-file."
        );
    };

    if which::which(&cc).is_err() {
        tracing::warn!("Configured compiler not found: {}", cc.display());
    }

    // The TI driver links through its own linker when none is given
    let linker_path = tc.linker.clone().unwrap_or_else(|| cc.clone());
    let linker_kind = tc
        .linker_kind
        .unwrap_or_else(|| LinkerKind::from_program(&linker_path));
    let linker = Linker::new(linker_kind, vec![display(&linker_path)]);

    let target = tc
        .target
        .as_deref()
        .map(|t| t.parse::<TargetTriple>())
        .transpose()
        .context("invalid `target` in toolchain config")?;

    let is_cross = tc
        .cross
        .unwrap_or_else(|| target.as_ref().is_some_and(|t| !t.is_host()));

    tracing::info!(
        "Using toolchain from config: cc={}, linker={} ({}), cross={}",
        cc.display(),
        linker_path.display(),
        linker_kind,
        is_cross
    );

    let mut toolchain =
        ToolchainInstance::new(vec![display(&cc)], linker).with_cflags(tc.cflags.clone());
    toolchain.target = target;
    toolchain.is_cross = is_cross;

    Ok(toolchain)
}

/// Bind the compiler family adapter matching the toolchain's compiler.
pub fn bind_family(
    toolchain: &ToolchainInstance,
) -> std::result::Result<Box<dyn CompilerFamily>, ToolchainError> {
    let program = PathBuf::from(toolchain.program());

    match FamilyId::from_program(&program) {
        Some(FamilyId::TiArmClang) => Ok(Box::new(TiArmClangCompiler::new(toolchain)?)),
        None => Err(ToolchainError::UnsupportedCompiler {
            program: toolchain.program().to_string(),
        }),
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
