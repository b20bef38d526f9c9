//! Texas Instruments Arm Clang (ARM-CGT-CLANG) compiler family.
//!
//! `tiarmclang` speaks clang's dialect but only targets Arm microcontrollers,
//! always links through `tiarmlnk`, and has no use for PIC.

use std::path::Path;
use std::sync::Arc;

use super::error::ToolchainError;
use super::linker::{Linker, LinkerKind};
use super::suffixes::SuffixSet;
use super::tables::{self, ColorChoice, OptimizationLevel};
use super::{CompilerFamily, FamilyId, ToolchainInstance};
use crate::util::fs::normalize_lexically;

/// Assembly suffixes accepted by the TI driver (`.sx` is preprocessed).
const ASM_SUFFIXES: [&str; 2] = ["s", "sx"];

/// Argument prefixes that carry a path to re-anchor.
const PATH_PREFIXES: [&str; 2] = ["-I", "-L"];

/// TI Arm Clang family adapter.
#[derive(Debug, Clone)]
pub struct TiArmClangCompiler {
    is_cross: bool,
    linker: Arc<Linker>,
    suffixes: SuffixSet,
}

impl TiArmClangCompiler {
    /// The linker this family requires.
    pub const REQUIRED_LINKER: LinkerKind = LinkerKind::TiArmLnk;

    /// Bind the adapter to a toolchain.
    ///
    /// Fails if the toolchain is not cross-compiling, or if it links with
    /// anything other than `tiarmlnk`.
    pub fn new(toolchain: &ToolchainInstance) -> Result<Self, ToolchainError> {
        if !toolchain.is_cross {
            return Err(ToolchainError::CrossCompileRequired {
                family: FamilyId::TiArmClang,
            });
        }

        if !toolchain.linker.is(Self::REQUIRED_LINKER) {
            return Err(ToolchainError::UnsupportedLinker {
                family: FamilyId::TiArmClang,
                linker: toolchain.linker.invocation(),
                expected: Self::REQUIRED_LINKER,
            });
        }

        tracing::debug!(
            "Bound {} to {} (linker: {})",
            FamilyId::TiArmClang,
            toolchain.program(),
            toolchain.linker.invocation()
        );

        Ok(TiArmClangCompiler {
            is_cross: toolchain.is_cross,
            linker: Arc::clone(&toolchain.linker),
            suffixes: toolchain.suffixes.clone(),
        })
    }

    /// The linker this adapter was validated against.
    pub fn linker(&self) -> &Linker {
        &self.linker
    }

    /// Always `true` for a successfully bound adapter.
    pub fn is_cross(&self) -> bool {
        self.is_cross
    }
}

impl CompilerFamily for TiArmClangCompiler {
    fn id(&self) -> FamilyId {
        FamilyId::TiArmClang
    }

    fn pic_args(&self) -> Vec<String> {
        Vec::new()
    }

    fn colorout_args(&self, color: ColorChoice) -> Vec<String> {
        tables::to_args(tables::clang_color_args(color))
    }

    fn pch_suffix(&self) -> &str {
        "pch"
    }

    fn pch_use_args(&self, pch_dir: &Path, header: &Path) -> Vec<String> {
        // `-include-pch` is internal to clang and undocumented, so its
        // behavior may change with any toolchain release.
        vec![
            "-include-pch".to_string(),
            pch_dir.join(self.pch_name(header)).display().to_string(),
        ]
    }

    fn dependency_gen_args(&self, out_target: &str, out_file: &str) -> Vec<String> {
        vec![
            "-MD".to_string(),
            "-MT".to_string(),
            out_target.to_string(),
            "-MF".to_string(),
            out_file.to_string(),
        ]
    }

    fn optimization_args(&self, level: OptimizationLevel) -> Vec<String> {
        tables::to_args(tables::clang_optimization_args(level))
    }

    fn debug_args(&self, is_debug: bool) -> Vec<String> {
        tables::to_args(tables::clike_debug_args(is_debug))
    }

    fn compute_parameters_with_absolute_paths(
        &self,
        mut parameters: Vec<String>,
        build_dir: &Path,
    ) -> Vec<String> {
        // Purely positional: anything starting with -I or -L is treated as a
        // path flag.
        for param in parameters.iter_mut() {
            if let Some(prefix) = PATH_PREFIXES.iter().find(|p| param.starts_with(*p)) {
                let rest = &param[prefix.len()..];
                let absolute = normalize_lexically(&build_dir.join(rest));
                *param = format!("{}{}", prefix, absolute.display());
            }
        }

        parameters
    }

    fn compile_suffixes(&self) -> &SuffixSet {
        for suffix in ASM_SUFFIXES {
            self.suffixes.insert(suffix);
        }
        &self.suffixes
    }
}
