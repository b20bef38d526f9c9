//! Compiler-family adapters for C/C++ toolchains.
//!
//! A generic compile driver knows how to assemble an invocation, but not the
//! dialect of any particular compiler. Each family implements
//! [`CompilerFamily`], translating abstract build intents (PIC, colors,
//! precompiled headers, dependency files, optimization, debug info) into
//! concrete arguments. The driver holds a `Box<dyn CompilerFamily>` and
//! concatenates what it returns.
//!
//! A family is bound to a [`ToolchainInstance`], the enclosing toolchain
//! configuration: its compiler invocation, whether it cross-compiles, the
//! linker it uses, and the shared set of compilable suffixes.
//!
//! Toolchain resolution priority:
//! 1. Explicit toolchain file (`--toolchain-file`)
//! 2. Toolchain config file (`.ccadapt/toolchain.toml` or `~/.ccadapt/toolchain.toml`)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::machine::TargetTriple;
use crate::core::language::Language;

mod detect;
mod error;
mod linker;
mod suffixes;
pub mod tables;
mod tiarmclang;

pub use detect::{bind_family, load_toolchain_config_from_files, toolchain_from_config};
pub use error::ToolchainError;
pub use linker::{Linker, LinkerKind};
pub use suffixes::SuffixSet;
pub use tables::{ColorChoice, OptimizationLevel};
pub use tiarmclang::TiArmClangCompiler;

/// A command to execute: program and arguments.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// The program to run (e.g., "tiarmclang")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// The full command line, program first.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.display().to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

/// Input for a compile step.
#[derive(Debug, Clone, Default)]
pub struct CompileInput {
    /// Source file to compile
    pub source: PathBuf,
    /// Output object file
    pub output: PathBuf,
    /// Include directories
    pub include_dirs: Vec<PathBuf>,
    /// Preprocessor defines (name, optional value)
    pub defines: Vec<(String, Option<String>)>,
    /// Additional compiler flags
    pub cflags: Vec<String>,
}

/// Identity of a compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyId {
    /// Texas Instruments Arm Clang (ARM-CGT-CLANG)
    TiArmClang,
}

impl FamilyId {
    /// Every family with an adapter.
    pub const ALL: [FamilyId; 1] = [FamilyId::TiArmClang];

    /// Get the family id as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyId::TiArmClang => "tiarmclang",
        }
    }

    /// Human readable family name.
    pub fn display_name(&self) -> &'static str {
        match self {
            FamilyId::TiArmClang => "TI Arm Clang",
        }
    }

    /// Recognize a family from a compiler program path.
    pub fn from_program(program: &Path) -> Option<Self> {
        let name = program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();

        FamilyId::ALL
            .into_iter()
            .find(|family| name.contains(family.as_str()))
    }
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The surface a compile driver expects from a compiler family.
///
/// Every query is a pure function of its arguments and the family's
/// configuration, safe to call from many workers at once. The one exception
/// is [`CompilerFamily::compile_suffixes`], which may grow the shared suffix
/// set.
pub trait CompilerFamily: Send + Sync {
    /// The family this adapter implements.
    fn id(&self) -> FamilyId;

    /// Arguments for position-independent code.
    fn pic_args(&self) -> Vec<String>;

    /// Arguments for a diagnostic color mode.
    fn colorout_args(&self, color: ColorChoice) -> Vec<String>;

    /// File extension of precompiled-header artifacts.
    fn pch_suffix(&self) -> &str;

    /// Artifact name of the precompiled header built from `header`.
    fn pch_name(&self, header: &Path) -> String {
        let base = header
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}.{}", base, self.pch_suffix())
    }

    /// Arguments to use the precompiled header for `header` from `pch_dir`.
    fn pch_use_args(&self, pch_dir: &Path, header: &Path) -> Vec<String>;

    /// Arguments to write a make-style dependency file.
    fn dependency_gen_args(&self, out_target: &str, out_file: &str) -> Vec<String>;

    /// Arguments for an optimization level.
    fn optimization_args(&self, level: OptimizationLevel) -> Vec<String>;

    /// Arguments for debug info on or off.
    fn debug_args(&self, is_debug: bool) -> Vec<String>;

    /// Re-anchor build-directory-relative path arguments at `build_dir`.
    fn compute_parameters_with_absolute_paths(
        &self,
        parameters: Vec<String>,
        build_dir: &Path,
    ) -> Vec<String>;

    /// Register family-specific suffixes and return the shared set.
    fn compile_suffixes(&self) -> &SuffixSet;

    /// Whether `source` has a suffix this family compiles.
    fn can_compile(&self, source: &Path) -> bool {
        self.compile_suffixes().matches(source)
    }
}

/// The toolchain a compiler family is bound to.
#[derive(Debug, Clone)]
pub struct ToolchainInstance {
    /// Compiler program followed by fixed leading arguments
    pub exelist: Vec<String>,
    /// Whether the toolchain builds for a machine other than the host
    pub is_cross: bool,
    /// Target machine, if known
    pub target: Option<TargetTriple>,
    /// Linker this toolchain links with
    pub linker: Arc<Linker>,
    /// Compilable suffixes, shared with the bound family
    pub suffixes: SuffixSet,
    /// Flags added to every compile
    pub cflags: Vec<String>,
}

impl ToolchainInstance {
    /// Create a native (non-cross) toolchain compiling C and C++ sources.
    pub fn new(exelist: Vec<String>, linker: Linker) -> Self {
        let suffixes = SuffixSet::with_suffixes(
            [Language::C, Language::Cxx]
                .iter()
                .flat_map(|lang| lang.suffixes().iter().copied()),
        );

        ToolchainInstance {
            exelist,
            is_cross: false,
            target: None,
            linker: Arc::new(linker),
            suffixes,
            cflags: Vec::new(),
        }
    }

    /// Set whether the toolchain cross-compiles.
    pub fn cross(mut self, is_cross: bool) -> Self {
        self.is_cross = is_cross;
        self
    }

    /// Set the target machine. A target other than the host makes the
    /// toolchain a cross toolchain.
    pub fn with_target(mut self, target: TargetTriple) -> Self {
        self.is_cross = !target.is_host();
        self.target = Some(target);
        self
    }

    /// Set flags added to every compile.
    pub fn with_cflags(mut self, cflags: Vec<String>) -> Self {
        self.cflags = cflags;
        self
    }

    /// The compiler program.
    pub fn program(&self) -> &str {
        self.exelist.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_program() {
        assert_eq!(
            FamilyId::from_program(Path::new("/opt/ti/bin/tiarmclang")),
            Some(FamilyId::TiArmClang)
        );
        assert_eq!(
            FamilyId::from_program(Path::new("C:/ti/bin/TIARMCLANG.EXE")),
            Some(FamilyId::TiArmClang)
        );
        assert_eq!(FamilyId::from_program(Path::new("/usr/bin/clang")), None);
    }

    #[test]
    fn test_toolchain_target_sets_cross() {
        let linker = Linker::from_program("tiarmlnk");
        let tc = ToolchainInstance::new(vec!["tiarmclang".to_string()], linker.clone())
            .with_target(TargetTriple::parse("arm-none-eabi").unwrap());
        assert!(tc.is_cross);

        let native = ToolchainInstance::new(vec!["tiarmclang".to_string()], linker)
            .with_target(TargetTriple::host());
        assert!(!native.is_cross);
    }

    #[test]
    fn test_toolchain_default_suffixes() {
        let tc = ToolchainInstance::new(vec!["cc".to_string()], Linker::from_program("ld"));
        assert!(tc.suffixes.contains("c"));
        assert!(tc.suffixes.contains("cpp"));
        assert!(!tc.suffixes.contains("s"));
        assert_eq!(tc.program(), "cc");
    }

    #[test]
    fn test_command_spec_argv() {
        let cmd = CommandSpec::new("tiarmclang").arg("-c").args(["a.c", "-o", "a.o"]);
        assert_eq!(cmd.to_argv(), vec!["tiarmclang", "-c", "a.c", "-o", "a.o"]);
    }
}
