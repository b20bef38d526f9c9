//! Compile command construction.
//!
//! The driver assembles invocations; compiler families supply the dialect.

pub mod driver;
pub mod toolchain;

pub use driver::{CompileDriver, CompileOptions, PchUse};
pub use toolchain::{
    bind_family, toolchain_from_config, ColorChoice, CommandSpec, CompileInput, CompilerFamily,
    FamilyId, Linker, LinkerKind, OptimizationLevel, SuffixSet, TiArmClangCompiler,
    ToolchainError, ToolchainInstance,
};
