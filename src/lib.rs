//! ccadapt - compiler-family adapters for cross toolchains
//!
//! This crate translates abstract build intents (optimization level, debug
//! info, colored diagnostics, precompiled headers, dependency files) into the
//! argument dialect of a specific compiler family, and validates that the
//! family is bound to a toolchain it can actually work with.

pub mod builder;
pub mod core;
pub mod util;

pub use crate::builder::driver::{CompileDriver, CompileOptions};
pub use crate::builder::toolchain::{CompilerFamily, ToolchainError, ToolchainInstance};
pub use crate::core::machine::TargetTriple;
