//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;

pub use config::ToolchainConfig;
pub use diagnostic::Diagnostic;
