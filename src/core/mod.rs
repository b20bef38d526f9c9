//! Core domain types.

pub mod language;
pub mod machine;

pub use language::Language;
pub use machine::TargetTriple;
