//! Toolchain configuration errors.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use super::linker::LinkerKind;
use super::FamilyId;
use crate::util::diagnostic::Diagnostic;

/// Error raised while binding a compiler family to a toolchain, or while
/// asking it to compile something it cannot.
///
/// All of these are configuration problems: nothing is retried, the user has
/// to fix the toolchain and reconfigure.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ToolchainError {
    #[error("{} compiler only supports cross-compilation", .family.display_name())]
    #[diagnostic(
        code(ccadapt::toolchain::cross_required),
        help("set `target` or `cross = true` in toolchain.toml")
    )]
    CrossCompileRequired { family: FamilyId },

    #[error("unsupported linker `{linker}`, must be {expected}")]
    #[diagnostic(code(ccadapt::toolchain::unsupported_linker))]
    UnsupportedLinker {
        family: FamilyId,
        linker: String,
        expected: LinkerKind,
    },

    #[error("no compiler family adapter for `{program}`")]
    #[diagnostic(code(ccadapt::toolchain::unsupported_compiler))]
    UnsupportedCompiler { program: String },

    #[error("{} cannot compile `{}`", .family.display_name(), .source_file.display())]
    #[diagnostic(code(ccadapt::toolchain::unsupported_source))]
    UnsupportedSource {
        family: FamilyId,
        source_file: PathBuf,
    },
}

impl ToolchainError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ToolchainError::CrossCompileRequired { family } => Diagnostic::error(self.to_string())
                .with_context(format!(
                    "the toolchain targets the build host, but `{}` only produces code for other targets",
                    family.as_str()
                ))
                .with_suggestion("Set `target = \"<triple>\"` under [toolchain] in toolchain.toml")
                .with_suggestion("Or force it with `cross = true`"),

            ToolchainError::UnsupportedLinker {
                family,
                linker,
                expected,
            } => Diagnostic::error(self.to_string())
                .with_context(format!(
                    "{} links through {} only",
                    family.display_name(),
                    expected
                ))
                .with_suggestion(format!(
                    "Set `linker = \"{}\"` under [toolchain] in toolchain.toml",
                    expected
                ))
                .with_suggestion(format!(
                    "Or remove `linker` and let it be inferred from `{}`",
                    family.as_str()
                )),

            ToolchainError::UnsupportedCompiler { program } => Diagnostic::error(self.to_string())
                .with_context(format!("`{}` is not a recognized compiler family", program))
                .with_suggestion(format!(
                    "Point `cc` at one of: {}",
                    FamilyId::ALL
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )),

            ToolchainError::UnsupportedSource {
                family,
                source_file,
            } => Diagnostic::error(self.to_string())
                .with_location(source_file.clone())
                .with_context(format!(
                    "{} does not know how to compile this file type",
                    family.display_name()
                )),
        }
    }
}
