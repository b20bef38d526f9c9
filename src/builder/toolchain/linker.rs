//! Linker identity.
//!
//! Compiler families only need to know *which* linker a toolchain is bound to
//! and how it is invoked; they never drive it themselves.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// The kind of dynamic linker bound to a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkerKind {
    /// TI Arm Clang linker (`tiarmlnk`, usually driven through `tiarmclang`)
    #[serde(rename = "tiarmlnk")]
    TiArmLnk,
    /// Arm Compiler `armlink`
    ArmLink,
    /// GNU ld (bfd or gold)
    #[serde(rename = "ld")]
    GnuLd,
    /// LLVM lld
    Lld,
    /// Microsoft `link.exe`
    #[serde(rename = "link")]
    MsvcLink,
    /// Anything not recognized
    Unknown,
}

impl LinkerKind {
    /// Get the canonical linker name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkerKind::TiArmLnk => "tiarmlnk",
            LinkerKind::ArmLink => "armlink",
            LinkerKind::GnuLd => "ld",
            LinkerKind::Lld => "lld",
            LinkerKind::MsvcLink => "link",
            LinkerKind::Unknown => "unknown",
        }
    }

    /// Guess the linker kind from a program path.
    ///
    /// The TI compiler driver links through `tiarmlnk` itself, so a
    /// `tiarmclang` program maps to [`LinkerKind::TiArmLnk`].
    pub fn from_program(program: &Path) -> Self {
        let name = program
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_lowercase();
        let name = name.strip_suffix(".exe").unwrap_or(&name);

        if name.contains("tiarmlnk") || name.contains("tiarmclang") {
            LinkerKind::TiArmLnk
        } else if name.contains("armlink") {
            LinkerKind::ArmLink
        } else if name.contains("lld") {
            LinkerKind::Lld
        } else if name == "link" {
            LinkerKind::MsvcLink
        } else if name == "ld"
            || name.starts_with("ld.")
            || name.ends_with("-ld")
            || name.contains("gcc")
            || name.ends_with("cc")
        {
            LinkerKind::GnuLd
        } else {
            LinkerKind::Unknown
        }
    }
}

impl std::fmt::Display for LinkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A linker bound to a toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linker {
    kind: LinkerKind,
    /// Program followed by any fixed leading arguments
    exelist: Vec<String>,
}

impl Linker {
    /// Create a linker of a known kind.
    pub fn new(kind: LinkerKind, exelist: Vec<String>) -> Self {
        Linker { kind, exelist }
    }

    /// Create a linker, inferring the kind from the program name.
    pub fn from_program(program: impl Into<String>) -> Self {
        let program = program.into();
        let kind = LinkerKind::from_program(Path::new(&program));
        Linker {
            kind,
            exelist: vec![program],
        }
    }

    /// The linker kind.
    pub fn kind(&self) -> LinkerKind {
        self.kind
    }

    /// Whether this linker is of the given kind.
    pub fn is(&self, kind: LinkerKind) -> bool {
        self.kind == kind
    }

    /// The invocation, program first.
    pub fn exelist(&self) -> &[String] {
        &self.exelist
    }

    /// The invocation as a single display string.
    pub fn invocation(&self) -> String {
        self.exelist.join(" ")
    }
}
