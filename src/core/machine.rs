//! Target machine identity.
//!
//! A toolchain is a cross toolchain when the machine it builds for differs
//! from the machine it runs on.

use std::str::FromStr;

/// Target triple components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTriple {
    /// CPU architecture (arm, aarch64, x86_64, etc.)
    pub arch: String,
    /// Vendor (unknown, none, apple, pc, etc.)
    pub vendor: String,
    /// Operating system (linux, eabi, windows, etc.)
    pub os: String,
    /// Environment/ABI (gnu, musl, eabihf, etc.)
    pub env: Option<String>,
}

impl TargetTriple {
    /// Create a new target triple.
    pub fn new(arch: &str, vendor: &str, os: &str, env: Option<&str>) -> Self {
        TargetTriple {
            arch: arch.to_string(),
            vendor: vendor.to_string(),
            os: os.to_string(),
            env: env.map(|s| s.to_string()),
        }
    }

    /// The machine this process runs on.
    pub fn host() -> Self {
        let arch = std::env::consts::ARCH;
        let os = std::env::consts::OS;

        let (vendor, env) = match os {
            "linux" => ("unknown", Some("gnu")),
            "macos" => ("apple", None),
            "windows" => ("pc", Some("msvc")),
            _ => ("unknown", None),
        };

        TargetTriple::new(arch, vendor, os, env)
    }

    /// Parse a target triple string.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        Some(TargetTriple {
            arch: parts[0].to_string(),
            vendor: parts[1].to_string(),
            os: parts[2].to_string(),
            env: parts.get(3).map(|s| s.to_string()),
        })
    }

    /// Whether this triple names the machine we are running on.
    ///
    /// Only architecture and operating system are compared; vendor and
    /// environment differ between toolchains describing the same machine.
    pub fn is_host(&self) -> bool {
        self.same_machine(&TargetTriple::host())
    }

    /// Whether two triples describe the same architecture and OS.
    pub fn same_machine(&self, other: &TargetTriple) -> bool {
        canonical_arch(&self.arch) == canonical_arch(&other.arch)
            && canonical_os(&self.os) == canonical_os(&other.os)
    }
}

fn canonical_arch(arch: &str) -> &str {
    match arch {
        "arm64" => "aarch64",
        "amd64" => "x86_64",
        "i386" | "i586" | "i686" => "x86",
        other => other,
    }
}

fn canonical_os(os: &str) -> &str {
    match os {
        "darwin" => "macos",
        "win32" => "windows",
        other => other,
    }
}

impl FromStr for TargetTriple {
    type Err = TargetTripleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetTriple::parse(s).ok_or_else(|| TargetTripleParseError(s.to_string()))
    }
}

/// Error returned when a target triple has fewer than three components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid target triple '{0}', expected <arch>-<vendor>-<os>[-<env>]")]
pub struct TargetTripleParseError(pub String);

impl std::fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.env {
            Some(env) => write!(f, "{}-{}-{}-{}", self.arch, self.vendor, self.os, env),
            None => write!(f, "{}-{}-{}", self.arch, self.vendor, self.os),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_triple() {
        let triple = TargetTriple::host();
        assert!(!triple.arch.is_empty());
        assert!(!triple.os.is_empty());
        assert!(triple.is_host());
    }

    #[test]
    fn test_parse_triple() {
        let triple = TargetTriple::parse("arm-none-eabi").unwrap();
        assert_eq!(triple.arch, "arm");
        assert_eq!(triple.vendor, "none");
        assert_eq!(triple.os, "eabi");
        assert_eq!(triple.env, None);
        assert!(!triple.is_host());
        assert_eq!(triple.to_string(), "arm-none-eabi");

        let triple: TargetTriple = "thumbv7em-none-eabi-hf".parse().unwrap();
        assert_eq!(triple.env, Some("hf".to_string()));
    }

    #[test]
    fn test_parse_rejects_short_triples() {
        assert!(TargetTriple::parse("arm").is_none());
        assert!(TargetTriple::parse("arm--eabi").is_none());
        assert!("x86_64-linux".parse::<TargetTriple>().is_err());
    }

    #[test]
    fn test_same_machine_ignores_vendor_and_env() {
        let a = TargetTriple::parse("x86_64-unknown-linux-gnu").unwrap();
        let b = TargetTriple::parse("x86_64-pc-linux-musl").unwrap();
        assert!(a.same_machine(&b));

        let mac = TargetTriple::parse("arm64-apple-darwin").unwrap();
        let mac2 = TargetTriple::new("aarch64", "apple", "macos", None);
        assert!(mac.same_machine(&mac2));

        let mcu = TargetTriple::parse("arm-none-eabi").unwrap();
        assert!(!mcu.same_machine(&a));
    }
}
