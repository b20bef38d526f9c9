//! Toolchain configuration file support.
//!
//! Toolchain settings live in `toolchain.toml`, looked up in two places:
//! - Global: `~/.ccadapt/toolchain.toml` - User-wide defaults
//! - Project: `.ccadapt/toolchain.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::toolchain::{ColorChoice, LinkerKind, OptimizationLevel};
use crate::util::fs::{read_to_string, write_string};

/// Toolchain configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Toolchain settings
    pub toolchain: ToolchainSettings,

    /// Default build intents
    pub build: BuildSettings,
}

/// Compiler, linker and target selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Path to the compiler (e.g., /opt/ti/ti-cgt-armllvm/bin/tiarmclang)
    pub cc: Option<PathBuf>,

    /// Path to the linker; inferred from `cc` when absent
    pub linker: Option<PathBuf>,

    /// Linker kind, when it cannot be told from the linker's name
    pub linker_kind: Option<LinkerKind>,

    /// Target triple (e.g., arm-none-eabi)
    pub target: Option<String>,

    /// Force cross-compilation on or off, regardless of `target`
    pub cross: Option<bool>,

    /// Additional compiler flags
    #[serde(default)]
    pub cflags: Vec<String>,
}

/// Defaults for what to ask of the compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Optimization level (plain, 0, g, 1, 2, 3, s)
    pub optimization: Option<OptimizationLevel>,

    /// Emit debug information
    pub debug: Option<bool>,

    /// Colored diagnostics (auto, always, never)
    pub color: Option<ColorChoice>,
}

impl ToolchainConfig {
    /// Load toolchain configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse toolchain config: {}", path.display()))
    }

    /// Load toolchain configuration, or defaults if the file doesn't exist.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save toolchain configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .with_context(|| "failed to serialize toolchain config")?;

        write_string(path, &contents)
    }

    /// Check if any toolchain settings are configured.
    pub fn has_overrides(&self) -> bool {
        self.toolchain.cc.is_some()
            || self.toolchain.linker.is_some()
            || self.toolchain.linker_kind.is_some()
            || self.toolchain.target.is_some()
            || self.toolchain.cross.is_some()
            || !self.toolchain.cflags.is_empty()
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ToolchainConfig) {
        let (tc, build) = (other.toolchain, other.build);

        overlay(&mut self.toolchain.cc, tc.cc);
        overlay(&mut self.toolchain.linker, tc.linker);
        overlay(&mut self.toolchain.linker_kind, tc.linker_kind);
        overlay(&mut self.toolchain.target, tc.target);
        overlay(&mut self.toolchain.cross, tc.cross);
        if !tc.cflags.is_empty() {
            self.toolchain.cflags = tc.cflags;
        }

        overlay(&mut self.build.optimization, build.optimization);
        overlay(&mut self.build.debug, build.debug);
        overlay(&mut self.build.color, build.color);
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Load merged toolchain configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.ccadapt/toolchain.toml)
/// 2. Global config (~/.ccadapt/toolchain.toml)
/// 3. Defaults
pub fn load_toolchain_config(global_path: &Path, project_path: &Path) -> Result<ToolchainConfig> {
    let mut config = ToolchainConfig::default();

    for path in [global_path, project_path] {
        let layer = ToolchainConfig::load_or_default(path)?;
        config.merge(layer);
    }

    Ok(config)
}

/// Get the global config directory (~/.ccadapt).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".ccadapt"))
}

/// Get the global toolchain config path (~/.ccadapt/toolchain.toml).
pub fn global_toolchain_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("toolchain.toml"))
}

/// Get the project toolchain config path (.ccadapt/toolchain.toml).
pub fn project_toolchain_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".ccadapt").join("toolchain.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toolchain_config_default() {
        let config = ToolchainConfig::default();
        assert!(config.toolchain.cc.is_none());
        assert!(config.toolchain.linker.is_none());
        assert!(config.toolchain.target.is_none());
        assert!(config.toolchain.cflags.is_empty());
        assert!(config.build.optimization.is_none());
        assert!(!config.has_overrides());
    }

    #[test]
    fn test_toolchain_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolchain.toml");

        std::fs::write(
            &config_path,
            r#"
[toolchain]
cc = "/opt/ti/bin/tiarmclang"
linker = "/opt/ti/bin/tiarmlnk"
linker_kind = "tiarmlnk"
target = "arm-none-eabi"
cflags = ["-mcpu=cortex-m4", "-mthumb"]

[build]
optimization = "s"
debug = true
color = "never"
"#,
        )
        .unwrap();

        let config = ToolchainConfig::load(&config_path).unwrap();
        assert_eq!(
            config.toolchain.cc,
            Some(PathBuf::from("/opt/ti/bin/tiarmclang"))
        );
        assert_eq!(
            config.toolchain.linker,
            Some(PathBuf::from("/opt/ti/bin/tiarmlnk"))
        );
        assert_eq!(config.toolchain.linker_kind, Some(LinkerKind::TiArmLnk));
        assert_eq!(config.toolchain.target, Some("arm-none-eabi".to_string()));
        assert_eq!(config.toolchain.cross, None);
        assert_eq!(config.toolchain.cflags, vec!["-mcpu=cortex-m4", "-mthumb"]);
        assert_eq!(config.build.optimization, Some(OptimizationLevel::Size));
        assert_eq!(config.build.debug, Some(true));
        assert_eq!(config.build.color, Some(ColorChoice::Never));
        assert!(config.has_overrides());
    }

    #[test]
    fn test_toolchain_config_rejects_unknown_optimization() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("toolchain.toml");
        std::fs::write(&config_path, "[build]\noptimization = \"fast\"\n").unwrap();

        let err = ToolchainConfig::load(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse toolchain config"));

        let err = ToolchainConfig::load_or_default(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("fast"));

        // A missing file is not an error
        let missing = ToolchainConfig::load_or_default(&tmp.path().join("absent.toml")).unwrap();
        assert!(!missing.has_overrides());
    }

    #[test]
    fn test_load_toolchain_config_rejects_bad_project_layer() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            "[toolchain]\ncc = \"tiarmclang\"\ntarget = \"arm-none-eabi\"\n",
        )
        .unwrap();
        std::fs::write(
            &project_path,
            "[toolchain]\ncflags = [\"-mcpu=cortex-r5\"]\n\n[build]\noptimization = \"fast\"\n",
        )
        .unwrap();

        let err = load_toolchain_config(&global_path, &project_path).unwrap_err();
        assert!(format!("{:#}", err).contains("project.toml"));
    }

    #[test]
    fn test_toolchain_config_save() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".ccadapt").join("toolchain.toml");

        let mut config = ToolchainConfig::default();
        config.toolchain.cc = Some(PathBuf::from("tiarmclang"));
        config.toolchain.cross = Some(true);
        config.build.optimization = Some(OptimizationLevel::O2);

        config.save(&config_path).unwrap();

        let loaded = ToolchainConfig::load(&config_path).unwrap();
        assert_eq!(loaded.toolchain.cc, Some(PathBuf::from("tiarmclang")));
        assert_eq!(loaded.toolchain.cross, Some(true));
        assert_eq!(loaded.build.optimization, Some(OptimizationLevel::O2));
    }

    #[test]
    fn test_toolchain_config_merge() {
        let mut base = ToolchainConfig::default();
        base.toolchain.cc = Some(PathBuf::from("/usr/bin/gcc"));
        base.toolchain.target = Some("arm-none-eabi".to_string());
        base.toolchain.cflags = vec!["-Wall".to_string()];
        base.build.debug = Some(true);

        let mut override_cfg = ToolchainConfig::default();
        override_cfg.toolchain.cc = Some(PathBuf::from("tiarmclang"));
        override_cfg.toolchain.cflags = vec!["-Werror".to_string()];
        override_cfg.build.color = Some(ColorChoice::Always);

        base.merge(override_cfg);

        // cc should be overridden
        assert_eq!(base.toolchain.cc, Some(PathBuf::from("tiarmclang")));
        // target should remain unchanged
        assert_eq!(base.toolchain.target, Some("arm-none-eabi".to_string()));
        // cflags should be replaced (not merged)
        assert_eq!(base.toolchain.cflags, vec!["-Werror"]);
        assert_eq!(base.build.debug, Some(true));
        assert_eq!(base.build.color, Some(ColorChoice::Always));
    }

    #[test]
    fn test_toolchain_config_has_overrides() {
        let mut config = ToolchainConfig::default();
        assert!(!config.has_overrides());

        config.toolchain.cross = Some(false);
        assert!(config.has_overrides());

        config.toolchain.cross = None;
        config.toolchain.cflags = vec!["-Wall".to_string()];
        assert!(config.has_overrides());

        config.toolchain.cflags.clear();
        config.build.debug = Some(true);
        // Build intents alone don't select a toolchain
        assert!(!config.has_overrides());
    }

    #[test]
    fn test_load_toolchain_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[toolchain]
cc = "tiarmclang"
target = "arm-none-eabi"
cflags = ["-O2"]
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[toolchain]
cc = "/opt/ti/bin/tiarmclang"
cflags = ["-mcpu=cortex-r5"]
"#,
        )
        .unwrap();

        let config = load_toolchain_config(&global_path, &project_path).unwrap();

        assert_eq!(
            config.toolchain.cc,
            Some(PathBuf::from("/opt/ti/bin/tiarmclang"))
        );
        assert_eq!(config.toolchain.target, Some("arm-none-eabi".to_string()));
        assert_eq!(config.toolchain.cflags, vec!["-mcpu=cortex-r5"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_project_toolchain_config_path() {
        let path = project_toolchain_config_path(Path::new("/work/app"));
        assert_eq!(path, PathBuf::from("/work/app/.ccadapt/toolchain.toml"));
    }
}
