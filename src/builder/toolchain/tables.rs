//! Shared compiler-family argument tables.
//!
//! These tables are process-wide, read-only data shared by every family that
//! speaks a clang-like dialect. Families index into them; they never own or
//! modify them. Keys are closed enumerations, so an in-range lookup can never
//! fail; string keys are validated when parsed.

use serde::{Deserialize, Serialize};

/// Diagnostic color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when the driver decides the output is a terminal
    #[default]
    Auto,
    /// Always emit color escapes
    Always,
    /// Never emit color escapes
    Never,
}

impl ColorChoice {
    /// All modes, in table order.
    pub const ALL: [ColorChoice; 3] = [ColorChoice::Auto, ColorChoice::Always, ColorChoice::Never];

    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        }
    }
}

impl std::fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = ColorChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(ColorChoiceParseError(s.to_string())),
        }
    }
}

/// Error returned when a color mode is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color mode '{0}', valid values: auto, always, never")]
pub struct ColorChoiceParseError(pub String);

/// Optimization level selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OptimizationLevel {
    /// No optimization flags at all
    #[serde(rename = "plain")]
    Plain,
    /// `-O0`
    #[default]
    #[serde(rename = "0")]
    O0,
    /// Optimize for debugging experience
    #[serde(rename = "g")]
    Debug,
    /// `-O1`
    #[serde(rename = "1")]
    O1,
    /// `-O2`
    #[serde(rename = "2")]
    O2,
    /// `-O3`
    #[serde(rename = "3")]
    O3,
    /// Optimize for size
    #[serde(rename = "s")]
    Size,
}

impl OptimizationLevel {
    /// All levels, in table order.
    pub const ALL: [OptimizationLevel; 7] = [
        OptimizationLevel::Plain,
        OptimizationLevel::O0,
        OptimizationLevel::Debug,
        OptimizationLevel::O1,
        OptimizationLevel::O2,
        OptimizationLevel::O3,
        OptimizationLevel::Size,
    ];

    /// Get the level as its option value (e.g., "2", "s").
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationLevel::Plain => "plain",
            OptimizationLevel::O0 => "0",
            OptimizationLevel::Debug => "g",
            OptimizationLevel::O1 => "1",
            OptimizationLevel::O2 => "2",
            OptimizationLevel::O3 => "3",
            OptimizationLevel::Size => "s",
        }
    }
}

impl std::fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OptimizationLevel {
    type Err = OptimizationLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(OptimizationLevel::Plain),
            "0" => Ok(OptimizationLevel::O0),
            "g" => Ok(OptimizationLevel::Debug),
            "1" => Ok(OptimizationLevel::O1),
            "2" => Ok(OptimizationLevel::O2),
            "3" => Ok(OptimizationLevel::O3),
            "s" => Ok(OptimizationLevel::Size),
            _ => Err(OptimizationLevelParseError(s.to_string())),
        }
    }
}

/// Error returned when an optimization level is outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid optimization level '{0}', valid values: plain, 0, g, 1, 2, 3, s")]
pub struct OptimizationLevelParseError(pub String);

const CLANG_COLOR_AUTO: &[&str] = &["-fcolor-diagnostics"];
const CLANG_COLOR_ALWAYS: &[&str] = &["-fcolor-diagnostics"];
const CLANG_COLOR_NEVER: &[&str] = &["-fno-color-diagnostics"];

/// Clang's color-diagnostics arguments for a mode.
pub fn clang_color_args(choice: ColorChoice) -> &'static [&'static str] {
    match choice {
        ColorChoice::Auto => CLANG_COLOR_AUTO,
        ColorChoice::Always => CLANG_COLOR_ALWAYS,
        ColorChoice::Never => CLANG_COLOR_NEVER,
    }
}

/// Clang's optimization arguments for a level.
pub fn clang_optimization_args(level: OptimizationLevel) -> &'static [&'static str] {
    match level {
        OptimizationLevel::Plain => &[],
        OptimizationLevel::O0 => &["-O0"],
        OptimizationLevel::Debug => &["-Og"],
        OptimizationLevel::O1 => &["-O1"],
        OptimizationLevel::O2 => &["-O2"],
        OptimizationLevel::O3 => &["-O3"],
        OptimizationLevel::Size => &["-Oz"],
    }
}

/// Debug arguments shared by every C-like compiler.
pub fn clike_debug_args(is_debug: bool) -> &'static [&'static str] {
    if is_debug {
        &["-g"]
    } else {
        &[]
    }
}

/// Copy a table entry into an owned argument list.
pub(crate) fn to_args(entry: &[&str]) -> Vec<String> {
    entry.iter().map(|s| s.to_string()).collect()
}
