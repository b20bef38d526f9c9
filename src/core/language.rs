//! Source languages and the file suffixes that select them.

use std::borrow::Cow;
use std::path::Path;

/// Source language of a compile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// C language (default)
    #[default]
    C,
    /// C++ language
    Cxx,
    /// Assembly, optionally preprocessed
    Asm,
}

impl Language {
    /// Get the language name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "c++",
            Language::Asm => "asm",
        }
    }

    /// Source suffixes (without the dot) for this language.
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Language::C => &["c"],
            Language::Cxx => &["cpp", "cc", "cxx", "c++", "C"],
            Language::Asm => &["s", "sx"],
        }
    }

    /// Classify a source file by its suffix.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = canonical_suffix(path.extension()?.to_str()?);
        [Language::C, Language::Cxx, Language::Asm]
            .into_iter()
            .find(|lang| lang.suffixes().contains(&ext.as_ref()))
    }
}

/// Fold a file suffix to the case it is looked up in.
///
/// Suffixes are case-insensitive, except that `.C` is C++ while `.c` is C.
pub fn canonical_suffix(ext: &str) -> Cow<'_, str> {
    if ext == "C" || !ext.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Borrowed(ext)
    } else {
        Cow::Owned(ext.to_ascii_lowercase())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path(Path::new("src/main.c")), Some(Language::C));
        assert_eq!(Language::from_path(Path::new("drv.cpp")), Some(Language::Cxx));
        assert_eq!(Language::from_path(Path::new("boot.sx")), Some(Language::Asm));
        assert_eq!(Language::from_path(Path::new("README")), None);
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_suffix_case() {
        assert_eq!(Language::from_path(Path::new("startup.S")), Some(Language::Asm));
        assert_eq!(Language::from_path(Path::new("MAIN.CPP")), Some(Language::Cxx));
        assert_eq!(Language::from_path(Path::new("main.C")), Some(Language::Cxx));
        assert_eq!(Language::from_path(Path::new("main.c")), Some(Language::C));

        assert_eq!(canonical_suffix("SX"), "sx");
        assert_eq!(canonical_suffix("C"), "C");
        assert!(matches!(canonical_suffix("cc"), Cow::Borrowed(_)));
    }
}
