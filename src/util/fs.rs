//! Filesystem and path utilities.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// Unlike `canonicalize`, the path does not have to exist and symlinks are
/// not resolved. `..` at the root stays at the root; leading `..` of a
/// relative path are kept. An empty result becomes `.`.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }

    out.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/file.txt");

        write_string(&path, "content").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let tmp = TempDir::new().unwrap();
        let err = read_to_string(&tmp.path().join("missing")).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_lexically() {
        let cases = [
            ("/home/build/sub/../lib", "/home/build/lib"),
            ("/home/build/./include/", "/home/build/include"),
            ("/a/b/../../..", "/"),
            ("a/../../b", "../b"),
            ("./", "."),
            ("a//b", "a/b"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                normalize_lexically(Path::new(input)),
                PathBuf::from(expected),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_normalize_does_not_require_existence() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does/not/../exist");
        assert_eq!(
            normalize_lexically(&missing),
            tmp.path().join("does").join("exist")
        );
    }
}
