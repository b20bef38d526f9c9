//! Compilable source suffixes shared between a toolchain and its compiler family.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::language::canonical_suffix;

/// A shared, grow-only set of file suffixes (without the leading dot).
///
/// Cloning produces another handle to the *same* set. Insertion is the only
/// mutation; suffixes are never removed.
#[derive(Debug, Clone, Default)]
pub struct SuffixSet {
    inner: Arc<RwLock<BTreeSet<String>>>,
}

impl SuffixSet {
    /// Create a set seeded with the given suffixes.
    pub fn with_suffixes<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = suffixes.into_iter().map(Into::into).collect();
        SuffixSet {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    /// Add a suffix. Returns `true` if it was not already present.
    pub fn insert(&self, suffix: impl Into<String>) -> bool {
        let suffix = suffix.into();
        {
            let set = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if set.contains(&suffix) {
                return false;
            }
        }
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(suffix)
    }

    /// Check whether a suffix is present.
    pub fn contains(&self, suffix: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(suffix)
    }

    /// Check whether a source file's extension is in the set, ignoring case
    /// except for `.C`.
    pub fn matches(&self, source: &Path) -> bool {
        source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.contains(&canonical_suffix(e)))
            .unwrap_or(false)
    }

    /// Number of suffixes.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out the current contents, sorted.
    pub fn snapshot(&self) -> BTreeSet<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[cfg(test)]
    fn ptr_eq(&self, other: &SuffixSet) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
