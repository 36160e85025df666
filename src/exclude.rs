//! Exclusion list
//!
//! Literal identifiers, image tags, and container names that must never be
//! collected. Matching is exact string equality; there is no globbing or
//! prefix matching.

use crate::error::{DgcError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Set of protected ids and aliases, immutable for the duration of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    entries: HashSet<String>,
}

impl ExclusionList {
    /// An empty list that excludes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the list from an optional source. No path means an empty list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::empty()),
        }
    }

    /// Read a file, or every regular file directly inside a directory.
    ///
    /// Lines are trimmed; blank lines and `#` comments are skipped.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source_err = |source| DgcError::ExcludeSource {
            path: path.to_path_buf(),
            source,
        };

        let meta = fs::metadata(path).map_err(source_err)?;
        let mut list = Self::empty();

        if meta.is_dir() {
            let walker = WalkDir::new(path)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name();
            for entry in walker {
                let entry = entry.map_err(|e| source_err(e.into()))?;
                if entry.file_type().is_file() {
                    let content = fs::read_to_string(entry.path()).map_err(source_err)?;
                    list.extend_from_str(&content);
                }
            }
        } else {
            let content = fs::read_to_string(path).map_err(source_err)?;
            list.extend_from_str(&content);
        }

        debug!("Loaded {} exclusions from {}", list.len(), path.display());
        Ok(list)
    }

    fn extend_from_str(&mut self, content: &str) {
        let lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));
        self.entries.extend(lines.map(String::from));
    }

    /// Whether `id` or any of `aliases` is listed
    pub fn is_excluded<'a, I>(&self, id: &str, aliases: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.contains(id) || aliases.into_iter().any(|a| self.entries.contains(a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}
