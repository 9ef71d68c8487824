//! # Branch and File Set Types
//!
//! Small value types shared by every pipeline phase.
//!
//! - **`TrackingBranch`**: a remote-qualified branch name such as
//!   `origin/feature-x`.
//! - **`ExemptFileSet`**: the deduplicated set of repository-relative paths
//!   that some live branch has edited. Iteration order is sorted so that log
//!   output is reproducible between runs.

use std::collections::BTreeSet;
use std::fmt;

/// A remote-qualified branch name, e.g. `origin/feature-x`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackingBranch(String);

impl TrackingBranch {
    /// Build the tracking branch for `branch` on `remote`.
    pub fn new(remote: &str, branch: &str) -> Self {
        Self(format!("{}/{}", remote, branch))
    }

    /// Wrap an already-qualified name such as a trimmed `git branch -r` line.
    pub fn from_qualified(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackingBranch {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The set of files whose formatter changes must be undone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptFileSet {
    files: BTreeSet<String>,
}

impl ExemptFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path. Returns `true` if it was not already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.files.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Paths in sorted order, as a vector of borrowed strings.
    pub fn to_vec(&self) -> Vec<&str> {
        self.iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ExemptFileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ExemptFileSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.files.extend(iter.into_iter().map(Into::into));
    }
}
