//! Fully-qualified state paths.
//!
//! A state's path is the list of state names from the chart root down to the
//! state itself. Written form joins the segments with [`StatePath::SEPARATOR`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dotted path from the chart root to a state. The empty path is the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatePath {
    segments: Vec<String>,
}

impl StatePath {
    /// Separator between segments in the written form.
    pub const SEPARATOR: char = '.';

    /// The root path (no segments).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a dotted path. Empty segments are dropped.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split(Self::SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Returns true if the written form names a qualified path.
    #[must_use]
    pub fn is_qualified(name: &str) -> bool {
        name.contains(Self::SEPARATOR)
    }

    /// Returns a new path with `name` appended.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Returns the parent path, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns the segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the nesting depth (0 for the root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if `self` is `other` or one of its ancestors.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.segments.starts_with(&self.segments)
    }

    /// Joins the segments with `separator`.
    #[must_use]
    pub fn mangle(&self, separator: char) -> String {
        self.segments.join(&separator.to_string())
    }

    /// Mangles the fully-qualified name of `leaf` declared in this scope.
    #[must_use]
    pub fn mangle_member(&self, leaf: &str, separator: char) -> String {
        if self.is_root() {
            leaf.to_string()
        } else {
            format!("{}{separator}{leaf}", self.mangle(separator))
        }
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mangle(Self::SEPARATOR))
    }
}

impl From<&str> for StatePath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl FromIterator<String> for StatePath {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
