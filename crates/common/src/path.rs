use std::fmt;

use serde::{Deserialize, Serialize};

/// An abstract hierarchical path: a named storage root plus an ordered
/// sequence of segments below it.
///
/// Paths are plain values. They carry no provider-native addressing and are
/// never mutated in place; [`ScopedPath::child`] returns a new path with one
/// more segment. Identity is the (root, segments) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopedPath {
    root: String,
    segments: Vec<String>,
}

impl ScopedPath {
    /// A path pointing at the storage root itself, with no segments.
    pub fn root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            segments: Vec::new(),
        }
    }

    pub fn new(root: impl Into<String>, segments: Vec<String>) -> Self {
        Self {
            root: root.into(),
            segments,
        }
    }

    pub fn root_name(&self) -> &str {
        &self.root
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The leaf segment, or the root name for a segmentless path.
    pub fn name(&self) -> &str {
        self.segments.last().map(|s| s.as_str()).unwrap_or(&self.root)
    }

    /// Produce the path one segment deeper. The receiver is untouched.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self {
            root: self.root.clone(),
            segments,
        }
    }

    /// The path one segment up, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            root: self.root.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Whether `self` covers `other`: same root, and every segment of `self`
    /// leads `other`'s segment sequence. A path is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.root == other.root && other.segments.starts_with(&self.segments)
    }

    /// The segments of `other` below `self`, in root-to-leaf order.
    /// `None` when `self` is not a prefix of `other`.
    pub fn segments_below<'a>(&self, other: &'a Self) -> Option<&'a [String]> {
        if !self.is_prefix_of(other) {
            return None;
        }
        Some(&other.segments[self.segments.len()..])
    }
}

impl fmt::Display for ScopedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
