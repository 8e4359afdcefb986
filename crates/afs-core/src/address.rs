//! # Resource Addresses
//!
//! A [`ResourceAddress`] names anything a user can browse in the store:
//! a dataset, one of its tags, or a node inside a tag's file tree.
//!
//! ## Path Form
//!
//! ```text
//! [scope/]dataset[/tag/<version>[/tree/<a>/<b>/...]]
//! ```
//!
//! The scope is recognized by position. If the second segment is a marker
//! (`tag` or `tree`) or absent, the first segment is the dataset; otherwise
//! the first two segments are scope and dataset. A scoped dataset therefore
//! cannot be named `tag` or `tree`, and construction rejects it. Every other
//! component, including everything after `tree`, may be any [`Segment`].
//!
//! ## Validation
//!
//! - The dataset is always present.
//! - Every component is a non-empty string without `/`.
//! - A tree path requires a tag.
//!
//! These rules guarantee `ResourceAddress::parse(&a.to_path()) == Ok(a)`.

use std::iter;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AddressError, InvalidNavigation, SegmentError};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// Marker introducing the tag version.
pub const TAG_MARKER: &str = "tag";

/// Marker introducing the file-tree path.
pub const TREE_MARKER: &str = "tree";

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One component of a resource address.
///
/// Non-empty, never contains the path separator, and is never `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Segment(String);

impl Segment {
    /// Create a segment, validating that it is non-empty and contains no `/`.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError`] describing the first rule violated.
    pub fn new(value: impl Into<String>) -> Result<Self, SegmentError> {
        let s = value.into();
        if s.is_empty() {
            return Err(SegmentError::Empty);
        }
        if s.contains(SEPARATOR) {
            return Err(SegmentError::ContainsSeparator(s));
        }
        if s == "." || s == ".." {
            return Err(SegmentError::DotSegment(s));
        }
        Ok(Self(s))
    }

    /// Access the segment string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this segment is one of the navigation markers.
    pub fn is_marker(&self) -> bool {
        is_marker(&self.0)
    }
}

fn is_marker(s: &str) -> bool {
    s == TAG_MARKER || s == TREE_MARKER
}

impl TryFrom<String> for Segment {
    type Error = SegmentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Segment {
    type Error = SegmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Segment {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Segment> for String {
    fn from(segment: Segment) -> Self {
        segment.0
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Segment {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Segment {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ResourceAddress
// ---------------------------------------------------------------------------

/// Address of a dataset, a tag, or a node in a tag's file tree.
///
/// Serializes as its path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceAddress {
    scope: Option<Segment>,
    dataset: Segment,
    tag: Option<Segment>,
    path: Vec<Segment>,
}

impl ResourceAddress {
    /// Create an address from validated components.
    ///
    /// # Errors
    ///
    /// - [`AddressError::PathWithoutTag`] if `path` is non-empty and `tag` is absent.
    /// - [`AddressError::ReservedSegment`] if a scoped dataset is named `tag` or `tree`.
    pub fn new(
        scope: Option<Segment>,
        dataset: Segment,
        tag: Option<Segment>,
        path: Vec<Segment>,
    ) -> Result<Self, AddressError> {
        if !path.is_empty() && tag.is_none() {
            return Err(AddressError::PathWithoutTag);
        }
        if scope.is_some() && dataset.is_marker() {
            return Err(AddressError::ReservedSegment(dataset.0));
        }
        Ok(Self {
            scope,
            dataset,
            tag,
            path,
        })
    }

    /// Create an address from raw string components.
    pub fn from_parts(
        scope: Option<&str>,
        dataset: &str,
        tag: Option<&str>,
        path: &[&str],
    ) -> Result<Self, AddressError> {
        let scope = scope.map(Segment::new).transpose()?;
        let dataset = Segment::new(dataset)?;
        let tag = tag.map(Segment::new).transpose()?;
        let path = path
            .iter()
            .map(|s| Segment::new(*s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(scope, dataset, tag, path)
    }

    /// Address of an unscoped dataset.
    pub fn unscoped(dataset: &str) -> Result<Self, AddressError> {
        Self::from_parts(None, dataset, None, &[])
    }

    /// Address of a dataset inside `scope`.
    pub fn scoped(scope: &str, dataset: &str) -> Result<Self, AddressError> {
        Self::from_parts(Some(scope), dataset, None, &[])
    }

    /// Parse a navigation path.
    ///
    /// Empty segments from leading, trailing, or repeated separators are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError`] naming why the path is not an address.
    pub fn parse(path: &str) -> Result<Self, AddressError> {
        let segments: Vec<&str> = path.split(SEPARATOR).filter(|s| !s.is_empty()).collect();
        Self::from_segments(&segments)
    }

    pub(crate) fn from_segments(segments: &[&str]) -> Result<Self, AddressError> {
        let (scope, dataset, rest) = match segments {
            [] => return Err(AddressError::MissingDataset),
            [dataset] => (None, *dataset, &segments[1..]),
            [dataset, marker, ..] if is_marker(marker) => (None, *dataset, &segments[1..]),
            [scope, dataset, ..] => (Some(*scope), *dataset, &segments[2..]),
        };

        let (tag, path): (Option<&str>, &[&str]) = match rest {
            [] => (None, &[]),
            [TAG_MARKER] => return Err(AddressError::MissingVersion),
            [TAG_MARKER, version] => (Some(*version), &[]),
            [TAG_MARKER, version, TREE_MARKER, path @ ..] => (Some(*version), path),
            [TAG_MARKER, _, other, ..] => {
                return Err(AddressError::UnexpectedSegment((*other).to_string()))
            }
            [TREE_MARKER, ..] => return Err(AddressError::PathWithoutTag),
            [other, ..] => return Err(AddressError::UnexpectedSegment((*other).to_string())),
        };

        Self::from_parts(scope, dataset, tag, path)
    }

    /// The scope, if the dataset lives in one.
    pub fn scope(&self) -> Option<&Segment> {
        self.scope.as_ref()
    }

    /// The dataset name.
    pub fn dataset(&self) -> &Segment {
        &self.dataset
    }

    /// The tag version, if the address refers to one.
    pub fn tag(&self) -> Option<&Segment> {
        self.tag.as_ref()
    }

    /// The location inside the tag's file tree.
    pub fn path(&self) -> &[Segment] {
        &self.path
    }

    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }

    /// The segments naming the dataset: `[scope?, dataset]`.
    ///
    /// Both the navigation path and the store's wire paths are built from
    /// this sequence.
    pub fn dataset_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.scope.iter().chain(iter::once(&self.dataset))
    }

    /// The tree path joined with `/`, as file names appear in tag metadata.
    pub fn tree_path(&self) -> String {
        join(self.path.iter().map(Segment::as_str))
    }

    /// Every segment of the navigation path, markers included.
    pub fn segments(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.dataset_segments().map(Segment::as_str).collect();
        if let Some(tag) = &self.tag {
            out.push(TAG_MARKER);
            out.push(tag.as_str());
            if !self.path.is_empty() {
                out.push(TREE_MARKER);
                out.extend(self.path.iter().map(Segment::as_str));
            }
        }
        out
    }

    /// Serialize to `[scope/]dataset[/tag/<version>[/tree/<path...>]]`.
    pub fn to_path(&self) -> String {
        join(self.segments())
    }

    /// Copy with the tag replaced. Changing version clears the tree position.
    pub fn with_tag(&self, tag: Segment) -> Self {
        Self {
            scope: self.scope.clone(),
            dataset: self.dataset.clone(),
            tag: Some(tag),
            path: Vec::new(),
        }
    }

    /// Copy referring to the owning dataset.
    pub fn without_tag(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            dataset: self.dataset.clone(),
            tag: None,
            path: Vec::new(),
        }
    }

    /// Copy with `segment` appended to the tree path.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNavigation`] if the address has no tag.
    pub fn descend(&self, segment: Segment) -> Result<Self, InvalidNavigation> {
        if self.tag.is_none() {
            return Err(InvalidNavigation {
                address: self.to_path(),
            });
        }
        let mut next = self.clone();
        next.path.push(segment);
        Ok(next)
    }

    /// Copy with the last tree segment removed; unchanged if the path is empty.
    pub fn ascend(&self) -> Self {
        let mut next = self.clone();
        next.path.pop();
        next
    }
}

fn join<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}

impl FromStr for ResourceAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ResourceAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResourceAddress> for String {
    fn from(address: ResourceAddress) -> Self {
        address.to_path()
    }
}

impl std::fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_path())
    }
}
