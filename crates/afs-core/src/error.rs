//! # Error Hierarchy
//!
//! Structured error types for addressing and navigation, built with
//! `thiserror`. Each error carries the offending input so that a caller can
//! show the user what was wrong without re-parsing anything.

use thiserror::Error;

/// Top-level error type for `afs-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AfsError {
    /// Byte quantity rejected at construction.
    #[error(transparent)]
    Quantity(#[from] InvalidQuantity),

    /// Address segment rejected at construction.
    #[error("segment error: {0}")]
    Segment(#[from] SegmentError),

    /// Navigation path could not be parsed into an address.
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Tree navigation attempted on an address with no tag.
    #[error(transparent)]
    Navigation(#[from] InvalidNavigation),

    /// Navigation path matched no route.
    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFound),

    /// Route could not be formatted for the requested view.
    #[error("route error: {0}")]
    Route(#[from] RouteError),
}

/// A negative byte count was supplied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid quantity: {0} (byte counts must be non-negative)")]
pub struct InvalidQuantity(pub i64);

/// A string could not be used as an address segment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// Segments must contain at least one character.
    #[error("segment must be non-empty")]
    Empty,

    /// Segments must not contain the path separator.
    #[error("segment \"{0}\" contains the path separator '/'")]
    ContainsSeparator(String),

    /// `.` and `..` are relative path components, not names.
    #[error("segment \"{0}\" is a relative path component")]
    DotSegment(String),
}

/// A navigation path or component set does not describe a valid address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// No dataset segment was present.
    #[error("missing dataset")]
    MissingDataset,

    /// A `tag` marker was not followed by a version.
    #[error("missing version after \"tag\"")]
    MissingVersion,

    /// A tree path was supplied without a tag.
    #[error("path without tag")]
    PathWithoutTag,

    /// A segment appeared where a `tag` or `tree` marker was expected.
    #[error("unexpected segment \"{0}\"")]
    UnexpectedSegment(String),

    /// A scoped dataset may not be named after a navigation marker.
    #[error("dataset \"{0}\" is reserved in a scoped address")]
    ReservedSegment(String),

    /// A component failed segment validation.
    #[error(transparent)]
    InvalidSegment(#[from] SegmentError),
}

/// `descend` was called on an address that has no tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot descend into \"{address}\": address has no tag")]
pub struct InvalidNavigation {
    /// The address navigation was attempted from.
    pub address: String,
}

/// A navigation path matched none of the known route shapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no route for \"{path}\": {reason}")]
pub struct RouteNotFound {
    /// The path as supplied by the caller.
    pub path: String,
    /// Why the path was rejected.
    pub reason: AddressError,
}

/// A route could not be formatted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The address is missing or does not have the shape the view requires.
    #[error("view {view} cannot be formatted from {address}")]
    ViewMismatch {
        /// The requested view.
        view: crate::router::ViewKind,
        /// The supplied address, or `<none>`.
        address: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_error_reasons_are_human_readable() {
        assert_eq!(AddressError::MissingDataset.to_string(), "missing dataset");
        assert_eq!(AddressError::PathWithoutTag.to_string(), "path without tag");
    }

    #[test]
    fn invalid_quantity_display_includes_value() {
        let msg = InvalidQuantity(-1).to_string();
        assert!(msg.contains("-1"));
    }

    #[test]
    fn route_not_found_display_includes_path_and_reason() {
        let err = RouteNotFound {
            path: "ds1/tree/a".to_string(),
            reason: AddressError::PathWithoutTag,
        };
        let msg = err.to_string();
        assert!(msg.contains("ds1/tree/a"));
        assert!(msg.contains("path without tag"));
    }

    #[test]
    fn afs_error_wraps_segment_error() {
        let err: AfsError = SegmentError::ContainsSeparator("a/b".to_string()).into();
        assert!(format!("{err}").contains("a/b"));
    }

    #[test]
    fn address_error_from_segment_error() {
        let err: AddressError = SegmentError::Empty.into();
        assert_eq!(err, AddressError::InvalidSegment(SegmentError::Empty));
        assert_eq!(err.to_string(), "segment must be non-empty");
    }
}
