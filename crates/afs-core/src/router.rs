//! # Navigation Routes
//!
//! Maps navigation paths to [`Route`]s and back. Scoped and unscoped
//! addresses share one grammar; a leading scope segment is the only
//! difference between them.
//!
//! ```text
//! /                                                 -> DatasetList
//! /{scope}/{dataset}                                -> DatasetOverview
//! /{scope}/{dataset}/tag/{version}                  -> TagOverview
//! /{scope}/{dataset}/tag/{version}/tree/{a}/{b}/... -> FileTreeNode
//! ```
//!
//! A [`Router`] may be mounted under a fixed prefix segment, in which case
//! every non-root path must start with it.

use serde::{Deserialize, Serialize};

use crate::address::{ResourceAddress, Segment, SEPARATOR};
use crate::error::{AddressError, RouteError, RouteNotFound};

/// The page a navigation path leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    DatasetList,
    DatasetOverview,
    TagOverview,
    FileTreeNode,
}

impl ViewKind {
    /// The view an address is displayed in.
    pub fn of(address: &ResourceAddress) -> Self {
        match (address.tag(), address.path().is_empty()) {
            (None, _) => Self::DatasetOverview,
            (Some(_), true) => Self::TagOverview,
            (Some(_), false) => Self::FileTreeNode,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DatasetList => "dataset_list",
            Self::DatasetOverview => "dataset_overview",
            Self::TagOverview => "tag_overview",
            Self::FileTreeNode => "file_tree_node",
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    DatasetList,
    DatasetOverview(ResourceAddress),
    TagOverview(ResourceAddress),
    FileTreeNode(ResourceAddress),
}

impl Route {
    /// The route displaying `address`.
    pub fn from_address(address: ResourceAddress) -> Self {
        match ViewKind::of(&address) {
            ViewKind::DatasetOverview => Self::DatasetOverview(address),
            ViewKind::TagOverview => Self::TagOverview(address),
            ViewKind::FileTreeNode => Self::FileTreeNode(address),
            ViewKind::DatasetList => Self::DatasetList,
        }
    }

    pub fn view(&self) -> ViewKind {
        match self {
            Self::DatasetList => ViewKind::DatasetList,
            Self::DatasetOverview(_) => ViewKind::DatasetOverview,
            Self::TagOverview(_) => ViewKind::TagOverview,
            Self::FileTreeNode(_) => ViewKind::FileTreeNode,
        }
    }

    /// The address shown by this route; `None` for the dataset list.
    pub fn address(&self) -> Option<&ResourceAddress> {
        match self {
            Self::DatasetList => None,
            Self::DatasetOverview(a) | Self::TagOverview(a) | Self::FileTreeNode(a) => Some(a),
        }
    }

    pub fn into_address(self) -> Option<ResourceAddress> {
        match self {
            Self::DatasetList => None,
            Self::DatasetOverview(a) | Self::TagOverview(a) | Self::FileTreeNode(a) => Some(a),
        }
    }
}

/// Resolves and formats navigation paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Router {
    prefix: Option<Segment>,
}

impl Router {
    /// A router serving the grammar at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// A router serving the grammar under `/{prefix}/...`.
    pub fn with_prefix(prefix: Segment) -> Self {
        Self {
            prefix: Some(prefix),
        }
    }

    pub fn prefix(&self) -> Option<&Segment> {
        self.prefix.as_ref()
    }

    /// Resolve a navigation path.
    ///
    /// The root (`""` or `"/"`) resolves to [`Route::DatasetList`]; every
    /// other path must parse as a [`ResourceAddress`].
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] carrying the path and the parse failure.
    pub fn resolve(&self, path: &str) -> Result<Route, RouteNotFound> {
        let segments: Vec<&str> = path.split(SEPARATOR).filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Ok(Route::DatasetList);
        }

        let not_found = |reason: AddressError| RouteNotFound {
            path: path.to_string(),
            reason,
        };

        let rest = match &self.prefix {
            None => &segments[..],
            Some(prefix) if segments[0] == prefix.as_str() => &segments[1..],
            Some(_) => return Err(not_found(AddressError::UnexpectedSegment(segments[0].to_string()))),
        };

        let address = ResourceAddress::from_segments(rest).map_err(not_found)?;
        Ok(Route::from_address(address))
    }

    /// Format the canonical path for `view` showing `address`.
    ///
    /// [`ViewKind::DatasetList`] always formats to the root and ignores the
    /// address.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::ViewMismatch`] when the address is absent or its
    /// shape belongs to a different view.
    pub fn format(
        &self,
        view: ViewKind,
        address: Option<&ResourceAddress>,
    ) -> Result<String, RouteError> {
        if view == ViewKind::DatasetList {
            return Ok(self.root());
        }
        match address {
            Some(address) if ViewKind::of(address) == view => Ok(self.address_path(address)),
            _ => Err(RouteError::ViewMismatch {
                view,
                address: address.map_or_else(|| "<none>".to_string(), ResourceAddress::to_path),
            }),
        }
    }

    /// Format the canonical path of a resolved route.
    pub fn path_for(&self, route: &Route) -> String {
        match route.address() {
            None => self.root(),
            Some(address) => self.address_path(address),
        }
    }

    fn root(&self) -> String {
        SEPARATOR.to_string()
    }

    fn address_path(&self, address: &ResourceAddress) -> String {
        let mut out = String::new();
        if let Some(prefix) = &self.prefix {
            out.push(SEPARATOR);
            out.push_str(prefix.as_str());
        }
        out.push(SEPARATOR);
        out.push_str(&address.to_path());
        out
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::address::strategies::{address, segment};
    use proptest::prelude::*;

    fn router() -> impl Strategy<Value = Router> {
        proptest::option::of(segment()).prop_map(|prefix| match prefix {
            Some(p) => Router::with_prefix(p),
            None => Router::new(),
        })
    }

    proptest! {
        /// Formatting a route then resolving it yields the same route.
        #[test]
        fn resolve_inverts_format(router in router(), a in address()) {
            let view = ViewKind::of(&a);
            let path = router.format(view, Some(&a)).unwrap();
            let route = router.resolve(&path).unwrap();
            prop_assert_eq!(route.view(), view);
            prop_assert_eq!(route.into_address(), Some(a));
        }

        /// Resolving a canonical path then formatting it yields the same path.
        #[test]
        fn format_inverts_resolve(router in router(), a in address()) {
            let path = router.path_for(&Route::from_address(a));
            let route = router.resolve(&path).unwrap();
            prop_assert_eq!(router.format(route.view(), route.address()).unwrap(), path);
        }
    }
}
