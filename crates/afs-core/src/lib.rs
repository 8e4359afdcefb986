//! # afs-core — Addressing and Navigation for AetherFS
//!
//! This crate defines the value types every AetherFS browser front end
//! shares. It performs no I/O; `afs-client` turns its addresses into store
//! requests.
//!
//! ## Key Design Principles
//!
//! 1. **Validated segments.** Scopes, dataset names, tag versions and tree
//!    path components are all [`Segment`]s: non-empty and free of `/`.
//!    No bare strings inside an address.
//!
//! 2. **One address model.** A [`ResourceAddress`] is
//!    `{scope?, dataset, tag?, path[]}`. Parsing and [`ResourceAddress::to_path`]
//!    are exact inverses for every address that can be constructed.
//!
//! 3. **One grammar.** The [`Router`] resolves scoped and unscoped
//!    navigation paths with the same rules; the only difference is whether a
//!    scope segment precedes the dataset.
//!
//! 4. **Immutable values.** Derivations (`with_tag`, `descend`, `ascend`)
//!    return new addresses.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `afs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod address;
pub mod error;
pub mod quantity;
pub mod router;

pub use address::{ResourceAddress, Segment, SEPARATOR, TAG_MARKER, TREE_MARKER};
pub use error::{
    AddressError, AfsError, InvalidNavigation, InvalidQuantity, RouteError, RouteNotFound,
    SegmentError,
};
pub use quantity::Quantity;
pub use router::{Route, Router, ViewKind};
