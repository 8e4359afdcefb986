//! Directory view over the flat file list of a tag.
//!
//! Tag metadata lists every file by its full relative name. Browsing needs the
//! immediate children of one directory, which this module derives on demand.

use std::collections::{BTreeMap, BTreeSet};

use afs_core::{InvalidNavigation, Quantity, ResourceAddress, Segment};
use serde::Serialize;

use crate::datasets::{FileEntry, TagMetadata};

/// What a tree path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeNode<'a> {
    Directory,
    File(&'a FileEntry),
}

/// An immediate child of a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeEntry {
    Directory { name: Segment },
    File { name: Segment, size: Quantity },
}

impl TreeEntry {
    pub fn name(&self) -> &Segment {
        match self {
            Self::Directory { name } | Self::File { name, .. } => name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Address of this entry below `parent`.
    pub fn address(&self, parent: &ResourceAddress) -> Result<ResourceAddress, InvalidNavigation> {
        parent.descend(self.name().clone())
    }
}

impl TagMetadata {
    /// Look up the node at `path`. The empty path is the root directory.
    ///
    /// An exact file match wins over a directory of the same name.
    pub fn node(&self, path: &[Segment]) -> Option<TreeNode<'_>> {
        if path.is_empty() {
            return Some(TreeNode::Directory);
        }

        let mut is_directory = false;
        for file in &self.files {
            match strip_prefix(file, path) {
                Some(rest) if rest.is_empty() => return Some(TreeNode::File(file)),
                Some(_) => is_directory = true,
                None => {}
            }
        }
        is_directory.then_some(TreeNode::Directory)
    }

    /// Immediate children of the directory at `path`: directories first, then
    /// files, each sorted by name.
    ///
    /// Empty if `path` is a file or does not exist.
    pub fn list(&self, path: &[Segment]) -> Vec<TreeEntry> {
        let mut directories = BTreeSet::new();
        let mut files = BTreeMap::new();

        for file in &self.files {
            let Some(rest) = strip_prefix(file, path) else {
                continue;
            };
            let Some((child, deeper)) = rest.split_first() else {
                continue;
            };
            let Ok(name) = Segment::new(*child) else {
                continue;
            };
            if deeper.is_empty() {
                files.insert(name, file.size());
            } else {
                directories.insert(name);
            }
        }

        directories
            .into_iter()
            .map(|name| TreeEntry::Directory { name })
            .chain(files.into_iter().map(|(name, size)| TreeEntry::File { name, size }))
            .collect()
    }
}

/// The components of `file` below `path`, or `None` if it is not beneath it.
fn strip_prefix<'a>(file: &'a FileEntry, path: &[Segment]) -> Option<Vec<&'a str>> {
    let components: Vec<&str> = file.components().collect();
    if components.len() < path.len() {
        return None;
    }
    let matches = components.iter().zip(path).all(|(c, p)| *c == p.as_str());
    matches.then(|| components[path.len()..].to_vec())
}
