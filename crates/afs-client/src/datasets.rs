//! Wire types for the AetherFS dataset API.
//!
//! ## API Paths
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/api/v1/datasets` | List datasets |
//! | GET | `/api/v1/datasets/{dataset}/tags` | List tags of a dataset |
//! | GET | `/api/v1/datasets/{dataset}/tags/{tag}` | Look up tag metadata |
//!
//! The store serves protobuf messages through a JSON gateway: field names are
//! camelCase and 64-bit integers may arrive as JSON strings. Fields use
//! `#[serde(default)]` so absent collections decode as empty; unknown fields
//! are ignored.

use afs_core::{AddressError, Quantity, ResourceAddress, Segment, SEPARATOR};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A dataset as named by the store. Scoped datasets are named `scope/dataset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
}

impl DatasetSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The navigation address of this dataset.
    pub fn address(&self) -> Result<ResourceAddress, AddressError> {
        dataset_address(&self.name)
    }
}

/// A tag of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummary {
    /// Dataset name, `scope/dataset` when scoped.
    pub name: String,
    pub version: String,
}

impl TagSummary {
    /// The navigation address of this tag.
    pub fn address(&self) -> Result<ResourceAddress, AddressError> {
        let version = Segment::new(self.version.as_str())?;
        Ok(dataset_address(&self.name)?.with_tag(version))
    }
}

/// Metadata of one tagged version of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMetadata {
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub block_size: Quantity,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Block signatures; opaque to the browser.
    #[serde(default)]
    pub blocks: Vec<serde_json::Value>,
}

impl TagMetadata {
    /// Sum of all file sizes.
    pub fn total_size(&self) -> Quantity {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// A file inside a tag. `name` is relative to the tag root, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub size: Quantity,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl FileEntry {
    pub fn size(&self) -> Quantity {
        self.size
    }

    /// Non-empty path components of the file name.
    pub(crate) fn components(&self) -> impl Iterator<Item = &str> + '_ {
        self.name.split(SEPARATOR).filter(|c| !c.is_empty())
    }
}

// -- Envelopes ----------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListDatasetsResponse {
    #[serde(default)]
    pub datasets: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListTagsResponse {
    #[serde(default)]
    pub tags: Vec<TagSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LookupTagResponse {
    #[serde(default)]
    pub dataset: TagMetadata,
}

fn dataset_address(name: &str) -> Result<ResourceAddress, AddressError> {
    match name.split_once(SEPARATOR) {
        Some((scope, dataset)) => ResourceAddress::scoped(scope, dataset),
        None => ResourceAddress::unscoped(name),
    }
}

/// Accepts a byte count encoded either as a JSON number or a decimal string.
fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Quantity, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    let bytes = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse::<i64>().map_err(serde::de::Error::custom)?,
    };
    Quantity::of(bytes).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dataset_summary_address_splits_scope() {
        let scoped = DatasetSummary::new("team/images").address().unwrap();
        assert_eq!(scoped.scope().map(Segment::as_str), Some("team"));
        assert_eq!(scoped.dataset(), "images");

        let plain = DatasetSummary::new("images").address().unwrap();
        assert!(!plain.is_scoped());
        assert_eq!(plain.to_path(), "images");
    }

    #[test]
    fn dataset_summary_rejects_nested_name() {
        assert!(DatasetSummary::new("a/b/c").address().is_err());
        assert!(DatasetSummary::new("").address().is_err());
    }

    #[test]
    fn tag_summary_address_carries_version() {
        let tag = TagSummary {
            name: "team/images".into(),
            version: "v2".into(),
        };
        assert_eq!(tag.address().unwrap().to_path(), "team/images/tag/v2");
    }

    #[test]
    fn lookup_accepts_string_encoded_integers() {
        let raw = json!({
            "dataset": {
                "blockSize": "4194304",
                "files": [
                    {"name": "a/b.txt", "size": "1025", "lastModified": "2022-01-02T03:04:05Z"},
                    {"name": "c.txt", "size": 10}
                ],
                "blocks": ["abc"],
                "somethingNew": true
            }
        });
        let resp: LookupTagResponse = serde_json::from_value(raw).unwrap();
        let meta = resp.dataset;
        assert_eq!(meta.block_size.bytes(), 4 * Quantity::MEBIBYTE.bytes());
        assert_eq!(meta.files.len(), 2);
        assert_eq!(meta.files[0].size().bytes(), 1025);
        assert!(meta.files[0].last_modified.is_some());
        assert!(meta.files[1].last_modified.is_none());
        assert_eq!(meta.total_size().bytes(), 1035);
    }

    #[test]
    fn lookup_defaults_missing_fields() {
        let resp: LookupTagResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(resp.dataset, TagMetadata::default());

        let resp: LookupTagResponse =
            serde_json::from_value(json!({"dataset": {"files": [{"name": "x"}]}})).unwrap();
        assert_eq!(resp.dataset.files[0].size().bytes(), 0);
    }

    #[test]
    fn negative_size_is_rejected() {
        let err = serde_json::from_value::<FileEntry>(json!({"name": "x", "size": -1}));
        assert!(err.is_err());
        let err = serde_json::from_value::<FileEntry>(json!({"name": "x", "size": "nope"}));
        assert!(err.is_err());
    }

    #[test]
    fn list_envelopes_default_to_empty() {
        let datasets: ListDatasetsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(datasets.datasets.is_empty());
        let tags: ListTagsResponse = serde_json::from_value(json!({"tags": []})).unwrap();
        assert!(tags.tags.is_empty());
    }

    #[test]
    fn file_components_skip_empty() {
        let f = FileEntry {
            name: "/a//b.txt".into(),
            size: Quantity::default(),
            last_modified: None,
        };
        assert_eq!(f.components().collect::<Vec<_>>(), vec!["a", "b.txt"]);
    }
}
