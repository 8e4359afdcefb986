//! # afs-client — Typed Rust client for the AetherFS store
//!
//! Translates [`afs_core::ResourceAddress`]es into store requests and decodes
//! the responses:
//! - **Datasets** via `GET /api/v1/datasets`
//! - **Tags** via `GET /api/v1/datasets/{dataset}/tags`
//! - **Tag metadata** via `GET /api/v1/datasets/{dataset}/tags/{tag}`
//! - **File content** via `GET /fs/{dataset}/{tag}/{path...}`
//!
//! `{dataset}` is `scope/dataset` for scoped datasets.
//!
//! ## Architecture
//!
//! Every request path is composed by pushing address segments onto the base
//! URL, so each segment is percent-encoded independently. Do NOT format
//! addresses into URL strings by hand.
//!
//! Each operation issues exactly one request through a [`Transport`]. Errors
//! are returned unchanged: no retries, no caching, no default results.

pub mod config;
pub mod datasets;
pub mod error;
pub mod transport;
pub mod tree;

pub use config::StoreConfig;
pub use datasets::{DatasetSummary, FileEntry, TagMetadata, TagSummary};
pub use error::StoreError;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
pub use tree::{TreeEntry, TreeNode};

use std::time::Duration;

use afs_core::{ResourceAddress, Segment};
use serde::de::DeserializeOwned;
use url::Url;

use crate::datasets::{ListDatasetsResponse, ListTagsResponse, LookupTagResponse};

/// Path segments of the dataset API.
const API_PREFIX: [&str; 3] = ["api", "v1", "datasets"];

/// Path segment of the file-system gateway.
const FS_PREFIX: &str = "fs";

const TAGS: &str = "tags";

/// Client for an AetherFS store.
#[derive(Debug, Clone)]
pub struct StoreClient<T = ReqwestTransport> {
    transport: T,
    base_url: Url,
}

impl StoreClient<ReqwestTransport> {
    /// Create a client over HTTP from configuration.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let base_url = config.base_url()?;
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(base_url, transport))
    }
}

impl<T: Transport> StoreClient<T> {
    /// Create a client sending requests through `transport`.
    ///
    /// A path on `base_url` is kept; request paths are appended to it.
    pub fn with_transport(base_url: Url, transport: T) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// List every dataset in the store.
    ///
    /// Calls `GET {base_url}/api/v1/datasets`.
    pub async fn list_datasets(&self) -> Result<Vec<DatasetSummary>, StoreError> {
        let url = self.url(API_PREFIX)?;
        let resp: ListDatasetsResponse = self.fetch_json(url).await?;
        Ok(resp.datasets.into_iter().map(DatasetSummary::new).collect())
    }

    /// List the tags of the dataset `address` refers to.
    ///
    /// Calls `GET {base_url}/api/v1/datasets/{dataset}/tags`. Any tag or
    /// tree path on the address is ignored.
    pub async fn list_tags(&self, address: &ResourceAddress) -> Result<Vec<TagSummary>, StoreError> {
        let url = self.url(
            API_PREFIX
                .into_iter()
                .chain(address.dataset_segments().map(Segment::as_str))
                .chain([TAGS]),
        )?;
        let resp: ListTagsResponse = self.fetch_json(url).await?;
        Ok(resp.tags)
    }

    /// Look up the metadata of the tag `address` refers to.
    ///
    /// Calls `GET {base_url}/api/v1/datasets/{dataset}/tags/{tag}`.
    pub async fn get_tag(&self, address: &ResourceAddress) -> Result<TagMetadata, StoreError> {
        let tag = require_tag(address)?;
        let url = self.url(
            API_PREFIX
                .into_iter()
                .chain(address.dataset_segments().map(Segment::as_str))
                .chain([TAGS, tag.as_str()]),
        )?;
        let resp: LookupTagResponse = self.fetch_json(url).await?;
        Ok(resp.dataset)
    }

    /// Read the content of the file `address` refers to.
    ///
    /// Calls `GET {base_url}/fs/{dataset}/{tag}/{path...}`.
    pub async fn read_file(&self, address: &ResourceAddress) -> Result<String, StoreError> {
        let url = self.file_url(address)?;
        self.fetch(url).await
    }

    /// The file-system gateway URL serving `address`.
    pub fn file_url(&self, address: &ResourceAddress) -> Result<Url, StoreError> {
        let tag = require_tag(address)?;
        self.url(
            [FS_PREFIX]
                .into_iter()
                .chain(address.dataset_segments().map(Segment::as_str))
                .chain([tag.as_str()])
                .chain(address.path().iter().map(Segment::as_str)),
        )
    }

    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                StoreError::Config(config::ConfigError::InvalidUrl(
                    self.base_url.to_string(),
                    "cannot be a base URL".into(),
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<String, StoreError> {
        let endpoint = format!("GET {}", url.path());
        tracing::debug!(%url, "store request");

        let resp = self
            .transport
            .get(url)
            .await
            .map_err(|source| StoreError::Network {
                endpoint: endpoint.clone(),
                source,
            })?;

        tracing::debug!(endpoint = %endpoint, status = resp.status, "store response");

        if resp.is_success() {
            return Ok(resp.body);
        }

        tracing::warn!(endpoint = %endpoint, status = resp.status, "store request failed");
        Err(match resp.status {
            404 => StoreError::NotFound { endpoint },
            status @ 500..=599 => StoreError::ServerError {
                endpoint,
                status,
                body: resp.body,
            },
            status => StoreError::Status {
                endpoint,
                status,
                body: resp.body,
            },
        })
    }

    async fn fetch_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, StoreError> {
        let endpoint = format!("GET {}", url.path());
        let body = self.fetch(url).await?;
        serde_json::from_str(&body).map_err(|source| StoreError::Decode { endpoint, source })
    }
}

fn require_tag(address: &ResourceAddress) -> Result<&Segment, StoreError> {
    address.tag().ok_or_else(|| StoreError::MissingTag {
        address: address.to_path(),
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    struct NoTransport;

    impl Transport for NoTransport {
        async fn get(&self, _url: Url) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Other("unused".into()))
        }
    }

    fn segment() -> impl Strategy<Value = Segment> {
        prop_oneof![
            8 => "[a-zA-Z0-9._@ %?#-]{1,12}",
            1 => Just(afs_core::TAG_MARKER.to_string()),
            1 => Just(afs_core::TREE_MARKER.to_string()),
        ]
        .prop_filter_map("relative path component", |s| Segment::new(s).ok())
    }

    fn tagged_address() -> impl Strategy<Value = ResourceAddress> {
        (
            proptest::option::of(segment()),
            segment(),
            segment(),
            proptest::collection::vec(segment(), 0..5),
        )
            .prop_filter_map("scoped dataset named after a marker", |(scope, dataset, tag, path)| {
                ResourceAddress::new(scope, dataset, Some(tag), path).ok()
            })
    }

    /// Decode `%XX` escapes in a URL path segment.
    fn percent_decode(segment: &str) -> String {
        let bytes = segment.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' && i + 2 < bytes.len() {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
                out.push(u8::from_str_radix(hex, 16).unwrap());
                i += 3;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }
        String::from_utf8(out).unwrap()
    }

    proptest! {
        /// The wire path carries every address segment, in order, unchanged.
        #[test]
        fn file_url_segments_mirror_the_address(a in tagged_address()) {
            let client = StoreClient::with_transport(Url::parse("http://store.test").unwrap(), NoTransport);
            let url = client.file_url(&a).unwrap();

            let wire: Vec<String> = url.path_segments().unwrap().map(percent_decode).collect();
            let mut expected = vec![FS_PREFIX.to_string()];
            expected.extend(a.dataset_segments().map(|s| s.as_str().to_string()));
            expected.extend(a.tag().map(|t| t.as_str().to_string()));
            expected.extend(a.path().iter().map(|s| s.as_str().to_string()));
            prop_assert_eq!(wire, expected);
        }
    }
}
