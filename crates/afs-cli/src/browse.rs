//! # Browse Subcommands
//!
//! Store-backed commands. Each one maps its address argument to a single
//! `StoreClient` call and renders the result.
//!
//! - `datasets`: `GET /api/v1/datasets`
//! - `tags`: `GET /api/v1/datasets/{dataset}/tags`
//! - `show`, `ls`: `GET /api/v1/datasets/{dataset}/tags/{tag}`
//! - `cat`: `GET /fs/{dataset}/{tag}/{path}`
//! - `url`: no request

use afs_client::{DatasetSummary, StoreClient, TagMetadata, TagSummary, Transport, TreeEntry, TreeNode};
use afs_core::ResourceAddress;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use serde_json::json;

use crate::output::{to_json, OutputFormat};

/// Store-backed subcommands.
#[derive(Subcommand, Debug)]
pub enum BrowseCommand {
    /// List datasets in the store.
    Datasets,

    /// List tags of a dataset.
    Tags {
        /// Dataset address, e.g. `scope/dataset`.
        address: ResourceAddress,
    },

    /// Show tag metadata: files, sizes, and total.
    Show {
        /// Tag address, e.g. `dataset/tag/v1`.
        address: ResourceAddress,
    },

    /// List a directory inside a tag.
    Ls {
        /// Tag or tree address, e.g. `dataset/tag/v1/tree/dir`.
        address: ResourceAddress,
    },

    /// Print a file from a tag.
    Cat {
        /// File address, e.g. `dataset/tag/v1/tree/dir/file.txt`.
        address: ResourceAddress,
    },

    /// Print the gateway URL of a file.
    Url {
        /// File address.
        address: ResourceAddress,
    },
}

pub async fn run_browse<T: Transport>(
    command: &BrowseCommand,
    client: &StoreClient<T>,
    format: OutputFormat,
) -> Result<String> {
    match command {
        BrowseCommand::Datasets => {
            let datasets = client.list_datasets().await.context("failed to list datasets")?;
            render_datasets(&datasets, format)
        }
        BrowseCommand::Tags { address } => {
            let tags = client
                .list_tags(address)
                .await
                .with_context(|| format!("failed to list tags of {address}"))?;
            render_tags(&tags, format)
        }
        BrowseCommand::Show { address } => {
            let meta = lookup(client, address).await?;
            render_tag(address, &meta, format)
        }
        BrowseCommand::Ls { address } => {
            let meta = lookup(client, address).await?;
            let entries = match meta.node(address.path()) {
                Some(TreeNode::Directory) => meta.list(address.path()),
                Some(TreeNode::File(file)) => match address.path().last() {
                    Some(name) => vec![TreeEntry::File {
                        name: name.clone(),
                        size: file.size(),
                    }],
                    None => Vec::new(),
                },
                None => bail!("{address}: no such file or directory"),
            };
            render_listing(address, &entries, format)
        }
        BrowseCommand::Cat { address } => {
            let content = client
                .read_file(address)
                .await
                .with_context(|| format!("failed to read {address}"))?;
            match format {
                OutputFormat::Text => Ok(content),
                OutputFormat::Json => to_json(&json!({ "address": address, "content": content })),
            }
        }
        BrowseCommand::Url { address } => {
            let url = client.file_url(address)?;
            match format {
                OutputFormat::Text => Ok(format!("{url}\n")),
                OutputFormat::Json => to_json(&json!({ "address": address, "url": url.as_str() })),
            }
        }
    }
}

async fn lookup<T: Transport>(client: &StoreClient<T>, address: &ResourceAddress) -> Result<TagMetadata> {
    client
        .get_tag(address)
        .await
        .with_context(|| format!("failed to look up {address}"))
}

fn render_datasets(datasets: &[DatasetSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(datasets.iter().map(|d| format!("{}\n", d.name)).collect()),
        OutputFormat::Json => to_json(datasets),
    }
}

fn render_tags(tags: &[TagSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(tags
            .iter()
            .map(|t| {
                let target = t.address().map_or_else(|_| t.name.clone(), |a| a.to_path());
                format!("{}\t{}\n", t.version, target)
            })
            .collect()),
        OutputFormat::Json => to_json(tags),
    }
}

fn render_tag(address: &ResourceAddress, meta: &TagMetadata, format: OutputFormat) -> Result<String> {
    let total = meta.total_size();
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for file in &meta.files {
                out.push_str(&format!("{:>10}  {}\n", file.size().to_display_string(), file.name));
            }
            out.push_str(&format!(
                "{:>10}  total ({} files, block size {})\n",
                total.to_display_string(),
                meta.files.len(),
                meta.block_size.to_display_string(),
            ));
            Ok(out)
        }
        OutputFormat::Json => to_json(&json!({
            "address": address.tag().map(|tag| address.with_tag(tag.clone())),
            "blockSize": meta.block_size,
            "files": meta.files,
            "totalSize": total,
        })),
    }
}

fn render_listing(address: &ResourceAddress, entries: &[TreeEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(entries
            .iter()
            .map(|entry| match entry {
                TreeEntry::Directory { name } => format!("{:>10}  {name}/\n", "-"),
                TreeEntry::File { name, size } => format!("{:>10}  {name}\n", size.to_display_string()),
            })
            .collect()),
        OutputFormat::Json => {
            let children: Vec<_> = entries
                .iter()
                .map(|entry| {
                    json!({
                        "entry": entry,
                        "address": entry.address(address).ok(),
                    })
                })
                .collect();
            to_json(&json!({ "address": address, "entries": children }))
        }
    }
}
