//! # Resolve Subcommand
//!
//! Resolves a navigation path to its view and canonical form without
//! contacting the store.

use afs_core::{Router, Segment};
use anyhow::{Context, Result};
use clap::Args;

use crate::output::{to_json, OutputFormat};

/// Arguments for the `afs resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Navigation path, e.g. `/scope/ds/tag/v1/tree/a/b`.
    pub path: String,

    /// Segment the UI is mounted under.
    #[arg(long)]
    pub prefix: Option<String>,
}

pub fn run_resolve(args: &ResolveArgs, format: OutputFormat) -> Result<String> {
    let router = match &args.prefix {
        Some(prefix) => {
            Router::with_prefix(Segment::new(prefix.as_str()).context("invalid --prefix")?)
        }
        None => Router::new(),
    };

    let route = router.resolve(&args.path)?;
    let canonical = router.path_for(&route);
    tracing::debug!(view = %route.view(), %canonical, "resolved");

    match format {
        OutputFormat::Text => Ok(format!("{}\t{}\n", route.view(), canonical)),
        OutputFormat::Json => to_json(&serde_json::json!({
            "view": route.view(),
            "path": canonical,
            "address": route.address(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: &str, prefix: Option<&str>) -> ResolveArgs {
        ResolveArgs {
            path: path.into(),
            prefix: prefix.map(String::from),
        }
    }

    #[test]
    fn text_output_is_view_and_canonical_path() {
        let out = run_resolve(&args("scope1/ds1/tag/v2/tree/a/b", None), OutputFormat::Text).unwrap();
        assert_eq!(out, "file_tree_node\t/scope1/ds1/tag/v2/tree/a/b\n");

        let out = run_resolve(&args("", None), OutputFormat::Text).unwrap();
        assert_eq!(out, "dataset_list\t/\n");
    }

    #[test]
    fn json_output_includes_address() {
        let out = run_resolve(&args("/dataset/ds1/tag/v1", Some("dataset")), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["view"], "tag_overview");
        assert_eq!(value["path"], "/dataset/ds1/tag/v1");
        assert_eq!(value["address"], "ds1/tag/v1");
    }

    #[test]
    fn unresolvable_path_reports_reason() {
        let err = run_resolve(&args("ds1/tree/a", None), OutputFormat::Text).unwrap_err();
        assert_eq!(err.to_string(), "no route for \"ds1/tree/a\": path without tag");
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        assert!(run_resolve(&args("/", Some("a/b")), OutputFormat::Text).is_err());
    }
}
