//! # afs-cli — Command-line browser for AetherFS
//!
//! Provides the `afs` command, a terminal front end over the same navigation
//! model the web UI uses. Every address argument uses the navigation grammar
//! `[scope/]dataset[/tag/<version>[/tree/<path...>]]`.
//!
//! ## Subcommands
//!
//! - `afs datasets`: List datasets.
//! - `afs tags <address>`: List tags of a dataset.
//! - `afs show <address>`: Tag metadata with file sizes.
//! - `afs ls <address>`: Directory listing inside a tag.
//! - `afs cat <address>`: Print a file.
//! - `afs url <address>`: Print a file's gateway URL.
//! - `afs resolve <path>`: Resolve a navigation path offline.
//!
//! ## Crate Policy
//!
//! - Handlers return the rendered output; `main` owns stdout and the exit code.
//! - Store access goes through `afs-client`. No HTTP here.

pub mod browse;
pub mod output;
pub mod resolve;
pub mod store;
