//! # afs CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use afs_cli::browse::{run_browse, BrowseCommand};
use afs_cli::output::{error_json, OutputFormat};
use afs_cli::resolve::{run_resolve, ResolveArgs};
use afs_cli::store::StoreArgs;

/// AetherFS browser.
///
/// Lists datasets and tags, inspects tag file trees, and reads files from an
/// AetherFS store.
#[derive(Parser, Debug)]
#[command(name = "afs", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Browse(BrowseCommand),

    /// Resolve a navigation path to its view and canonical form.
    Resolve(ResolveArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let Cli {
        verbose,
        json,
        store,
        command,
    } = Cli::parse();

    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // stdout carries command output only; logs go to stderr.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let format = OutputFormat::from_flag(json);
    let result = match command {
        Commands::Resolve(args) => run_resolve(&args, format),
        Commands::Browse(command) => match store.client() {
            Ok(client) => run_browse(&command, &client, format).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            if format == OutputFormat::Json {
                println!("{}", error_json(&e));
            }
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_datasets() {
        let cli = Cli::try_parse_from(["afs", "datasets"]).unwrap();
        assert!(matches!(cli.command, Commands::Browse(BrowseCommand::Datasets)));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.json);
    }

    #[test]
    fn cli_parse_cat_with_global_flags() {
        let cli = Cli::try_parse_from([
            "afs",
            "cat",
            "s/ds/tag/v1/tree/a/b.txt",
            "--host",
            "store:9000",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert_eq!(cli.store.host.as_deref(), Some("store:9000"));
        match cli.command {
            Commands::Browse(BrowseCommand::Cat { address }) => {
                assert_eq!(address.tree_path(), "a/b.txt");
                assert!(address.is_scoped());
            }
            other => panic!("expected cat, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_invalid_address() {
        assert!(Cli::try_parse_from(["afs", "ls", "ds/tree/a"]).is_err());
        assert!(Cli::try_parse_from(["afs", "show", "ds/tag"]).is_err());
    }

    #[test]
    fn cli_parse_resolve_with_prefix() {
        let cli = Cli::try_parse_from(["afs", "resolve", "/dataset/ds", "--prefix", "dataset"]).unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.path, "/dataset/ds");
                assert_eq!(args.prefix.as_deref(), Some("dataset"));
            }
            other => panic!("expected resolve, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_timeout() {
        let cli = Cli::try_parse_from(["afs", "--timeout-secs", "7", "url", "ds/tag/v1"]).unwrap();
        assert_eq!(cli.store.timeout_secs, Some(7));
    }
}
