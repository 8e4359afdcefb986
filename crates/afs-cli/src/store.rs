//! Store connection flags.

use afs_client::{StoreClient, StoreConfig};
use anyhow::{Context, Result};
use clap::Args;

/// Where the AetherFS store lives.
///
/// Each flag falls back to its `AETHERFS_*` variable, then to the
/// `StoreConfig` default.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Store protocol, `http` or `https`.
    #[arg(long, global = true, env = "AETHERFS_PROTOCOL")]
    pub protocol: Option<String>,

    /// Store host and port.
    #[arg(long, global = true, env = "AETHERFS_HOST")]
    pub host: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "AETHERFS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl StoreArgs {
    /// Defaults with flag (or variable) values applied.
    pub fn config(&self) -> StoreConfig {
        self.apply(StoreConfig::default())
    }

    pub fn client(&self) -> Result<StoreClient> {
        let config = self.config();
        tracing::debug!(protocol = %config.protocol, host = %config.host, "connecting to store");
        StoreClient::new(config).context("failed to create store client")
    }

    fn apply(&self, mut config: StoreConfig) -> StoreConfig {
        if let Some(protocol) = &self.protocol {
            config.protocol = protocol.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct StoreCli {
        #[command(flatten)]
        store: StoreArgs,
    }

    #[test]
    fn every_flag_reads_its_variable() {
        let cmd = <StoreCli as clap::CommandFactory>::command();
        let envs: Vec<_> = cmd
            .get_arguments()
            .filter_map(|arg| arg.get_env().and_then(|e| e.to_str()).map(String::from))
            .collect();
        assert_eq!(
            envs,
            vec!["AETHERFS_PROTOCOL", "AETHERFS_HOST", "AETHERFS_TIMEOUT_SECS"]
        );
    }

    #[test]
    fn flags_parse_into_config() {
        let cli = StoreCli::try_parse_from([
            "afs",
            "--protocol",
            "https",
            "--host",
            "store:9000",
            "--timeout-secs",
            "4",
        ])
        .unwrap();
        let config = cli.store.config();
        assert_eq!(config.base_url().unwrap().as_str(), "https://store:9000/");
        assert_eq!(config.timeout_secs, 4);
    }

    #[test]
    fn flags_override_base_config() {
        let args = StoreArgs {
            protocol: Some("https".into()),
            host: None,
            timeout_secs: Some(3),
        };
        let config = args.apply(StoreConfig::new("store.internal:9000"));
        assert_eq!(config.protocol, "https");
        assert_eq!(config.host, "store.internal:9000");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn no_flags_keep_base_config() {
        let base = StoreConfig::default();
        assert_eq!(StoreArgs::default().apply(base.clone()), base);
    }
}
