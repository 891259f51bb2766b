//! Deployer configuration
//!
//! File paths come from CLI flags; the signer key comes from the
//! environment (optionally via a `.env` file). The key is wrapped in
//! [`Redacted`] so a debug dump of the config can never leak it.

use eyre::{eyre, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use xmsg_rs::Redacted;

#[derive(Debug)]
pub struct DeployConfig {
    /// Chain registry file
    pub chains_path: PathBuf,
    /// Deployed-contract record file
    pub record_path: PathBuf,
    /// Two-phase deploy journal, kept next to the record file
    pub journal_path: PathBuf,
    /// Foundry artifacts directory
    pub artifacts_dir: PathBuf,
    /// Bound on each receipt wait
    pub tx_timeout: Duration,
    private_key: Option<Redacted<String>>,
}

impl DeployConfig {
    /// Assemble the configuration from CLI flags and the environment.
    pub fn load(deploy_config_dir: &Path, artifacts_dir: &Path, timeout_secs: u64) -> Result<Self> {
        // Try to load .env file
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded .env from {:?}", path);
        }

        let private_key = std::env::var("PRIVATE_KEY").ok();
        let config = Self::from_parts(deploy_config_dir, artifacts_dir, timeout_secs, private_key);
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn from_parts(
        deploy_config_dir: &Path,
        artifacts_dir: &Path,
        timeout_secs: u64,
        private_key: Option<String>,
    ) -> Self {
        Self {
            chains_path: deploy_config_dir.join("chains.json"),
            record_path: deploy_config_dir.join("deployedContracts.json"),
            journal_path: deploy_config_dir.join("deployedContracts.journal.json"),
            artifacts_dir: artifacts_dir.to_path_buf(),
            tx_timeout: Duration::from_secs(timeout_secs),
            private_key: private_key.map(Redacted::new),
        }
    }

    /// The signer key, required by every transaction-sending subcommand.
    /// `status` never calls this.
    pub fn require_private_key(&self) -> Result<&str> {
        self.private_key
            .as_ref()
            .map(|k| k.expose().as_str())
            .ok_or_else(|| eyre!("PRIVATE_KEY environment variable is required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_config_dir() {
        let config = DeployConfig::from_parts(
            Path::new("deploy-config"),
            Path::new("out"),
            120,
            None,
        );

        assert_eq!(config.chains_path, Path::new("deploy-config/chains.json"));
        assert_eq!(
            config.record_path,
            Path::new("deploy-config/deployedContracts.json")
        );
        assert_eq!(
            config.journal_path,
            Path::new("deploy-config/deployedContracts.journal.json")
        );
        assert_eq!(config.artifacts_dir, Path::new("out"));
        assert_eq!(config.tx_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_missing_private_key_fails() {
        let config =
            DeployConfig::from_parts(Path::new("deploy-config"), Path::new("out"), 120, None);
        assert!(config.require_private_key().is_err());
    }

    #[test]
    fn test_private_key_is_redacted_in_debug_output() {
        let config = DeployConfig::from_parts(
            Path::new("deploy-config"),
            Path::new("out"),
            120,
            Some("0xdeadbeefcafe".to_string()),
        );

        assert_eq!(config.require_private_key().unwrap(), "0xdeadbeefcafe");

        let dump = format!("{:?}", config);
        assert!(!dump.contains("deadbeef"));
        assert!(dump.contains("<redacted>"));
    }
}
