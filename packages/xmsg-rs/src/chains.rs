//! Chain registry
//!
//! Loads the static list of chain descriptors from `chains.json` and resolves
//! entries by explicit chain name. Chains are identified by a `ChainName`
//! key rather than free-text search; a substring matcher over descriptions is
//! kept for operator convenience but errors unless exactly one entry matches.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use url::Url;

use crate::error::DeployError;

/// Explicit chain identifier used as the lookup key in the registry and as
/// the entry key in the deployed-contract record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainName {
    Avalanche,
    Celo,
}

impl ChainName {
    /// Get the chain name as the lowercase record-file key
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainName::Avalanche => "avalanche",
            ChainName::Celo => "celo",
        }
    }
}

impl fmt::Display for ChainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChainName {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avalanche" => Ok(ChainName::Avalanche),
            "celo" => Ok(ChainName::Celo),
            other => Err(DeployError::UnknownChain(other.to_string())),
        }
    }
}

/// One entry of the chain registry file.
///
/// The Wormhole chain ID lives here rather than being hardcoded at the call
/// sites: 6 is Avalanche Fuji, 14 is Celo Alfajores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainDescriptor {
    /// Registry key
    pub name: ChainName,
    /// Human-readable description (e.g. "Avalanche testnet (Fuji)")
    pub description: String,
    /// JSON-RPC endpoint
    pub rpc: Url,
    /// Wormhole relayer contract on this chain
    #[serde(rename = "wormholeRelayer")]
    pub wormhole_relayer: Address,
    /// Wormhole protocol chain ID (not the EVM chain ID)
    #[serde(rename = "wormholeChainId")]
    pub wormhole_chain_id: u16,
}

/// The chain registry: a static list of descriptors, loaded fresh each run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRegistry {
    pub chains: Vec<ChainDescriptor>,
}

impl ChainRegistry {
    /// Load the registry from a JSON file.
    ///
    /// Fails on missing/malformed files and on duplicate chain names.
    pub fn load(path: &Path) -> Result<Self, DeployError> {
        let content = std::fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
        let registry: ChainRegistry =
            serde_json::from_str(&content).map_err(|e| DeployError::parse(path, e))?;
        registry.check_unique()?;
        Ok(registry)
    }

    /// Parse a registry from a JSON string (used by tests and embedders).
    pub fn from_json(json: &str) -> Result<Self, DeployError> {
        let registry: ChainRegistry = serde_json::from_str(json)
            .map_err(|e| DeployError::parse(Path::new("<inline>"), e))?;
        registry.check_unique()?;
        Ok(registry)
    }

    fn check_unique(&self) -> Result<(), DeployError> {
        for (i, chain) in self.chains.iter().enumerate() {
            if self.chains[..i].iter().any(|c| c.name == chain.name) {
                return Err(DeployError::DuplicateChain(chain.name));
            }
        }
        Ok(())
    }

    /// Resolve a chain by its explicit name key.
    pub fn get(&self, name: ChainName) -> Result<&ChainDescriptor, DeployError> {
        self.chains
            .iter()
            .find(|c| c.name == name)
            .ok_or(DeployError::ChainNotRegistered(name))
    }

    /// Resolve a chain by a substring of its description.
    ///
    /// Exactly one entry must match: zero matches and multiple matches are
    /// both errors, never a silent first pick.
    pub fn find_by_description(&self, query: &str) -> Result<&ChainDescriptor, DeployError> {
        let matches: Vec<&ChainDescriptor> = self
            .chains
            .iter()
            .filter(|c| c.description.contains(query))
            .collect();

        match matches.as_slice() {
            [single] => Ok(*single),
            [] => Err(DeployError::NoDescriptionMatch {
                query: query.to_string(),
            }),
            many => Err(DeployError::AmbiguousDescription {
                query: query.to_string(),
                matches: many.iter().map(|c| c.description.clone()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> ChainRegistry {
        ChainRegistry::from_json(
            r#"{
                "chains": [
                    {
                        "name": "avalanche",
                        "description": "Avalanche testnet (Fuji)",
                        "rpc": "https://api.avax-test.network/ext/bc/C/rpc",
                        "wormholeRelayer": "0xA3cF45939bD6260bcFe3D66bc73d60f19e49a8BB",
                        "wormholeChainId": 6
                    },
                    {
                        "name": "celo",
                        "description": "Celo Testnet (Alfajores)",
                        "rpc": "https://alfajores-forno.celo-testnet.org",
                        "wormholeRelayer": "0x306B68267Deb7c5DfCDa3619E22E9Ca39C374f84",
                        "wormholeChainId": 14
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_chain_name_round_trip() {
        for name in [ChainName::Avalanche, ChainName::Celo] {
            let parsed: ChainName = name.as_str().parse().unwrap();
            assert_eq!(parsed, name);
        }
    }

    #[test]
    fn test_chain_name_parse_is_case_insensitive() {
        let parsed: ChainName = "Celo".parse().unwrap();
        assert_eq!(parsed, ChainName::Celo);
    }

    #[test]
    fn test_chain_name_parse_rejects_unknown() {
        let result = "moonbeam".parse::<ChainName>();
        assert!(matches!(result, Err(DeployError::UnknownChain(_))));
    }

    #[test]
    fn test_get_by_name() {
        let registry = sample_registry();
        let chain = registry.get(ChainName::Avalanche).unwrap();
        assert_eq!(chain.wormhole_chain_id, 6);
        assert_eq!(chain.rpc.as_str(), "https://api.avax-test.network/ext/bc/C/rpc");
    }

    #[test]
    fn test_get_missing_chain_fails() {
        let registry = ChainRegistry::from_json(
            r#"{
                "chains": [
                    {
                        "name": "celo",
                        "description": "Celo Testnet (Alfajores)",
                        "rpc": "https://alfajores-forno.celo-testnet.org",
                        "wormholeRelayer": "0x306B68267Deb7c5DfCDa3619E22E9Ca39C374f84",
                        "wormholeChainId": 14
                    }
                ]
            }"#,
        )
        .unwrap();

        let result = registry.get(ChainName::Avalanche);
        assert!(matches!(
            result,
            Err(DeployError::ChainNotRegistered(ChainName::Avalanche))
        ));
    }

    #[test]
    fn test_find_by_description_unique_match() {
        let registry = sample_registry();
        let chain = registry.find_by_description("Avalanche testnet").unwrap();
        assert_eq!(chain.name, ChainName::Avalanche);
    }

    #[test]
    fn test_find_by_description_zero_matches_fails() {
        let registry = sample_registry();
        let result = registry.find_by_description("Moonbeam");
        assert!(matches!(
            result,
            Err(DeployError::NoDescriptionMatch { .. })
        ));
    }

    #[test]
    fn test_find_by_description_multiple_matches_fails() {
        let registry = sample_registry();
        // Both descriptions contain "estnet"
        let result = registry.find_by_description("estnet");
        match result {
            Err(DeployError::AmbiguousDescription { matches, .. }) => {
                assert_eq!(matches.len(), 2);
            }
            other => panic!("expected ambiguous match error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_duplicate_chain_rejected() {
        let result = ChainRegistry::from_json(
            r#"{
                "chains": [
                    {
                        "name": "celo",
                        "description": "Celo Testnet (Alfajores)",
                        "rpc": "https://alfajores-forno.celo-testnet.org",
                        "wormholeRelayer": "0x306B68267Deb7c5DfCDa3619E22E9Ca39C374f84",
                        "wormholeChainId": 14
                    },
                    {
                        "name": "celo",
                        "description": "Celo again",
                        "rpc": "https://alfajores-forno.celo-testnet.org",
                        "wormholeRelayer": "0x306B68267Deb7c5DfCDa3619E22E9Ca39C374f84",
                        "wormholeChainId": 14
                    }
                ]
            }"#,
        );
        assert!(matches!(
            result,
            Err(DeployError::DuplicateChain(ChainName::Celo))
        ));
    }

    #[test]
    fn test_malformed_registry_fails() {
        let result = ChainRegistry::from_json("{ not json");
        assert!(matches!(result, Err(DeployError::Parse { .. })));
    }
}
