//! Deployment error taxonomy
//!
//! Typed errors for everything that can go wrong between reading the config
//! files and getting a confirmed receipt. Nothing here is recovered from:
//! every error propagates to the CLI top level, is printed with its chain,
//! and terminates the process with exit code 1.

use alloy::primitives::Address;
use std::path::PathBuf;
use thiserror::Error;

use crate::chains::ChainName;

#[derive(Error, Debug)]
pub enum DeployError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {path}: {reason}")]
    Artifact { path: PathBuf, reason: String },

    // ========================================================================
    // Chain Lookup Errors
    // ========================================================================
    #[error("Unknown chain name: {0}")]
    UnknownChain(String),

    #[error("Chain '{0}' is not present in the registry")]
    ChainNotRegistered(ChainName),

    #[error("Duplicate chain '{0}' in registry")]
    DuplicateChain(ChainName),

    #[error("No chain description matches '{query}'")]
    NoDescriptionMatch { query: String },

    #[error("Chain description query '{query}' is ambiguous: matches {matches:?}")]
    AmbiguousDescription {
        query: String,
        matches: Vec<String>,
    },

    // ========================================================================
    // Record Errors
    // ========================================================================
    #[error("No {role} recorded for chain '{chain}' (run the corresponding deploy first)")]
    MissingDeployment { chain: ChainName, role: String },

    // ========================================================================
    // Transaction Errors
    // ========================================================================
    #[error("Insufficient funds for signer {signer}")]
    InsufficientFunds { signer: Address },

    #[error("Transaction reverted: {context}")]
    Reverted { context: String },

    #[error("Timed out after {seconds}s waiting for confirmation of {context}")]
    ConfirmationTimeout { seconds: u64, context: String },

    #[error("RPC error: {0}")]
    Network(String),
}

impl DeployError {
    /// Wrap a filesystem error with the path it happened on.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DeployError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap a JSON error with the path it happened on.
    pub fn parse(path: &std::path::Path, source: serde_json::Error) -> Self {
        DeployError::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Classify a provider error from transaction submission.
///
/// Alloy surfaces node rejections as opaque RPC error strings, so the kind
/// is recovered by matching on the message text the same way retriable
/// errors are detected elsewhere in the stack.
pub fn classify_send_error(signer: Address, error_text: &str) -> DeployError {
    let lowered = error_text.to_lowercase();

    if lowered.contains("insufficient funds") {
        DeployError::InsufficientFunds { signer }
    } else if lowered.contains("execution reverted") || lowered.contains("revert") {
        DeployError::Reverted {
            context: error_text.to_string(),
        }
    } else {
        DeployError::Network(error_text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> Address {
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse()
            .unwrap()
    }

    #[test]
    fn test_classify_insufficient_funds() {
        let err = classify_send_error(
            signer(),
            "server returned an error response: insufficient funds for gas * price + value",
        );
        assert!(matches!(err, DeployError::InsufficientFunds { .. }));
    }

    #[test]
    fn test_classify_revert() {
        let err = classify_send_error(signer(), "execution reverted: NotRegisteredSender");
        assert!(matches!(err, DeployError::Reverted { .. }));
    }

    #[test]
    fn test_classify_network_fallback() {
        let err = classify_send_error(signer(), "error sending request for url");
        assert!(matches!(err, DeployError::Network(_)));
    }

    #[test]
    fn test_missing_deployment_message_names_chain_and_role() {
        let err = DeployError::MissingDeployment {
            chain: ChainName::Avalanche,
            role: "MessageSender".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("avalanche"));
        assert!(msg.contains("MessageSender"));
    }
}
