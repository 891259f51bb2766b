//! Xmsg-RS: Shared Library for Wormhole Messaging Deploy Tooling
//!
//! This crate provides the pieces shared by the deployer CLI:
//!
//! - **Chains** - Chain registry with explicit chain-name keys and a checked
//!   description matcher
//! - **Store** - Deployed-contract record store (atomic save) and the
//!   two-phase deploy journal
//! - **Artifact** - Foundry compiled-artifact loading (ABI + creation bytecode)
//! - **EVM Module** - EVM client, contract deployment, typed contract bindings
//! - **Errors** - The deployment error taxonomy and RPC error classification
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! xmsg-rs = { path = "../xmsg-rs" }
//! ```

pub mod artifact;
pub mod chains;
pub mod error;
pub mod evm;
pub mod redact;
pub mod store;

// Re-export commonly used items at the crate root
pub use artifact::CompiledArtifact;
pub use chains::{ChainDescriptor, ChainName, ChainRegistry};
pub use error::DeployError;
pub use redact::Redacted;
pub use store::{ChainDeployments, DeployJournal, DeploymentStore, JournalEntry, Phase};
