//! EVM Chain Support Module
//!
//! This module provides the EVM-side functionality of the deploy tooling:
//! connecting a funded signer to a chain, deploying compiled contracts, and
//! typed bindings for the messaging contracts.
//!
//! ## Submodules
//!
//! - `client` - EVM RPC client bound to a signing wallet
//! - `contracts` - Messaging contract bindings using alloy sol! macro
//! - `deployer` - Create-transaction deployment and receipt confirmation

pub mod client;
pub mod contracts;
pub mod deployer;

// Re-export commonly used items
pub use client::EvmClient;
pub use contracts::{address_to_bytes32, MessageReceiver, MessageSender, ROLE_RECEIVER, ROLE_SENDER};
pub use deployer::{await_receipt, deploy_contract, require_success, Deployed, CONFIRMATION_TIMEOUT};
