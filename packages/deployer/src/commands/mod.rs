//! Subcommand implementations
//!
//! Each subcommand is a strict linear pipeline: load config files, resolve
//! chains and cross-chain addresses (failing before any network traffic if
//! something is missing), connect the signer, perform the deploy/invoke,
//! then update the record and journal.

pub mod message;
pub mod receiver;
pub mod sender;
pub mod status;
