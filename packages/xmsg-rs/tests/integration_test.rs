//! Integration tests for xmsg-rs
//!
//! The network tests require a local Anvil node:
//! - Anvil running on localhost:8545 (any default configuration)
//!
//! Run with: cargo test --test integration_test -- --ignored --nocapture
//!
//! Optional environment variables:
//! - EVM_RPC_URL (default: http://localhost:8545)
//! - PRIVATE_KEY (default: Anvil's first test key)

use std::env;
use url::Url;

use xmsg_rs::evm::{deploy_contract, EvmClient, CONFIRMATION_TIMEOUT};
use xmsg_rs::CompiledArtifact;

/// Test EVM RPC URL
fn evm_rpc_url() -> Url {
    env::var("EVM_RPC_URL")
        .unwrap_or_else(|_| "http://localhost:8545".to_string())
        .parse()
        .expect("valid RPC URL")
}

/// Anvil's first test account key
fn private_key() -> String {
    env::var("PRIVATE_KEY").unwrap_or_else(|_| {
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string()
    })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// Minimal creation bytecode: deploys a contract with empty runtime code.
/// PUSH1 0x00, PUSH1 0x00, RETURN
const EMPTY_CONTRACT_BYTECODE: &str = "0x60006000f3";

fn minimal_artifact() -> CompiledArtifact {
    let n = std::process::id();
    let path = std::env::temp_dir().join(format!("xmsg-it-artifact-{}.json", n));
    std::fs::write(
        &path,
        format!(
            r#"{{ "abi": [{{"inputs":[],"stateMutability":"nonpayable","type":"constructor"}}], "bytecode": "{}" }}"#,
            EMPTY_CONTRACT_BYTECODE
        ),
    )
    .unwrap();
    let artifact = CompiledArtifact::from_file(&path, "Empty").unwrap();
    std::fs::remove_file(&path).ok();
    artifact
}

// ============================================================================
// Infrastructure Connectivity Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Anvil running"]
async fn test_connect_reports_chain_id() {
    init_tracing();

    let client = EvmClient::connect(&evm_rpc_url(), &private_key())
        .await
        .expect("connect to Anvil");

    assert_eq!(client.chain_id(), 31337);
}

#[tokio::test]
#[ignore = "requires Anvil running"]
async fn test_funded_default_account() {
    init_tracing();

    let client = EvmClient::connect(&evm_rpc_url(), &private_key())
        .await
        .expect("connect to Anvil");

    let balance = client.balance().await.expect("query balance");
    assert!(!balance.is_zero(), "default Anvil account should be funded");
    client.require_funds().await.expect("funds check");
}

#[tokio::test]
async fn test_connect_unreachable_rpc_fails() {
    init_tracing();

    // Reserved TEST-NET address; nothing listens there
    let url: Url = "http://192.0.2.1:8545".parse().unwrap();
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(10),
        EvmClient::connect(&url, &private_key()),
    )
    .await;

    match result {
        Ok(inner) => assert!(inner.is_err(), "connect should fail without an RPC"),
        // A hang until the outer timeout also counts as unreachable
        Err(_) => {}
    }
}

// ============================================================================
// Deployment Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Anvil running"]
async fn test_deploy_minimal_contract() {
    init_tracing();

    let client = EvmClient::connect(&evm_rpc_url(), &private_key())
        .await
        .expect("connect to Anvil");

    let artifact = minimal_artifact();
    let provider = client.provider();
    let deployed = deploy_contract(
        &provider,
        client.signer_address(),
        &artifact,
        &[],
        CONFIRMATION_TIMEOUT,
    )
    .await
    .expect("deploy empty contract");

    assert_ne!(deployed.address, alloy::primitives::Address::ZERO);
}
