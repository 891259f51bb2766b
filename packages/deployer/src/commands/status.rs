//! status: show the registry, recorded deployments, journal state, and RPC
//! health
//!
//! Read-only; never needs the private key.

use eyre::Result;
use std::time::Duration;
use xmsg_rs::{ChainRegistry, DeployJournal, DeploymentStore};

use crate::config::DeployConfig;

pub async fn run(config: &DeployConfig) -> Result<()> {
    let registry = ChainRegistry::load(&config.chains_path)?;
    let store = DeploymentStore::load(&config.record_path)?;
    let journal = DeployJournal::open(&config.journal_path)?;

    println!("Chains:");
    for chain in &registry.chains {
        let healthy = check_rpc_health(chain.rpc.as_str()).await;
        let marker = if healthy {
            "\x1b[32m●\x1b[0m"
        } else {
            "\x1b[31m●\x1b[0m"
        };
        println!(
            "  {} {:<10} wormhole chain {:<3} {}",
            marker, chain.name, chain.wormhole_chain_id, chain.rpc
        );
        println!("      relayer: {}", chain.wormhole_relayer);
    }
    println!();

    if store.is_empty() {
        println!("No contracts recorded yet.");
    } else {
        println!("Deployed contracts:");
        for (chain, entry) in store.entries() {
            println!("  {} (deployed at {}):", chain, entry.deployed_at);
            for (role, address) in &entry.contracts {
                println!("    {:<16} {}", role, address);
            }
        }
    }
    println!();

    let unresolved = journal.unresolved();
    if unresolved.is_empty() {
        println!("Journal: clean");
    } else {
        println!("Journal: {} unresolved operation(s)", unresolved.len());
        for entry in unresolved {
            println!(
                "  {} {} stuck in phase '{}' since {}",
                entry.chain,
                entry.operation,
                entry.phase.as_str(),
                entry.at
            );
        }
    }

    Ok(())
}

/// Probe an RPC endpoint with a raw eth_blockNumber request
async fn check_rpc_health(rpc_url: &str) -> bool {
    let client = reqwest::Client::new();
    let response = client
        .post(rpc_url)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 1
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await;

    response.is_ok_and(|r| r.status().is_success())
}
