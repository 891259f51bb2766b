//! send-message: quote the relay fee and send a test cross-chain message
//!
//! Both recorded addresses are resolved before anything touches the
//! network. The record file is never modified here; only the journal logs
//! the send. Note there is no idempotence guard: running this twice sends
//! two independent messages, each paying its own quoted fee.

use eyre::Result;
use tracing::info;
use xmsg_rs::error::{classify_send_error, DeployError};
use xmsg_rs::evm::{await_receipt, require_success, EvmClient, MessageSender, ROLE_RECEIVER, ROLE_SENDER};
use xmsg_rs::{ChainName, ChainRegistry, DeployJournal, DeploymentStore};

use crate::config::DeployConfig;

pub async fn run(
    config: &DeployConfig,
    from: ChainName,
    to: ChainName,
    message: &str,
) -> Result<()> {
    let registry = ChainRegistry::load(&config.chains_path)?;
    let source = registry.get(from)?;
    let target = registry.get(to)?;

    let store = DeploymentStore::load(&config.record_path)?;
    // Fail fast: both ends must already be recorded
    let sender_address = store.require_address(from, ROLE_SENDER)?;
    let receiver_address = store.require_address(to, ROLE_RECEIVER)?;

    println!("Sender contract:   {}", sender_address);
    println!("Receiver contract: {}", receiver_address);

    let mut journal = DeployJournal::open(&config.journal_path)?;
    let client = EvmClient::connect(&source.rpc, config.require_private_key()?).await?;
    client.require_funds().await?;

    let provider = client.provider();
    let sender = MessageSender::new(sender_address, &provider);

    // Quote the delivery cost; a zero or stale quote makes the send revert
    let cost = sender
        .quoteCrossChainCost(target.wormhole_chain_id)
        .call()
        .await
        .map_err(|e| DeployError::Network(format!("quoteCrossChainCost: {}", e)))?
        .cost;
    info!(
        target = %target.name,
        cost_wei = %cost,
        "Quoted cross-chain delivery cost"
    );

    let send_op = format!("{}.sendMessage", ROLE_SENDER);
    journal.submitted(from, &send_op)?;
    let pending = sender
        .sendMessage(target.wormhole_chain_id, receiver_address, message.to_string())
        .value(cost)
        .send()
        .await
        .map_err(|e| classify_send_error(client.signer_address(), &e.to_string()))?;
    let tx_hash = *pending.tx_hash();

    println!("Transaction sent, waiting for confirmation...");
    let receipt = await_receipt(pending.get_receipt(), config.tx_timeout, &send_op).await?;
    require_success(&receipt)?;
    journal.confirmed(from, &send_op, &tx_hash.to_string(), None)?;
    journal.recorded(from, &send_op)?;

    println!("Message sent! Transaction hash: {}", tx_hash);
    println!("Track delivery: {}", explorer_url(&tx_hash.to_string()));
    Ok(())
}

/// Wormhole explorer link for a testnet transaction
fn explorer_url(tx_hash: &str) -> String {
    format!("https://wormholescan.io/#/tx/{}?network=TESTNET", tx_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explorer_url() {
        let url = explorer_url("0xabc");
        assert_eq!(url, "https://wormholescan.io/#/tx/0xabc?network=TESTNET");
    }
}
