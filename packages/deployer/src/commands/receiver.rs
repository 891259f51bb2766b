//! deploy-receiver: deploy the MessageReceiver contract and register the
//! sender for its source chain
//!
//! The sender's recorded address is resolved before anything touches the
//! network, so running this out of order costs nothing on-chain.

use alloy::sol_types::SolValue;
use chrono::Utc;
use eyre::Result;
use tracing::info;
use xmsg_rs::error::classify_send_error;
use xmsg_rs::evm::{
    address_to_bytes32, await_receipt, deploy_contract, require_success, EvmClient,
    MessageReceiver, ROLE_RECEIVER, ROLE_SENDER,
};
use xmsg_rs::{ChainName, ChainRegistry, CompiledArtifact, DeployError, DeployJournal, DeploymentStore};

use crate::config::DeployConfig;

pub async fn run(
    config: &DeployConfig,
    chain_name: ChainName,
    sender_chain_name: ChainName,
) -> Result<()> {
    let registry = ChainRegistry::load(&config.chains_path)?;
    let chain = registry.get(chain_name)?;
    let sender_chain = registry.get(sender_chain_name)?;

    let mut store = DeploymentStore::load(&config.record_path)?;
    // Fail fast: the sender must already be recorded
    let sender_address = store.require_address(sender_chain_name, ROLE_SENDER)?;

    let mut journal = DeployJournal::open(&config.journal_path)?;
    let artifact = CompiledArtifact::load(&config.artifacts_dir, ROLE_RECEIVER)?;

    let client = EvmClient::connect(&chain.rpc, config.require_private_key()?).await?;
    client.require_funds().await?;

    info!(
        chain = %chain.name,
        relayer = %chain.wormhole_relayer,
        "Deploying MessageReceiver"
    );

    journal.submitted(chain.name, ROLE_RECEIVER)?;
    let provider = client.provider();
    let deployed = deploy_contract(
        &provider,
        client.signer_address(),
        &artifact,
        &chain.wormhole_relayer.abi_encode(),
        config.tx_timeout,
    )
    .await?;
    journal.confirmed(
        chain.name,
        ROLE_RECEIVER,
        &deployed.tx_hash.to_string(),
        Some(deployed.address),
    )?;

    println!("MessageReceiver deployed to: {}", deployed.address);

    // Register the sender contract for its source chain
    let register_op = format!("{}.setRegisteredSender", ROLE_RECEIVER);
    let receiver = MessageReceiver::new(deployed.address, &provider);
    let sender_bytes32 = address_to_bytes32(sender_address);

    journal.submitted(chain.name, &register_op)?;
    let pending = receiver
        .setRegisteredSender(sender_chain.wormhole_chain_id, sender_bytes32)
        .send()
        .await
        .map_err(|e| classify_send_error(client.signer_address(), &e.to_string()))?;
    let tx_hash = *pending.tx_hash();
    let receipt = await_receipt(pending.get_receipt(), config.tx_timeout, &register_op).await?;
    require_success(&receipt)?;

    // Read back the registration before recording anything
    let registered = receiver
        .registeredSenders(sender_chain.wormhole_chain_id)
        .call()
        .await?
        .sender;
    if registered != sender_bytes32 {
        return Err(DeployError::Reverted {
            context: format!(
                "setRegisteredSender did not take effect on {}",
                deployed.address
            ),
        }
        .into());
    }
    journal.confirmed(chain.name, &register_op, &tx_hash.to_string(), None)?;

    store.record(chain.name, ROLE_RECEIVER, deployed.address, Utc::now());
    store.save()?;
    journal.recorded(chain.name, ROLE_RECEIVER)?;
    journal.recorded(chain.name, &register_op)?;

    println!(
        "Registered MessageSender ({}) for {} (wormhole chain {})",
        sender_address, sender_chain.name, sender_chain.wormhole_chain_id
    );
    Ok(())
}
