//! deploy-sender: deploy the MessageSender contract

use alloy::sol_types::SolValue;
use chrono::Utc;
use eyre::Result;
use tracing::info;
use xmsg_rs::evm::{deploy_contract, EvmClient, ROLE_SENDER};
use xmsg_rs::{ChainName, ChainRegistry, CompiledArtifact, DeployJournal, DeploymentStore};

use crate::config::DeployConfig;

pub async fn run(config: &DeployConfig, chain_name: ChainName) -> Result<()> {
    let registry = ChainRegistry::load(&config.chains_path)?;
    let chain = registry.get(chain_name)?;

    let mut store = DeploymentStore::load(&config.record_path)?;
    let mut journal = DeployJournal::open(&config.journal_path)?;
    let artifact = CompiledArtifact::load(&config.artifacts_dir, ROLE_SENDER)?;

    let client = EvmClient::connect(&chain.rpc, config.require_private_key()?).await?;
    client.require_funds().await?;

    info!(
        chain = %chain.name,
        relayer = %chain.wormhole_relayer,
        "Deploying MessageSender"
    );

    journal.submitted(chain.name, ROLE_SENDER)?;
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
        ROLE_SENDER,
        &deployed.tx_hash.to_string(),
        Some(deployed.address),
    )?;

    store.record(chain.name, ROLE_SENDER, deployed.address, Utc::now());
    store.save()?;
    journal.recorded(chain.name, ROLE_SENDER)?;

    println!("MessageSender deployed to: {}", deployed.address);
    Ok(())
}
