//! Contract deployment and receipt confirmation
//!
//! Deploys a compiled artifact by submitting a create transaction (creation
//! bytecode plus ABI-encoded constructor args) and waiting for the receipt
//! under a bounded timeout. There is no retry: a failed deployment
//! terminates the run with no record-file change.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, TxHash},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::Transport,
};
use eyre::{eyre, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use crate::artifact::CompiledArtifact;
use crate::error::{classify_send_error, DeployError};

/// Default bound on how long to wait for a transaction receipt.
pub const CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// A confirmed deployment.
#[derive(Debug, Clone)]
pub struct Deployed {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// Deploy a compiled contract and wait for on-chain confirmation.
///
/// `constructor_args` must already be ABI-encoded (use
/// `SolValue::abi_encode` on the argument values). Returns only after the
/// receipt is in and reports success.
pub async fn deploy_contract<T, P>(
    provider: &P,
    signer: Address,
    artifact: &CompiledArtifact,
    constructor_args: &[u8],
    timeout: Duration,
) -> Result<Deployed>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    let code = artifact.deploy_code(constructor_args);
    debug!(
        contract = %artifact.contract_name,
        code_bytes = code.len(),
        "Submitting deployment transaction"
    );

    let tx = TransactionRequest::default().with_deploy_code(code);
    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| classify_send_error(signer, &e.to_string()))?;

    let tx_hash = *pending.tx_hash();
    info!(
        contract = %artifact.contract_name,
        tx_hash = %tx_hash,
        "Deployment submitted, waiting for confirmation"
    );

    let context = format!("deploy {} ({})", artifact.contract_name, tx_hash);
    let receipt = await_receipt(pending.get_receipt(), timeout, &context).await?;
    require_success(&receipt)?;

    let address = receipt
        .contract_address
        .ok_or_else(|| eyre!("Receipt for {} is missing the contract address", tx_hash))?;

    info!(
        contract = %artifact.contract_name,
        address = %address,
        "Deployment confirmed"
    );

    Ok(Deployed { address, tx_hash })
}

/// Await a receipt future under a timeout.
///
/// The underlying client polls until inclusion; the timeout converts an
/// endless wait into a `ConfirmationTimeout` the operator can act on.
pub async fn await_receipt<F, E>(
    receipt: F,
    timeout: Duration,
    context: &str,
) -> Result<TransactionReceipt>
where
    F: Future<Output = Result<TransactionReceipt, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, receipt).await {
        Ok(Ok(receipt)) => Ok(receipt),
        Ok(Err(e)) => Err(DeployError::Network(format!("{}: {}", context, e)).into()),
        Err(_) => Err(DeployError::ConfirmationTimeout {
            seconds: timeout.as_secs(),
            context: context.to_string(),
        }
        .into()),
    }
}

/// Turn a reverted receipt into an error.
pub fn require_success(receipt: &TransactionReceipt) -> Result<(), DeployError> {
    if receipt.status() {
        Ok(())
    } else {
        Err(DeployError::Reverted {
            context: format!("transaction {}", receipt.transaction_hash),
        })
    }
}
