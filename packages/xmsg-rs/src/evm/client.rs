//! EVM RPC client bound to a signing wallet
//!
//! Wraps alloy's `PrivateKeySigner` and `EthereumWallet` and hands out
//! providers with the recommended fillers attached, so callers get gas,
//! nonce, and chain-id filling plus local signing without carrying the
//! provider type around.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use eyre::{eyre, Result};
use tracing::info;
use url::Url;

use crate::error::DeployError;

/// An EVM chain connection with signing capabilities.
///
/// Constructed per script invocation and discarded at process exit; the
/// private key is never persisted.
pub struct EvmClient {
    rpc_url: Url,
    wallet: EthereumWallet,
    signer_address: Address,
    chain_id: u64,
}

impl EvmClient {
    /// Connect to an RPC endpoint with a signer.
    ///
    /// Probes `eth_chainId` up front so an unreachable endpoint fails here,
    /// before anything is submitted.
    pub async fn connect(rpc_url: &Url, private_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|e| eyre!("Invalid private key: {}", e))?;

        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let probe = ProviderBuilder::new().on_http(rpc_url.clone());
        let chain_id = probe
            .get_chain_id()
            .await
            .map_err(|e| DeployError::Network(format!("eth_chainId on {}: {}", rpc_url, e)))?;

        info!(
            rpc_url = %rpc_url,
            chain_id = chain_id,
            signer = %signer_address,
            "Connected EVM client"
        );

        Ok(Self {
            rpc_url: rpc_url.clone(),
            wallet,
            signer_address,
            chain_id,
        })
    }

    /// Build a provider with recommended fillers and the wallet attached.
    ///
    /// Providers are cheap to construct; one is built per operation rather
    /// than naming the filler stack in a stored field.
    pub fn provider(&self) -> impl Provider<Http<Client>> + Clone {
        ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(self.wallet.clone())
            .on_http(self.rpc_url.clone())
    }

    /// Get the signer's address
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Get the chain ID reported by the RPC
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the native-token balance of the signer
    pub async fn balance(&self) -> Result<U256> {
        let balance = self.provider().get_balance(self.signer_address).await?;
        Ok(balance)
    }

    /// Fail fast when the signer cannot pay for any transaction at all.
    pub async fn require_funds(&self) -> Result<()> {
        let balance = self.balance().await?;
        if balance.is_zero() {
            return Err(DeployError::InsufficientFunds {
                signer: self.signer_address,
            }
            .into());
        }
        Ok(())
    }
}
