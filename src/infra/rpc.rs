use alloy::{
    primitives::{Address, Bytes, TxHash, U64, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

use crate::config::Config;

use super::provider::WalletProvider;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams {
    chain_id: U64,
}

/// Wallet reached over its JSON-RPC endpoint.
///
/// The wallet signs `eth_sendTransaction` requests itself, so the provider is
/// built without fillers and never sees key material.
pub struct RpcWallet {
    provider: DynProvider,
    url: String,
}

impl RpcWallet {
    pub fn new(config: &Config) -> Result<Self> {
        let url = config.network.wallet_url.clone();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url.parse().wrap_err_with(|| format!("invalid wallet URL: {url}"))?)
            .erased();
        Ok(Self { provider, url })
    }

    /// Get the wallet endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        let accounts: Vec<Address> = self
            .provider
            .raw_request("eth_requestAccounts".into(), ())
            .await?;
        Ok(accounts)
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.provider.get_accounts().await?)
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        let params = [SwitchChainParams {
            chain_id: U64::from(chain_id),
        }];
        self.provider
            .raw_request::<_, Option<()>>("wallet_switchEthereumChain".into(), params)
            .await?;
        Ok(())
    }

    async fn get_balance(&self, account: Address) -> Result<U256> {
        Ok(self.provider.get_balance(account).await?)
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        Ok(self.provider.call(tx).await?)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }
}
