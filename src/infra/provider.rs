//! Boundary to the external wallet provider.

use std::{fmt, sync::Arc};

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use color_eyre::eyre::Result;

/// An external wallet that holds the user's keys.
///
/// Methods mirror the EIP-1193 requests the client relies on. Implementations
/// must not retry; every failure is reported to the caller as-is.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to authorise this client (`eth_requestAccounts`).
    /// May prompt the user.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Accounts already authorised for this client (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<Address>>;

    async fn chain_id(&self) -> Result<u64>;

    /// Ask the wallet to switch to another network (`wallet_switchEthereumChain`).
    async fn switch_chain(&self, chain_id: u64) -> Result<()>;

    /// Native-currency balance of `account` in smallest units.
    async fn get_balance(&self, account: Address) -> Result<U256>;

    /// Read-only contract call (`eth_call`).
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes>;

    /// Hand a transaction to the wallet for signing and broadcast
    /// (`eth_sendTransaction`). Resolves once the wallet has accepted it.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash>;
}

/// A provider bound to one account, used to authorise outgoing transactions.
#[derive(Clone)]
pub struct WalletSigner {
    provider: Arc<dyn WalletProvider>,
    address: Address,
}

impl WalletSigner {
    pub fn new(provider: Arc<dyn WalletProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    /// Native-currency balance of the bound account.
    pub async fn balance(&self) -> Result<U256> {
        self.provider.get_balance(self.address).await
    }

    pub async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        self.provider.call(tx.with_from(self.address)).await
    }

    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        self.provider
            .send_transaction(tx.with_from(self.address))
            .await
    }
}

impl fmt::Debug for WalletSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
