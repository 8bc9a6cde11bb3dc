//! In-memory wallet for tests.
//!
//! Compiled for unit tests and behind the `test-utils` feature for the
//! integration and binary tests.

use std::sync::{Arc, Mutex, PoisonError};

use alloy::{
    primitives::{Address, B256, Bytes, TxHash, U256},
    rpc::types::TransactionRequest,
    sol_types::SolValue,
};
use async_trait::async_trait;
use color_eyre::eyre::{Result, eyre};

use super::provider::WalletProvider;

#[derive(Debug, Default)]
pub struct MockState {
    pub accounts: Vec<Address>,
    pub authorised: bool,
    pub chain_id: u64,
    pub native_balance: U256,
    pub token_balance: U256,
    pub fail_reads: bool,
    pub reject_connect: bool,
    pub reject_send: bool,
    pub calls: Vec<TransactionRequest>,
    pub sent: Vec<TransactionRequest>,
    /// JSON-RPC method names received so far, in order.
    pub log: Vec<&'static str>,
}

#[derive(Debug, Default)]
pub struct MockWallet {
    pub state: Mutex<MockState>,
}

impl MockWallet {
    pub fn new(account: Address, chain_id: u64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                accounts: vec![account],
                chain_id,
                ..Default::default()
            }),
        })
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.state.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Total number of requests that reached the wallet.
    pub fn requests(&self) -> usize {
        self.with(|s| s.log.len())
    }

    pub fn log(&self) -> Vec<&'static str> {
        self.with(|s| s.log.clone())
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.with(|s| {
            s.log.push("eth_requestAccounts");
            if s.reject_connect {
                return Err(eyre!("User rejected the request."));
            }
            s.authorised = true;
            Ok(s.accounts.clone())
        })
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.with(|s| {
            s.log.push("eth_accounts");
            Ok(if s.authorised { s.accounts.clone() } else { Vec::new() })
        })
    }

    async fn chain_id(&self) -> Result<u64> {
        self.with(|s| {
            s.log.push("eth_chainId");
            Ok(s.chain_id)
        })
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        self.with(|s| {
            s.log.push("wallet_switchEthereumChain");
            s.chain_id = chain_id;
            Ok(())
        })
    }

    async fn get_balance(&self, _account: Address) -> Result<U256> {
        self.with(|s| {
            s.log.push("eth_getBalance");
            if s.fail_reads {
                return Err(eyre!("node unavailable"));
            }
            Ok(s.native_balance)
        })
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        self.with(|s| {
            s.log.push("eth_call");
            s.calls.push(tx);
            if s.fail_reads {
                return Err(eyre!("execution reverted"));
            }
            Ok(Bytes::from(s.token_balance.abi_encode()))
        })
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        self.with(|s| {
            s.log.push("eth_sendTransaction");
            s.sent.push(tx);
            if s.reject_send {
                return Err(eyre!("User rejected the request."));
            }
            Ok(B256::repeat_byte(0xab))
        })
    }
}
