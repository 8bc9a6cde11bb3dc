//! Integration tests for uds-wallet.
//!
//! Drives the connector, balance reader and purchase submitter together
//! against the in-memory wallet, which records every request it receives.

pub mod e2e_connect_flow;
pub mod e2e_purchase_flow;

use std::{sync::Arc, time::Duration};

use alloy::primitives::{Address, address};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use uds_wallet::{
    action::Action,
    config::{Config, SEPOLIA_CHAIN_ID},
    domain::{balance::BalanceReader, purchase::PurchaseSubmitter},
    infra::{connector::Connector, mock::MockWallet},
};

pub const ALICE: Address = address!("00000000000000000000000000000000000a11ce");
pub const BOB: Address = address!("0000000000000000000000000000000000000b0b");

/// Everything the app wires together at startup, minus the terminal.
pub struct TestEnv {
    pub config: Config,
    pub wallet: Arc<MockWallet>,
    pub connector: Connector,
    pub reader: BalanceReader,
    pub submitter: PurchaseSubmitter,
    pub action_rx: UnboundedReceiver<Action>,
}

impl TestEnv {
    pub fn new(wallet_chain_id: u64) -> Self {
        let config = Config::sepolia();
        assert_eq!(config.network.chain_id, SEPOLIA_CHAIN_ID);

        let wallet = MockWallet::new(ALICE, wallet_chain_id);
        let connector = Connector::new(wallet.clone());
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let reader = BalanceReader::new(config.contract.address, action_tx);
        let submitter = PurchaseSubmitter::new(config.contract.address);

        Self {
            config,
            wallet,
            connector,
            reader,
            submitter,
            action_rx,
        }
    }

    /// Wait for the next balance update, skipping unrelated actions.
    pub async fn next_balance(&mut self) -> Option<String> {
        let wait = async {
            while let Some(action) = self.action_rx.recv().await {
                if let Action::BalanceLoaded { balance, .. } = action {
                    return Some(balance);
                }
            }
            None
        };
        tokio::time::timeout(Duration::from_secs(2), wait)
            .await
            .ok()
            .flatten()
    }
}
