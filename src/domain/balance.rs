//! Token balance reader.
//!
//! Re-reads the balance whenever the session becomes ready or changes. Read
//! failures are logged and otherwise ignored, leaving the last displayed value
//! in place. Fetches are not coalesced; each result names the account it was
//! read for so the view can drop answers for a previous account.

use alloy::primitives::{Address, U256};
use color_eyre::eyre::{Result, eyre};
use tokio::{
    sync::{mpsc::UnboundedSender, watch},
    task::JoinHandle,
};
use tracing::{debug, error};

use crate::action::Action;

use super::{contract::TokenContract, session::Session, units::format_balance};

#[derive(Debug, Clone)]
pub struct BalanceReader {
    contract: Address,
    action_tx: UnboundedSender<Action>,
}

impl BalanceReader {
    pub fn new(contract: Address, action_tx: UnboundedSender<Action>) -> Self {
        Self {
            contract,
            action_tx,
        }
    }

    /// A balance is only read for an active session with an account and a provider.
    pub fn should_fetch(session: &Session) -> bool {
        session.is_active() && session.account().is_some() && session.provider.is_some()
    }

    /// Read the token balance of the session's first account.
    pub async fn read(&self, session: &Session) -> Result<U256> {
        let signer = session
            .signer()
            .ok_or_else(|| eyre!("no active account"))?;
        let account = signer.address();
        let contract = TokenContract::new(self.contract, signer);
        contract.balance_of(account).await
    }

    /// Spawn a fetch for `session` if it is ready.
    ///
    /// On success the formatted balance is sent as [`Action::BalanceLoaded`].
    pub fn refresh(&self, session: &Session) -> Option<JoinHandle<()>> {
        if !Self::should_fetch(session) {
            return None;
        }

        let reader = self.clone();
        let session = session.clone();
        Some(tokio::spawn(async move {
            match reader.read(&session).await {
                Ok(balance) => {
                    debug!("Fetched balance {balance} for {:?}", session.account());
                    if let Some(account) = session.account() {
                        let _ = reader.action_tx.send(Action::BalanceLoaded {
                            account,
                            balance: format_balance(balance),
                        });
                    }
                }
                Err(e) => {
                    error!("Failed to fetch balance: {e:#}");
                }
            }
        }))
    }

    /// Follow session changes, fetching on every ready session.
    pub fn watch(self, mut session_rx: watch::Receiver<Session>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let session = session_rx.borrow_and_update().clone();
                self.refresh(&session);
                if session_rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
