//! Wallet session adapter.
//!
//! Owns the [`Session`] and publishes every change through a watch channel so
//! that the view and the balance reader observe the same state.

use std::sync::Arc;

use alloy::primitives::Address;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::session::Session;

use super::provider::WalletProvider;

/// Connects to an external wallet and tracks the resulting session.
#[derive(Clone)]
pub struct Connector {
    wallet: Arc<dyn WalletProvider>,
    session: Arc<watch::Sender<Session>>,
}

impl Connector {
    pub fn new(wallet: Arc<dyn WalletProvider>) -> Self {
        let (session, _) = watch::channel(Session::default());
        Self {
            wallet,
            session: Arc::new(session),
        }
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.session.borrow().chain_id
    }

    pub fn accounts(&self) -> Vec<Address> {
        self.session.borrow().accounts.clone()
    }

    pub fn is_active(&self) -> bool {
        self.session.borrow().is_active()
    }

    pub fn provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.session.borrow().provider.clone()
    }

    /// Restore a previous authorisation without prompting the user.
    ///
    /// Failure leaves the session inactive and is only logged.
    pub async fn connect_eagerly(&self) {
        match self.try_connect_eagerly().await {
            Ok(()) => info!("Reconnected to wallet"),
            Err(e) => debug!("Failed to connect eagerly to wallet: {e}"),
        }
    }

    async fn try_connect_eagerly(&self) -> Result<()> {
        let accounts = self.wallet.accounts().await?;
        if accounts.is_empty() {
            return Err(eyre!("no existing connection"));
        }
        let chain_id = self.wallet.chain_id().await?;
        self.publish(Session::new(chain_id, accounts, self.wallet.clone()));
        Ok(())
    }

    /// Request access to the wallet on `target_chain_id`.
    ///
    /// Errors are returned to the caller untouched.
    pub async fn connect(&self, target_chain_id: u64) -> Result<()> {
        let accounts = self
            .wallet
            .request_accounts()
            .await
            .wrap_err("wallet refused the connection request")?;
        if accounts.is_empty() {
            return Err(eyre!("wallet returned no accounts"));
        }

        let mut chain_id = self.wallet.chain_id().await?;
        if chain_id != target_chain_id {
            info!("Switching wallet from chain {chain_id} to {target_chain_id}");
            self.wallet
                .switch_chain(target_chain_id)
                .await
                .wrap_err_with(|| format!("failed to switch wallet to chain {target_chain_id}"))?;
            chain_id = self.wallet.chain_id().await?;
        }

        info!("Connected {} account(s) on chain {chain_id}", accounts.len());
        self.publish(Session::new(chain_id, accounts, self.wallet.clone()));
        Ok(())
    }

    /// Forget the local session.
    ///
    /// The wallet keeps its authorisation for this client; the user has to
    /// revoke it from the wallet itself.
    pub fn disconnect(&self) {
        info!("Disconnected from wallet");
        self.publish(Session::default());
    }

    /// Pick up account or network changes made inside the wallet.
    pub async fn sync(&self) {
        if !self.is_active() {
            return;
        }

        let accounts = match self.wallet.accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                debug!("Wallet sync failed: {e}");
                return;
            }
        };
        if accounts.is_empty() {
            info!("Wallet no longer exposes any account");
            self.publish(Session::default());
            return;
        }

        let chain_id = match self.wallet.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(e) => {
                debug!("Wallet sync failed: {e}");
                return;
            }
        };

        // A disconnect may have landed while the requests were in flight.
        if self.is_active() {
            self.publish(Session::new(chain_id, accounts, self.wallet.clone()));
        }
    }

    /// Replace the session, notifying subscribers only on change.
    fn publish(&self, next: Session) {
        self.session.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                debug!("Session changed: {next:?}");
                *current = next;
                true
            }
        });
    }
}
