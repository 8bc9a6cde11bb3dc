use std::{fmt, sync::Arc};

use alloy::primitives::Address;

use crate::infra::provider::{WalletProvider, WalletSigner};

/// Connection state shared between the wallet connector and its subscribers.
///
/// A session is active iff it has at least one account and a provider.
#[derive(Clone, Default)]
pub struct Session {
    pub chain_id: Option<u64>,
    pub accounts: Vec<Address>,
    pub provider: Option<Arc<dyn WalletProvider>>,
}

impl Session {
    pub fn new(chain_id: u64, accounts: Vec<Address>, provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            chain_id: Some(chain_id),
            accounts,
            provider: Some(provider),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.accounts.is_empty() && self.provider.is_some()
    }

    /// The account used for reads and purchases.
    pub fn account(&self) -> Option<Address> {
        self.accounts.first().copied()
    }

    /// Signing handle for the first account, if the session is active.
    pub fn signer(&self) -> Option<WalletSigner> {
        match (&self.provider, self.account()) {
            (Some(provider), Some(account)) => Some(WalletSigner::new(provider.clone(), account)),
            _ => None,
        }
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        let same_provider = match (&self.provider, &other.provider) {
            (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            (None, None) => true,
            _ => false,
        };
        same_provider && self.chain_id == other.chain_id && self.accounts == other.accounts
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("chain_id", &self.chain_id)
            .field("accounts", &self.accounts)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}
