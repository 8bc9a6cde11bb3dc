//! Token purchase submission.

use alloy::primitives::{Address, TxHash, U256};
use color_eyre::eyre::{Result, eyre};
use tracing::{debug, error, info};

use super::{contract::TokenContract, session::Session, units::parse_amount};

pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds for this transaction.";
pub const TRANSACTION_FAILED: &str = "Transaction failed";

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Amount was not strictly positive; nothing was sent to the wallet.
    Skipped,
    /// The account cannot cover the requested spend; the contract was not called.
    InsufficientFunds { balance: U256, value: U256 },
    /// The wallet accepted and broadcast the transaction.
    Submitted(TxHash),
    /// The wallet, node or contract rejected the request.
    Failed,
}

impl PurchaseOutcome {
    /// User-facing error text for this outcome, if any.
    pub fn feedback(&self) -> Option<&'static str> {
        match self {
            Self::InsufficientFunds { .. } => Some(INSUFFICIENT_FUNDS),
            Self::Failed => Some(TRANSACTION_FAILED),
            Self::Skipped | Self::Submitted(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PurchaseSubmitter {
    contract: Address,
}

impl PurchaseSubmitter {
    pub fn new(contract: Address) -> Self {
        Self { contract }
    }

    /// Buy tokens for `amount` native units on behalf of the session's account.
    ///
    /// Blank, zero and negative amounts return [`PurchaseOutcome::Skipped`]
    /// before any wallet request is made.
    pub async fn submit(&self, session: &Session, amount: &str) -> PurchaseOutcome {
        let value = match parse_amount(amount) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("Ignoring non-positive purchase amount {amount:?}");
                return PurchaseOutcome::Skipped;
            }
            Err(e) => {
                error!("Transaction failed: {e:#}");
                return PurchaseOutcome::Failed;
            }
        };

        match self.try_submit(session, value).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Transaction failed: {e:#}");
                PurchaseOutcome::Failed
            }
        }
    }

    async fn try_submit(&self, session: &Session, value: U256) -> Result<PurchaseOutcome> {
        let signer = session
            .signer()
            .ok_or_else(|| eyre!("no active account"))?;

        let balance = signer.balance().await?;
        if balance < value {
            info!("Insufficient funds: balance {balance} < value {value}");
            return Ok(PurchaseOutcome::InsufficientFunds { balance, value });
        }

        let contract = TokenContract::new(self.contract, signer);
        let tx_hash = contract.buy(value).await?;
        info!("Transaction hash: {tx_hash}");
        Ok(PurchaseOutcome::Submitted(tx_hash))
    }
}
