use alloy::primitives::Address;
use strum::Display;

use crate::domain::purchase::PurchaseOutcome;

/// Actions that can be triggered by user input or internal events.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Tick,
    Suspend,
    Quit,
    Error(String),
    Help,

    // Wallet session
    Connect,
    RequestDisconnect,
    ConfirmDisconnect,
    CancelDisconnect,
    SyncFinished,

    // Balance
    RefreshBalance,
    RefreshFinished,
    /// Formatted token balance, tagged with the account it was read for.
    BalanceLoaded { account: Address, balance: String },

    // Purchase
    Buy,
    PurchaseFinished(PurchaseOutcome),
}
