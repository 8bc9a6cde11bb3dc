//! Token purchases from a connected session.

use alloy::{
    primitives::{B256, TxKind, U256},
    sol_types::SolCall,
};
use uds_wallet::{
    config::SEPOLIA_CHAIN_ID,
    domain::{
        contract::buyCall,
        purchase::{INSUFFICIENT_FUNDS, PurchaseOutcome, TRANSACTION_FAILED},
    },
};

use super::{ALICE, TestEnv};

const ONE_ETH: u128 = 1_000_000_000_000_000_000;

async fn connected(native_balance: u128) -> TestEnv {
    let env = TestEnv::new(SEPOLIA_CHAIN_ID);
    env.wallet
        .with(|s| s.native_balance = U256::from(native_balance));
    env.connector.connect(SEPOLIA_CHAIN_ID).await.unwrap();
    env
}

#[tokio::test]
async fn test_buy_sends_value_to_contract() {
    let env = connected(2 * ONE_ETH).await;

    let outcome = env
        .submitter
        .submit(&env.connector.session(), "1.5")
        .await;

    assert_eq!(outcome, PurchaseOutcome::Submitted(B256::repeat_byte(0xab)));
    assert_eq!(outcome.feedback(), None);

    let sent = env.wallet.with(|s| s.sent.clone());
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(tx.to, Some(TxKind::Call(env.config.contract.address)));
    assert_eq!(tx.from, Some(ALICE));
    assert_eq!(tx.value, Some(U256::from(3 * ONE_ETH / 2)));
    let input = tx.input.input().unwrap();
    assert_eq!(&input[..4], &buyCall::SELECTOR[..]);
}

#[tokio::test]
async fn test_insufficient_funds_skips_contract() {
    let env = connected(ONE_ETH / 2).await;

    let outcome = env.submitter.submit(&env.connector.session(), "1").await;

    assert_eq!(
        outcome,
        PurchaseOutcome::InsufficientFunds {
            balance: U256::from(ONE_ETH / 2),
            value: U256::from(ONE_ETH),
        }
    );
    assert_eq!(outcome.feedback(), Some(INSUFFICIENT_FUNDS));
    assert!(!env.wallet.log().contains(&"eth_sendTransaction"));
}

#[tokio::test]
async fn test_rejected_transaction_reports_failure() {
    let env = connected(5 * ONE_ETH).await;
    env.wallet.with(|s| s.reject_send = true);

    let outcome = env.submitter.submit(&env.connector.session(), "1").await;

    assert_eq!(outcome, PurchaseOutcome::Failed);
    assert_eq!(outcome.feedback(), Some(TRANSACTION_FAILED));
}

#[tokio::test]
async fn test_zero_amount_makes_no_requests() {
    let env = connected(ONE_ETH).await;
    let requests = env.wallet.log().len();

    for amount in ["0", "", "-2"] {
        let outcome = env.submitter.submit(&env.connector.session(), amount).await;
        assert_eq!(outcome, PurchaseOutcome::Skipped);
    }
    assert_eq!(env.wallet.log().len(), requests);
}

#[tokio::test]
async fn test_purchase_after_disconnect_fails() {
    let env = connected(ONE_ETH).await;
    env.connector.disconnect();
    let requests = env.wallet.log().len();

    let outcome = env.submitter.submit(&env.connector.session(), "0.1").await;

    assert_eq!(outcome, PurchaseOutcome::Failed);
    assert_eq!(env.wallet.log().len(), requests);
}
