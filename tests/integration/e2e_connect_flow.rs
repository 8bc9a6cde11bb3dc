//! Connect, sync and disconnect against a scripted wallet, with the balance
//! reader following the session the way the app runs it.

use std::time::Duration;

use alloy::primitives::U256;
use uds_wallet::config::SEPOLIA_CHAIN_ID;

use super::{ALICE, BOB, TestEnv};

const MAINNET_CHAIN_ID: u64 = 1;

fn eth(wei: u128) -> U256 {
    U256::from(wei)
}

#[tokio::test]
async fn test_connect_switches_chain_then_loads_balance() {
    let mut env = TestEnv::new(MAINNET_CHAIN_ID);
    env.wallet
        .with(|s| s.token_balance = eth(2_500_000_000_000_000_000));
    let watcher = env.reader.clone().watch(env.connector.subscribe());

    env.connector.connect(SEPOLIA_CHAIN_ID).await.unwrap();

    assert!(env.connector.is_active());
    assert_eq!(env.connector.chain_id(), Some(SEPOLIA_CHAIN_ID));
    assert_eq!(env.connector.accounts(), vec![ALICE]);
    assert_eq!(
        &env.wallet.log()[..4],
        &[
            "eth_requestAccounts",
            "eth_chainId",
            "wallet_switchEthereumChain",
            "eth_chainId"
        ]
    );
    assert_eq!(env.next_balance().await.as_deref(), Some("2.5"));

    watcher.abort();
}

#[tokio::test]
async fn test_eager_connect_without_authorisation_stays_inactive() {
    let mut env = TestEnv::new(SEPOLIA_CHAIN_ID);
    let watcher = env.reader.clone().watch(env.connector.subscribe());

    env.connector.connect_eagerly().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!env.connector.is_active());
    assert_eq!(env.wallet.log(), vec!["eth_accounts"]);
    assert!(env.action_rx.try_recv().is_err());

    watcher.abort();
}

#[tokio::test]
async fn test_eager_connect_restores_previous_authorisation() {
    let mut env = TestEnv::new(SEPOLIA_CHAIN_ID);
    env.wallet.with(|s| {
        s.authorised = true;
        s.token_balance = eth(1_000_000_000_000_000_000);
    });
    let watcher = env.reader.clone().watch(env.connector.subscribe());

    env.connector.connect_eagerly().await;

    assert!(env.connector.is_active());
    assert_eq!(env.connector.chain_id(), Some(SEPOLIA_CHAIN_ID));
    assert!(!env.wallet.log().contains(&"eth_requestAccounts"));
    assert_eq!(env.next_balance().await.as_deref(), Some("1.0"));

    watcher.abort();
}

#[tokio::test]
async fn test_sync_follows_account_switch() {
    let mut env = TestEnv::new(SEPOLIA_CHAIN_ID);
    env.wallet
        .with(|s| s.token_balance = eth(3_000_000_000_000_000_000));
    let watcher = env.reader.clone().watch(env.connector.subscribe());

    env.connector.connect(SEPOLIA_CHAIN_ID).await.unwrap();
    assert_eq!(env.next_balance().await.as_deref(), Some("3.0"));

    env.wallet.with(|s| {
        s.accounts = vec![BOB];
        s.token_balance = eth(7_000_000_000_000_000_000);
    });
    env.connector.sync().await;

    assert_eq!(env.connector.accounts(), vec![BOB]);
    assert_eq!(env.next_balance().await.as_deref(), Some("7.0"));

    watcher.abort();
}

#[tokio::test]
async fn test_sync_drops_session_when_wallet_locks() {
    let env = TestEnv::new(SEPOLIA_CHAIN_ID);
    env.connector.connect(SEPOLIA_CHAIN_ID).await.unwrap();

    env.wallet.with(|s| s.accounts.clear());
    env.connector.sync().await;

    assert!(!env.connector.is_active());
    assert_eq!(env.connector.chain_id(), None);
}

#[tokio::test]
async fn test_disconnect_stops_wallet_traffic() {
    let env = TestEnv::new(SEPOLIA_CHAIN_ID);
    env.connector.connect(SEPOLIA_CHAIN_ID).await.unwrap();

    env.connector.disconnect();
    let requests = env.wallet.log().len();
    env.connector.sync().await;

    assert!(!env.connector.is_active());
    assert_eq!(env.wallet.log().len(), requests);
    // The wallet still considers the app authorised.
    assert!(env.wallet.with(|s| s.authorised));
}

#[tokio::test]
async fn test_rejected_connect_leaves_session_inactive() {
    let env = TestEnv::new(SEPOLIA_CHAIN_ID);
    env.wallet.with(|s| s.reject_connect = true);

    let err = env.connector.connect(SEPOLIA_CHAIN_ID).await.unwrap_err();

    assert!(format!("{err:#}").contains("User rejected the request."));
    assert!(!env.connector.is_active());
}
