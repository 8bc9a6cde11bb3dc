//! Binding for the UDS token sale contract.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use color_eyre::eyre::{Result, WrapErr};

use crate::infra::provider::WalletSigner;

mod abi {
    alloy::sol! {
        function balanceOf(address account) external view returns (uint256);
        function buy() external payable;
    }
}

pub use abi::{balanceOfCall, buyCall};

/// The token contract, called through a signing handle.
#[derive(Debug, Clone)]
pub struct TokenContract {
    address: Address,
    signer: WalletSigner,
}

impl TokenContract {
    pub fn new(address: Address, signer: WalletSigner) -> Self {
        Self { address, signer }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Token balance of `account` in smallest units.
    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        let calldata = abi::balanceOfCall { account }.abi_encode();
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(Bytes::from(calldata));
        let output = self.signer.call(tx).await?;

        abi::balanceOfCall::abi_decode_returns(&output).wrap_err("balanceOf decode failed")
    }

    /// Buy tokens, paying `value` in native currency.
    ///
    /// Returns the hash once the wallet has accepted and broadcast the
    /// transaction. Inclusion is not awaited.
    pub async fn buy(&self, value: U256) -> Result<TxHash> {
        let calldata = abi::buyCall {}.abi_encode();
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(Bytes::from(calldata))
            .with_value(value);

        self.signer.send_transaction(tx).await
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{TxKind, address};

    use super::*;
    use crate::infra::mock::MockWallet;

    const CONTRACT: Address = address!("ff4934b7c7fb1cc70e49f29515672af8c649010f");
    const ACCOUNT: Address = address!("abcdef1234567890abcdef1234567890abcdef12");

    #[tokio::test]
    async fn test_balance_of_decodes_return() {
        let wallet = MockWallet::new(ACCOUNT, 11155111);
        wallet.with(|s| s.token_balance = U256::from(42u64));
        let contract = TokenContract::new(CONTRACT, WalletSigner::new(wallet.clone(), ACCOUNT));

        assert_eq!(contract.balance_of(ACCOUNT).await.unwrap(), U256::from(42u64));

        let calls = wallet.with(|s| s.calls.clone());
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to, Some(TxKind::Call(CONTRACT)));
        assert_eq!(calls[0].from, Some(ACCOUNT));
        let input = calls[0].input.input().unwrap();
        assert_eq!(&input[..4], balanceOfCall::SELECTOR.as_slice());
    }

    #[tokio::test]
    async fn test_buy_attaches_value() {
        let wallet = MockWallet::new(ACCOUNT, 11155111);
        let contract = TokenContract::new(CONTRACT, WalletSigner::new(wallet.clone(), ACCOUNT));
        let value = U256::from(7u64);

        contract.buy(value).await.unwrap();

        let sent = wallet.with(|s| s.sent.clone());
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].value, Some(value));
        assert_eq!(sent[0].from, Some(ACCOUNT));
        assert_eq!(
            sent[0].input.input().unwrap().as_ref(),
            buyCall::SELECTOR.as_slice()
        );
    }
}
