use std::path::PathBuf;

use alloy::primitives::{Address, address};
use directories::ProjectDirs;

/// Address of the UDS sale contract on Sepolia.
pub const UDS_CONTRACT: Address = address!("ff4934b7c7fb1cc70e49f29515672af8c649010f");

pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const DEVNET_CHAIN_ID: u64 = 31337;

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("UDS_WALLET_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "sakkarin", "uds-wallet") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub name: String,
    /// Chain the wallet is asked to switch to on connect.
    pub chain_id: u64,
    /// JSON-RPC endpoint of the wallet provider.
    pub wallet_url: String,
}

#[derive(Debug, Clone)]
pub struct ContractConfig {
    pub address: Address,
    pub token_symbol: String,
    /// Tokens received per native unit, shown next to the purchase form.
    pub tokens_per_eth: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::sepolia()
    }
}

impl Config {
    /// Create config from CLI args.
    pub fn new(network: &str, wallet_url: Option<&str>) -> Self {
        let mut config = Self::from_network(network);
        if let Some(url) = wallet_url {
            config.network.wallet_url = url.to_string();
        }
        config
    }

    /// Sepolia through a desktop wallet's local RPC port.
    pub fn sepolia() -> Self {
        Self {
            network: NetworkConfig {
                name: "sepolia".to_string(),
                chain_id: SEPOLIA_CHAIN_ID,
                wallet_url: "http://127.0.0.1:1248".to_string(),
            },
            contract: ContractConfig::uds(),
        }
    }

    /// Local development node with unlocked accounts.
    pub fn devnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "devnet".to_string(),
                chain_id: DEVNET_CHAIN_ID,
                wallet_url: "http://127.0.0.1:8545".to_string(),
            },
            contract: ContractConfig::uds(),
        }
    }

    pub fn from_network(network: &str) -> Self {
        match network {
            "devnet" => Self::devnet(),
            _ => Self::sepolia(),
        }
    }
}

impl ContractConfig {
    fn uds() -> Self {
        Self {
            address: UDS_CONTRACT,
            token_symbol: "UDS".to_string(),
            tokens_per_eth: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_network() {
        assert_eq!(Config::from_network("sepolia").network.chain_id, SEPOLIA_CHAIN_ID);
        assert_eq!(Config::from_network("devnet").network.chain_id, DEVNET_CHAIN_ID);
        assert_eq!(Config::from_network("unknown").network.name, "sepolia");
    }

    #[test]
    fn test_wallet_url_override() {
        let config = Config::new("sepolia", Some("http://localhost:9999"));
        assert_eq!(config.network.wallet_url, "http://localhost:9999");
        assert_eq!(config.contract.address, UDS_CONTRACT);
    }
}
