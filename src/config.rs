use anyhow::{anyhow, Result};
use std::env;
use tracing::error;

/// Server configuration, loaded from environment variables (a `.env` file
/// is honored by the caller via `dotenvy` before this runs).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Network label the development wallet reports (`mainnet` or `testnet`).
    pub network: String,
    /// Root key for the development wallet, 64 hex characters. A random
    /// key is generated when unset, so identities do not survive restarts.
    pub root_key: Option<[u8; 32]>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let network = env::var("WALLET_NETWORK").unwrap_or_else(|_| "testnet".to_string());
        if network != "mainnet" && network != "testnet" {
            error!("Invalid WALLET_NETWORK '{}'. Expected 'mainnet' or 'testnet'.", network);
            return Err(anyhow!("Invalid WALLET_NETWORK: {}", network));
        }

        let root_key = match env::var("WALLET_ROOT_KEY") {
            Ok(value) => {
                let bytes = hex::decode(value.trim()).map_err(|e| {
                    error!("WALLET_ROOT_KEY is not valid hex: {}", e);
                    anyhow!("Invalid WALLET_ROOT_KEY: {}", e)
                })?;
                let key: [u8; 32] = bytes.try_into().map_err(|_| {
                    error!("WALLET_ROOT_KEY must be exactly 32 bytes (64 hex characters).");
                    anyhow!("Invalid WALLET_ROOT_KEY length")
                })?;
                Some(key)
            }
            Err(_) => None,
        };

        Ok(Self { network, root_key })
    }
}
