pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryWallet;

/// Failures a wallet operation can surface. The Display text becomes the
/// user-visible message inside an `isError` envelope.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("{0}")]
    Crypto(String),
    #[error("operation '{0}' is not supported by this wallet")]
    Unsupported(&'static str),
    #[error("{0}")]
    Message(String),
}

pub type WalletResult = Result<Value, WalletError>;

/// Arguments to the wallet's encrypt operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptArgs {
    pub plaintext: Vec<u8>,
    #[serde(rename = "protocolID")]
    pub protocol_id: Value,
    #[serde(rename = "keyID")]
    pub key_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResult {
    pub ciphertext: Vec<u8>,
}

/// Arguments to the wallet's decrypt operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptArgs {
    pub ciphertext: Vec<u8>,
    #[serde(rename = "protocolID")]
    pub protocol_id: Value,
    #[serde(rename = "keyID")]
    pub key_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResult {
    pub plaintext: Vec<u8>,
}

/// The wallet capability object every tool forwards to.
///
/// Apart from encrypt/decrypt, operations take and return the structured
/// JSON the caller supplied; the tool layer neither interprets nor
/// transforms their fields. Implementations must be safe for concurrent
/// use — overlapping tool calls share one wallet reference.
#[async_trait]
pub trait Wallet: Send + Sync {
    async fn get_public_key(&self, args: Value) -> WalletResult;
    async fn create_signature(&self, args: Value) -> WalletResult;
    async fn verify_signature(&self, args: Value) -> WalletResult;

    async fn encrypt(&self, args: EncryptArgs) -> Result<EncryptResult, WalletError>;
    async fn decrypt(&self, args: DecryptArgs) -> Result<DecryptResult, WalletError>;

    async fn list_actions(&self, args: Value) -> WalletResult;
    async fn list_outputs(&self, args: Value) -> WalletResult;
    async fn get_network(&self, args: Value) -> WalletResult;
    async fn get_version(&self, args: Value) -> WalletResult;
    async fn reveal_counterparty_key_linkage(&self, args: Value) -> WalletResult;
    async fn reveal_specific_key_linkage(&self, args: Value) -> WalletResult;
    async fn create_hmac(&self, args: Value) -> WalletResult;
    async fn verify_hmac(&self, args: Value) -> WalletResult;
    async fn abort_action(&self, args: Value) -> WalletResult;
    async fn internalize_action(&self, args: Value) -> WalletResult;
    async fn relinquish_output(&self, args: Value) -> WalletResult;
    async fn acquire_certificate(&self, args: Value) -> WalletResult;
    async fn list_certificates(&self, args: Value) -> WalletResult;
    async fn prove_certificate(&self, args: Value) -> WalletResult;
    async fn relinquish_certificate(&self, args: Value) -> WalletResult;
    async fn discover_by_identity_key(&self, args: Value) -> WalletResult;
    async fn discover_by_attributes(&self, args: Value) -> WalletResult;
    async fn is_authenticated(&self, args: Value) -> WalletResult;
    async fn wait_for_authentication(&self, args: Value) -> WalletResult;
    async fn get_header_for_height(&self, args: Value) -> WalletResult;
    async fn get_address(&self, args: Value) -> WalletResult;
    async fn send_to_address(&self, args: Value) -> WalletResult;
    async fn purchase_listing(&self, args: Value) -> WalletResult;
    async fn create_ordinals(&self, args: Value) -> WalletResult;
}
