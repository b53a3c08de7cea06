use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use async_trait::async_trait;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey,
};
use rand::{Rng, RngCore};
use ripemd::Ripemd160;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use super::{DecryptArgs, DecryptResult, EncryptArgs, EncryptResult, Wallet, WalletError, WalletResult};

/// In-memory development wallet.
///
/// Backs the crypto-local operations with a single secp256k1 identity key
/// and AES-256-GCM keys derived per (protocolID, keyID). Chain-backed
/// operations (actions, outputs, certificates, discovery) have no backend
/// here and report themselves as unsupported. Not production key storage.
pub struct MemoryWallet {
    root_key: [u8; 32],
    signing_key: SigningKey,
    network: String,
}

#[derive(Deserialize)]
struct SignatureArgs {
    data: Vec<u8>,
}

#[derive(Deserialize)]
struct VerifySignatureArgs {
    data: Vec<u8>,
    signature: Vec<u8>,
}

#[derive(Deserialize)]
struct HmacArgs {
    data: Vec<u8>,
    #[serde(rename = "protocolID", default)]
    protocol_id: Value,
    #[serde(rename = "keyID", default)]
    key_id: String,
}

#[derive(Deserialize)]
struct VerifyHmacArgs {
    data: Vec<u8>,
    hmac: Vec<u8>,
    #[serde(rename = "protocolID", default)]
    protocol_id: Value,
    #[serde(rename = "keyID", default)]
    key_id: String,
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, WalletError> {
    serde_json::from_value(args).map_err(|e| WalletError::InvalidArgs(e.to_string()))
}

impl MemoryWallet {
    pub fn new(root_key: [u8; 32], network: impl Into<String>) -> Result<Self, WalletError> {
        // The identity key is a fixed derivation of the root key so the
        // same root always yields the same public key and address.
        let mut hasher = Sha256::new();
        hasher.update(root_key);
        hasher.update(b"identity");
        let digest = hasher.finalize();
        let signing_key = SigningKey::from_slice(&digest)
            .map_err(|e| WalletError::Crypto(format!("failed to derive identity key: {}", e)))?;
        Ok(Self {
            root_key,
            signing_key,
            network: network.into(),
        })
    }

    /// A wallet over a freshly generated random root key.
    pub fn random(network: impl Into<String>) -> Result<Self, WalletError> {
        let mut root_key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut root_key);
        Self::new(root_key, network)
    }

    /// Per-(protocolID, keyID) symmetric key.
    fn derive_key(&self, protocol_id: &Value, key_id: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.root_key);
        hasher.update(protocol_id.to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(key_id.as_bytes());
        hasher.finalize().into()
    }

    fn keyed_digest(&self, protocol_id: &Value, key_id: &str, data: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(self.derive_key(protocol_id, key_id));
        hasher.update(data);
        hasher.finalize().to_vec()
    }

    fn public_key_hex(&self) -> String {
        let encoded = self.signing_key.verifying_key().to_encoded_point(true);
        hex::encode(encoded.as_bytes())
    }
}

#[async_trait]
impl Wallet for MemoryWallet {
    async fn get_public_key(&self, _args: Value) -> WalletResult {
        Ok(json!({ "publicKey": self.public_key_hex() }))
    }

    async fn create_signature(&self, args: Value) -> WalletResult {
        let args: SignatureArgs = parse_args(args)?;
        let signature: Signature = self.signing_key.sign(&args.data);
        Ok(json!({ "signature": signature.to_der().as_bytes().to_vec() }))
    }

    async fn verify_signature(&self, args: Value) -> WalletResult {
        let args: VerifySignatureArgs = parse_args(args)?;
        let signature = Signature::from_der(&args.signature)
            .map_err(|e| WalletError::InvalidArgs(format!("malformed signature: {}", e)))?;
        let valid = self
            .signing_key
            .verifying_key()
            .verify(&args.data, &signature)
            .is_ok();
        Ok(json!({ "valid": valid }))
    }

    async fn encrypt(&self, args: EncryptArgs) -> Result<EncryptResult, WalletError> {
        let key_bytes = self.derive_key(&args.protocol_id, &args.key_id);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));

        let nonce_bytes = rand::thread_rng().gen::<[u8; 12]>();
        let nonce = Nonce::from_slice(&nonce_bytes);
        let encrypted = cipher
            .encrypt(nonce, args.plaintext.as_slice())
            .map_err(|e| WalletError::Crypto(format!("encryption failed: {}", e)))?;

        // Nonce travels prepended to the ciphertext.
        let mut ciphertext = Vec::with_capacity(12 + encrypted.len());
        ciphertext.extend_from_slice(&nonce_bytes);
        ciphertext.extend_from_slice(&encrypted);
        Ok(EncryptResult { ciphertext })
    }

    async fn decrypt(&self, args: DecryptArgs) -> Result<DecryptResult, WalletError> {
        if args.ciphertext.len() < 12 {
            return Err(WalletError::Crypto("invalid ciphertext format".into()));
        }
        let key_bytes = self.derive_key(&args.protocol_id, &args.key_id);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));

        let nonce = Nonce::from_slice(&args.ciphertext[..12]);
        let plaintext = cipher
            .decrypt(nonce, &args.ciphertext[12..])
            .map_err(|_| {
                WalletError::Crypto("decryption failed (wrong key or corrupted ciphertext)".into())
            })?;
        Ok(DecryptResult { plaintext })
    }

    async fn get_network(&self, _args: Value) -> WalletResult {
        Ok(json!({ "network": self.network }))
    }

    async fn get_version(&self, _args: Value) -> WalletResult {
        Ok(json!({ "version": concat!("wallet-mcp-server-rs ", env!("CARGO_PKG_VERSION")) }))
    }

    async fn create_hmac(&self, args: Value) -> WalletResult {
        let args: HmacArgs = parse_args(args)?;
        let digest = self.keyed_digest(&args.protocol_id, &args.key_id, &args.data);
        Ok(json!({ "hmac": digest }))
    }

    async fn verify_hmac(&self, args: Value) -> WalletResult {
        let args: VerifyHmacArgs = parse_args(args)?;
        let digest = self.keyed_digest(&args.protocol_id, &args.key_id, &args.data);
        Ok(json!({ "valid": digest == args.hmac }))
    }

    async fn is_authenticated(&self, _args: Value) -> WalletResult {
        Ok(json!({ "authenticated": true }))
    }

    async fn wait_for_authentication(&self, _args: Value) -> WalletResult {
        // A local wallet is always authenticated, so there is nothing to wait on.
        Ok(json!({ "authenticated": true }))
    }

    async fn get_address(&self, _args: Value) -> WalletResult {
        let encoded = self.signing_key.verifying_key().to_encoded_point(true);
        let sha = Sha256::digest(encoded.as_bytes());
        let hash160 = Ripemd160::digest(sha);
        Ok(json!({ "address": hex::encode(hash160) }))
    }

    async fn list_actions(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("listActions"))
    }

    async fn list_outputs(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("listOutputs"))
    }

    async fn reveal_counterparty_key_linkage(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("revealCounterpartyKeyLinkage"))
    }

    async fn reveal_specific_key_linkage(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("revealSpecificKeyLinkage"))
    }

    async fn abort_action(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("abortAction"))
    }

    async fn internalize_action(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("internalizeAction"))
    }

    async fn relinquish_output(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("relinquishOutput"))
    }

    async fn acquire_certificate(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("acquireCertificate"))
    }

    async fn list_certificates(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("listCertificates"))
    }

    async fn prove_certificate(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("proveCertificate"))
    }

    async fn relinquish_certificate(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("relinquishCertificate"))
    }

    async fn discover_by_identity_key(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("discoverByIdentityKey"))
    }

    async fn discover_by_attributes(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("discoverByAttributes"))
    }

    async fn get_header_for_height(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("getHeaderForHeight"))
    }

    async fn send_to_address(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("sendToAddress"))
    }

    async fn purchase_listing(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("purchaseListing"))
    }

    async fn create_ordinals(&self, _args: Value) -> WalletResult {
        Err(WalletError::Unsupported("createOrdinals"))
    }
}
