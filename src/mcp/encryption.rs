//! The combined encrypt/decrypt tool.
//!
//! One tool exposes both directions because they share an argument shape
//! (protocol identifier, key identifier, binary data) and are natural
//! inverses. Unlike the pass-through adapters, this one owns real logic:
//! text/binary input normalization and the UTF-8 output heuristic.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::protocol::CallToolResult;
use crate::mcp::tools::ToolHandler;
use crate::wallet::{DecryptArgs, EncryptArgs, Wallet};

pub const DESCRIPTION: &str = "Combined tool for encrypting and decrypting data using the wallet's cryptographic keys.\n\n\
PARAMETERS:\n\
- mode: (required) Either \"encrypt\" to encrypt plaintext or \"decrypt\" to decrypt ciphertext\n\
- data: (required) Text string or array of numbers to process (plaintext for encryption or ciphertext for decryption)\n\
- encoding: (optional) For text input, the encoding format (utf8, hex, base64) - default is utf8\n\
- protocolID: (required) Protocol identifier - common values are 'aes' for symmetric encryption or 'ecies' for asymmetric encryption\n\
- keyID: (required) Key identifier - use 'default' or 'primary' for the default wallet key\n\n\
EXAMPLES:\n\
1. Encrypt text data:\n\
   {\n\
     \"mode\": \"encrypt\",\n\
     \"data\": \"Hello World\",\n\
     \"protocolID\": [1, \"aes\"],\n\
     \"keyID\": \"default\"\n\
   }\n\n\
2. Decrypt previously encrypted data:\n\
   {\n\
     \"mode\": \"decrypt\",\n\
     \"data\": [encrypted bytes from previous response],\n\
     \"protocolID\": [1, \"aes\"],\n\
     \"keyID\": \"default\"\n\
   }";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Encrypt => "encrypt",
            Mode::Decrypt => "decrypt",
        }
    }
}

/// `data` arrives either as text (decoded per `encoding`) or as an
/// already-binary byte array (used unchanged).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DataInput {
    Text(String),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Hex,
    Base64,
}

#[derive(Debug, Deserialize)]
pub struct EncryptionToolArgs {
    pub mode: Mode,
    pub data: DataInput,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(rename = "protocolID")]
    pub protocol_id: Value,
    #[serde(rename = "keyID")]
    pub key_id: String,
}

fn decode_text(data: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Utf8 => Ok(data.as_bytes().to_vec()),
        Encoding::Hex => hex::decode(data).map_err(|e| anyhow!("invalid hex data: {}", e)),
        Encoding::Base64 => general_purpose::STANDARD
            .decode(data)
            .map_err(|e| anyhow!("invalid base64 data: {}", e)),
    }
}

impl DataInput {
    fn into_bytes(self, encoding: Encoding) -> Result<Vec<u8>> {
        match self {
            DataInput::Bytes(bytes) => Ok(bytes),
            DataInput::Text(text) => decode_text(&text, encoding),
        }
    }
}

/// Decrypt output shaping: callers overwhelmingly want text back when
/// decrypting text they themselves encrypted, so plaintext that reads as
/// non-empty UTF-8 is returned as a string. Anything else falls back to the
/// raw byte array. A binary plaintext that happens to be valid UTF-8 will be
/// reported as text; compatible behavior, kept deliberately.
fn shape_plaintext(plaintext: Vec<u8>) -> Value {
    match String::from_utf8(plaintext) {
        Ok(text) if !text.is_empty() => json!({ "plaintext": text }),
        Ok(_) => json!({ "plaintext": [] }),
        Err(err) => json!({ "plaintext": err.into_bytes() }),
    }
}

async fn run(wallet: Arc<dyn Wallet>, args: EncryptionToolArgs) -> Result<Value> {
    let binary = args.data.into_bytes(args.encoding)?;
    match args.mode {
        Mode::Encrypt => {
            let result = wallet
                .encrypt(EncryptArgs {
                    plaintext: binary,
                    protocol_id: args.protocol_id,
                    key_id: args.key_id,
                })
                .await?;
            Ok(json!({ "ciphertext": result.ciphertext }))
        }
        Mode::Decrypt => {
            let result = wallet
                .decrypt(DecryptArgs {
                    ciphertext: binary,
                    protocol_id: args.protocol_id,
                    key_id: args.key_id,
                })
                .await?;
            Ok(shape_plaintext(result.plaintext))
        }
    }
}

/// One full tool invocation: argument parsing, mode dispatch, envelope
/// construction. Total — every failure ends up inside the envelope.
pub async fn call(wallet: Arc<dyn Wallet>, args: Value) -> CallToolResult {
    let args: EncryptionToolArgs = match serde_json::from_value(args) {
        Ok(parsed) => parsed,
        Err(err) => return CallToolResult::error(format!("Invalid arguments: {}", err)),
    };
    let mode = args.mode;
    match run(wallet, args).await {
        Ok(result) => CallToolResult::text(result.to_string()),
        Err(err) => CallToolResult::error(format!("Error during {}: {}", mode.as_str(), err)),
    }
}

pub fn handler(wallet: &Arc<dyn Wallet>) -> ToolHandler {
    let wallet = Arc::clone(wallet);
    Arc::new(move |args, _extra| {
        let wallet = Arc::clone(&wallet);
        Box::pin(async move { call(wallet, args).await })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_text_decodes_to_its_bytes() {
        let bytes = DataInput::Text("Hello".into())
            .into_bytes(Encoding::Utf8)
            .unwrap();
        assert_eq!(bytes, b"Hello");
    }

    #[test]
    fn hex_text_decodes_pairs_of_digits() {
        let bytes = DataInput::Text("48656c6c6f".into())
            .into_bytes(Encoding::Hex)
            .unwrap();
        assert_eq!(bytes, b"Hello");
    }

    #[test]
    fn base64_text_decodes_standard_alphabet() {
        let bytes = DataInput::Text("SGVsbG8=".into())
            .into_bytes(Encoding::Base64)
            .unwrap();
        assert_eq!(bytes, b"Hello");
    }

    #[test]
    fn byte_arrays_pass_through_regardless_of_encoding() {
        let bytes = DataInput::Bytes(vec![1, 2, 255])
            .into_bytes(Encoding::Hex)
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 255]);
    }

    #[test]
    fn invalid_hex_is_an_error() {
        assert!(DataInput::Text("zz".into()).into_bytes(Encoding::Hex).is_err());
    }

    #[test]
    fn encoding_defaults_to_utf8() {
        let args: EncryptionToolArgs = serde_json::from_value(json!({
            "mode": "encrypt",
            "data": "hi",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }))
        .unwrap();
        assert_eq!(args.encoding, Encoding::Utf8);
        assert_eq!(args.mode, Mode::Encrypt);
    }

    #[test]
    fn valid_utf8_plaintext_becomes_a_string() {
        assert_eq!(
            shape_plaintext(b"Hello World".to_vec()),
            json!({ "plaintext": "Hello World" })
        );
    }

    #[test]
    fn non_utf8_plaintext_stays_binary() {
        assert_eq!(
            shape_plaintext(vec![0, 159, 146, 150]),
            json!({ "plaintext": [0, 159, 146, 150] })
        );
    }

    #[test]
    fn empty_plaintext_stays_binary() {
        assert_eq!(shape_plaintext(Vec::new()), json!({ "plaintext": [] }));
    }
}
