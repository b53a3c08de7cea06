//! End-to-end behavior of the combined encryption tool against the
//! in-memory development wallet, covering the round-trip scenarios and the
//! UTF-8 output heuristic.

use std::sync::Arc;

use serde_json::{json, Value};

use wallet_mcp_server_rs::mcp::protocol::CallToolResult;
use wallet_mcp_server_rs::mcp::tools::{register_wallet_tools, RequestContext, ToolName, ToolRegistry};
use wallet_mcp_server_rs::wallet::MemoryWallet;

fn registry() -> ToolRegistry {
    let wallet = Arc::new(MemoryWallet::new([42u8; 32], "testnet").unwrap());
    register_wallet_tools(wallet).unwrap()
}

async fn call_encryption(registry: &ToolRegistry, args: Value) -> CallToolResult {
    registry
        .call(ToolName::Encryption, args, RequestContext::default())
        .await
}

fn body(envelope: &CallToolResult) -> Value {
    serde_json::from_str(envelope.text_content()).unwrap()
}

fn ciphertext_of(envelope: &CallToolResult) -> Vec<u8> {
    body(envelope)["ciphertext"]
        .as_array()
        .expect("ciphertext array")
        .iter()
        .map(|v| v.as_u64().unwrap() as u8)
        .collect()
}

#[tokio::test]
async fn encrypt_text_yields_a_ciphertext_array() {
    let registry = registry();
    let envelope = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": "Hello World",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;

    assert!(!envelope.is_error);
    let ciphertext = ciphertext_of(&envelope);
    assert!(!ciphertext.is_empty());
    assert_ne!(ciphertext, b"Hello World");
}

#[tokio::test]
async fn decrypt_returns_the_original_text_as_a_string() {
    let registry = registry();
    let encrypted = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": "Hello World",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;

    let decrypted = call_encryption(
        &registry,
        json!({
            "mode": "decrypt",
            "data": ciphertext_of(&encrypted),
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;

    assert!(!decrypted.is_error);
    // The UTF-8 heuristic kicks in: string form, not a byte array.
    assert_eq!(body(&decrypted), json!({ "plaintext": "Hello World" }));
}

#[tokio::test]
async fn decrypt_with_a_mismatched_key_id_reports_the_mode() {
    let registry = registry();
    let encrypted = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": "Hello World",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;

    let decrypted = call_encryption(
        &registry,
        json!({
            "mode": "decrypt",
            "data": ciphertext_of(&encrypted),
            "protocolID": [1, "aes"],
            "keyID": "primary"
        }),
    )
    .await;

    assert!(decrypted.is_error);
    assert!(decrypted.text_content().starts_with("Error during decrypt:"));
}

#[tokio::test]
async fn byte_array_input_behaves_like_the_utf8_string() {
    let registry = registry();
    let encrypted = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": b"Hello World".to_vec(),
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;
    assert!(!encrypted.is_error);

    let decrypted = call_encryption(
        &registry,
        json!({
            "mode": "decrypt",
            "data": ciphertext_of(&encrypted),
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;
    assert_eq!(body(&decrypted), json!({ "plaintext": "Hello World" }));
}

#[tokio::test]
async fn hex_encoded_input_is_decoded_before_encryption() {
    let registry = registry();
    // "Hello World" as hex pairs.
    let encrypted = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": "48656c6c6f20576f726c64",
            "encoding": "hex",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;
    assert!(!encrypted.is_error);

    let decrypted = call_encryption(
        &registry,
        json!({
            "mode": "decrypt",
            "data": ciphertext_of(&encrypted),
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;
    assert_eq!(body(&decrypted), json!({ "plaintext": "Hello World" }));
}

#[tokio::test]
async fn non_utf8_plaintext_round_trips_as_bytes() {
    let registry = registry();
    let original = vec![0u8, 159, 146, 150];
    let encrypted = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": original,
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;

    let decrypted = call_encryption(
        &registry,
        json!({
            "mode": "decrypt",
            "data": ciphertext_of(&encrypted),
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;

    assert!(!decrypted.is_error);
    assert_eq!(body(&decrypted), json!({ "plaintext": [0, 159, 146, 150] }));
}

#[tokio::test]
async fn invalid_encoding_value_is_an_argument_error() {
    let registry = registry();
    let envelope = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": "Hello",
            "encoding": "utf16",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;
    assert!(envelope.is_error);
    assert_eq!(envelope.content.len(), 1);
}

#[tokio::test]
async fn bad_hex_input_fails_inside_the_envelope() {
    let registry = registry();
    let envelope = call_encryption(
        &registry,
        json!({
            "mode": "encrypt",
            "data": "not-hex",
            "encoding": "hex",
            "protocolID": [1, "aes"],
            "keyID": "default"
        }),
    )
    .await;
    assert!(envelope.is_error);
    assert!(envelope.text_content().starts_with("Error during encrypt:"));
}

#[tokio::test]
async fn unsupported_wallet_operation_surfaces_as_error_envelope() {
    let registry = registry();
    let envelope = registry
        .call(ToolName::ListActions, json!({}), RequestContext::default())
        .await;
    assert!(envelope.is_error);
    assert!(envelope.text_content().contains("listActions"));
}

#[tokio::test]
async fn get_public_key_reports_a_hex_key() {
    let registry = registry();
    let envelope = registry
        .call(ToolName::GetPublicKey, json!({}), RequestContext::default())
        .await;
    assert!(!envelope.is_error);
    let key = body(&envelope)["publicKey"].as_str().unwrap().to_string();
    assert_eq!(key.len(), 66);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
}
