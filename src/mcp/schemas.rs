//! Per-tool argument schemas, as advertised through `tools/list`.
//!
//! The framework layer publishes these to callers; the adapters themselves
//! pass validated arguments straight through to the wallet, so most shapes
//! here only document the wallet's own contract.

use serde_json::{json, Value};

/// Shared by the tools that take no arguments
/// (getNetwork, getVersion, isAuthenticated, waitForAuthentication, getAddress).
pub fn empty_args() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

pub fn get_public_key_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "protocolID": {
                "description": "Protocol identifier, e.g. [1, \"aes\"] or [2, \"identity\"]"
            },
            "keyID": {
                "type": "string",
                "description": "Key identifier within the protocol"
            },
            "counterparty": {
                "type": "string",
                "description": "Optional counterparty public key, 'self' or 'anyone'"
            },
            "identityKey": {
                "type": "boolean",
                "description": "Set to true to request the wallet's identity key"
            }
        }
    })
}

pub fn create_signature_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "The bytes to sign"
            },
            "protocolID": { "description": "Protocol identifier" },
            "keyID": { "type": "string", "description": "Key identifier" },
            "counterparty": { "type": "string" }
        },
        "required": ["data"]
    })
}

pub fn verify_signature_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "The bytes that were signed"
            },
            "signature": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "DER-encoded signature bytes"
            },
            "protocolID": { "description": "Protocol identifier" },
            "keyID": { "type": "string", "description": "Key identifier" },
            "counterparty": { "type": "string" }
        },
        "required": ["data", "signature"]
    })
}

pub fn encryption_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "mode": {
                "type": "string",
                "enum": ["encrypt", "decrypt"],
                "description": "Whether to encrypt plaintext or decrypt ciphertext"
            },
            "data": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "integer" } }
                ],
                "description": "Text string or array of byte values to process"
            },
            "encoding": {
                "type": "string",
                "enum": ["utf8", "hex", "base64"],
                "description": "Encoding of textual data (default utf8); ignored for byte arrays"
            },
            "protocolID": {
                "description": "Protocol identifier, e.g. [1, \"aes\"]"
            },
            "keyID": {
                "type": "string",
                "description": "Key identifier, e.g. 'default'"
            }
        },
        "required": ["mode", "data", "protocolID", "keyID"]
    })
}

pub fn list_actions_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "labels": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Filter to actions carrying all of these labels"
            },
            "limit": { "type": "integer", "minimum": 1 },
            "offset": { "type": "integer", "minimum": 0 }
        }
    })
}

pub fn list_outputs_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "basket": {
                "type": "string",
                "description": "The output basket to list"
            },
            "limit": { "type": "integer", "minimum": 1 },
            "offset": { "type": "integer", "minimum": 0 }
        },
        "required": ["basket"]
    })
}

pub fn reveal_counterparty_key_linkage_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "counterparty": { "type": "string", "description": "Counterparty public key" },
            "verifier": { "type": "string", "description": "Verifier public key the revelation is encrypted for" }
        },
        "required": ["counterparty", "verifier"]
    })
}

pub fn reveal_specific_key_linkage_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "counterparty": { "type": "string" },
            "verifier": { "type": "string" },
            "protocolID": { "description": "Protocol identifier" },
            "keyID": { "type": "string" }
        },
        "required": ["counterparty", "verifier", "protocolID", "keyID"]
    })
}

pub fn create_hmac_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "The bytes to authenticate"
            },
            "protocolID": { "description": "Protocol identifier" },
            "keyID": { "type": "string" },
            "counterparty": { "type": "string" }
        },
        "required": ["data"]
    })
}

pub fn verify_hmac_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "data": {
                "type": "array",
                "items": { "type": "integer" }
            },
            "hmac": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "The HMAC bytes to check against"
            },
            "protocolID": { "description": "Protocol identifier" },
            "keyID": { "type": "string" },
            "counterparty": { "type": "string" }
        },
        "required": ["data", "hmac"]
    })
}

pub fn abort_action_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "reference": {
                "type": "string",
                "description": "Reference of the in-progress action to abort"
            }
        },
        "required": ["reference"]
    })
}

pub fn internalize_action_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "tx": {
                "type": "array",
                "items": { "type": "integer" },
                "description": "The transaction to internalize, as raw bytes"
            },
            "outputs": {
                "type": "array",
                "description": "Per-output internalization instructions"
            },
            "description": { "type": "string" }
        },
        "required": ["tx", "outputs", "description"]
    })
}

pub fn relinquish_output_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "basket": { "type": "string" },
            "output": {
                "type": "string",
                "description": "Outpoint of the output to relinquish (txid.vout)"
            }
        },
        "required": ["basket", "output"]
    })
}

pub fn acquire_certificate_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string", "description": "Certificate type identifier" },
            "certifier": { "type": "string", "description": "Certifier public key" },
            "fields": { "type": "object", "description": "Certificate field values" },
            "acquisitionProtocol": { "type": "string" }
        },
        "required": ["type", "certifier", "fields"]
    })
}

pub fn list_certificates_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "certifiers": {
                "type": "array",
                "items": { "type": "string" }
            },
            "types": {
                "type": "array",
                "items": { "type": "string" }
            },
            "limit": { "type": "integer", "minimum": 1 },
            "offset": { "type": "integer", "minimum": 0 }
        },
        "required": ["certifiers", "types"]
    })
}

pub fn prove_certificate_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "certificate": { "type": "object", "description": "The certificate to prove" },
            "fieldsToReveal": {
                "type": "array",
                "items": { "type": "string" }
            },
            "verifier": { "type": "string", "description": "Verifier public key" }
        },
        "required": ["certificate", "fieldsToReveal", "verifier"]
    })
}

pub fn relinquish_certificate_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": { "type": "string" },
            "serialNumber": { "type": "string" },
            "certifier": { "type": "string" }
        },
        "required": ["type", "serialNumber", "certifier"]
    })
}

pub fn discover_by_identity_key_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "identityKey": {
                "type": "string",
                "description": "Identity public key to look up"
            },
            "limit": { "type": "integer", "minimum": 1 },
            "offset": { "type": "integer", "minimum": 0 }
        },
        "required": ["identityKey"]
    })
}

pub fn discover_by_attributes_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "attributes": {
                "type": "object",
                "description": "Attribute name/value pairs to match"
            },
            "limit": { "type": "integer", "minimum": 1 },
            "offset": { "type": "integer", "minimum": 0 }
        },
        "required": ["attributes"]
    })
}

pub fn get_header_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "height": {
                "type": "integer",
                "minimum": 0,
                "description": "Block height of the header to fetch"
            }
        },
        "required": ["height"]
    })
}

pub fn send_to_address_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "address": { "type": "string", "description": "Destination address" },
            "satoshis": { "type": "integer", "minimum": 1, "description": "Amount to send in satoshis" },
            "description": { "type": "string" }
        },
        "required": ["address", "satoshis"]
    })
}

pub fn purchase_listing_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "listingOutpoint": {
                "type": "string",
                "description": "Outpoint of the marketplace listing to purchase (txid.vout)"
            },
            "description": { "type": "string" }
        },
        "required": ["listingOutpoint"]
    })
}

pub fn create_ordinals_args() -> Value {
    json!({
        "type": "object",
        "properties": {
            "contentType": {
                "type": "string",
                "description": "MIME type of the inscription content"
            },
            "data": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "integer" } }
                ],
                "description": "Inscription content"
            },
            "quantity": { "type": "integer", "minimum": 1 }
        },
        "required": ["contentType", "data"]
    })
}
